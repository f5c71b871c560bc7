//! # Document Renderer
//!
//! Pure PDF rendering: validated payload in, bytes out. No clock reads,
//! no I/O, no shared state, so the same input always produces the same
//! bytes and a render can be retried or compared safely.
//!
//! ## Pipeline
//! ```text
//! ┌──────────────────────────────────────────────────────────────────────┐
//! │                        render_document()                             │
//! │                                                                      │
//! │  payload + totals ──► section::build_sections  (per-type builders)   │
//! │        Vec<Section> ──► layout::layout         (generic engine)      │
//! │           Vec<Page> ──► pdf::assemble          (lopdf backend)       │
//! │                              │                                       │
//! │                              ▼                                       │
//! │                          Vec<u8>                                     │
//! └──────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The section builders own every label and formatting decision; the
//! layout engine owns geometry; the backend owns PDF syntax. Document
//! types never leak past the first stage.

mod format;
mod layout;
mod pdf;
mod section;

use crate::error::RenderError;
use crate::items::CalculatedLines;
use crate::types::DocumentPayload;

/// Renders a document to PDF bytes.
///
/// `lines` must be the calculator output for this payload's items, and
/// `amount_in_words` the spelled form of its total. The payload is
/// assumed validated; no business checks happen here.
///
/// ## Example
/// ```rust
/// use chrono::NaiveDate;
/// use skrepka_core::items::calculate_items;
/// use skrepka_core::render::render_document;
/// use skrepka_core::types::{DocumentPayload, InvoiceData, LineItem, PartyInfo};
///
/// let data = InvoiceData {
///     seller: PartyInfo { name: "ООО Ромашка".into(), ..Default::default() },
///     buyer: PartyInfo { name: "ИП Петров".into(), ..Default::default() },
///     items: vec![LineItem {
///         name: "Товар".into(),
///         description: None,
///         unit: "шт".into(),
///         quantity: 1.0,
///         unit_price: 100.0,
///         vat_rate: None,
///         vat_amount: None,
///         line_total: None,
///     }],
///     invoice_date: NaiveDate::from_ymd_opt(2025, 1, 15).unwrap(),
///     due_date: None,
///     notes: None,
///     include_vat: false,
/// };
/// let lines = calculate_items(&data.items).unwrap();
/// let payload = DocumentPayload::Invoice(data);
///
/// let bytes = render_document(&payload, &lines, "INV-202501-0001", "Сто рублей 00 копеек").unwrap();
/// assert!(bytes.starts_with(b"%PDF"));
/// ```
pub fn render_document(
    payload: &DocumentPayload,
    lines: &CalculatedLines,
    number: &str,
    amount_in_words: &str,
) -> Result<Vec<u8>, RenderError> {
    let sections = section::build_sections(payload, lines, number, amount_in_words);
    let pages = layout::layout(&sections);
    pdf::assemble(&pages)
}

// =============================================================================
// Unit Tests
// =============================================================================
