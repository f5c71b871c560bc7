//! # skrepka-core: Pure Document Logic for Skrepka
//!
//! This crate is the **heart** of Skrepka. It contains all document
//! generation logic as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Skrepka Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                skrepka-service (Orchestration)                  │   │
//! │  │   generate ──► get ──► list ──► set_status ──► delete          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ skrepka-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌──────────┐ ┌──────────┐ ┌──────────┐ ┌──────────────────┐  │   │
//! │  │   │  money   │ │  items   │ │ speller  │ │      render      │  │   │
//! │  │   │  Money   │ │  totals  │ │ amounts  │ │ sections→layout  │  │   │
//! │  │   │ VatRate  │ │   VAT    │ │ in words │ │     →lopdf       │  │   │
//! │  │   └──────────┘ └──────────┘ └──────────┘ └──────────────────┘  │   │
//! │  │   ┌──────────┐ ┌──────────┐ ┌──────────┐                       │   │
//! │  │   │  types   │ │lifecycle │ │  number  │                       │   │
//! │  │   │ payloads │ │  status  │ │ periods  │                       │   │
//! │  │   └──────────┘ └──────────┘ └──────────┘                       │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO CLOCK • PURE FUNCTIONS             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                   skrepka-db (Database Layer)                   │   │
//! │  │        SQLite documents + counters, migrations, queries        │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (payloads, parties, statuses)
//! - [`money`] - Money and fixed-point arithmetic (no floating point!)
//! - [`items`] - Line item calculation and totals
//! - [`speller`] - Amounts in words (Триста рублей 00 копеек)
//! - [`number`] - Document number formatting and periods
//! - [`lifecycle`] - Status transition rules
//! - [`render`] - Deterministic PDF rendering
//! - [`validation`] - Payload-level validation
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: same payload + number = same PDF bytes, always
//! 2. **No I/O**: database, file system and clock access is FORBIDDEN here
//! 3. **Integer Money**: all monetary values are kopecks (i64), quantities
//!    are thousandths; floats exist only at the DTO boundary
//! 4. **Explicit Errors**: all errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use skrepka_core::items::calculate_items;
//! use skrepka_core::speller::speller_for_currency;
//! use skrepka_core::types::LineItem;
//!
//! let items = vec![LineItem {
//!     name: "Консультация".into(),
//!     description: None,
//!     unit: "ч".into(),
//!     quantity: 2.0,
//!     unit_price: 150.0,
//!     vat_rate: None,
//!     vat_amount: None,
//!     line_total: None,
//! }];
//!
//! let lines = calculate_items(&items).unwrap();
//! assert_eq!(lines.totals.total.kopecks(), 30000); // 300.00
//!
//! let speller = speller_for_currency("RUB").unwrap();
//! assert_eq!(
//!     speller.spell(lines.totals.total),
//!     "Триста рублей 00 копеек"
//! );
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod items;
pub mod lifecycle;
pub mod money;
pub mod number;
pub mod render;
pub mod speller;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use skrepka_core::Money` instead of
// `use skrepka_core::money::Money`

pub use error::{CoreError, CoreResult, LifecycleError, RenderError, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Currency documents are denominated in when the caller does not say
/// otherwise. Spelling and totals formatting are registered for it.
pub const DEFAULT_CURRENCY: &str = "RUB";

/// Maximum line items in a single document
///
/// ## Business Reason
/// Keeps payloads and rendered tables bounded; a document this size
/// already spans several pages.
pub const MAX_DOCUMENT_ITEMS: usize = 200;

/// Maximum length of a line item name, in characters
pub const MAX_ITEM_NAME_LEN: usize = 256;

/// Maximum length of a unit of measure, in characters
pub const MAX_UNIT_LEN: usize = 32;

/// Maximum length of a party name, in characters
pub const MAX_PARTY_NAME_LEN: usize = 512;
