//! # Domain Types
//!
//! Core domain types used throughout Skrepka.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌──────────────────┐   ┌──────────────────┐   ┌────────────────┐      │
//! │  │ GeneratedDocument│   │ DocumentPayload  │   │   PartyInfo    │      │
//! │  │  ──────────────  │   │  ──────────────  │   │  ────────────  │      │
//! │  │  id (UUID)       │   │  Invoice         │   │  name          │      │
//! │  │  number          │   │  Waybill         │   │  tax ids       │      │
//! │  │  status          │   │  CompletionAct   │   │  bank fields   │      │
//! │  │  total_cents     │   └──────────────────┘   │  signer names  │      │
//! │  └──────────────────┘                          └────────────────┘      │
//! │                                                                         │
//! │  ┌──────────────────┐   ┌──────────────────┐   ┌────────────────┐      │
//! │  │     VatRate      │   │  DocumentStatus  │   │  DocumentType  │      │
//! │  │  ──────────────  │   │  ──────────────  │   │  ────────────  │      │
//! │  │  bps (u32)       │   │  Draft..Paid     │   │  Invoice       │      │
//! │  │  2000 = 20%      │   │  Cancelled       │   │  Waybill       │      │
//! │  └──────────────────┘   └──────────────────┘   │  CompletionAct │      │
//! │                                                └────────────────┘      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Dual-Key Identity Pattern
//! Every document has:
//! - `id`: UUID v4 - immutable, used for storage relations
//! - `number`: business identifier (INV-202501-0001), unique per
//!   (type, company, period), printed on the artifact

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::money::Money;

// =============================================================================
// VAT Rate
// =============================================================================

/// VAT rate represented in basis points (bps).
///
/// 1 basis point = 0.01% = 1/10000, so 2000 bps = 20% (the standard
/// Russian VAT rate; 1000 bps = 10% reduced rate).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VatRate(u32);

impl VatRate {
    /// Creates a VAT rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        VatRate(bps)
    }

    /// Creates a VAT rate from a whole percentage.
    #[inline]
    pub const fn from_percent(pct: u32) -> Self {
        VatRate(pct * 100)
    }

    /// Converts a decimal percentage (a JSON number from an input DTO)
    /// into a VAT rate. Returns `None` outside the sane 0..=100 range.
    pub fn try_from_percent_decimal(pct: f64) -> Option<Self> {
        if !pct.is_finite() || !(0.0..=100.0).contains(&pct) {
            return None;
        }
        Some(VatRate((pct * 100.0).round() as u32))
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percent(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Zero VAT rate.
    #[inline]
    pub const fn zero() -> Self {
        VatRate(0)
    }

    /// Checks if the rate is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl Default for VatRate {
    fn default() -> Self {
        VatRate::zero()
    }
}

// =============================================================================
// Quantity
// =============================================================================

/// Fixed-point quantity in thousandths of a unit.
///
/// Financial documents routinely carry fractional quantities (2.5 kg,
/// 0.75 h), so quantities use the same integer fixed-point discipline as
/// [`Money`]: 3 decimals, converted once at the DTO boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Quantity(i64);

/// Largest decimal quantity accepted at the conversion boundary.
const MAX_DECIMAL_QUANTITY: f64 = 1.0e12;

impl Quantity {
    /// Creates a quantity from thousandths (2500 = 2.5).
    #[inline]
    pub const fn from_thousandths(thousandths: i64) -> Self {
        Quantity(thousandths)
    }

    /// Converts a decimal quantity into fixed-point, rounding half away
    /// from zero to the thousandth. Returns `None` for non-finite values
    /// or magnitudes the representation cannot hold exactly.
    pub fn try_from_decimal(value: f64) -> Option<Self> {
        if !value.is_finite() || value.abs() > MAX_DECIMAL_QUANTITY {
            return None;
        }
        Some(Quantity((value * 1000.0).round() as i64))
    }

    /// Returns the raw value in thousandths.
    #[inline]
    pub const fn thousandths(&self) -> i64 {
        self.0
    }

    /// Checks if the quantity is strictly positive.
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }
}

/// Displays with up to three decimals, trailing zeros trimmed ("3", "2.5").
impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let whole = self.0 / 1000;
        let frac = (self.0 % 1000).abs();
        if frac == 0 {
            write!(f, "{}", whole)
        } else {
            let s = format!("{:03}", frac);
            write!(f, "{}.{}", whole, s.trim_end_matches('0'))
        }
    }
}

// =============================================================================
// Document Type
// =============================================================================

/// The kind of financial document being generated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "snake_case"))]
#[serde(rename_all = "snake_case")]
pub enum DocumentType {
    /// Payment invoice (счёт на оплату).
    Invoice,
    /// Goods waybill (товарная накладная).
    Waybill,
    /// Work/services completion act (акт выполненных работ).
    CompletionAct,
}

impl DocumentType {
    /// Stable string form, matching the stored column value.
    pub const fn as_str(&self) -> &'static str {
        match self {
            DocumentType::Invoice => "invoice",
            DocumentType::Waybill => "waybill",
            DocumentType::CompletionAct => "completion_act",
        }
    }

    /// Fixed number prefix per type (`INV-202501-0001`).
    pub const fn number_prefix(&self) -> &'static str {
        match self {
            DocumentType::Invoice => "INV",
            DocumentType::Waybill => "WB",
            DocumentType::CompletionAct => "ACT",
        }
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Document Status
// =============================================================================

/// The lifecycle status of a generated document.
///
/// Transitions are governed by the `lifecycle` module; nothing else may
/// change a stored status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[serde(rename_all = "snake_case")]
pub enum DocumentStatus {
    /// Freshly generated, not yet signed.
    Draft,
    /// Signed by the issuing party.
    Signed,
    /// Sent to the counterparty.
    Sent,
    /// Payment received. Terminal.
    Paid,
    /// Withdrawn before payment. Terminal.
    Cancelled,
}

impl DocumentStatus {
    /// Stable string form, matching the stored column value.
    pub const fn as_str(&self) -> &'static str {
        match self {
            DocumentStatus::Draft => "draft",
            DocumentStatus::Signed => "signed",
            DocumentStatus::Sent => "sent",
            DocumentStatus::Paid => "paid",
            DocumentStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for DocumentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Default for DocumentStatus {
    fn default() -> Self {
        DocumentStatus::Draft
    }
}

// =============================================================================
// Party Info
// =============================================================================

/// Requisites of one party on a document (seller, buyer, executor, ...).
///
/// Embedded value object: parties live inside the payload and have no
/// identity of their own. Only `name` is required; everything else prints
/// when present and is skipped when not.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PartyInfo {
    /// Legal name. Required.
    pub name: String,
    /// Taxpayer identification number (ИНН).
    #[serde(default)]
    pub tax_id: Option<String>,
    /// Registration code (КПП).
    #[serde(default)]
    pub registration_id: Option<String>,
    /// Legal or postal address.
    #[serde(default)]
    pub address: Option<String>,
    /// Bank name.
    #[serde(default)]
    pub bank_name: Option<String>,
    /// Bank identification code (БИК).
    #[serde(default)]
    pub bank_bik: Option<String>,
    /// Settlement account (р/с).
    #[serde(default)]
    pub bank_account: Option<String>,
    /// Correspondent account (к/с).
    #[serde(default)]
    pub correspondent_account: Option<String>,
    /// Contact phone.
    #[serde(default)]
    pub phone: Option<String>,
    /// Contact email.
    #[serde(default)]
    pub email: Option<String>,
    /// Director full name, pre-filled on signature lines.
    #[serde(default)]
    pub signer_director: Option<String>,
    /// Chief accountant full name, pre-filled on signature lines.
    #[serde(default)]
    pub signer_accountant: Option<String>,
}

// =============================================================================
// Line Item (input DTO)
// =============================================================================

/// One line of a document, as supplied by the caller.
///
/// Numeric fields arrive as decimals and are converted to fixed point by
/// the calculator; `vat_amount` and `line_total` are derived when absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    /// Name of the good or service. Required.
    pub name: String,
    /// Optional free-form details.
    #[serde(default)]
    pub description: Option<String>,
    /// Unit of measure (шт, кг, ч). Required.
    pub unit: String,
    /// Quantity, must be strictly positive.
    pub quantity: f64,
    /// Price per unit, VAT-inclusive when a rate is given. Must be >= 0.
    pub unit_price: f64,
    /// VAT rate in percent (20 = 20%). Absent means no VAT on this line.
    #[serde(default)]
    pub vat_rate: Option<f64>,
    /// Explicit VAT amount. When present it is honored verbatim instead
    /// of being extracted from the line total.
    #[serde(default)]
    pub vat_amount: Option<f64>,
    /// Explicit line total. Derived as quantity * unit_price when absent.
    #[serde(default)]
    pub line_total: Option<f64>,
}

// =============================================================================
// Document Payloads
// =============================================================================

/// Input data for an invoice (счёт на оплату).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceData {
    pub seller: PartyInfo,
    pub buyer: PartyInfo,
    pub items: Vec<LineItem>,
    pub invoice_date: NaiveDate,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub notes: Option<String>,
    /// Presentation flag: show the VAT columns and the VAT totals line.
    #[serde(default)]
    pub include_vat: bool,
}

/// Input data for a goods waybill (товарная накладная).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaybillData {
    pub seller: PartyInfo,
    pub buyer: PartyInfo,
    /// Shipper, printed only when it differs from the seller.
    #[serde(default)]
    pub shipper: Option<PartyInfo>,
    /// Consignee, printed only when it differs from the buyer.
    #[serde(default)]
    pub consignee: Option<PartyInfo>,
    pub items: Vec<LineItem>,
    pub waybill_date: NaiveDate,
    #[serde(default)]
    pub contract_number: Option<String>,
    #[serde(default)]
    pub contract_date: Option<NaiveDate>,
    #[serde(default)]
    pub transport_info: Option<String>,
}

/// Input data for a completion act (акт выполненных работ).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionActData {
    pub executor: PartyInfo,
    pub customer: PartyInfo,
    pub items: Vec<LineItem>,
    pub act_date: NaiveDate,
    #[serde(default)]
    pub contract_number: Option<String>,
    #[serde(default)]
    pub contract_date: Option<NaiveDate>,
    #[serde(default)]
    pub period_start: Option<NaiveDate>,
    #[serde(default)]
    pub period_end: Option<NaiveDate>,
}

/// A generation payload, tagged by document type.
///
/// Serialized form carries a `"type"` tag so stored payloads are
/// self-describing:
/// `{"type":"invoice","seller":{...},...}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DocumentPayload {
    Invoice(InvoiceData),
    Waybill(WaybillData),
    CompletionAct(CompletionActData),
}

impl DocumentPayload {
    /// The document type this payload produces.
    pub const fn doc_type(&self) -> DocumentType {
        match self {
            DocumentPayload::Invoice(_) => DocumentType::Invoice,
            DocumentPayload::Waybill(_) => DocumentType::Waybill,
            DocumentPayload::CompletionAct(_) => DocumentType::CompletionAct,
        }
    }

    /// The business date of the document. Number periods derive from this
    /// date, not from the wall clock, so re-generating January paperwork
    /// in February still lands in the January sequence.
    pub const fn document_date(&self) -> NaiveDate {
        match self {
            DocumentPayload::Invoice(d) => d.invoice_date,
            DocumentPayload::Waybill(d) => d.waybill_date,
            DocumentPayload::CompletionAct(d) => d.act_date,
        }
    }

    /// The raw line items of the payload.
    pub fn items(&self) -> &[LineItem] {
        match self {
            DocumentPayload::Invoice(d) => &d.items,
            DocumentPayload::Waybill(d) => &d.items,
            DocumentPayload::CompletionAct(d) => &d.items,
        }
    }
}

// =============================================================================
// Generated Document
// =============================================================================

/// A successfully generated document: the metadata row plus its payload.
///
/// Created only by the generation pipeline; mutated only by a lifecycle
/// status change (status + updated_at) or destroyed by explicit delete,
/// which cascades artifact removal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedDocument {
    pub id: String,
    pub doc_type: DocumentType,
    pub number: String,
    pub status: DocumentStatus,
    pub currency: String,
    pub total_cents: i64,
    pub payload: DocumentPayload,
    pub artifact_key: String,
    pub company_id: String,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl GeneratedDocument {
    /// Returns the document total as a Money type.
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_kopecks(self.total_cents)
    }
}

// =============================================================================
// Generation Result
// =============================================================================

/// What the caller gets back from a successful generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationResult {
    pub document_id: String,
    pub doc_type: DocumentType,
    pub number: String,
    /// Location of the rendered binary inside the artifact store.
    pub artifact_key: String,
    pub total_cents: i64,
    pub currency: String,
}

impl GenerationResult {
    /// Returns the document total as a Money type.
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_kopecks(self.total_cents)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vat_rate_conversions() {
        assert_eq!(VatRate::from_percent(20).bps(), 2000);
        assert_eq!(VatRate::try_from_percent_decimal(10.0), Some(VatRate::from_bps(1000)));
        assert_eq!(VatRate::try_from_percent_decimal(8.25), Some(VatRate::from_bps(825)));
        assert_eq!(VatRate::try_from_percent_decimal(-1.0), None);
        assert_eq!(VatRate::try_from_percent_decimal(101.0), None);
        assert_eq!(VatRate::try_from_percent_decimal(f64::NAN), None);
    }

    #[test]
    fn test_quantity_display_trims_zeros() {
        assert_eq!(Quantity::try_from_decimal(3.0).unwrap().to_string(), "3");
        assert_eq!(Quantity::try_from_decimal(2.5).unwrap().to_string(), "2.5");
        assert_eq!(Quantity::try_from_decimal(0.125).unwrap().to_string(), "0.125");
        assert_eq!(Quantity::from_thousandths(1050).to_string(), "1.05");
    }

    #[test]
    fn test_document_type_strings() {
        assert_eq!(DocumentType::Invoice.as_str(), "invoice");
        assert_eq!(DocumentType::CompletionAct.as_str(), "completion_act");
        assert_eq!(DocumentType::Invoice.number_prefix(), "INV");
        assert_eq!(DocumentType::Waybill.number_prefix(), "WB");
        assert_eq!(DocumentType::CompletionAct.number_prefix(), "ACT");
    }

    #[test]
    fn test_payload_tagged_serde_roundtrip() {
        let payload = DocumentPayload::Invoice(InvoiceData {
            seller: PartyInfo {
                name: "Acme LLC".into(),
                ..PartyInfo::default()
            },
            buyer: PartyInfo {
                name: "Beta Co".into(),
                ..PartyInfo::default()
            },
            items: vec![LineItem {
                name: "Widget".into(),
                description: None,
                unit: "pcs".into(),
                quantity: 3.0,
                unit_price: 100.0,
                vat_rate: None,
                vat_amount: None,
                line_total: None,
            }],
            invoice_date: NaiveDate::from_ymd_opt(2025, 1, 15).unwrap(),
            due_date: None,
            notes: None,
            include_vat: false,
        });

        let json = serde_json::to_string(&payload).unwrap();
        assert!(json.contains("\"type\":\"invoice\""));

        let back: DocumentPayload = serde_json::from_str(&json).unwrap();
        assert_eq!(back, payload);
        assert_eq!(back.doc_type(), DocumentType::Invoice);
        assert_eq!(
            back.document_date(),
            NaiveDate::from_ymd_opt(2025, 1, 15).unwrap()
        );
    }

    #[test]
    fn test_payload_minimal_json_applies_defaults() {
        // Only required fields supplied; options default quietly.
        let json = r#"{
            "type": "completion_act",
            "executor": {"name": "Acme LLC"},
            "customer": {"name": "Beta Co"},
            "items": [{"name": "Consulting", "unit": "h", "quantity": 10, "unit_price": 50}],
            "act_date": "2025-02-28"
        }"#;
        let payload: DocumentPayload = serde_json::from_str(json).unwrap();
        assert_eq!(payload.doc_type(), DocumentType::CompletionAct);
        assert_eq!(payload.items().len(), 1);
    }
}
