//! # Document Numbering
//!
//! The pure half of number allocation: period derivation and number
//! formatting. The sequence value itself comes from the database counter
//! (one atomic row per (type, company, period) partition); this module
//! turns that sequence into the printable business number.
//!
//! Format: `{prefix}-{period}-{seq:04}`, e.g. `INV-202501-0001`.

use chrono::{Datelike, NaiveDate};
use std::fmt;

use crate::types::DocumentType;

// =============================================================================
// Period
// =============================================================================

/// A numbering period: the calendar month of the document's business date.
///
/// Both the number label and the counter partition use the same period, so
/// what a number claims about its sequence scope is actually true.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Period {
    year: i32,
    month: u32,
}

impl Period {
    /// Derives the period from a document's business date.
    pub fn from_date(date: NaiveDate) -> Self {
        Period {
            year: date.year(),
            month: date.month(),
        }
    }
}

/// Renders as `YYYYMM` (`202501`).
impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}{:02}", self.year, self.month)
    }
}

// =============================================================================
// Number Formatting
// =============================================================================

/// Formats a document number from its parts.
///
/// Sequences are zero-padded to four digits and keep growing past 9999
/// without truncation.
///
/// ## Example
/// ```rust
/// use chrono::NaiveDate;
/// use skrepka_core::number::{format_number, Period};
/// use skrepka_core::types::DocumentType;
///
/// let period = Period::from_date(NaiveDate::from_ymd_opt(2025, 1, 15).unwrap());
/// assert_eq!(
///     format_number(DocumentType::Invoice, period, 1),
///     "INV-202501-0001"
/// );
/// ```
pub fn format_number(doc_type: DocumentType, period: Period, seq: i64) -> String {
    format!("{}-{}-{:04}", doc_type.number_prefix(), period, seq)
}

/// Makes a document number safe for use inside artifact keys and download
/// filenames: keeps `[A-Za-z0-9._-]`, maps everything else to `-`.
///
/// Generated numbers are already safe; this guards keys built from numbers
/// that passed through external systems.
pub fn sanitize_for_key(number: &str) -> String {
    number
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '-'
            }
        })
        .collect()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_period_from_date() {
        assert_eq!(Period::from_date(date(2025, 1, 15)).to_string(), "202501");
        assert_eq!(Period::from_date(date(2025, 12, 31)).to_string(), "202512");
    }

    #[test]
    fn test_format_number_per_type() {
        let period = Period::from_date(date(2025, 1, 15));
        assert_eq!(
            format_number(DocumentType::Invoice, period, 1),
            "INV-202501-0001"
        );
        assert_eq!(
            format_number(DocumentType::Waybill, period, 42),
            "WB-202501-0042"
        );
        assert_eq!(
            format_number(DocumentType::CompletionAct, period, 999),
            "ACT-202501-0999"
        );
    }

    #[test]
    fn test_sequence_grows_past_padding() {
        let period = Period::from_date(date(2025, 3, 1));
        assert_eq!(
            format_number(DocumentType::Invoice, period, 12345),
            "INV-202503-12345"
        );
    }

    #[test]
    fn test_sanitize_for_key() {
        assert_eq!(sanitize_for_key("INV-202501-0001"), "INV-202501-0001");
        assert_eq!(sanitize_for_key("INV 2025/01"), "INV-2025-01");
        assert_eq!(sanitize_for_key("a\\b:c*d"), "a-b-c-d");
    }
}
