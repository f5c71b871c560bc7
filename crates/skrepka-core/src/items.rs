//! # Line Item Calculator
//!
//! Validates raw line items and computes every derived figure on a
//! document: line totals, extracted VAT, and the aggregate totals block.
//!
//! ## Rules
//! - `name` and `unit` are required, quantity must be positive, unit price
//!   non-negative, and the item list non-empty. Violations carry the item
//!   index.
//! - `line_total = quantity * unit_price` when not supplied by the caller.
//! - Prices are VAT-inclusive: when `vat_rate` is set and `vat_amount` is
//!   absent, `vat_amount = line_total * rate / (100% + rate)`.
//! - An explicit `vat_amount` is honored verbatim, but only next to its
//!   `vat_rate`; a VAT amount with no rate is rejected as inconsistent.
//! - All derivation happens in integer fixed point, rounded half-up at the
//!   line level. The aggregate totals feed the artifact, the metadata row
//!   and the amount-in-words text, and the three must agree exactly.

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::{LineItem, Quantity, VatRate};
use crate::{MAX_DOCUMENT_ITEMS, MAX_ITEM_NAME_LEN, MAX_UNIT_LEN};

// =============================================================================
// Calculated Output
// =============================================================================

/// One line item after validation, with all money in fixed point.
#[derive(Debug, Clone, PartialEq)]
pub struct CalculatedItem {
    pub name: String,
    pub description: Option<String>,
    pub unit: String,
    pub quantity: Quantity,
    pub unit_price: Money,
    pub vat_rate: Option<VatRate>,
    /// Present exactly when `vat_rate` is present.
    pub vat_amount: Option<Money>,
    pub line_total: Money,
}

/// Aggregate figures over all lines of a document.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DocumentTotals {
    /// Grand total, `Σ line_total`. This is the document's total_amount.
    pub total: Money,
    /// `Σ vat_amount` over lines that carry VAT.
    pub total_vat: Money,
    /// `total - total_vat` when any line carries VAT, else `total`.
    pub subtotal: Money,
}

/// The calculator's result: validated lines plus their totals.
#[derive(Debug, Clone, PartialEq)]
pub struct CalculatedLines {
    pub items: Vec<CalculatedItem>,
    pub totals: DocumentTotals,
}

impl CalculatedLines {
    /// True when at least one line carries a VAT rate.
    pub fn has_vat(&self) -> bool {
        self.items.iter().any(|i| i.vat_rate.is_some())
    }
}

// =============================================================================
// Calculation
// =============================================================================

/// Validates and totals a document's line items.
///
/// ## Example
/// ```rust
/// use skrepka_core::items::calculate_items;
/// use skrepka_core::types::LineItem;
///
/// let lines = calculate_items(&[LineItem {
///     name: "Widget".into(),
///     description: None,
///     unit: "pcs".into(),
///     quantity: 3.0,
///     unit_price: 100.0,
///     vat_rate: None,
///     vat_amount: None,
///     line_total: None,
/// }])
/// .unwrap();
///
/// assert_eq!(lines.totals.total.kopecks(), 30000); // 300.00
/// ```
pub fn calculate_items(items: &[LineItem]) -> Result<CalculatedLines, ValidationError> {
    if items.is_empty() {
        return Err(ValidationError::EmptyItems);
    }
    if items.len() > MAX_DOCUMENT_ITEMS {
        return Err(ValidationError::TooManyItems {
            max: MAX_DOCUMENT_ITEMS,
        });
    }

    let mut calculated = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        calculated.push(calculate_item(index, item)?);
    }

    let total: Money = calculated.iter().map(|i| i.line_total).sum();
    let total_vat: Money = calculated.iter().filter_map(|i| i.vat_amount).sum();
    let has_vat = calculated.iter().any(|i| i.vat_rate.is_some());
    let subtotal = if has_vat { total - total_vat } else { total };

    Ok(CalculatedLines {
        items: calculated,
        totals: DocumentTotals {
            total,
            total_vat,
            subtotal,
        },
    })
}

fn calculate_item(index: usize, item: &LineItem) -> Result<CalculatedItem, ValidationError> {
    let name = item.name.trim();
    if name.is_empty() {
        return Err(ValidationError::ItemFieldRequired {
            index,
            field: "name",
        });
    }
    if name.chars().count() > MAX_ITEM_NAME_LEN {
        return Err(ValidationError::ItemFieldTooLong {
            index,
            field: "name",
            max: MAX_ITEM_NAME_LEN,
        });
    }

    let unit = item.unit.trim();
    if unit.is_empty() {
        return Err(ValidationError::ItemFieldRequired {
            index,
            field: "unit",
        });
    }
    if unit.chars().count() > MAX_UNIT_LEN {
        return Err(ValidationError::ItemFieldTooLong {
            index,
            field: "unit",
            max: MAX_UNIT_LEN,
        });
    }

    let quantity = Quantity::try_from_decimal(item.quantity).ok_or(
        ValidationError::MalformedAmount {
            index,
            field: "quantity",
        },
    )?;
    if !quantity.is_positive() {
        return Err(ValidationError::NonPositiveQuantity { index });
    }

    let unit_price = Money::try_from_decimal(item.unit_price).ok_or(
        ValidationError::MalformedAmount {
            index,
            field: "unit_price",
        },
    )?;
    if unit_price.is_negative() {
        return Err(ValidationError::NegativePrice { index });
    }

    let line_total = match item.line_total {
        Some(value) => {
            let total =
                Money::try_from_decimal(value).ok_or(ValidationError::MalformedAmount {
                    index,
                    field: "line_total",
                })?;
            if total.is_negative() {
                return Err(ValidationError::MalformedAmount {
                    index,
                    field: "line_total",
                });
            }
            total
        }
        None => unit_price.times(quantity),
    };

    let vat_rate = match item.vat_rate {
        Some(pct) => Some(VatRate::try_from_percent_decimal(pct).ok_or(
            ValidationError::MalformedAmount {
                index,
                field: "vat_rate",
            },
        )?),
        None => None,
    };

    let vat_amount = match (vat_rate, item.vat_amount) {
        // Explicit amount riding with its rate: honored verbatim.
        (Some(_), Some(value)) => {
            let amount =
                Money::try_from_decimal(value).ok_or(ValidationError::MalformedAmount {
                    index,
                    field: "vat_amount",
                })?;
            if amount.is_negative() {
                return Err(ValidationError::MalformedAmount {
                    index,
                    field: "vat_amount",
                });
            }
            Some(amount)
        }
        // Rate only: extract from the VAT-inclusive line total.
        (Some(rate), None) => Some(line_total.extract_vat(rate)),
        // Amount without a rate is inconsistent input.
        (None, Some(_)) => {
            return Err(ValidationError::ItemFieldRequired {
                index,
                field: "vat_rate",
            })
        }
        (None, None) => None,
    };

    Ok(CalculatedItem {
        name: name.to_string(),
        description: item.description.clone(),
        unit: unit.to_string(),
        quantity,
        unit_price,
        vat_rate,
        vat_amount,
        line_total,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn item(name: &str, unit: &str, quantity: f64, unit_price: f64) -> LineItem {
        LineItem {
            name: name.to_string(),
            description: None,
            unit: unit.to_string(),
            quantity,
            unit_price,
            vat_rate: None,
            vat_amount: None,
            line_total: None,
        }
    }

    #[test]
    fn test_basic_totaling() {
        let lines = calculate_items(&[item("Widget", "pcs", 3.0, 100.0)]).unwrap();
        assert_eq!(lines.items[0].line_total.kopecks(), 30000);
        assert_eq!(lines.totals.total.kopecks(), 30000);
        assert_eq!(lines.totals.total_vat.kopecks(), 0);
        assert_eq!(lines.totals.subtotal.kopecks(), 30000);
        assert!(!lines.has_vat());
    }

    #[test]
    fn test_sum_of_line_totals_equals_total() {
        let mut inputs = vec![
            item("A", "pcs", 1.0, 19.99),
            item("B", "kg", 2.5, 7.37),
            item("C", "h", 0.25, 120.0),
        ];
        inputs[1].vat_rate = Some(10.0);
        inputs[2].vat_rate = Some(20.0);

        let lines = calculate_items(&inputs).unwrap();
        let sum: Money = lines.items.iter().map(|i| i.line_total).sum();
        assert_eq!(sum, lines.totals.total);
        assert_eq!(
            lines.totals.subtotal + lines.totals.total_vat,
            lines.totals.total
        );
    }

    #[test]
    fn test_vat_extraction_from_inclusive_price() {
        // 120.00 incl. 20% VAT: vat = 120 * 20 / 120 = 20.00
        let mut input = item("Service", "pcs", 1.0, 120.0);
        input.vat_rate = Some(20.0);

        let lines = calculate_items(&[input]).unwrap();
        assert_eq!(lines.items[0].vat_amount.unwrap().kopecks(), 2000);
        assert_eq!(lines.totals.total.kopecks(), 12000);
        assert_eq!(lines.totals.total_vat.kopecks(), 2000);
        assert_eq!(lines.totals.subtotal.kopecks(), 10000);
        assert!(lines.has_vat());
    }

    #[test]
    fn test_explicit_vat_amount_honored() {
        let mut input = item("Service", "pcs", 1.0, 120.0);
        input.vat_rate = Some(20.0);
        input.vat_amount = Some(19.99);

        let lines = calculate_items(&[input]).unwrap();
        assert_eq!(lines.items[0].vat_amount.unwrap().kopecks(), 1999);
    }

    #[test]
    fn test_explicit_line_total_honored() {
        let mut input = item("Bundle", "pcs", 3.0, 100.0);
        input.line_total = Some(250.0); // contractual price, not 300.00

        let lines = calculate_items(&[input]).unwrap();
        assert_eq!(lines.items[0].line_total.kopecks(), 25000);
        assert_eq!(lines.totals.total.kopecks(), 25000);
    }

    #[test]
    fn test_fractional_quantity_rounds_at_line_level() {
        // 2.5 * 9.99 = 24.975 -> 24.98
        let lines = calculate_items(&[item("Cable", "m", 2.5, 9.99)]).unwrap();
        assert_eq!(lines.items[0].line_total.kopecks(), 2498);
    }

    #[test]
    fn test_zero_vat_rate_extracts_zero() {
        let mut input = item("Exempt", "pcs", 1.0, 50.0);
        input.vat_rate = Some(0.0);

        let lines = calculate_items(&[input]).unwrap();
        assert_eq!(lines.items[0].vat_amount, Some(Money::zero()));
        assert_eq!(lines.totals.subtotal, lines.totals.total);
    }

    #[test]
    fn test_empty_list_rejected() {
        assert!(matches!(
            calculate_items(&[]),
            Err(ValidationError::EmptyItems)
        ));
    }

    #[test]
    fn test_oversized_list_rejected() {
        let items = vec![item("X", "pcs", 1.0, 1.0); MAX_DOCUMENT_ITEMS + 1];
        assert!(matches!(
            calculate_items(&items),
            Err(ValidationError::TooManyItems { .. })
        ));
    }

    #[test]
    fn test_blank_name_and_unit_rejected() {
        let err = calculate_items(&[item("   ", "pcs", 1.0, 1.0)]).unwrap_err();
        assert!(matches!(
            err,
            ValidationError::ItemFieldRequired { index: 0, field: "name" }
        ));

        let err = calculate_items(&[item("Widget", "", 1.0, 1.0)]).unwrap_err();
        assert!(matches!(
            err,
            ValidationError::ItemFieldRequired { index: 0, field: "unit" }
        ));
    }

    #[test]
    fn test_bad_numbers_rejected() {
        let err = calculate_items(&[item("W", "pcs", 0.0, 1.0)]).unwrap_err();
        assert!(matches!(err, ValidationError::NonPositiveQuantity { index: 0 }));

        let err = calculate_items(&[item("W", "pcs", -2.0, 1.0)]).unwrap_err();
        assert!(matches!(err, ValidationError::NonPositiveQuantity { index: 0 }));

        let err = calculate_items(&[item("W", "pcs", 1.0, -0.01)]).unwrap_err();
        assert!(matches!(err, ValidationError::NegativePrice { index: 0 }));

        let err = calculate_items(&[item("W", "pcs", f64::NAN, 1.0)]).unwrap_err();
        assert!(matches!(
            err,
            ValidationError::MalformedAmount { index: 0, field: "quantity" }
        ));
    }

    #[test]
    fn test_error_carries_failing_index() {
        let inputs = vec![
            item("Good", "pcs", 1.0, 1.0),
            item("Bad", "pcs", -1.0, 1.0),
        ];
        let err = calculate_items(&inputs).unwrap_err();
        assert!(matches!(err, ValidationError::NonPositiveQuantity { index: 1 }));
    }

    #[test]
    fn test_vat_amount_without_rate_rejected() {
        let mut input = item("W", "pcs", 1.0, 100.0);
        input.vat_amount = Some(5.0);

        let err = calculate_items(&[input]).unwrap_err();
        assert!(matches!(
            err,
            ValidationError::ItemFieldRequired { index: 0, field: "vat_rate" }
        ));
    }
}
