//! # Payload Validation
//!
//! Structural checks on an incoming generation payload: the parties a
//! document type requires must be present with usable names. Runs before
//! item calculation, so callers get party errors first and no state is
//! touched on failure.
//!
//! Line item validation lives in [`crate::items`] next to the arithmetic
//! it guards.

use crate::error::ValidationError;
use crate::types::{DocumentPayload, PartyInfo};
use crate::MAX_PARTY_NAME_LEN;

/// Validates the parties of a payload.
///
/// Field names in errors use dotted paths ("seller.name") so API callers
/// can map them back to their request body.
///
/// ## Example
/// ```rust
/// use skrepka_core::types::{DocumentPayload, InvoiceData, LineItem, PartyInfo};
/// use skrepka_core::validation::validate_payload;
///
/// let payload = DocumentPayload::Invoice(InvoiceData {
///     seller: PartyInfo { name: "ООО Ромашка".into(), ..Default::default() },
///     buyer: PartyInfo { name: "".into(), ..Default::default() },
///     items: vec![],
///     invoice_date: chrono::NaiveDate::from_ymd_opt(2025, 1, 15).unwrap(),
///     due_date: None,
///     notes: None,
///     include_vat: false,
/// });
/// let err = validate_payload(&payload).unwrap_err();
/// assert_eq!(err.to_string(), "buyer.name is required");
/// ```
pub fn validate_payload(payload: &DocumentPayload) -> Result<(), ValidationError> {
    match payload {
        DocumentPayload::Invoice(data) => {
            validate_party("seller", &data.seller)?;
            validate_party("buyer", &data.buyer)?;
        }
        DocumentPayload::Waybill(data) => {
            validate_party("seller", &data.seller)?;
            validate_party("buyer", &data.buyer)?;
            if let Some(shipper) = &data.shipper {
                validate_party("shipper", shipper)?;
            }
            if let Some(consignee) = &data.consignee {
                validate_party("consignee", consignee)?;
            }
        }
        DocumentPayload::CompletionAct(data) => {
            validate_party("executor", &data.executor)?;
            validate_party("customer", &data.customer)?;
        }
    }
    Ok(())
}

/// Validates a single party block under the given field prefix.
pub fn validate_party(prefix: &str, party: &PartyInfo) -> Result<(), ValidationError> {
    let name = party.name.trim();
    if name.is_empty() {
        return Err(ValidationError::Required {
            field: format!("{prefix}.name"),
        });
    }
    if name.chars().count() > MAX_PARTY_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: format!("{prefix}.name"),
            max: MAX_PARTY_NAME_LEN,
        });
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CompletionActData, InvoiceData, WaybillData};
    use chrono::NaiveDate;

    fn party(name: &str) -> PartyInfo {
        PartyInfo {
            name: name.to_string(),
            ..Default::default()
        }
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 15).unwrap()
    }

    fn invoice(seller: PartyInfo, buyer: PartyInfo) -> DocumentPayload {
        DocumentPayload::Invoice(InvoiceData {
            seller,
            buyer,
            items: vec![],
            invoice_date: date(),
            due_date: None,
            notes: None,
            include_vat: false,
        })
    }

    #[test]
    fn test_valid_invoice_parties_pass() {
        let payload = invoice(party("ООО Ромашка"), party("ИП Петров"));
        assert!(validate_payload(&payload).is_ok());
    }

    #[test]
    fn test_blank_party_name_is_rejected() {
        let payload = invoice(party("ООО Ромашка"), party("   "));
        let err = validate_payload(&payload).unwrap_err();
        assert_eq!(err.to_string(), "buyer.name is required");
    }

    #[test]
    fn test_overlong_party_name_is_rejected() {
        let payload = invoice(party(&"x".repeat(MAX_PARTY_NAME_LEN + 1)), party("ИП Петров"));
        let err = validate_payload(&payload).unwrap_err();
        assert!(matches!(err, ValidationError::TooLong { max, .. } if max == MAX_PARTY_NAME_LEN));
    }

    #[test]
    fn test_length_limit_counts_characters_not_bytes() {
        // Cyrillic is two bytes per character in UTF-8
        let name = "я".repeat(MAX_PARTY_NAME_LEN);
        let payload = invoice(party(&name), party("ИП Петров"));
        assert!(validate_payload(&payload).is_ok());
    }

    #[test]
    fn test_waybill_optional_parties_validated_when_present() {
        let payload = DocumentPayload::Waybill(WaybillData {
            seller: party("ООО Ромашка"),
            buyer: party("ИП Петров"),
            shipper: Some(party("")),
            consignee: None,
            items: vec![],
            waybill_date: date(),
            contract_number: None,
            contract_date: None,
            transport_info: None,
        });
        let err = validate_payload(&payload).unwrap_err();
        assert_eq!(err.to_string(), "shipper.name is required");
    }

    #[test]
    fn test_waybill_missing_optional_parties_pass() {
        let payload = DocumentPayload::Waybill(WaybillData {
            seller: party("ООО Ромашка"),
            buyer: party("ИП Петров"),
            shipper: None,
            consignee: None,
            items: vec![],
            waybill_date: date(),
            contract_number: None,
            contract_date: None,
            transport_info: None,
        });
        assert!(validate_payload(&payload).is_ok());
    }

    #[test]
    fn test_act_party_prefixes() {
        let payload = DocumentPayload::CompletionAct(CompletionActData {
            executor: party(""),
            customer: party("ИП Петров"),
            items: vec![],
            act_date: date(),
            contract_number: None,
            contract_date: None,
            period_start: None,
            period_end: None,
        });
        let err = validate_payload(&payload).unwrap_err();
        assert_eq!(err.to_string(), "executor.name is required");
    }
}
