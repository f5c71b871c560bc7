//! Russian display formatting for rendered documents.
//!
//! Everything here is about how values look on paper: dates spelled with
//! genitive month names, money with space-grouped thousands and a comma
//! decimal mark. Parsing never happens in this module.

use chrono::{Datelike, NaiveDate};

use crate::money::Money;
use crate::types::{Quantity, VatRate};

/// Month names in the genitive case, as dates are written in documents.
const MONTHS_GENITIVE: [&str; 12] = [
    "января",
    "февраля",
    "марта",
    "апреля",
    "мая",
    "июня",
    "июля",
    "августа",
    "сентября",
    "октября",
    "ноября",
    "декабря",
];

/// Formats a date the way Russian documents carry it: `15 января 2025 г.`
pub(crate) fn format_date_ru(date: NaiveDate) -> String {
    let month = MONTHS_GENITIVE[date.month0() as usize];
    format!("{} {} {} г.", date.day(), month, date.year())
}

/// Formats money as `1 234,56`: space thousands separator, comma decimals,
/// always two minor digits.
pub(crate) fn format_money(amount: Money) -> String {
    let sign = if amount.is_negative() { "-" } else { "" };
    let kopecks = amount.kopecks().unsigned_abs();
    format!(
        "{}{},{:02}",
        sign,
        group_thousands(kopecks / 100),
        kopecks % 100
    )
}

/// Formats a quantity with up to three decimals, trailing zeros trimmed,
/// comma decimal mark (`3`, `2,5`, `1,05`).
pub(crate) fn format_quantity(quantity: Quantity) -> String {
    quantity.to_string().replace('.', ",")
}

/// Formats a VAT rate as a bare percentage (`20`, `10`, fractional rates
/// keep their decimals: `8,25`).
pub(crate) fn format_vat_rate(rate: VatRate) -> String {
    let whole = rate.bps() / 100;
    let frac = rate.bps() % 100;
    if frac == 0 {
        format!("{}", whole)
    } else {
        let s = format!("{:02}", frac);
        format!("{},{}", whole, s.trim_end_matches('0'))
    }
}

fn group_thousands(mut value: u64) -> String {
    let mut groups: Vec<String> = Vec::new();
    loop {
        let group = value % 1000;
        value /= 1000;
        if value == 0 {
            groups.push(group.to_string());
            break;
        }
        groups.push(format!("{:03}", group));
    }
    groups.reverse();
    groups.join(" ")
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_uses_genitive_month() {
        let date = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();
        assert_eq!(format_date_ru(date), "15 января 2025 г.");

        let date = NaiveDate::from_ymd_opt(2024, 12, 1).unwrap();
        assert_eq!(format_date_ru(date), "1 декабря 2024 г.");
    }

    #[test]
    fn test_money_grouping_and_comma() {
        assert_eq!(format_money(Money::from_kopecks(123_456)), "1 234,56");
        assert_eq!(format_money(Money::from_kopecks(30_000)), "300,00");
        assert_eq!(format_money(Money::from_kopecks(5)), "0,05");
        assert_eq!(format_money(Money::from_kopecks(0)), "0,00");
        assert_eq!(
            format_money(Money::from_kopecks(1_234_567_890)),
            "12 345 678,90"
        );
        assert_eq!(format_money(Money::from_kopecks(-123_456)), "-1 234,56");
    }

    #[test]
    fn test_quantity_comma_decimal() {
        assert_eq!(format_quantity(Quantity::from_thousandths(3000)), "3");
        assert_eq!(format_quantity(Quantity::from_thousandths(2500)), "2,5");
        assert_eq!(format_quantity(Quantity::from_thousandths(1050)), "1,05");
    }

    #[test]
    fn test_vat_rate_display() {
        assert_eq!(format_vat_rate(VatRate::from_percent(20)), "20");
        assert_eq!(format_vat_rate(VatRate::from_percent(10)), "10");
        assert_eq!(format_vat_rate(VatRate::from_bps(825)), "8,25");
        assert_eq!(format_vat_rate(VatRate::from_bps(1050)), "10,5");
        assert_eq!(format_vat_rate(VatRate::from_bps(0)), "0");
    }
}
