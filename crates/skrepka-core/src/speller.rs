//! # Amount Speller
//!
//! Spells a monetary total in words, as required on the face of Russian
//! financial documents ("Триста рублей 00 копеек").
//!
//! ## Rules (Russian)
//! The integer major part is decomposed into thousands groups; each group
//! is spelled with units/teens/tens/hundreds tables, followed by the scale
//! word (тысяча, миллион, ...) agreed with that group. Noun agreement
//! follows the trailing digits:
//!
//! - last two digits 11-14: plural-genitive, always (одиннадцать рублей)
//! - last digit 1: singular (двадцать один рубль)
//! - last digit 2-4: special plural (два рубля)
//! - everything else: plural-genitive (пять рублей)
//!
//! Тысяча is feminine, so its group spells одна/две instead of один/два.
//! The minor part is always two digits with the fixed noun копеек. A zero
//! major part spells ноль plus the plural-genitive noun.
//!
//! Spellers hang off a strategy trait keyed by currency code, so another
//! locale is one more impl and a registry line, not a caller change.

use crate::money::Money;

// =============================================================================
// Strategy Trait
// =============================================================================

/// Converts a non-negative amount into its legal written-out form.
pub trait AmountSpeller: Send + Sync {
    /// ISO currency code this speller serves.
    fn currency(&self) -> &'static str;

    /// Spells the amount, first letter capitalized.
    fn spell(&self, amount: Money) -> String;
}

/// Looks up the speller for a currency code.
///
/// ## Example
/// ```rust
/// use skrepka_core::money::Money;
/// use skrepka_core::speller::speller_for_currency;
///
/// let speller = speller_for_currency("RUB").unwrap();
/// assert_eq!(
///     speller.spell(Money::from_kopecks(30000)),
///     "Триста рублей 00 копеек"
/// );
/// assert!(speller_for_currency("???").is_none());
/// ```
pub fn speller_for_currency(code: &str) -> Option<&'static dyn AmountSpeller> {
    match code {
        "RUB" => Some(&RussianRubleSpeller),
        _ => None,
    }
}

// =============================================================================
// Russian Word Tables
// =============================================================================

const UNITS_MASCULINE: [&str; 10] = [
    "", "один", "два", "три", "четыре", "пять", "шесть", "семь", "восемь", "девять",
];

const UNITS_FEMININE: [&str; 10] = [
    "", "одна", "две", "три", "четыре", "пять", "шесть", "семь", "восемь", "девять",
];

const TEENS: [&str; 10] = [
    "десять",
    "одиннадцать",
    "двенадцать",
    "тринадцать",
    "четырнадцать",
    "пятнадцать",
    "шестнадцать",
    "семнадцать",
    "восемнадцать",
    "девятнадцать",
];

const TENS: [&str; 10] = [
    "",
    "",
    "двадцать",
    "тридцать",
    "сорок",
    "пятьдесят",
    "шестьдесят",
    "семьдесят",
    "восемьдесят",
    "девяносто",
];

const HUNDREDS: [&str; 10] = [
    "",
    "сто",
    "двести",
    "триста",
    "четыреста",
    "пятьсот",
    "шестьсот",
    "семьсот",
    "восемьсот",
    "девятьсот",
];

const ZERO: &str = "ноль";

/// A named thousands scale with its three agreement forms.
struct Scale {
    one: &'static str,
    few: &'static str,
    many: &'static str,
    feminine: bool,
}

impl Scale {
    fn form(&self, group: u64) -> &'static str {
        match plural_category(group) {
            Plural::One => self.one,
            Plural::Few => self.few,
            Plural::Many => self.many,
        }
    }
}

/// Scales above the base group, lowest first. Covers the full i64 kopeck
/// range (the quadrillions entry exists so oversized inputs spell instead
/// of panicking).
const SCALES: [Scale; 5] = [
    Scale { one: "тысяча", few: "тысячи", many: "тысяч", feminine: true },
    Scale { one: "миллион", few: "миллиона", many: "миллионов", feminine: false },
    Scale { one: "миллиард", few: "миллиарда", many: "миллиардов", feminine: false },
    Scale { one: "триллион", few: "триллиона", many: "триллионов", feminine: false },
    Scale { one: "квадриллион", few: "квадриллиона", many: "квадриллионов", feminine: false },
];

// =============================================================================
// Agreement
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Plural {
    /// last digit 1, except 11-14
    One,
    /// last digit 2-4, except 12-14
    Few,
    /// everything else, including all of 11-14
    Many,
}

fn plural_category(n: u64) -> Plural {
    let last_two = n % 100;
    if (11..=14).contains(&last_two) {
        return Plural::Many;
    }
    match n % 10 {
        1 => Plural::One,
        2..=4 => Plural::Few,
        _ => Plural::Many,
    }
}

/// Spells one 1..=999 group into `words`.
fn push_group(words: &mut Vec<&'static str>, group: u16, feminine: bool) {
    let units = if feminine { UNITS_FEMININE } else { UNITS_MASCULINE };

    let hundreds = (group / 100) as usize;
    if hundreds > 0 {
        words.push(HUNDREDS[hundreds]);
    }

    let rest = group % 100;
    if (10..=19).contains(&rest) {
        words.push(TEENS[(rest - 10) as usize]);
    } else {
        let tens = (rest / 10) as usize;
        if tens > 0 {
            words.push(TENS[tens]);
        }
        let unit = (rest % 10) as usize;
        if unit > 0 {
            words.push(units[unit]);
        }
    }
}

/// Spells a whole number, base group gender given by `feminine_base`.
fn push_number(words: &mut Vec<&'static str>, mut n: u64, feminine_base: bool) {
    if n == 0 {
        words.push(ZERO);
        return;
    }

    let mut groups: Vec<u64> = Vec::new();
    while n > 0 {
        groups.push(n % 1000);
        n /= 1000;
    }

    for idx in (0..groups.len()).rev() {
        let group = groups[idx];
        if group == 0 {
            continue;
        }
        let feminine = if idx == 0 {
            feminine_base
        } else {
            SCALES[idx - 1].feminine
        };
        push_group(words, group as u16, feminine);
        if idx > 0 {
            words.push(SCALES[idx - 1].form(group));
        }
    }
}

fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

// =============================================================================
// Russian Ruble Speller
// =============================================================================

/// Spells RUB amounts: "<рубли словами> рубль/рубля/рублей NN копеек".
pub struct RussianRubleSpeller;

const RUBLE_FORMS: (&str, &str, &str) = ("рубль", "рубля", "рублей");
const KOPECK_NOUN: &str = "копеек";

impl AmountSpeller for RussianRubleSpeller {
    fn currency(&self) -> &'static str {
        "RUB"
    }

    fn spell(&self, amount: Money) -> String {
        let kopecks = amount.kopecks().unsigned_abs();
        let major = kopecks / 100;
        let minor = kopecks % 100;

        let mut words: Vec<&'static str> = Vec::new();
        push_number(&mut words, major, false);
        words.push(match plural_category(major) {
            Plural::One => RUBLE_FORMS.0,
            Plural::Few => RUBLE_FORMS.1,
            Plural::Many => RUBLE_FORMS.2,
        });

        let spelled = format!("{} {:02} {}", words.join(" "), minor, KOPECK_NOUN);
        capitalize_first(&spelled)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
