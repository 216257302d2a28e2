use rust_decimal::RoundingStrategy;
use rust_decimal_macros::dec;

use super::locale::Locale;
use crate::domain::{Money, Percent};

/// One "million" in everyday Algerian usage is a million centimes, i.e.
/// ten thousand dinars.
pub const MILLION_CENTIMES_DIVISOR: Money = dec!(10000);

/// Two decimals with thousands grouping: `1,428,000.00` / `1 428 000,00`.
pub fn format_amount(value: Money, locale: Locale) -> String {
    let (group, decimal) = match locale {
        Locale::Fr => (' ', ','),
        Locale::En => (',', '.'),
    };

    let rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let digits = format!("{:.2}", rounded.abs());
    let (int_part, frac_part) = digits.split_once('.').unwrap_or((digits.as_str(), "00"));

    let mut out = String::with_capacity(digits.len() + int_part.len() / 3 + 1);
    if rounded < Money::ZERO {
        out.push('-');
    }
    for (idx, ch) in int_part.chars().enumerate() {
        if idx > 0 && (int_part.len() - idx) % 3 == 0 {
            out.push(group);
        }
        out.push(ch);
    }
    out.push(decimal);
    out.push_str(frac_part);
    out
}

pub fn format_dzd(value: Money, locale: Locale) -> String {
    format!("{} DZD", format_amount(value, locale))
}

pub fn format_eur(value: Money, locale: Locale) -> String {
    match locale {
        Locale::Fr => format!("{} €", format_amount(value, locale)),
        Locale::En => format!("€{}", format_amount(value, locale)),
    }
}

pub fn format_percent(value: Percent) -> String {
    format!("{}%", value.normalize())
}

/// DZD amount expressed in millions of centimes, e.g. `142,80 millions`.
pub fn format_millions(value: Money, locale: Locale) -> String {
    let millions = format_amount(value / MILLION_CENTIMES_DIVISOR, locale);
    match locale {
        Locale::Fr => format!("{millions} millions"),
        Locale::En => format!("{millions} million centimes"),
    }
}
