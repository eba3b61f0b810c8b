//! Display formatting for money and rates.

use tiao_config::NumberLocale;

/// Whole-unit money value with thousands grouping.
///
/// The value is floored; non-finite input renders as `0`.
#[must_use]
pub fn money(value: f64, locale: NumberLocale) -> String {
    if !value.is_finite() {
        return "0".to_string();
    }
    let floored = value.floor();
    let digits = format!("{:.0}", floored.abs());
    let grouped = group_digits(&digits, locale.group_separator());
    if floored < 0.0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}

/// Money value prefixed with the currency sign (`$1,000`).
#[must_use]
pub fn currency(value: f64, locale: NumberLocale) -> String {
    format!("${}", money(value, locale))
}

/// Fixed-point rendering with `decimals` digits; non-finite input renders as zero.
#[must_use]
pub fn fixed(value: f64, decimals: usize) -> String {
    let value = if value.is_finite() { value } else { 0.0 };
    format!("{value:.decimals$}")
}

fn group_digits(digits: &str, separator: char) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (len - index) % 3 == 0 {
            out.push(separator);
        }
        out.push(digit);
    }
    out
}
