//! Locale-free number formatting for result labels.

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;

const PERCENT_DECIMALS: u32 = 2;
const INFINITY_LABEL: &str = "∞";

/// Format `value` with thousands separators and exactly `decimals` places.
///
/// Rounds half to even. A value that rounds to zero is printed unsigned,
/// NaN prints as zero and infinities print as `∞`. Magnitudes beyond the
/// decimal range are formatted from the float itself.
pub fn format_grouped(value: f64, decimals: u32) -> String {
    if value.is_infinite() {
        return signed(value < 0.0, INFINITY_LABEL.to_string());
    }
    let prec = decimals as usize;
    let value = if value.is_nan() { 0.0 } else { value };

    match Decimal::from_f64(value) {
        Some(decimal) => {
            let rounded = decimal.round_dp(decimals);
            let negative = rounded.is_sign_negative() && !rounded.is_zero();
            signed(negative, group_digits(&format!("{:.prec$}", rounded.abs())))
        }
        None => signed(value < 0.0, group_digits(&format!("{:.prec$}", value.abs()))),
    }
}

/// Currency amount such as `$17,342.22` or `-$1,200`.
pub fn format_currency(value: f64, symbol: &str, decimals: u32) -> String {
    let grouped = format_grouped(value, decimals);
    match grouped.strip_prefix('-') {
        Some(digits) => format!("-{}{}", symbol, digits),
        None => format!("{}{}", symbol, grouped),
    }
}

/// Fraction as a percentage with at most two decimals and no trailing zeros,
/// e.g. `0.3873` as `38.73%`.
pub fn format_percent(fraction: f64) -> String {
    if fraction.is_nan() {
        return "0%".to_string();
    }
    if fraction.is_infinite() {
        return format!("{}%", signed(fraction < 0.0, INFINITY_LABEL.to_string()));
    }

    let percent = Decimal::from_f64(fraction)
        .and_then(|decimal| decimal.checked_mul(Decimal::ONE_HUNDRED))
        .map(|percent| percent.round_dp(PERCENT_DECIMALS).normalize());
    match percent {
        Some(percent) if percent.is_zero() => "0%".to_string(),
        Some(percent) => format!("{}%", percent),
        // Floats this large carry no fractional digits.
        None => format!("{}%", fraction * 100.0),
    }
}

fn signed(negative: bool, digits: String) -> String {
    if negative {
        format!("-{}", digits)
    } else {
        digits
    }
}

fn group_digits(formatted: &str) -> String {
    let (integer_part, decimal_part) = match formatted.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (formatted, None),
    };

    let grouped: String = integer_part
        .chars()
        .rev()
        .enumerate()
        .flat_map(|(i, c)| {
            if i > 0 && i % 3 == 0 {
                vec![',', c]
            } else {
                vec![c]
            }
        })
        .collect::<Vec<char>>()
        .into_iter()
        .rev()
        .collect();

    match decimal_part {
        Some(fraction) => format!("{}.{}", grouped, fraction),
        None => grouped,
    }
}
