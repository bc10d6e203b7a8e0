use rust_decimal::{Decimal, RoundingStrategy};

/// Replacement text for amounts hidden by privacy mode.
pub const MASK: &str = "******";

/// Format with `,` thousands separators and at most three fraction digits,
/// e.g. `1234567.5` → `"1,234,567.5"`.
pub fn format_grouped(value: Decimal) -> String {
    let rounded = value
        .round_dp_with_strategy(3, RoundingStrategy::MidpointAwayFromZero)
        .normalize();
    let text = rounded.abs().to_string();
    let (integer, fraction) = match text.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (text.as_str(), None),
    };

    let mut grouped = String::with_capacity(integer.len() + integer.len() / 3 + 8);
    if rounded.is_sign_negative() && !rounded.is_zero() {
        grouped.push('-');
    }
    for (i, digit) in integer.chars().enumerate() {
        if i > 0 && (integer.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    if let Some(fraction) = fraction {
        grouped.push('.');
        grouped.push_str(fraction);
    }
    grouped
}

/// `prefix` followed by either the grouped amount or [`MASK`].
pub fn mask_value(value: Decimal, prefix: &str, privacy_mode: bool) -> String {
    if privacy_mode {
        format!("{}{}", prefix, MASK)
    } else {
        format!("{}{}", prefix, format_grouped(value))
    }
}

/// Signed currency amount, e.g. `+Rp 15,000` or `-Rp 2,500`.
pub fn signed_amount(value: Decimal, currency: &str, privacy_mode: bool) -> String {
    let sign = if value >= Decimal::ZERO { "+" } else { "-" };
    mask_value(value.abs(), &format!("{}{}", sign, currency), privacy_mode)
}

/// Signed percentage with two decimals, e.g. `+1.40%`.
pub fn signed_percent(value: Decimal) -> String {
    let sign = if value >= Decimal::ZERO { "+" } else { "" };
    format!("{}{:.2}%", sign, value)
}
