//! Austrian display formatting for amounts and percentages.

use rust_decimal::{Decimal, RoundingStrategy};

/// Formats `amount` as whole euros in Austrian notation.
///
/// Rounds half-up to whole euros and groups thousands with `.`.
///
/// ```
/// use rust_decimal_macros::dec;
/// use praxis_core::format_euro_at;
///
/// assert_eq!(format_euro_at(dec!(1000)), "€ 1.000");
/// assert_eq!(format_euro_at(dec!(1234567.50)), "€ 1.234.568");
/// assert_eq!(format_euro_at(dec!(-1000)), "-€ 1.000");
/// ```
pub fn format_euro_at(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    let sign = if rounded < Decimal::ZERO { "-" } else { "" };
    let digits = rounded.abs().trunc().to_string();
    format!("{sign}€ {}", group_thousands(&digits))
}

/// Formats a percentage value with one decimal and a decimal comma.
///
/// ```
/// use rust_decimal_macros::dec;
/// use praxis_core::format_percent_at;
///
/// assert_eq!(format_percent_at(dec!(47.26)), "47,3 %");
/// assert_eq!(format_percent_at(dec!(45)), "45,0 %");
/// ```
pub fn format_percent_at(percent: Decimal) -> String {
    let rounded = percent.round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero);
    format!("{rounded:.1} %").replace('.', ",")
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }
    grouped
}
