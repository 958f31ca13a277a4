//! Common utility functions for tax calculations.
//!
//! This module provides shared functionality used across the calculators,
//! including rounding, clamping and the bracket-table walk.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::TaxBracket;

/// Rounds a decimal value to exactly two decimal places using half-up rounding.
///
/// This follows standard financial rounding conventions where values at exactly
/// 0.005 are rounded up to 0.01 (away from zero).
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use praxis_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(123.454)), dec!(123.45));
/// assert_eq!(round_half_up(dec!(123.455)), dec!(123.46));
/// assert_eq!(round_half_up(dec!(-123.455)), dec!(-123.46)); // Away from zero
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Clamps negative values to zero.
///
/// ```
/// use rust_decimal_macros::dec;
/// use praxis_core::calculations::common::non_negative;
///
/// assert_eq!(non_negative(dec!(-10.00)), dec!(0));
/// assert_eq!(non_negative(dec!(10.00)), dec!(10.00));
/// ```
pub fn non_negative(value: Decimal) -> Decimal {
    if value < Decimal::ZERO { Decimal::ZERO } else { value }
}

/// Expresses `part` as a percentage of `whole`, rounded to two decimals.
///
/// Returns zero when `whole` is zero or negative, and saturates at
/// [`Decimal::MAX`] when the ratio leaves the decimal range.
pub fn percentage(
    part: Decimal,
    whole: Decimal,
) -> Decimal {
    if whole <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    part.checked_div(whole)
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .map_or(Decimal::MAX, round_half_up)
}

/// Applies a progressive bracket table to `amount`.
///
/// Each bracket taxes the slice above the previous bracket's upper limit and
/// at or below its own. If the table ends with a bounded bracket, the part of
/// `amount` above that limit is ignored (see [`bracket_excess`]). The sum is
/// returned unrounded.
///
/// ```
/// use rust_decimal_macros::dec;
/// use praxis_core::TaxBracket;
/// use praxis_core::calculations::common::progressive_tax;
///
/// let brackets = vec![
///     TaxBracket::bounded(dec!(10000), dec!(0.00), "frei"),
///     TaxBracket::bounded(dec!(20000), dec!(0.20), "20%"),
///     TaxBracket::unbounded(dec!(0.50), "50%"),
/// ];
///
/// // 10,000 × 20% + 5,000 × 50%
/// assert_eq!(progressive_tax(&brackets, dec!(25000)), dec!(4500));
/// ```
pub fn progressive_tax(
    brackets: &[TaxBracket],
    amount: Decimal,
) -> Decimal {
    let mut tax = Decimal::ZERO;
    let mut lower = Decimal::ZERO;

    for bracket in brackets {
        if amount <= lower {
            break;
        }
        let upper = bracket.upper_limit.map_or(amount, |limit| limit.min(amount));
        tax += (upper - lower) * bracket.rate;
        match bracket.upper_limit {
            Some(limit) => lower = limit,
            None => break,
        }
    }

    tax
}

/// Part of `amount` above the last bounded bracket; zero when the table
/// ends with an open bracket.
pub fn bracket_excess(
    brackets: &[TaxBracket],
    amount: Decimal,
) -> Decimal {
    match brackets.last().and_then(|b| b.upper_limit) {
        Some(cap) => non_negative(amount - cap),
        None => Decimal::ZERO,
    }
}

/// Rate of the bracket `amount` falls into (upper limits inclusive).
///
/// Amounts at or below zero fall into the first bracket; amounts above a
/// bounded table fall into its last bracket.
pub fn bracket_rate(
    brackets: &[TaxBracket],
    amount: Decimal,
) -> Decimal {
    brackets
        .iter()
        .find(|b| b.upper_limit.is_none_or(|limit| amount <= limit))
        .or(brackets.last())
        .map_or(Decimal::ZERO, |b| b.rate)
}
