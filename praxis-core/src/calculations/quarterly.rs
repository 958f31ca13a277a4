use rust_decimal::Decimal;

use crate::QuarterlySplit;
use crate::calculations::common::round_half_up;

/// Splits an annual amount into four Vorauszahlungen.
///
/// The first three quarters are a quarter of the total rounded to cents; the
/// fourth takes the remainder so the quarters always add up to the total.
/// The total itself is `annual` unchanged.
///
/// ```
/// use rust_decimal_macros::dec;
/// use praxis_core::calculate_quarterly_vorauszahlungen;
///
/// let split = calculate_quarterly_vorauszahlungen(dec!(1000.01));
///
/// assert_eq!(split.q1, dec!(250.00));
/// assert_eq!(split.q4, dec!(250.01));
/// ```
pub fn calculate_quarterly_vorauszahlungen(annual: Decimal) -> QuarterlySplit {
    let total = annual;
    let quarter = round_half_up(total / Decimal::from(4));

    QuarterlySplit {
        q1: quarter,
        q2: quarter,
        q3: quarter,
        q4: total - quarter * Decimal::from(3),
        total,
    }
}
