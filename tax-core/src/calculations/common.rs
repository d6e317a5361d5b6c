//! Common utility functions for tax calculations.
//!
//! Rounding, clamping, and the two summation policies form lines use:
//! plain sums over raw inputs, and sums over lines that may be undefined.

use rust_decimal::Decimal;

/// Rounds a decimal value to exactly two decimal places using half-up rounding.
///
/// This follows standard financial rounding conventions where values at exactly
/// 0.005 are rounded up to 0.01 (away from zero).
///
/// # Arguments
///
/// * `value` - The decimal value to round
///
/// # Returns
///
/// The value rounded to two decimal places.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(123.454)), dec!(123.45));
/// assert_eq!(round_half_up(dec!(123.455)), dec!(123.46));
/// assert_eq!(round_half_up(dec!(123.456)), dec!(123.46));
/// assert_eq!(round_half_up(dec!(-123.455)), dec!(-123.46)); // Away from zero
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, rust_decimal::RoundingStrategy::MidpointAwayFromZero)
}

/// Returns the maximum of two decimal values.
///
/// # Arguments
///
/// * `a` - First decimal value
/// * `b` - Second decimal value
///
/// # Returns
///
/// The larger of the two values.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::calculations::common::max;
///
/// assert_eq!(max(dec!(100.00), dec!(200.00)), dec!(200.00));
/// assert_eq!(max(dec!(200.00), dec!(100.00)), dec!(200.00));
/// assert_eq!(max(dec!(-100.00), dec!(-200.00)), dec!(-100.00));
/// ```
pub fn max(
    a: Decimal,
    b: Decimal,
) -> Decimal {
    if a > b { a } else { b }
}

/// Returns `Some(value)` when it is strictly positive.
///
/// Lines such as "amount you overpaid" are left blank rather than showing a
/// zero or negative amount.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::calculations::common::positive;
///
/// assert_eq!(positive(dec!(12.50)), Some(dec!(12.50)));
/// assert_eq!(positive(dec!(0)), None);
/// ```
pub fn positive(value: Decimal) -> Option<Decimal> {
    (value > Decimal::ZERO).then_some(value)
}

/// Sums a list of line values, skipping undefined ones.
///
/// Returns `None` only when no value is defined, so a total over lines that
/// are all "not applicable" stays not applicable instead of becoming zero.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::calculations::common::sum_defined;
///
/// assert_eq!(sum_defined([Some(dec!(1)), None, Some(dec!(2))]), Some(dec!(3)));
/// assert_eq!(sum_defined([None, None]), None);
/// ```
pub fn sum_defined(values: impl IntoIterator<Item = Option<Decimal>>) -> Option<Decimal> {
    values
        .into_iter()
        .flatten()
        .fold(None, |total, value| Some(total.unwrap_or(Decimal::ZERO) + value))
}
