//! Tax rate schedule lookup for Form 1040 line 16.

use rust_decimal::Decimal;

use crate::TaxBracket;
use crate::calculations::common::round_half_up;

/// Computes tax on `taxable_income` from a rate schedule.
///
/// Income at or below zero owes no tax. Returns `None` when no bracket
/// contains the income, which only happens for a schedule that failed
/// [`TaxYearPolicy::validate`](crate::TaxYearPolicy::validate).
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::TaxBracket;
/// use tax_core::calculations::tax_from_brackets;
///
/// let brackets = vec![
///     TaxBracket {
///         min_income: dec!(0),
///         max_income: Some(dec!(11000)),
///         tax_rate: dec!(0.10),
///         base_tax: dec!(0),
///     },
///     TaxBracket {
///         min_income: dec!(11000),
///         max_income: None,
///         tax_rate: dec!(0.12),
///         base_tax: dec!(1100),
///     },
/// ];
///
/// assert_eq!(tax_from_brackets(&brackets, dec!(20000)), Some(dec!(2180.00)));
/// ```
pub fn tax_from_brackets(
    brackets: &[TaxBracket],
    taxable_income: Decimal,
) -> Option<Decimal> {
    if taxable_income <= Decimal::ZERO {
        return Some(Decimal::ZERO);
    }

    let bracket = brackets.iter().find(|b| b.contains(taxable_income))?;

    let marginal_income = taxable_income - bracket.min_income;
    let tax = bracket.base_tax + (marginal_income * bracket.tax_rate);

    Some(round_half_up(tax))
}
