//! Social Security and Medicare formulas shared by Schedule 3 and Form 8959.
//!
//! # Excess Social Security withholding
//!
//! Each employer stops withholding Social Security tax once that employer's
//! wages reach the wage base, so one employer can never withhold more than
//! the maximum tax. With two or more employers the combined withholding can
//! exceed the maximum, and the excess is refunded as a credit on
//! Schedule 3, line 10.
//!
//! No credit is computed when:
//!
//! - there is at most one W-2,
//! - total wages do not exceed the wage base, or
//! - any single W-2 shows withholding above the maximum. That employer
//!   over-withheld and must refund the taxpayer directly.
//!
//! # Additional Medicare Tax
//!
//! Wages above the filing-status threshold owe an extra 0.9% (Form 8959
//! Part I). Medicare tax withheld beyond the regular rate applied to the
//! threshold counts as additional withholding (Part V) and is credited on
//! Form 1040, line 25c.

use rust_decimal::Decimal;
use tracing::warn;

use crate::calculations::common::{max, positive};
use crate::{FicaPolicy, W2};

/// Computes the excess Social Security withholding credit.
///
/// `total_wages` and `total_ss_withholding` are the return's W-2 totals;
/// `w2s` is only inspected employer by employer.
///
/// # Form Reference
///
/// Schedule 3, line 10.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::{FicaPolicy, FilingStatusCode, W2};
/// use tax_core::calculations::fica::excess_ss_withholding;
///
/// let fica = FicaPolicy::with_thresholds(
///     dec!(160200),
///     dec!(9932.40),
///     dec!(0.0145),
///     dec!(0.009),
///     FilingStatusCode::ALL.map(|status| (status, dec!(200000))),
/// );
/// let w2s = [
///     W2::new(dec!(90000), dec!(5500), dec!(1305)),
///     W2::new(dec!(80000), dec!(4900), dec!(1160)),
/// ];
///
/// let credit = excess_ss_withholding(&fica, dec!(170000), dec!(10400), &w2s);
///
/// assert_eq!(credit, Some(dec!(467.60)));
/// ```
pub fn excess_ss_withholding(
    fica: &FicaPolicy,
    total_wages: Decimal,
    total_ss_withholding: Decimal,
    w2s: &[W2],
) -> Option<Decimal> {
    if w2s.len() <= 1 {
        return None;
    }

    if total_wages <= fica.ss_wage_base {
        return None;
    }

    if let Some(w2) = w2s.iter().find(|w2| w2.ss_withholding > fica.max_ss_tax) {
        warn!(
            employer = w2.employer.as_deref().unwrap_or("unknown"),
            ss_withholding = %w2.ss_withholding,
            max_ss_tax = %fica.max_ss_tax,
            "Employer withheld more than the maximum social security tax; \
             no excess withholding credit"
        );
        return None;
    }

    positive(total_ss_withholding - fica.max_ss_tax)
}

/// Wages subject to Additional Medicare Tax.
///
/// # Form Reference
///
/// Form 8959, line 6: line 4 minus line 5, if zero or less enter 0.
pub fn wages_over_threshold(
    medicare_wages: Decimal,
    threshold: Decimal,
) -> Decimal {
    max(medicare_wages - threshold, Decimal::ZERO)
}

/// Additional Medicare Tax on wages over the threshold.
///
/// The result is not rounded; it carries the exact product of the wages and
/// the rate.
///
/// # Form Reference
///
/// Form 8959, line 7: line 6 × 0.9%.
pub fn additional_medicare_tax(
    fica: &FicaPolicy,
    wages_over_threshold: Decimal,
) -> Decimal {
    wages_over_threshold * fica.additional_medicare_tax_rate
}

/// Regular Medicare tax expected to be withheld up to the threshold.
///
/// # Form Reference
///
/// Form 8959, line 21.
pub fn regular_medicare_withholding(
    fica: &FicaPolicy,
    threshold: Decimal,
) -> Decimal {
    threshold * fica.regular_medicare_tax_rate
}

/// Medicare tax withheld beyond the regular amount.
///
/// # Form Reference
///
/// Form 8959, line 22: line 19 minus line 21, if zero or less enter 0.
pub fn additional_medicare_withheld(
    medicare_withheld: Decimal,
    regular_withholding: Decimal,
) -> Decimal {
    max(medicare_withheld - regular_withholding, Decimal::ZERO)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;
    use tracing_subscriber::fmt::format::FmtSpan;

    use super::*;
    use crate::FilingStatusCode;

    fn test_fica() -> FicaPolicy {
        FicaPolicy::with_thresholds(
            dec!(160200),
            dec!(9932.40),
            dec!(0.0145),
            dec!(0.009),
            [
                (FilingStatusCode::Single, dec!(200000)),
                (FilingStatusCode::MarriedFilingJointly, dec!(250000)),
                (FilingStatusCode::MarriedFilingSeparately, dec!(125000)),
                (FilingStatusCode::HeadOfHousehold, dec!(200000)),
                (FilingStatusCode::QualifyingSurvivingSpouse, dec!(200000)),
            ],
        )
    }

    /// Initializes tracing subscriber for tests that verify log output.
    fn init_test_tracing() -> tracing::subscriber::DefaultGuard {
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::WARN)
            .with_span_events(FmtSpan::NONE)
            .with_test_writer()
            .finish();
        tracing::subscriber::set_default(subscriber)
    }

    // =========================================================================
    // excess_ss_withholding tests
    // =========================================================================

    #[test]
    fn excess_ss_withholding_requires_more_than_one_w2() {
        let w2s = [W2::new(dec!(200000), dec!(12000), dec!(2900))];

        let result = excess_ss_withholding(&test_fica(), dec!(200000), dec!(12000), &w2s);

        assert_eq!(result, None);
    }

    #[test]
    fn excess_ss_withholding_is_undefined_without_w2s() {
        let result = excess_ss_withholding(&test_fica(), dec!(0), dec!(0), &[]);

        assert_eq!(result, None);
    }

    #[test]
    fn excess_ss_withholding_requires_wages_over_base() {
        let w2s = [
            W2::new(dec!(80000), dec!(5000), dec!(1160)),
            W2::new(dec!(80200), dec!(4972.40), dec!(1162.90)),
        ];

        let result = excess_ss_withholding(&test_fica(), dec!(160200), dec!(9972.40), &w2s);

        assert_eq!(result, None);
    }

    #[test]
    fn excess_ss_withholding_suppressed_when_one_employer_over_withheld() {
        let _guard = init_test_tracing();
        let w2s = [
            W2::new(dec!(170000), dec!(10540), dec!(2465)).with_employer("Acme"),
            W2::new(dec!(50000), dec!(3100), dec!(725)),
        ];

        let result = excess_ss_withholding(&test_fica(), dec!(220000), dec!(13640), &w2s);

        assert_eq!(result, None);
    }

    #[test]
    fn excess_ss_withholding_credits_sum_over_max() {
        let w2s = [
            W2::new(dec!(90000), dec!(5500), dec!(1305)),
            W2::new(dec!(80000), dec!(4900), dec!(1160)),
        ];

        let result = excess_ss_withholding(&test_fica(), dec!(170000), dec!(10400), &w2s);

        // 5500 + 4900 - 9932.40
        assert_eq!(result, Some(dec!(467.60)));
    }

    #[test]
    fn excess_ss_withholding_accepts_withholding_exactly_at_max() {
        let w2s = [
            W2::new(dec!(160200), dec!(9932.40), dec!(2322.90)),
            W2::new(dec!(10000), dec!(620), dec!(145)),
        ];

        let result = excess_ss_withholding(&test_fica(), dec!(170200), dec!(10552.40), &w2s);

        assert_eq!(result, Some(dec!(620.00)));
    }

    #[test]
    fn excess_ss_withholding_is_undefined_when_sum_not_over_max() {
        let w2s = [
            W2::new(dec!(90000), dec!(4000), dec!(1305)),
            W2::new(dec!(80000), dec!(4000), dec!(1160)),
        ];

        let result = excess_ss_withholding(&test_fica(), dec!(170000), dec!(8000), &w2s);

        assert_eq!(result, None);
    }

    #[test]
    fn excess_ss_withholding_credits_the_given_total() {
        let w2s = [
            W2::new(dec!(90000), dec!(5500), dec!(1305)),
            W2::new(dec!(80000), dec!(4900), dec!(1160)),
        ];

        let result = excess_ss_withholding(&test_fica(), dec!(170000), dec!(10000), &w2s);

        assert_eq!(result, Some(dec!(67.60)));
    }

    // =========================================================================
    // Additional Medicare Tax tests
    // =========================================================================

    #[test]
    fn wages_over_threshold_is_zero_at_threshold() {
        assert_eq!(wages_over_threshold(dec!(200000), dec!(200000)), dec!(0));
    }

    #[test]
    fn wages_over_threshold_returns_excess() {
        assert_eq!(
            wages_over_threshold(dec!(260000.50), dec!(250000)),
            dec!(10000.50)
        );
    }

    #[test]
    fn additional_medicare_tax_is_not_rounded() {
        let result = additional_medicare_tax(&test_fica(), dec!(10000.55));

        assert_eq!(result, dec!(90.00495));
    }

    #[test]
    fn regular_medicare_withholding_applies_regular_rate_to_threshold() {
        let result = regular_medicare_withholding(&test_fica(), dec!(200000));

        assert_eq!(result, dec!(2900.0000));
    }

    #[test]
    fn additional_medicare_withheld_returns_excess() {
        assert_eq!(
            additional_medicare_withheld(dec!(3350), dec!(2900)),
            dec!(450)
        );
    }

    #[test]
    fn additional_medicare_withheld_floors_at_zero() {
        assert_eq!(
            additional_medicare_withheld(dec!(2000), dec!(2900)),
            dec!(0)
        );
    }
}
