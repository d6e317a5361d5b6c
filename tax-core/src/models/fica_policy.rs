use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{FilingStatusCode, PolicyError};

/// Social Security and Medicare constants for one tax year.
///
/// These are published by the SSA and IRS each year; the engine reads them
/// and never derives them.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::{FicaPolicy, FilingStatusCode};
///
/// let fica = FicaPolicy::with_thresholds(
///     dec!(160200),
///     dec!(9932.40),
///     dec!(0.0145),
///     dec!(0.009),
///     [
///         (FilingStatusCode::Single, dec!(200000)),
///         (FilingStatusCode::MarriedFilingJointly, dec!(250000)),
///         (FilingStatusCode::MarriedFilingSeparately, dec!(125000)),
///         (FilingStatusCode::HeadOfHousehold, dec!(200000)),
///         (FilingStatusCode::QualifyingSurvivingSpouse, dec!(200000)),
///     ],
/// );
///
/// assert_eq!(fica.validate(), Ok(()));
/// assert_eq!(
///     fica.additional_medicare_threshold(FilingStatusCode::MarriedFilingSeparately),
///     Some(dec!(125000)),
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FicaPolicy {
    /// Maximum wages subject to Social Security tax.
    pub ss_wage_base: Decimal,

    /// Largest Social Security tax a single employer may withhold.
    pub max_ss_tax: Decimal,

    /// Employee share of the regular Medicare tax (1.45%).
    pub regular_medicare_tax_rate: Decimal,

    /// Additional Medicare Tax rate (0.9%).
    pub additional_medicare_tax_rate: Decimal,

    /// Wages above which Additional Medicare Tax applies, per filing status.
    pub additional_medicare_thresholds: BTreeMap<FilingStatusCode, Decimal>,
}

impl FicaPolicy {
    pub fn with_thresholds(
        ss_wage_base: Decimal,
        max_ss_tax: Decimal,
        regular_medicare_tax_rate: Decimal,
        additional_medicare_tax_rate: Decimal,
        thresholds: impl IntoIterator<Item = (FilingStatusCode, Decimal)>,
    ) -> Self {
        Self {
            ss_wage_base,
            max_ss_tax,
            regular_medicare_tax_rate,
            additional_medicare_tax_rate,
            additional_medicare_thresholds: thresholds.into_iter().collect(),
        }
    }

    pub fn additional_medicare_threshold(
        &self,
        status: FilingStatusCode,
    ) -> Option<Decimal> {
        self.additional_medicare_thresholds.get(&status).copied()
    }

    /// Checks that every constant is in range and every filing status has a
    /// threshold.
    ///
    /// # Errors
    ///
    /// Returns the first [`PolicyError`] found.
    pub fn validate(&self) -> Result<(), PolicyError> {
        if self.ss_wage_base <= Decimal::ZERO {
            return Err(PolicyError::InvalidSsWageBase(self.ss_wage_base));
        }
        if self.max_ss_tax <= Decimal::ZERO {
            return Err(PolicyError::InvalidMaxSsTax(self.max_ss_tax));
        }
        if !is_positive_rate(self.regular_medicare_tax_rate) {
            return Err(PolicyError::InvalidMedicareRate(
                self.regular_medicare_tax_rate,
            ));
        }
        if !is_positive_rate(self.additional_medicare_tax_rate) {
            return Err(PolicyError::InvalidAdditionalMedicareRate(
                self.additional_medicare_tax_rate,
            ));
        }
        for status in FilingStatusCode::ALL {
            match self.additional_medicare_threshold(status) {
                None => return Err(PolicyError::MissingThreshold(status)),
                Some(threshold) if threshold <= Decimal::ZERO => {
                    return Err(PolicyError::InvalidThreshold(status, threshold));
                }
                Some(_) => {}
            }
        }
        Ok(())
    }
}

pub(crate) fn is_rate(rate: Decimal) -> bool {
    rate >= Decimal::ZERO && rate <= Decimal::ONE
}

/// Medicare rates must be positive: Schedule 2 attaches whenever Form 8959
/// does.
fn is_positive_rate(rate: Decimal) -> bool {
    rate > Decimal::ZERO && rate <= Decimal::ONE
}
