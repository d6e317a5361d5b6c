use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::fica_policy::is_rate;
use super::{FicaPolicy, FilingStatusCode, TaxBracket};

/// Errors found while validating tax-year policy tables.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PolicyError {
    #[error("social security wage base must be positive, got {0}")]
    InvalidSsWageBase(Decimal),

    #[error("maximum social security tax must be positive, got {0}")]
    InvalidMaxSsTax(Decimal),

    #[error("medicare tax rate must be greater than 0 and at most 1, got {0}")]
    InvalidMedicareRate(Decimal),

    #[error("additional medicare tax rate must be greater than 0 and at most 1, got {0}")]
    InvalidAdditionalMedicareRate(Decimal),

    #[error("no additional medicare threshold for filing status {0}")]
    MissingThreshold(FilingStatusCode),

    #[error("additional medicare threshold for {0} must be positive, got {1}")]
    InvalidThreshold(FilingStatusCode, Decimal),

    #[error("no standard deduction for filing status {0}")]
    MissingStandardDeduction(FilingStatusCode),

    #[error("standard deduction for {0} must be non-negative, got {1}")]
    InvalidStandardDeduction(FilingStatusCode, Decimal),

    #[error("no tax brackets for filing status {0}")]
    MissingBrackets(FilingStatusCode),

    /// Brackets must start at zero and each must begin where the previous
    /// one ended.
    #[error("tax brackets for {status} are not contiguous: expected {expected}, found {found}")]
    BracketGap {
        status: FilingStatusCode,
        expected: Decimal,
        found: Decimal,
    },

    #[error("tax brackets for {0} have an unbounded bracket before the last one")]
    UnboundedBracketNotLast(FilingStatusCode),

    #[error("tax brackets for {0} have no unbounded top bracket")]
    MissingTopBracket(FilingStatusCode),

    #[error("tax bracket rate for {0} must be between 0 and 1, got {1}")]
    InvalidBracketRate(FilingStatusCode, Decimal),
}

/// All static tables one tax year's return is computed against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxYearPolicy {
    pub tax_year: i32,
    pub fica: FicaPolicy,
    pub standard_deductions: BTreeMap<FilingStatusCode, Decimal>,

    /// Rate schedule per filing status, sorted by `min_income`.
    pub tax_brackets: BTreeMap<FilingStatusCode, Vec<TaxBracket>>,
}

impl TaxYearPolicy {
    pub fn standard_deduction(
        &self,
        status: FilingStatusCode,
    ) -> Option<Decimal> {
        self.standard_deductions.get(&status).copied()
    }

    pub fn brackets(
        &self,
        status: FilingStatusCode,
    ) -> Option<&[TaxBracket]> {
        self.tax_brackets.get(&status).map(Vec::as_slice)
    }

    /// Validates the FICA constants, the standard deductions, and that each
    /// filing status has a contiguous rate schedule covering all income.
    ///
    /// # Errors
    ///
    /// Returns the first [`PolicyError`] found.
    pub fn validate(&self) -> Result<(), PolicyError> {
        self.fica.validate()?;

        for status in FilingStatusCode::ALL {
            match self.standard_deduction(status) {
                None => return Err(PolicyError::MissingStandardDeduction(status)),
                Some(amount) if amount < Decimal::ZERO => {
                    return Err(PolicyError::InvalidStandardDeduction(status, amount));
                }
                Some(_) => {}
            }

            let brackets = self
                .brackets(status)
                .filter(|b| !b.is_empty())
                .ok_or(PolicyError::MissingBrackets(status))?;
            validate_schedule(status, brackets)?;
        }

        Ok(())
    }
}

fn validate_schedule(
    status: FilingStatusCode,
    brackets: &[TaxBracket],
) -> Result<(), PolicyError> {
    let mut expected_min = Decimal::ZERO;

    for (index, bracket) in brackets.iter().enumerate() {
        if bracket.min_income != expected_min {
            return Err(PolicyError::BracketGap {
                status,
                expected: expected_min,
                found: bracket.min_income,
            });
        }
        if !is_rate(bracket.tax_rate) {
            return Err(PolicyError::InvalidBracketRate(status, bracket.tax_rate));
        }
        match bracket.max_income {
            Some(max) => expected_min = max,
            None if index + 1 == brackets.len() => return Ok(()),
            None => return Err(PolicyError::UnboundedBracketNotLast(status)),
        }
    }

    Err(PolicyError::MissingTopBracket(status))
}
