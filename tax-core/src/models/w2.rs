use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One employer's Form W-2 wage and tax statement.
///
/// Only the boxes the return computes from are carried. Medicare wages
/// (box 5) are taken to equal box 1 wages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct W2 {
    /// Employer name, used in diagnostics only.
    pub employer: Option<String>,

    /// Box 1: wages, tips, other compensation.
    pub wages: Decimal,

    /// Box 2: federal income tax withheld.
    pub federal_withholding: Decimal,

    /// Box 4: Social Security tax withheld.
    pub ss_withholding: Decimal,

    /// Box 6: Medicare tax withheld.
    pub medicare_withholding: Decimal,
}

impl W2 {
    /// Creates a statement with no federal income tax withheld and no
    /// employer name.
    pub fn new(
        wages: Decimal,
        ss_withholding: Decimal,
        medicare_withholding: Decimal,
    ) -> Self {
        Self {
            employer: None,
            wages,
            federal_withholding: Decimal::ZERO,
            ss_withholding,
            medicare_withholding,
        }
    }

    pub fn with_employer(
        mut self,
        employer: impl Into<String>,
    ) -> Self {
        self.employer = Some(employer.into());
        self
    }

    pub fn with_federal_withholding(
        mut self,
        federal_withholding: Decimal,
    ) -> Self {
        self.federal_withholding = federal_withholding;
        self
    }
}
