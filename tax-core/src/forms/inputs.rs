use std::rc::Rc;

use rust_decimal::Decimal;

use crate::{FicaPolicy, FilingStatusCode, TaxYearPolicy, W2};

/// Raw inputs of one return, shared read-only by every form in it.
///
/// Aggregates over the W-2 list live here so each is written once no matter
/// how many forms read it.
#[derive(Debug)]
pub struct ReturnInputs {
    filing_status: Option<FilingStatusCode>,
    w2s: Vec<W2>,
    policy: Rc<TaxYearPolicy>,
}

impl ReturnInputs {
    pub fn new(
        filing_status: Option<FilingStatusCode>,
        w2s: Vec<W2>,
        policy: Rc<TaxYearPolicy>,
    ) -> Self {
        Self {
            filing_status,
            w2s,
            policy,
        }
    }

    pub fn filing_status(&self) -> Option<FilingStatusCode> {
        self.filing_status
    }

    pub fn w2s(&self) -> &[W2] {
        &self.w2s
    }

    pub fn policy(&self) -> &TaxYearPolicy {
        &self.policy
    }

    pub fn fica(&self) -> &FicaPolicy {
        &self.policy.fica
    }

    /// Total W-2 box 1 wages.
    pub fn wages(&self) -> Decimal {
        self.w2s.iter().map(|w2| w2.wages).sum()
    }

    /// Total W-2 box 2 federal income tax withheld.
    pub fn federal_withholding(&self) -> Decimal {
        self.w2s.iter().map(|w2| w2.federal_withholding).sum()
    }

    /// Total W-2 box 4 Social Security tax withheld.
    pub fn ss_withholding(&self) -> Decimal {
        self.w2s.iter().map(|w2| w2.ss_withholding).sum()
    }

    /// Total W-2 box 6 Medicare tax withheld.
    pub fn medicare_withholding(&self) -> Decimal {
        self.w2s.iter().map(|w2| w2.medicare_withholding).sum()
    }

    /// Additional Medicare Tax threshold for the filing status, if one is set.
    pub fn additional_medicare_threshold(&self) -> Option<Decimal> {
        self.filing_status
            .and_then(|status| self.fica().additional_medicare_threshold(status))
    }
}
