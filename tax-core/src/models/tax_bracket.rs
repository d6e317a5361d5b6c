use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One row of an IRS tax rate schedule.
///
/// Income above `min_income` and up to `max_income` is taxed at
/// `base_tax + (income - min_income) * tax_rate`. The top bracket has no
/// `max_income`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBracket {
    pub min_income: Decimal,
    pub max_income: Option<Decimal>,
    pub tax_rate: Decimal,
    pub base_tax: Decimal,
}

impl TaxBracket {
    /// Returns true when `taxable_income` falls inside this bracket.
    pub fn contains(
        &self,
        taxable_income: Decimal,
    ) -> bool {
        taxable_income > self.min_income
            && self.max_income.is_none_or(|max| taxable_income <= max)
    }
}
