#![allow(dead_code)]

use std::collections::BTreeMap;
use std::rc::Rc;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tax_core::{FicaPolicy, FilingStatusCode, Form1040, TaxBracket, TaxYearPolicy, W2};

pub const SS_WAGE_BASE: Decimal = dec!(160200);
pub const MAX_SS_TAX: Decimal = dec!(9932.40);
pub const REGULAR_MEDICARE_RATE: Decimal = dec!(0.0145);
pub const ADDITIONAL_MEDICARE_RATE: Decimal = dec!(0.009);

pub fn threshold(status: FilingStatusCode) -> Decimal {
    match status {
        FilingStatusCode::MarriedFilingJointly => dec!(250000),
        FilingStatusCode::MarriedFilingSeparately => dec!(125000),
        _ => dec!(200000),
    }
}

/// 2023 FICA constants with a flat 10% rate schedule.
pub fn policy() -> TaxYearPolicy {
    let flat = vec![TaxBracket {
        min_income: dec!(0),
        max_income: None,
        tax_rate: dec!(0.10),
        base_tax: dec!(0),
    }];

    TaxYearPolicy {
        tax_year: 2023,
        fica: FicaPolicy::with_thresholds(
            SS_WAGE_BASE,
            MAX_SS_TAX,
            REGULAR_MEDICARE_RATE,
            ADDITIONAL_MEDICARE_RATE,
            FilingStatusCode::ALL.map(|status| (status, threshold(status))),
        ),
        standard_deductions: BTreeMap::from([
            (FilingStatusCode::Single, dec!(13850)),
            (FilingStatusCode::MarriedFilingJointly, dec!(27700)),
            (FilingStatusCode::MarriedFilingSeparately, dec!(13850)),
            (FilingStatusCode::HeadOfHousehold, dec!(20800)),
            (FilingStatusCode::QualifyingSurvivingSpouse, dec!(27700)),
        ]),
        tax_brackets: FilingStatusCode::ALL
            .map(|status| (status, flat.clone()))
            .into_iter()
            .collect(),
    }
}

pub fn f1040(
    status: Option<FilingStatusCode>,
    w2s: Vec<W2>,
) -> Form1040 {
    Form1040::new(status, w2s, Rc::new(policy()))
}
