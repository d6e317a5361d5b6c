//! Form 1040, U.S. Individual Income Tax Return.
//!
//! The root of the form graph. It owns the return's raw inputs and decides,
//! from values its subordinate forms compute, which of them are attached.
//!
//! # Lines
//!
//! | Line | Description |
//! |------|-------------|
//! | 1z   | Total W-2 wages |
//! | 9    | Total income (line 1z) |
//! | 11   | Adjusted gross income (line 9) |
//! | 12   | Standard deduction for the filing status |
//! | 15   | Taxable income (line 11 − line 12, not less than zero) |
//! | 16   | Tax from the rate schedule |
//! | 23   | Other taxes from Schedule 2, line 21 |
//! | 24   | Total tax (line 16 + line 23) |
//! | 25a  | Federal income tax withheld on W-2s |
//! | 25c  | Other withholding from Form 8959, line 24 |
//! | 25d  | Total withholding (line 25a + line 25c) |
//! | 31   | Other payments and credits from Schedule 3, line 15 |
//! | 32   | Total other payments and refundable credits (line 31) |
//! | 33   | Total payments (line 25d + line 32) |
//! | 34   | Amount overpaid (line 33 − line 24, if positive) |
//! | 37   | Amount you owe (line 24 − line 33, if positive) |
//!
//! # Undefined inputs
//!
//! Lines that read an optional schedule treat an absent schedule as
//! undefined, and totals that add such a line treat undefined as zero.
//! Lines that need the filing status are undefined while it is unset, and so
//! is everything computed from them.
//!
//! # Example
//!
//! ```
//! use std::rc::Rc;
//!
//! use rust_decimal_macros::dec;
//! use tax_core::{
//!     FicaPolicy, FilingStatusCode, Form, Form1040, FormKind, TaxBracket, TaxYearPolicy, W2,
//! };
//!
//! let policy = TaxYearPolicy {
//!     tax_year: 2023,
//!     fica: FicaPolicy::with_thresholds(
//!         dec!(160200),
//!         dec!(9932.40),
//!         dec!(0.0145),
//!         dec!(0.009),
//!         FilingStatusCode::ALL.map(|status| (status, dec!(200000))),
//!     ),
//!     standard_deductions: FilingStatusCode::ALL
//!         .map(|status| (status, dec!(13850)))
//!         .into_iter()
//!         .collect(),
//!     tax_brackets: FilingStatusCode::ALL
//!         .map(|status| {
//!             (status, vec![TaxBracket {
//!                 min_income: dec!(0),
//!                 max_income: None,
//!                 tax_rate: dec!(0.10),
//!                 base_tax: dec!(0),
//!             }])
//!         })
//!         .into_iter()
//!         .collect(),
//! };
//!
//! let f1040 = Form1040::new(
//!     Some(FilingStatusCode::Single),
//!     vec![
//!         W2::new(dec!(90000), dec!(5500), dec!(1305)),
//!         W2::new(dec!(80000), dec!(4900), dec!(1160)),
//!     ],
//!     Rc::new(policy),
//! );
//!
//! assert_eq!(f1040.l1z(), Some(dec!(170000)));
//! assert_eq!(f1040.l31(), Some(dec!(467.60)));
//!
//! let attached: Vec<FormKind> = f1040.attachments().iter().map(|a| a.kind()).collect();
//! assert_eq!(attached, vec![FormKind::Schedule3]);
//! ```

use std::rc::Rc;

use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::calculations::common::{max, positive};
use crate::calculations::tax_from_brackets;
use crate::{FilingStatusCode, TaxYearPolicy, W2};

use super::graph::evaluation_order;
use super::{
    Attachment, Form, Form8959, FormKind, LineCache, Memo, ReturnInputs, Schedule2, Schedule3,
    Value, attachments,
};

#[derive(Debug)]
pub struct Form1040 {
    inputs: Rc<ReturnInputs>,
    lines: LineCache,
    schedule2: Memo<Option<Rc<Schedule2>>>,
    schedule3: Memo<Option<Rc<Schedule3>>>,
    f8959: Memo<Option<Rc<Form8959>>>,
}

impl Form1040 {
    pub fn new(
        filing_status: Option<FilingStatusCode>,
        w2s: Vec<W2>,
        policy: Rc<TaxYearPolicy>,
    ) -> Self {
        Self::from_inputs(Rc::new(ReturnInputs::new(filing_status, w2s, policy)))
    }

    pub fn from_inputs(inputs: Rc<ReturnInputs>) -> Self {
        debug_assert!(
            evaluation_order().is_ok(),
            "forms declare a reads-from cycle: {:?}",
            evaluation_order()
        );

        if inputs.filing_status().is_none() {
            warn!(
                tax_year = inputs.policy().tax_year,
                w2_count = inputs.w2s().len(),
                "Filing status not set; status-dependent lines are undefined"
            );
        }

        Self {
            inputs,
            lines: LineCache::new(FormKind::Form1040),
            schedule2: Memo::new(FormKind::Form1040, "Schedule 2 attachment"),
            schedule3: Memo::new(FormKind::Form1040, "Schedule 3 attachment"),
            f8959: Memo::new(FormKind::Form1040, "Form 8959 attachment"),
        }
    }

    pub fn inputs(&self) -> &ReturnInputs {
        &self.inputs
    }

    pub fn filing_status(&self) -> Option<FilingStatusCode> {
        self.inputs.filing_status()
    }

    pub fn w2s(&self) -> &[W2] {
        self.inputs.w2s()
    }

    /// Total W-2 wages. Same amount as line 1z, without the `Option`.
    pub fn wages(&self) -> Decimal {
        self.inputs.wages()
    }

    // =========================================================================
    // Subordinate forms
    // =========================================================================

    /// Schedule 2, if any additional tax applies.
    pub fn schedule2(&self) -> Option<Rc<Schedule2>> {
        self.schedule2.get_or_compute(|| {
            attach_if(Schedule2::new(self.f8959()), Schedule2::is_needed)
        })
    }

    /// Schedule 3, if any additional credit or payment applies.
    pub fn schedule3(&self) -> Option<Rc<Schedule3>> {
        self.schedule3.get_or_compute(|| {
            attach_if(Schedule3::new(Rc::clone(&self.inputs)), Schedule3::is_needed)
        })
    }

    /// Form 8959, if wages exceed the Additional Medicare Tax threshold.
    pub fn f8959(&self) -> Option<Rc<Form8959>> {
        self.f8959.get_or_compute(|| {
            attach_if(Form8959::new(Rc::clone(&self.inputs)), Form8959::is_needed)
        })
    }

    /// Every attached subordinate form, in attachment sequence order.
    pub fn attachments(&self) -> Vec<Attachment> {
        attachments::resolve(self)
    }

    // =========================================================================
    // Income
    // =========================================================================

    pub fn l1z(&self) -> Value {
        self.lines.get("1z", || Some(self.inputs.wages()))
    }

    pub fn l9(&self) -> Value {
        self.lines.get("9", || self.l1z())
    }

    pub fn l11(&self) -> Value {
        self.lines.get("11", || self.l9())
    }

    pub fn l12(&self) -> Value {
        self.lines.get("12", || {
            let status = self.filing_status()?;
            self.inputs.policy().standard_deduction(status)
        })
    }

    pub fn l15(&self) -> Value {
        self.lines.get("15", || Some(max(self.l11()? - self.l12()?, Decimal::ZERO)))
    }

    // =========================================================================
    // Tax
    // =========================================================================

    pub fn l16(&self) -> Value {
        self.lines.get("16", || {
            let status = self.filing_status()?;
            let taxable_income = self.l15()?;
            let Some(brackets) = self.inputs.policy().brackets(status) else {
                warn!(
                    filing_status = %status,
                    tax_year = self.inputs.policy().tax_year,
                    "No tax brackets for filing status; tax is undefined"
                );
                return None;
            };
            let tax = tax_from_brackets(brackets, taxable_income);
            if tax.is_none() {
                warn!(
                    filing_status = %status,
                    taxable_income = %taxable_income,
                    "No tax bracket contains taxable income; tax is undefined"
                );
            }
            tax
        })
    }

    pub fn l23(&self) -> Value {
        self.lines.get("23", || self.schedule2().and_then(|s| s.l21()))
    }

    pub fn l24(&self) -> Value {
        self.lines.get("24", || {
            Some(self.l16()? + self.l23().unwrap_or(Decimal::ZERO))
        })
    }

    // =========================================================================
    // Payments
    // =========================================================================

    pub fn l25a(&self) -> Value {
        self.lines.get("25a", || Some(self.inputs.federal_withholding()))
    }

    pub fn l25c(&self) -> Value {
        self.lines.get("25c", || self.f8959().and_then(|f| f.l24()))
    }

    pub fn l25d(&self) -> Value {
        self.lines.get("25d", || {
            Some(self.l25a()? + self.l25c().unwrap_or(Decimal::ZERO))
        })
    }

    pub fn l31(&self) -> Value {
        self.lines.get("31", || self.schedule3().and_then(|s| s.l15()))
    }

    pub fn l32(&self) -> Value {
        self.lines.get("32", || self.l31())
    }

    pub fn l33(&self) -> Value {
        self.lines.get("33", || {
            Some(self.l25d()? + self.l32().unwrap_or(Decimal::ZERO))
        })
    }

    // =========================================================================
    // Refund or amount owed
    // =========================================================================

    pub fn l34(&self) -> Value {
        self.lines.get("34", || positive(self.l33()? - self.l24()?))
    }

    pub fn l37(&self) -> Value {
        self.lines.get("37", || positive(self.l24()? - self.l33()?))
    }
}

impl Form for Form1040 {
    fn kind(&self) -> FormKind {
        FormKind::Form1040
    }

    fn lines(&self) -> Vec<(&'static str, Value)> {
        vec![
            ("1z", self.l1z()),
            ("9", self.l9()),
            ("11", self.l11()),
            ("12", self.l12()),
            ("15", self.l15()),
            ("16", self.l16()),
            ("23", self.l23()),
            ("24", self.l24()),
            ("25a", self.l25a()),
            ("25c", self.l25c()),
            ("25d", self.l25d()),
            ("31", self.l31()),
            ("32", self.l32()),
            ("33", self.l33()),
            ("34", self.l34()),
            ("37", self.l37()),
        ]
    }
}

/// Keeps `candidate` only if `needed` says it must be attached.
fn attach_if<F: Form>(
    candidate: F,
    needed: impl FnOnce(&F) -> bool,
) -> Option<Rc<F>> {
    let attached = needed(&candidate);
    debug!(form = %candidate.kind(), attached, "Attachment decided");
    attached.then(|| Rc::new(candidate))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::forms::test_support::{policy_2023, w2};

    fn f1040(
        status: Option<FilingStatusCode>,
        w2s: Vec<W2>,
    ) -> Form1040 {
        Form1040::new(status, w2s, Rc::new(policy_2023()))
    }

    // =========================================================================
    // Income and tax lines
    // =========================================================================

    #[test]
    fn no_w2s_gives_zero_wages_and_tax() {
        let f1040 = f1040(Some(FilingStatusCode::Single), vec![]);

        assert_eq!(f1040.l1z(), Some(dec!(0)));
        assert_eq!(f1040.l15(), Some(dec!(0)));
        assert_eq!(f1040.l16(), Some(dec!(0)));
        assert_eq!(f1040.l24(), Some(dec!(0)));
        assert_eq!(f1040.l34(), None);
        assert_eq!(f1040.l37(), None);
        assert!(f1040.attachments().is_empty());
    }

    #[test]
    fn taxable_income_subtracts_standard_deduction() {
        let f1040 = f1040(
            Some(FilingStatusCode::HeadOfHousehold),
            vec![w2(dec!(60000))],
        );

        assert_eq!(f1040.l12(), Some(dec!(20800)));
        assert_eq!(f1040.l15(), Some(dec!(39200)));
        // 1,570 + (39,200 - 15,700) * 12%
        assert_eq!(f1040.l16(), Some(dec!(4390.00)));
    }

    #[test]
    fn taxable_income_not_below_zero() {
        let f1040 = f1040(Some(FilingStatusCode::Single), vec![w2(dec!(9000))]);

        assert_eq!(f1040.l15(), Some(dec!(0)));
        assert_eq!(f1040.l16(), Some(dec!(0)));
    }

    #[test]
    fn missing_filing_status_leaves_dependent_lines_undefined() {
        let f1040 = f1040(None, vec![w2(dec!(300000)), w2(dec!(10000))]);

        assert_eq!(f1040.l1z(), Some(dec!(310000)));
        assert_eq!(f1040.l12(), None);
        assert_eq!(f1040.l15(), None);
        assert_eq!(f1040.l16(), None);
        assert_eq!(f1040.l24(), None);
        assert_eq!(f1040.l25c(), None);
        assert_eq!(f1040.l34(), None);
        assert_eq!(f1040.l37(), None);
        assert!(f1040.f8959().is_none());
        assert!(f1040.schedule2().is_none());
    }

    // =========================================================================
    // Payments
    // =========================================================================

    #[test]
    fn withholding_over_tax_is_overpaid() {
        let f1040 = f1040(
            Some(FilingStatusCode::Single),
            vec![w2(dec!(50000)).with_federal_withholding(dec!(6000))],
        );

        // Taxable 36,150: 1,100 + 25,150 * 12% = 4,118
        assert_eq!(f1040.l24(), Some(dec!(4118.00)));
        assert_eq!(f1040.l33(), Some(dec!(6000)));
        assert_eq!(f1040.l34(), Some(dec!(1882.00)));
        assert_eq!(f1040.l37(), None);
    }

    #[test]
    fn tax_over_withholding_is_owed() {
        let f1040 = f1040(
            Some(FilingStatusCode::Single),
            vec![w2(dec!(50000)).with_federal_withholding(dec!(4000))],
        );

        assert_eq!(f1040.l34(), None);
        assert_eq!(f1040.l37(), Some(dec!(118.00)));
    }

    #[test]
    fn excess_ss_credit_flows_to_total_payments() {
        let f1040 = f1040(
            Some(FilingStatusCode::MarriedFilingJointly),
            vec![
                W2::new(dec!(90000), dec!(5500), dec!(1305)),
                W2::new(dec!(80000), dec!(4900), dec!(1160)),
            ],
        );

        assert_eq!(f1040.l31(), Some(dec!(467.60)));
        assert_eq!(f1040.l32(), Some(dec!(467.60)));
        assert_eq!(f1040.l33(), Some(dec!(467.60)));
        assert!(f1040.schedule3().is_some());
        assert!(f1040.schedule2().is_none());
    }

    #[test]
    fn additional_medicare_tax_and_withholding_flow_to_return() {
        let f1040 = f1040(Some(FilingStatusCode::Single), vec![w2(dec!(250000))]);

        // (250,000 - 200,000) * 0.9%
        assert_eq!(f1040.l23(), Some(dec!(450.000)));
        // 3,625 withheld - 2,900 regular on the threshold
        assert_eq!(f1040.l25c(), Some(dec!(725.00)));
        assert_eq!(f1040.l25d(), Some(dec!(725.00)));
    }

    // =========================================================================
    // Memoization
    // =========================================================================

    #[test]
    fn subordinate_forms_are_built_once() {
        let f1040 = f1040(Some(FilingStatusCode::Single), vec![w2(dec!(250000))]);

        let first = f1040.f8959().unwrap();
        let second = f1040.f8959().unwrap();
        let via_schedule2 = f1040.schedule2().unwrap();

        assert!(Rc::ptr_eq(&first, &second));
        assert_eq!(via_schedule2.l8(), first.l18());
    }

    #[test]
    fn reading_lines_twice_is_stable() {
        let f1040 = f1040(
            Some(FilingStatusCode::MarriedFilingSeparately),
            vec![w2(dec!(140000)), w2(dec!(70000))],
        );

        let first = f1040.lines();
        let second = f1040.lines();

        assert_eq!(first, second);
    }
}
