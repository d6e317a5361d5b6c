//! Schedule 3, Additional Credits and Payments.
//!
//! Part II, line 10 is the excess Social Security withholding credit; line
//! 15 totals Part II and flows to Form 1040 line 31.

use std::rc::Rc;

use rust_decimal::Decimal;

use crate::calculations::common::sum_defined;
use crate::calculations::fica;

use super::{Form, FormKind, LineCache, ReturnInputs, Value};

#[derive(Debug)]
pub struct Schedule3 {
    inputs: Rc<ReturnInputs>,
    lines: LineCache,
}

impl Schedule3 {
    pub fn new(inputs: Rc<ReturnInputs>) -> Self {
        Self {
            inputs,
            lines: LineCache::new(FormKind::Schedule3),
        }
    }

    pub fn is_needed(&self) -> bool {
        self.l15().is_some_and(|total| total > Decimal::ZERO)
    }

    /// Excess Social Security tax withheld by two or more employers.
    ///
    /// See [`fica::excess_ss_withholding`] for when this applies.
    pub fn l10(&self) -> Value {
        self.lines.get("10", || {
            fica::excess_ss_withholding(
                self.inputs.fica(),
                self.inputs.wages(),
                self.inputs.ss_withholding(),
                self.inputs.w2s(),
            )
        })
    }

    pub fn l15(&self) -> Value {
        self.lines.get("15", || sum_defined([self.l10()]))
    }
}

impl Form for Schedule3 {
    fn kind(&self) -> FormKind {
        FormKind::Schedule3
    }

    fn lines(&self) -> Vec<(&'static str, Value)> {
        vec![("10", self.l10()), ("15", self.l15())]
    }
}
