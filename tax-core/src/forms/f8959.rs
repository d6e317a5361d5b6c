//! Form 8959, Additional Medicare Tax.
//!
//! Only Part I (Medicare wages) and Part V (withholding reconciliation) are
//! computed; the self-employment and railroad parts contribute nothing.
//!
//! | Line | Description |
//! |------|-------------|
//! | 1    | Medicare wages from all W-2s |
//! | 4    | Total Medicare wages (line 1) |
//! | 5    | Threshold for the filing status |
//! | 6    | Line 4 minus line 5, not less than zero |
//! | 7    | Additional Medicare Tax on wages (line 6 × 0.9%) |
//! | 18   | Total Additional Medicare Tax, to Schedule 2 line 8 |
//! | 19   | Medicare tax withheld from all W-2s |
//! | 21   | Regular Medicare tax on the threshold amount |
//! | 22   | Additional Medicare Tax withholding (line 19 − line 21, not less than zero) |
//! | 24   | Total additional withholding, to Form 1040 line 25c |

use std::rc::Rc;

use rust_decimal::Decimal;

use crate::calculations::fica;

use super::{Form, FormKind, LineCache, ReturnInputs, Value};

#[derive(Debug)]
pub struct Form8959 {
    inputs: Rc<ReturnInputs>,
    lines: LineCache,
}

impl Form8959 {
    pub fn new(inputs: Rc<ReturnInputs>) -> Self {
        Self {
            inputs,
            lines: LineCache::new(FormKind::Form8959),
        }
    }

    /// Attached when any wages are over the threshold. Undefined when the
    /// filing status is unknown, so it is never attached then.
    pub fn is_needed(&self) -> bool {
        self.l6().is_some_and(|wages| wages > Decimal::ZERO)
    }

    pub fn l1(&self) -> Value {
        self.lines.get("1", || Some(self.inputs.wages()))
    }

    pub fn l4(&self) -> Value {
        self.lines.get("4", || self.l1())
    }

    pub fn l5(&self) -> Value {
        self.lines.get("5", || self.inputs.additional_medicare_threshold())
    }

    pub fn l6(&self) -> Value {
        self.lines.get("6", || {
            Some(fica::wages_over_threshold(self.l4()?, self.l5()?))
        })
    }

    pub fn l7(&self) -> Value {
        self.lines.get("7", || {
            Some(fica::additional_medicare_tax(self.inputs.fica(), self.l6()?))
        })
    }

    pub fn l18(&self) -> Value {
        self.lines.get("18", || self.l7())
    }

    pub fn l19(&self) -> Value {
        self.lines.get("19", || Some(self.inputs.medicare_withholding()))
    }

    /// Regular Medicare withholding is measured against the threshold rather
    /// than total Medicare wages, so withholding on wages above the threshold
    /// all counts as additional.
    pub fn l21(&self) -> Value {
        self.lines.get("21", || {
            Some(fica::regular_medicare_withholding(self.inputs.fica(), self.l5()?))
        })
    }

    pub fn l22(&self) -> Value {
        self.lines.get("22", || {
            Some(fica::additional_medicare_withheld(self.l19()?, self.l21()?))
        })
    }

    pub fn l24(&self) -> Value {
        self.lines.get("24", || self.l22())
    }
}

impl Form for Form8959 {
    fn kind(&self) -> FormKind {
        FormKind::Form8959
    }

    fn lines(&self) -> Vec<(&'static str, Value)> {
        vec![
            ("1", self.l1()),
            ("4", self.l4()),
            ("5", self.l5()),
            ("6", self.l6()),
            ("7", self.l7()),
            ("18", self.l18()),
            ("19", self.l19()),
            ("21", self.l21()),
            ("22", self.l22()),
            ("24", self.l24()),
        ]
    }
}
