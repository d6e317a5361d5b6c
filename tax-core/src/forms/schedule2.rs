//! Schedule 2, Additional Taxes.
//!
//! Part II, line 8 carries Additional Medicare Tax from Form 8959; line 21
//! totals Part II and flows to Form 1040 line 23.

use std::rc::Rc;

use rust_decimal::Decimal;

use crate::calculations::common::sum_defined;

use super::{Form, Form8959, FormKind, LineCache, Value};

#[derive(Debug)]
pub struct Schedule2 {
    f8959: Option<Rc<Form8959>>,
    lines: LineCache,
}

impl Schedule2 {
    /// `f8959` is the return's Form 8959 if it is attached.
    pub fn new(f8959: Option<Rc<Form8959>>) -> Self {
        Self {
            f8959,
            lines: LineCache::new(FormKind::Schedule2),
        }
    }

    pub fn is_needed(&self) -> bool {
        self.l21().is_some_and(|total| total > Decimal::ZERO)
    }

    pub fn l8(&self) -> Value {
        self.lines.get("8", || self.f8959.as_ref().and_then(|f| f.l18()))
    }

    pub fn l21(&self) -> Value {
        self.lines.get("21", || sum_defined([self.l8()]))
    }
}

impl Form for Schedule2 {
    fn kind(&self) -> FormKind {
        FormKind::Schedule2
    }

    fn lines(&self) -> Vec<(&'static str, Value)> {
        vec![("8", self.l8()), ("21", self.l21())]
    }
}
