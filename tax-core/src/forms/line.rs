//! Memoized line storage.
//!
//! A line is computed the first time it is read and cached for the life of
//! the form that owns it. Reading a line while it is still being computed
//! means two formulas read each other; that is a bug in the formulas, so it
//! panics with the name of the line instead of returning a wrong number.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;

use rust_decimal::Decimal;
use tracing::trace;

use super::FormKind;

/// A line's value: `None` when the line does not apply.
pub type Value = Option<Decimal>;

/// A line on a specific form, e.g. Schedule 3 line 10.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LineId {
    pub form: FormKind,
    pub line: &'static str,
}

impl LineId {
    pub fn new(
        form: FormKind,
        line: &'static str,
    ) -> Self {
        Self { form, line }
    }
}

impl fmt::Display for LineId {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "{} line {}", self.form, self.line)
    }
}

#[derive(Debug, Clone, Copy)]
enum Slot<T> {
    Pending,
    Evaluating,
    Ready(T),
}

/// A single lazily computed value.
///
/// Used for values that are not plain amounts, such as the decision whether
/// a subordinate form is attached.
#[derive(Debug)]
pub struct Memo<T> {
    form: FormKind,
    name: &'static str,
    slot: RefCell<Slot<T>>,
}

impl<T: Clone> Memo<T> {
    pub fn new(
        form: FormKind,
        name: &'static str,
    ) -> Self {
        Self {
            form,
            name,
            slot: RefCell::new(Slot::Pending),
        }
    }

    /// Returns the cached value, computing it with `compute` on first use.
    ///
    /// # Panics
    ///
    /// Panics if `compute` reads this memo again before returning.
    pub fn get_or_compute(
        &self,
        compute: impl FnOnce() -> T,
    ) -> T {
        {
            let mut slot = self.slot.borrow_mut();
            match std::mem::replace(&mut *slot, Slot::Evaluating) {
                Slot::Ready(value) => {
                    *slot = Slot::Ready(value.clone());
                    return value;
                }
                Slot::Evaluating => panic!(
                    "cycle detected while evaluating {} on {}",
                    self.name, self.form
                ),
                Slot::Pending => {}
            }
        }

        let value = compute();
        *self.slot.borrow_mut() = Slot::Ready(value.clone());
        value
    }

    pub fn is_computed(&self) -> bool {
        matches!(*self.slot.borrow(), Slot::Ready(_))
    }
}

/// Cached line values of one form instance, keyed by line number.
#[derive(Debug)]
pub struct LineCache {
    form: FormKind,
    lines: RefCell<HashMap<&'static str, Slot<Value>>>,
}

impl LineCache {
    pub fn new(form: FormKind) -> Self {
        Self {
            form,
            lines: RefCell::new(HashMap::new()),
        }
    }

    /// Returns the cached value of `line`, computing it on first read.
    ///
    /// # Panics
    ///
    /// Panics if `compute` reads `line` on this form again before returning.
    pub fn get(
        &self,
        line: &'static str,
        compute: impl FnOnce() -> Value,
    ) -> Value {
        {
            let mut lines = self.lines.borrow_mut();
            match lines.get(line).copied() {
                Some(Slot::Ready(value)) => return value,
                Some(Slot::Evaluating) => panic!(
                    "cycle detected while evaluating {}",
                    LineId::new(self.form, line)
                ),
                Some(Slot::Pending) | None => {
                    lines.insert(line, Slot::Evaluating);
                }
            }
        }

        let value = compute();
        trace!(form = %self.form, line, value = ?value, "computed line");
        self.lines.borrow_mut().insert(line, Slot::Ready(value));
        value
    }

    /// Number of lines computed so far.
    pub fn computed_count(&self) -> usize {
        self.lines
            .borrow()
            .values()
            .filter(|slot| matches!(slot, Slot::Ready(_)))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn line_cache_computes_once() {
        let cache = LineCache::new(FormKind::Schedule3);
        let calls = Cell::new(0);

        let first = cache.get("10", || {
            calls.set(calls.get() + 1);
            Some(dec!(467.60))
        });
        let second = cache.get("10", || {
            calls.set(calls.get() + 1);
            Some(dec!(0))
        });

        assert_eq!(first, Some(dec!(467.60)));
        assert_eq!(second, Some(dec!(467.60)));
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn line_cache_caches_undefined() {
        let cache = LineCache::new(FormKind::Schedule3);
        let calls = Cell::new(0);

        for _ in 0..3 {
            let value = cache.get("10", || {
                calls.set(calls.get() + 1);
                None
            });
            assert_eq!(value, None);
        }

        assert_eq!(calls.get(), 1);
        assert_eq!(cache.computed_count(), 1);
    }

    #[test]
    fn line_cache_allows_reading_other_lines_while_computing() {
        let cache = LineCache::new(FormKind::Form8959);

        let line7 = cache.get("7", || {
            let line6 = cache.get("6", || Some(dec!(1000)));
            line6.map(|amount| amount * dec!(0.009))
        });

        assert_eq!(line7, Some(dec!(9.000)));
        assert_eq!(cache.computed_count(), 2);
    }

    #[test]
    #[should_panic(expected = "cycle detected while evaluating 8959 line 6")]
    fn line_cache_panics_on_self_reference() {
        let cache = LineCache::new(FormKind::Form8959);

        cache.get("6", || cache.get("6", || Some(dec!(1))));
    }

    #[test]
    #[should_panic(expected = "cycle detected while evaluating Schedule 2 line 8")]
    fn line_cache_panics_on_mutual_reference() {
        let cache = LineCache::new(FormKind::Schedule2);

        cache.get("8", || cache.get("21", || cache.get("8", || None)));
    }

    #[test]
    fn memo_computes_once() {
        let memo = Memo::new(FormKind::Form1040, "Schedule 2 attachment");
        let calls = Cell::new(0);

        assert!(!memo.is_computed());
        for _ in 0..2 {
            let value = memo.get_or_compute(|| {
                calls.set(calls.get() + 1);
                Some("attached")
            });
            assert_eq!(value, Some("attached"));
        }

        assert!(memo.is_computed());
        assert_eq!(calls.get(), 1);
    }

    #[test]
    #[should_panic(expected = "cycle detected while evaluating Schedule 3 attachment on 1040")]
    fn memo_panics_on_reentrant_read() {
        let memo: Memo<bool> = Memo::new(FormKind::Form1040, "Schedule 3 attachment");

        memo.get_or_compute(|| memo.get_or_compute(|| true));
    }

    #[test]
    fn line_id_display_names_form_and_line() {
        let id = LineId::new(FormKind::Schedule3, "10");

        assert_eq!(id.to_string(), "Schedule 3 line 10");
    }
}
