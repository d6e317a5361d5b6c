//! Pure formulas the form lines are built from.
//!
//! Nothing in here is memoized or knows about forms; each function maps
//! inputs and policy constants to an amount, or to `None` when the rule does
//! not apply.

pub mod brackets;
pub mod common;
pub mod fica;

pub use brackets::tax_from_brackets;
