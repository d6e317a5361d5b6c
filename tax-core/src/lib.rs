//! Federal individual return computation.
//!
//! [`models`] holds the inputs and per-year policy tables, [`calculations`]
//! the pure formulas, and [`forms`] the lazily evaluated form graph rooted at
//! [`Form1040`].

pub mod calculations;
pub mod forms;
pub mod models;

pub use forms::{
    Attachment, Form, Form1040, Form8959, FormGraphError, FormKind, ReturnInputs, Schedule2,
    Schedule3, Value,
};
pub use models::*;
