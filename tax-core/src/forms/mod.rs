//! The form computation graph.
//!
//! A return is a [`Form1040`] built from a filing status, a list of W-2s and
//! a [`TaxYearPolicy`](crate::TaxYearPolicy). Every line is computed on
//! first read and cached on the form that owns it; a line that does not
//! apply is `None`, never zero. Subordinate forms are built on first use
//! and kept only when they must be attached, and [`Form1040::attachments`]
//! lists the kept ones in filing order.

mod attachments;
mod f1040;
mod f8959;
mod form;
mod graph;
mod inputs;
mod line;
mod schedule2;
mod schedule3;

pub use attachments::{ATTACHMENT_RULES, Attachment, AttachmentRule};
pub use f1040::Form1040;
pub use f8959::Form8959;
pub use form::{Form, FormKind};
pub use graph::{FormGraphError, evaluation_order, topo_order};
pub use inputs::ReturnInputs;
pub use line::{LineCache, LineId, Memo, Value};
pub use schedule2::Schedule2;
pub use schedule3::Schedule3;
