//! Selection of the subordinate forms filed with a return.
//!
//! Each optional form has one rule in [`ATTACHMENT_RULES`]. A rule asks
//! Form 1040 for the form; Form 1040 builds the candidate once, keeps it
//! only if the form's trigger holds (its `is_needed`), and memoizes the
//! decision. The resolver then orders what was kept by attachment sequence,
//! so the result does not depend on which lines happened to be read first.

use std::rc::Rc;

use tracing::debug;

use super::{Form, Form1040, Form8959, FormKind, Schedule2, Schedule3, Value};

/// A subordinate form attached to a return.
#[derive(Debug, Clone)]
pub enum Attachment {
    Schedule2(Rc<Schedule2>),
    Schedule3(Rc<Schedule3>),
    Form8959(Rc<Form8959>),
}

impl Attachment {
    pub fn form(&self) -> &dyn Form {
        match self {
            Self::Schedule2(form) => &**form,
            Self::Schedule3(form) => &**form,
            Self::Form8959(form) => &**form,
        }
    }
}

impl Form for Attachment {
    fn kind(&self) -> FormKind {
        self.form().kind()
    }

    fn lines(&self) -> Vec<(&'static str, Value)> {
        self.form().lines()
    }
}

/// One optional form and how to obtain it from the return.
#[derive(Debug, Clone, Copy)]
pub struct AttachmentRule {
    pub kind: FormKind,
    resolve: fn(&Form1040) -> Option<Attachment>,
}

impl AttachmentRule {
    /// The attached form, or `None` if its trigger does not hold.
    pub fn resolve(
        &self,
        f1040: &Form1040,
    ) -> Option<Attachment> {
        (self.resolve)(f1040)
    }
}

fn schedule2(f1040: &Form1040) -> Option<Attachment> {
    f1040.schedule2().map(Attachment::Schedule2)
}

fn schedule3(f1040: &Form1040) -> Option<Attachment> {
    f1040.schedule3().map(Attachment::Schedule3)
}

fn f8959(f1040: &Form1040) -> Option<Attachment> {
    f1040.f8959().map(Attachment::Form8959)
}

/// Every form Form 1040 may attach.
pub const ATTACHMENT_RULES: [AttachmentRule; 3] = [
    AttachmentRule {
        kind: FormKind::Form8959,
        resolve: f8959,
    },
    AttachmentRule {
        kind: FormKind::Schedule3,
        resolve: schedule3,
    },
    AttachmentRule {
        kind: FormKind::Schedule2,
        resolve: schedule2,
    },
];

/// Evaluates every rule and returns the attached forms in attachment
/// sequence order.
pub fn resolve(f1040: &Form1040) -> Vec<Attachment> {
    let mut attached: Vec<Attachment> = ATTACHMENT_RULES
        .iter()
        .filter_map(|rule| rule.resolve(f1040))
        .collect();
    attached.sort_by_key(Attachment::kind);

    debug!(
        attached = ?attached.iter().map(Attachment::kind).collect::<Vec<_>>(),
        "Resolved attachments"
    );
    attached
}
