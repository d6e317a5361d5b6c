use std::fmt;

use serde::{Deserialize, Serialize};

use super::Value;

/// The forms this engine knows how to compute.
///
/// The derived ordering follows the IRS attachment sequence printed in the
/// top-right corner of each form, which is the order attachments are filed
/// in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum FormKind {
    Form1040,
    Schedule2,
    Schedule3,
    Form8959,
}

impl FormKind {
    pub const ALL: [FormKind; 4] = [
        Self::Form1040,
        Self::Schedule2,
        Self::Schedule3,
        Self::Form8959,
    ];

    /// Official designation, as printed on the form.
    pub fn designation(&self) -> &'static str {
        match self {
            Self::Form1040 => "1040",
            Self::Schedule2 => "Schedule 2",
            Self::Schedule3 => "Schedule 3",
            Self::Form8959 => "8959",
        }
    }

    /// IRS attachment sequence number. Form 1040 itself has none and sorts
    /// first.
    pub fn attachment_sequence(&self) -> u8 {
        match self {
            Self::Form1040 => 0,
            Self::Schedule2 => 2,
            Self::Schedule3 => 3,
            Self::Form8959 => 71,
        }
    }

    /// Forms whose lines this form's formulas read.
    ///
    /// Raw return inputs (W-2s, filing status, policy tables) are not forms
    /// and are readable from everywhere. This table is checked for cycles by
    /// [`evaluation_order`](super::evaluation_order).
    pub fn reads_from(&self) -> &'static [FormKind] {
        match self {
            Self::Form1040 => &[Self::Schedule2, Self::Schedule3, Self::Form8959],
            Self::Schedule2 => &[Self::Form8959],
            Self::Schedule3 => &[],
            Self::Form8959 => &[],
        }
    }
}

impl fmt::Display for FormKind {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.designation())
    }
}

/// Read access to a computed form, the surface a renderer or filer consumes.
pub trait Form {
    fn kind(&self) -> FormKind;

    /// Every line the form defines, in form order, with its computed value.
    fn lines(&self) -> Vec<(&'static str, Value)>;

    /// Value of the named line, or `None` if the form has no such line.
    fn line(
        &self,
        name: &str,
    ) -> Option<Value> {
        self.lines()
            .into_iter()
            .find(|(line, _)| *line == name)
            .map(|(_, value)| value)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn ordering_follows_attachment_sequence() {
        let mut by_sequence = FormKind::ALL;
        by_sequence.sort_by_key(FormKind::attachment_sequence);

        assert_eq!(by_sequence, FormKind::ALL);
    }

    #[test]
    fn display_uses_designation() {
        assert_eq!(FormKind::Schedule3.to_string(), "Schedule 3");
        assert_eq!(FormKind::Form8959.to_string(), "8959");
    }

    #[test]
    fn no_form_reads_from_itself() {
        for kind in FormKind::ALL {
            assert!(!kind.reads_from().contains(&kind), "{kind} reads itself");
        }
    }
}
