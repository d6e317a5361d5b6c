use std::fmt;

use serde::{Deserialize, Serialize};

/// Filing status checked at the top of Form 1040.
///
/// A return whose status has not been supplied yet carries
/// `Option<FilingStatusCode>::None`; every line that depends on the status
/// is then undefined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum FilingStatusCode {
    Single,
    MarriedFilingJointly,
    MarriedFilingSeparately,
    HeadOfHousehold,
    QualifyingSurvivingSpouse,
}

impl FilingStatusCode {
    /// Every filing status, in the order they appear on the form.
    pub const ALL: [FilingStatusCode; 5] = [
        Self::Single,
        Self::MarriedFilingJointly,
        Self::MarriedFilingSeparately,
        Self::HeadOfHousehold,
        Self::QualifyingSurvivingSpouse,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Single => "S",
            Self::MarriedFilingJointly => "MFJ",
            Self::MarriedFilingSeparately => "MFS",
            Self::HeadOfHousehold => "HOH",
            Self::QualifyingSurvivingSpouse => "QSS",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Single => "Single",
            Self::MarriedFilingJointly => "Married filing jointly",
            Self::MarriedFilingSeparately => "Married filing separately",
            Self::HeadOfHousehold => "Head of household",
            Self::QualifyingSurvivingSpouse => "Qualifying surviving spouse",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "S" => Some(Self::Single),
            "MFJ" => Some(Self::MarriedFilingJointly),
            "MFS" => Some(Self::MarriedFilingSeparately),
            "HOH" => Some(Self::HeadOfHousehold),
            "QSS" => Some(Self::QualifyingSurvivingSpouse),
            _ => None,
        }
    }
}

impl fmt::Display for FilingStatusCode {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn parse_round_trips_every_code() {
        for status in FilingStatusCode::ALL {
            assert_eq!(FilingStatusCode::parse(status.as_str()), Some(status));
        }
    }

    #[test]
    fn parse_rejects_unknown_code() {
        assert_eq!(FilingStatusCode::parse("JOINT"), None);
        assert_eq!(FilingStatusCode::parse(""), None);
    }

    #[test]
    fn display_uses_short_code() {
        assert_eq!(FilingStatusCode::HeadOfHousehold.to_string(), "HOH");
    }
}
