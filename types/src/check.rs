//! The verification checks tracked for a form session.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::KycError;

/// One entry of the verification record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerificationCheck {
    /// Personal details validated.
    PersonalInfo,
    /// Identity numbers entered and every document slot uploaded.
    Documents,
    /// A live photo has been captured.
    Photo,
    /// The device check reported success.
    Device,
    /// The location check reported success.
    Location,
}

impl VerificationCheck {
    /// All checks in display order.
    pub const ALL: [VerificationCheck; 5] = [
        Self::PersonalInfo,
        Self::Documents,
        Self::Photo,
        Self::Device,
        Self::Location,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PersonalInfo => "personal_info",
            Self::Documents => "documents",
            Self::Photo => "photo",
            Self::Device => "device",
            Self::Location => "location",
        }
    }
}

impl fmt::Display for VerificationCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VerificationCheck {
    type Err = KycError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| KycError::UnknownCheck(s.to_string()))
    }
}
