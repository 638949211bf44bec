//! Step kinds of the verification wizard.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::{KycError, VerificationCheck};

/// What a wizard step collects. Decides which record entry a valid step may set.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepKind {
    PersonalInfo,
    Documents,
    Photo,
    Device,
    Location,
}

impl StepKind {
    pub const ALL: [StepKind; 5] = [
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

    /// Heading shown above the step.
    pub fn title(&self) -> &'static str {
        match self {
            Self::PersonalInfo => "Personal Info",
            Self::Documents => "Documents",
            Self::Photo => "Photo",
            Self::Device => "Device",
            Self::Location => "Location",
        }
    }

    /// The record entry associated with this step.
    ///
    /// Only personal info, documents and photo are set by step validation;
    /// device and location are set by their collaborators.
    pub fn check(&self) -> VerificationCheck {
        match self {
            Self::PersonalInfo => VerificationCheck::PersonalInfo,
            Self::Documents => VerificationCheck::Documents,
            Self::Photo => VerificationCheck::Photo,
            Self::Device => VerificationCheck::Device,
            Self::Location => VerificationCheck::Location,
        }
    }
}

impl fmt::Display for StepKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

impl FromStr for StepKind {
    type Err = KycError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| KycError::UnknownStepKind(s.to_string()))
    }
}
