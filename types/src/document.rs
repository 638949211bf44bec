//! Document upload slots.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::KycError;

/// A fixed slot the applicant must fill with an uploaded image.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentSlot {
    /// Front side of the primary national ID (Aadhar).
    AadharFront,
    /// Back side of the primary national ID.
    AadharBack,
    /// The secondary ID card (PAN).
    PanCard,
}

impl DocumentSlot {
    pub const ALL: [DocumentSlot; 3] = [Self::AadharFront, Self::AadharBack, Self::PanCard];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AadharFront => "aadhar_front",
            Self::AadharBack => "aadhar_back",
            Self::PanCard => "pan_card",
        }
    }

    /// Label used in upload notifications.
    pub fn label(&self) -> &'static str {
        match self {
            Self::AadharFront => "Aadhar Front",
            Self::AadharBack => "Aadhar Back",
            Self::PanCard => "PAN Card",
        }
    }
}

impl fmt::Display for DocumentSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DocumentSlot {
    type Err = KycError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|d| d.as_str() == s)
            .ok_or_else(|| KycError::UnknownDocumentSlot(s.to_string()))
    }
}
