//! Form field identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::KycError;

/// Identifies one input of the KYC form.
///
/// The well-known fields carry their own normalisation and error wording;
/// any other identifier is kept verbatim in [`FieldId::Other`].
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum FieldId {
    FullName,
    Email,
    Phone,
    DateOfBirth,
    Address,
    City,
    State,
    Pincode,
    /// Primary national ID (12-digit Aadhar number).
    AadharNumber,
    /// Secondary national ID (PAN, `ABCDE1234F`).
    PanNumber,
    AccountNumber,
    ConfirmAccountNumber,
    /// Bank branch routing code.
    IfscCode,
    Other(String),
}

const KNOWN: [(&str, FieldId); 13] = [
    ("full_name", FieldId::FullName),
    ("email", FieldId::Email),
    ("phone", FieldId::Phone),
    ("date_of_birth", FieldId::DateOfBirth),
    ("address", FieldId::Address),
    ("city", FieldId::City),
    ("state", FieldId::State),
    ("pincode", FieldId::Pincode),
    ("aadhar_number", FieldId::AadharNumber),
    ("pan_number", FieldId::PanNumber),
    ("account_number", FieldId::AccountNumber),
    ("confirm_account_number", FieldId::ConfirmAccountNumber),
    ("ifsc_code", FieldId::IfscCode),
];

impl FieldId {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Other(name) => name,
            known => KNOWN
                .iter()
                .find(|(_, id)| id == known)
                .map(|(name, _)| *name)
                .unwrap_or_default(),
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Other(_))
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldId {
    type Err = KycError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(KycError::EmptyFieldId);
        }
        Ok(KNOWN
            .iter()
            .find(|(name, _)| *name == s)
            .map(|(_, id)| id.clone())
            .unwrap_or_else(|| Self::Other(s.to_string())))
    }
}

impl TryFrom<String> for FieldId {
    type Error = KycError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<FieldId> for String {
    fn from(id: FieldId) -> Self {
        id.as_str().to_string()
    }
}
