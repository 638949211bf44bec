//! Field validation rules.

use std::collections::HashMap;

use kyc_types::FieldId;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::pattern::Pattern;

/// Message used when a pattern fails and neither the field nor the rule supplies one.
pub const DEFAULT_PATTERN_MESSAGE: &str = "Invalid format";

/// Validation rule bound to one field.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldRule {
    pub field: FieldId,
    pub required: bool,
    #[serde(default)]
    pub pattern: Option<Pattern>,
    /// Fallback pattern message for fields without a built-in one.
    #[serde(default)]
    pub title: Option<String>,
}

impl FieldRule {
    pub fn required(field: FieldId) -> Self {
        Self {
            field,
            required: true,
            pattern: None,
            title: None,
        }
    }

    pub fn optional(field: FieldId) -> Self {
        Self {
            required: false,
            ..Self::required(field)
        }
    }

    pub fn with_pattern(mut self, pattern: Pattern) -> Self {
        self.pattern = Some(pattern);
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Check a value. Required-ness is checked before the pattern and only
    /// the first violation is reported.
    pub fn check(&self, value: &str) -> Result<(), ValidationError> {
        if value.is_empty() {
            return if self.required {
                Err(ValidationError::RequiredFieldMissing)
            } else {
                Ok(())
            };
        }
        match self.pattern {
            Some(pattern) if !pattern.matches(value) => Err(ValidationError::PatternMismatch {
                message: self.pattern_message(),
            }),
            _ => Ok(()),
        }
    }

    /// The message shown when the pattern does not match.
    pub fn pattern_message(&self) -> String {
        let builtin = match self.field {
            FieldId::FullName => Some("Please enter a valid name (letters only)"),
            FieldId::Email => Some("Please enter a valid email address"),
            FieldId::Phone => Some("Please enter a valid 10-digit phone number"),
            FieldId::AadharNumber => Some("Please enter a valid 12-digit Aadhar number"),
            FieldId::PanNumber => Some("Please enter a valid PAN number (ABCDE1234F format)"),
            FieldId::Pincode => Some("Please enter a valid 6-digit PIN code"),
            _ => None,
        };
        builtin
            .or(self.title.as_deref())
            .unwrap_or(DEFAULT_PATTERN_MESSAGE)
            .to_string()
    }
}

/// Rules keyed by field. At most one rule per field.
#[derive(Clone, Debug, Default)]
pub struct RuleTable {
    rules: HashMap<FieldId, FieldRule>,
}

impl RuleTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a rule, returning the rule it replaced for the same field.
    pub fn insert(&mut self, rule: FieldRule) -> Option<FieldRule> {
        self.rules.insert(rule.field.clone(), rule)
    }

    pub fn with(mut self, rule: FieldRule) -> Self {
        self.insert(rule);
        self
    }

    pub fn get(&self, field: &FieldId) -> Option<&FieldRule> {
        self.rules.get(field)
    }

    pub fn remove(&mut self, field: &FieldId) -> Option<FieldRule> {
        self.rules.remove(field)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// The rules of the KYC form.
    pub fn kyc_default() -> Self {
        // Normalisation already caps account numbers at 18 digits.
        let account = Pattern::Digits { min: 1, max: 18 };
        Self::new()
            .with(FieldRule::required(FieldId::FullName).with_pattern(Pattern::Letters))
            .with(FieldRule::required(FieldId::Email).with_pattern(Pattern::Email))
            .with(
                FieldRule::required(FieldId::Phone).with_pattern(Pattern::Digits { min: 10, max: 10 }),
            )
            .with(FieldRule::required(FieldId::DateOfBirth))
            .with(FieldRule::required(FieldId::Address))
            .with(FieldRule::required(FieldId::City))
            .with(FieldRule::required(FieldId::State))
            .with(
                FieldRule::required(FieldId::Pincode).with_pattern(Pattern::Digits { min: 6, max: 6 }),
            )
            .with(
                FieldRule::required(FieldId::AadharNumber)
                    .with_pattern(Pattern::GroupedDigits { groups: 3, width: 4 }),
            )
            .with(FieldRule::required(FieldId::PanNumber).with_pattern(Pattern::Pan))
            .with(
                FieldRule::required(FieldId::AccountNumber)
                    .with_pattern(account)
                    .with_title("Please enter a valid account number"),
            )
            .with(
                FieldRule::required(FieldId::ConfirmAccountNumber)
                    .with_pattern(account)
                    .with_title("Please enter a valid account number"),
            )
            .with(
                FieldRule::required(FieldId::IfscCode)
                    .with_pattern(Pattern::Ifsc)
                    .with_title("Please enter a valid IFSC code"),
            )
    }
}
