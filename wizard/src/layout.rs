//! The ordered steps of a wizard and the fields each one collects.

use std::collections::HashSet;

use kyc_types::{FieldId, StepKind};

use crate::error::WizardError;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StepSpec {
    pub kind: StepKind,
    pub fields: Vec<FieldId>,
}

impl StepSpec {
    pub fn new(kind: StepKind, fields: impl IntoIterator<Item = FieldId>) -> Self {
        Self {
            kind,
            fields: fields.into_iter().collect(),
        }
    }
}

/// Steps numbered `1..=len()`.
#[derive(Clone, Debug)]
pub struct StepLayout {
    steps: Vec<StepSpec>,
}

impl StepLayout {
    pub fn new(steps: Vec<StepSpec>) -> Result<Self, WizardError> {
        if steps.is_empty() {
            return Err(WizardError::EmptyLayout);
        }
        let mut seen = HashSet::new();
        for field in steps.iter().flat_map(|s| &s.fields) {
            if !seen.insert(field) {
                return Err(WizardError::FieldInMultipleSteps(field.clone()));
            }
        }
        Ok(Self { steps })
    }

    /// The five-step KYC form.
    pub fn kyc_default() -> Self {
        Self {
            steps: vec![
                StepSpec::new(
                    StepKind::PersonalInfo,
                    [
                        FieldId::FullName,
                        FieldId::Email,
                        FieldId::Phone,
                        FieldId::DateOfBirth,
                        FieldId::Address,
                        FieldId::City,
                        FieldId::State,
                        FieldId::Pincode,
                    ],
                ),
                StepSpec::new(
                    StepKind::Documents,
                    [FieldId::AadharNumber, FieldId::PanNumber],
                ),
                StepSpec::new(StepKind::Photo, Vec::<FieldId>::new()),
                StepSpec::new(StepKind::Device, Vec::<FieldId>::new()),
                StepSpec::new(
                    StepKind::Location,
                    [
                        FieldId::AccountNumber,
                        FieldId::ConfirmAccountNumber,
                        FieldId::IfscCode,
                    ],
                ),
            ],
        }
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Always `false`; construction rejects empty layouts.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// The step at 1-based position `step`.
    pub fn get(&self, step: usize) -> Option<&StepSpec> {
        step.checked_sub(1).and_then(|i| self.steps.get(i))
    }

    /// 1-based position of the step collecting `field`.
    pub fn step_of(&self, field: &FieldId) -> Option<usize> {
        self.steps
            .iter()
            .position(|s| s.fields.contains(field))
            .map(|i| i + 1)
    }

    /// 1-based position of the first step of `kind`.
    pub fn position_of(&self, kind: StepKind) -> Option<usize> {
        self.steps.iter().position(|s| s.kind == kind).map(|i| i + 1)
    }

    pub fn iter(&self) -> impl Iterator<Item = &StepSpec> {
        self.steps.iter()
    }
}
