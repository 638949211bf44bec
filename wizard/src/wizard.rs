//! The verification wizard state machine.
//!
//! Connects the step layout, the rule table, document uploads and collaborator
//! signals into one gated form session.

use std::collections::BTreeMap;

use kyc_types::{DocumentSlot, FieldId, StepKind, VerificationCheck};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{DocumentsIncomplete, ValidationError, WizardError};
use crate::feedback::FieldFeedback;
use crate::layout::StepLayout;
use crate::normalize::normalize;
use crate::record::{DocumentUploadState, VerificationRecord};
use crate::rules::RuleTable;

/// Message attached to a confirmation field that differs from its primary field.
pub const ACCOUNT_MISMATCH_MESSAGE: &str = "Account numbers do not match";

/// Inbound signals from the presentation layer and collaborators.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "signal", rename_all = "snake_case")]
pub enum WizardSignal {
    FieldChanged { field: FieldId, value: String },
    AdvanceRequested,
    RetreatRequested,
    SubmitRequested,
    DocumentSlotChanged { slot: DocumentSlot, present: bool },
    PhotoCaptured { captured: bool },
    DeviceVerified { verified: bool },
    LocationVerified { verified: bool },
}

/// Events queued for the presentation and transport layers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WizardEvent {
    /// The active step moved.
    StepChanged { from: usize, to: usize },
    /// A field was marked invalid.
    FieldInvalid {
        field: FieldId,
        error: ValidationError,
    },
    /// The step as a whole could not be completed.
    StepBlocked { step: usize, error: ValidationError },
    /// A record entry became satisfied.
    CheckSatisfied { check: VerificationCheck },
    /// A record entry was unset.
    CheckRevoked { check: VerificationCheck },
    /// The final step validated; hand the payload to the transport layer.
    SubmissionReady(Submission),
}

/// Outcome of one validation pass over a step.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StepValidationResult {
    pub step: usize,
    pub valid: bool,
    /// Invalid fields only.
    pub errors: BTreeMap<FieldId, ValidationError>,
    /// Step-level block (documents cross-check).
    pub blocked: Option<ValidationError>,
}

impl StepValidationResult {
    fn passed(step: usize) -> Self {
        Self {
            step,
            valid: true,
            errors: BTreeMap::new(),
            blocked: None,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    pub fn error(&self, field: &FieldId) -> Option<&ValidationError> {
        self.errors.get(field)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AdvanceOutcome {
    Advanced { from: usize, to: usize },
    /// Validation failed; the step did not change.
    Blocked(StepValidationResult),
    /// Already on the last step; only `submit` leaves it.
    AtFinalStep,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    Submitted(Submission),
    Blocked(StepValidationResult),
}

/// The validated form handed to whatever transport sits outside the wizard.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Submission {
    pub values: BTreeMap<FieldId, String>,
    pub record: VerificationRecord,
}

/// Snapshot of everything a presentation layer renders.
#[derive(Clone, Debug, Serialize)]
pub struct WizardView {
    pub step: usize,
    pub step_count: usize,
    pub step_title: String,
    /// `true` for every step up to and including the current one.
    pub progress: Vec<bool>,
    pub errors: BTreeMap<FieldId, String>,
    pub step_error: Option<String>,
    pub record: VerificationRecord,
    pub documents: DocumentUploadState,
    pub announcements: Vec<String>,
    pub closed: bool,
}

/// One KYC form session.
pub struct VerificationWizard {
    layout: StepLayout,
    rules: RuleTable,
    current: usize,
    values: BTreeMap<FieldId, String>,
    /// Cross-field failures computed on input, independent of the rule table.
    custom_validity: BTreeMap<FieldId, ValidationError>,
    documents: DocumentUploadState,
    photo_captured: bool,
    record: VerificationRecord,
    feedback: FieldFeedback,
    closed: bool,
    pending_events: Vec<WizardEvent>,
}

impl VerificationWizard {
    pub fn new(layout: StepLayout, rules: RuleTable) -> Self {
        Self {
            layout,
            rules,
            current: 1,
            values: BTreeMap::new(),
            custom_validity: BTreeMap::new(),
            documents: DocumentUploadState::new(),
            photo_captured: false,
            record: VerificationRecord::new(),
            feedback: FieldFeedback::new(),
            closed: false,
            pending_events: Vec::new(),
        }
    }

    /// The five-step KYC form with its default rules.
    pub fn kyc() -> Self {
        Self::new(StepLayout::kyc_default(), RuleTable::kyc_default())
    }

    /// Dispatch one inbound signal.
    pub fn handle(&mut self, signal: WizardSignal) -> Result<(), WizardError> {
        match signal {
            WizardSignal::FieldChanged { field, value } => {
                self.field_changed(field, &value)?;
            }
            WizardSignal::AdvanceRequested => {
                self.advance()?;
            }
            WizardSignal::RetreatRequested => {
                self.retreat()?;
            }
            WizardSignal::SubmitRequested => {
                self.submit()?;
            }
            WizardSignal::DocumentSlotChanged { slot, present } => {
                self.document_slot_changed(slot, present)?;
            }
            WizardSignal::PhotoCaptured { captured } => self.photo_captured(captured)?,
            WizardSignal::DeviceVerified { verified } => self.device_verified(verified)?,
            WizardSignal::LocationVerified { verified } => self.location_verified(verified)?,
        }
        Ok(())
    }

    // ── Inbound signals ─────────────────────────────────────────────────

    /// Store a normalised value and clear the field's error marker.
    /// Returns the stored value.
    pub fn field_changed(&mut self, field: FieldId, raw: &str) -> Result<String, WizardError> {
        self.ensure_open()?;
        let value = normalize(&field, raw);
        if value != raw {
            debug!(%field, "normalised input");
        }
        self.values.insert(field.clone(), value.clone());
        if matches!(field, FieldId::AccountNumber | FieldId::ConfirmAccountNumber) {
            self.refresh_account_confirmation();
        }
        self.feedback.clear(&field);
        Ok(value)
    }

    /// Move to the next step if the current one validates.
    pub fn advance(&mut self) -> Result<AdvanceOutcome, WizardError> {
        self.ensure_open()?;
        if self.current == self.layout.len() {
            return Ok(AdvanceOutcome::AtFinalStep);
        }
        let result = self.validate(self.current);
        if !result.valid {
            debug!(step = self.current, errors = result.errors.len(), "advance blocked");
            return Ok(AdvanceOutcome::Blocked(result));
        }
        let from = self.current;
        self.current += 1;
        self.pending_events.push(WizardEvent::StepChanged {
            from,
            to: self.current,
        });
        debug!(from, to = self.current, "advanced");
        Ok(AdvanceOutcome::Advanced {
            from,
            to: self.current,
        })
    }

    /// Move to the previous step without validating. Returns `false` on step 1.
    pub fn retreat(&mut self) -> Result<bool, WizardError> {
        self.ensure_open()?;
        if self.current == 1 {
            return Ok(false);
        }
        let from = self.current;
        self.current -= 1;
        self.pending_events.push(WizardEvent::StepChanged {
            from,
            to: self.current,
        });
        Ok(true)
    }

    /// Validate the last step and, if it passes, close the session with a submission.
    pub fn submit(&mut self) -> Result<SubmitOutcome, WizardError> {
        self.ensure_open()?;
        let last = self.layout.len();
        if self.current != last {
            return Err(WizardError::NotAtFinalStep {
                current: self.current,
                last,
            });
        }
        let result = self.validate(last);
        if !result.valid {
            return Ok(SubmitOutcome::Blocked(result));
        }
        let submission = Submission {
            values: self.values.clone(),
            record: self.record.clone(),
        };
        self.closed = true;
        info!(
            fields = submission.values.len(),
            checks = submission.record.satisfied_count(),
            "form submitted"
        );
        self.pending_events
            .push(WizardEvent::SubmissionReady(submission.clone()));
        Ok(SubmitOutcome::Submitted(submission))
    }

    /// An upload collaborator added or removed a document.
    pub fn document_slot_changed(
        &mut self,
        slot: DocumentSlot,
        present: bool,
    ) -> Result<(), WizardError> {
        self.ensure_open()?;
        self.documents.set(slot, present);
        if present {
            self.check_documents_completion();
        } else {
            debug!(%slot, "document removed");
            self.revoke_check(VerificationCheck::Documents);
        }
        Ok(())
    }

    pub fn photo_captured(&mut self, captured: bool) -> Result<(), WizardError> {
        self.ensure_open()?;
        if captured {
            self.photo_captured = true;
            self.satisfy_check(VerificationCheck::Photo);
        } else {
            warn!("photo capture reported failure");
        }
        Ok(())
    }

    pub fn device_verified(&mut self, verified: bool) -> Result<(), WizardError> {
        self.ensure_open()?;
        if verified {
            self.satisfy_check(VerificationCheck::Device);
        } else {
            warn!("device verification reported failure");
        }
        Ok(())
    }

    pub fn location_verified(&mut self, verified: bool) -> Result<(), WizardError> {
        self.ensure_open()?;
        if verified {
            self.satisfy_check(VerificationCheck::Location);
        } else {
            warn!("location verification reported failure");
        }
        Ok(())
    }

    // ── Validation ──────────────────────────────────────────────────────

    /// Validate `step`, surface its errors and update the record.
    ///
    /// Steps outside the layout have nothing to check and pass.
    pub fn validate(&mut self, step: usize) -> StepValidationResult {
        let result = self.check_step(step);
        let Some(spec) = self.layout.get(step) else {
            return result;
        };
        let kind = spec.kind;

        self.feedback.clear_step(&spec.fields);
        for (field, error) in &result.errors {
            self.feedback.show_error(field.clone(), error.clone());
            self.pending_events.push(WizardEvent::FieldInvalid {
                field: field.clone(),
                error: error.clone(),
            });
        }
        if let Some(block) = &result.blocked {
            self.feedback.block_step(block.clone());
            self.pending_events.push(WizardEvent::StepBlocked {
                step,
                error: block.clone(),
            });
        }

        if result.valid {
            match kind {
                StepKind::PersonalInfo => self.satisfy_check(VerificationCheck::PersonalInfo),
                StepKind::Documents => self.satisfy_check(VerificationCheck::Documents),
                StepKind::Photo if self.photo_captured => {
                    self.satisfy_check(VerificationCheck::Photo)
                }
                _ => {}
            }
        }
        result
    }

    /// Validate `step` without touching feedback, record or events.
    ///
    /// Only required fields are checked. A field passing its rule is then
    /// held to its custom validity. At the documents step the documents
    /// cross-check must also hold.
    pub fn check_step(&self, step: usize) -> StepValidationResult {
        let Some(spec) = self.layout.get(step) else {
            return StepValidationResult::passed(step);
        };

        let mut errors = BTreeMap::new();
        for field in &spec.fields {
            let Some(rule) = self.rules.get(field) else {
                continue;
            };
            if !rule.required {
                continue;
            }
            let outcome = rule
                .check(self.value(field))
                .and_then(|()| match self.custom_validity.get(field) {
                    Some(error) => Err(error.clone()),
                    None => Ok(()),
                });
            if let Err(error) = outcome {
                errors.insert(field.clone(), error);
            }
        }

        let blocked = match spec.kind {
            StepKind::Documents => self
                .documents_cross_check()
                .err()
                .map(ValidationError::CrossCheckIncomplete),
            _ => None,
        };

        StepValidationResult {
            step,
            valid: errors.is_empty() && blocked.is_none(),
            errors,
            blocked,
        }
    }

    /// Both identity numbers entered and every document slot uploaded.
    pub fn documents_cross_check(&self) -> Result<(), DocumentsIncomplete> {
        if self.value(&FieldId::AadharNumber).is_empty() || self.value(&FieldId::PanNumber).is_empty()
        {
            return Err(DocumentsIncomplete::MissingNumbers);
        }
        if !self.documents.is_present(DocumentSlot::AadharFront)
            || !self.documents.is_present(DocumentSlot::AadharBack)
        {
            return Err(DocumentsIncomplete::MissingAadharSides);
        }
        if !self.documents.is_present(DocumentSlot::PanCard) {
            return Err(DocumentsIncomplete::MissingPanCard);
        }
        Ok(())
    }

    /// Set the documents check once the cross-check holds. Never unsets it.
    pub fn check_documents_completion(&mut self) {
        if self.documents_cross_check().is_ok() {
            self.satisfy_check(VerificationCheck::Documents);
        }
    }

    fn refresh_account_confirmation(&mut self) {
        let primary = self.value(&FieldId::AccountNumber);
        let confirmation = self.value(&FieldId::ConfirmAccountNumber);
        if primary != confirmation {
            self.custom_validity.insert(
                FieldId::ConfirmAccountNumber,
                ValidationError::CrossFieldMismatch {
                    message: ACCOUNT_MISMATCH_MESSAGE.to_string(),
                },
            );
        } else {
            self.custom_validity.remove(&FieldId::ConfirmAccountNumber);
        }
    }

    fn satisfy_check(&mut self, check: VerificationCheck) {
        if self.record.satisfy(check) {
            info!(%check, "verification check satisfied");
            self.pending_events
                .push(WizardEvent::CheckSatisfied { check });
        }
    }

    fn revoke_check(&mut self, check: VerificationCheck) {
        if self.record.revoke(check) {
            info!(%check, "verification check revoked");
            self.pending_events.push(WizardEvent::CheckRevoked { check });
        }
    }

    fn ensure_open(&self) -> Result<(), WizardError> {
        if self.closed {
            Err(WizardError::SessionClosed)
        } else {
            Ok(())
        }
    }

    // ── Outbound state ──────────────────────────────────────────────────

    pub fn current_step(&self) -> usize {
        self.current
    }

    pub fn step_count(&self) -> usize {
        self.layout.len()
    }

    pub fn current_kind(&self) -> StepKind {
        self.layout
            .get(self.current)
            .map(|s| s.kind)
            .unwrap_or(StepKind::PersonalInfo)
    }

    pub fn layout(&self) -> &StepLayout {
        &self.layout
    }

    /// The stored (normalised) value of a field, empty if never entered.
    pub fn value(&self, field: &FieldId) -> &str {
        self.values.get(field).map(String::as_str).unwrap_or("")
    }

    pub fn record(&self) -> &VerificationRecord {
        &self.record
    }

    pub fn documents(&self) -> &DocumentUploadState {
        &self.documents
    }

    pub fn feedback(&self) -> &FieldFeedback {
        &self.feedback
    }

    pub fn has_photo(&self) -> bool {
        self.photo_captured
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn progress(&self) -> Vec<bool> {
        (1..=self.layout.len()).map(|s| s <= self.current).collect()
    }

    pub fn view(&self) -> WizardView {
        let step_title = self
            .layout
            .get(self.current)
            .map(|s| s.kind.title().to_string())
            .unwrap_or_default();
        WizardView {
            step: self.current,
            step_count: self.layout.len(),
            step_title,
            progress: self.progress(),
            errors: self
                .feedback
                .errors()
                .iter()
                .map(|(f, e)| (f.clone(), e.to_string()))
                .collect(),
            step_error: self.feedback.step_block().map(ToString::to_string),
            record: self.record.clone(),
            documents: self.documents.clone(),
            announcements: self.feedback.announcements().map(str::to_string).collect(),
            closed: self.closed,
        }
    }

    /// Drain all pending events.
    pub fn drain_events(&mut self) -> Vec<WizardEvent> {
        std::mem::take(&mut self.pending_events)
    }
}

impl Default for VerificationWizard {
    fn default() -> Self {
        Self::kyc()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fill_personal_info(wizard: &mut VerificationWizard) {
        for (field, value) in [
            (FieldId::FullName, "Asha Rao"),
            (FieldId::Email, "asha@example.in"),
            (FieldId::Phone, "9876543210"),
            (FieldId::DateOfBirth, "1990-04-12"),
            (FieldId::Address, "12 MG Road"),
            (FieldId::City, "Pune"),
            (FieldId::State, "Maharashtra"),
            (FieldId::Pincode, "411001"),
        ] {
            wizard.field_changed(field, value).unwrap();
        }
    }

    fn fill_documents(wizard: &mut VerificationWizard) {
        wizard.field_changed(FieldId::AadharNumber, "123456789012").unwrap();
        wizard.field_changed(FieldId::PanNumber, "abcde1234f").unwrap();
        for slot in DocumentSlot::ALL {
            wizard.document_slot_changed(slot, true).unwrap();
        }
    }

    fn fill_bank(wizard: &mut VerificationWizard) {
        wizard.field_changed(FieldId::AccountNumber, "123456789012").unwrap();
        wizard
            .field_changed(FieldId::ConfirmAccountNumber, "123456789012")
            .unwrap();
        wizard.field_changed(FieldId::IfscCode, "sbin0001234").unwrap();
    }

    /// Helper: walk a wizard to the last step.
    fn at_final_step() -> VerificationWizard {
        let mut wizard = VerificationWizard::kyc();
        fill_personal_info(&mut wizard);
        fill_documents(&mut wizard);
        for _ in 0..4 {
            assert!(matches!(
                wizard.advance().unwrap(),
                AdvanceOutcome::Advanced { .. }
            ));
        }
        assert_eq!(wizard.current_step(), 5);
        wizard
    }

    // ── Step transitions ────────────────────────────────────────────────

    #[test]
    fn starts_at_step_one_with_empty_record() {
        let wizard = VerificationWizard::kyc();
        assert_eq!(wizard.current_step(), 1);
        assert_eq!(wizard.record().satisfied_count(), 0);
        assert_eq!(wizard.progress(), vec![true, false, false, false, false]);
    }

    #[test]
    fn retreat_from_first_step_is_noop() {
        let mut wizard = VerificationWizard::kyc();
        assert!(!wizard.retreat().unwrap());
        assert_eq!(wizard.current_step(), 1);
        assert!(wizard.drain_events().is_empty());
    }

    #[test]
    fn empty_step_one_blocks_with_required_errors() {
        let mut wizard = VerificationWizard::kyc();
        let AdvanceOutcome::Blocked(result) = wizard.advance().unwrap() else {
            panic!("expected blocked advance");
        };
        assert_eq!(result.errors.len(), 8);
        assert_eq!(
            result.error(&FieldId::FullName),
            Some(&ValidationError::RequiredFieldMissing)
        );
        assert_eq!(wizard.current_step(), 1);
        assert_eq!(wizard.feedback().errors().len(), 8);
        assert!(!wizard.record().is_satisfied(VerificationCheck::PersonalInfo));
    }

    #[test]
    fn valid_step_one_advances_and_sets_personal_info() {
        let mut wizard = VerificationWizard::kyc();
        fill_personal_info(&mut wizard);
        assert_eq!(
            wizard.advance().unwrap(),
            AdvanceOutcome::Advanced { from: 1, to: 2 }
        );
        assert!(wizard.record().is_satisfied(VerificationCheck::PersonalInfo));
        let events = wizard.drain_events();
        assert!(events.contains(&WizardEvent::CheckSatisfied {
            check: VerificationCheck::PersonalInfo
        }));
        assert!(events.contains(&WizardEvent::StepChanged { from: 1, to: 2 }));
    }

    #[test]
    fn pattern_errors_use_field_messages() {
        let mut wizard = VerificationWizard::kyc();
        fill_personal_info(&mut wizard);
        wizard.field_changed(FieldId::FullName, "R2D2").unwrap();
        wizard.field_changed(FieldId::Pincode, "4110").unwrap();
        let result = wizard.validate(1);
        assert_eq!(
            result.error(&FieldId::FullName).unwrap().to_string(),
            "Please enter a valid name (letters only)"
        );
        assert_eq!(
            result.error(&FieldId::Pincode).unwrap().to_string(),
            "Please enter a valid 6-digit PIN code"
        );
        assert_eq!(result.errors.len(), 2);
    }

    #[test]
    fn retyping_clears_field_error() {
        let mut wizard = VerificationWizard::kyc();
        wizard.advance().unwrap();
        assert!(wizard.feedback().error(&FieldId::Email).is_some());
        wizard.field_changed(FieldId::Email, "a").unwrap();
        assert!(wizard.feedback().error(&FieldId::Email).is_none());
    }

    #[test]
    fn advance_at_final_step_keeps_index() {
        let mut wizard = at_final_step();
        assert_eq!(wizard.advance().unwrap(), AdvanceOutcome::AtFinalStep);
        assert_eq!(wizard.current_step(), 5);
    }

    // ── Documents ───────────────────────────────────────────────────────

    #[test]
    fn documents_step_blocks_on_incomplete_uploads() {
        let mut wizard = VerificationWizard::kyc();
        fill_personal_info(&mut wizard);
        wizard.advance().unwrap();
        wizard.field_changed(FieldId::AadharNumber, "123456789012").unwrap();
        wizard.field_changed(FieldId::PanNumber, "ABCDE1234F").unwrap();
        wizard
            .document_slot_changed(DocumentSlot::AadharFront, true)
            .unwrap();

        let AdvanceOutcome::Blocked(result) = wizard.advance().unwrap() else {
            panic!("expected blocked advance");
        };
        assert!(result.errors.is_empty());
        assert_eq!(
            result.blocked,
            Some(ValidationError::CrossCheckIncomplete(
                DocumentsIncomplete::MissingAadharSides
            ))
        );
        assert_eq!(wizard.current_step(), 2);
        assert!(!wizard.record().is_satisfied(VerificationCheck::Documents));
        assert_eq!(
            wizard.feedback().step_block().unwrap().to_string(),
            "Please upload both sides of Aadhar card"
        );
    }

    #[test]
    fn cross_check_reports_first_missing_condition() {
        let mut wizard = VerificationWizard::kyc();
        assert_eq!(
            wizard.documents_cross_check(),
            Err(DocumentsIncomplete::MissingNumbers)
        );
        wizard.field_changed(FieldId::AadharNumber, "1234").unwrap();
        wizard.field_changed(FieldId::PanNumber, "A").unwrap();
        wizard.document_slot_changed(DocumentSlot::AadharFront, true).unwrap();
        wizard.document_slot_changed(DocumentSlot::AadharBack, true).unwrap();
        assert_eq!(
            wizard.documents_cross_check(),
            Err(DocumentsIncomplete::MissingPanCard)
        );
    }

    #[test]
    fn slot_completion_sets_documents_only_with_numbers() {
        let mut wizard = VerificationWizard::kyc();
        for slot in DocumentSlot::ALL {
            wizard.document_slot_changed(slot, true).unwrap();
        }
        assert!(!wizard.record().is_satisfied(VerificationCheck::Documents));

        wizard.field_changed(FieldId::AadharNumber, "123456789012").unwrap();
        wizard.field_changed(FieldId::PanNumber, "ABCDE1234F").unwrap();
        wizard.document_slot_changed(DocumentSlot::PanCard, true).unwrap();
        assert!(wizard.record().is_satisfied(VerificationCheck::Documents));
    }

    #[test]
    fn removing_a_slot_revokes_documents() {
        let mut wizard = VerificationWizard::kyc();
        fill_documents(&mut wizard);
        assert!(wizard.record().is_satisfied(VerificationCheck::Documents));
        wizard.drain_events();

        wizard
            .document_slot_changed(DocumentSlot::AadharBack, false)
            .unwrap();
        assert!(!wizard.record().is_satisfied(VerificationCheck::Documents));
        assert_eq!(
            wizard.drain_events(),
            vec![WizardEvent::CheckRevoked {
                check: VerificationCheck::Documents
            }]
        );
    }

    // ── Photo / collaborators ───────────────────────────────────────────

    #[test]
    fn photo_step_sets_photo_only_with_artifact() {
        let mut wizard = VerificationWizard::kyc();
        assert!(wizard.validate(3).is_valid());
        assert!(!wizard.record().is_satisfied(VerificationCheck::Photo));

        wizard.photo_captured(true).unwrap();
        assert!(wizard.record().is_satisfied(VerificationCheck::Photo));
    }

    #[test]
    fn failed_collaborators_leave_record_unchanged() {
        let mut wizard = VerificationWizard::kyc();
        wizard.photo_captured(false).unwrap();
        wizard.device_verified(false).unwrap();
        wizard.location_verified(false).unwrap();
        assert_eq!(wizard.record().satisfied_count(), 0);
        assert!(!wizard.has_photo());
    }

    #[test]
    fn device_and_location_signals_set_record() {
        let mut wizard = VerificationWizard::kyc();
        wizard.handle(WizardSignal::DeviceVerified { verified: true }).unwrap();
        wizard.handle(WizardSignal::LocationVerified { verified: true }).unwrap();
        assert!(wizard.record().is_satisfied(VerificationCheck::Device));
        assert!(wizard.record().is_satisfied(VerificationCheck::Location));
    }

    // ── Bank account confirmation ───────────────────────────────────────

    #[test]
    fn mismatched_confirmation_is_cross_field_error() {
        let mut wizard = at_final_step();
        wizard.field_changed(FieldId::AccountNumber, "12345678").unwrap();
        wizard
            .field_changed(FieldId::ConfirmAccountNumber, "12345679")
            .unwrap();
        wizard.field_changed(FieldId::IfscCode, "SBIN0001234").unwrap();

        let result = wizard.check_step(5);
        assert_eq!(result.error(&FieldId::AccountNumber), None);
        assert_eq!(
            result.error(&FieldId::ConfirmAccountNumber),
            Some(&ValidationError::CrossFieldMismatch {
                message: ACCOUNT_MISMATCH_MESSAGE.into()
            })
        );

        wizard
            .field_changed(FieldId::ConfirmAccountNumber, "12345678")
            .unwrap();
        let result = wizard.check_step(5);
        assert!(result.is_valid(), "errors: {:?}", result.errors);
    }

    #[test]
    fn short_account_numbers_pass_the_rule() {
        let mut wizard = at_final_step();
        wizard.field_changed(FieldId::AccountNumber, "7").unwrap();
        wizard.field_changed(FieldId::ConfirmAccountNumber, "7").unwrap();
        wizard.field_changed(FieldId::IfscCode, "SBIN0001234").unwrap();
        assert!(wizard.check_step(5).is_valid());
    }

    #[test]
    fn editing_primary_account_rechecks_confirmation() {
        let mut wizard = at_final_step();
        fill_bank(&mut wizard);
        assert!(wizard.check_step(5).is_valid());
        wizard.field_changed(FieldId::AccountNumber, "999999999").unwrap();
        assert!(!wizard.check_step(5).is_valid());
    }

    // ── Submission ──────────────────────────────────────────────────────

    #[test]
    fn submit_before_final_step_is_an_error() {
        let mut wizard = VerificationWizard::kyc();
        assert_eq!(
            wizard.submit().unwrap_err(),
            WizardError::NotAtFinalStep { current: 1, last: 5 }
        );
    }

    #[test]
    fn submit_closes_session_and_emits_payload() {
        let mut wizard = at_final_step();
        fill_bank(&mut wizard);
        wizard.drain_events();

        let SubmitOutcome::Submitted(submission) = wizard.submit().unwrap() else {
            panic!("expected submission");
        };
        assert_eq!(submission.values[&FieldId::IfscCode], "SBIN0001234");
        assert_eq!(submission.values[&FieldId::AadharNumber], "1234 5678 9012");
        assert!(wizard.is_closed());
        assert_eq!(
            wizard.drain_events(),
            vec![WizardEvent::SubmissionReady(submission)]
        );
        assert_eq!(wizard.retreat().unwrap_err(), WizardError::SessionClosed);
        assert_eq!(
            wizard
                .handle(WizardSignal::PhotoCaptured { captured: true })
                .unwrap_err(),
            WizardError::SessionClosed
        );
    }

    #[test]
    fn failed_submit_behaves_like_failed_advance() {
        let mut wizard = at_final_step();
        let SubmitOutcome::Blocked(result) = wizard.submit().unwrap() else {
            panic!("expected blocked submit");
        };
        assert_eq!(result.errors.len(), 3);
        assert!(!wizard.is_closed());
        assert_eq!(wizard.current_step(), 5);
    }

    #[test]
    fn view_reflects_state() {
        let mut wizard = VerificationWizard::kyc();
        wizard.advance().unwrap();
        let view = wizard.view();
        assert_eq!(view.step, 1);
        assert_eq!(view.step_title, "Personal Info");
        assert_eq!(view.errors[&FieldId::Email], "This field is required");
        assert_eq!(view.announcements.len(), 8);
        assert!(!view.closed);
    }

    #[test]
    fn signals_deserialize_from_tagged_json() {
        let signal: WizardSignal = serde_json::from_str(
            r#"{"signal":"field_changed","field":"pan_number","value":"abcde1234f"}"#,
        )
        .unwrap();
        assert_eq!(
            signal,
            WizardSignal::FieldChanged {
                field: FieldId::PanNumber,
                value: "abcde1234f".into()
            }
        );
        let signal: WizardSignal =
            serde_json::from_str(r#"{"signal":"document_slot_changed","slot":"pan_card","present":true}"#)
                .unwrap();
        assert_eq!(
            signal,
            WizardSignal::DocumentSlotChanged {
                slot: DocumentSlot::PanCard,
                present: true
            }
        );
    }
}
