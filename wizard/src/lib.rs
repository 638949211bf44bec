//! KYC verification wizard.
//!
//! A linear, gated form over a fixed sequence of steps:
//! 1. **Personal info**: name, contact details, postal address.
//! 2. **Documents**: Aadhar and PAN numbers plus three uploaded images.
//! 3. **Photo**: a live photo captured by the camera collaborator.
//! 4. **Device** and 5. **Location**: checks reported by collaborators,
//!    with bank details collected on the last step.
//!
//! The wizard performs no I/O. Collaborators report their results as
//! [`WizardSignal`]s and the wizard queues [`WizardEvent`]s for the
//! presentation and transport layers to drain.

pub mod error;
pub mod feedback;
pub mod layout;
pub mod normalize;
pub mod pattern;
pub mod record;
pub mod rules;
pub mod wizard;

pub use error::{DocumentsIncomplete, ValidationError, WizardError};
pub use feedback::FieldFeedback;
pub use layout::{StepLayout, StepSpec};
pub use normalize::normalize;
pub use pattern::Pattern;
pub use record::{DocumentUploadState, VerificationRecord};
pub use rules::{FieldRule, RuleTable};
pub use wizard::{
    AdvanceOutcome, StepValidationResult, Submission, SubmitOutcome, VerificationWizard,
    WizardEvent, WizardSignal, WizardView,
};
