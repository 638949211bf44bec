use kyc_types::FieldId;
use thiserror::Error;

/// Misuse of the wizard API. Validation failures are not errors; see [`ValidationError`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum WizardError {
    #[error("the form session has already been submitted")]
    SessionClosed,

    #[error("submission is only possible from step {last}, currently at step {current}")]
    NotAtFinalStep { current: usize, last: usize },

    #[error("a wizard needs at least one step")]
    EmptyLayout,

    #[error("field {0} appears in more than one step")]
    FieldInMultipleSteps(FieldId),
}

/// Why a field (or the whole step) failed validation.
///
/// `Display` is the message shown next to the field and announced to the live region.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("This field is required")]
    RequiredFieldMissing,

    #[error("{message}")]
    PatternMismatch { message: String },

    #[error("{message}")]
    CrossFieldMismatch { message: String },

    #[error("{0}")]
    CrossCheckIncomplete(DocumentsIncomplete),
}

/// The first unmet condition of the documents cross-check, in checking order.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum DocumentsIncomplete {
    #[error("Please fill in all document numbers")]
    MissingNumbers,

    #[error("Please upload both sides of Aadhar card")]
    MissingAadharSides,

    #[error("Please upload PAN card")]
    MissingPanCard,
}
