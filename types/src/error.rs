//! Top-level error type shared across crates.

use thiserror::Error;

/// Common error type for parsing the shared vocabulary.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum KycError {
    #[error("unknown verification check: {0}")]
    UnknownCheck(String),

    #[error("unknown document slot: {0}")]
    UnknownDocumentSlot(String),

    #[error("unknown step kind: {0}")]
    UnknownStepKind(String),

    #[error("field identifier must not be empty")]
    EmptyFieldId,
}
