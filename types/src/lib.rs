//! Fundamental types for the KYC wizard.
//!
//! This crate defines the vocabulary shared across every other crate in the workspace:
//! step kinds, field identifiers, verification checks, document slots and timestamps.

pub mod check;
pub mod document;
pub mod error;
pub mod field;
pub mod step;
pub mod time;

pub use check::VerificationCheck;
pub use document::DocumentSlot;
pub use error::KycError;
pub use field::FieldId;
pub use step::StepKind;
pub use time::Timestamp;
