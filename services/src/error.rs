use thiserror::Error;

use crate::upload::UploadRejection;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("invalid IFSC code: {0}")]
    InvalidIfsc(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("invalid response: {0}")]
    InvalidResponse(String),

    #[error("no wallet account connected")]
    NoAccount,

    #[error("wallet error: {0}")]
    Wallet(String),

    #[error("upload rejected: {0}")]
    Upload(#[from] UploadRejection),

    #[error("success probability must be within [0, 1], got {0}")]
    InvalidProbability(f64),

    #[error("config error: {0}")]
    Config(String),

    #[error("{0}")]
    Other(String),
}
