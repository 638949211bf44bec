//! Nullable transport: record submissions without sending them.

use std::sync::Mutex;

use kyc_services::{ServiceError, SubmissionTransport};
use kyc_wizard::Submission;

use crate::lock;

/// A transport that records submissions instead of sending them.
#[derive(Default)]
pub struct NullTransport {
    delivered: Mutex<Vec<Submission>>,
    failing: Mutex<bool>,
}

impl NullTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every following submit fail.
    pub fn fail(&self, failing: bool) {
        *lock(&self.failing) = failing;
    }

    /// Get all delivered submissions (for assertions).
    pub fn delivered(&self) -> Vec<Submission> {
        lock(&self.delivered).clone()
    }
}

impl SubmissionTransport for NullTransport {
    async fn submit(&self, submission: &Submission) -> Result<(), ServiceError> {
        if *lock(&self.failing) {
            return Err(ServiceError::Http("transport offline".into()));
        }
        lock(&self.delivered).push(submission.clone());
        Ok(())
    }
}
