//! Delivery of validated submissions.

use std::future::Future;
use std::time::Duration;

use kyc_wizard::Submission;
use tracing::{debug, info};

use crate::ServiceError;

/// Receives the payload of a `SubmissionReady` event.
pub trait SubmissionTransport {
    fn submit(&self, submission: &Submission) -> impl Future<Output = Result<(), ServiceError>> + Send;
}

/// POSTs the submission as JSON.
pub struct HttpSubmissionTransport {
    url: String,
    client: reqwest::Client,
    timeout: Duration,
}

impl HttpSubmissionTransport {
    pub fn new(url: &str) -> Self {
        Self {
            url: url.to_string(),
            client: reqwest::Client::new(),
            timeout: Duration::from_secs(10),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl SubmissionTransport for HttpSubmissionTransport {
    async fn submit(&self, submission: &Submission) -> Result<(), ServiceError> {
        debug!(url = %self.url, fields = submission.values.len(), "posting submission");
        let resp = self
            .client
            .post(&self.url)
            .timeout(self.timeout)
            .json(submission)
            .send()
            .await
            .map_err(|e| ServiceError::Http(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(ServiceError::Http(format!(
                "HTTP {} from {}",
                resp.status(),
                self.url
            )));
        }
        info!(url = %self.url, "submission delivered");
        Ok(())
    }
}

/// Logs submissions without sending them anywhere.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogOnlyTransport;

impl SubmissionTransport for LogOnlyTransport {
    async fn submit(&self, submission: &Submission) -> Result<(), ServiceError> {
        info!(
            fields = submission.values.len(),
            checks = submission.record.satisfied_count(),
            "submission ready (no transport configured)"
        );
        Ok(())
    }
}
