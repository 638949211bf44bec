//! IFSC (Indian Financial System Code) lookup.
//!
//! Codes are checked locally before any request: four letters, a literal
//! `0`, then six letters or digits.

use std::future::Future;
use std::time::Duration;

use kyc_wizard::Pattern;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::ServiceError;

/// Default Razorpay IFSC API base URL.
pub(crate) const RAZORPAY_IFSC_URL: &str = "https://ifsc.razorpay.com";

/// `^[A-Z]{4}0[A-Z0-9]{6}$`, the same check the wizard's IFSC rule uses.
pub fn is_valid_ifsc(code: &str) -> bool {
    Pattern::Ifsc.matches(code)
}

/// Branch details for a verified IFSC code.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IfscDetails {
    #[serde(rename = "BANK")]
    pub bank: String,
    #[serde(rename = "BRANCH", default)]
    pub branch: String,
    #[serde(rename = "ADDRESS", default)]
    pub address: String,
    #[serde(rename = "CITY", default)]
    pub city: String,
    #[serde(rename = "STATE", default)]
    pub state: String,
}

/// Resolves IFSC codes to bank branches.
pub trait BankLookupService {
    /// Look up `code`. Implementations must reject malformed codes with
    /// [`ServiceError::InvalidIfsc`] without contacting anything.
    fn lookup(&self, code: &str) -> impl Future<Output = Result<IfscDetails, ServiceError>> + Send;
}

/// Loose view of the API response; a body without `BANK` means "not found".
#[derive(Deserialize)]
struct RawIfscResponse {
    #[serde(rename = "BANK")]
    bank: Option<String>,
    #[serde(rename = "BRANCH", default)]
    branch: String,
    #[serde(rename = "ADDRESS", default)]
    address: String,
    #[serde(rename = "CITY", default)]
    city: String,
    #[serde(rename = "STATE", default)]
    state: String,
}

/// HTTP client for the Razorpay IFSC API (`GET {base}/{code}`).
pub struct RazorpayIfscClient {
    base_url: String,
    client: reqwest::Client,
    timeout: Duration,
}

impl RazorpayIfscClient {
    pub fn new() -> Self {
        Self::with_url(RAZORPAY_IFSC_URL)
    }

    /// Create a client pointing at a custom base URL.
    pub fn with_url(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
            timeout: Duration::from_secs(10),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl Default for RazorpayIfscClient {
    fn default() -> Self {
        Self::new()
    }
}

impl BankLookupService for RazorpayIfscClient {
    async fn lookup(&self, code: &str) -> Result<IfscDetails, ServiceError> {
        if !is_valid_ifsc(code) {
            return Err(ServiceError::InvalidIfsc(code.to_string()));
        }
        let url = format!("{}/{}", self.base_url, code);
        debug!(%url, "looking up IFSC code");

        let resp = self
            .client
            .get(&url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| ServiceError::Http(e.to_string()))?;

        if resp.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(ServiceError::NotFound(code.to_string()));
        }
        if !resp.status().is_success() {
            return Err(ServiceError::Http(format!(
                "HTTP {} from {}",
                resp.status(),
                url
            )));
        }

        let raw: RawIfscResponse = resp
            .json()
            .await
            .map_err(|e| ServiceError::InvalidResponse(e.to_string()))?;
        details_from_raw(code, raw)
    }
}

fn details_from_raw(code: &str, raw: RawIfscResponse) -> Result<IfscDetails, ServiceError> {
    match raw.bank {
        Some(bank) if !bank.is_empty() => Ok(IfscDetails {
            bank,
            branch: raw.branch,
            address: raw.address,
            city: raw.city,
            state: raw.state,
        }),
        _ => Err(ServiceError::NotFound(code.to_string())),
    }
}
