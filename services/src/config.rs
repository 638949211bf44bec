//! Collaborator configuration with TOML file support.

use kyc_utils::LogFormat;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::ServiceError;

/// Configuration for the wizard's collaborators.
///
/// Can be loaded from a TOML file via [`ServicesConfig::from_toml_file`] or
/// built programmatically (e.g. for tests).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ServicesConfig {
    /// Base URL of the IFSC lookup API.
    #[serde(default = "default_ifsc_base_url")]
    pub ifsc_base_url: String,

    /// Base URL of the market-data API.
    #[serde(default = "default_market_base_url")]
    pub market_base_url: String,

    /// Coin id whose market data is shown.
    #[serde(default = "default_market_coin")]
    pub market_coin: String,

    /// Timeout for every outbound HTTP request.
    #[serde(default = "default_http_timeout_secs")]
    pub http_timeout_secs: u64,

    /// Where validated submissions are POSTed. Unset: submissions are only logged.
    #[serde(default)]
    pub submission_url: Option<String>,

    /// Probability that the simulated fingerprint scan succeeds.
    #[serde(default = "default_biometric_success_probability")]
    pub biometric_success_probability: f64,

    /// Largest accepted upload in bytes.
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: u64,

    /// Minimum time between two accepted uploads.
    #[serde(default = "default_upload_min_interval_ms")]
    pub upload_min_interval_ms: u64,

    /// Log format: "human" or "json".
    #[serde(default)]
    pub log_format: LogFormat,

    /// Log level filter: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_ifsc_base_url() -> String {
    crate::bank::RAZORPAY_IFSC_URL.to_string()
}

fn default_market_base_url() -> String {
    crate::market::COINGECKO_API_URL.to_string()
}

fn default_market_coin() -> String {
    crate::market::DEFAULT_COIN.to_string()
}

fn default_http_timeout_secs() -> u64 {
    10
}

fn default_biometric_success_probability() -> f64 {
    crate::biometric::DEFAULT_SUCCESS_PROBABILITY
}

fn default_max_upload_bytes() -> u64 {
    crate::upload::MAX_UPLOAD_BYTES
}

fn default_upload_min_interval_ms() -> u64 {
    crate::upload::MIN_UPLOAD_INTERVAL_MS
}

fn default_log_level() -> String {
    "info".to_string()
}

// ── Impl ───────────────────────────────────────────────────────────────

impl ServicesConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ServiceError> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ServiceError::Config(format!("{}: {e}", path.as_ref().display())))?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ServiceError> {
        let config: Self = toml::from_str(s).map_err(|e| ServiceError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize the configuration to a TOML string.
    pub fn to_toml_string(&self) -> Result<String, ServiceError> {
        toml::to_string_pretty(self).map_err(|e| ServiceError::Config(e.to_string()))
    }

    fn validate(&self) -> Result<(), ServiceError> {
        if !(0.0..=1.0).contains(&self.biometric_success_probability) {
            return Err(ServiceError::InvalidProbability(
                self.biometric_success_probability,
            ));
        }
        if self.http_timeout_secs == 0 {
            return Err(ServiceError::Config("http_timeout_secs must be positive".into()));
        }
        Ok(())
    }
}

impl Default for ServicesConfig {
    fn default() -> Self {
        Self {
            ifsc_base_url: default_ifsc_base_url(),
            market_base_url: default_market_base_url(),
            market_coin: default_market_coin(),
            http_timeout_secs: default_http_timeout_secs(),
            submission_url: None,
            biometric_success_probability: default_biometric_success_probability(),
            max_upload_bytes: default_max_upload_bytes(),
            upload_min_interval_ms: default_upload_min_interval_ms(),
            log_format: LogFormat::default(),
            log_level: default_log_level(),
        }
    }
}
