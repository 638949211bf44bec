//! Geolocation results reported by the browser.

use std::fmt;

use kyc_wizard::WizardSignal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

/// A position fix in decimal degrees.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LocationFix {
    pub latitude: f64,
    pub longitude: f64,
    pub accuracy_m: f64,
}

impl LocationFix {
    pub fn new(latitude: f64, longitude: f64, accuracy_m: f64) -> Self {
        Self {
            latitude,
            longitude,
            accuracy_m,
        }
    }
}

impl fmt::Display for LocationFix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Lat: {:.4}, Long: {:.4} (Accuracy: {:.1}m)",
            self.latitude, self.longitude, self.accuracy_m
        )
    }
}

/// Why no fix was obtained. `Display` is the message shown to the user.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GeolocationFailure {
    #[error("Please enable location services")]
    PermissionDenied,
    #[error("Location unavailable")]
    PositionUnavailable,
    #[error("Request timed out")]
    Timeout,
    #[error("Geolocation not supported")]
    Unsupported,
    #[error("Location access denied")]
    Other,
}

impl GeolocationFailure {
    /// Map a `GeolocationPositionError.code`.
    pub fn from_code(code: u16) -> Self {
        match code {
            1 => Self::PermissionDenied,
            2 => Self::PositionUnavailable,
            3 => Self::Timeout,
            _ => Self::Other,
        }
    }
}

/// Options passed to the position request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeolocationOptions {
    pub enable_high_accuracy: bool,
    pub timeout_ms: u64,
    pub maximum_age_ms: u64,
}

impl Default for GeolocationOptions {
    fn default() -> Self {
        Self {
            enable_high_accuracy: true,
            timeout_ms: 5000,
            maximum_age_ms: 0,
        }
    }
}

/// Convert a position request's result into the wizard signal.
pub fn location_signal(result: &Result<LocationFix, GeolocationFailure>) -> WizardSignal {
    match result {
        Ok(fix) => {
            info!(%fix, "location verified");
            WizardSignal::LocationVerified { verified: true }
        }
        Err(failure) => {
            warn!(%failure, "location verification failed");
            WizardSignal::LocationVerified { verified: false }
        }
    }
}
