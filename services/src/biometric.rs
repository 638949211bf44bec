//! Simulated fingerprint capture.
//!
//! There is no real sensor behind this: a scan succeeds with a fixed
//! probability. The result is shown to the user but never feeds the
//! verification record.

use std::fmt;
use std::future::Future;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::ServiceError;

pub(crate) const DEFAULT_SUCCESS_PROBABILITY: f64 = 0.7;

const DEFAULT_SCAN_DELAY: Duration = Duration::from_secs(2);

/// Uniform draws in `[0, 1)`.
pub trait EntropySource {
    fn next_unit(&self) -> f64;
}

/// Thread-local RNG.
#[derive(Clone, Copy, Debug, Default)]
pub struct ThreadEntropy;

impl EntropySource for ThreadEntropy {
    fn next_unit(&self) -> f64 {
        rand::random::<f64>()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BiometricOutcome {
    Captured,
    Failed,
}

impl BiometricOutcome {
    pub fn is_captured(&self) -> bool {
        matches!(self, Self::Captured)
    }

    pub fn message(&self) -> &'static str {
        match self {
            Self::Captured => "Fingerprint captured successfully!",
            Self::Failed => "Failed to capture fingerprint. Please try again.",
        }
    }
}

impl fmt::Display for BiometricOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

pub trait BiometricScanner {
    fn scan(&self) -> impl Future<Output = BiometricOutcome> + Send;
}

/// Succeeds when a draw falls below `success_probability`.
pub struct SimulatedBiometric<E> {
    entropy: E,
    success_probability: f64,
    scan_delay: Duration,
}

impl<E: EntropySource> SimulatedBiometric<E> {
    pub fn new(entropy: E, success_probability: f64) -> Result<Self, ServiceError> {
        if !(0.0..=1.0).contains(&success_probability) {
            return Err(ServiceError::InvalidProbability(success_probability));
        }
        Ok(Self {
            entropy,
            success_probability,
            scan_delay: DEFAULT_SCAN_DELAY,
        })
    }

    /// How long a scan pretends to take.
    pub fn with_scan_delay(mut self, delay: Duration) -> Self {
        self.scan_delay = delay;
        self
    }

    pub fn success_probability(&self) -> f64 {
        self.success_probability
    }

    /// Decide the outcome without waiting.
    pub fn draw(&self) -> BiometricOutcome {
        let draw = self.entropy.next_unit();
        debug!(draw, p = self.success_probability, "biometric draw");
        if draw < self.success_probability {
            BiometricOutcome::Captured
        } else {
            BiometricOutcome::Failed
        }
    }
}

impl SimulatedBiometric<ThreadEntropy> {
    pub fn with_thread_entropy(success_probability: f64) -> Result<Self, ServiceError> {
        Self::new(ThreadEntropy, success_probability)
    }
}

impl<E: EntropySource + Send + Sync> BiometricScanner for SimulatedBiometric<E> {
    async fn scan(&self) -> BiometricOutcome {
        if !self.scan_delay.is_zero() {
            tokio::time::sleep(self.scan_delay).await;
        }
        let outcome = self.draw();
        info!(captured = outcome.is_captured(), "fingerprint scan finished");
        outcome
    }
}
