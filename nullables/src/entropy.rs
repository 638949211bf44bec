//! Nullable entropy: scripted draws.

use kyc_services::EntropySource;
use std::sync::Mutex;

use crate::lock;

/// Returns pre-configured draws in order, cycling when exhausted.
pub struct NullEntropy {
    draws: Vec<f64>,
    index: Mutex<usize>,
}

impl NullEntropy {
    /// Create with a sequence of draws in `[0, 1)`. An empty sequence yields `0.0`.
    pub fn new(draws: Vec<f64>) -> Self {
        Self {
            draws,
            index: Mutex::new(0),
        }
    }

    /// Create with a single draw returned for every call.
    pub fn constant(value: f64) -> Self {
        Self::new(vec![value])
    }

    /// Number of draws taken so far.
    pub fn taken(&self) -> usize {
        *lock(&self.index)
    }
}

impl EntropySource for NullEntropy {
    fn next_unit(&self) -> f64 {
        let mut idx = lock(&self.index);
        let value = match self.draws.len() {
            0 => 0.0,
            n => self.draws[*idx % n],
        };
        *idx += 1;
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cycles_through_draws() {
        let entropy = NullEntropy::new(vec![0.1, 0.9]);
        assert_eq!(entropy.next_unit(), 0.1);
        assert_eq!(entropy.next_unit(), 0.9);
        assert_eq!(entropy.next_unit(), 0.1);
        assert_eq!(entropy.taken(), 3);
    }
}
