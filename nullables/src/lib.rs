//! Nullable collaborators for deterministic testing.
//!
//! Everything outside the wizard (clock, randomness, HTTP APIs, wallet,
//! submission transport) sits behind a trait in `kyc-services`. This crate
//! provides test-friendly implementations that:
//! - Return scripted values
//! - Can be controlled programmatically
//! - Never touch the network
//!
//! Usage: swap real implementations for nullables in tests.

pub mod bank;
pub mod clock;
pub mod entropy;
pub mod market;
pub mod transport;
pub mod wallet;

pub use bank::NullBankLookup;
pub use clock::NullClock;
pub use entropy::NullEntropy;
pub use market::NullMarketData;
pub use transport::NullTransport;
pub use wallet::NullWallet;

use std::sync::{Mutex, MutexGuard};

/// Lock ignoring poisoning: a panicking test must not cascade into others.
pub(crate) fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(|e| e.into_inner())
}
