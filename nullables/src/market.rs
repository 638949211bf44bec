//! Nullable market data: a swappable canned snapshot.

use std::sync::Mutex;

use kyc_services::{MarketDataSource, MarketSnapshot, ServiceError};

use crate::lock;

/// Returns the configured snapshot, or an HTTP error when there is none.
pub struct NullMarketData {
    snapshot: Mutex<Option<MarketSnapshot>>,
}

impl NullMarketData {
    pub fn new(snapshot: MarketSnapshot) -> Self {
        Self {
            snapshot: Mutex::new(Some(snapshot)),
        }
    }

    /// A source whose every fetch fails.
    pub fn unavailable() -> Self {
        Self {
            snapshot: Mutex::new(None),
        }
    }

    pub fn set(&self, snapshot: Option<MarketSnapshot>) {
        *lock(&self.snapshot) = snapshot;
    }
}

impl MarketDataSource for NullMarketData {
    async fn snapshot(&self) -> Result<MarketSnapshot, ServiceError> {
        lock(&self.snapshot)
            .clone()
            .ok_or_else(|| ServiceError::Http("market data unavailable".into()))
    }
}
