//! Token market data (price, market cap, volume, 7-day sparkline).

use std::future::Future;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::ServiceError;

/// Default CoinGecko API base URL.
pub(crate) const COINGECKO_API_URL: &str = "https://api.coingecko.com/api/v3";

/// Coin shown when none is configured.
pub(crate) const DEFAULT_COIN: &str = "agoric";

/// A point-in-time view of one coin's market.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MarketSnapshot {
    pub price_usd: f64,
    pub price_change_pct_24h: f64,
    pub market_cap_usd: f64,
    pub volume_usd: f64,
    pub circulating_supply: f64,
    pub market_cap_change_24h: f64,
    /// Not every provider reports this.
    pub volume_change_24h: Option<f64>,
    /// Hourly prices over the last seven days.
    pub sparkline_7d: Vec<f64>,
}

impl MarketSnapshot {
    /// One label per sparkline point: `"1h"`, `"2h"`, ...
    pub fn sparkline_labels(&self) -> Vec<String> {
        sparkline_labels(self.sparkline_7d.len())
    }

    pub fn is_price_up(&self) -> bool {
        self.price_change_pct_24h >= 0.0
    }
}

pub fn sparkline_labels(points: usize) -> Vec<String> {
    (1..=points).map(|i| format!("{i}h")).collect()
}

/// Source of market snapshots.
pub trait MarketDataSource {
    fn snapshot(&self) -> impl Future<Output = Result<MarketSnapshot, ServiceError>> + Send;
}

// ── CoinGecko wire format ──────────────────────────────────────────────

#[derive(Deserialize)]
struct RawCoin {
    market_data: RawMarketData,
}

#[derive(Deserialize)]
struct RawMarketData {
    current_price: UsdValue,
    #[serde(default)]
    price_change_percentage_24h: f64,
    market_cap: UsdValue,
    total_volume: UsdValue,
    #[serde(default)]
    circulating_supply: f64,
    #[serde(default)]
    market_cap_change_24h: f64,
    #[serde(default)]
    total_volume_change_24h: Option<f64>,
    #[serde(default)]
    sparkline_7d: Option<RawSparkline>,
}

#[derive(Deserialize)]
struct UsdValue {
    usd: f64,
}

#[derive(Deserialize)]
struct RawSparkline {
    price: Vec<f64>,
}

impl From<RawCoin> for MarketSnapshot {
    fn from(raw: RawCoin) -> Self {
        let m = raw.market_data;
        Self {
            price_usd: m.current_price.usd,
            price_change_pct_24h: m.price_change_percentage_24h,
            market_cap_usd: m.market_cap.usd,
            volume_usd: m.total_volume.usd,
            circulating_supply: m.circulating_supply,
            market_cap_change_24h: m.market_cap_change_24h,
            volume_change_24h: m.total_volume_change_24h,
            sparkline_7d: m.sparkline_7d.map(|s| s.price).unwrap_or_default(),
        }
    }
}

/// HTTP client for `GET {base}/coins/{coin}`.
pub struct CoinGeckoClient {
    base_url: String,
    coin: String,
    client: reqwest::Client,
    timeout: Duration,
}

impl CoinGeckoClient {
    pub fn new() -> Self {
        Self::with_url(COINGECKO_API_URL, DEFAULT_COIN)
    }

    /// Create a client pointing at a custom base URL and coin id.
    pub fn with_url(base_url: &str, coin: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            coin: coin.to_string(),
            client: reqwest::Client::new(),
            timeout: Duration::from_secs(10),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn coin(&self) -> &str {
        &self.coin
    }

    fn coin_url(&self) -> String {
        format!("{}/coins/{}?sparkline=true", self.base_url, self.coin)
    }
}

impl Default for CoinGeckoClient {
    fn default() -> Self {
        Self::new()
    }
}

impl MarketDataSource for CoinGeckoClient {
    async fn snapshot(&self) -> Result<MarketSnapshot, ServiceError> {
        let url = self.coin_url();
        debug!(%url, "fetching market data");

        let resp = self
            .client
            .get(&url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| ServiceError::Http(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(ServiceError::Http(format!(
                "HTTP {} from {}",
                resp.status(),
                url
            )));
        }

        let raw: RawCoin = resp
            .json()
            .await
            .map_err(|e| ServiceError::InvalidResponse(e.to_string()))?;
        Ok(raw.into())
    }
}

// ── Formatting ─────────────────────────────────────────────────────────

/// `1234.5` → `"$1,234.50"`, `-3.0` → `"-$3.00"`.
pub fn format_usd(amount: f64) -> String {
    let cents = (amount.abs() * 100.0).round() as u64;
    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };
    format!("{sign}${}.{:02}", group_thousands(cents / 100), cents % 100)
}

/// Thousands-grouped with up to three fraction digits: `1234567.891` → `"1,234,567.891"`.
pub fn format_grouped(value: f64) -> String {
    let millis = (value.abs() * 1000.0).round() as u64;
    let sign = if value < 0.0 && millis > 0 { "-" } else { "" };
    let whole = group_thousands(millis / 1000);
    let frac = millis % 1000;
    if frac == 0 {
        return format!("{sign}{whole}");
    }
    let frac = format!("{frac:03}");
    format!("{sign}{whole}.{}", frac.trim_end_matches('0'))
}

fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "id": "agoric",
        "market_data": {
            "current_price": {"usd": 0.0521, "eur": 0.048},
            "price_change_percentage_24h": -2.35,
            "market_cap": {"usd": 51234567.0},
            "total_volume": {"usd": 1234567.5},
            "circulating_supply": 983000000.0,
            "market_cap_change_24h": -1200000.0,
            "sparkline_7d": {"price": [0.05, 0.051, 0.052]}
        }
    }"#;

    #[test]
    fn parses_coingecko_payload() {
        let raw: RawCoin = serde_json::from_str(SAMPLE).unwrap();
        let snap = MarketSnapshot::from(raw);
        assert_eq!(snap.price_usd, 0.0521);
        assert_eq!(snap.market_cap_usd, 51234567.0);
        assert_eq!(snap.volume_change_24h, None);
        assert_eq!(snap.sparkline_7d.len(), 3);
        assert!(!snap.is_price_up());
    }

    #[test]
    fn labels_count_hours_from_one() {
        assert_eq!(sparkline_labels(3), vec!["1h", "2h", "3h"]);
        assert!(sparkline_labels(0).is_empty());
    }

    #[test]
    fn usd_formatting() {
        assert_eq!(format_usd(1234.5), "$1,234.50");
        assert_eq!(format_usd(0.0), "$0.00");
        assert_eq!(format_usd(-3.0), "-$3.00");
        assert_eq!(format_usd(1_000_000.0), "$1,000,000.00");
    }

    #[test]
    fn grouped_formatting() {
        assert_eq!(format_grouped(1234567.891), "1,234,567.891");
        assert_eq!(format_grouped(983000000.0), "983,000,000");
        assert_eq!(format_grouped(12.5), "12.5");
        assert_eq!(format_grouped(-1200000.0), "-1,200,000");
    }

    #[test]
    fn coin_url_includes_sparkline() {
        let client = CoinGeckoClient::with_url("http://localhost/api/", "bitcoin");
        assert_eq!(client.coin_url(), "http://localhost/api/coins/bitcoin?sparkline=true");
    }
}
