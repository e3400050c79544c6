use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use tracing::warn;

#[derive(Debug, thiserror::Error)]
pub enum PriceError {
    #[error("API request failed: {0}")]
    ApiError(String),

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenPrice {
    pub price: f64,
    pub change_24h: f64,
}

/// The fixed symbol set the cache serves, paired with CoinGecko ids.
const TRACKED_SYMBOLS: [(&str, &str); 4] = [
    ("ETH", "ethereum"),
    ("USDC", "usd-coin"),
    ("DAI", "dai"),
    ("WBTC", "wrapped-bitcoin"),
];

/// Last-known-good values served when the upstream API is unreachable
/// and nothing fresher is cached.
const FALLBACK_PRICES: [(&str, f64, f64); 4] = [
    ("ETH", 1850.00, 2.5),
    ("USDC", 1.00, 0.0),
    ("DAI", 1.00, 0.0),
    ("WBTC", 43250.00, -1.2),
];

#[derive(Debug, Default)]
struct Snapshot {
    prices: HashMap<String, TokenPrice>,
    fetched_at: Option<Instant>,
}

/// Read-through spot-price cache with a single time-based staleness
/// dimension. The snapshot is replaced wholesale on refresh; there is no
/// per-key expiry and no size bound. Lookups never fail: a refresh error
/// degrades to the previous snapshot or to hard-coded fallbacks.
pub struct PriceService {
    client: reqwest::Client,
    base_url: String,
    cache_ttl: Duration,
    snapshot: RwLock<Snapshot>,
}

impl PriceService {
    pub fn new(base_url: String, cache_ttl: Duration) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
            cache_ttl,
            snapshot: RwLock::new(Snapshot::default()),
        }
    }

    /// Spot prices for the tracked symbol set. Served from cache while
    /// the freshness window holds; otherwise one refresh attempt is made.
    pub async fn get_prices(&self) -> HashMap<String, TokenPrice> {
        {
            let snapshot = self.snapshot.read().await;
            if let Some(fetched_at) = snapshot.fetched_at {
                if fetched_at.elapsed() < self.cache_ttl && !snapshot.prices.is_empty() {
                    return snapshot.prices.clone();
                }
            }
        }

        match self.fetch_prices().await {
            Ok(prices) => {
                let mut snapshot = self.snapshot.write().await;
                snapshot.prices = prices.clone();
                snapshot.fetched_at = Some(Instant::now());
                prices
            }
            Err(e) => {
                warn!(error = %e, "Price fetch failed, serving fallback data");
                let snapshot = self.snapshot.read().await;
                if !snapshot.prices.is_empty() {
                    snapshot.prices.clone()
                } else {
                    Self::fallback_prices()
                }
            }
        }
    }

    pub async fn get_price(&self, symbol: &str) -> TokenPrice {
        let prices = self.get_prices().await;
        prices
            .get(&symbol.to_uppercase())
            .copied()
            .unwrap_or(TokenPrice { price: 0.0, change_24h: 0.0 })
    }

    async fn fetch_prices(&self) -> Result<HashMap<String, TokenPrice>, PriceError> {
        let ids = TRACKED_SYMBOLS
            .iter()
            .map(|(_, id)| *id)
            .collect::<Vec<_>>()
            .join(",");
        let url = format!(
            "{}/simple/price?ids={}&vs_currencies=usd&include_24hr_change=true",
            self.base_url, ids
        );

        let response = self
            .client
            .get(&url)
            .header("User-Agent", "FluxTrade/1.0")
            .send()
            .await
            .map_err(|e| PriceError::ApiError(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(PriceError::ApiError(format!(
                "API returned status: {}",
                response.status()
            )));
        }

        let parsed: serde_json::Value = response
            .json()
            .await
            .map_err(|e| PriceError::InvalidResponse(format!("JSON parse error: {}", e)))?;

        let mut prices = HashMap::new();
        for (symbol, id) in TRACKED_SYMBOLS {
            let entry = parsed
                .get(id)
                .ok_or_else(|| PriceError::InvalidResponse(format!("{} missing", id)))?;
            let price = entry["usd"]
                .as_f64()
                .ok_or_else(|| PriceError::InvalidResponse(format!("{} price missing", id)))?;
            let change_24h = entry["usd_24h_change"].as_f64().unwrap_or(0.0);

            prices.insert(symbol.to_string(), TokenPrice { price, change_24h });
        }

        Ok(prices)
    }

    fn fallback_prices() -> HashMap<String, TokenPrice> {
        FALLBACK_PRICES
            .iter()
            .map(|(symbol, price, change_24h)| {
                (
                    symbol.to_string(),
                    TokenPrice {
                        price: *price,
                        change_24h: *change_24h,
                    },
                )
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fallback_served_when_upstream_unreachable() {
        // Nothing listens on this port, so the fetch fails immediately.
        let service = PriceService::new(
            "http://127.0.0.1:1".to_string(),
            Duration::from_secs(300),
        );

        let prices = service.get_prices().await;
        assert_eq!(prices.len(), 4);
        assert_eq!(prices["ETH"].price, 1850.00);
        assert_eq!(prices["USDC"].change_24h, 0.0);
    }

    #[tokio::test]
    async fn test_unknown_symbol_is_zero() {
        let service = PriceService::new(
            "http://127.0.0.1:1".to_string(),
            Duration::from_secs(300),
        );

        let price = service.get_price("DOGE").await;
        assert_eq!(price.price, 0.0);
    }
}
