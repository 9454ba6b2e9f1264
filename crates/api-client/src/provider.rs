// In crates/api-client/src/provider.rs

use async_trait::async_trait;
use core_types::{AssetHistory, Symbol};
use futures::stream::{self, StreamExt, TryStreamExt};

use crate::{ApiClient, Result};

/// A source of per-asset price/volume histories.
#[async_trait]
pub trait DataProvider: Send + Sync {
    /// Every asset the provider tracks, in listing order.
    async fn list_asset_ids(&self) -> Result<Vec<Symbol>>;

    /// The validated history of one asset over the last `lookback_days`.
    async fn fetch_history(&self, symbol: &Symbol, lookback_days: u32) -> Result<AssetHistory>;
}

#[async_trait]
impl DataProvider for ApiClient {
    async fn list_asset_ids(&self) -> Result<Vec<Symbol>> {
        self.get_coin_names().await
    }

    async fn fetch_history(&self, symbol: &Symbol, lookback_days: u32) -> Result<AssetHistory> {
        self.get_history(symbol, lookback_days).await
    }
}

/// Fetches the history of every listed asset, at most `max_concurrent` at a time.
///
/// Results keep the listing order. The first failed fetch fails the whole call so
/// a truncated history never reaches the analysis.
pub async fn fetch_histories<P>(
    provider: &P,
    lookback_days: u32,
    max_concurrent: usize,
) -> Result<Vec<AssetHistory>>
where
    P: DataProvider + ?Sized,
{
    let symbols = provider.list_asset_ids().await?;
    tracing::info!(
        count = symbols.len(),
        lookback_days,
        max_concurrent,
        "Fetching asset histories..."
    );

    let histories: Vec<AssetHistory> = stream::iter(symbols.iter())
        .map(|symbol| provider.fetch_history(symbol, lookback_days))
        .buffered(max_concurrent.max(1))
        .try_collect()
        .await?;

    tracing::info!(count = histories.len(), "All asset histories fetched.");
    Ok(histories)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    #[derive(Default)]
    struct InMemoryProvider {
        histories: Vec<AssetHistory>,
        failing: Option<Symbol>,
        in_flight: AtomicUsize,
        max_in_flight: AtomicUsize,
    }

    impl InMemoryProvider {
        fn with_assets(names: &[&str]) -> Self {
            let histories = names
                .iter()
                .enumerate()
                .map(|(i, name)| {
                    AssetHistory::from_points(Symbol::from(*name), *name, [(i as i64, 1.0, 1.0)])
                })
                .collect();
            Self {
                histories,
                ..Default::default()
            }
        }
    }

    #[async_trait]
    impl DataProvider for InMemoryProvider {
        async fn list_asset_ids(&self) -> Result<Vec<Symbol>> {
            Ok(self.histories.iter().map(|h| h.symbol.clone()).collect())
        }

        async fn fetch_history(&self, symbol: &Symbol, _lookback_days: u32) -> Result<AssetHistory> {
            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.max_in_flight.fetch_max(now, Ordering::SeqCst);
            // Later assets finish first to shake out ordering bugs.
            let delay = 20 - self.histories.iter().position(|h| &h.symbol == symbol).unwrap_or(0);
            tokio::time::sleep(Duration::from_millis(delay as u64)).await;
            self.in_flight.fetch_sub(1, Ordering::SeqCst);

            if self.failing.as_ref() == Some(symbol) {
                return Err(Error::ApiError {
                    code: 500,
                    msg: "upstream failure".to_string(),
                });
            }

            let by_symbol: HashMap<&Symbol, &AssetHistory> =
                self.histories.iter().map(|h| (&h.symbol, h)).collect();
            Ok(by_symbol[symbol].clone())
        }
    }

    #[tokio::test]
    async fn test_fetch_histories_keeps_listing_order() {
        let provider = InMemoryProvider::with_assets(&["Bitcoin", "Ethereum", "Dogecoin", "Monero"]);

        let histories = fetch_histories(&provider, 90, 4).await.unwrap();

        let names: Vec<&str> = histories.iter().map(|h| h.symbol.as_str()).collect();
        assert_eq!(names, vec!["Bitcoin", "Ethereum", "Dogecoin", "Monero"]);
    }

    #[tokio::test]
    async fn test_fetch_histories_respects_concurrency_bound() {
        let names: Vec<String> = (0..12).map(|i| format!("coin-{}", i)).collect();
        let refs: Vec<&str> = names.iter().map(String::as_str).collect();
        let provider = InMemoryProvider::with_assets(&refs);

        let histories = fetch_histories(&provider, 90, 3).await.unwrap();

        assert_eq!(histories.len(), 12);
        let peak = provider.max_in_flight.load(Ordering::SeqCst);
        assert!(peak <= 3, "peak in-flight was {}", peak);
        assert!(peak >= 2, "requests were not overlapped");
    }

    #[tokio::test]
    async fn test_fetch_histories_surfaces_errors() {
        let mut provider = InMemoryProvider::with_assets(&["Bitcoin", "Ethereum", "Dogecoin"]);
        provider.failing = Some(Symbol::from("Ethereum"));

        let err = fetch_histories(&provider, 90, 2).await.unwrap_err();
        assert!(matches!(err, Error::ApiError { code: 500, .. }));
    }

    #[tokio::test]
    async fn test_zero_concurrency_still_makes_progress() {
        let provider = InMemoryProvider::with_assets(&["Bitcoin"]);
        let histories = fetch_histories(&provider, 90, 0).await.unwrap();
        assert_eq!(histories.len(), 1);
    }
}
