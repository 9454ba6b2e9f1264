// In crates/api-client/src/lib.rs

use app_config::types::ProviderSettings;
use core_types::{AssetHistory, Symbol};
use serde_json::Value;

pub mod error;
pub mod provider;
pub mod types;

// Re-export public types
pub use error::{Error, Result};
pub use provider::{fetch_histories, DataProvider};
pub use types::*;

/// Page the history endpoint expects the request to come from.
const REFERER: &str = "https://www.worldcoinindex.com/coin/dogecoin";

impl ApiClient {
    /// Constructs a new ApiClient from ProviderSettings.
    pub fn new(settings: &ProviderSettings) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .build()
            .map_err(|e| Error::ClientBuildError(e.to_string()))?;

        Ok(ApiClient {
            http_client,
            api_key: settings.api_key.clone(),
            base_url: settings.rest_base_url.trim_end_matches('/').to_string(),
            fiat: settings.fiat.clone(),
            market_suffix: settings.market_suffix.clone(),
        })
    }

    /// Fetches the current market listing.
    ///
    /// This corresponds to the `GET /apiservice/getmarkets` endpoint.
    pub async fn get_markets(&self) -> Result<Vec<Market>> {
        tracing::debug!("Getting markets.");
        let url = format!("{}/apiservice/getmarkets", self.base_url);

        let body = self
            .http_client
            .get(&url)
            .query(&[("fiat", self.fiat.as_str()), ("key", self.api_key.as_str())])
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        parse_markets(&body)
    }

    /// Fetches the ids of every tracked asset.
    pub async fn get_coin_names(&self) -> Result<Vec<Symbol>> {
        tracing::debug!("Getting coin names.");
        let markets = self.get_markets().await?;
        Ok(coin_names(&markets, &self.market_suffix))
    }

    /// Fetches `days` of price/volume history for one asset.
    ///
    /// This corresponds to the `POST /home/GetGraphdatatesttest` endpoint.
    pub async fn get_history(&self, symbol: &Symbol, days: u32) -> Result<AssetHistory> {
        tracing::debug!(%symbol, days, "Getting history.");
        let url = format!("{}/home/GetGraphdatatesttest", self.base_url);
        let days = days.to_string();

        let body = self
            .http_client
            .post(&url)
            .header("Referer", REFERER)
            .header("X-Requested-With", "XMLHttpRequest")
            .form(&[("marketid", symbol.as_str()), ("days", days.as_str())])
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        parse_history(&body, symbol)
    }
}

/// Strips `suffix` from every market name, keeping the listing order.
pub fn coin_names(markets: &[Market], suffix: &str) -> Vec<Symbol> {
    markets
        .iter()
        .map(|market| {
            let name = market.name.strip_suffix(suffix).unwrap_or(&market.name);
            Symbol(name.to_string())
        })
        .collect()
}

/// Parses a market listing body, surfacing API error objects.
pub fn parse_markets(body: &str) -> Result<Vec<Market>> {
    let value: Value = serde_json::from_str(body)?;
    check_api_error(&value)?;

    let response: MarketsResponse = serde_json::from_value(value)?;
    response
        .markets
        .into_iter()
        .next()
        .ok_or_else(|| Error::UnexpectedResponse("market listing is empty".to_string()))
}

/// Parses and validates a history body for `requested`.
///
/// The history keeps the provider's `primaryname` as its id, falling back to the
/// requested id when the provider leaves it blank.
pub fn parse_history(body: &str, requested: &Symbol) -> Result<AssetHistory> {
    let value: Value = serde_json::from_str(body)?;
    check_api_error(&value)?;

    let raw: RawHistory = serde_json::from_value(value)?;
    let symbol = if raw.primaryname.is_empty() {
        requested.clone()
    } else {
        Symbol(raw.primaryname)
    };

    let history = AssetHistory::from_points(
        symbol,
        raw.label,
        raw.data.iter().map(|p| (p.timestamp, p.price, p.volume)),
    );
    history.validate()?;

    Ok(history)
}

fn check_api_error(value: &Value) -> Result<()> {
    if let Some(code) = value.get("code").and_then(Value::as_i64) {
        if code != 0 {
            let msg = value
                .get("msg")
                .and_then(Value::as_str)
                .unwrap_or("Unknown error")
                .to_string();
            return Err(Error::ApiError { code, msg });
        }
    }
    Ok(())
}
