// In crates/api-client/src/types.rs

use reqwest::Client;
use serde::Deserialize;

/// The client for the WorldCoinIndex REST API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    /// The persistent HTTP client.
    pub http_client: Client,
    /// The key for the market listing endpoint.
    pub api_key: String,
    /// The base URL of the API.
    pub base_url: String,
    /// Fiat currency the market listing is quoted in.
    pub fiat: String,
    /// Suffix stripped from market names to get asset ids.
    pub market_suffix: String,
}

/// Response of `GET /apiservice/getmarkets`.
#[derive(Debug, Deserialize)]
pub struct MarketsResponse {
    /// The listing comes back wrapped in an extra array.
    #[serde(rename = "Markets")]
    pub markets: Vec<Vec<Market>>,
}

/// One row of the market listing.
#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "PascalCase")]
pub struct Market {
    /// The market name (e.g., "Bitcoin/BTC").
    pub name: String,
    #[serde(default)]
    pub label: Option<String>,
}

/// Response of `POST /home/GetGraphdatatesttest`.
#[derive(Debug, Deserialize)]
pub struct RawHistory {
    #[serde(default)]
    pub primaryname: String,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub data: Vec<RawPoint>,
}

/// A single point of a history graph.
#[derive(Debug, Deserialize, Clone, Copy)]
#[serde(rename_all = "PascalCase")]
pub struct RawPoint {
    /// Epoch seconds.
    pub timestamp: i64,
    pub price: f64,
    pub volume: f64,
}
