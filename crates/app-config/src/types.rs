// In crates/app-config/src/types.rs

use std::path::PathBuf;

use serde::Deserialize;

use core_types::StrategyConfig;

#[derive(Deserialize, Debug, Clone, Default)]
pub struct Settings {
    /// The application's general settings.
    #[serde(default)]
    pub app: AppSettings,
    /// Settings for the market data provider.
    #[serde(default)]
    pub provider: ProviderSettings,
    /// Where fetched histories are cached between runs.
    #[serde(default)]
    pub cache: CacheSettings,
    #[serde(default)]
    pub leaderboard: LeaderboardSettings,
    /// The membership strategy and its `params` table.
    #[serde(default)]
    pub strategy: StrategyConfig,
}

#[derive(Deserialize, Debug, Clone)]
pub struct AppSettings {
    /// The environment the application is running in (e.g., "development", "production").
    #[serde(default = "default_environment")]
    pub environment: String,
    /// The log level for the application.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            environment: default_environment(),
            log_level: default_log_level(),
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct ProviderSettings {
    /// The REST API base URL of the data provider.
    #[serde(default = "default_rest_base_url")]
    pub rest_base_url: String,
    /// The API key for the market listing endpoint.
    #[serde(default)]
    pub api_key: String,
    /// Fiat currency the market listing is quoted in.
    #[serde(default = "default_fiat")]
    pub fiat: String,
    /// How many days of history to request per asset.
    #[serde(default = "default_lookback_days")]
    pub lookback_days: u32,
    /// Upper bound on history requests in flight at once.
    #[serde(default = "default_max_concurrent_requests")]
    pub max_concurrent_requests: usize,
    /// Suffix stripped from market names to get asset ids (e.g. "Bitcoin/BTC").
    #[serde(default = "default_market_suffix")]
    pub market_suffix: String,
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            rest_base_url: default_rest_base_url(),
            api_key: String::new(),
            fiat: default_fiat(),
            lookback_days: default_lookback_days(),
            max_concurrent_requests: default_max_concurrent_requests(),
            market_suffix: default_market_suffix(),
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct CacheSettings {
    #[serde(default = "default_cache_path")]
    pub path: PathBuf,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            path: default_cache_path(),
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct LeaderboardSettings {
    /// Number of assets on the leaderboard.
    #[serde(default = "default_limit")]
    pub limit: usize,
}

impl Default for LeaderboardSettings {
    fn default() -> Self {
        Self {
            limit: default_limit(),
        }
    }
}

/// Helper functions for serde defaults
fn default_environment() -> String { "development".to_string() }
fn default_log_level() -> String { "info".to_string() }
fn default_rest_base_url() -> String { "https://www.worldcoinindex.com".to_string() }
fn default_fiat() -> String { "usd".to_string() }
fn default_lookback_days() -> u32 { 90 }
fn default_max_concurrent_requests() -> usize { 100 }
fn default_market_suffix() -> String { "/BTC".to_string() }
fn default_cache_path() -> PathBuf { PathBuf::from("histories.json") }
fn default_limit() -> usize { 20 }
