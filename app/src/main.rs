// In app/src/main.rs

use std::str::FromStr;
use std::time::Instant;

use anyhow::{Context, Result};
use api_client::{fetch_histories, ApiClient, DataProvider};
use app_config::Settings;
use backtester::Backtester;
use clap::{Parser, Subcommand};
use core_types::AssetHistory;
use history_cache::HistoryCache;
use tokio::task;
use tracing_subscriber::prelude::*;

// --- Command-Line Interface Definition ---

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about,
    long_about = "Replays market history to see how the top coins by volume-weighted value change over time."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Lists every asset id the data provider tracks.
    Assets,

    /// Downloads the history of every asset and writes it to the cache.
    Fetch,

    /// Replays the histories and reports leaderboard entries and exits.
    Analyze {
        /// Ignore the cache and download fresh histories first.
        #[arg(long)]
        refresh: bool,

        /// Override the configured leaderboard size.
        #[arg(short, long)]
        limit: Option<usize>,

        /// Print the report as JSON instead of a table.
        #[arg(long)]
        json: bool,
    },
}

// --- Main Application Entry Point ---

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from a .env file, if it exists.
    dotenvy::dotenv().ok();

    // Parse command-line arguments.
    let cli = Cli::parse();

    let settings = app_config::load_settings().context("Failed to load settings")?;
    init_tracing(&settings.app.log_level)?;

    tracing::info!(environment = %settings.app.environment, "Starting toplist");

    match cli.command {
        Commands::Assets => handle_assets(&settings).await?,
        Commands::Fetch => handle_fetch(&settings).await?,
        Commands::Analyze {
            refresh,
            limit,
            json,
        } => handle_analyze(settings, refresh, limit, json).await?,
    }

    Ok(())
}

/// Installs the global subscriber: a formatted layer filtered per target.
fn init_tracing(log_level: &str) -> Result<()> {
    let level = tracing::Level::from_str(log_level)
        .map_err(|e| anyhow::anyhow!("Invalid log level '{}': {}", log_level, e))?;

    let fmt_layer = tracing_subscriber::fmt::layer().with_filter(
        tracing_subscriber::filter::Targets::new()
            .with_target("reqwest", tracing::Level::WARN)
            .with_target("hyper", tracing::Level::WARN)
            .with_target("hyper_util", tracing::Level::WARN)
            .with_default(level),
    );
    tracing_subscriber::registry().with(fmt_layer).init();

    Ok(())
}

// --- "Assets" Subcommand Logic ---

async fn handle_assets(settings: &Settings) -> Result<()> {
    let client = ApiClient::new(&settings.provider)?;
    let assets = client.list_asset_ids().await?;

    for asset in &assets {
        println!("{}", asset);
    }
    tracing::info!(count = assets.len(), "Listed assets.");

    Ok(())
}

// --- "Fetch" Subcommand Logic ---

async fn handle_fetch(settings: &Settings) -> Result<()> {
    let cache = HistoryCache::new(&settings.cache.path);
    let histories = download(settings).await?;
    cache.store(&histories)?;

    Ok(())
}

/// Downloads every history, bounded by the configured request concurrency.
async fn download(settings: &Settings) -> Result<Vec<AssetHistory>> {
    let start_time = Instant::now();
    let client = ApiClient::new(&settings.provider)?;

    let histories = fetch_histories(
        &client,
        settings.provider.lookback_days,
        settings.provider.max_concurrent_requests,
    )
    .await
    .context("Failed to fetch asset histories")?;

    tracing::info!(duration = ?start_time.elapsed(), count = histories.len(), "Download finished.");
    Ok(histories)
}

// --- "Analyze" Subcommand Logic ---

async fn handle_analyze(
    settings: Settings,
    refresh: bool,
    limit: Option<usize>,
    json: bool,
) -> Result<()> {
    // --- 1. Load Data ---
    let cache = HistoryCache::new(&settings.cache.path);
    let cached = if refresh { None } else { cache.load()? };

    let histories = match cached {
        Some(histories) => histories,
        None => {
            let histories = download(&settings).await?;
            cache.store(&histories)?;
            histories
        }
    };

    // --- 2. Instantiate Components ---
    let strategy = strategies::create_strategy(&settings.strategy)?;
    let limit = limit.unwrap_or(settings.leaderboard.limit);
    let replay = Backtester::new(strategy, limit);

    // --- 3. Run the Replay ---
    // The replay is synchronous and CPU bound, so keep it off the async workers.
    let report = task::spawn_blocking(move || replay.run(&histories)).await??;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        backtester::print_report(&report);
    }

    Ok(())
}
