// In crates/backtester/src/lib.rs

pub mod emitter;
pub mod leaderboard;
pub mod logger;
pub mod stream;
pub mod valuation;

use anyhow::Context;
use chrono::DateTime;
use core_types::{Action, AssetHistory};
use strategies::Strategy;

pub use emitter::emit_signals;
pub use leaderboard::{select_top, DEFAULT_LIMIT};
pub use logger::{LeaderboardReport, SignalLogger};
pub use stream::{Batch, EventStream};
pub use valuation::ValuationView;

/// Replays historical snapshots through the leaderboard pipeline.
///
/// Every batch flows through the same steps: valuation update, top-N selection,
/// membership assessment and signal pricing. A backtester is consumed by `run`
/// so membership state never leaks from one replay into the next.
pub struct Backtester {
    /// The membership policy under test.
    pub strategy: Box<dyn Strategy + Send>,
    /// Size of the leaderboard.
    pub limit: usize,
    logger: SignalLogger,
}

impl Backtester {
    pub fn new(strategy: Box<dyn Strategy + Send>, limit: usize) -> Self {
        Self {
            strategy,
            limit,
            logger: SignalLogger::new(),
        }
    }

    pub fn run(mut self, histories: &[AssetHistory]) -> anyhow::Result<LeaderboardReport> {
        tracing::info!(
            assets = histories.len(),
            limit = self.limit,
            strategy = self.strategy.name(),
            "Starting leaderboard replay."
        );

        let mut view = ValuationView::new();

        for batch in EventStream::new(histories) {
            // Ignore early seed data where all values are 0.
            if batch.is_seed() {
                tracing::debug!(timestamp = batch.timestamp, "Skipping all-zero seed batch.");
                self.logger.record_seed_batch();
                continue;
            }

            tracing::debug!(time = %readable_time(batch.timestamp), "Updating for timestamp.");

            view.apply(&batch);
            let top_now = select_top(&view, self.limit);
            let transitions = self.strategy.assess(&top_now, batch.timestamp);

            let signals = emit_signals(&transitions, &batch)
                .with_context(|| format!("Failed to price signals for batch {}", batch.timestamp))?;

            for signal in signals {
                match signal.action {
                    Action::Buy => {
                        tracing::warn!(symbol = %signal.symbol, price = signal.price, "Buying.")
                    }
                    Action::Sell => {
                        tracing::warn!(symbol = %signal.symbol, price = signal.price, "Selling.")
                    }
                }
                self.logger.record_signal(signal);
            }

            self.logger.record_batch(batch.timestamp);
        }

        let report = self.logger.finish(self.strategy.members());
        tracing::info!(
            batches = report.batches_processed,
            skipped = report.seed_batches_skipped,
            signals = report.signals.len(),
            "Leaderboard replay finished."
        );

        Ok(report)
    }
}

fn readable_time(timestamp: i64) -> String {
    DateTime::from_timestamp(timestamp, 0)
        .map(|dt| dt.to_rfc3339())
        .unwrap_or_else(|| timestamp.to_string())
}

/// Helper function to print the leaderboard report in a readable format.
pub fn print_report(report: &LeaderboardReport) {
    println!("\n--- Leaderboard Replay Report ---");
    println!("---------------------------------");
    println!("Batches Processed:     {}", report.batches_processed);
    println!("Seed Batches Skipped:  {}", report.seed_batches_skipped);
    if let (Some(first), Some(last)) = (report.first_timestamp, report.last_timestamp) {
        println!("Period:                {} .. {}", readable_time(first), readable_time(last));
    }
    println!("Signals:               {}", report.signals.len());
    println!("---------------------------------");

    for signal in &report.signals {
        println!(
            "  {}  {:<4}  {:<24}  {:.8}",
            readable_time(signal.timestamp),
            signal.action,
            signal.symbol,
            signal.price
        );
    }
    if !report.signals.is_empty() {
        println!("---------------------------------");
    }

    let members: Vec<&str> = report.final_members.iter().map(|s| s.as_str()).collect();
    println!("Final Members ({}): {}", members.len(), members.join(", "));
}
