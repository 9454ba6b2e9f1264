// In crates/backtester/src/logger.rs

use core_types::{Signal, Symbol};
use serde::Serialize;

/// The outcome of one pass over a set of asset histories.
#[derive(Debug, Clone, Default, Serialize)]
pub struct LeaderboardReport {
    pub batches_processed: usize,
    pub seed_batches_skipped: usize,
    pub first_timestamp: Option<i64>,
    pub last_timestamp: Option<i64>,
    pub signals: Vec<Signal>,
    /// Confirmed members when the stream ran out.
    pub final_members: Vec<Symbol>,
}

/// Records signals and batch bookkeeping while a run is in progress.
#[derive(Debug, Default)]
pub struct SignalLogger {
    report: LeaderboardReport,
}

impl SignalLogger {
    /// Creates a new, empty logger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a batch that made it through the whole pipeline.
    pub fn record_batch(&mut self, timestamp: i64) {
        self.report.batches_processed += 1;
        self.report.first_timestamp.get_or_insert(timestamp);
        self.report.last_timestamp = Some(timestamp);
    }

    pub fn record_seed_batch(&mut self) {
        self.report.seed_batches_skipped += 1;
    }

    pub fn record_signal(&mut self, signal: Signal) {
        self.report.signals.push(signal);
    }

    pub fn signals(&self) -> &[Signal] {
        &self.report.signals
    }

    /// Closes the log, attaching the members still confirmed at the end.
    pub fn finish(mut self, final_members: Vec<Symbol>) -> LeaderboardReport {
        self.report.final_members = final_members;
        self.report
    }
}
