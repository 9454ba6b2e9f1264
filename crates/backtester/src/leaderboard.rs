// In crates/backtester/src/leaderboard.rs

use core_types::LeaderboardEntry;

use crate::valuation::ValuationView;

/// How many assets make up the leaderboard unless configured otherwise.
pub const DEFAULT_LIMIT: usize = 20;

/// Returns the `limit` most valuable assets, highest value first.
///
/// Equal values are ordered by symbol so the output is reproducible.
pub fn select_top(view: &ValuationView, limit: usize) -> Vec<LeaderboardEntry> {
    let mut entries: Vec<LeaderboardEntry> = view
        .iter()
        .map(|(symbol, value)| LeaderboardEntry {
            symbol: symbol.clone(),
            value,
        })
        .collect();

    entries.sort_by(|a, b| {
        b.value
            .total_cmp(&a.value)
            .then_with(|| a.symbol.cmp(&b.symbol))
    });
    entries.truncate(limit);
    entries
}
