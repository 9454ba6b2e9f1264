// In crates/strategies/src/lib.rs

use core_types::{LeaderboardEntry, Symbol, Transitions};

pub mod factory;
pub mod hysteresis;
pub mod types;

pub use factory::create_strategy;
pub use hysteresis::{HysteresisTracker, MembershipState};

/// The universal interface for a leaderboard membership policy.
///
/// A strategy watches the leaderboard batch after batch and decides which assets
/// become confirmed members and which fall out. It is a stateful entity: every
/// instance owns its own bookkeeping, so independent runs never share state.
pub trait Strategy {
    /// The name of the strategy.
    fn name(&self) -> &'static str;

    /// Feeds one batch's leaderboard and returns the membership changes it caused.
    fn assess(&mut self, top_now: &[LeaderboardEntry], timestamp: i64) -> Transitions;

    /// The currently confirmed members, in ascending symbol order.
    fn members(&self) -> Vec<Symbol>;
}
