// In crates/strategies/src/hysteresis.rs

use std::collections::{BTreeSet, HashMap};

use core_types::{LeaderboardEntry, Symbol, Transitions};

use crate::types::HysteresisSettings;
use crate::Strategy;

/// Default score needed for admission: ten sightings, five times over.
pub const ADMISSION_THRESHOLD: i64 = 10 * 5;
/// Default eviction countdown: seven sightings, five times over.
pub const EVICTION_WINDOW: i64 = 7 * 5;

/// Score added for every batch a non-member appears on the leaderboard.
const APPEARANCE_CREDIT: i64 = 2;
/// Score removed from every pending asset on every batch.
const DECAY: i64 = 1;

/// Where a single asset currently sits in the admission/eviction cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MembershipState {
    Unseen,
    /// Accumulating interest; carries the current admission score.
    Pending(i64),
    /// A leaderboard member; carries the remaining eviction countdown.
    Confirmed(i64),
}

/// A debounced leaderboard membership tracker.
///
/// Assets must keep showing up on the leaderboard before they are admitted, and
/// must stay away for a whole eviction window before they are dropped again.
#[derive(Debug, Clone)]
pub struct HysteresisTracker {
    settings: HysteresisSettings,
    /// Confirmed members mapped to their remaining eviction countdown.
    confirmed: HashMap<Symbol, i64>,
    /// Non-members mapped to their admission score.
    pending: HashMap<Symbol, i64>,
}

impl HysteresisTracker {
    pub fn new(settings: HysteresisSettings) -> Self {
        Self {
            settings,
            confirmed: HashMap::new(),
            pending: HashMap::new(),
        }
    }

    pub fn state_of(&self, symbol: &Symbol) -> MembershipState {
        if let Some(countdown) = self.confirmed.get(symbol) {
            MembershipState::Confirmed(*countdown)
        } else if let Some(score) = self.pending.get(symbol) {
            MembershipState::Pending(*score)
        } else {
            MembershipState::Unseen
        }
    }

    /// Advances the tracker by one batch.
    ///
    /// The steps run in a fixed order: decay, reinforce, promote, age, evict.
    /// Promotion happens before aging, so an asset can never be admitted and
    /// evicted by the same call.
    pub fn update(&mut self, top_now: &[LeaderboardEntry], timestamp: i64) -> Transitions {
        let window = self.settings.eviction_window;

        // 1. Decay. Assets on this batch's leaderboard get it back below.
        for score in self.pending.values_mut() {
            *score -= DECAY;
        }

        // 2. Reinforce members, accumulate interest for everyone else.
        for entry in top_now {
            match self.confirmed.get_mut(&entry.symbol) {
                Some(countdown) => *countdown = window,
                None => {
                    *self.pending.entry(entry.symbol.clone()).or_insert(0) += APPEARANCE_CREDIT;
                }
            }
        }

        // 3. Promote.
        let admitted: BTreeSet<Symbol> = self
            .pending
            .iter()
            .filter(|(_, score)| **score >= self.settings.admission_threshold)
            .map(|(symbol, _)| symbol.clone())
            .collect();

        for symbol in &admitted {
            self.pending.remove(symbol);
            self.confirmed.insert(symbol.clone(), window);
            tracing::debug!(%symbol, timestamp, "Asset has entered the top listings.");
        }

        // 4. Age every member, including the ones promoted just now.
        let mut evicted = BTreeSet::new();
        for (symbol, countdown) in self.confirmed.iter_mut() {
            *countdown -= 1;
            if *countdown < 0 {
                evicted.insert(symbol.clone());
            }
        }

        // 5. Evict. Dropped assets start over from Unseen.
        for symbol in &evicted {
            self.confirmed.remove(symbol);
            tracing::debug!(%symbol, timestamp, window, "Asset has dropped off the top listings.");
        }

        Transitions { admitted, evicted }
    }
}

impl Default for HysteresisTracker {
    fn default() -> Self {
        Self::new(HysteresisSettings::default())
    }
}

impl Strategy for HysteresisTracker {
    fn name(&self) -> &'static str {
        "Hysteresis"
    }

    fn assess(&mut self, top_now: &[LeaderboardEntry], timestamp: i64) -> Transitions {
        self.update(top_now, timestamp)
    }

    fn members(&self) -> Vec<Symbol> {
        let mut members: Vec<Symbol> = self.confirmed.keys().cloned().collect();
        members.sort();
        members
    }
}
