// In crates/core-types/src/types.rs

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// The identifier of a tracked asset (e.g. "Bitcoin").
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Symbol(pub String);

impl Symbol {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

impl From<&str> for Symbol {
    fn from(value: &str) -> Self {
        Symbol(value.to_string())
    }
}

/// A single price/volume observation for one asset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotEvent {
    pub symbol: Symbol,
    /// Epoch seconds.
    pub timestamp: i64,
    pub price: f64,
    pub volume: f64,
}

impl SnapshotEvent {
    /// The market capitalization proxy used to rank assets.
    pub fn value(&self) -> f64 {
        self.price * self.volume
    }

    /// Rejects negative or non-finite prices and volumes.
    pub fn validate(&self) -> Result<()> {
        let reason = if !self.price.is_finite() || self.price < 0.0 {
            format!("price {} is not a non-negative finite number", self.price)
        } else if !self.volume.is_finite() || self.volume < 0.0 {
            format!("volume {} is not a non-negative finite number", self.volume)
        } else {
            return Ok(());
        };

        Err(Error::InvalidSnapshot {
            symbol: self.symbol.clone(),
            timestamp: self.timestamp,
            reason,
        })
    }
}

/// The full ordered series of snapshots for one asset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetHistory {
    pub symbol: Symbol,
    /// Human readable name as reported by the data source.
    pub label: String,
    pub events: Vec<SnapshotEvent>,
}

impl AssetHistory {
    /// Builds a history from `(timestamp, price, volume)` points.
    pub fn from_points(
        symbol: Symbol,
        label: impl Into<String>,
        points: impl IntoIterator<Item = (i64, f64, f64)>,
    ) -> Self {
        let events = points
            .into_iter()
            .map(|(timestamp, price, volume)| SnapshotEvent {
                symbol: symbol.clone(),
                timestamp,
                price,
                volume,
            })
            .collect();

        Self {
            symbol,
            label: label.into(),
            events,
        }
    }

    /// Checks every event and that timestamps are strictly ascending.
    ///
    /// The event stream merger relies on this ordering and does not check it itself.
    pub fn validate(&self) -> Result<()> {
        for event in &self.events {
            event.validate()?;
        }

        for pair in self.events.windows(2) {
            if pair[1].timestamp <= pair[0].timestamp {
                return Err(Error::NonMonotonicHistory {
                    symbol: self.symbol.clone(),
                    previous: pair[0].timestamp,
                    next: pair[1].timestamp,
                });
            }
        }

        Ok(())
    }
}

/// One row of the leaderboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeaderboardEntry {
    pub symbol: Symbol,
    pub value: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    Buy,
    Sell,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Buy => f.pad("BUY"),
            Action::Sell => f.pad("SELL"),
        }
    }
}

/// An actionable leaderboard transition priced at the batch it happened in.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Signal {
    pub symbol: Symbol,
    pub action: Action,
    pub price: f64,
    pub timestamp: i64,
}

/// The membership changes produced by a single tracker update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transitions {
    pub admitted: BTreeSet<Symbol>,
    pub evicted: BTreeSet<Symbol>,
}

impl Transitions {
    pub fn is_empty(&self) -> bool {
        self.admitted.is_empty() && self.evicted.is_empty()
    }
}
