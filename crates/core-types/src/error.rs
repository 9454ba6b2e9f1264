// In crates/core-types/src/error.rs

use thiserror::Error;

use crate::types::{Action, Symbol};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// A membership transition referenced an asset with no event in the triggering batch.
    #[error("No price for {symbol} in batch {timestamp} while emitting a {action} signal")]
    MissingPrice {
        symbol: Symbol,
        action: Action,
        timestamp: i64,
    },

    #[error("Invalid snapshot for {symbol} at {timestamp}: {reason}")]
    InvalidSnapshot {
        symbol: Symbol,
        timestamp: i64,
        reason: String,
    },

    #[error("History for {symbol} is not strictly ascending: {previous} followed by {next}")]
    NonMonotonicHistory {
        symbol: Symbol,
        previous: i64,
        next: i64,
    },

    #[error("Unknown strategy: {0}")]
    UnknownStrategy(String),

    #[error("Invalid strategy settings: {0}")]
    InvalidSettings(String),
}

pub type Result<T> = std::result::Result<T, Error>;
