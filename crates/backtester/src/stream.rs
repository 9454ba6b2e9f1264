// In crates/backtester/src/stream.rs

use core_types::{AssetHistory, SnapshotEvent};

/// Every snapshot that shares one merged timestamp.
#[derive(Debug, Clone, PartialEq)]
pub struct Batch<'a> {
    pub timestamp: i64,
    pub events: Vec<&'a SnapshotEvent>,
}

impl Batch<'_> {
    /// Early seed data arrives with zero volume across the board.
    pub fn is_seed(&self) -> bool {
        self.events.iter().all(|event| event.volume == 0.0)
    }

    /// The event for `symbol`, if it traded in this batch.
    pub fn event_for(&self, symbol: &core_types::Symbol) -> Option<&SnapshotEvent> {
        // Later series win when an id appears twice, matching the valuation view.
        self.events.iter().rev().find(|event| &event.symbol == symbol).copied()
    }
}

/// Merges per-asset histories into chronologically ordered batches.
///
/// Each history keeps its own read cursor. Every step takes the smallest
/// timestamp under any cursor and drains exactly the events at that time.
/// Histories are assumed to be strictly ascending; see `AssetHistory::validate`.
#[derive(Debug)]
pub struct EventStream<'a> {
    histories: &'a [AssetHistory],
    cursors: Vec<usize>,
}

impl<'a> EventStream<'a> {
    pub fn new(histories: &'a [AssetHistory]) -> Self {
        Self {
            histories,
            cursors: vec![0; histories.len()],
        }
    }

    fn head(&self, index: usize) -> Option<&'a SnapshotEvent> {
        self.histories[index].events.get(self.cursors[index])
    }
}

impl<'a> Iterator for EventStream<'a> {
    type Item = Batch<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let timestamp = (0..self.histories.len())
            .filter_map(|index| self.head(index))
            .map(|event| event.timestamp)
            .min()?;

        let mut events = Vec::new();
        for index in 0..self.histories.len() {
            if let Some(event) = self.head(index) {
                if event.timestamp == timestamp {
                    events.push(event);
                    self.cursors[index] += 1;
                }
            }
        }

        Some(Batch { timestamp, events })
    }
}
