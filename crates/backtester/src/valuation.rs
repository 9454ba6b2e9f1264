// In crates/backtester/src/valuation.rs

use std::collections::HashMap;

use core_types::Symbol;

use crate::stream::Batch;

/// The last known market capitalization proxy for every asset seen so far.
///
/// Assets missing from a batch keep their previous value. Entries are never removed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValuationView {
    values: HashMap<Symbol, f64>,
}

impl ValuationView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrites the value of every asset that traded in `batch`.
    pub fn apply(&mut self, batch: &Batch<'_>) {
        for event in &batch.events {
            self.values.insert(event.symbol.clone(), event.value());
        }
    }

    pub fn get(&self, symbol: &Symbol) -> Option<f64> {
        self.values.get(symbol).copied()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Symbol, f64)> {
        self.values.iter().map(|(symbol, value)| (symbol, *value))
    }
}

impl FromIterator<(Symbol, f64)> for ValuationView {
    fn from_iter<T: IntoIterator<Item = (Symbol, f64)>>(iter: T) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}
