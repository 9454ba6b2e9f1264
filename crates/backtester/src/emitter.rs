// In crates/backtester/src/emitter.rs

use core_types::{Action, Error, Result, Signal, Symbol, Transitions};

use crate::stream::Batch;

/// Prices every membership change at the batch that caused it.
///
/// BUY signals for admitted assets come first, then SELL signals for evicted
/// ones, each group in symbol order. An asset with no event in `batch` is a
/// bookkeeping bug upstream and fails the whole batch.
pub fn emit_signals(transitions: &Transitions, batch: &Batch<'_>) -> Result<Vec<Signal>> {
    let buys = transitions.admitted.iter().map(|s| (s, Action::Buy));
    let sells = transitions.evicted.iter().map(|s| (s, Action::Sell));

    buys.chain(sells)
        .map(|(symbol, action)| price_signal(symbol, action, batch))
        .collect()
}

fn price_signal(symbol: &Symbol, action: Action, batch: &Batch<'_>) -> Result<Signal> {
    let event = batch.event_for(symbol).ok_or_else(|| Error::MissingPrice {
        symbol: symbol.clone(),
        action,
        timestamp: batch.timestamp,
    })?;

    Ok(Signal {
        symbol: symbol.clone(),
        action,
        price: event.price,
        timestamp: batch.timestamp,
    })
}
