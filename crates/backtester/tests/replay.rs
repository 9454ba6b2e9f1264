use std::sync::{Arc, Mutex};

use backtester::Backtester;
use core_types::{Action, AssetHistory, LeaderboardEntry, Symbol, Transitions};
use strategies::{HysteresisTracker, Strategy};

const BASE: i64 = 1_500_000_000;
const DAY: i64 = 86_400;
const SEED_BATCHES: i64 = 3;

fn ts(batch: i64) -> i64 {
    BASE + batch * DAY
}

/// A history with `SEED_BATCHES` zero-volume days followed by `batches` live days.
fn history(name: &str, batches: i64, point: impl Fn(i64) -> (f64, f64)) -> AssetHistory {
    let seeds = (1 - SEED_BATCHES..=0).map(|b| (ts(b), 1.0, 0.0));
    let live = (1..=batches).map(|b| {
        let (price, volume) = point(b);
        (ts(b), price, volume)
    });
    AssetHistory::from_points(Symbol::from(name), name, seeds.chain(live).collect::<Vec<_>>())
}

fn summary(signals: &[core_types::Signal]) -> Vec<(&str, Action, f64, i64)> {
    signals
        .iter()
        .map(|s| (s.symbol.as_str(), s.action, s.price, s.timestamp))
        .collect()
}

#[test]
fn test_leader_is_bought_then_sold_after_sustained_absence() {
    let histories = vec![
        // Leads for 60 days, then its volume collapses.
        history("X", 100, |b| (10.0 + b as f64, if b <= 60 { 100.0 } else { 0.01 })),
        history("Y", 100, |_| (5.0, 100.0)),
        history("Z", 100, |_| (1.0, 10.0)),
    ];

    let report = Backtester::new(Box::new(HysteresisTracker::default()), 2)
        .run(&histories)
        .unwrap();

    assert_eq!(report.batches_processed, 100);
    assert_eq!(report.seed_batches_skipped, SEED_BATCHES as usize);
    assert_eq!(report.first_timestamp, Some(ts(1)));
    assert_eq!(report.last_timestamp, Some(ts(100)));

    // Admitted on the 49th straight day on the board, evicted 35 days after the last one.
    assert_eq!(
        summary(&report.signals),
        vec![
            ("X", Action::Buy, 59.0, ts(49)),
            ("Y", Action::Buy, 5.0, ts(49)),
            ("X", Action::Sell, 105.0, ts(95)),
        ]
    );
    assert_eq!(report.final_members, vec![Symbol::from("Y")]);
}

#[test]
fn test_eviction_without_a_price_aborts_the_run() {
    let histories = vec![
        // X stops reporting after day 60; its last value is carried forward.
        history("X", 60, |b| (10.0 + b as f64, 100.0)),
        history("Y", 100, |b| (5.0, if b <= 60 { 100.0 } else { 10_000.0 })),
        history("Z", 100, |b| (1.0, if b <= 60 { 10.0 } else { 100_000.0 })),
    ];

    let err = Backtester::new(Box::new(HysteresisTracker::default()), 2)
        .run(&histories)
        .unwrap_err();

    assert_eq!(
        err.downcast_ref::<core_types::Error>(),
        Some(&core_types::Error::MissingPrice {
            symbol: Symbol::from("X"),
            action: Action::Sell,
            timestamp: ts(95),
        })
    );
}

/// Records every leaderboard it is shown and never admits anyone.
struct RecordingStrategy {
    seen: Arc<Mutex<Vec<(i64, Vec<LeaderboardEntry>)>>>,
}

impl Strategy for RecordingStrategy {
    fn name(&self) -> &'static str {
        "Recording"
    }

    fn assess(&mut self, top_now: &[LeaderboardEntry], timestamp: i64) -> Transitions {
        self.seen.lock().unwrap().push((timestamp, top_now.to_vec()));
        Transitions::default()
    }

    fn members(&self) -> Vec<Symbol> {
        Vec::new()
    }
}

#[test]
fn test_all_zero_batches_never_reach_the_view_or_strategy() {
    let histories = vec![
        AssetHistory::from_points(
            "A".into(),
            "A",
            [(0, 2.0, 0.0), (1, 2.0, 5.0), (2, 2.0, 0.0), (3, 2.0, 6.0), (4, 2.0, 0.0)],
        ),
        AssetHistory::from_points(
            "B".into(),
            "B",
            [(0, 1.0, 0.0), (1, 1.0, 1.0), (2, 1.0, 0.0), (3, 1.0, 1.0), (4, 1.0, 3.0)],
        ),
    ];
    let seen = Arc::new(Mutex::new(Vec::new()));
    let strategy = RecordingStrategy { seen: seen.clone() };

    let report = Backtester::new(Box::new(strategy), 20).run(&histories).unwrap();

    assert_eq!(report.batches_processed, 3);
    assert_eq!(report.seed_batches_skipped, 2);

    let seen = seen.lock().unwrap();
    let boards: Vec<(i64, Vec<(&str, f64)>)> = seen
        .iter()
        .map(|(t, top)| (*t, top.iter().map(|e| (e.symbol.as_str(), e.value)).collect()))
        .collect();
    assert_eq!(
        boards,
        vec![
            (1, vec![("A", 10.0), ("B", 1.0)]),
            // Batch 2 was all zeros, so batch 3 builds on batch 1's values.
            (3, vec![("A", 12.0), ("B", 1.0)]),
            // A single zero-volume asset is still recorded.
            (4, vec![("B", 3.0), ("A", 0.0)]),
        ]
    );
}

#[test]
fn test_empty_input_produces_an_empty_report() {
    let report = Backtester::new(Box::new(HysteresisTracker::default()), 20)
        .run(&[])
        .unwrap();

    assert_eq!(report.batches_processed, 0);
    assert!(report.signals.is_empty());
    assert!(report.first_timestamp.is_none());
}

#[test]
fn test_report_serializes_signals() {
    let histories = vec![history("X", 50, |_| (3.0, 1.0))];
    let report = Backtester::new(Box::new(HysteresisTracker::default()), 20)
        .run(&histories)
        .unwrap();

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["signals"][0]["symbol"], "X");
    assert_eq!(json["signals"][0]["action"], "Buy");
    assert_eq!(json["final_members"][0], "X");
}
