//! Replay task integration tests.

use perf_accounting::{AccumulatorConfig, PerformanceAccumulator, ReplayEngine};
use perf_commission::{CommissionSchedule, NoCommission};
use perf_core::error::{PerformanceError, UpdateError};
use perf_core::types::{FeedEvent, Mode, TradeUpdate};
use tokio::sync::mpsc;

fn engine(schedule: Option<CommissionSchedule>) -> ReplayEngine {
    let commission = match schedule {
        Some(schedule) => schedule.build(),
        None => Box::new(NoCommission),
    };
    let accumulator = PerformanceAccumulator::new(AccumulatorConfig::default(), commission).unwrap();
    ReplayEngine::new(accumulator)
}

fn round_trips() -> Vec<FeedEvent> {
    vec![
        FeedEvent::fill(TradeUpdate::new(0, 10, 100.0, 10)),
        FeedEvent::Mark {
            timestamp: 30_000,
            price: 104.0,
        },
        FeedEvent::fill(TradeUpdate::new(60_000, -10, 110.0, 0)),
        FeedEvent::fill(TradeUpdate::new(120_000, -5, 50.0, -5)),
        FeedEvent::fill(TradeUpdate::new(240_000, 5, 60.0, 0)),
    ]
}

#[tokio::test]
async fn test_replay_produces_report() {
    let engine = engine(None);
    let (tx, rx) = mpsc::channel(4);
    let handle = engine.spawn(rx);

    for event in round_trips() {
        tx.send(event).await.unwrap();
    }
    drop(tx);

    let report = handle.await.unwrap().unwrap();
    assert_eq!(report.mode, Mode::BackTest);
    assert_eq!(report.updates_applied, 4);
    assert_eq!(report.metrics.trades, 2);
    assert_eq!(report.metrics.long_trades, 1);
    assert_eq!(report.metrics.short_trades, 1);
    assert!((report.metrics.net_profit - 50.0).abs() < 1e-9);
    assert!((report.metrics.profit_factor - 2.0).abs() < 1e-9);
    // 1 minute long, 2 minutes short
    assert!((report.metrics.average_duration_minutes - 1.5).abs() < 1e-9);
    assert_eq!(report.chart.len(), 4);
}

#[tokio::test]
async fn test_snapshots_follow_the_writer() {
    let engine = engine(Some(CommissionSchedule::bundled_north_america_futures()));
    let mut snapshots = engine.subscribe();
    assert_eq!(snapshots.borrow().trades, 0);

    let (tx, rx) = mpsc::channel(1);
    let handle = engine.spawn(rx);

    tx.send(FeedEvent::fill(TradeUpdate::new(0, 1, 4000.0, 1)))
        .await
        .unwrap();
    tx.send(FeedEvent::fill(TradeUpdate::new(1, -1, 4010.0, 0)))
        .await
        .unwrap();
    drop(tx);

    let report = handle.await.unwrap().unwrap();
    snapshots.changed().await.unwrap();
    let last = *snapshots.borrow();

    assert_eq!(last, report.metrics);
    assert_eq!(last.trades, 1);
    assert!((last.total_commission - 4.8).abs() < 1e-9);
    assert!((last.net_profit - (10.0 - 4.8)).abs() < 1e-9);
}

#[tokio::test]
async fn test_replay_stops_on_first_rejected_update() {
    let engine = engine(None);
    let (tx, rx) = mpsc::channel(8);

    tx.send(FeedEvent::fill(TradeUpdate::new(100, 10, 100.0, 10)))
        .await
        .unwrap();
    tx.send(FeedEvent::fill(TradeUpdate::new(50, -10, 100.0, 0)))
        .await
        .unwrap();
    drop(tx);

    let err = engine.run(rx).await.unwrap_err();
    assert!(matches!(
        err,
        PerformanceError::Update(UpdateError::OutOfOrder {
            previous: 100,
            timestamp: 50
        })
    ));
}
