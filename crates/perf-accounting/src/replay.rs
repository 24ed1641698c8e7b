//! Single-writer replay task.
//!
//! The task owns the accumulator, so updates are applied from exactly one
//! execution context. Other tasks observe progress through a `watch`
//! channel of [`PerformanceSnapshot`]s, each taken between two updates.

use perf_core::types::FeedEvent;
use perf_core::PerformanceResult;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::info;

use crate::accumulator::PerformanceAccumulator;
use crate::metrics::PerformanceSnapshot;
use crate::report::PerformanceReport;

/// Drives a feed of events through one accumulator.
pub struct ReplayEngine {
    accumulator: PerformanceAccumulator,
    snapshots: watch::Sender<PerformanceSnapshot>,
}

impl ReplayEngine {
    /// Create a new replay engine.
    pub fn new(accumulator: PerformanceAccumulator) -> Self {
        let (snapshots, _) = watch::channel(accumulator.snapshot());
        Self {
            accumulator,
            snapshots,
        }
    }

    /// Receive a snapshot after every applied event.
    pub fn subscribe(&self) -> watch::Receiver<PerformanceSnapshot> {
        self.snapshots.subscribe()
    }

    /// Consume the feed until it closes.
    ///
    /// The first rejected event stops the replay and its error is returned;
    /// nothing is retried or skipped.
    pub async fn run(
        mut self,
        mut events: mpsc::Receiver<FeedEvent>,
    ) -> PerformanceResult<PerformanceReport> {
        info!(
            mode = %self.accumulator.mode(),
            commission = self.accumulator.commission_model().name(),
            "Starting replay"
        );

        while let Some(event) = events.recv().await {
            self.accumulator.apply_event(&event)?;
            self.snapshots.send_replace(self.accumulator.snapshot());
        }

        let report = PerformanceReport::from_accumulator(&self.accumulator);
        info!(
            updates = report.updates_applied,
            trades = report.metrics.trades,
            net_profit = report.metrics.net_profit,
            "Replay finished"
        );
        Ok(report)
    }

    /// Run on a spawned task.
    pub fn spawn(
        self,
        events: mpsc::Receiver<FeedEvent>,
    ) -> JoinHandle<PerformanceResult<PerformanceReport>> {
        tokio::spawn(self.run(events))
    }
}
