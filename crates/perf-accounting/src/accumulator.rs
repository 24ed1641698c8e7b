//! Performance accumulator.

use perf_core::error::{CommissionError, PerformanceError, UpdateError};
use perf_core::traits::CommissionModel;
use perf_core::types::{ChartSeries, FeedEvent, Mode, TimedValue, TradeUpdate};
use perf_core::PerformanceResult;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::metrics::PerformanceSnapshot;
use crate::statistics::{AccountState, CompletedTrade, RunningStatistics};

/// Accumulator configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AccumulatorConfig {
    /// Contract multiplier applied to every notional amount
    pub multiplier: i64,
    /// Session mode; only backtests record the chart series
    pub mode: Mode,
}

impl Default for AccumulatorConfig {
    fn default() -> Self {
        Self {
            multiplier: 1,
            mode: Mode::BackTest,
        }
    }
}

impl AccumulatorConfig {
    pub fn validate(&self) -> PerformanceResult<()> {
        if self.multiplier < 1 {
            return Err(PerformanceError::Config(format!(
                "multiplier must be at least 1, got {}",
                self.multiplier
            )));
        }
        Ok(())
    }
}

/// Streaming performance accumulator for one strategy.
///
/// Single writer: updates must be applied from one thread or task in
/// timestamp order. Readers that live elsewhere should work from a
/// [`PerformanceSnapshot`] or a chart snapshot rather than borrowing.
pub struct PerformanceAccumulator {
    config: AccumulatorConfig,
    commission: Box<dyn CommissionModel>,
    state: AccountState,
    chart: ChartSeries,
    updates_applied: u64,
}

impl std::fmt::Debug for PerformanceAccumulator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PerformanceAccumulator")
            .field("config", &self.config)
            .field("commission", &self.commission.name())
            .field("state", &self.state)
            .field("chart_len", &self.chart.len())
            .field("updates_applied", &self.updates_applied)
            .finish()
    }
}

impl PerformanceAccumulator {
    /// Create an empty accumulator.
    pub fn new(
        config: AccumulatorConfig,
        commission: Box<dyn CommissionModel>,
    ) -> PerformanceResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            commission,
            state: AccountState::new(),
            chart: ChartSeries::new(),
            updates_applied: 0,
        })
    }

    /// Apply one fill and, when given, revalue the position at `mark_price`.
    ///
    /// Either the whole update is booked or none of it is: contract
    /// violations and commission failures return an error and leave every
    /// aggregate, the position and the chart series unchanged.
    pub fn apply_update(
        &mut self,
        update: &TradeUpdate,
        mark_price: Option<f64>,
    ) -> PerformanceResult<Option<CompletedTrade>> {
        match self.try_apply(update, mark_price) {
            Ok(completed) => Ok(completed),
            Err(e) => {
                warn!(timestamp = update.timestamp, error = %e, "Rejected trade update");
                Err(e)
            }
        }
    }

    fn try_apply(
        &mut self,
        update: &TradeUpdate,
        mark_price: Option<f64>,
    ) -> PerformanceResult<Option<CompletedTrade>> {
        self.state.check(update)?;
        if let Some(price) = mark_price {
            validate_mark(price)?;
        }

        let commission = self.commission.cost(update.abs_quantity(), update.price)?;
        if !commission.is_finite() || commission < 0.0 {
            return Err(CommissionError::InvalidAmount(commission).into());
        }

        let transition = self
            .state
            .apply(update, commission, self.config.multiplier)?;
        self.state = transition.state;
        self.updates_applied += 1;

        if self.config.mode.records_history() {
            self.chart
                .record(update.timestamp, self.state.stats.realized_net_profit);
        }

        if let Some(price) = mark_price {
            self.state.mark(price, self.config.multiplier);
        }

        if let Some(trade) = &transition.completed {
            debug!(
                timestamp = trade.timestamp,
                direction = ?trade.direction,
                profit = trade.profit,
                net_profit = trade.net_profit,
                "Completed trade"
            );
        }

        Ok(transition.completed)
    }

    /// Revalue the open position at the latest market price.
    pub fn mark_to_market(&mut self, price: f64) -> PerformanceResult<()> {
        validate_mark(price)?;
        self.state.mark(price, self.config.multiplier);
        Ok(())
    }

    /// Revalue at a timestamped mark tick.
    ///
    /// Ticks follow the same ordering contract as fills: a tick older than
    /// the last event is rejected and leaves the valuation unchanged.
    pub fn apply_mark(&mut self, timestamp: i64, price: f64) -> PerformanceResult<()> {
        let result = validate_mark(price)
            .and_then(|_| self.state.mark_at(timestamp, price, self.config.multiplier));
        if let Err(e) = &result {
            warn!(timestamp, error = %e, "Rejected mark price");
        }
        result.map_err(PerformanceError::from)
    }

    /// Apply a feed event of either kind.
    pub fn apply_event(&mut self, event: &FeedEvent) -> PerformanceResult<Option<CompletedTrade>> {
        match event {
            FeedEvent::Fill { update, mark } => self.apply_update(update, *mark),
            FeedEvent::Mark { timestamp, price } => {
                self.apply_mark(*timestamp, *price).map(|_| None)
            }
        }
    }

    pub fn stats(&self) -> &RunningStatistics {
        &self.state.stats
    }

    pub fn state(&self) -> &AccountState {
        &self.state
    }

    pub fn position(&self) -> i64 {
        self.state.position
    }

    /// Whether the most recent update completed a trade.
    pub fn is_completed_trade(&self) -> bool {
        self.state.is_completed_trade
    }

    pub fn config(&self) -> &AccumulatorConfig {
        &self.config
    }

    pub fn mode(&self) -> Mode {
        self.config.mode
    }

    pub fn commission_model(&self) -> &dyn CommissionModel {
        self.commission.as_ref()
    }

    pub fn updates_applied(&self) -> u64 {
        self.updates_applied
    }

    pub fn chart(&self) -> &ChartSeries {
        &self.chart
    }

    /// Copy of the chart series as of now.
    pub fn chart_snapshot(&self) -> Vec<TimedValue> {
        self.chart.snapshot()
    }

    /// Capture every metric at once.
    pub fn snapshot(&self) -> PerformanceSnapshot {
        PerformanceSnapshot::capture(&self.state.stats, self.state.position)
    }
}

fn validate_mark(price: f64) -> Result<(), UpdateError> {
    if !price.is_finite() || price <= 0.0 {
        return Err(UpdateError::InvalidMarkPrice(price));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FlatFee(f64);

    impl CommissionModel for FlatFee {
        fn cost(&self, _quantity: u64, _price: f64) -> Result<f64, CommissionError> {
            Ok(self.0)
        }

        fn name(&self) -> &str {
            "flat"
        }
    }

    struct Failing;

    impl CommissionModel for Failing {
        fn cost(&self, _quantity: u64, _price: f64) -> Result<f64, CommissionError> {
            Err(CommissionError::Unavailable("schedule offline".to_string()))
        }

        fn name(&self) -> &str {
            "failing"
        }
    }

    fn accumulator(mode: Mode, fee: f64) -> PerformanceAccumulator {
        let config = AccumulatorConfig {
            multiplier: 1,
            mode,
        };
        PerformanceAccumulator::new(config, Box::new(FlatFee(fee))).unwrap()
    }

    fn trade(acc: &mut PerformanceAccumulator, ts: i64, qty: i64, price: f64) {
        let update = TradeUpdate::new(ts, qty, price, acc.position() + qty);
        acc.apply_update(&update, None).unwrap();
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_winning_round_trip() {
        let mut acc = accumulator(Mode::BackTest, 0.0);
        trade(&mut acc, 1, 10, 100.0);
        trade(&mut acc, 2, -10, 110.0);

        let stats = acc.stats();
        assert_eq!(stats.trades(), 1);
        assert!(approx(stats.net_profit(), 100.0));
        assert!(approx(stats.gross_profit(), 100.0));
        assert_eq!(stats.gross_loss(), 0.0);
        assert_eq!(stats.profit_factor(), f64::INFINITY);
        assert!(approx(stats.percent_profitable(), 100.0));
        assert!(acc.is_completed_trade());
    }

    #[test]
    fn test_losing_round_trip() {
        let mut acc = accumulator(Mode::BackTest, 0.0);
        trade(&mut acc, 1, 10, 100.0);
        trade(&mut acc, 2, -10, 90.0);

        let stats = acc.stats();
        assert_eq!(stats.trades(), 1);
        assert!(approx(stats.net_profit(), -100.0));
        assert!(approx(stats.gross_loss(), 100.0));
        assert_eq!(stats.percent_profitable(), 0.0);
        assert_eq!(stats.kelly_criterion(), 0.0);
    }

    #[test]
    fn test_one_win_one_loss() {
        let mut acc = accumulator(Mode::BackTest, 0.0);
        trade(&mut acc, 1, 10, 100.0);
        trade(&mut acc, 2, -10, 110.0);
        trade(&mut acc, 3, 10, 100.0);
        trade(&mut acc, 4, -10, 95.0);

        let stats = acc.stats();
        assert_eq!(stats.trades(), 2);
        assert_eq!(stats.profitable_trades(), 1);
        assert!(approx(stats.gross_profit(), 100.0));
        assert!(approx(stats.gross_loss(), 50.0));
        assert!(approx(stats.profit_factor(), 2.0));
        assert!(approx(stats.net_profit(), 50.0));
    }

    #[test]
    fn test_chart_records_every_update_in_backtest() {
        let mut acc = accumulator(Mode::BackTest, 0.0);
        trade(&mut acc, 1, 10, 100.0);
        trade(&mut acc, 2, 5, 101.0);
        trade(&mut acc, 3, -15, 110.0);

        let points = acc.chart_snapshot();
        assert_eq!(points.len(), 3);
        assert_eq!(
            points.iter().map(|p| p.timestamp).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );
        // realized net profit only moves on the completed trade
        assert_eq!(points[0].value, 0.0);
        assert_eq!(points[1].value, 0.0);
        assert!(approx(points[2].value, 145.0));
    }

    #[test]
    fn test_chart_not_recorded_outside_backtest() {
        for mode in [Mode::Optimization, Mode::ForwardTest, Mode::Trade] {
            let mut acc = accumulator(mode, 0.0);
            trade(&mut acc, 1, 10, 100.0);
            trade(&mut acc, 2, -10, 110.0);
            assert!(acc.chart().is_empty());
            assert_eq!(acc.stats().trades(), 1);
        }
    }

    #[test]
    fn test_commission_subtracted_once_per_update() {
        let mut acc = accumulator(Mode::BackTest, 1.5);
        trade(&mut acc, 1, 10, 100.0);
        trade(&mut acc, 2, -10, 110.0);
        trade(&mut acc, 3, -10, 110.0);

        let stats = acc.stats();
        assert!(approx(stats.total_commission(), 4.5));
        assert!(approx(stats.trade_commission(), 1.5));
        // short still open at 110, so only commission moved
        assert!(approx(stats.net_profit(), 100.0 - 4.5));
    }

    #[test]
    fn test_mark_price_revalues_open_position() {
        let mut acc = accumulator(Mode::BackTest, 0.0);
        let update = TradeUpdate::new(1, 10, 100.0, 10);
        acc.apply_update(&update, Some(104.0)).unwrap();

        assert!(approx(acc.stats().net_profit(), 40.0));
        assert_eq!(acc.stats().trades(), 0);

        acc.mark_to_market(97.0).unwrap();
        assert!(approx(acc.stats().net_profit(), -30.0));
        assert!(acc.mark_to_market(0.0).is_err());
    }

    #[test]
    fn test_failing_commission_leaves_state_untouched() {
        let mut acc = PerformanceAccumulator::new(AccumulatorConfig::default(), Box::new(Failing))
            .unwrap();

        let err = acc
            .apply_update(&TradeUpdate::new(1, 10, 100.0, 10), None)
            .unwrap_err();
        assert!(matches!(err, PerformanceError::Commission(_)));
        assert_eq!(acc.position(), 0);
        assert_eq!(acc.updates_applied(), 0);
        assert!(acc.chart().is_empty());
        assert_eq!(*acc.stats(), RunningStatistics::default());
    }

    #[test]
    fn test_negative_commission_rejected() {
        let mut acc = accumulator(Mode::BackTest, -1.0);
        let err = acc
            .apply_update(&TradeUpdate::new(1, 10, 100.0, 10), None)
            .unwrap_err();
        assert!(matches!(
            err,
            PerformanceError::Commission(CommissionError::InvalidAmount(_))
        ));
    }

    #[test]
    fn test_invalid_updates_rejected() {
        let mut acc = accumulator(Mode::BackTest, 0.0);
        trade(&mut acc, 10, 10, 100.0);
        let before = *acc.state();

        assert!(acc.apply_update(&TradeUpdate::new(11, 0, 100.0, 10), None).is_err());
        assert!(acc.apply_update(&TradeUpdate::new(11, -10, -1.0, 0), None).is_err());
        assert!(acc.apply_update(&TradeUpdate::new(9, -10, 100.0, 0), None).is_err());
        assert!(acc.apply_update(&TradeUpdate::new(11, -10, 100.0, 5), None).is_err());
        assert!(acc
            .apply_update(&TradeUpdate::new(11, -10, 100.0, 0), Some(f64::NAN))
            .is_err());

        assert_eq!(*acc.state(), before);
        assert_eq!(acc.chart().len(), 1);
    }

    #[test]
    fn test_multiplier_scales_notional() {
        let config = AccumulatorConfig {
            multiplier: 50,
            mode: Mode::Trade,
        };
        let mut acc = PerformanceAccumulator::new(config, Box::new(FlatFee(0.0))).unwrap();
        trade(&mut acc, 1, 2, 4000.0);
        trade(&mut acc, 2, -2, 4010.0);

        assert!(approx(acc.stats().net_profit(), 2.0 * 10.0 * 50.0));
    }

    #[test]
    fn test_zero_multiplier_rejected() {
        let config = AccumulatorConfig {
            multiplier: 0,
            mode: Mode::BackTest,
        };
        assert!(PerformanceAccumulator::new(config, Box::new(FlatFee(0.0))).is_err());
    }

    #[test]
    fn test_apply_event() {
        let mut acc = accumulator(Mode::BackTest, 0.0);
        acc.apply_event(&FeedEvent::fill(TradeUpdate::new(1, 1, 10.0, 1)))
            .unwrap();
        let completed = acc
            .apply_event(&FeedEvent::Mark {
                timestamp: 2,
                price: 12.0,
            })
            .unwrap();

        assert!(completed.is_none());
        assert!(approx(acc.snapshot().net_profit, 2.0));
        assert_eq!(acc.snapshot().position, 1);
    }

    #[test]
    fn test_stale_mark_tick_rejected() {
        let mut acc = accumulator(Mode::BackTest, 0.0);
        trade(&mut acc, 100, 10, 100.0);

        let err = acc
            .apply_event(&FeedEvent::Mark {
                timestamp: 99,
                price: 50.0,
            })
            .unwrap_err();
        assert!(matches!(
            err,
            PerformanceError::Update(UpdateError::OutOfOrder {
                previous: 100,
                timestamp: 99
            })
        ));
        assert!(approx(acc.stats().net_profit(), 0.0));

        acc.apply_event(&FeedEvent::Mark {
            timestamp: 200,
            price: 101.0,
        })
        .unwrap();
        assert_eq!(acc.state().last_timestamp(), Some(200));
        // a fill between the last fill and the tick is now out of order
        assert!(acc
            .apply_update(&TradeUpdate::new(150, -10, 101.0, 0), None)
            .is_err());
    }
}
