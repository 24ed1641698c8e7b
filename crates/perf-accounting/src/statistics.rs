//! Running statistics and the per-update state transition.

use perf_core::error::UpdateError;
use perf_core::types::TradeUpdate;
use serde::{Deserialize, Serialize};

/// Aggregates maintained across every update of a session.
///
/// Fields only change through [`AccountState::apply`]; derived metrics are
/// computed from them on demand (see `metrics.rs`).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RunningStatistics {
    pub(crate) trades: u64,
    pub(crate) profitable_trades: u64,
    pub(crate) long_trades: u64,
    pub(crate) short_trades: u64,
    pub(crate) gross_profit: f64,
    pub(crate) gross_loss: f64,
    /// Commission of the most recent update
    pub(crate) trade_commission: f64,
    pub(crate) total_commission: f64,
    pub(crate) total_bought: f64,
    pub(crate) total_sold: f64,
    /// Open position revalued at the latest fill or mark price
    pub(crate) position_value: f64,
    /// Net profit as of the most recent completed trade
    pub(crate) realized_net_profit: f64,
    pub(crate) peak_net_profit: f64,
    pub(crate) max_drawdown: f64,
    /// Profit of the most recent completed trade
    pub(crate) trade_profit: f64,
    pub(crate) sum_trade_profit: f64,
    pub(crate) sum_trade_profit_squared: f64,
    /// Milliseconds spent with a nonzero position
    pub(crate) time_in_market: i64,
}

/// Direction of a completed trade, fixed by the position it closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Long,
    Short,
}

/// Outcome of an update that reduced exposure.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CompletedTrade {
    pub timestamp: i64,
    pub direction: Direction,
    /// Net profit change since the previous completed trade
    pub profit: f64,
    /// Net profit after this trade
    pub net_profit: f64,
}

/// Full accumulator state: statistics plus position bookkeeping.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AccountState {
    pub(crate) stats: RunningStatistics,
    pub(crate) position: i64,
    pub(crate) last_timestamp: Option<i64>,
    pub(crate) time_in_market_start: Option<i64>,
    pub(crate) is_completed_trade: bool,
}

/// Result of applying one update.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition {
    pub state: AccountState,
    pub completed: Option<CompletedTrade>,
}

impl AccountState {
    /// Empty state at session start.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stats(&self) -> &RunningStatistics {
        &self.stats
    }

    /// Net position held.
    pub fn position(&self) -> i64 {
        self.position
    }

    /// Whether the most recent update completed a trade.
    pub fn is_completed_trade(&self) -> bool {
        self.is_completed_trade
    }

    pub fn last_timestamp(&self) -> Option<i64> {
        self.last_timestamp
    }

    /// Check an update against the feed contract without applying it.
    pub fn check(&self, update: &TradeUpdate) -> Result<(), UpdateError> {
        update.validate()?;
        self.check_time(update.timestamp)?;

        if self.position.checked_add(update.quantity) != Some(update.position) {
            return Err(UpdateError::PositionMismatch {
                previous: self.position,
                quantity: update.quantity,
                resulting: update.position,
            });
        }

        Ok(())
    }

    /// Reject a timestamp strictly earlier than the last event seen.
    pub fn check_time(&self, timestamp: i64) -> Result<(), UpdateError> {
        match self.last_timestamp {
            Some(previous) if timestamp < previous => {
                Err(UpdateError::OutOfOrder { previous, timestamp })
            }
            _ => Ok(()),
        }
    }

    /// Apply one fill, returning the next state.
    ///
    /// `commission` is the amount already priced for this fill and
    /// `multiplier` the contract multiplier. `self` is never modified, so a
    /// rejected update leaves the caller's state as it was.
    pub fn apply(
        &self,
        update: &TradeUpdate,
        commission: f64,
        multiplier: i64,
    ) -> Result<Transition, UpdateError> {
        self.check(update)?;

        let mut next = *self;
        let multiplier = multiplier as f64;
        let previous = self.position;
        let position = update.position;

        if position != 0 {
            if next.time_in_market_start.is_none() {
                next.time_in_market_start = Some(update.timestamp);
            }
        } else if let Some(start) = next.time_in_market_start.take() {
            next.stats.time_in_market += update.timestamp - start;
        }

        let stats = &mut next.stats;

        let trade_amount = update.price * update.abs_quantity() as f64 * multiplier;
        if update.is_buy() {
            stats.total_bought += trade_amount;
        } else {
            stats.total_sold += trade_amount;
        }

        stats.trade_commission = commission;
        stats.total_commission += commission;

        stats.position_value = position as f64 * update.price * multiplier;

        let is_completed =
            (previous > 0 && position < previous) || (previous < 0 && position > previous);

        let completed = if is_completed {
            stats.trades += 1;
            let direction = if previous > 0 {
                stats.long_trades += 1;
                Direction::Long
            } else {
                stats.short_trades += 1;
                Direction::Short
            };

            let net_profit = stats.net_profit();
            stats.peak_net_profit = stats.peak_net_profit.max(net_profit);
            stats.max_drawdown = stats.max_drawdown.max(stats.peak_net_profit - net_profit);

            let trade_profit = net_profit - stats.realized_net_profit;
            stats.trade_profit = trade_profit;
            stats.realized_net_profit = net_profit;

            stats.sum_trade_profit += trade_profit;
            stats.sum_trade_profit_squared += trade_profit * trade_profit;

            if trade_profit >= 0.0 {
                stats.profitable_trades += 1;
                stats.gross_profit += trade_profit;
            } else {
                stats.gross_loss += -trade_profit;
            }

            Some(CompletedTrade {
                timestamp: update.timestamp,
                direction,
                profit: trade_profit,
                net_profit,
            })
        } else {
            None
        };

        next.is_completed_trade = is_completed;
        next.position = position;
        next.last_timestamp = Some(update.timestamp);

        Ok(Transition {
            state: next,
            completed,
        })
    }

    /// Revalue the open position at `price`.
    pub fn mark(&mut self, price: f64, multiplier: i64) {
        self.stats.position_value = self.position as f64 * price * multiplier as f64;
    }

    /// Revalue at a timestamped mark tick, advancing the feed clock.
    pub fn mark_at(
        &mut self,
        timestamp: i64,
        price: f64,
        multiplier: i64,
    ) -> Result<(), UpdateError> {
        self.check_time(timestamp)?;
        self.mark(price, multiplier);
        self.last_timestamp = Some(timestamp);
        Ok(())
    }
}
