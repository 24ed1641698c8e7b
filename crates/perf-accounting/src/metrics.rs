//! Derived performance metrics.
//!
//! Every metric is a pure function of [`RunningStatistics`]. Degenerate
//! inputs (no trades, no losses, zero dispersion) resolve to 0 or +infinity
//! rather than an error.

use serde::{Deserialize, Serialize};

use crate::statistics::RunningStatistics;

const MILLIS_PER_MINUTE: f64 = 60_000.0;

impl RunningStatistics {
    pub fn trades(&self) -> u64 {
        self.trades
    }

    pub fn profitable_trades(&self) -> u64 {
        self.profitable_trades
    }

    pub fn unprofitable_trades(&self) -> u64 {
        self.trades - self.profitable_trades
    }

    pub fn long_trades(&self) -> u64 {
        self.long_trades
    }

    pub fn short_trades(&self) -> u64 {
        self.short_trades
    }

    pub fn gross_profit(&self) -> f64 {
        self.gross_profit
    }

    pub fn gross_loss(&self) -> f64 {
        self.gross_loss
    }

    pub fn total_commission(&self) -> f64 {
        self.total_commission
    }

    /// Commission charged on the most recent update.
    pub fn trade_commission(&self) -> f64 {
        self.trade_commission
    }

    pub fn total_bought(&self) -> f64 {
        self.total_bought
    }

    pub fn total_sold(&self) -> f64 {
        self.total_sold
    }

    pub fn position_value(&self) -> f64 {
        self.position_value
    }

    /// Profit of the most recent completed trade.
    pub fn trade_profit(&self) -> f64 {
        self.trade_profit
    }

    /// Net profit as of the most recent completed trade.
    pub fn realized_net_profit(&self) -> f64 {
        self.realized_net_profit
    }

    pub fn peak_net_profit(&self) -> f64 {
        self.peak_net_profit
    }

    pub fn max_drawdown(&self) -> f64 {
        self.max_drawdown
    }

    /// Cumulative milliseconds with an open position, closed periods only.
    pub fn time_in_market(&self) -> i64 {
        self.time_in_market
    }

    /// Live net profit, including the open position at its latest valuation.
    pub fn net_profit(&self) -> f64 {
        self.total_sold - self.total_bought + self.position_value - self.total_commission
    }

    pub fn percent_profitable(&self) -> f64 {
        if self.trades == 0 {
            return 0.0;
        }
        100.0 * self.profitable_trades as f64 / self.trades as f64
    }

    /// Realized net profit divided by completed trades.
    pub fn average_profit_per_trade(&self) -> f64 {
        if self.trades == 0 {
            return 0.0;
        }
        self.realized_net_profit / self.trades as f64
    }

    pub fn profit_factor(&self) -> f64 {
        if self.gross_profit <= 0.0 {
            return 0.0;
        }
        if self.gross_loss == 0.0 {
            return f64::INFINITY;
        }
        self.gross_profit / self.gross_loss
    }

    /// Long/short balance in percent: +100 all long, -100 all short.
    pub fn bias(&self) -> f64 {
        if self.trades == 0 {
            return 0.0;
        }
        100.0 * (self.long_trades as f64 - self.short_trades as f64) / self.trades as f64
    }

    pub fn average_duration_minutes(&self) -> f64 {
        if self.trades == 0 {
            return 0.0;
        }
        self.time_in_market as f64 / (self.trades as f64 * MILLIS_PER_MINUTE)
    }

    /// Kelly fraction in percent.
    pub fn kelly_criterion(&self) -> f64 {
        let unprofitable = self.unprofitable_trades();
        if self.profitable_trades == 0 {
            return 0.0;
        }
        if unprofitable == 0 {
            return 100.0;
        }

        let average_profit = self.gross_profit / self.profitable_trades as f64;
        let average_loss = self.gross_loss / unprofitable as f64;
        let win_loss_ratio = average_profit / average_loss;
        let win_probability = self.profitable_trades as f64 / self.trades as f64;

        100.0 * (win_probability - (1.0 - win_probability) / win_loss_ratio)
    }

    /// Sharpe-like score of per-trade profits.
    pub fn performance_index(&self) -> f64 {
        if self.trades == 0 {
            return 0.0;
        }
        let n = self.trades as f64;
        // rounding can push a zero variance slightly negative
        let variance_n2 = (n * self.sum_trade_profit_squared
            - self.sum_trade_profit * self.sum_trade_profit)
            .max(0.0);
        let std_dev = variance_n2.sqrt() / n;
        if std_dev == 0.0 {
            return f64::INFINITY;
        }
        n.sqrt() * self.average_profit_per_trade() / std_dev
    }

    /// Composite performance index used to rank strategies.
    pub fn cpi(&self) -> f64 {
        self.performance_index() * self.profit_factor() * self.kelly_criterion() * self.net_profit()
            / 100_000.0
    }
}

/// Every metric captured at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PerformanceSnapshot {
    pub position: i64,
    pub trades: u64,
    pub profitable_trades: u64,
    pub unprofitable_trades: u64,
    pub long_trades: u64,
    pub short_trades: u64,
    pub net_profit: f64,
    pub realized_net_profit: f64,
    pub peak_net_profit: f64,
    pub max_drawdown: f64,
    pub gross_profit: f64,
    pub gross_loss: f64,
    pub total_commission: f64,
    pub trade_profit: f64,
    pub trade_commission: f64,
    pub percent_profitable: f64,
    pub average_profit_per_trade: f64,
    pub profit_factor: f64,
    pub bias: f64,
    pub average_duration_minutes: f64,
    pub kelly_criterion: f64,
    pub performance_index: f64,
    pub cpi: f64,
}

impl PerformanceSnapshot {
    pub fn capture(stats: &RunningStatistics, position: i64) -> Self {
        Self {
            position,
            trades: stats.trades(),
            profitable_trades: stats.profitable_trades(),
            unprofitable_trades: stats.unprofitable_trades(),
            long_trades: stats.long_trades(),
            short_trades: stats.short_trades(),
            net_profit: stats.net_profit(),
            realized_net_profit: stats.realized_net_profit(),
            peak_net_profit: stats.peak_net_profit(),
            max_drawdown: stats.max_drawdown(),
            gross_profit: stats.gross_profit(),
            gross_loss: stats.gross_loss(),
            total_commission: stats.total_commission(),
            trade_profit: stats.trade_profit(),
            trade_commission: stats.trade_commission(),
            percent_profitable: stats.percent_profitable(),
            average_profit_per_trade: stats.average_profit_per_trade(),
            profit_factor: stats.profit_factor(),
            bias: stats.bias(),
            average_duration_minutes: stats.average_duration_minutes(),
            kelly_criterion: stats.kelly_criterion(),
            performance_index: stats.performance_index(),
            cpi: stats.cpi(),
        }
    }
}
