//! Performance report generation.

use perf_core::error::PerformanceError;
use perf_core::types::{BarSize, ChartSeries, Mode};
use perf_core::PerformanceResult;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::accumulator::PerformanceAccumulator;
use crate::metrics::PerformanceSnapshot;

/// Complete performance report for one session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PerformanceReport {
    pub mode: Mode,
    pub multiplier: i64,
    /// Name of the commission model
    pub commission: String,
    pub updates_applied: u64,
    pub metrics: PerformanceSnapshot,
    pub chart: ChartSeries,
}

impl PerformanceReport {
    /// Build a report from the accumulator's current state.
    pub fn from_accumulator(accumulator: &PerformanceAccumulator) -> Self {
        Self {
            mode: accumulator.mode(),
            multiplier: accumulator.config().multiplier,
            commission: accumulator.commission_model().name().to_string(),
            updates_applied: accumulator.updates_applied(),
            metrics: accumulator.snapshot(),
            chart: accumulator.chart().clone(),
        }
    }

    /// Generate a text summary.
    pub fn summary(&self) -> String {
        let m = &self.metrics;
        let mut s = String::new();

        s.push_str("═══════════════════════════════════════════════════════════\n");
        s.push_str("                   PERFORMANCE REPORT                       \n");
        s.push_str("═══════════════════════════════════════════════════════════\n\n");

        s.push_str("SESSION\n");
        s.push_str("───────────────────────────────────────────────────────────\n");
        s.push_str(&format!("  Mode:                {}\n", self.mode));
        s.push_str(&format!("  Multiplier:          {}\n", self.multiplier));
        s.push_str(&format!("  Commission Model:    {}\n", self.commission));
        s.push_str(&format!("  Updates Applied:     {}\n", self.updates_applied));
        s.push_str(&format!("  Open Position:       {}\n", m.position));
        s.push('\n');

        s.push_str("PROFIT\n");
        s.push_str("───────────────────────────────────────────────────────────\n");
        s.push_str(&format!("  Net Profit:          {:.2}\n", m.net_profit));
        s.push_str(&format!("  Realized Profit:     {:.2}\n", m.realized_net_profit));
        s.push_str(&format!("  Peak Net Profit:     {:.2}\n", m.peak_net_profit));
        s.push_str(&format!("  Max Drawdown:        {:.2}\n", m.max_drawdown));
        s.push_str(&format!("  Gross Profit:        {:.2}\n", m.gross_profit));
        s.push_str(&format!("  Gross Loss:          {:.2}\n", m.gross_loss));
        s.push_str(&format!("  Total Commission:    {:.2}\n", m.total_commission));
        s.push('\n');

        s.push_str("TRADE STATISTICS\n");
        s.push_str("───────────────────────────────────────────────────────────\n");
        s.push_str(&format!("  Total Trades:        {}\n", m.trades));
        s.push_str(&format!("  Profitable Trades:   {}\n", m.profitable_trades));
        s.push_str(&format!("  Unprofitable Trades: {}\n", m.unprofitable_trades));
        s.push_str(&format!("  Long / Short:        {} / {}\n", m.long_trades, m.short_trades));
        s.push_str(&format!("  Percent Profitable:  {:.2}%\n", m.percent_profitable));
        s.push_str(&format!("  Avg Profit/Trade:    {:.2}\n", m.average_profit_per_trade));
        s.push_str(&format!("  Bias:                {:.2}%\n", m.bias));
        s.push_str(&format!("  Avg Duration:        {:.2} min\n", m.average_duration_minutes));
        s.push('\n');

        s.push_str("RISK-ADJUSTED\n");
        s.push_str("───────────────────────────────────────────────────────────\n");
        s.push_str(&format!("  Profit Factor:       {:.2}\n", m.profit_factor));
        s.push_str(&format!("  Kelly Criterion:     {:.2}%\n", m.kelly_criterion));
        s.push_str(&format!("  Performance Index:   {:.2}\n", m.performance_index));
        s.push_str(&format!("  CPI:                 {:.2}\n", m.cpi));
        s.push('\n');

        s.push_str("═══════════════════════════════════════════════════════════\n");

        s
    }

    /// Export to JSON. Infinite metrics serialize as `null`.
    pub fn to_json(&self) -> PerformanceResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| PerformanceError::Serialization(e.to_string()))
    }

    /// Write the JSON report to `path`.
    pub fn save_json(&self, path: impl AsRef<Path>) -> PerformanceResult<()> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }

    /// Write the chart series CSV to `path`.
    pub fn save_chart_csv(&self, path: impl AsRef<Path>) -> PerformanceResult<()> {
        std::fs::write(path, self.chart_to_csv())?;
        Ok(())
    }

    /// Write the chart bars CSV to `path`.
    pub fn save_chart_bars_csv(
        &self,
        path: impl AsRef<Path>,
        bar_size: BarSize,
    ) -> PerformanceResult<()> {
        std::fs::write(path, self.chart_bars_to_csv(bar_size))?;
        Ok(())
    }

    /// Export to CSV (chart series only).
    pub fn chart_to_csv(&self) -> String {
        let mut csv = String::from("timestamp,net_profit\n");
        for point in self.chart.iter() {
            csv.push_str(&format!("{},{}\n", point.timestamp, point.value));
        }
        csv
    }

    /// Export the chart series aggregated into bars.
    pub fn chart_bars_to_csv(&self, bar_size: BarSize) -> String {
        let mut csv = String::from("timestamp,open,high,low,close\n");
        for bar in self.chart.to_bars(bar_size) {
            csv.push_str(&format!(
                "{},{},{},{},{}\n",
                bar.timestamp, bar.open, bar.high, bar.low, bar.close
            ));
        }
        csv
    }
}
