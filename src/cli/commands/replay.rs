//! Replay command implementation.

use anyhow::{Context, Result};
use perf_accounting::{PerformanceAccumulator, ReplayEngine};
use perf_commission::CommissionSchedule;
use perf_config::AppConfig;
use perf_core::traits::UpdateSource;
use perf_data::CsvUpdateSource;
use tracing::{debug, info};

use crate::cli::ReplayArgs;

pub async fn run(args: ReplayArgs, config: &AppConfig) -> Result<()> {
    let mut accounting = config.accumulator();
    if let Some(mode) = args.mode {
        accounting.mode = mode;
    }
    if let Some(multiplier) = args.multiplier {
        accounting.multiplier = multiplier;
    }

    let schedule = match &args.commission {
        Some(name) => CommissionSchedule::preset(name)
            .with_context(|| format!("Unknown commission preset '{}'", name))?,
        None => config.commission.clone(),
    };
    schedule.validate().map_err(anyhow::Error::msg)?;

    info!(
        data = %args.data.display(),
        mode = %accounting.mode,
        multiplier = accounting.multiplier,
        "Loading update feed"
    );

    let accumulator = PerformanceAccumulator::new(accounting, schedule.build())?;

    if !args.data.exists() {
        anyhow::bail!(
            "Data path '{}' does not exist. Provide a CSV feed with --data (e.g. --data ./fills.csv)",
            args.data.display()
        );
    }
    let path = args
        .data
        .to_str()
        .context("Data path is not valid UTF-8")?;
    let source = CsvUpdateSource::new(path)?;
    let events = source
        .subscribe(args.buffer)
        .await
        .context("Failed to open update feed")?;

    // Run the accumulator on its own task and watch it from this one
    let engine = ReplayEngine::new(accumulator);
    let mut progress = engine.subscribe();
    let handle = engine.spawn(events);

    let monitor = tokio::spawn(async move {
        while progress.changed().await.is_ok() {
            let snapshot = *progress.borrow();
            debug!(
                trades = snapshot.trades,
                position = snapshot.position,
                net_profit = snapshot.net_profit,
                "Progress"
            );
        }
    });

    let report = handle.await.context("Replay task failed")??;
    monitor.await.context("Progress monitor failed")?;

    // Output results
    match args.output.as_str() {
        "json" => {
            let json = report.to_json()?;
            println!("{}", json);
        }
        _ => {
            println!("{}", report.summary());
        }
    }

    // Save if requested
    if let Some(save_path) = &args.save {
        report
            .save_json(save_path)
            .with_context(|| format!("Failed to save report to {:?}", save_path))?;
        info!("Report saved to {:?}", save_path);
    }

    if let Some(chart_path) = &args.chart {
        report
            .save_chart_csv(chart_path)
            .with_context(|| format!("Failed to save chart to {:?}", chart_path))?;
        info!(points = report.chart.len(), "Chart series saved to {:?}", chart_path);
    }

    if let Some(bars_path) = &args.chart_bars {
        let bar_size = args.bar_size.unwrap_or(config.accounting.chart_bar_size);
        report
            .save_chart_bars_csv(bars_path, bar_size)
            .with_context(|| format!("Failed to save chart bars to {:?}", bars_path))?;
        info!(%bar_size, "Chart bars saved to {:?}", bars_path);
    }

    Ok(())
}
