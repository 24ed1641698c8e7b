//! Validate configuration command.

use anyhow::{Context, Result};
use perf_config::read_config;
use std::path::Path;

pub async fn run(config_path: &Path) -> Result<()> {
    println!("Validating configuration: {}", config_path.display());

    let config = read_config(config_path)
        .with_context(|| format!("Failed to read {}", config_path.display()))?;

    let mut failures = 0;
    for (section, result) in config.check_sections() {
        match result {
            Ok(()) => println!("  [ok]    {}", section),
            Err(e) => {
                failures += 1;
                println!("  [error] {}: {}", section, e);
            }
        }
    }
    println!();

    if failures > 0 {
        anyhow::bail!("{} section(s) failed validation", failures);
    }

    println!(
        "Mode {} | multiplier {} | commission {} | chart bars {}",
        config.accounting.mode,
        config.accounting.multiplier,
        config.commission.build().name(),
        config.accounting.chart_bar_size
    );
    Ok(())
}
