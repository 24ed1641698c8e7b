//! List session modes.

use anyhow::Result;
use perf_core::types::Mode;

pub async fn run() -> Result<()> {
    println!("Session modes:");
    println!();
    for mode in Mode::all() {
        let history = if mode.records_history() {
            "records chart history"
        } else {
            "statistics only"
        };
        println!("  {:<14} {}", mode.to_string(), history);
    }
    Ok(())
}
