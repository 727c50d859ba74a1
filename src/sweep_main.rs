use anyhow::{Context, Result};
use hashbench::benchmark;
use hashbench::config::SweepConfig;

fn main() -> Result<()> {
    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "sweep.json".to_string());

    let config = SweepConfig::new(&path)
        .with_context(|| format!("Unable to create sweep config from {}", path))?;

    benchmark::sweep(&config)?;

    Ok(())
}
