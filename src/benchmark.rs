use std::fs;
use std::path::Path;
use std::time::{Duration, Instant};

use anyhow::{anyhow, Context, Result};
use serde::Serialize;
use tabled::{Table, Tabled};

use crate::config::{parse_size, SweepConfig};
use crate::input::InputFile;
use crate::partition::BSIZE;
use crate::pipeline;
use crate::utils::{adapt_unit, mean_ci, random_data, throughput_mb_s, MB};

const DEFAULT_SEED: u64 = 10;
const DEFAULT_INPUT_SIZE: usize = 16 * MB;

/// One sweep data point: the timing of the full pipeline at a fixed worker
/// count.
#[derive(Debug, Clone, Serialize)]
pub struct Measurement {
    pub nb_workers: usize,
    pub blocks_per_worker: usize,
    pub combined_hash: u32,
    pub mean_latency: Duration,
    pub ci_mean_latency: Duration,
    pub throughput_mb_s: f64,
    pub nb_repetitions: usize,
}

#[derive(Tabled, Clone)]
struct SweepRow {
    workers: usize,
    blocks_per_worker: usize,
    hash: String,
    mean: String,
    ci: String,
    throughput: String,
}

impl SweepRow {
    fn from(measurement: &Measurement) -> Self {
        Self {
            workers: measurement.nb_workers,
            blocks_per_worker: measurement.blocks_per_worker,
            hash: measurement.combined_hash.to_string(),
            mean: format!("{:.3?}", measurement.mean_latency),
            ci: format!("{:.3?}", measurement.ci_mean_latency),
            throughput: format!("{:.1} MB/s", measurement.throughput_mb_s),
        }
    }
}

enum SweepInput {
    Mapped(InputFile),
    Generated(Vec<u8>),
}

impl SweepInput {
    fn bytes(&self) -> &[u8] {
        match self {
            SweepInput::Mapped(input) => input.bytes(),
            SweepInput::Generated(data) => data.as_slice(),
        }
    }
}

fn resolve_input(config: &SweepConfig) -> Result<SweepInput> {
    if let Some(path) = &config.input_file {
        return Ok(SweepInput::Mapped(InputFile::open(Path::new(path))?));
    }

    let size = match &config.input_size {
        Some(size) => parse_size(size)?,
        None => DEFAULT_INPUT_SIZE,
    };
    let seed = config.seed.unwrap_or(DEFAULT_SEED);

    Ok(SweepInput::Generated(random_data(size, seed)))
}

/// Runs the full pipeline `warmup + repetitions` times for every configured
/// worker count and reports mean latency, its 95% confidence interval and
/// throughput over the covered bytes. Within one worker count the combined
/// hash must not vary between repetitions.
pub fn sweep(config: &SweepConfig) -> Result<Vec<Measurement>> {
    let input = resolve_input(config)?;
    let data = input.bytes();

    eprintln!(
        "Sweeping {} across {} worker counts...",
        adapt_unit(data.len()),
        config.nb_workers.len()
    );
    let sweep_start = Instant::now();

    let mut measurements = Vec::with_capacity(config.nb_workers.len());

    for &nb_workers in config.nb_workers.iter() {
        for _ in 0..config.warmup {
            pipeline::execute(data, nb_workers)?;
        }

        let reference = pipeline::execute(data, nb_workers)?;
        let mut latencies = Vec::with_capacity(config.repetitions.max(1));
        latencies.push(reference.duration);

        for _ in 1..config.repetitions {
            let report = pipeline::execute(data, nb_workers)?;
            if report.combined_hash != reference.combined_hash {
                return Err(anyhow!(
                    "Non-deterministic hash with {} workers: {} vs {}",
                    nb_workers,
                    reference.combined_hash,
                    report.combined_hash
                ));
            }
            latencies.push(report.duration);
        }

        let covered = (reference.blocks_per_worker * nb_workers * BSIZE).min(data.len());
        let (mean_latency, ci_mean_latency) = mean_ci(&latencies);

        measurements.push(Measurement {
            nb_workers,
            blocks_per_worker: reference.blocks_per_worker,
            combined_hash: reference.combined_hash,
            mean_latency,
            ci_mean_latency,
            throughput_mb_s: throughput_mb_s(covered, mean_latency),
            nb_repetitions: latencies.len(),
        });
        eprint!(".");
    }
    eprintln!();

    let rows: Vec<SweepRow> = measurements.iter().map(SweepRow::from).collect();
    println!("{}", Table::new(rows));
    println!("Done. Took {:.2?}", sweep_start.elapsed());

    if let Some(path) = &config.output {
        save_measurements(&measurements, path)?;
    }

    Ok(measurements)
}

fn save_measurements(measurements: &[Measurement], path: &str) -> Result<()> {
    let str = serde_json::to_string_pretty(measurements)
        .context("Unable to create json of measurements")?;

    fs::write(path, str)
        .context("Unable to write measurements to file")
}
