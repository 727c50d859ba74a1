use std::time::{Duration, Instant};

use anyhow::{anyhow, Result};
use itertools::Itertools;

use crate::debug;
use crate::hash;
use crate::partition;
use crate::worker;

/// Everything the orchestrator reports about one run: the resolved
/// configuration, the combined hash, and the wall-clock duration of the
/// parallel phase (spawning, hashing, joining, reducing).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HashReport {
    pub nb_workers: usize,
    pub blocks_per_worker: usize,
    pub combined_hash: u32,
    pub duration: Duration,
}

/// Folds the per-worker hashes into the combined hash.
///
/// Each result is rendered as unsigned decimal text, the renderings are
/// concatenated in worker-index order with no separator, and the hash is
/// applied again to that text. Order is load-bearing: swapping two distinct
/// results changes the output.
pub fn combine(worker_hashes: &[u32]) -> u32 {
    let concatenated: String = worker_hashes
        .iter()
        .map(|worker_hash| worker_hash.to_string())
        .join("");

    hash::one_at_a_time(concatenated.as_bytes())
}

/// Runs the full pipeline over an in-memory view of the input.
///
/// Validates the worker count, partitions the block range, forks the
/// workers, waits for all of them (full barrier) and reduces. The timer
/// brackets everything from the first spawn to the combined hash.
pub fn execute(data: &[u8], nb_workers: usize) -> Result<HashReport> {
    if nb_workers == 0 {
        return Err(anyhow!("The number of workers must be positive"));
    }

    let nb_blocks = partition::nb_blocks(data.len());
    let assignments = partition::partition(nb_blocks, nb_workers, data.len());
    debug!("{} blocks, {} per worker", nb_blocks, nb_blocks / nb_workers);

    let start = Instant::now();
    let worker_hashes = worker::run_workers(data, &assignments)?;
    let combined_hash = combine(&worker_hashes);
    let duration = start.elapsed();

    Ok(HashReport {
        nb_workers,
        blocks_per_worker: nb_blocks / nb_workers,
        combined_hash,
        duration,
    })
}
