use anyhow::{anyhow, Error, Result};
use crossbeam_utils::thread as crossbeam;

use crate::hash;
use crate::partition::WorkAssignment;

/// Runs one scoped thread per assignment over the shared read-only buffer.
///
/// All workers are spawned before any is joined, and joining happens in
/// spawn order, so the returned hashes are sorted by worker index no matter
/// which thread finishes first. Workers share nothing mutable: each one
/// reads its own disjoint sub-slice and returns a single value.
pub fn run_workers(data: &[u8], assignments: &[WorkAssignment]) -> Result<Vec<u32>> {
    let mut results = Vec::with_capacity(assignments.len());
    let mut execution_errors: Vec<Error> = vec![];

    crossbeam::scope(|s| {
        let mut handles = Vec::with_capacity(assignments.len());

        for assignment in assignments.iter() {
            let chunk = assignment.slice(data);
            handles.push(s.spawn(move |_| hash::one_at_a_time(chunk)));
        }

        for handle in handles {
            match handle.join() {
                Ok(worker_hash) => results.push(worker_hash),
                Err(e) => execution_errors.push(anyhow!("{:?}", e)),
            }
        }
    })
    .map_err(|e| anyhow!("Worker scope panicked: {:?}", e))?;

    if !execution_errors.is_empty() {
        return Err(anyhow!("Some workers failed: {:?}", execution_errors));
    }

    Ok(results)
}
