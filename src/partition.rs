/// Fixed logical block size, used purely for partition sizing.
pub const BSIZE: usize = 4096;

/// Number of logical blocks in a file, counting a trailing short block.
pub fn nb_blocks(file_size: usize) -> usize {
    let mut blocks = file_size / BSIZE;
    if file_size % BSIZE != 0 {
        blocks += 1;
    }
    blocks
}

/// One worker's contiguous slice of the input. Derived once, never mutated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkAssignment {
    pub worker_index: usize,
    pub nb_blocks: usize,
    pub byte_offset: usize,
    pub byte_len: usize,
}

impl WorkAssignment {
    pub fn slice<'a>(&self, data: &'a [u8]) -> &'a [u8] {
        &data[self.byte_offset..self.byte_offset + self.byte_len]
    }
}

/// Splits `nb_blocks` blocks into `nb_workers` contiguous, equal-sized,
/// non-overlapping ranges, ordered by worker index.
///
/// `blocks_per_worker` is integer division: when the block count does not
/// divide evenly, the remainder blocks are dropped and hashed by nobody.
/// That quirk is part of the observable contract (the combined hash of
/// affected files depends on it) and must not be repaired here.
///
/// More workers than blocks gives every worker a zero-length range. The
/// last range is clamped to `file_size`, which only matters when the block
/// count divides evenly and the final block is short.
///
/// The caller guarantees `nb_workers > 0`.
pub fn partition(nb_blocks: usize, nb_workers: usize, file_size: usize) -> Vec<WorkAssignment> {
    let blocks_per_worker = nb_blocks / nb_workers;
    let bytes_per_worker = blocks_per_worker * BSIZE;

    let mut assignments = Vec::with_capacity(nb_workers);
    for worker_index in 0..nb_workers {
        let byte_offset = worker_index * bytes_per_worker;
        let byte_end = (byte_offset + bytes_per_worker).min(file_size);

        assignments.push(WorkAssignment {
            worker_index,
            nb_blocks: blocks_per_worker,
            byte_offset,
            byte_len: byte_end.saturating_sub(byte_offset),
        });
    }

    assignments
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn block_count_rounds_up() {
        assert_eq!(nb_blocks(0), 0);
        assert_eq!(nb_blocks(1), 1);
        assert_eq!(nb_blocks(BSIZE), 1);
        assert_eq!(nb_blocks(BSIZE + 1), 2);
        assert_eq!(nb_blocks(10_000), 3);
    }

    #[test]
    fn even_split() {
        let assignments = partition(8, 4, 8 * BSIZE);

        assert_eq!(assignments.len(), 4);
        for (i, assignment) in assignments.iter().enumerate() {
            assert_eq!(assignment.worker_index, i);
            assert_eq!(assignment.nb_blocks, 2);
            assert_eq!(assignment.byte_offset, i * 2 * BSIZE);
            assert_eq!(assignment.byte_len, 2 * BSIZE);
        }
    }

    #[test]
    fn remainder_blocks_are_dropped() {
        // 10000 bytes = 3 blocks; 2 workers cover only the first 2 blocks
        let assignments = partition(nb_blocks(10_000), 2, 10_000);

        assert_eq!(assignments[0].byte_offset, 0);
        assert_eq!(assignments[0].byte_len, BSIZE);
        assert_eq!(assignments[1].byte_offset, BSIZE);
        assert_eq!(assignments[1].byte_len, BSIZE);

        let covered: usize = assignments.iter().map(|a| a.byte_len).sum();
        assert_eq!(covered, 2 * BSIZE);
    }

    #[test]
    fn more_workers_than_blocks_gives_empty_ranges() {
        let assignments = partition(2, 5, 2 * BSIZE);

        assert_eq!(assignments.len(), 5);
        for assignment in assignments.iter() {
            assert_eq!(assignment.nb_blocks, 0);
            assert_eq!(assignment.byte_len, 0);
        }
    }

    #[test]
    fn final_range_is_clamped_to_the_file() {
        // 3 blocks over 3 workers: the last block is short
        let assignments = partition(3, 3, 10_000);
        assert_eq!(assignments[2].byte_offset, 2 * BSIZE);
        assert_eq!(assignments[2].byte_len, 10_000 - 2 * BSIZE);

        // A single worker covers the whole file, not the padded block count
        let assignments = partition(3, 1, 10_000);
        assert_eq!(assignments[0].byte_len, 10_000);
    }

    #[test]
    fn assignments_are_contiguous_and_disjoint() {
        for (blocks, workers, size) in [(8, 3, 8 * BSIZE), (5, 2, 5 * BSIZE - 17), (1, 4, 100)] {
            let assignments = partition(blocks, workers, size);
            let mut expected_offset = 0;
            for assignment in assignments.iter() {
                assert_eq!(assignment.byte_offset, expected_offset);
                assert!(assignment.byte_offset + assignment.byte_len <= size);
                expected_offset = assignment.byte_offset + assignment.byte_len;
            }
        }
    }
}
