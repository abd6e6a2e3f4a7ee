//! Execution policies for the data-parallel core.
//!
//! Every parallel region in this crate is a fork-join over a contiguous
//! index range: the range is split into per-worker chunks, each worker
//! produces a private partial result, and the partials are merged in chunk
//! order after all workers have joined. Workers never write to shared
//! buffers, so results for integer accumulations are identical for any
//! worker count, and float accumulations differ only by reassociation.

use std::ops::Range;
use std::thread;

/// How a pipeline stage executes over its input range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecPolicy {
    /// Single caller thread, one chunk covering the whole range.
    Sequential,
    /// Fixed-size pool of scoped worker threads.
    Parallel {
        /// Number of workers to spawn (at least 1).
        workers: usize,
    },
}

impl ExecPolicy {
    /// Parallel policy sized to the machine's available parallelism.
    pub fn parallel() -> Self {
        let workers = thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1);
        ExecPolicy::Parallel { workers }
    }

    /// Worker count this policy will use.
    pub fn workers(&self) -> usize {
        match self {
            ExecPolicy::Sequential => 1,
            ExecPolicy::Parallel { workers } => (*workers).max(1),
        }
    }
}

/// Fold a half-open index range chunk-wise, returning one partial per chunk
/// in ascending chunk order.
///
/// Under [`ExecPolicy::Sequential`] the fold runs on the caller thread over a
/// single chunk. Under [`ExecPolicy::Parallel`] each chunk runs on its own
/// scoped thread; the scope's join is the end-of-region barrier, so no
/// partial is read while a worker is still writing it.
pub fn fold_chunks<T, F>(len: usize, policy: &ExecPolicy, fold: F) -> Vec<T>
where
    T: Send,
    F: Fn(Range<usize>) -> T + Sync,
{
    if len == 0 {
        return Vec::new();
    }

    let workers = policy.workers().min(len);
    if workers == 1 {
        return vec![fold(0..len)];
    }

    let chunk = len.div_ceil(workers);
    let mut partials = Vec::with_capacity(workers);

    thread::scope(|s| {
        let handles: Vec<_> = (0..workers)
            .filter_map(|w| {
                let start = w * chunk;
                if start >= len {
                    return None;
                }
                let end = (start + chunk).min(len);
                let fold = &fold;
                Some(s.spawn(move || fold(start..end)))
            })
            .collect();

        for handle in handles {
            partials.push(handle.join().expect("worker thread panicked"));
        }
    });

    partials
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequential_is_one_chunk() {
        let partials = fold_chunks(100, &ExecPolicy::Sequential, |r| r.len());
        assert_eq!(partials, vec![100]);
    }

    #[test]
    fn chunks_cover_range_exactly() {
        for workers in [1, 2, 3, 7, 16] {
            let policy = ExecPolicy::Parallel { workers };
            let partials = fold_chunks(10, &policy, |r| r.collect::<Vec<_>>());
            let flat: Vec<usize> = partials.into_iter().flatten().collect();
            assert_eq!(flat, (0..10).collect::<Vec<_>>());
        }
    }

    #[test]
    fn more_workers_than_items() {
        let policy = ExecPolicy::Parallel { workers: 64 };
        let partials = fold_chunks(3, &policy, |r| r.sum::<usize>());
        assert_eq!(partials.iter().sum::<usize>(), 3);
    }

    #[test]
    fn empty_range_yields_no_partials() {
        let partials = fold_chunks(0, &ExecPolicy::parallel(), |r| r.len());
        assert!(partials.is_empty());
    }

    #[test]
    fn zero_workers_clamps_to_one() {
        let policy = ExecPolicy::Parallel { workers: 0 };
        assert_eq!(policy.workers(), 1);
        let partials = fold_chunks(5, &policy, |r| r.len());
        assert_eq!(partials, vec![5]);
    }
}
