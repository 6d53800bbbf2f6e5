use rayon::prelude::*;
use tracing::{debug, instrument, trace};

use crate::buffer::PrimeBuffer;
use crate::error::Result;
use crate::k_way_merge::KWayMerge;
use crate::trial_division::push_bounded;

/// Optimized trial division spread across a fixed pool of worker threads.
///
/// Candidates in [2, n] are cut into contiguous blocks of block_len, dealt out to the workers
/// round-robin: block b goes to worker b % workers. Since the cost of testing i grows with sqrt(i),
/// dealing blocks this way keeps every worker's share of the expensive high end about equal, where
/// one contiguous range per worker would leave the last worker doing most of the work.
///
/// Each worker scans its own blocks in increasing order into a private PrimeBuffer, so nothing is
/// shared while sieving. When a worker is done it hands its buffer back to the calling thread,
/// which merges all of them with a KWayMerge. Each private buffer is ascending, so the merged
/// output is ascending too, and identical to optimized_naive(n) whatever order the workers finish.
///
/// Usage:
///
///     use prime_sieves::ParallelSieve;
///
///     let primes = ParallelSieve::default().with_workers(3).sieve(30).unwrap();
///     assert_eq!(vec![2, 3, 5, 7, 11, 13, 17, 19, 23, 29], primes.into_vec());
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParallelSieve {
    workers: usize,
    block_len: u64,
}

impl Default for ParallelSieve {
    fn default() -> ParallelSieve {
        ParallelSieve {
            workers: rayon::current_num_threads(),
            block_len: ParallelSieve::DEFAULT_BLOCK_LEN,
        }
    }
}

impl ParallelSieve {
    pub const DEFAULT_BLOCK_LEN: u64 = 4096;

    /// Size of the worker pool. Zero is treated as one.
    pub fn with_workers(mut self, workers: usize) -> ParallelSieve {
        self.workers = workers.max(1);
        self
    }

    /// Number of consecutive candidates per block. Zero is treated as one.
    pub fn with_block_len(mut self, block_len: u64) -> ParallelSieve {
        self.block_len = block_len.max(1);
        self
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    pub fn block_len(&self) -> u64 {
        self.block_len
    }

    #[instrument(level = "debug")]
    pub fn sieve(&self, n: u64) -> Result<PrimeBuffer> {
        if n < 2 {
            return PrimeBuffer::new();
        }

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.workers)
            .thread_name(|worker| format!("sieve-worker-{}", worker))
            .build()?;

        // collect() short-circuits on the first worker to fail, dropping every private buffer.
        let private_primes = pool.install(|| {
            (0..self.workers)
                .into_par_iter()
                .map(|worker| self.sieve_worker(worker, n))
                .collect::<Result<Vec<PrimeBuffer>>>()
        })?;

        let count = private_primes.iter().map(PrimeBuffer::len).sum();
        let mut primes = PrimeBuffer::with_capacity(count)?;
        let sources = private_primes
            .into_iter()
            .map(|private| private.into_iter())
            .collect();
        for p in KWayMerge::new(sources) {
            primes.push(p)?;
        }

        debug!(count = primes.len(), workers = self.workers, "parallel sieve done");
        Ok(primes)
    }

    /// Scan the blocks dealt to worker, in increasing order, into a private buffer.
    fn sieve_worker(&self, worker: usize, n: u64) -> Result<PrimeBuffer> {
        let mut primes = PrimeBuffer::new()?;
        let mut blocks = 0usize;
        for (start, end) in self.blocks(worker, n) {
            push_bounded(start..=end, &mut primes)?;
            blocks += 1;
        }
        trace!(worker, blocks, count = primes.len(), "worker done");
        Ok(primes)
    }

    /// Inclusive [start, end] bounds of the blocks of [2, n] belonging to worker.
    fn blocks(&self, worker: usize, n: u64) -> impl Iterator<Item = (u64, u64)> {
        let block_len = self.block_len;
        let stride = (self.workers as u64).saturating_mul(block_len);
        let first = (worker as u64)
            .checked_mul(block_len)
            .and_then(|offset| offset.checked_add(2));

        let mut next = first.filter(|&start| start <= n);
        std::iter::from_fn(move || {
            let start = next?;
            let end = start.saturating_add(block_len - 1).min(n);
            next = start.checked_add(stride).filter(|&start| start <= n);
            Some((start, end))
        })
    }
}

/// Parallel optimized trial division using one worker per rayon thread.
pub fn parallel(n: u64) -> Result<PrimeBuffer> {
    ParallelSieve::default().sieve(n)
}
