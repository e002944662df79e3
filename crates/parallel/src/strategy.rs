//! Parallel processing strategies

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Processing mode for algorithms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ProcessingMode {
    /// Single-threaded processing
    Sequential,
    /// Parallel processing using all available cores
    #[default]
    Parallel,
    /// Parallel with specified number of threads
    ParallelWith(usize),
}

/// Strategy for parallel execution
pub trait ParallelStrategy {
    /// Split `data` into consecutive chunks of `chunk_len` and call
    /// `f(chunk_index, chunk)` on each. Chunks are disjoint, so each may be
    /// written from a different thread.
    ///
    /// Work runs on the current rayon pool; wrap the caller in
    /// [`ProcessingMode::install`] to use a dedicated one.
    fn par_chunks_mut<T, F>(&self, data: &mut [T], chunk_len: usize, f: F)
    where
        T: Send,
        F: Fn(usize, &mut [T]) + Sync + Send;
}

impl ProcessingMode {
    /// Run `op` with this mode's thread pool as the current pool.
    ///
    /// `ParallelWith(n)` builds one pool of `n` threads for the whole call,
    /// so every parallel step inside `op` shares it. Other modes run `op`
    /// directly. Falls back to the global pool if the dedicated one cannot
    /// be built.
    pub fn install<R: Send>(&self, op: impl FnOnce() -> R + Send) -> R {
        #[cfg(feature = "parallel")]
        if let ProcessingMode::ParallelWith(threads) = self {
            if let Ok(pool) = rayon::ThreadPoolBuilder::new().num_threads(*threads).build() {
                return pool.install(op);
            }
        }
        op()
    }

    /// Whether work actually runs on more than one thread
    pub fn is_parallel(&self) -> bool {
        cfg!(feature = "parallel") && !matches!(self, ProcessingMode::Sequential)
    }
}

impl ParallelStrategy for ProcessingMode {
    fn par_chunks_mut<T, F>(&self, data: &mut [T], chunk_len: usize, f: F)
    where
        T: Send,
        F: Fn(usize, &mut [T]) + Sync + Send,
    {
        let chunk_len = chunk_len.max(1);
        #[cfg(feature = "parallel")]
        if self.is_parallel() {
            data.par_chunks_mut(chunk_len)
                .enumerate()
                .for_each(|(i, chunk)| f(i, chunk));
            return;
        }
        data.chunks_mut(chunk_len)
            .enumerate()
            .for_each(|(i, chunk)| f(i, chunk));
    }
}
