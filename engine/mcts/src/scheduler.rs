//! Rollout batch execution substrate.
//!
//! The search driver stays single-threaded; only the simulation step fans
//! out. A batch of independent rollouts is submitted here and the driver
//! blocks until every job has completed. Workers read the shared immutable
//! state snapshot and never touch the tree.
//!
//! The worker pool is built lazily at the first parallel batch and sized by
//! `set_rollout_threads`. Changing the thread count between searches tears
//! the pool down and rebuilds it on next use. A single configured thread
//! degenerates to inline execution with no pool at all.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use once_cell::sync::Lazy;
use rayon::iter::{IntoParallelIterator, ParallelIterator};
use rayon::ThreadPool;
use tracing::debug;

use crate::error::SearchError;
use crate::rollout::{self, RolloutStrategy};
use mcts_core::GameState;

/// Configured worker count; 0 means "unset, use `optimal_thread_count`".
static ROLLOUT_THREADS: AtomicUsize = AtomicUsize::new(0);

/// The lazily built pool, tagged with the thread count it was built for.
static POOL: Lazy<Mutex<Option<(usize, Arc<ThreadPool>)>>> = Lazy::new(|| Mutex::new(None));

/// Platform hardware concurrency, or 1 when it cannot be detected.
pub fn optimal_thread_count() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

/// Set the number of rollout worker threads (n >= 1).
///
/// Takes effect at the next batch; must not be called while a search is in
/// flight.
pub fn set_rollout_threads(n: usize) -> Result<(), SearchError> {
    if n < 1 {
        return Err(SearchError::InvalidArgument(
            "rollout_threads must be >= 1".into(),
        ));
    }
    ROLLOUT_THREADS.store(n, Ordering::Relaxed);
    Ok(())
}

/// Configured number of rollout worker threads.
pub fn get_rollout_threads() -> usize {
    match ROLLOUT_THREADS.load(Ordering::Relaxed) {
        0 => optimal_thread_count(),
        n => n,
    }
}

/// Get or build the pool for the currently configured thread count.
fn pool_for(threads: usize) -> Result<Arc<ThreadPool>, SearchError> {
    let mut guard = match POOL.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    };
    if let Some((built_for, pool)) = guard.as_ref() {
        if *built_for == threads {
            return Ok(Arc::clone(pool));
        }
        debug!(
            old = built_for,
            new = threads,
            "rebuilding rollout pool for new thread count"
        );
    }
    let pool = Arc::new(
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|i| format!("rollout-{i}"))
            .build()?,
    );
    *guard = Some((threads, Arc::clone(&pool)));
    Ok(pool)
}

/// Run a batch of `k` independent simulations from `state` and return the
/// sum of their scores.
///
/// With `T` configured workers, `min(k, T)` jobs run in parallel and the
/// call blocks on the batch barrier; with `T == 1` the batch executes
/// inline. A panic inside a rollout propagates to the caller once the batch
/// has drained. Scores are summed commutatively, so completion order is
/// immaterial.
pub fn rollout_batch<S: GameState>(
    state: &S,
    strategy: RolloutStrategy,
    k: usize,
) -> Result<f64, SearchError> {
    let threads = get_rollout_threads();
    let jobs = k.min(threads).max(1);

    if threads == 1 || jobs == 1 {
        let sum = (0..jobs).map(|_| rollout::simulate(state, strategy)).sum();
        return Ok(sum);
    }

    let pool = pool_for(threads)?;
    let sum = pool.install(|| {
        (0..jobs)
            .into_par_iter()
            .map(|_| rollout::simulate(state, strategy))
            .sum()
    });
    Ok(sum)
}
