//! The budgeted search loop.
//!
//! One iteration runs the four phases in order: selection walks the tree
//! along UCT-best children, expansion adds one child from the untried queue,
//! simulation scores the new leaf through the rollout strategy registry
//! (fanning out to the worker pool when configured), and backpropagation
//! pushes the batch reward up the parent chain. The tree satisfies its
//! structural invariants at every iteration boundary.

use std::time::{Duration, Instant};

use tracing::{debug, trace};

use crate::config::SearchConfig;
use crate::error::SearchError;
use crate::rollout;
use crate::scheduler;
use crate::tree::MctsTree;
use mcts_core::GameState;

/// What a call to `grow` actually spent.
#[derive(Debug, Clone)]
pub struct GrowStats {
    /// Iterations performed before a budget ran out.
    pub iterations: u32,
    /// Wall-clock time spent growing.
    pub elapsed: Duration,
}

impl<S: GameState> MctsTree<S> {
    /// Grow the tree until the iteration or wall-clock budget is exhausted.
    ///
    /// At least one iteration runs per call; the clock is sampled between
    /// iterations only, so the time budget can overshoot by one iteration.
    pub fn grow(&mut self, config: &SearchConfig) -> Result<GrowStats, SearchError> {
        config.validate()?;

        let start = Instant::now();
        let mut iterations = 0u32;
        loop {
            if iterations >= config.max_iterations {
                break;
            }
            self.run_iteration(config.exploration)?;
            iterations += 1;
            if start.elapsed().as_secs_f64() >= config.max_seconds {
                break;
            }
        }

        let stats = GrowStats {
            iterations,
            elapsed: start.elapsed(),
        };
        debug!(
            iterations = stats.iterations,
            elapsed_ms = stats.elapsed.as_millis() as u64,
            nodes = self.size(),
            "tree growth finished"
        );
        Ok(stats)
    }

    /// Run one select / expand / simulate / backpropagate cycle.
    fn run_iteration(&mut self, exploration: f64) -> Result<(), SearchError> {
        let leaf = self.select(exploration);

        let (target, reward, weight) = if self.get(leaf).is_terminal() {
            // A terminal leaf is scored once with its terminal reward.
            (leaf, self.get(leaf).state.rollout(), 1)
        } else {
            let child = self.expand(leaf)?;
            let width = scheduler::get_rollout_threads();
            let strategy = rollout::get_rollout_strategy();
            let reward = scheduler::rollout_batch(&self.get(child).state, strategy, width)?;
            (child, reward, width as u32)
        };

        self.backpropagate(target, reward, weight);
        trace!(node = target.0, reward, weight, "search iteration complete");
        Ok(())
    }
}
