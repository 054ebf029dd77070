//! UCT Monte Carlo Tree Search engine.
//!
//! This crate provides a game-agnostic MCTS implementation that works with
//! any game implementing the `mcts-core` `GameState` trait.
//!
//! # Overview
//!
//! The engine grows a search tree by repeating four phases:
//!
//! 1. **Selection**: Traverse the tree using UCT (Upper Confidence bounds
//!    applied to Trees) to balance exploration and exploitation
//! 2. **Expansion**: Add one child for the front untried move of the
//!    stopping node
//! 3. **Simulation**: Score the new leaf with one or more rollouts, chosen
//!    through the rollout strategy registry and executed in parallel on the
//!    rollout worker pool when configured
//! 4. **Backpropagation**: Update visit counts and scores along the path
//!    from leaf to root
//!
//! The search driver is single-threaded; only simulation fans out. Rewards
//! are self-side win probabilities and are never flipped during
//! backpropagation - UCT inverts child winrates at nodes where the other
//! side moves.
//!
//! # Usage
//!
//! ```rust,ignore
//! use mcts::{MctsAgent, SearchConfig};
//! use games_tictactoe::{Place, TicTacToe, O};
//!
//! let config = SearchConfig::default()
//!     .with_max_iterations(10_000)
//!     .with_max_seconds(5.0);
//! let mut agent = MctsAgent::new(TicTacToe::new(), config)?;
//!
//! // Engine to move.
//! let mv = agent.genmove(None)?;
//!
//! // Feed the opponent's reply back in; the tree advances in place.
//! let reply = Place::new(0, 0, O);
//! let next = agent.genmove(Some(&reply))?;
//! ```
//!
//! # Configuration
//!
//! Per-agent budgets live in [`SearchConfig`] (iterations, wall-clock
//! seconds, exploration constant). How simulations are performed is
//! process-wide: [`set_rollout_strategy`] / [`set_heuristic_ratio`] choose
//! between random, heuristic, mixed and heavy rollouts, and
//! [`set_rollout_threads`] sizes the worker pool. Process-wide settings may
//! only change between searches.

pub mod agent;
pub mod config;
pub mod error;
pub mod node;
pub mod rollout;
pub mod scheduler;
pub mod search;
pub mod tree;

#[cfg(test)]
pub(crate) mod test_games;

// Re-export main types
pub use agent::MctsAgent;
pub use config::SearchConfig;
pub use error::SearchError;
pub use node::{MctsNode, NodeId};
pub use rollout::{
    get_heuristic_ratio, get_rollout_strategy, set_heuristic_ratio, set_rollout_strategy,
    RolloutStrategy,
};
pub use scheduler::{get_rollout_threads, optimal_thread_count, set_rollout_threads};
pub use search::GrowStats;
pub use tree::{AdvanceOutcome, ChildStats, MctsTree, TreeStats};
