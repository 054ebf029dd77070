//! Core game-interface contract for the MCTS engine
//!
//! This crate provides the fundamental abstraction for game search:
//! - `GameState`: Typed trait that user-defined games implement
//!
//! The search engine (the `mcts` crate) consumes this contract and nothing
//! else; it never inspects game-specific state or move contents.

pub mod game;

// Re-export main types for convenience
pub use game::GameState;
