//! Deterministic toy games used by the engine's unit tests.

use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use mcts_core::GameState;

/// A take-1-or-2 countdown game. The side taking the last token wins, so
/// rollouts of terminal states are exact and everything is deterministic.
#[derive(Debug, Clone, PartialEq)]
pub struct LineGame {
    remaining: u32,
    self_turn: bool,
    poisoned: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step(pub u32);

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "take {}", self.0)
    }
}

impl LineGame {
    pub fn new(remaining: u32) -> Self {
        Self {
            remaining,
            self_turn: true,
            poisoned: false,
        }
    }

    /// A variant whose `apply` refuses every move, for exercising the
    /// illegal-transition path.
    pub fn poisoned(remaining: u32) -> Self {
        Self {
            poisoned: true,
            ..Self::new(remaining)
        }
    }

    pub fn other_side_to_move(mut self) -> Self {
        self.self_turn = false;
        self
    }
}

impl GameState for LineGame {
    type Move = Step;

    fn legal_moves(&self) -> Vec<Step> {
        (1..=2)
            .filter(|&n| n <= self.remaining)
            .map(Step)
            .collect()
    }

    fn apply(&self, mv: &Step) -> Option<Self> {
        if self.poisoned || mv.0 < 1 || mv.0 > 2 || mv.0 > self.remaining {
            return None;
        }
        Some(Self {
            remaining: self.remaining - mv.0,
            self_turn: !self.self_turn,
            poisoned: false,
        })
    }

    fn is_terminal(&self) -> bool {
        self.remaining == 0
    }

    fn self_side_to_move(&self) -> bool {
        self.self_turn
    }

    fn rollout(&self) -> f64 {
        if self.is_terminal() {
            // Whoever took the last token has just moved and won.
            if self.self_turn {
                0.0
            } else {
                1.0
            }
        } else {
            0.5
        }
    }
}

/// A game that counts which rollout variant was invoked, for verifying
/// strategy dispatch and batch widths. The counters are shared across
/// clones so worker-thread copies report into the same totals.
#[derive(Debug, Clone)]
pub struct RecordingGame {
    remaining: u32,
    random_calls: Arc<AtomicUsize>,
    heuristic_calls: Arc<AtomicUsize>,
}

impl RecordingGame {
    pub fn new(remaining: u32) -> Self {
        Self {
            remaining,
            random_calls: Arc::new(AtomicUsize::new(0)),
            heuristic_calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn random_calls(&self) -> usize {
        self.random_calls.load(Ordering::SeqCst)
    }

    pub fn heuristic_calls(&self) -> usize {
        self.heuristic_calls.load(Ordering::SeqCst)
    }
}

impl GameState for RecordingGame {
    type Move = Step;

    fn legal_moves(&self) -> Vec<Step> {
        (1..=2)
            .filter(|&n| n <= self.remaining)
            .map(Step)
            .collect()
    }

    fn apply(&self, mv: &Step) -> Option<Self> {
        if mv.0 < 1 || mv.0 > 2 || mv.0 > self.remaining {
            return None;
        }
        Some(Self {
            remaining: self.remaining - mv.0,
            random_calls: Arc::clone(&self.random_calls),
            heuristic_calls: Arc::clone(&self.heuristic_calls),
        })
    }

    fn is_terminal(&self) -> bool {
        self.remaining == 0
    }

    fn self_side_to_move(&self) -> bool {
        true
    }

    fn rollout(&self) -> f64 {
        self.random_calls.fetch_add(1, Ordering::SeqCst);
        0.5
    }

    fn heuristic_rollout(&self) -> f64 {
        self.heuristic_calls.fetch_add(1, Ordering::SeqCst);
        0.5
    }
}
