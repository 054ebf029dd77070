//! Typed game trait providing the contract between games and the search engine
//!
//! The engine treats moves as opaque tokens - it never inspects or interprets
//! them. All game-specific logic is delegated to trait methods. Games work
//! with strongly-typed state and move types while the engine stays generic.

use std::fmt;

/// Main trait for game implementations.
///
/// A game exposes its rules through this trait: legal-move enumeration,
/// move application, terminal detection, and simulation. The engine searches
/// from the perspective of a fixed *self side* - the party whose win
/// probability `rollout` reports and `self_side_to_move` identifies.
///
/// # Type Parameters
///
/// * `Move` - Move type; small, value-comparable, printable
///
/// # Example
///
/// ```rust
/// use mcts_core::GameState;
/// use std::fmt;
///
/// /// Both players alternately take 1 or 2 tokens; taking the last one wins.
/// #[derive(Debug, Clone)]
/// struct Nim {
///     remaining: u32,
///     self_turn: bool,
/// }
///
/// #[derive(Debug, Clone, Copy, PartialEq)]
/// struct Take(u32);
///
/// impl fmt::Display for Take {
///     fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
///         write!(f, "take {}", self.0)
///     }
/// }
///
/// impl GameState for Nim {
///     type Move = Take;
///
///     fn legal_moves(&self) -> Vec<Take> {
///         (1..=2).filter(|&n| n <= self.remaining).map(Take).collect()
///     }
///
///     fn apply(&self, mv: &Take) -> Option<Nim> {
///         if mv.0 < 1 || mv.0 > 2 || mv.0 > self.remaining {
///             return None;
///         }
///         Some(Nim {
///             remaining: self.remaining - mv.0,
///             self_turn: !self.self_turn,
///         })
///     }
///
///     fn is_terminal(&self) -> bool {
///         self.remaining == 0
///     }
///
///     fn self_side_to_move(&self) -> bool {
///         self.self_turn
///     }
///
///     fn rollout(&self) -> f64 {
///         // The side that just moved took the last token and won.
///         if self.is_terminal() {
///             if self.self_turn { 0.0 } else { 1.0 }
///         } else {
///             0.5
///         }
///     }
/// }
/// ```
pub trait GameState: Clone + fmt::Debug + Send + Sync + 'static {
    /// The move type for this game. The engine treats it as an opaque token:
    /// it only stores moves as tree edges, compares them by value, and passes
    /// them back to the game.
    type Move: Clone + PartialEq + fmt::Debug + fmt::Display + Send + Sync + 'static;

    /// Enumerate all legal moves from this state.
    ///
    /// The returned order is authoritative: the engine expands children in
    /// exactly this order. Must be empty if and only if the state is
    /// terminal.
    fn legal_moves(&self) -> Vec<Self::Move>;

    /// Produce the successor state resulting from `mv`.
    ///
    /// `mv` must have been produced by `legal_moves` on this state. Returning
    /// `None` signals an illegal transition; the engine treats that as fatal
    /// for the current search and reports it to the caller.
    fn apply(&self, mv: &Self::Move) -> Option<Self>;

    /// Whether the game has ended at this state.
    ///
    /// Must be pure and stable for a given state.
    fn is_terminal(&self) -> bool;

    /// Whether the *self side* moves next at this state.
    ///
    /// The self side is the party whose win probability `rollout` reports;
    /// the engine inverts child winrates at states where the other side
    /// moves.
    fn self_side_to_move(&self) -> bool;

    /// Run one simulated completion from this state and return the self
    /// side's win probability in `[0.0, 1.0]`.
    ///
    /// On a terminal state this is the terminal score itself (win = 1.0,
    /// draw = 0.5, loss = 0.0). May use randomness. Must be safe to call
    /// from multiple threads at once when parallel rollouts are enabled.
    fn rollout(&self) -> f64;

    /// Domain-guided simulation variant, in `[0.0, 1.0]`.
    ///
    /// Selected instead of `rollout` under the heuristic rollout strategies.
    fn heuristic_rollout(&self) -> f64 {
        self.rollout()
    }

    /// Advisory score for `mv` from this state, in `[0.0, 1.0]`.
    fn evaluate_move(&self, _mv: &Self::Move) -> f64 {
        0.0
    }

    /// Advisory score for this position, in `[0.0, 1.0]`.
    fn evaluate_position(&self) -> f64 {
        0.5
    }
}
