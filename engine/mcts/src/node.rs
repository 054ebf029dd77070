//! Search-tree node representation.
//!
//! Each node owns the game state it represents, the move that led to it from
//! its parent, the queue of moves not yet expanded, and the visit/score
//! statistics used for UCT selection.

use std::collections::VecDeque;

use mcts_core::GameState;

/// Index into the node arena. Using a newtype for type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub u32);

impl NodeId {
    pub const NONE: NodeId = NodeId(u32::MAX);

    pub fn is_none(self) -> bool {
        self == Self::NONE
    }

    pub fn is_some(self) -> bool {
        !self.is_none()
    }

    #[inline]
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

/// A node in the search tree.
///
/// Children own their subtrees through the arena; `parent` is a back
/// reference used only for backpropagation and size maintenance, never an
/// ownership edge.
#[derive(Debug, Clone)]
pub struct MctsNode<S: GameState> {
    /// Parent node index (NONE for the root).
    pub parent: NodeId,

    /// Move that led here from the parent's state (None only at the root).
    pub mv: Option<S::Move>,

    /// Owned game state at this node.
    pub state: S,

    /// Legal moves not yet expanded, drained front-first.
    /// Empty from birth for terminal nodes.
    pub untried: VecDeque<S::Move>,

    /// Ordered child indices; the order matches the order of expansion.
    pub children: Vec<NodeId>,

    /// Cached result of the terminal check at construction.
    pub terminal: bool,

    /// Number of backpropagation passes through this node.
    pub visits: u32,

    /// Sum of self-side rewards backpropagated through this node.
    pub score: f64,

    /// Nodes in the subtree rooted here, including self.
    pub size: u32,
}

impl<S: GameState> MctsNode<S> {
    /// Create a new root node owning `state`.
    pub fn new_root(state: S) -> Self {
        Self::new(NodeId::NONE, state, None)
    }

    /// Create a child node owning `state` and the move that produced it.
    pub fn new_child(parent: NodeId, state: S, mv: S::Move) -> Self {
        Self::new(parent, state, Some(mv))
    }

    fn new(parent: NodeId, state: S, mv: Option<S::Move>) -> Self {
        let terminal = state.is_terminal();
        let untried = if terminal {
            VecDeque::new()
        } else {
            state.legal_moves().into()
        };
        Self {
            parent,
            mv,
            state,
            untried,
            children: Vec::new(),
            terminal,
            visits: 0,
            score: 0.0,
            size: 1,
        }
    }

    /// Whether every legal move from this state has been expanded.
    /// Terminal nodes are fully expanded by definition.
    #[inline]
    pub fn is_fully_expanded(&self) -> bool {
        self.terminal || self.untried.is_empty()
    }

    #[inline]
    pub fn is_terminal(&self) -> bool {
        self.terminal
    }

    /// Mean self-side score over all passes, 0.0 if never visited.
    #[inline]
    pub fn mean_score(&self) -> f64 {
        if self.visits == 0 {
            0.0
        } else {
            self.score / self.visits as f64
        }
    }

    /// Winrate of this node as seen from its parent.
    ///
    /// Scores are stored as self-side win probability mass and are never
    /// flipped during backpropagation; the flip happens here instead, at
    /// parents where the other side chooses.
    #[inline]
    pub fn winrate(&self, self_side_at_parent: bool) -> f64 {
        let mean = self.mean_score();
        if self_side_at_parent {
            mean
        } else {
            1.0 - mean
        }
    }

    /// UCT score of this node for selection at its parent.
    ///
    /// `U = winrate + c * sqrt(ln(parent_visits) / visits)`
    ///
    /// Takes the pre-computed `ln(parent_visits)` to avoid recomputing it
    /// per child. Callers must handle zero-visit children before scoring;
    /// this returns infinity for them so they always win a comparison.
    #[inline]
    pub fn uct_score(&self, parent_visits_ln: f64, c: f64, self_side_at_parent: bool) -> f64 {
        if self.visits == 0 {
            return f64::INFINITY;
        }
        self.winrate(self_side_at_parent) + c * (parent_visits_ln / self.visits as f64).sqrt()
    }
}
