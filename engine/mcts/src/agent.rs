//! Game-playing façade over the search tree.
//!
//! An agent owns one tree for the whole game and advances its root in place
//! as moves are played, keeping the explored subtree of the chosen line.

use tracing::{debug, info};

use crate::config::SearchConfig;
use crate::error::SearchError;
use crate::tree::MctsTree;
use mcts_core::GameState;

/// Plays a game by growing a search tree between moves.
#[derive(Debug)]
pub struct MctsAgent<S: GameState> {
    tree: MctsTree<S>,
    config: SearchConfig,
}

impl<S: GameState> MctsAgent<S> {
    /// Create an agent owning `initial_state`, validating the budgets up
    /// front.
    pub fn new(initial_state: S, config: SearchConfig) -> Result<Self, SearchError> {
        config.validate()?;
        Ok(Self {
            tree: MctsTree::new(initial_state),
            config,
        })
    }

    /// Create an agent with the default budgets (100 000 iterations, 30 s).
    pub fn with_defaults(initial_state: S) -> Self {
        Self {
            tree: MctsTree::new(initial_state),
            config: SearchConfig::default(),
        }
    }

    /// Incorporate the opponent's move (if any), search, and commit to the
    /// best reply.
    ///
    /// Returns `Ok(None)` without searching when the game is already over.
    /// The tree is advanced into the chosen child before returning, so the
    /// kept subtree seeds the next search.
    pub fn genmove(&mut self, enemy_move: Option<&S::Move>) -> Result<Option<S::Move>, SearchError> {
        if let Some(mv) = enemy_move {
            let outcome = self.tree.advance(mv)?;
            debug!(mv = %mv, ?outcome, "incorporated enemy move");
        }

        if self.tree.get(self.tree.root()).is_terminal() {
            debug!("root is terminal, no move to generate");
            return Ok(None);
        }

        self.tree.grow(&self.config)?;

        let Some(best) = self.tree.best_child() else {
            return Ok(None);
        };
        let Some(mv) = self.tree.get(best).mv.clone() else {
            return Ok(None);
        };

        self.tree.advance(&mv)?;
        debug!(mv = %mv, "committed to move");
        Ok(Some(mv))
    }

    /// The state the agent currently reasons from.
    pub fn current_state(&self) -> &S {
        self.tree.root_state()
    }

    /// Borrow the underlying tree, e.g. for statistics.
    pub fn tree(&self) -> &MctsTree<S> {
        &self.tree
    }

    /// Log root statistics: tree size, root visits, and each child's move,
    /// visit count and winrate.
    pub fn feedback(&self) {
        let stats = self.tree.stats();
        info!(
            nodes = stats.total_nodes,
            root_visits = stats.root_visits,
            root_winrate = stats.root_winrate,
            max_depth = stats.max_depth,
            "tree statistics"
        );
        for child in self.tree.root_child_stats() {
            info!(
                mv = %child.mv,
                visits = child.visits,
                winrate = child.winrate,
                "root child"
            );
        }
    }
}
