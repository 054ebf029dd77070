//! Error types for the search engine.

use thiserror::Error;

/// Errors that can occur while configuring or running a search.
///
/// Running out of budget is not an error - `grow` simply stops. A terminal
/// root makes `genmove` return `Ok(None)`. Panics raised inside user
/// callbacks are not caught; they unwind through the engine after any
/// in-flight rollout batch has drained, with the tree left at the last
/// quiescent point.
#[derive(Debug, Error)]
pub enum SearchError {
    /// A caller-supplied parameter was out of range. The operation had no
    /// effect.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The game refused a move the engine had dequeued from its own
    /// `legal_moves` output. Fatal for the current search; the tree is left
    /// in its pre-mutation state.
    #[error("illegal transition: game rejected move {mv}")]
    IllegalTransition { mv: String },

    /// The rollout worker pool could not be built.
    #[error("rollout pool: {0}")]
    Scheduler(#[from] rayon::ThreadPoolBuildError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = SearchError::InvalidArgument("max_iterations must be >= 1".into());
        assert!(err.to_string().contains("invalid argument"));

        let err = SearchError::IllegalTransition {
            mv: "(0, 2, X)".into(),
        };
        assert!(err.to_string().contains("(0, 2, X)"));
    }
}
