//! Search configuration parameters.

use serde::{Deserialize, Serialize};

use crate::error::SearchError;

/// Configuration for one search agent.
///
/// Budgets bound every call to `grow`: the loop stops at whichever of
/// `max_iterations` and `max_seconds` is exhausted first. The wall clock is
/// sampled between iterations only, so a timeout can lag by one iteration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Maximum number of search iterations per `grow` call.
    pub max_iterations: u32,

    /// Wall-clock budget in seconds per `grow` call. May be
    /// `f64::INFINITY` to search on iterations alone.
    pub max_seconds: f64,

    /// Exploration constant `c` in the UCT formula.
    /// Higher values favor exploration. The default is sqrt(2).
    pub exploration: f64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_iterations: 100_000,
            max_seconds: 30.0,
            exploration: std::f64::consts::SQRT_2,
        }
    }
}

impl SearchConfig {
    /// Create a small-budget config for tests.
    pub fn for_testing() -> Self {
        Self {
            max_iterations: 1_000,
            max_seconds: 5.0,
            ..Self::default()
        }
    }

    /// Builder pattern: set the iteration budget.
    pub fn with_max_iterations(mut self, n: u32) -> Self {
        self.max_iterations = n;
        self
    }

    /// Builder pattern: set the wall-clock budget in seconds.
    pub fn with_max_seconds(mut self, seconds: f64) -> Self {
        self.max_seconds = seconds;
        self
    }

    /// Builder pattern: set the exploration constant.
    pub fn with_exploration(mut self, c: f64) -> Self {
        self.exploration = c;
        self
    }

    /// Check the configuration at an entry point.
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.max_iterations < 1 {
            return Err(SearchError::InvalidArgument(
                "max_iterations must be >= 1".into(),
            ));
        }
        if !(self.max_seconds > 0.0) {
            return Err(SearchError::InvalidArgument(
                "max_seconds must be positive".into(),
            ));
        }
        if self.exploration.is_nan() || self.exploration < 0.0 {
            return Err(SearchError::InvalidArgument(
                "exploration must be a non-negative number".into(),
            ));
        }
        Ok(())
    }
}
