//! Rollout strategy registry.
//!
//! A process-wide record of how simulations are performed: which rollout
//! variant a game's state is asked for, and the random/heuristic ratio for
//! the mixed strategy. Strategy and ratio are single scalars stored in
//! atomics; setters are idempotent and may be called between searches.
//! Mutating them while a search is in flight is not supported.

use std::cell::RefCell;
use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU64, AtomicU8, Ordering};

use once_cell::sync::Lazy;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use serde::{Deserialize, Serialize};

use crate::error::SearchError;
use mcts_core::GameState;

/// How a single simulation is performed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RolloutStrategy {
    /// Pure random playouts via `GameState::rollout`.
    Random,
    /// Domain-guided playouts via `GameState::heuristic_rollout`.
    Heuristic,
    /// Heuristic with probability `heuristic_ratio`, random otherwise.
    Mixed,
    /// Reserved for a deeper evaluation variant; currently routes to
    /// `heuristic_rollout` like `Heuristic`.
    Heavy,
}

impl RolloutStrategy {
    fn from_u8(value: u8) -> Self {
        match value {
            1 => Self::Heuristic,
            2 => Self::Mixed,
            3 => Self::Heavy,
            _ => Self::Random,
        }
    }
}

impl fmt::Display for RolloutStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Random => "random",
            Self::Heuristic => "heuristic",
            Self::Mixed => "mixed",
            Self::Heavy => "heavy",
        };
        f.write_str(name)
    }
}

impl FromStr for RolloutStrategy {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "random" => Ok(Self::Random),
            "heuristic" => Ok(Self::Heuristic),
            "mixed" => Ok(Self::Mixed),
            "heavy" => Ok(Self::Heavy),
            other => Err(SearchError::InvalidArgument(format!(
                "unknown rollout strategy: {other}"
            ))),
        }
    }
}

static STRATEGY: AtomicU8 = AtomicU8::new(RolloutStrategy::Random as u8);

static HEURISTIC_RATIO: Lazy<AtomicU64> = Lazy::new(|| AtomicU64::new(0.5f64.to_bits()));

thread_local! {
    // One PRNG per thread, seeded once; rollout workers each get their own.
    static ROLLOUT_RNG: RefCell<ChaCha20Rng> = RefCell::new(ChaCha20Rng::from_entropy());
}

/// Select the process-wide rollout strategy.
pub fn set_rollout_strategy(strategy: RolloutStrategy) {
    STRATEGY.store(strategy as u8, Ordering::Relaxed);
}

/// Current process-wide rollout strategy.
pub fn get_rollout_strategy() -> RolloutStrategy {
    RolloutStrategy::from_u8(STRATEGY.load(Ordering::Relaxed))
}

/// Set the heuristic share for the mixed strategy.
///
/// `ratio` is the probability that a mixed simulation uses the heuristic
/// rollout; it must lie in `[0, 1]`.
pub fn set_heuristic_ratio(ratio: f64) -> Result<(), SearchError> {
    if !(0.0..=1.0).contains(&ratio) {
        return Err(SearchError::InvalidArgument(format!(
            "heuristic_ratio must be in [0, 1], got {ratio}"
        )));
    }
    HEURISTIC_RATIO.store(ratio.to_bits(), Ordering::Relaxed);
    Ok(())
}

/// Current heuristic share for the mixed strategy.
pub fn get_heuristic_ratio() -> f64 {
    f64::from_bits(HEURISTIC_RATIO.load(Ordering::Relaxed))
}

/// Run one simulation from `state` under `strategy`.
pub fn simulate<S: GameState>(state: &S, strategy: RolloutStrategy) -> f64 {
    match strategy {
        RolloutStrategy::Random => state.rollout(),
        RolloutStrategy::Heuristic | RolloutStrategy::Heavy => state.heuristic_rollout(),
        RolloutStrategy::Mixed => {
            let draw: f64 = ROLLOUT_RNG.with(|rng| rng.borrow_mut().gen());
            if draw < get_heuristic_ratio() {
                state.heuristic_rollout()
            } else {
                state.rollout()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_games::RecordingGame;
    use crate::test_utils::GLOBAL_CONFIG_TEST_MUTEX;

    #[test]
    fn test_strategy_display_and_parse() {
        for strategy in [
            RolloutStrategy::Random,
            RolloutStrategy::Heuristic,
            RolloutStrategy::Mixed,
            RolloutStrategy::Heavy,
        ] {
            let parsed: RolloutStrategy = strategy.to_string().parse().unwrap();
            assert_eq!(parsed, strategy);
        }
        assert!("minimax".parse::<RolloutStrategy>().is_err());
    }

    #[test]
    fn test_ratio_validation() {
        let _guard = GLOBAL_CONFIG_TEST_MUTEX.lock().unwrap();

        assert!(set_heuristic_ratio(-0.1).is_err());
        assert!(set_heuristic_ratio(1.1).is_err());
        assert!(set_heuristic_ratio(f64::NAN).is_err());

        set_heuristic_ratio(0.25).unwrap();
        assert!((get_heuristic_ratio() - 0.25).abs() < 1e-9);
        set_heuristic_ratio(0.5).unwrap();
    }

    #[test]
    fn test_random_strategy_routes_to_rollout() {
        let game = RecordingGame::new(3);
        for _ in 0..10 {
            simulate(&game, RolloutStrategy::Random);
        }
        assert_eq!(game.random_calls(), 10);
        assert_eq!(game.heuristic_calls(), 0);
    }

    #[test]
    fn test_heuristic_and_heavy_route_to_heuristic_rollout() {
        let game = RecordingGame::new(3);
        for _ in 0..5 {
            simulate(&game, RolloutStrategy::Heuristic);
            simulate(&game, RolloutStrategy::Heavy);
        }
        assert_eq!(game.random_calls(), 0);
        assert_eq!(game.heuristic_calls(), 10);
    }

    #[test]
    fn test_mixed_extremes_match_pure_strategies() {
        let _guard = GLOBAL_CONFIG_TEST_MUTEX.lock().unwrap();

        let game = RecordingGame::new(3);
        set_heuristic_ratio(0.0).unwrap();
        for _ in 0..20 {
            simulate(&game, RolloutStrategy::Mixed);
        }
        assert_eq!(game.random_calls(), 20);
        assert_eq!(game.heuristic_calls(), 0);

        let game = RecordingGame::new(3);
        set_heuristic_ratio(1.0).unwrap();
        for _ in 0..20 {
            simulate(&game, RolloutStrategy::Mixed);
        }
        assert_eq!(game.random_calls(), 0);
        assert_eq!(game.heuristic_calls(), 20);

        set_heuristic_ratio(0.5).unwrap();
    }

    #[test]
    fn test_setters_are_idempotent() {
        let _guard = GLOBAL_CONFIG_TEST_MUTEX.lock().unwrap();

        set_rollout_strategy(RolloutStrategy::Mixed);
        set_rollout_strategy(RolloutStrategy::Mixed);
        assert_eq!(get_rollout_strategy(), RolloutStrategy::Mixed);

        set_rollout_strategy(RolloutStrategy::Random);
        assert_eq!(get_rollout_strategy(), RolloutStrategy::Random);
    }
}
