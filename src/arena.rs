//! Head-to-head matches between two search agents.
//!
//! Both agents keep their own tree and re-root it after every action, whoever
//! played it. Seats are swapped for the second half of the games.

use tracing::{info, warn};

use crate::action::Player;
use crate::constants::MAX_EPISODE_STEPS;
use crate::error::{GameError, SearchError};
use crate::game::{GameConfig, ZertzGame};
use crate::mcts::Mcts;
use crate::oracle::Oracle;

/// Match tally from the point of view of agent A.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ArenaResult {
    pub a_wins: usize,
    pub b_wins: usize,
    pub draws: usize,
}

pub struct Arena<A: Oracle, B: Oracle> {
    a: Mcts<A>,
    b: Mcts<B>,
    game_config: GameConfig,
    max_steps: usize,
}

impl<A: Oracle, B: Oracle> Arena<A, B> {
    pub fn new(a: Mcts<A>, b: Mcts<B>, game_config: GameConfig) -> Result<Self, GameError> {
        game_config.validate()?;
        Ok(Self {
            a,
            b,
            game_config,
            max_steps: MAX_EPISODE_STEPS,
        })
    }

    pub fn with_max_steps(mut self, steps: usize) -> Self {
        self.max_steps = steps;
        self
    }

    /// Play one game greedily. Returns `+1` if A won, `-1` if B won, `0` for
    /// a draw by step limit.
    pub fn play_game(&mut self, a_first: bool) -> Result<i8, SearchError> {
        let mut game = ZertzGame::new(self.game_config.clone())?;
        self.a.reset();
        self.b.reset();

        for _ in 0..self.max_steps {
            if let Some(winner) = game.winner() {
                let a_won = (winner == Player::First) == a_first;
                return Ok(if a_won { 1 } else { -1 });
            }

            let a_to_move = (game.current_player() == Player::First) == a_first;
            let dist = if a_to_move {
                let sims = self.a.config().num_simulations;
                self.a.get_action_distribution(&game, sims, 0.0)?
            } else {
                let sims = self.b.config().num_simulations;
                self.b.get_action_distribution(&game, sims, 0.0)?
            };
            let action = dist.best_action().ok_or_else(|| {
                GameError::InvariantViolation("empty search distribution".to_string())
            })?;

            game.apply_action(&action)?;
            self.a.move_root(&action);
            self.b.move_root(&action);
        }

        if let Some(winner) = game.winner() {
            let a_won = (winner == Player::First) == a_first;
            return Ok(if a_won { 1 } else { -1 });
        }
        warn!(steps = self.max_steps, "arena game hit the step limit");
        Ok(0)
    }

    /// Play `games` games, A moving first in the first half.
    pub fn play_matches(&mut self, games: usize) -> Result<ArenaResult, SearchError> {
        let mut result = ArenaResult::default();
        let half = games / 2;
        for i in 0..games {
            let a_first = i < half;
            match self.play_game(a_first)? {
                1 => result.a_wins += 1,
                -1 => result.b_wins += 1,
                _ => result.draws += 1,
            }
            info!(game = i + 1, a_first, ?result, "arena game finished");
        }
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::MarbleCounts;
    use crate::mcts::MctsConfig;
    use crate::oracle::UniformOracle;

    fn arena() -> Arena<UniformOracle, UniformOracle> {
        let config = MctsConfig::for_testing().with_simulations(4);
        Arena::new(
            Mcts::new(UniformOracle::new(), config.clone()),
            Mcts::new(UniformOracle::new(), config),
            GameConfig::default()
                .with_rings(7)
                .with_supply(MarbleCounts::new(3, 3, 3)),
        )
        .unwrap()
    }

    #[test]
    fn test_single_ring_first_mover_wins() {
        let mut arena = Arena::new(
            Mcts::new(UniformOracle::new(), MctsConfig::for_testing()),
            Mcts::new(UniformOracle::new(), MctsConfig::for_testing()),
            GameConfig::default().with_rings(1),
        )
        .unwrap();
        assert_eq!(arena.play_game(true).unwrap(), 1);
        assert_eq!(arena.play_game(false).unwrap(), -1);
    }

    #[test]
    fn test_match_counts_add_up() {
        let result = arena().play_matches(4).unwrap();
        assert_eq!(result.a_wins + result.b_wins + result.draws, 4);
    }

    #[test]
    fn test_step_limit_draw() {
        let mut arena = arena().with_max_steps(0);
        assert_eq!(arena.play_game(true).unwrap(), 0);
    }

    #[test]
    fn test_identical_agents_mirror_results() {
        // Greedy search with the uniform oracle is deterministic, so swapping
        // seats swaps the winner.
        let mut arena = arena();
        let first = arena.play_game(true).unwrap();
        let second = arena.play_game(false).unwrap();
        assert_eq!(first, -second);
    }
}
