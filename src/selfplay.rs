//! Self-play episode generation.
//!
//! One search tree is kept across the whole episode and re-rooted after every
//! action. Positions are labelled with the final result from the perspective
//! of the player to move, and can be augmented with their symmetric copies.

use tracing::{info, warn};

use crate::action::{ActionType, Player};
use crate::board::Board;
use crate::constants::{MAX_EPISODE_STEPS, TEMP_THRESHOLD};
use crate::error::{GameError, SearchError};
use crate::game::{GameConfig, ZertzGame};
use crate::mcts::{Mcts, MctsConfig};
use crate::oracle::{Oracle, TrainingExample};
use crate::symmetry::Symmetry;

/// Episode parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelfPlayConfig {
    /// Actions played with temperature 1 before switching to greedy play.
    pub temp_threshold: usize,
    /// Actions after which the episode is scored as a draw.
    pub max_episode_steps: usize,
    /// Add the three symmetric copies of every position.
    pub augment_symmetries: bool,
    pub seed: Option<u64>,
}

impl Default for SelfPlayConfig {
    fn default() -> Self {
        Self {
            temp_threshold: TEMP_THRESHOLD,
            max_episode_steps: MAX_EPISODE_STEPS,
            augment_symmetries: true,
            seed: None,
        }
    }
}

impl SelfPlayConfig {
    pub fn with_temp_threshold(mut self, plies: usize) -> Self {
        self.temp_threshold = plies;
        self
    }

    pub fn with_max_episode_steps(mut self, steps: usize) -> Self {
        self.max_episode_steps = steps;
        self
    }

    pub fn with_augmentation(mut self, augment: bool) -> Self {
        self.augment_symmetries = augment;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

/// Result of one episode.
#[derive(Debug, Clone)]
pub struct Episode {
    pub examples: Vec<TrainingExample>,
    /// `None` for a draw by step limit.
    pub winner: Option<Player>,
    pub steps: usize,
}

/// Aggregate over several episodes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SelfPlayStats {
    pub first_wins: usize,
    pub second_wins: usize,
    pub draws: usize,
    pub examples: usize,
}

struct Record {
    board: Board,
    placement: Vec<f32>,
    capture: Vec<f32>,
    action_type: ActionType,
    player_value: i8,
}

/// Self-play driver owning one search engine.
pub struct SelfPlay<O: Oracle> {
    game_config: GameConfig,
    config: SelfPlayConfig,
    mcts: Mcts<O>,
    rng: fastrand::Rng,
}

impl<O: Oracle> SelfPlay<O> {
    pub fn new(
        oracle: O,
        game_config: GameConfig,
        mcts_config: MctsConfig,
        config: SelfPlayConfig,
    ) -> Result<Self, GameError> {
        game_config.validate()?;
        let rng = match config.seed {
            Some(seed) => fastrand::Rng::with_seed(seed),
            None => fastrand::Rng::new(),
        };
        Ok(Self {
            game_config,
            config,
            mcts: Mcts::new(oracle, mcts_config),
            rng,
        })
    }

    pub fn mcts(&self) -> &Mcts<O> {
        &self.mcts
    }

    /// Play one game against itself and return the labelled positions.
    pub fn play_episode(&mut self) -> Result<Episode, SearchError> {
        let mut game = ZertzGame::new(self.game_config.clone())?;
        self.mcts.reset();
        let sims = self.mcts.config().num_simulations;

        let mut records = Vec::new();
        let mut steps = 0;
        let result = loop {
            let ended = game.get_game_ended();
            if ended != 0 {
                break ended;
            }
            if steps >= self.config.max_episode_steps {
                warn!(steps, "episode hit the step limit, scoring as a draw");
                break 0;
            }

            let temperature = if steps < self.config.temp_threshold {
                1.0
            } else {
                0.0
            };
            let dist = self.mcts.get_action_distribution(&game, sims, temperature)?;
            let action = if temperature > 0.0 {
                dist.sample(&mut self.rng)
            } else {
                dist.best_action()
            }
            .ok_or_else(|| GameError::InvariantViolation("empty search distribution".to_string()))?;

            records.push(Record {
                board: game.board().clone(),
                placement: dist.placement,
                capture: dist.capture,
                action_type: dist.action_type,
                player_value: game.player_value(),
            });

            self.mcts.move_root(&action);
            game.apply_action(&action)?;
            steps += 1;
        };

        let examples = self.label(records, result);
        let winner = game.winner().filter(|_| result != 0);
        info!(steps, ?winner, examples = examples.len(), "episode finished");
        Ok(Episode {
            examples,
            winner,
            steps,
        })
    }

    fn label(&self, records: Vec<Record>, result: i8) -> Vec<TrainingExample> {
        let mut examples = Vec::new();
        for record in records {
            let outcome = f32::from(result * record.player_value);
            if self.config.augment_symmetries {
                let space = record.board.action_space();
                for sym in Symmetry::ALL {
                    let transform = |action_type: ActionType, policy: &[f32]| {
                        if action_type == record.action_type {
                            sym.policy(&space, action_type, policy)
                        } else {
                            policy.to_vec()
                        }
                    };
                    examples.push(TrainingExample {
                        board: sym.board(&record.board),
                        placement_target: transform(ActionType::Placement, &record.placement),
                        capture_target: transform(ActionType::Capture, &record.capture),
                        outcome,
                    });
                }
            }
            examples.push(TrainingExample {
                board: record.board,
                placement_target: record.placement,
                capture_target: record.capture,
                outcome,
            });
        }
        examples
    }

    /// Play `episodes` games, then hand every example to the oracle.
    pub fn run(&mut self, episodes: usize) -> Result<(SelfPlayStats, Vec<TrainingExample>), SearchError> {
        let mut stats = SelfPlayStats::default();
        let mut examples = Vec::new();
        for i in 0..episodes {
            let episode = self.play_episode()?;
            match episode.winner {
                Some(Player::First) => stats.first_wins += 1,
                Some(Player::Second) => stats.second_wins += 1,
                None => stats.draws += 1,
            }
            info!(episode = i + 1, steps = episode.steps, "self-play progress");
            examples.extend(episode.examples);
        }
        stats.examples = examples.len();
        self.mcts.oracle_mut().train(&examples)?;
        Ok((stats, examples))
    }
}
