//! Game facade: configuration, turn bookkeeping, and consistency checks on top
//! of [`Board`].

use crate::action::{Action, ActionSpace, MarbleCounts, Player};
use crate::board::{ActionOutcome, Board, LegalActions};
use crate::constants::{
    DEFAULT_HISTORY_DEPTH, DEFAULT_RINGS, DEFAULT_SUPPLY, DEFAULT_WIN_CONDITIONS, width_for_rings,
};
use crate::error::GameError;
use crate::notation;
use crate::symmetry::{self, Symmetry};

/// Rules variant and board size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    pub rings: usize,
    pub supply: MarbleCounts,
    /// A player wins as soon as their stash covers any one of these.
    pub win_conditions: Vec<MarbleCounts>,
    pub history_depth: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            rings: DEFAULT_RINGS,
            supply: MarbleCounts(DEFAULT_SUPPLY),
            win_conditions: DEFAULT_WIN_CONDITIONS.iter().map(|&c| MarbleCounts(c)).collect(),
            history_depth: DEFAULT_HISTORY_DEPTH,
        }
    }
}

impl GameConfig {
    pub fn with_rings(mut self, rings: usize) -> Self {
        self.rings = rings;
        self
    }

    pub fn with_supply(mut self, supply: MarbleCounts) -> Self {
        self.supply = supply;
        self
    }

    pub fn with_win_conditions(mut self, win_conditions: Vec<MarbleCounts>) -> Self {
        self.win_conditions = win_conditions;
        self
    }

    pub fn with_history_depth(mut self, depth: usize) -> Self {
        self.history_depth = depth;
        self
    }

    pub fn validate(&self) -> Result<(), GameError> {
        if width_for_rings(self.rings).is_none() {
            return Err(GameError::Configuration(format!(
                "unsupported ring count {}",
                self.rings
            )));
        }
        if self.history_depth == 0 {
            return Err(GameError::Configuration(
                "history depth must be at least 1".to_string(),
            ));
        }
        if self.win_conditions.is_empty() {
            return Err(GameError::Configuration(
                "at least one win condition is required".to_string(),
            ));
        }
        if self.win_conditions.iter().any(MarbleCounts::is_empty) {
            return Err(GameError::Configuration(
                "a win condition needs at least one marble".to_string(),
            ));
        }
        Ok(())
    }
}

/// A game in progress.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZertzGame {
    config: GameConfig,
    board: Board,
    move_count: usize,
    turn_number: usize,
}

impl ZertzGame {
    pub fn new(config: GameConfig) -> Result<Self, GameError> {
        config.validate()?;
        let board = Board::new(config.rings, config.supply, config.history_depth)?;
        Ok(Self {
            config,
            board,
            move_count: 0,
            turn_number: 0,
        })
    }

    /// Restart from the initial position with the same configuration.
    pub fn reset(&mut self) -> Result<(), GameError> {
        *self = Self::new(self.config.clone())?;
        Ok(())
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn current_player(&self) -> Player {
        self.board.current_player()
    }

    /// `+1` when the first player is to move, `-1` otherwise.
    pub fn player_value(&self) -> i8 {
        self.current_player().sign()
    }

    /// Number of actions applied, capture steps counted individually.
    pub fn move_count(&self) -> usize {
        self.move_count
    }

    /// Number of completed turns.
    pub fn turn_number(&self) -> usize {
        self.turn_number
    }

    pub fn action_space(&self) -> ActionSpace {
        self.board.action_space()
    }

    pub fn legal_actions(&self) -> LegalActions {
        self.board.legal_actions()
    }

    pub fn is_legal(&self, action: &Action) -> bool {
        self.board.is_legal(action)
    }

    /// Apply an action and re-check marble conservation. An
    /// [`GameError::InvariantViolation`] means the game must be abandoned.
    pub fn apply_action(&mut self, action: &Action) -> Result<ActionOutcome, GameError> {
        let outcome = self.board.apply_action(action)?;
        self.board.check_invariants(&self.config.supply)?;
        self.move_count += 1;
        if outcome.turn_passed {
            self.turn_number += 1;
        }
        Ok(outcome)
    }

    /// `+1` first player won, `-1` second player won, `0` still running.
    pub fn get_game_ended(&self) -> i8 {
        self.board.get_game_ended(&self.config.win_conditions)
    }

    pub fn winner(&self) -> Option<Player> {
        match self.get_game_ended() {
            1 => Some(Player::First),
            -1 => Some(Player::Second),
            _ => None,
        }
    }

    pub fn action_to_string(&self, action: &Action) -> Result<String, GameError> {
        notation::action_to_string(&self.board, action)
    }

    pub fn string_to_action(&self, s: &str) -> Result<Action, GameError> {
        notation::string_to_action(&self.board, s)
    }

    /// Parse and apply an action string.
    pub fn play(&mut self, s: &str) -> Result<ActionOutcome, GameError> {
        let action = self.string_to_action(s)?;
        self.apply_action(&action)
    }

    pub fn symmetries(&self) -> Vec<(Symmetry, Board)> {
        symmetry::symmetries(&self.board)
    }

    pub fn encode(&self) -> Vec<f32> {
        self.board.encode()
    }
}
