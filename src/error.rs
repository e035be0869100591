//! Error types shared by the board engine and the search.

use thiserror::Error;

use crate::action::Action;

/// Errors raised by the board engine and the game facade.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GameError {
    /// The action is not in the legal set of the current state.
    #[error("illegal action {action:?} ({} legal actions available)", legal.len())]
    RuleViolation { action: Action, legal: Vec<Action> },

    #[error("invalid configuration: {0}")]
    Configuration(String),

    #[error("malformed action text: {0}")]
    Notation(String),

    /// Internal bookkeeping is broken. The game instance must be abandoned.
    #[error("invariant violated: {0}")]
    InvariantViolation(String),
}

/// Errors returned by oracle implementations.
#[derive(Debug, Error)]
pub enum OracleError {
    #[error("prediction failed: {0}")]
    Prediction(String),

    #[error("training failed: {0}")]
    Training(String),

    #[error("policy has {got} entries, expected {expected}")]
    Shape { expected: usize, got: usize },
}

/// Errors that can occur during MCTS search.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("game error: {0}")]
    Game(#[from] GameError),

    #[error("oracle error: {0}")]
    Oracle(#[from] OracleError),

    #[error("search requested on a finished game")]
    GameOver,
}
