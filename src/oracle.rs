//! Policy/value oracle used to guide the search.
//!
//! The oracle is normally a neural network living outside this crate. Here we
//! only define the interface and two stand-ins: a uniform oracle for tests and
//! a rollout oracle that estimates values from random playouts.

use std::sync::Mutex;

use crate::action::{ActionSpace, ActionType, MarbleCounts};
use crate::board::Board;
use crate::error::OracleError;
use crate::playout::playout;

/// Raw oracle output for one state.
#[derive(Debug, Clone)]
pub struct Prediction {
    /// Flattened `[3][W²][W²+1]` placement policy.
    pub placement: Vec<f32>,
    /// Flattened `[6][W][W]` capture policy.
    pub capture: Vec<f32>,
    /// Expected outcome in `[-1, 1]` for the player to move.
    pub value: f32,
}

impl Prediction {
    /// All-zero policies of the right shapes.
    pub fn zeros(space: &ActionSpace, value: f32) -> Self {
        Self {
            placement: vec![0.0; space.placement_size()],
            capture: vec![0.0; space.capture_size()],
            value,
        }
    }

    pub fn policy(&self, action_type: ActionType) -> &[f32] {
        match action_type {
            ActionType::Placement => &self.placement,
            ActionType::Capture => &self.capture,
        }
    }

    /// Check both policy vectors against the board's action space.
    pub fn check_shape(&self, space: &ActionSpace) -> Result<(), OracleError> {
        for (got, expected) in [
            (self.placement.len(), space.placement_size()),
            (self.capture.len(), space.capture_size()),
        ] {
            if got != expected {
                return Err(OracleError::Shape { expected, got });
            }
        }
        Ok(())
    }
}

/// One labelled position produced by self-play.
#[derive(Debug, Clone)]
pub struct TrainingExample {
    pub board: Board,
    /// Search policy over placements (all zero when captures were forced).
    pub placement_target: Vec<f32>,
    /// Search policy over captures (all zero for placement states).
    pub capture_target: Vec<f32>,
    /// Final result from the perspective of the player to move: `+1`, `-1`
    /// or `0` for a draw.
    pub outcome: f32,
}

/// Trait for policy/value providers.
pub trait Oracle: Send + Sync {
    /// Predict policies and value for `board`. `has_placement` tells whether
    /// the placement head is the one that will be read.
    fn predict(&self, board: &Board, has_placement: bool) -> Result<Prediction, OracleError>;

    /// Update the oracle from self-play data. The default does nothing.
    fn train(&mut self, _examples: &[TrainingExample]) -> Result<(), OracleError> {
        Ok(())
    }
}

/// Equal probability for every legal action, value always 0.
#[derive(Debug, Clone, Default)]
pub struct UniformOracle;

impl UniformOracle {
    pub fn new() -> Self {
        Self
    }
}

fn uniform_prediction(board: &Board, value: f32) -> Prediction {
    let space = board.action_space();
    let mut prediction = Prediction::zeros(&space, value);
    let legal = board.legal_actions();
    if legal.is_empty() {
        return prediction;
    }
    let p = 1.0 / legal.len() as f32;
    let policy = match legal.action_type {
        ActionType::Placement => &mut prediction.placement,
        ActionType::Capture => &mut prediction.capture,
    };
    for action in &legal.actions {
        policy[space.index(action)] = p;
    }
    prediction
}

impl Oracle for UniformOracle {
    fn predict(&self, board: &Board, _has_placement: bool) -> Result<Prediction, OracleError> {
        Ok(uniform_prediction(board, 0.0))
    }
}

/// Uniform policy, value averaged over random playouts.
#[derive(Debug)]
pub struct RolloutOracle {
    win_conditions: Vec<MarbleCounts>,
    rollouts: usize,
    max_steps: usize,
    rng: Mutex<fastrand::Rng>,
}

impl RolloutOracle {
    pub fn new(win_conditions: Vec<MarbleCounts>, rollouts: usize, max_steps: usize) -> Self {
        Self::with_seed(win_conditions, rollouts, max_steps, fastrand::u64(..))
    }

    pub fn with_seed(
        win_conditions: Vec<MarbleCounts>,
        rollouts: usize,
        max_steps: usize,
        seed: u64,
    ) -> Self {
        Self {
            win_conditions,
            rollouts: rollouts.max(1),
            max_steps,
            rng: Mutex::new(fastrand::Rng::with_seed(seed)),
        }
    }
}

impl Oracle for RolloutOracle {
    fn predict(&self, board: &Board, _has_placement: bool) -> Result<Prediction, OracleError> {
        let mut rng = self
            .rng
            .lock()
            .map_err(|_| OracleError::Prediction("rollout rng lock poisoned".to_string()))?;
        let mut total = 0.0;
        for _ in 0..self.rollouts {
            total += playout(board, &self.win_conditions, self.max_steps, &mut rng)
                .map_err(|e| OracleError::Prediction(e.to_string()))?;
        }
        Ok(uniform_prediction(board, total / self.rollouts as f32))
    }
}
