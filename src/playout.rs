//! Random playouts (game simulation to the end).
//!
//! A playout picks uniformly random legal actions until the game ends or the
//! step limit is hit. It is the cheapest possible value estimate and backs
//! [`crate::oracle::RolloutOracle`].

use crate::action::MarbleCounts;
use crate::board::Board;
use crate::error::GameError;

/// Play random legal actions from `board` until the game is decided.
///
/// Returns the result from the perspective of the player to move at the
/// start: `1.0` win, `-1.0` loss, `0.0` when `max_steps` runs out.
pub fn playout(
    board: &Board,
    win_conditions: &[MarbleCounts],
    max_steps: usize,
    rng: &mut fastrand::Rng,
) -> Result<f32, GameError> {
    let start = board.current_player();
    let mut board = board.clone();

    for _ in 0..max_steps {
        let ended = board.get_game_ended(win_conditions);
        if ended != 0 {
            return Ok(f32::from(ended * start.sign()));
        }
        let legal = board.legal_actions();
        if legal.is_empty() {
            return Err(GameError::InvariantViolation(
                "undecided position without legal actions".to_string(),
            ));
        }
        let action = legal.actions[rng.usize(..legal.len())];
        board.apply_action(&action)?;
    }

    let ended = board.get_game_ended(win_conditions);
    Ok(f32::from(ended * start.sign()))
}
