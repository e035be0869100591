//! Zertz-Rust: a Zèrtz rules engine with an oracle-guided MCTS planner.
//!
//! Zèrtz is played on a shrinking hexagonal board of rings. Players place
//! marbles from a shared supply, remove edge rings, and capture by jumping.
//! Captures are compulsory and may chain, and isolated fully-occupied groups
//! of rings are captured whole.
//!
//! ## Modules
//!
//! - [`constants`] - Board sizes, directions, default supply and search parameters
//! - [`action`] - Marbles, players, actions and the flat action space
//! - [`board`] - Board state and the rules of the game
//! - [`notation`] - `PUT`/`CAP` action strings and coordinates
//! - [`symmetry`] - Mirror and rotation transforms for boards and policies
//! - [`game`] - Game facade with configuration and invariant checks
//! - [`oracle`] - Policy/value oracle interface and simple implementations
//! - [`playout`] - Random game simulation for value estimates
//! - [`mcts`] - PUCT tree search with tree reuse
//! - [`selfplay`] - Self-play episodes producing training examples
//! - [`arena`] - Matches between two search agents
//! - [`console`] - Text protocol for playing against the engine
//!
//! ## Example
//!
//! ```
//! use zertz_rust::game::{GameConfig, ZertzGame};
//! use zertz_rust::mcts::{Mcts, MctsConfig};
//! use zertz_rust::oracle::UniformOracle;
//!
//! // Create a new game on the 37-ring board
//! let mut game = ZertzGame::new(GameConfig::default()).unwrap();
//!
//! // Play an action
//! game.play("PUT b D4 A4").unwrap();
//!
//! // Run MCTS to find the best response
//! let mut mcts = Mcts::new(UniformOracle::new(), MctsConfig::for_testing());
//! let dist = mcts.search(&game).unwrap();
//! let best = dist.best_action().unwrap();
//! println!("Best action: {}", game.action_to_string(&best).unwrap());
//! ```

pub mod action;
pub mod arena;
pub mod board;
pub mod console;
pub mod constants;
pub mod error;
pub mod game;
pub mod mcts;
pub mod notation;
pub mod oracle;
pub mod playout;
pub mod selfplay;
pub mod symmetry;
