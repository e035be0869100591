//! Constants for board geometry, default game setup, and search parameters.
//!
//! Board sizes are selected at runtime from the total ring count, so nothing
//! here is feature-gated. Search defaults are picked so that a plain
//! `zertz-rust demo` finishes in well under a second with the uniform oracle.

// =============================================================================
// Board Geometry
// =============================================================================

/// Supported ring counts paired with the side length of the square grid
/// that holds them. Ring counts are centered hexagonal numbers.
pub const HEX_NUMBERS: [(usize, usize); 7] = [
    (1, 1),
    (7, 3),
    (19, 5),
    (37, 7),
    (61, 9),
    (91, 11),
    (127, 13),
];

/// Neighbour offsets as `(dy, dx)`, in cyclic angular order.
///
/// Capture directions are indices into this table, and the removability test
/// depends on the ordering being cyclic.
pub const DIRECTIONS: [(isize, isize); 6] = [(1, 0), (0, -1), (-1, -1), (-1, 0), (0, 1), (1, 1)];

/// Number of capture directions.
pub const NUM_DIRECTIONS: usize = DIRECTIONS.len();

/// Number of marble colours (white, gray, black).
pub const NUM_COLORS: usize = 3;

/// Ring count used when nothing else is requested (tournament board).
pub const DEFAULT_RINGS: usize = 37;

// =============================================================================
// Marbles and Win Conditions
// =============================================================================

/// Starting supply of white, gray and black marbles.
pub const DEFAULT_SUPPLY: [u32; NUM_COLORS] = [6, 8, 10];

/// Standard win conditions: three of each colour, or four white, five gray,
/// six black.
pub const DEFAULT_WIN_CONDITIONS: [[u32; NUM_COLORS]; 4] =
    [[3, 3, 3], [4, 0, 0], [0, 5, 0], [0, 0, 6]];

/// Number of board layouts fed to the oracle (current one included).
pub const DEFAULT_HISTORY_DEPTH: usize = 1;

// =============================================================================
// MCTS Parameters
// =============================================================================

/// PUCT exploration constant.
pub const C_PUCT: f32 = 1.0;

/// Default number of simulations per decision.
pub const N_SIMS: u32 = 25;

/// Probability mass below which a masked policy is replaced by a uniform one.
pub const MASK_EPS: f32 = 1e-8;

// =============================================================================
// Self-Play Parameters
// =============================================================================

/// Plies played with temperature 1 before switching to greedy selection.
pub const TEMP_THRESHOLD: usize = 6;

/// Step cap after which an episode is scored as a draw.
pub const MAX_EPISODE_STEPS: usize = 200;

/// Resolve the grid side length for a ring count, if supported.
pub fn width_for_rings(total_rings: usize) -> Option<usize> {
    HEX_NUMBERS
        .iter()
        .find(|&&(rings, _)| rings == total_rings)
        .map(|&(_, width)| width)
}
