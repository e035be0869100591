//! Board symmetries used to augment training data.
//!
//! Only three of the twelve isometries of the hexagon are produced: the
//! mirror across the main diagonal, the 180° rotation, and their composition.
//! The rotations by 60° do not map the axial grid onto itself without a
//! coordinate shear and are left out.

use crate::action::{Action, ActionSpace, ActionType, Cell};
use crate::board::Board;

/// A board isometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Symmetry {
    /// Transpose the grid: `(y, x) -> (x, y)`.
    Mirror,
    /// Point reflection through the centre ring.
    Rotate180,
    /// Mirror, then rotate.
    MirrorRotate,
}

impl Symmetry {
    pub const ALL: [Symmetry; 3] = [Symmetry::Mirror, Symmetry::Rotate180, Symmetry::MirrorRotate];

    /// Stable numeric id (0, 1, 2).
    pub fn id(self) -> u8 {
        self as u8
    }

    pub fn cell(self, width: usize, cell: Cell) -> Cell {
        let (y, x) = (cell / width, cell % width);
        let (y, x) = match self {
            Symmetry::Mirror => (x, y),
            Symmetry::Rotate180 => (width - 1 - y, width - 1 - x),
            Symmetry::MirrorRotate => (width - 1 - x, width - 1 - y),
        };
        y * width + x
    }

    pub fn direction(self, direction: usize) -> usize {
        const MIRROR: [usize; 6] = [4, 3, 2, 1, 0, 5];
        match self {
            Symmetry::Mirror => MIRROR[direction],
            Symmetry::Rotate180 => (direction + 3) % 6,
            Symmetry::MirrorRotate => (MIRROR[direction] + 3) % 6,
        }
    }

    pub fn action(self, width: usize, action: &Action) -> Action {
        match *action {
            Action::Placement {
                marble,
                target,
                removed,
            } => Action::Placement {
                marble,
                target: self.cell(width, target),
                removed: removed.map(|r| self.cell(width, r)),
            },
            Action::Capture { source, direction } => Action::Capture {
                source: self.cell(width, source),
                direction: self.direction(direction),
            },
        }
    }

    /// Permute a dense policy vector of the given action type.
    pub fn policy(self, space: &ActionSpace, action_type: ActionType, policy: &[f32]) -> Vec<f32> {
        let mut out = vec![0.0; policy.len()];
        for (index, &p) in policy.iter().enumerate() {
            if p == 0.0 {
                continue;
            }
            if let Some(action) = space.action(action_type, index) {
                out[space.index(&self.action(space.width(), &action))] = p;
            }
        }
        out
    }

    pub fn board(self, board: &Board) -> Board {
        let width = board.width();
        board.relabelled(|cell| self.cell(width, cell))
    }
}

/// Every supported symmetric copy of `board`, tagged with its transform.
pub fn symmetries(board: &Board) -> Vec<(Symmetry, Board)> {
    Symmetry::ALL.iter().map(|&s| (s, s.board(board))).collect()
}
