//! Marbles, players, actions, and the flat action space the oracle sees.
//!
//! Placements live in a `[3][W²][W²+1]` tensor (colour, target, removed ring,
//! with the last removal slot meaning "no ring removed"). Capture steps live
//! in a `[6][W][W]` tensor (direction, source row, source column).

use std::fmt;
use std::ops::{Index, IndexMut};
use std::str::FromStr;

use crate::constants::{NUM_COLORS, NUM_DIRECTIONS};
use crate::error::GameError;

/// A board cell, as a flat index `y * W + x`.
pub type Cell = usize;

/// Marble colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Marble {
    White,
    Gray,
    Black,
}

impl Marble {
    pub const ALL: [Marble; NUM_COLORS] = [Marble::White, Marble::Gray, Marble::Black];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Marble> {
        Self::ALL.get(index).copied()
    }

    /// Notation letter: `w`, `g` or `b`.
    pub fn letter(self) -> char {
        match self {
            Marble::White => 'w',
            Marble::Gray => 'g',
            Marble::Black => 'b',
        }
    }

    pub fn from_letter(c: char) -> Option<Marble> {
        match c.to_ascii_lowercase() {
            'w' => Some(Marble::White),
            'g' => Some(Marble::Gray),
            'b' => Some(Marble::Black),
            _ => None,
        }
    }
}

impl fmt::Display for Marble {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// One of the two players. `First` moves first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Player {
    First,
    Second,
}

impl Player {
    #[inline]
    pub fn opponent(self) -> Player {
        match self {
            Player::First => Player::Second,
            Player::Second => Player::First,
        }
    }

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// `+1` for the first player, `-1` for the second.
    #[inline]
    pub fn sign(self) -> i8 {
        match self {
            Player::First => 1,
            Player::Second => -1,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::First => write!(f, "player 1"),
            Player::Second => write!(f, "player 2"),
        }
    }
}

/// Per-colour marble counts, used for the supply, the stashes, and win
/// conditions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct MarbleCounts(pub [u32; NUM_COLORS]);

impl MarbleCounts {
    pub const fn new(white: u32, gray: u32, black: u32) -> Self {
        Self([white, gray, black])
    }

    pub fn total(&self) -> u32 {
        self.0.iter().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    /// True when every colour count is at least the one in `other`.
    pub fn covers(&self, other: &MarbleCounts) -> bool {
        self.0.iter().zip(other.0.iter()).all(|(a, b)| a >= b)
    }

    /// Colours with a nonzero count, in colour order.
    pub fn available(&self) -> impl Iterator<Item = Marble> + '_ {
        Marble::ALL.into_iter().filter(|m| self[*m] > 0)
    }
}

impl Index<Marble> for MarbleCounts {
    type Output = u32;

    fn index(&self, marble: Marble) -> &u32 {
        &self.0[marble.index()]
    }
}

impl IndexMut<Marble> for MarbleCounts {
    fn index_mut(&mut self, marble: Marble) -> &mut u32 {
        &mut self.0[marble.index()]
    }
}

impl fmt::Display for MarbleCounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [w, g, b] = self.0;
        write!(f, "w:{w} g:{g} b:{b}")
    }
}

/// Parses `w3g3b3`, `w:3,g:3,b:3`, `b6` and similar. Colours that are not
/// mentioned count as zero.
impl FromStr for MarbleCounts {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut counts = MarbleCounts::default();
        let mut chars = s.chars().peekable();
        let mut seen_any = false;

        while let Some(c) = chars.next() {
            if c.is_whitespace() || c == ',' || c == ':' {
                continue;
            }
            let marble = Marble::from_letter(c)
                .ok_or_else(|| GameError::Notation(format!("unknown marble colour '{c}' in '{s}'")))?;

            let mut digits = String::new();
            while let Some(&d) = chars.peek() {
                if d == ':' && digits.is_empty() {
                    chars.next();
                } else if d.is_ascii_digit() {
                    digits.push(d);
                    chars.next();
                } else {
                    break;
                }
            }
            let n = digits
                .parse::<u32>()
                .map_err(|_| GameError::Notation(format!("missing count after '{c}' in '{s}'")))?;
            counts[marble] = n;
            seen_any = true;
        }

        if !seen_any {
            return Err(GameError::Notation(format!("no marble counts in '{s}'")));
        }
        Ok(counts)
    }
}

/// The kind of actions available in a state. Never mixed: when a capture is
/// available, only captures are legal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionType {
    Placement,
    Capture,
}

/// A single atomic action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Put a marble of `marble` on `target`, then remove ring `removed`.
    Placement {
        marble: Marble,
        target: Cell,
        removed: Option<Cell>,
    },
    /// Jump the marble on `source` over its neighbour in `direction`.
    Capture { source: Cell, direction: usize },
}

impl Action {
    pub fn action_type(&self) -> ActionType {
        match self {
            Action::Placement { .. } => ActionType::Placement,
            Action::Capture { .. } => ActionType::Capture,
        }
    }
}

/// Flat indexing of placement and capture actions for a given board width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionSpace {
    width: usize,
}

impl ActionSpace {
    pub fn new(width: usize) -> Self {
        Self { width }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    fn cells(&self) -> usize {
        self.width * self.width
    }

    /// Size of the flattened `[3][W²][W²+1]` placement tensor.
    pub fn placement_size(&self) -> usize {
        NUM_COLORS * self.cells() * (self.cells() + 1)
    }

    /// Size of the flattened `[6][W][W]` capture tensor.
    pub fn capture_size(&self) -> usize {
        NUM_DIRECTIONS * self.cells()
    }

    pub fn size(&self, action_type: ActionType) -> usize {
        match action_type {
            ActionType::Placement => self.placement_size(),
            ActionType::Capture => self.capture_size(),
        }
    }

    /// Flat index of an action in the tensor of its own type.
    pub fn index(&self, action: &Action) -> usize {
        let cells = self.cells();
        match *action {
            Action::Placement {
                marble,
                target,
                removed,
            } => {
                let removed = removed.unwrap_or(cells);
                marble.index() * cells * (cells + 1) + target * (cells + 1) + removed
            }
            Action::Capture { source, direction } => direction * cells + source,
        }
    }

    /// Inverse of [`ActionSpace::index`]. Returns `None` for out-of-range
    /// indices.
    pub fn action(&self, action_type: ActionType, index: usize) -> Option<Action> {
        if index >= self.size(action_type) {
            return None;
        }
        let cells = self.cells();
        match action_type {
            ActionType::Placement => {
                let per_color = cells * (cells + 1);
                let marble = Marble::from_index(index / per_color)?;
                let rest = index % per_color;
                let target = rest / (cells + 1);
                let removed = rest % (cells + 1);
                Some(Action::Placement {
                    marble,
                    target,
                    removed: (removed < cells).then_some(removed),
                })
            }
            ActionType::Capture => Some(Action::Capture {
                source: index % cells,
                direction: index / cells,
            }),
        }
    }
}
