//! Hex board state and the rules of the game.
//!
//! The board is a `W×W` grid in axial coordinates. A grid cell holds a ring
//! when `|y - x| <= W/2`, which carves the hexagonal diamond out of the square.
//! Rings are removed as the game shrinks the board; removed rings become
//! [`Site::Absent`] exactly like cells outside the diamond.
//!
//! All rule checks go through [`Board::legal_actions`] and [`Board::is_legal`].
//! Captures are compulsory and exclude placements. A capture chain keeps the
//! same player to move and pins the next step to the landing cell.

use std::collections::VecDeque;
use std::fmt;

use tracing::debug;

use crate::action::{Action, ActionSpace, ActionType, Cell, Marble, MarbleCounts, Player};
use crate::constants::{DIRECTIONS, NUM_COLORS, NUM_DIRECTIONS, width_for_rings};
use crate::error::GameError;

/// Contents of a grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Site {
    /// No ring: removed during play or outside the diamond.
    Absent,
    /// A ring with no marble on it.
    Empty,
    /// A ring holding a marble.
    Marble(Marble),
}

impl Site {
    #[inline]
    pub fn is_ring(self) -> bool {
        self != Site::Absent
    }

    #[inline]
    pub fn marble(self) -> Option<Marble> {
        match self {
            Site::Marble(m) => Some(m),
            _ => None,
        }
    }
}

/// The legal action set of a state. All actions share one type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegalActions {
    pub action_type: ActionType,
    pub actions: Vec<Action>,
}

impl LegalActions {
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    pub fn contains(&self, action: &Action) -> bool {
        self.actions.contains(action)
    }
}

/// What applying an action did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionOutcome {
    /// Marbles credited to the mover by this action.
    pub captured: MarbleCounts,
    /// False while a capture chain continues with the same player.
    pub turn_passed: bool,
}

/// Full game state: rings, marbles, supply, stashes, pending capture chain,
/// the player to move, and a bounded window of previous layouts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    width: usize,
    sites: Vec<Site>,
    /// Previous layouts, most recent first. Holds at most `history_depth - 1`.
    history: VecDeque<Vec<Site>>,
    history_depth: usize,
    supply: MarbleCounts,
    stashes: [MarbleCounts; 2],
    pending: Option<Cell>,
    player: Player,
}

impl Board {
    /// Create the starting position for `total_rings` rings.
    pub fn new(
        total_rings: usize,
        supply: MarbleCounts,
        history_depth: usize,
    ) -> Result<Board, GameError> {
        let width = width_for_rings(total_rings).ok_or_else(|| {
            GameError::Configuration(format!("unsupported ring count {total_rings}"))
        })?;
        if history_depth == 0 {
            return Err(GameError::Configuration(
                "history depth must be at least 1".to_string(),
            ));
        }

        let half = (width / 2) as isize;
        let sites = (0..width * width)
            .map(|cell| {
                let (y, x) = ((cell / width) as isize, (cell % width) as isize);
                if (y - x).abs() <= half {
                    Site::Empty
                } else {
                    Site::Absent
                }
            })
            .collect();

        Ok(Board {
            width,
            sites,
            history: VecDeque::with_capacity(history_depth),
            history_depth,
            supply,
            stashes: [MarbleCounts::default(); 2],
            pending: None,
            player: Player::First,
        })
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn action_space(&self) -> ActionSpace {
        ActionSpace::new(self.width)
    }

    #[inline]
    pub fn site(&self, cell: Cell) -> Site {
        self.sites.get(cell).copied().unwrap_or(Site::Absent)
    }

    pub fn sites(&self) -> &[Site] {
        &self.sites
    }

    pub fn supply(&self) -> MarbleCounts {
        self.supply
    }

    pub fn stash(&self, player: Player) -> MarbleCounts {
        self.stashes[player.index()]
    }

    /// The cell a capture chain must continue from, if any.
    pub fn pending_capture(&self) -> Option<Cell> {
        self.pending
    }

    pub fn current_player(&self) -> Player {
        self.player
    }

    pub fn history_depth(&self) -> usize {
        self.history_depth
    }

    pub fn history(&self) -> impl Iterator<Item = &[Site]> {
        self.history.iter().map(Vec::as_slice)
    }

    pub fn ring_count(&self) -> usize {
        self.sites.iter().filter(|s| s.is_ring()).count()
    }

    /// Marbles currently sitting on rings.
    pub fn marbles_on_board(&self) -> MarbleCounts {
        let mut counts = MarbleCounts::default();
        for m in self.sites.iter().filter_map(|s| s.marble()) {
            counts[m] += 1;
        }
        counts
    }

    #[inline]
    pub fn coords(&self, cell: Cell) -> (usize, usize) {
        (cell / self.width, cell % self.width)
    }

    /// Grid neighbour of `cell` in direction `dir`, or `None` off the grid.
    pub fn neighbor(&self, cell: Cell, dir: usize) -> Option<Cell> {
        let (dy, dx) = DIRECTIONS[dir];
        let (y, x) = self.coords(cell);
        let ny = y.checked_add_signed(dy)?;
        let nx = x.checked_add_signed(dx)?;
        (ny < self.width && nx < self.width).then_some(ny * self.width + nx)
    }

    // -------------------------------------------------------------------------
    // Rule queries
    // -------------------------------------------------------------------------

    /// An empty ring with at least two angularly consecutive missing
    /// neighbours can be slid out of the board.
    pub fn is_removable(&self, cell: Cell) -> bool {
        if self.site(cell) != Site::Empty {
            return false;
        }
        let missing: Vec<bool> = (0..NUM_DIRECTIONS)
            .map(|d| {
                self.neighbor(cell, d)
                    .is_none_or(|n| !self.site(n).is_ring())
            })
            .collect();
        (0..NUM_DIRECTIONS).any(|d| missing[d] && missing[(d + 1) % NUM_DIRECTIONS])
    }

    pub fn removable_rings(&self) -> Vec<Cell> {
        (0..self.sites.len()).filter(|&c| self.is_removable(c)).collect()
    }

    /// Landing cell for a capture from `source` in `direction`, if that
    /// capture is geometrically possible.
    pub fn capture_landing(&self, source: Cell, direction: usize) -> Option<Cell> {
        if direction >= NUM_DIRECTIONS {
            return None;
        }
        self.site(source).marble()?;
        let over = self.neighbor(source, direction)?;
        self.site(over).marble()?;
        let landing = self.neighbor(over, direction)?;
        (self.site(landing) == Site::Empty).then_some(landing)
    }

    /// Capture steps available to the marble on `source`, by direction.
    pub fn captures_from(&self, source: Cell) -> Vec<Action> {
        (0..NUM_DIRECTIONS)
            .filter(|&d| self.capture_landing(source, d).is_some())
            .map(|direction| Action::Capture { source, direction })
            .collect()
    }

    fn capture_actions(&self) -> Vec<Action> {
        if let Some(source) = self.pending {
            return self.captures_from(source);
        }
        let cells = self.sites.len();
        (0..NUM_DIRECTIONS)
            .flat_map(|direction| (0..cells).map(move |source| (source, direction)))
            .filter(|&(source, direction)| self.capture_landing(source, direction).is_some())
            .map(|(source, direction)| Action::Capture { source, direction })
            .collect()
    }

    fn has_capture(&self) -> bool {
        match self.pending {
            Some(source) => !self.captures_from(source).is_empty(),
            None => (0..self.sites.len()).any(|c| !self.captures_from(c).is_empty()),
        }
    }

    /// Colour pool the player to move draws from: the shared supply, or the
    /// player's own stash once the supply is exhausted.
    fn placement_pool(&self) -> MarbleCounts {
        if self.supply.is_empty() {
            self.stashes[self.player.index()]
        } else {
            self.supply
        }
    }

    fn placement_actions(&self) -> Vec<Action> {
        let pool = self.placement_pool();
        let targets: Vec<Cell> = (0..self.sites.len())
            .filter(|&c| self.site(c) == Site::Empty)
            .collect();
        let removable = self.removable_rings();

        let mut actions = Vec::new();
        for marble in pool.available() {
            for &target in &targets {
                for &r in removable.iter().filter(|&&r| r != target) {
                    actions.push(Action::Placement {
                        marble,
                        target,
                        removed: Some(r),
                    });
                }
                if no_removal_allowed(&removable, target) {
                    actions.push(Action::Placement {
                        marble,
                        target,
                        removed: None,
                    });
                }
            }
        }
        actions
    }

    /// Enumerate every legal action. Captures, when any exist, are the only
    /// legal actions.
    pub fn legal_actions(&self) -> LegalActions {
        let captures = self.capture_actions();
        if !captures.is_empty() || self.pending.is_some() {
            return LegalActions {
                action_type: ActionType::Capture,
                actions: captures,
            };
        }
        LegalActions {
            action_type: ActionType::Placement,
            actions: self.placement_actions(),
        }
    }

    /// Rule check for a single action; agrees with [`Board::legal_actions`].
    pub fn is_legal(&self, action: &Action) -> bool {
        match *action {
            Action::Capture { source, direction } => {
                self.pending.is_none_or(|p| p == source)
                    && self.capture_landing(source, direction).is_some()
            }
            Action::Placement {
                marble,
                target,
                removed,
            } => {
                if self.has_capture() || self.placement_pool()[marble] == 0 {
                    return false;
                }
                if self.site(target) != Site::Empty {
                    return false;
                }
                match removed {
                    Some(r) => r != target && self.is_removable(r),
                    None => no_removal_allowed(&self.removable_rings(), target),
                }
            }
        }
    }

    // -------------------------------------------------------------------------
    // State transitions
    // -------------------------------------------------------------------------

    /// Apply a legal action. Illegal actions leave the state untouched and
    /// report the legal set.
    pub fn apply_action(&mut self, action: &Action) -> Result<ActionOutcome, GameError> {
        if !self.is_legal(action) {
            return Err(GameError::RuleViolation {
                action: *action,
                legal: self.legal_actions().actions,
            });
        }
        self.push_history();

        match *action {
            Action::Placement {
                marble,
                target,
                removed,
            } => Ok(self.place(marble, target, removed)),
            Action::Capture { source, direction } => self.capture(source, direction),
        }
    }

    fn push_history(&mut self) {
        if self.history_depth > 1 {
            self.history.push_front(self.sites.clone());
            self.history.truncate(self.history_depth - 1);
        }
    }

    fn place(&mut self, marble: Marble, target: Cell, removed: Option<Cell>) -> ActionOutcome {
        if self.supply.is_empty() {
            self.stashes[self.player.index()][marble] -= 1;
        } else {
            self.supply[marble] -= 1;
        }
        self.sites[target] = Site::Marble(marble);

        let mut captured = MarbleCounts::default();
        if let Some(r) = removed {
            self.sites[r] = Site::Absent;
            captured = self.capture_isolated_regions();
        }

        self.pending = None;
        self.player = self.player.opponent();
        ActionOutcome {
            captured,
            turn_passed: true,
        }
    }

    /// Once the board has split, every region with no vacant ring is taken
    /// off whole and its marbles go to the player who split it.
    fn capture_isolated_regions(&mut self) -> MarbleCounts {
        let mut captured = MarbleCounts::default();
        let regions = self.regions();
        if regions.len() <= 1 {
            return captured;
        }

        let mover = self.player.index();
        for region in regions {
            if region.iter().any(|&c| self.site(c) == Site::Empty) {
                continue;
            }
            for &c in &region {
                if let Some(m) = self.site(c).marble() {
                    self.stashes[mover][m] += 1;
                    captured[m] += 1;
                }
                self.sites[c] = Site::Absent;
            }
            debug!(rings = region.len(), player = %self.player, "isolated region captured");
        }
        captured
    }

    fn capture(&mut self, source: Cell, direction: usize) -> Result<ActionOutcome, GameError> {
        let invariant = || {
            GameError::InvariantViolation(format!(
                "capture from {source} in direction {direction} lost its geometry"
            ))
        };
        let landing = self.capture_landing(source, direction).ok_or_else(invariant)?;
        let over = self.neighbor(source, direction).ok_or_else(invariant)?;
        let mover = self.site(source).marble().ok_or_else(invariant)?;
        let jumped = self.site(over).marble().ok_or_else(invariant)?;

        self.sites[source] = Site::Empty;
        self.sites[over] = Site::Empty;
        self.sites[landing] = Site::Marble(mover);
        self.stashes[self.player.index()][jumped] += 1;

        let mut captured = MarbleCounts::default();
        captured[jumped] = 1;

        let turn_passed = self.captures_from(landing).is_empty();
        if turn_passed {
            self.pending = None;
            self.player = self.player.opponent();
        } else {
            self.pending = Some(landing);
        }
        Ok(ActionOutcome {
            captured,
            turn_passed,
        })
    }

    /// Player to move after `action`, computed on a scratch copy.
    pub fn player_after(&self, action: &Action) -> Result<Player, GameError> {
        match action {
            Action::Placement { .. } if self.is_legal(action) => Ok(self.player.opponent()),
            _ => {
                let mut next = self.clone();
                next.apply_action(action)?;
                Ok(next.player)
            }
        }
    }

    /// Connected components of remaining rings, found with an explicit work
    /// queue.
    pub fn regions(&self) -> Vec<Vec<Cell>> {
        let mut seen = vec![false; self.sites.len()];
        let mut regions = Vec::new();
        let mut queue = VecDeque::new();

        for start in 0..self.sites.len() {
            if seen[start] || !self.site(start).is_ring() {
                continue;
            }
            seen[start] = true;
            queue.push_back(start);
            let mut region = Vec::new();

            while let Some(cell) = queue.pop_front() {
                region.push(cell);
                for d in 0..NUM_DIRECTIONS {
                    if let Some(n) = self.neighbor(cell, d) {
                        if !seen[n] && self.site(n).is_ring() {
                            seen[n] = true;
                            queue.push_back(n);
                        }
                    }
                }
            }
            regions.push(region);
        }
        regions
    }

    // -------------------------------------------------------------------------
    // Termination and consistency
    // -------------------------------------------------------------------------

    /// `+1` if the first player has won, `-1` if the second has, `0` while the
    /// game goes on. Never decided in the middle of a capture chain.
    pub fn get_game_ended(&self, win_conditions: &[MarbleCounts]) -> i8 {
        if self.pending.is_some() {
            return 0;
        }
        for player in [Player::First, Player::Second] {
            let stash = self.stash(player);
            if win_conditions.iter().any(|cond| stash.covers(cond)) {
                return player.sign();
            }
        }
        if !self.sites.contains(&Site::Empty) {
            // The turn already passed, so the last mover is the opponent.
            return self.player.opponent().sign();
        }
        if self.supply.is_empty() && self.stash(self.player).is_empty() && !self.has_capture() {
            return self.player.opponent().sign();
        }
        0
    }

    /// Check marble conservation against the starting supply and the
    /// pending-capture marker.
    pub fn check_invariants(&self, initial: &MarbleCounts) -> Result<(), GameError> {
        let on_board = self.marbles_on_board();
        for m in Marble::ALL {
            let total = self.supply[m]
                + self.stashes[0][m]
                + self.stashes[1][m]
                + on_board[m];
            if total != initial[m] {
                return Err(GameError::InvariantViolation(format!(
                    "{m} marbles: {total} accounted for, {} expected",
                    initial[m]
                )));
            }
        }
        if let Some(p) = self.pending {
            if self.captures_from(p).is_empty() {
                return Err(GameError::InvariantViolation(format!(
                    "pending capture at {p} has no capture available"
                )));
            }
        }
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Encoding
    // -------------------------------------------------------------------------

    /// Number of `W×W` planes produced by [`Board::encode`].
    pub fn num_planes(&self) -> usize {
        4 * self.history_depth + 1 + 3 * NUM_COLORS + 1
    }

    /// Observation tensor in plane-major order.
    ///
    /// Per layout (current first, then history, zero-filled when short): ring,
    /// white, gray and black planes. Then the pending-capture plane, nine
    /// constant planes with supply and stash counts, and a player plane that
    /// is `1.0` when the second player is to move.
    pub fn encode(&self) -> Vec<f32> {
        let area = self.width * self.width;
        let mut planes = vec![0.0f32; self.num_planes() * area];

        let layouts = std::iter::once(self.sites.as_slice()).chain(self.history());
        for (t, layout) in layouts.enumerate().take(self.history_depth) {
            let base = 4 * t * area;
            for (cell, site) in layout.iter().enumerate() {
                if site.is_ring() {
                    planes[base + cell] = 1.0;
                }
                if let Some(m) = site.marble() {
                    planes[base + (1 + m.index()) * area + cell] = 1.0;
                }
            }
        }

        let mut plane = 4 * self.history_depth;
        if let Some(p) = self.pending {
            planes[plane * area + p] = 1.0;
        }
        plane += 1;

        let counts = [self.supply, self.stashes[0], self.stashes[1]];
        for c in counts.iter().flat_map(|c| c.0) {
            planes[plane * area..(plane + 1) * area].fill(c as f32);
            plane += 1;
        }

        if self.player == Player::Second {
            planes[plane * area..(plane + 1) * area].fill(1.0);
        }
        planes
    }

    /// Copy of this board with every cell index relabelled by `map`,
    /// including history and the pending marker. `map` must be a bijection
    /// that preserves adjacency.
    pub(crate) fn relabelled(&self, map: impl Fn(Cell) -> Cell) -> Board {
        let permute = |layout: &[Site]| {
            let mut out = vec![Site::Absent; layout.len()];
            for (cell, &site) in layout.iter().enumerate() {
                out[map(cell)] = site;
            }
            out
        };
        Board {
            sites: permute(self.sites.as_slice()),
            history: self.history.iter().map(|l| permute(l.as_slice())).collect(),
            pending: self.pending.map(&map),
            ..self.clone()
        }
    }
}

/// "No removal" is allowed only when no ring could be removed, or the sole
/// removable ring is the one being filled.
fn no_removal_allowed(removable: &[Cell], target: Cell) -> bool {
    removable.is_empty() || (removable.len() == 1 && removable[0] == target)
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let half = self.width / 2;
        for rank in (1..=self.width).rev() {
            write!(f, "{rank:>2} ")?;
            for x in 0..self.width {
                let y = self.width.checked_sub(rank + half.saturating_sub(x));
                let site = match y {
                    Some(y) if y.abs_diff(x) <= half => self.site(y * self.width + x),
                    _ => Site::Absent,
                };
                let c = match site {
                    Site::Absent => ' ',
                    Site::Empty => '.',
                    Site::Marble(m) => m.letter(),
                };
                write!(f, "{c} ")?;
            }
            writeln!(f)?;
        }
        write!(f, "   ")?;
        for x in 0..self.width {
            write!(f, "{} ", (b'A' + x as u8) as char)?;
        }
        writeln!(f)?;
        writeln!(f, "supply  {}", self.supply)?;
        writeln!(f, "stash 1 {}", self.stashes[0])?;
        writeln!(f, "stash 2 {}", self.stashes[1])?;
        write!(f, "to move: {}", self.player)?;
        if let Some(p) = self.pending {
            write!(f, " (capture pending at {p})")?;
        }
        Ok(())
    }
}
