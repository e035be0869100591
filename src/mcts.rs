//! Monte Carlo Tree Search guided by a policy/value oracle (PUCT).
//!
//! Each simulation descends from the root by maximizing
//! `q + c_puct * p * sqrt(N) / (1 + n)`, expands the leaf with the oracle's
//! masked and renormalized policy, and backs the leaf value up the path.
//!
//! Player turns do not strictly alternate: a capture chain keeps the same
//! player to move for several plies. Every node is therefore tagged with the
//! player to move there, and values only flip sign across edges where that
//! player changes.
//!
//! The tree is a plain single-owner tree. Descent records the path as child
//! indices, and backup walks the same path again from the root.

use tracing::{debug, trace};

use crate::action::{Action, ActionType, Player};
use crate::constants::{C_PUCT, MASK_EPS, N_SIMS};
use crate::error::{GameError, SearchError};
use crate::game::ZertzGame;
use crate::oracle::Oracle;

/// Search parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct MctsConfig {
    /// Exploration constant in the PUCT formula.
    pub c_puct: f32,
    /// Simulations per decision when calling [`Mcts::search`].
    pub num_simulations: u32,
    /// Temperature applied to visit counts: 1.0 samples in proportion to
    /// visits, 0.0 picks the most visited action.
    pub temperature: f32,
}

impl Default for MctsConfig {
    fn default() -> Self {
        Self {
            c_puct: C_PUCT,
            num_simulations: N_SIMS,
            temperature: 1.0,
        }
    }
}

impl MctsConfig {
    /// Greedy play with the default simulation budget.
    pub fn for_evaluation() -> Self {
        Self {
            temperature: 0.0,
            ..Self::default()
        }
    }

    /// A fast config for testing.
    pub fn for_testing() -> Self {
        Self {
            c_puct: C_PUCT,
            num_simulations: 8,
            temperature: 0.0,
        }
    }

    pub fn with_simulations(mut self, n: u32) -> Self {
        self.num_simulations = n;
        self
    }

    pub fn with_c_puct(mut self, c: f32) -> Self {
        self.c_puct = c;
        self
    }

    pub fn with_temperature(mut self, t: f32) -> Self {
        self.temperature = t;
        self
    }
}

/// A node in the search tree.
#[derive(Debug, Clone)]
pub struct TreeNode {
    /// Visit count
    pub n: u32,
    /// Mean backed-up value, from the perspective of the player who chose the
    /// edge into this node (the root's own player for the root).
    pub q: f32,
    /// Prior probability from the parent's oracle call
    pub p: f32,
    /// Player to move at this node
    pub player: Player,
    /// Type of the actions leading to the children, once expanded
    pub action_type: Option<ActionType>,
    pub children: Vec<(Action, TreeNode)>,
}

impl TreeNode {
    pub fn new(p: f32, player: Player) -> Self {
        Self {
            n: 0,
            q: 0.0,
            p,
            player,
            action_type: None,
            children: Vec::new(),
        }
    }

    pub fn is_expanded(&self) -> bool {
        self.action_type.is_some()
    }

    /// Child maximizing the PUCT score. The first child wins ties.
    fn select_child(&self, c_puct: f32) -> usize {
        let sqrt_n = (self.n as f32).sqrt();
        let mut best = 0;
        let mut best_score = f32::NEG_INFINITY;
        for (i, (_, child)) in self.children.iter().enumerate() {
            let score = child.q + c_puct * child.p * sqrt_n / (1.0 + child.n as f32);
            if score > best_score {
                best_score = score;
                best = i;
            }
        }
        best
    }

    fn record(&mut self, value: f32) {
        self.n += 1;
        self.q += (value - self.q) / self.n as f32;
    }
}

/// Search result at the root: per-action visits and the derived policy.
#[derive(Debug, Clone)]
pub struct ActionDistribution {
    pub action_type: ActionType,
    pub actions: Vec<Action>,
    /// Visits accrued during this call, parallel to `actions`.
    pub visits: Vec<u32>,
    /// Temperature-adjusted probabilities, parallel to `actions`.
    pub probs: Vec<f32>,
    /// Dense placement policy (all zero for capture states).
    pub placement: Vec<f32>,
    /// Dense capture policy (all zero for placement states).
    pub capture: Vec<f32>,
}

impl ActionDistribution {
    /// Most visited action, first one on ties.
    pub fn best_action(&self) -> Option<Action> {
        let mut best: Option<(usize, u32)> = None;
        for (i, &v) in self.visits.iter().enumerate() {
            if best.is_none_or(|(_, bv)| v > bv) {
                best = Some((i, v));
            }
        }
        best.map(|(i, _)| self.actions[i])
    }

    /// Draw an action according to `probs`.
    pub fn sample(&self, rng: &mut fastrand::Rng) -> Option<Action> {
        let r = rng.f32();
        let mut cumulative = 0.0;
        for (action, &p) in self.actions.iter().zip(&self.probs) {
            cumulative += p;
            if r < cumulative {
                return Some(*action);
            }
        }
        // Rounding left a sliver above the last bucket.
        self.actions
            .iter()
            .zip(&self.probs)
            .rev()
            .find(|&(_, &p)| p > 0.0)
            .map(|(a, _)| *a)
    }

    pub fn total_visits(&self) -> u32 {
        self.visits.iter().sum()
    }
}

/// Expand `node` for `state`: query the oracle, keep only legal actions,
/// renormalize, and add one child per action with nonzero probability.
///
/// Returns the oracle's value for the player to move in `state`.
fn expand<O: Oracle>(node: &mut TreeNode, state: &ZertzGame, oracle: &O) -> Result<f32, SearchError> {
    let legal = state.legal_actions();
    if legal.is_empty() {
        return Err(GameError::InvariantViolation(
            "expanding an undecided position without legal actions".to_string(),
        )
        .into());
    }
    let has_placement = legal.action_type == ActionType::Placement;
    let space = state.action_space();
    let prediction = oracle.predict(state.board(), has_placement)?;
    prediction.check_shape(&space)?;

    let policy = prediction.policy(legal.action_type);
    let mut probs: Vec<f32> = legal
        .actions
        .iter()
        .map(|a| policy[space.index(a)].max(0.0))
        .collect();
    let total: f32 = probs.iter().sum();
    if !total.is_finite() || total <= MASK_EPS {
        debug!(
            total,
            legal = legal.len(),
            "oracle put no mass on legal actions, using uniform priors"
        );
        probs.fill(1.0 / legal.len() as f32);
    } else {
        probs.iter_mut().for_each(|p| *p /= total);
    }

    let board = state.board();
    node.children.clear();
    for (action, p) in legal.actions.into_iter().zip(probs) {
        if p > 0.0 {
            let player = board.player_after(&action)?;
            node.children.push((action, TreeNode::new(p, player)));
        }
    }
    node.action_type = Some(legal.action_type);
    Ok(prediction.value)
}

/// Descend to a leaf, applying the chosen actions to `state`.
fn descend(root: &TreeNode, state: &mut ZertzGame, c_puct: f32) -> Result<Vec<usize>, GameError> {
    let mut path = Vec::new();
    let mut node = root;
    while !node.children.is_empty() {
        let idx = node.select_child(c_puct);
        let (action, child) = &node.children[idx];
        state.apply_action(action)?;
        path.push(idx);
        node = child;
    }
    Ok(path)
}

fn node_at_mut<'a>(root: &'a mut TreeNode, path: &[usize]) -> &'a mut TreeNode {
    path.iter().fold(root, |node, &idx| &mut node.children[idx].1)
}

/// Back up `value`, given from `leaf_player`'s perspective, along `path`.
fn backup(root: &mut TreeNode, path: &[usize], value: f32, leaf_player: Player) {
    let signed = |perspective: Player| {
        if perspective == leaf_player {
            value
        } else {
            -value
        }
    };

    root.record(signed(root.player));
    let mut node = root;
    for &idx in path {
        let perspective = node.player;
        node = &mut node.children[idx].1;
        node.record(signed(perspective));
    }
}

/// PUCT search engine. Owns its oracle and keeps the tree between decisions
/// when the game follows the moves fed to [`Mcts::move_root`].
pub struct Mcts<O: Oracle> {
    oracle: O,
    config: MctsConfig,
    root: TreeNode,
    /// Game state at the root, used to decide whether the tree can be reused.
    root_state: Option<ZertzGame>,
}

impl<O: Oracle> Mcts<O> {
    pub fn new(oracle: O, config: MctsConfig) -> Self {
        Self {
            oracle,
            config,
            root: TreeNode::new(1.0, Player::First),
            root_state: None,
        }
    }

    pub fn config(&self) -> &MctsConfig {
        &self.config
    }

    pub fn oracle(&self) -> &O {
        &self.oracle
    }

    pub fn oracle_mut(&mut self) -> &mut O {
        &mut self.oracle
    }

    pub fn root(&self) -> &TreeNode {
        &self.root
    }

    /// Drop the whole tree.
    pub fn reset(&mut self) {
        self.root = TreeNode::new(1.0, Player::First);
        self.root_state = None;
    }

    fn sync_root(&mut self, game: &ZertzGame) {
        let reusable = self
            .root_state
            .as_ref()
            .is_some_and(|s| s.board() == game.board() && s.config() == game.config());
        if reusable {
            debug!(visits = self.root.n, "reusing search tree");
            return;
        }
        self.root = TreeNode::new(1.0, game.current_player());
        self.root_state = Some(game.clone());
    }

    /// Run one selection/expansion/backup pass.
    fn simulate(&mut self, game: &ZertzGame) -> Result<(), SearchError> {
        let mut state = game.clone();
        let path = descend(&self.root, &mut state, self.config.c_puct)?;
        let leaf_player = state.current_player();
        let ended = state.get_game_ended();

        let value = if ended != 0 {
            f32::from(ended * leaf_player.sign())
        } else {
            expand(node_at_mut(&mut self.root, &path), &state, &self.oracle)?
        };

        backup(&mut self.root, &path, value, leaf_player);
        trace!(depth = path.len(), value, "MCTS simulation complete");
        Ok(())
    }

    /// Search with the configured budget and temperature.
    pub fn search(&mut self, game: &ZertzGame) -> Result<ActionDistribution, SearchError> {
        let (n, t) = (self.config.num_simulations, self.config.temperature);
        self.get_action_distribution(game, n, t)
    }

    /// Run `num_simulations` simulations from `game` and return the visit
    /// distribution over the root's actions.
    ///
    /// Only visits made during this call are counted, so `visits` sums to
    /// `num_simulations` even when the tree was reused.
    pub fn get_action_distribution(
        &mut self,
        game: &ZertzGame,
        num_simulations: u32,
        temperature: f32,
    ) -> Result<ActionDistribution, SearchError> {
        if game.get_game_ended() != 0 {
            return Err(SearchError::GameOver);
        }
        self.sync_root(game);
        if !self.root.is_expanded() {
            // Count the expansion as a root visit so the first selection
            // already follows the priors.
            let value = expand(&mut self.root, game, &self.oracle)?;
            self.root.record(value);
        }
        if self.root.children.is_empty() {
            return Err(GameError::InvariantViolation("root has no children".to_string()).into());
        }

        let before: Vec<u32> = self.root.children.iter().map(|(_, c)| c.n).collect();
        for _ in 0..num_simulations {
            self.simulate(game)?;
        }

        let actions: Vec<Action> = self.root.children.iter().map(|(a, _)| *a).collect();
        let visits: Vec<u32> = self
            .root
            .children
            .iter()
            .zip(&before)
            .map(|((_, c), b)| c.n - b)
            .collect();
        let priors: Vec<f32> = self.root.children.iter().map(|(_, c)| c.p).collect();
        let probs = visit_probabilities(&visits, &priors, temperature);

        let space = game.action_space();
        let action_type = self.root.action_type.unwrap_or(ActionType::Placement);
        let mut placement = vec![0.0; space.placement_size()];
        let mut capture = vec![0.0; space.capture_size()];
        let dense = match action_type {
            ActionType::Placement => &mut placement,
            ActionType::Capture => &mut capture,
        };
        for (action, &p) in actions.iter().zip(&probs) {
            dense[space.index(action)] = p;
        }

        debug!(
            simulations = num_simulations,
            children = actions.len(),
            root_q = self.root.q,
            "search finished"
        );
        Ok(ActionDistribution {
            action_type,
            actions,
            visits,
            probs,
            placement,
            capture,
        })
    }

    /// Advance the root past `action`, keeping its subtree when it exists.
    pub fn move_root(&mut self, action: &Action) {
        let Some(mut state) = self.root_state.take() else {
            self.reset();
            return;
        };
        if state.apply_action(action).is_err() {
            self.reset();
            return;
        }

        match self.root.children.iter().position(|(a, _)| a == action) {
            Some(idx) => {
                let (_, child) = self.root.children.swap_remove(idx);
                self.root = child;
            }
            None => self.root = TreeNode::new(1.0, state.current_player()),
        }
        self.root_state = Some(state);
    }

    /// One line per root child: action, visits, value and prior.
    pub fn root_summary(&self) -> String {
        let mut lines = Vec::with_capacity(self.root.children.len());
        for (action, child) in &self.root.children {
            let name = self
                .root_state
                .as_ref()
                .and_then(|s| s.action_to_string(action).ok())
                .unwrap_or_else(|| format!("{action:?}"));
            lines.push(format!(
                "{name} n={} q={:.3} p={:.3}",
                child.n, child.q, child.p
            ));
        }
        lines.join("\n")
    }
}

/// Turn visit counts into a distribution. Temperature 0 is one-hot on the
/// first most-visited action; with no visits at all the priors are used.
fn visit_probabilities(visits: &[u32], priors: &[f32], temperature: f32) -> Vec<f32> {
    let mut probs = vec![0.0; visits.len()];
    if visits.is_empty() {
        return probs;
    }

    if temperature <= 0.0 {
        let mut best = 0;
        for (i, &v) in visits.iter().enumerate() {
            if v > visits[best] {
                best = i;
            }
        }
        probs[best] = 1.0;
        return probs;
    }

    let max = visits.iter().copied().max().unwrap_or(0);
    if max == 0 {
        let total: f32 = priors.iter().sum();
        if total > 0.0 {
            return priors.iter().map(|p| p / total).collect();
        }
        return vec![1.0 / visits.len() as f32; visits.len()];
    }

    let inv_t = 1.0 / temperature;
    for (p, &v) in probs.iter_mut().zip(visits) {
        *p = (v as f32 / max as f32).powf(inv_t);
    }
    let total: f32 = probs.iter().sum();
    probs.iter_mut().for_each(|p| *p /= total);
    probs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::{Marble, MarbleCounts};
    use crate::board::Board;
    use crate::error::OracleError;
    use crate::game::GameConfig;
    use crate::oracle::{Prediction, UniformOracle};

    fn game19() -> ZertzGame {
        let config = GameConfig::default()
            .with_rings(19)
            .with_supply(MarbleCounts::new(10, 10, 10));
        ZertzGame::new(config).unwrap()
    }

    /// Puts all mass on illegal actions.
    struct ZeroOracle;

    impl Oracle for ZeroOracle {
        fn predict(&self, board: &Board, _has_placement: bool) -> Result<Prediction, OracleError> {
            Ok(Prediction::zeros(&board.action_space(), 0.5))
        }
    }

    /// Uniform policy with extra weight on one action.
    struct FavouriteOracle(Action);

    impl Oracle for FavouriteOracle {
        fn predict(&self, board: &Board, _has_placement: bool) -> Result<Prediction, OracleError> {
            let space = board.action_space();
            let mut prediction = Prediction::zeros(&space, 0.0);
            prediction.placement.fill(1.0);
            prediction.capture.fill(1.0);
            prediction.placement[space.index(&self.0)] = 50.0;
            Ok(prediction)
        }
    }

    #[test]
    fn test_default_config() {
        let config = MctsConfig::default();
        assert_eq!(config.num_simulations, 25);
        assert!((config.c_puct - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_builder_pattern() {
        let config = MctsConfig::default()
            .with_simulations(100)
            .with_c_puct(2.0)
            .with_temperature(0.5);
        assert_eq!(config.num_simulations, 100);
        assert!((config.c_puct - 2.0).abs() < 1e-6);
        assert!((config.temperature - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_select_child_tie_goes_to_first() {
        let mut node = TreeNode::new(1.0, Player::First);
        for source in 0..3 {
            node.children.push((
                Action::Capture {
                    source,
                    direction: 0,
                },
                TreeNode::new(0.25, Player::Second),
            ));
        }
        node.n = 4;
        assert_eq!(node.select_child(1.0), 0);
        node.children[2].1.p = 0.5;
        assert_eq!(node.select_child(1.0), 2);
    }

    #[test]
    fn test_backup_flips_only_on_player_change() {
        let dummy = Action::Capture {
            source: 0,
            direction: 0,
        };
        let mut root = TreeNode::new(1.0, Player::First);
        let mut chain = TreeNode::new(1.0, Player::Second);
        chain.children.push((dummy, TreeNode::new(1.0, Player::Second)));
        root.children.push((dummy, chain));

        backup(&mut root, &[0, 0], 1.0, Player::Second);

        let chain = &root.children[0].1;
        let leaf = &chain.children[0].1;
        assert_eq!((root.n, chain.n, leaf.n), (1, 1, 1));
        assert_eq!(root.q, -1.0);
        assert_eq!(chain.q, -1.0);
        assert_eq!(leaf.q, 1.0);
    }

    #[test]
    fn test_running_mean() {
        let mut node = TreeNode::new(1.0, Player::First);
        node.record(1.0);
        node.record(0.0);
        node.record(-1.0);
        node.record(1.0);
        assert_eq!(node.n, 4);
        assert!((node.q - 0.25).abs() < 1e-6);
    }

    #[test]
    fn test_visit_counts_sum_to_simulations() {
        let game = game19();
        let mut mcts = Mcts::new(UniformOracle::new(), MctsConfig::for_testing());
        for temperature in [0.0, 0.5, 1.0] {
            mcts.reset();
            let dist = mcts.get_action_distribution(&game, 30, temperature).unwrap();
            assert_eq!(dist.total_visits(), 30);
            let sum: f32 = dist.probs.iter().sum();
            assert!((sum - 1.0).abs() < 1e-4);
            assert_eq!(dist.actions.len(), 648);
        }
    }

    #[test]
    fn test_reused_tree_counts_only_new_visits() {
        let game = game19();
        let mut mcts = Mcts::new(UniformOracle::new(), MctsConfig::for_testing());
        mcts.get_action_distribution(&game, 20, 1.0).unwrap();
        let dist = mcts.get_action_distribution(&game, 7, 1.0).unwrap();
        assert_eq!(dist.total_visits(), 7);
        assert_eq!(mcts.root().n, 28);
    }

    #[test]
    fn test_first_simulation_follows_priors() {
        let game = game19();
        let favourite = Action::Placement {
            marble: Marble::Black,
            target: 12,
            removed: Some(0),
        };
        let mut mcts = Mcts::new(FavouriteOracle(favourite), MctsConfig::for_testing());
        let dist = mcts.get_action_distribution(&game, 1, 1.0).unwrap();
        assert_eq!(mcts.root().n, 2);
        let visited: Vec<Action> = dist
            .actions
            .iter()
            .zip(&dist.visits)
            .filter(|&(_, &v)| v > 0)
            .map(|(a, _)| *a)
            .collect();
        assert_eq!(visited, vec![favourite]);
    }

    #[test]
    fn test_zero_temperature_is_one_hot() {
        let game = game19();
        let mut mcts = Mcts::new(UniformOracle::new(), MctsConfig::for_testing());
        let dist = mcts.get_action_distribution(&game, 10, 0.0).unwrap();
        assert_eq!(dist.probs.iter().filter(|&&p| p == 1.0).count(), 1);
        let best = dist.best_action().unwrap();
        let idx = game.action_space().index(&best);
        assert_eq!(dist.placement[idx], 1.0);
        assert!(dist.capture.iter().all(|&p| p == 0.0));
    }

    #[test]
    fn test_degenerate_policy_falls_back_to_uniform() {
        let game = game19();
        let mut mcts = Mcts::new(ZeroOracle, MctsConfig::for_testing());
        let dist = mcts.get_action_distribution(&game, 5, 1.0).unwrap();
        assert_eq!(dist.actions.len(), 648);
        let p = mcts.root().children[0].1.p;
        assert!((p - 1.0 / 648.0).abs() < 1e-7);
    }

    #[test]
    fn test_chain_capture_child_keeps_player() {
        let mut game = game19();
        for s in ["PUT w E1 D1", "PUT b B3 B4", "PUT w C2 C5", "PUT b D3 C4", "PUT w C3 A1"] {
            game.play(s).unwrap();
        }
        let mut mcts = Mcts::new(UniformOracle::new(), MctsConfig::for_testing());
        let dist = mcts.get_action_distribution(&game, 4, 1.0).unwrap();
        assert_eq!(dist.action_type, ActionType::Capture);
        assert_eq!(dist.actions.len(), 5);

        for (action, child) in &mcts.root().children {
            let expected = if *action == (Action::Capture { source: 6, direction: 5 }) {
                Player::Second
            } else {
                Player::First
            };
            assert_eq!(child.player, expected, "{action:?}");
        }
    }

    #[test]
    fn test_move_root_keeps_subtree() {
        let mut game = game19();
        let mut mcts = Mcts::new(UniformOracle::new(), MctsConfig::for_testing());
        let dist = mcts.get_action_distribution(&game, 50, 0.0).unwrap();
        let best = dist.best_action().unwrap();
        let kept = mcts
            .root()
            .children
            .iter()
            .find(|(a, _)| *a == best)
            .map(|(_, c)| c.n)
            .unwrap();

        mcts.move_root(&best);
        game.apply_action(&best).unwrap();
        assert_eq!(mcts.root().n, kept);
        assert_eq!(mcts.root().player, Player::Second);

        let dist = mcts.get_action_distribution(&game, 5, 1.0).unwrap();
        assert_eq!(dist.total_visits(), 5);
    }

    #[test]
    fn test_move_root_to_unvisited_child() {
        let mut game = game19();
        let mut mcts = Mcts::new(UniformOracle::new(), MctsConfig::for_testing());
        mcts.get_action_distribution(&game, 3, 1.0).unwrap();

        // Black placements come last, so three simulations never reach them.
        let action = Action::Placement {
            marble: Marble::Black,
            target: 12,
            removed: Some(0),
        };
        mcts.move_root(&action);
        game.apply_action(&action).unwrap();
        assert_eq!(mcts.root().n, 0);
        assert!(!mcts.root().is_expanded());
        assert_eq!(mcts.root().player, Player::Second);

        let dist = mcts.get_action_distribution(&game, 3, 1.0).unwrap();
        assert_eq!(dist.total_visits(), 3);
    }

    #[test]
    fn test_move_root_illegal_action_resets() {
        let game = game19();
        let mut mcts = Mcts::new(UniformOracle::new(), MctsConfig::for_testing());
        mcts.get_action_distribution(&game, 3, 1.0).unwrap();

        mcts.move_root(&Action::Capture {
            source: 12,
            direction: 0,
        });
        assert_eq!(mcts.root().n, 0);
        assert!(mcts.root().children.is_empty());

        let dist = mcts.get_action_distribution(&game, 4, 1.0).unwrap();
        assert_eq!(dist.total_visits(), 4);
    }

    #[test]
    fn test_search_on_finished_game() {
        let config = GameConfig::default().with_rings(1);
        let mut game = ZertzGame::new(config).unwrap();
        let action = game.legal_actions().actions[0];
        game.apply_action(&action).unwrap();
        let mut mcts = Mcts::new(UniformOracle::new(), MctsConfig::for_testing());
        assert!(matches!(mcts.search(&game), Err(SearchError::GameOver)));
    }

    #[test]
    fn test_terminal_leaf_value() {
        // The only move wins for the first player, so the root child's value,
        // seen by the first player, must be +1.
        let game = ZertzGame::new(GameConfig::default().with_rings(1)).unwrap();
        let mut mcts = Mcts::new(UniformOracle::new(), MctsConfig::for_testing());
        mcts.get_action_distribution(&game, 6, 1.0).unwrap();
        for (_, child) in &mcts.root().children {
            if child.n > 0 {
                assert_eq!(child.q, 1.0);
            }
        }
    }

    #[test]
    fn test_visit_probabilities() {
        let probs = visit_probabilities(&[1, 3, 3], &[0.2, 0.4, 0.4], 0.0);
        assert_eq!(probs, vec![0.0, 1.0, 0.0]);

        let probs = visit_probabilities(&[1, 2], &[0.5, 0.5], 1.0);
        assert!((probs[0] - 1.0 / 3.0).abs() < 1e-6);

        let probs = visit_probabilities(&[0, 0], &[0.25, 0.75], 1.0);
        assert_eq!(probs, vec![0.25, 0.75]);
    }

    #[test]
    fn test_sample_respects_distribution() {
        let dist = ActionDistribution {
            action_type: ActionType::Capture,
            actions: vec![
                Action::Capture { source: 0, direction: 0 },
                Action::Capture { source: 1, direction: 0 },
            ],
            visits: vec![0, 4],
            probs: vec![0.0, 1.0],
            placement: Vec::new(),
            capture: Vec::new(),
        };
        let mut rng = fastrand::Rng::with_seed(11);
        for _ in 0..20 {
            assert_eq!(dist.sample(&mut rng), Some(dist.actions[1]));
        }
    }
}
