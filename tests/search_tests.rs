//! Integration tests for the search, self-play and arena layers.

use zertz_rust::action::{ActionType, Marble, MarbleCounts, Player};
use zertz_rust::arena::Arena;
use zertz_rust::board::Board;
use zertz_rust::error::{OracleError, SearchError};
use zertz_rust::game::{GameConfig, ZertzGame};
use zertz_rust::mcts::{Mcts, MctsConfig};
use zertz_rust::oracle::{Oracle, Prediction, RolloutOracle, TrainingExample, UniformOracle};
use zertz_rust::selfplay::{SelfPlay, SelfPlayConfig};

fn config19() -> GameConfig {
    GameConfig::default()
        .with_rings(19)
        .with_supply(MarbleCounts::new(10, 10, 10))
}

/// Oracle returning NaN everywhere.
struct NanOracle;

impl Oracle for NanOracle {
    fn predict(&self, board: &Board, _has_placement: bool) -> Result<Prediction, OracleError> {
        let mut prediction = Prediction::zeros(&board.action_space(), 0.0);
        prediction.placement.fill(f32::NAN);
        prediction.capture.fill(f32::NAN);
        Ok(prediction)
    }
}

/// Oracle with a policy of the wrong size.
struct BrokenOracle;

impl Oracle for BrokenOracle {
    fn predict(&self, _board: &Board, _has_placement: bool) -> Result<Prediction, OracleError> {
        Ok(Prediction {
            placement: vec![1.0; 3],
            capture: Vec::new(),
            value: 0.0,
        })
    }
}

/// Counts how many examples it was trained on.
#[derive(Default)]
struct CountingOracle {
    trained: usize,
}

impl Oracle for CountingOracle {
    fn predict(&self, board: &Board, has_placement: bool) -> Result<Prediction, OracleError> {
        UniformOracle::new().predict(board, has_placement)
    }

    fn train(&mut self, examples: &[TrainingExample]) -> Result<(), OracleError> {
        self.trained += examples.len();
        Ok(())
    }
}

#[test]
fn test_visit_conservation_through_a_game() {
    let mut rng = fastrand::Rng::with_seed(42);
    let mut game = ZertzGame::new(config19()).unwrap();
    let mut mcts = Mcts::new(UniformOracle::new(), MctsConfig::for_testing());

    while game.get_game_ended() == 0 && game.move_count() < 60 {
        let sims = 1 + rng.u32(..20);
        let temperature = [0.0, 0.5, 1.0][rng.usize(..3)];
        let dist = mcts.get_action_distribution(&game, sims, temperature).unwrap();
        assert_eq!(dist.total_visits(), sims);

        let legal = game.legal_actions();
        assert_eq!(dist.action_type, legal.action_type);
        assert_eq!(dist.actions.len(), legal.len());

        let action = dist.sample(&mut rng).unwrap();
        mcts.move_root(&action);
        game.apply_action(&action).unwrap();
    }
}

#[test]
fn test_chain_capture_search() {
    let mut game = ZertzGame::new(config19()).unwrap();
    for s in ["PUT w E1 D1", "PUT b B3 B4", "PUT w C2 C5", "PUT b D3 C4", "PUT w C3 A1"] {
        game.play(s).unwrap();
    }
    let chain = game.string_to_action("CAP b B3 w D2").unwrap();
    game.apply_action(&chain).unwrap();
    assert_eq!(game.current_player(), Player::Second);

    let mut mcts = Mcts::new(UniformOracle::new(), MctsConfig::for_testing());
    let dist = mcts.get_action_distribution(&game, 10, 1.0).unwrap();
    assert_eq!(dist.action_type, ActionType::Capture);
    assert_eq!(dist.actions.len(), 2);
    assert_eq!(dist.total_visits(), 10);
    assert_eq!(mcts.root().player, Player::Second);
    assert!(dist.placement.iter().all(|&p| p == 0.0));
    let total: f32 = dist.capture.iter().sum();
    assert!((total - 1.0).abs() < 1e-5);
}

#[test]
fn test_nan_policy_is_recovered() {
    let game = ZertzGame::new(config19()).unwrap();
    let mut mcts = Mcts::new(NanOracle, MctsConfig::for_testing());
    let dist = mcts.get_action_distribution(&game, 12, 1.0).unwrap();
    assert_eq!(dist.total_visits(), 12);
    assert_eq!(dist.actions.len(), 648);
}

#[test]
fn test_wrong_policy_shape_is_an_error() {
    let game = ZertzGame::new(config19()).unwrap();
    let mut mcts = Mcts::new(BrokenOracle, MctsConfig::for_testing());
    assert!(matches!(
        mcts.get_action_distribution(&game, 1, 1.0),
        Err(SearchError::Oracle(OracleError::Shape { .. }))
    ));
}

#[test]
fn test_search_finds_immediate_win() {
    // Three of the five captures take a white marble, which meets the second
    // player's win condition on the spot.
    let config = config19().with_win_conditions(vec![MarbleCounts::new(1, 0, 0)]);
    let mut game = ZertzGame::new(config.clone()).unwrap();
    for s in ["PUT w E1 D1", "PUT b B3 B4", "PUT w C2 C5", "PUT b D3 C4", "PUT w C3 A1"] {
        game.play(s).unwrap();
    }
    let oracle = RolloutOracle::with_seed(config.win_conditions.clone(), 2, 100, 9);
    let mut mcts = Mcts::new(oracle, MctsConfig::for_testing());
    let dist = mcts.get_action_distribution(&game, 40, 0.0).unwrap();
    let best = dist.best_action().unwrap();

    let mut next = game.clone();
    next.apply_action(&best).unwrap();
    let stash = next.board().stash(Player::Second);
    assert_eq!(stash[Marble::White], 1);
}

#[test]
fn test_selfplay_trains_oracle() {
    let game_config = GameConfig::default()
        .with_rings(7)
        .with_supply(MarbleCounts::new(3, 3, 3))
        .with_win_conditions(vec![MarbleCounts::new(2, 0, 0)]);
    let config = SelfPlayConfig::default().with_seed(17);
    let mut selfplay = SelfPlay::new(
        CountingOracle::default(),
        game_config,
        MctsConfig::for_testing(),
        config,
    )
    .unwrap();
    let (stats, examples) = selfplay.run(3).unwrap();
    assert_eq!(stats.first_wins + stats.second_wins + stats.draws, 3);
    assert_eq!(stats.examples, examples.len());
    assert_eq!(selfplay.mcts().oracle().trained, examples.len());
    assert!(examples.iter().all(|e| e.outcome.abs() <= 1.0));
}

#[test]
fn test_arena_rollout_vs_uniform() {
    let game_config = GameConfig::default()
        .with_rings(7)
        .with_supply(MarbleCounts::new(3, 3, 3));
    let config = MctsConfig::for_evaluation().with_simulations(6);
    let rollout = RolloutOracle::with_seed(game_config.win_conditions.clone(), 1, 50, 21);
    let mut arena = Arena::new(
        Mcts::new(rollout, config.clone()),
        Mcts::new(UniformOracle::new(), config),
        game_config,
    )
    .unwrap();
    let result = arena.play_matches(2).unwrap();
    assert_eq!(result.a_wins + result.b_wins + result.draws, 2);
}

#[test]
fn test_invalid_game_config_rejected() {
    let bad = GameConfig::default().with_rings(20);
    assert!(
        SelfPlay::new(
            UniformOracle::new(),
            bad,
            MctsConfig::for_testing(),
            SelfPlayConfig::default()
        )
        .is_err()
    );
}
