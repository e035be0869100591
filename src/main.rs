//! Zertz-Rust: Zèrtz engine and self-play driver.
//!
//! ## Usage
//!
//! - `zertz-rust` - Show a demo
//! - `zertz-rust demo` - Run the MCTS demo
//! - `zertz-rust selfplay` - Generate self-play games
//! - `zertz-rust arena` - Pit a rollout-guided search against a uniform one
//! - `zertz-rust play` - Play against the engine on the text console
//!
//! Logging goes through `tracing`; `RUST_LOG` overrides `--log-level`.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::info;

use zertz_rust::action::MarbleCounts;
use zertz_rust::arena::Arena;
use zertz_rust::console::Console;
use zertz_rust::constants::{DEFAULT_RINGS, MAX_EPISODE_STEPS, N_SIMS, TEMP_THRESHOLD};
use zertz_rust::game::{GameConfig, ZertzGame};
use zertz_rust::mcts::{Mcts, MctsConfig};
use zertz_rust::oracle::{RolloutOracle, UniformOracle};
use zertz_rust::selfplay::{SelfPlay, SelfPlayConfig};

/// Zertz-Rust: Zèrtz engine with MCTS planning
#[derive(Parser)]
#[command(name = "zertz-rust")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log level used when RUST_LOG is not set
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Board and rules options shared by every subcommand.
#[derive(Args, Clone)]
struct GameArgs {
    /// Total number of rings (1, 7, 19, 37, 61, 91 or 127)
    #[arg(long, default_value_t = DEFAULT_RINGS)]
    rings: usize,

    /// Starting supply, e.g. "w6g8b10"
    #[arg(long)]
    supply: Option<MarbleCounts>,

    /// Win condition, repeatable, e.g. --win w3g3b3 --win w4
    #[arg(long = "win")]
    win_conditions: Vec<MarbleCounts>,

    /// Number of board layouts in the oracle input
    #[arg(long, default_value_t = 1)]
    history: usize,

    /// MCTS simulations per action
    #[arg(long, default_value_t = N_SIMS)]
    sims: u32,
}

impl GameArgs {
    fn game_config(&self) -> GameConfig {
        let mut config = GameConfig::default()
            .with_rings(self.rings)
            .with_history_depth(self.history);
        if let Some(supply) = self.supply {
            config = config.with_supply(supply);
        }
        if !self.win_conditions.is_empty() {
            config = config.with_win_conditions(self.win_conditions.clone());
        }
        config
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Run a simple demo of the engine
    Demo,
    /// Generate self-play episodes with the uniform oracle
    Selfplay {
        #[command(flatten)]
        game: GameArgs,
        /// Number of episodes
        #[arg(long, default_value_t = 4)]
        episodes: usize,
        /// Plies sampled with temperature 1 before greedy play
        #[arg(long, default_value_t = TEMP_THRESHOLD)]
        temp_threshold: usize,
        /// Step cap after which an episode is a draw
        #[arg(long, default_value_t = MAX_EPISODE_STEPS)]
        max_steps: usize,
        /// Skip symmetry augmentation
        #[arg(long)]
        no_augment: bool,
        /// Random seed
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Pit rollout-guided search (A) against uniform search (B)
    Arena {
        #[command(flatten)]
        game: GameArgs,
        /// Number of games (seats swap halfway)
        #[arg(long, default_value_t = 4)]
        games: usize,
        /// Random playouts per rollout-oracle evaluation
        #[arg(long, default_value_t = 4)]
        rollouts: usize,
    },
    /// Play against the engine using PUT/CAP commands on stdin
    Play {
        #[command(flatten)]
        game: GameArgs,
    },
}

fn init_tracing(level: &str) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to initialize tracing: {e}"))?;
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level)?;

    match cli.command {
        Some(Commands::Selfplay {
            game,
            episodes,
            temp_threshold,
            max_steps,
            no_augment,
            seed,
        }) => {
            let mut config = SelfPlayConfig::default()
                .with_temp_threshold(temp_threshold)
                .with_max_episode_steps(max_steps)
                .with_augmentation(!no_augment);
            if let Some(seed) = seed {
                config = config.with_seed(seed);
            }
            let mcts_config = MctsConfig::default().with_simulations(game.sims);
            let mut selfplay =
                SelfPlay::new(UniformOracle::new(), game.game_config(), mcts_config, config)
                    .context("invalid game configuration")?;
            let (stats, _) = selfplay.run(episodes)?;
            println!(
                "episodes: {episodes}  first wins: {}  second wins: {}  draws: {}  examples: {}",
                stats.first_wins, stats.second_wins, stats.draws, stats.examples
            );
        }
        Some(Commands::Arena {
            game,
            games,
            rollouts,
        }) => {
            let game_config = game.game_config();
            let mcts_config = MctsConfig::for_evaluation().with_simulations(game.sims);
            let rollout = RolloutOracle::new(
                game_config.win_conditions.clone(),
                rollouts,
                MAX_EPISODE_STEPS,
            );
            let mut arena = Arena::new(
                Mcts::new(rollout, mcts_config.clone()),
                Mcts::new(UniformOracle::new(), mcts_config),
                game_config,
            )
            .context("invalid game configuration")?;
            let result = arena.play_matches(games)?;
            println!(
                "rollout wins: {}  uniform wins: {}  draws: {}",
                result.a_wins, result.b_wins, result.draws
            );
        }
        Some(Commands::Play { game }) => {
            let state = ZertzGame::new(game.game_config()).context("invalid game configuration")?;
            let mcts = Mcts::new(
                UniformOracle::new(),
                MctsConfig::for_evaluation().with_simulations(game.sims),
            );
            Console::new(state, mcts).run()?;
        }
        Some(Commands::Demo) | None => run_demo()?,
    }
    Ok(())
}

fn run_demo() -> Result<()> {
    println!("Zertz-Rust: Zèrtz engine with MCTS\n");

    println!("=== Board Demo ===");
    let mut game = ZertzGame::new(GameConfig::default().with_rings(19))?;
    for action in ["PUT w E1 D1", "PUT b B3 B4", "PUT w C2 C5", "PUT b D3 C4", "PUT w C3 A1"] {
        game.play(action)?;
        println!("played {action}");
    }
    println!("{}\n", game.board());

    let legal = game.legal_actions();
    println!("{} forced captures:", legal.len());
    for action in &legal.actions {
        println!("  {}", game.action_to_string(action)?);
    }

    println!("\n=== MCTS Demo ===");
    let mut mcts = Mcts::new(UniformOracle::new(), MctsConfig::default().with_temperature(0.0));
    info!(simulations = N_SIMS, "running search");
    let dist = mcts.search(&game)?;
    if let Some(best) = dist.best_action() {
        println!("Best action: {}", game.action_to_string(&best)?);
    }
    println!("{}", mcts.root_summary());
    Ok(())
}
