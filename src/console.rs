//! Line-oriented text console for playing against the engine.
//!
//! The protocol follows the shape of GTP: each input line is a command,
//! optionally preceded by a numeric id, and each response is printed as
//! `=[id] result` or `?[id] error` followed by a blank line.
//!
//! ## Supported Commands
//!
//! - `PUT <color> <target> [<removed>]` - Place a marble
//! - `CAP <color> <source> <capturedColor> <destination>` - Perform a capture step
//! - `genmove` - Search and play an action for the side to move
//! - `legal` - List legal actions
//! - `show` - Print the board
//! - `stats` - Print the root statistics of the last search
//! - `clear_board` - Start a new game
//! - `name`, `version`, `list_commands`, `known_command <cmd>`, `quit`
//!
//! ## Example
//!
//! ```ignore
//! use zertz_rust::console::Console;
//! let mut console = Console::new(game, mcts);
//! console.run()?;
//! ```

use std::io::{self, BufRead, Write};

use crate::game::ZertzGame;
use crate::mcts::Mcts;
use crate::oracle::Oracle;

/// The list of known console commands.
const KNOWN_COMMANDS: &[&str] = &[
    "cap",
    "clear_board",
    "genmove",
    "known_command",
    "legal",
    "list_commands",
    "name",
    "put",
    "quit",
    "show",
    "stats",
    "version",
];

/// Console state: the game being played and the engine's search tree.
pub struct Console<O: Oracle> {
    game: ZertzGame,
    mcts: Mcts<O>,
}

impl<O: Oracle> Console<O> {
    pub fn new(game: ZertzGame, mcts: Mcts<O>) -> Self {
        Self { game, mcts }
    }

    pub fn game(&self) -> &ZertzGame {
        &self.game
    }

    /// Run the command loop, reading from stdin and writing to stdout.
    pub fn run(&mut self) -> io::Result<()> {
        let stdin = io::stdin();
        let mut stdout = io::stdout();

        for line in stdin.lock().lines() {
            let line = line?;
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let (id, command_line) = Self::parse_id(line);
            if command_line.is_empty() {
                continue;
            }

            let (success, message) = self.execute(command_line);
            let prefix = if success { '=' } else { '?' };
            let id_str = id.map(|i| i.to_string()).unwrap_or_default();
            writeln!(stdout, "{prefix}{id_str} {message}\n")?;
            stdout.flush()?;

            if command_line.eq_ignore_ascii_case("quit") {
                break;
            }
        }
        Ok(())
    }

    /// Parse an optional numeric command ID from the beginning of the line.
    fn parse_id(line: &str) -> (Option<u32>, &str) {
        let trimmed = line.trim();
        let end = trimmed
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(trimmed.len());
        if end > 0 {
            if let Ok(id) = trimmed[..end].parse::<u32>() {
                return (Some(id), trimmed[end..].trim());
            }
        }
        (None, trimmed)
    }

    /// Execute one command line and return (success, response).
    pub fn execute(&mut self, line: &str) -> (bool, String) {
        let mut parts = line.split_whitespace();
        let command = parts.next().unwrap_or_default().to_lowercase();
        let args: Vec<&str> = parts.collect();

        match command.as_str() {
            "name" => (true, env!("CARGO_PKG_NAME").to_string()),

            "version" => (true, env!("CARGO_PKG_VERSION").to_string()),

            "list_commands" => (true, KNOWN_COMMANDS.join("\n")),

            "known_command" => match args.first() {
                Some(cmd) => {
                    let known = KNOWN_COMMANDS.contains(&cmd.to_lowercase().as_str());
                    (true, known.to_string())
                }
                None => (false, "missing argument".to_string()),
            },

            "quit" => (true, String::new()),

            "clear_board" => match self.game.reset() {
                Ok(()) => {
                    self.mcts.reset();
                    (true, String::new())
                }
                Err(e) => (false, e.to_string()),
            },

            "show" => (true, format!("\n{}", self.game.board())),

            "legal" => {
                let names: Result<Vec<String>, _> = self
                    .game
                    .legal_actions()
                    .actions
                    .iter()
                    .map(|a| self.game.action_to_string(a))
                    .collect();
                match names {
                    Ok(names) => (true, names.join("\n")),
                    Err(e) => (false, e.to_string()),
                }
            }

            "stats" => (true, self.mcts.root_summary()),

            "put" | "cap" => self.play(line),

            "genmove" => self.genmove(),

            _ => (false, format!("unknown command: {command}")),
        }
    }

    fn play(&mut self, line: &str) -> (bool, String) {
        if self.game.get_game_ended() != 0 {
            return (false, "game is over".to_string());
        }
        let action = match self.game.string_to_action(line) {
            Ok(a) => a,
            Err(e) => return (false, e.to_string()),
        };
        match self.game.apply_action(&action) {
            Ok(_) => {
                self.mcts.move_root(&action);
                (true, self.status())
            }
            Err(e) => (false, e.to_string()),
        }
    }

    fn genmove(&mut self) -> (bool, String) {
        let dist = match self.mcts.search(&self.game) {
            Ok(d) => d,
            Err(e) => return (false, e.to_string()),
        };
        let Some(action) = dist.best_action() else {
            return (false, "no action found".to_string());
        };
        let name = match self.game.action_to_string(&action) {
            Ok(n) => n,
            Err(e) => return (false, e.to_string()),
        };
        if let Err(e) = self.game.apply_action(&action) {
            return (false, e.to_string());
        }
        self.mcts.move_root(&action);

        let status = self.status();
        if status.is_empty() {
            (true, name)
        } else {
            (true, format!("{name} {status}"))
        }
    }

    fn status(&self) -> String {
        match self.game.winner() {
            Some(winner) => format!("({winner} wins)"),
            None => String::new(),
        }
    }
}
