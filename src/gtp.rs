//! Go Text Protocol (GTP) front end for NoGo.
//!
//! GTP is the usual way to connect a board-game engine to a GUI or a match
//! runner. This module implements the subset of GTP version 2 needed to
//! play NoGo games.
//!
//! ## Supported Commands
//!
//! - `name` - Return engine name
//! - `version` - Return engine version
//! - `protocol_version` - Return GTP protocol version (2)
//! - `list_commands` - List all supported commands
//! - `known_command <cmd>` - Check if a command is supported
//! - `quit` - Exit the program
//! - `boardsize <size>` - Set board size (only the compiled size is accepted)
//! - `clear_board` - Reset the board to empty
//! - `showboard` - Print the current board
//! - `play <color> <vertex>` - Play a move
//! - `genmove <color>` - Generate and play a move, `resign` if none is legal
//!
//! ## Example
//!
//! ```ignore
//! use nogo_mcts::gtp::GtpEngine;
//! let mut engine = GtpEngine::new();
//! engine.run()?;
//! ```

use std::io::{self, BufRead, Write};

use fastrand::Rng;
use log::{debug, info, warn};

use crate::board::{parse_coord, str_coord, Board, Color, Place};
use crate::constants::N;
use crate::game::NoGo;
use crate::mcts::{select_move, SearchConfig};

/// The list of known GTP commands.
const KNOWN_COMMANDS: &[&str] = &[
    "boardsize",
    "clear_board",
    "genmove",
    "known_command",
    "list_commands",
    "name",
    "play",
    "protocol_version",
    "quit",
    "showboard",
    "version",
];

/// GTP engine state.
pub struct GtpEngine {
    /// Current board
    board: Board,
    /// Search parameters used by `genmove`
    config: SearchConfig,
    rng: Rng,
}

impl Default for GtpEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl GtpEngine {
    /// Create a new GTP engine with default settings and an entropy seed.
    pub fn new() -> Self {
        Self::with_config(SearchConfig::default(), None)
    }

    /// Create a new GTP engine with the given search parameters.
    pub fn with_config(config: SearchConfig, seed: Option<u64>) -> Self {
        Self {
            board: Board::new(),
            config,
            rng: seed.map(Rng::with_seed).unwrap_or_else(Rng::new),
        }
    }

    /// Run the GTP command loop, reading from stdin and writing to stdout.
    pub fn run(&mut self) -> io::Result<()> {
        let stdin = io::stdin();
        let stdout = io::stdout();
        self.serve(stdin.lock(), stdout.lock())
    }

    /// Run the command loop over arbitrary streams until `quit` or EOF.
    pub fn serve(&mut self, input: impl BufRead, mut output: impl Write) -> io::Result<()> {
        info!("GTP session started ({}x{}, {} sims)", N, N, self.config.simulations);

        for line in input.lines() {
            let line = line?;

            // Skip empty lines and comments
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            // Parse optional command ID
            let (id, command_line) = Self::parse_id(line);

            let parts: Vec<&str> = command_line.split_whitespace().collect();
            if parts.is_empty() {
                continue;
            }

            let command = parts[0].to_lowercase();
            let args = &parts[1..];

            let (success, message) = self.execute(&command, args);
            let prefix = if success { '=' } else { '?' };
            let id_str = id.map(|i| i.to_string()).unwrap_or_default();

            write!(output, "{prefix}{id_str} {message}\n\n")?;
            output.flush()?;

            if command == "quit" {
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

        match trimmed[..end].parse::<u32>() {
            Ok(id) => (Some(id), trimmed[end..].trim()),
            Err(_) => (None, trimmed),
        }
    }

    /// Execute a GTP command and return (success, response).
    fn execute(&mut self, command: &str, args: &[&str]) -> (bool, String) {
        debug!("gtp: {command} {args:?}");
        match command {
            "name" => (true, "nogo-mcts".to_string()),

            "version" => (true, env!("CARGO_PKG_VERSION").to_string()),

            "protocol_version" => (true, "2".to_string()),

            "list_commands" => (true, KNOWN_COMMANDS.join("\n")),

            "known_command" => {
                let Some(cmd) = args.first() else {
                    return (false, "missing argument".to_string());
                };
                let known = KNOWN_COMMANDS.contains(&cmd.to_lowercase().as_str());
                (true, known.to_string())
            }

            "quit" => (true, String::new()),

            "boardsize" => {
                let Some(size) = args.first() else {
                    return (false, "missing argument".to_string());
                };
                match size.parse::<usize>() {
                    Ok(size) if size == N => (true, String::new()),
                    Ok(size) => (
                        false,
                        format!("unacceptable size, only {N} is supported (got {size})"),
                    ),
                    Err(_) => (false, "invalid size".to_string()),
                }
            }

            "clear_board" => {
                self.board = Board::new();
                (true, String::new())
            }

            "showboard" => (true, format!("\n{}", self.board)),

            "play" => {
                let [color, vertex, ..] = args else {
                    return (false, "missing arguments".to_string());
                };
                let Some(color) = Color::parse(color) else {
                    return (false, "invalid color".to_string());
                };
                let Some(pt) = parse_coord(vertex) else {
                    return (false, "illegal move".to_string());
                };
                match self.board.place(pt, color) {
                    Ok(()) => (true, String::new()),
                    Err(e) => (false, e.to_string()),
                }
            }

            "genmove" => {
                let Some(color) = args.first().and_then(|c| Color::parse(c)) else {
                    return (false, "invalid color".to_string());
                };
                match select_move(&NoGo, &self.board, color, &self.config, &mut self.rng) {
                    Ok(Some(mv)) => self.commit(mv),
                    Ok(None) => (true, "resign".to_string()),
                    Err(e) => (false, e.to_string()),
                }
            }

            _ => (false, format!("unknown command: {command}")),
        }
    }

    /// Put an engine move on the board, failing the command if it does not fit.
    fn commit(&mut self, mv: Place) -> (bool, String) {
        match mv.apply(&self.board) {
            Some(after) => {
                self.board = after;
                (true, str_coord(mv.pt))
            }
            None => {
                warn!("engine chose illegal move {mv}");
                (false, "engine produced an illegal move".to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> GtpEngine {
        GtpEngine::with_config(SearchConfig::new(50, 0.5), Some(5))
    }

    #[test]
    fn test_parse_id_with_id() {
        let (id, cmd) = GtpEngine::parse_id("123 name");
        assert_eq!(id, Some(123));
        assert_eq!(cmd, "name");
    }

    #[test]
    fn test_parse_id_without_id() {
        let (id, cmd) = GtpEngine::parse_id("name");
        assert_eq!(id, None);
        assert_eq!(cmd, "name");
    }

    #[test]
    fn test_name_command() {
        let mut engine = engine();
        let (success, response) = engine.execute("name", &[]);
        assert!(success);
        assert_eq!(response, "nogo-mcts");
    }

    #[test]
    fn test_known_command() {
        let mut engine = engine();

        let (success, response) = engine.execute("known_command", &["genmove"]);
        assert!(success);
        assert_eq!(response, "true");

        let (success, response) = engine.execute("known_command", &["komi"]);
        assert!(success);
        assert_eq!(response, "false");
    }

    #[test]
    fn test_boardsize() {
        let mut engine = engine();
        let (success, _) = engine.execute("boardsize", &[&N.to_string()]);
        assert!(success);
        let (success, _) = engine.execute("boardsize", &["19"]);
        assert!(!success);
    }

    #[test]
    fn test_play_rejects_capture() {
        let mut engine = engine();
        assert!(engine.execute("play", &["white", "A1"]).0);
        assert!(engine.execute("play", &["black", "A2"]).0);
        let (success, msg) = engine.execute("play", &["black", "B1"]);
        assert!(!success);
        assert!(msg.contains("captures"));
        assert!(!engine.execute("play", &["black", "A1"]).0);
    }

    #[test]
    fn test_genmove_and_clear() {
        let mut engine = engine();
        let (success, vertex) = engine.execute("genmove", &["b"]);
        assert!(success);
        let pt = parse_coord(&vertex).unwrap();
        assert_eq!(engine.board.get(pt), Some(Color::Black));

        assert!(engine.execute("clear_board", &[]).0);
        assert_eq!(engine.board.stones(), 0);
    }

    #[test]
    fn test_illegal_engine_move_fails_command() {
        let mut engine = engine();
        assert!(engine.execute("play", &["white", "E5"]).0);
        let before = engine.board;

        let (success, msg) = engine.commit(Place::new(parse_coord("E5").unwrap(), Color::Black));
        assert!(!success);
        assert_eq!(msg, "engine produced an illegal move");
        assert_eq!(engine.board, before);

        let (success, vertex) = engine.commit(Place::new(parse_coord("A1").unwrap(), Color::Black));
        assert!(success);
        assert_eq!(vertex, "A1");
    }

    #[test]
    fn test_serve_formats_responses() {
        let mut engine = engine();
        let input = "1 protocol_version\n# comment\n\nbogus\n2 quit\nname\n";
        let mut out = Vec::new();
        engine.serve(input.as_bytes(), &mut out).unwrap();
        let out = String::from_utf8(out).unwrap();
        assert_eq!(out, "=1 2\n\n? unknown command: bogus\n\n=2 \n\n");
    }
}
