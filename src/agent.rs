//! Players that take part in a game.

use fastrand::Rng;
use log::debug;

use crate::board::{Board, Color, Place};
use crate::config::{AgentConfig, ConfigError};
use crate::game::NoGo;
use crate::mcts::{select_move, SearchError};

/// Something that can pick a placement for its side.
pub trait Agent {
    fn name(&self) -> &str;

    /// The side this agent plays.
    fn role(&self) -> Color;

    fn open_episode(&mut self) {}

    fn close_episode(&mut self) {}

    /// Choose a placement at `board`, or `None` if there is no legal one.
    fn take_action(&mut self, board: &Board) -> Result<Option<Place>, SearchError>;
}

/// A player that runs a fresh tree search for every move.
///
/// The random generator is created once and consumed across all moves, so a
/// seeded player replays the same game against the same opponent.
pub struct MctsPlayer {
    config: AgentConfig,
    rng: Rng,
}

impl MctsPlayer {
    pub fn new(config: AgentConfig) -> Self {
        let rng = config.seed.map(Rng::with_seed).unwrap_or_else(Rng::new);
        Self { config, rng }
    }

    /// Build a player from a `key=value` argument string.
    pub fn from_args(args: &str) -> Result<Self, ConfigError> {
        Ok(Self::new(args.parse()?))
    }

    pub fn config(&self) -> &AgentConfig {
        &self.config
    }

    /// Change a property at runtime, e.g. `"N=2000"`.
    pub fn notify(&mut self, msg: &str) -> Result<(), ConfigError> {
        self.config.notify(msg)
    }
}

impl Agent for MctsPlayer {
    fn name(&self) -> &str {
        &self.config.name
    }

    fn role(&self) -> Color {
        self.config.role
    }

    fn take_action(&mut self, board: &Board) -> Result<Option<Place>, SearchError> {
        let mv = select_move(&NoGo, board, self.config.role, &self.config.search, &mut self.rng)?;
        match mv {
            Some(mv) => debug!("{} plays {}", self.config.name, mv),
            None => debug!("{} has no legal move", self.config.name),
        }
        Ok(mv)
    }
}
