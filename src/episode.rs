//! Playing a full game between two agents.

use log::{info, warn};
use thiserror::Error;

use crate::agent::Agent;
use crate::board::{Board, Color, Place};
use crate::mcts::SearchError;

#[derive(Debug, Error)]
pub enum EpisodeError {
    #[error("agent {name} plays {actual}, expected {expected}")]
    RoleMismatch {
        name: String,
        expected: Color,
        actual: Color,
    },
    #[error(transparent)]
    Search(#[from] SearchError),
}

/// Outcome of one game.
#[derive(Debug, Clone)]
pub struct EpisodeRecord {
    pub moves: Vec<Place>,
    pub winner: Color,
    pub board: Board,
}

/// Play one game from `start`, Black moving first.
///
/// A side loses as soon as it has no placement to offer. An agent that
/// returns an illegal placement forfeits the game the same way.
pub fn play_episode<'a>(
    black: &mut (dyn Agent + 'a),
    white: &mut (dyn Agent + 'a),
    start: Board,
) -> Result<EpisodeRecord, EpisodeError> {
    for (agent, expected) in [(&*black, Color::Black), (&*white, Color::White)] {
        if agent.role() != expected {
            return Err(EpisodeError::RoleMismatch {
                name: agent.name().to_string(),
                expected,
                actual: agent.role(),
            });
        }
    }

    black.open_episode();
    white.open_episode();

    let mut board = start;
    let mut moves = Vec::new();
    let mut side = Color::Black;

    let winner = loop {
        let agent = match side {
            Color::Black => &mut *black,
            Color::White => &mut *white,
        };
        let Some(mv) = agent.take_action(&board)? else {
            break side.opponent();
        };
        let after = if mv.color == side { mv.apply(&board) } else { None };
        let Some(after) = after else {
            warn!("{} returned illegal move {}", agent.name(), mv);
            break side.opponent();
        };
        board = after;
        moves.push(mv);
        side = side.opponent();
    };

    black.close_episode();
    white.close_episode();
    info!("{} wins after {} moves", winner, moves.len());

    Ok(EpisodeRecord {
        moves,
        winner,
        board,
    })
}
