//! NoGo-MCTS: a Monte Carlo Tree Search engine for NoGo.
//!
//! NoGo is Go without captures: a placement that would capture, or that
//! would leave the placed stone without liberties, is illegal, and a player
//! with no legal placement loses.
//!
//! ## Modules
//!
//! - [`constants`] - Board dimensions and search defaults
//! - [`board`] - Board representation and NoGo placement rules
//! - [`game`] - Move enumeration contract used by the search
//! - [`mcts`] - Tree search with random playouts
//! - [`config`] - Agent `key=value` configuration
//! - [`agent`] - Players driven by the search
//! - [`episode`] - Full games between two agents
//! - [`gtp`] - Go Text Protocol front end
//!
//! ## Example
//!
//! ```
//! use nogo_mcts::board::{Board, Color};
//! use nogo_mcts::game::NoGo;
//! use nogo_mcts::mcts::{select_move, SearchConfig};
//!
//! let board = Board::new();
//! let mut rng = fastrand::Rng::with_seed(7);
//! let config = SearchConfig::new(100, 0.5);
//!
//! let best = select_move(&NoGo, &board, Color::Black, &config, &mut rng).unwrap();
//! println!("Best move: {}", best.unwrap());
//! ```

pub mod agent;
pub mod board;
pub mod config;
pub mod constants;
pub mod episode;
pub mod game;
pub mod gtp;
pub mod mcts;
