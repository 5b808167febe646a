//! Constants for board dimensions and search parameters.
//!
//! The board is stored as a flat row-major array of `N * N` cells, with
//! cell 0 in the top-left corner (A9 on a 9x9 board).
//!
//! # Board Size Configuration
//!
//! The board size is controlled by Cargo features:
//! - `board9x9` (default): 9x9 board
//! - `board13x13`: 13x13 board
//!
//! To compile for a specific board size:
//! ```sh
//! cargo build                           # 9x9 (default)
//! cargo build --no-default-features --features board13x13  # 13x13
//! ```

// =============================================================================
// Board Geometry
// =============================================================================

/// Board size (NxN). NoGo is usually played on 9x9.
#[cfg(feature = "board9x9")]
pub const N: usize = 9;

#[cfg(feature = "board13x13")]
pub const N: usize = 13;

// Compile-time check: exactly one board size feature must be enabled
#[cfg(all(feature = "board9x9", feature = "board13x13"))]
compile_error!("Cannot enable both 'board9x9' and 'board13x13' features at the same time");

#[cfg(not(any(feature = "board9x9", feature = "board13x13")))]
compile_error!("Must enable exactly one board size feature: 'board9x9' or 'board13x13'");

/// Total number of cells on the board.
pub const BOARDSIZE: usize = N * N;

// =============================================================================
// Search Parameters
// =============================================================================

/// Default number of simulations per move.
pub const N_SIMS: usize = 1000;

/// Default exploration weight `c` used by the node score.
pub const EXPLORATION: f64 = 0.5;

/// Score given to freshly created nodes so that unvisited children win
/// every comparison against visited ones.
pub const UNVISITED_SCORE: f64 = 10000.0;
