//! NoGo-MCTS: a Monte Carlo Tree Search engine for NoGo.
//!
//! ## Usage
//!
//! - `nogo-mcts` - Show a demo
//! - `nogo-mcts gtp` - Start GTP server for GUI integration
//! - `nogo-mcts selfplay` - Play games between two search agents
//!
//! Logs go to stderr; set `RUST_LOG=debug` for per-search statistics.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use flexi_logger::Logger;

use nogo_mcts::agent::MctsPlayer;
use nogo_mcts::board::{Board, Color};
use nogo_mcts::constants::{EXPLORATION, N_SIMS};
use nogo_mcts::episode::play_episode;
use nogo_mcts::game::NoGo;
use nogo_mcts::gtp::GtpEngine;
use nogo_mcts::mcts::{tree_search, SearchConfig};

/// NoGo-MCTS: a Monte Carlo Tree Search engine for NoGo
#[derive(Parser)]
#[command(name = "nogo-mcts")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the GTP (Go Text Protocol) server for use with GUI applications
    Gtp {
        /// Simulations per move
        #[arg(long, default_value_t = N_SIMS)]
        sims: usize,
        /// Exploration weight
        #[arg(long, default_value_t = EXPLORATION)]
        weight: f64,
        /// Random seed (entropy when omitted)
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Play games between two search agents
    Selfplay {
        /// Number of games to play
        #[arg(long, default_value_t = 1)]
        games: usize,
        /// Arguments for the black agent, e.g. "name=b N=500 c=0.5 seed=1"
        #[arg(long, default_value = "name=black N=300 seed=1")]
        black: String,
        /// Arguments for the white agent
        #[arg(long, default_value = "name=white N=300 seed=2")]
        white: String,
    },
    /// Run a simple demo of the engine
    Demo,
}

fn main() -> Result<()> {
    let _logger = Logger::try_with_env_or_str("info")
        .context("invalid log specification")?
        .start()
        .context("failed to start logger")?;

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Gtp { sims, weight, seed }) => {
            let config = SearchConfig::new(sims, weight);
            config.validate()?;
            let mut engine = GtpEngine::with_config(config, seed);
            engine.run().context("GTP session failed")?;
        }
        Some(Commands::Selfplay {
            games,
            black,
            white,
        }) => run_selfplay(games, &black, &white)?,
        Some(Commands::Demo) | None => run_demo()?,
    }
    Ok(())
}

fn run_selfplay(games: usize, black_args: &str, white_args: &str) -> Result<()> {
    let mut black = MctsPlayer::from_args(&format!("{black_args} role=black"))
        .context("invalid black agent arguments")?;
    let mut white = MctsPlayer::from_args(&format!("{white_args} role=white"))
        .context("invalid white agent arguments")?;

    let mut black_wins = 0;
    for game in 1..=games {
        let record = play_episode(&mut black, &mut white, Board::new())?;
        println!("Game {game}: {} wins after {} moves", record.winner, record.moves.len());
        println!("{}", record.board);
        if record.winner == Color::Black {
            black_wins += 1;
        }
    }
    println!("Black {black_wins} - White {}", games - black_wins);
    Ok(())
}

fn run_demo() -> Result<()> {
    println!("NoGo-MCTS: Monte Carlo Tree Search for NoGo\n");

    let board = Board::new();
    let config = SearchConfig::new(500, EXPLORATION);
    let mut rng = fastrand::Rng::with_seed(1);

    println!("Running {} simulations for black...", config.simulations);
    let outcome = tree_search(&NoGo, &board, Color::Black, &config, &mut rng)?;
    match outcome.best {
        Some(mv) => println!("Best move: {mv}"),
        None => println!("No legal move"),
    }
    println!("Root winrate: {:.1}%", outcome.root.winrate() * 100.0);
    println!("Tree nodes released: {}", outcome.root.release());
    Ok(())
}
