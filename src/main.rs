//! SpeedChess - Console Chess
//!
//! Usage:
//!     speed_chess [--fen <FEN>] [--white human|cpu] [--black human|cpu] [--depth <PLIES>]
//!
//! The board and prompts go to stdout; engine logs go to stderr and are
//! filtered with `RUST_LOG` (default `info`).

use std::io;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use speed_chess::board::{Board, STARTING_FEN};
use speed_chess::config::EngineConfig;
use speed_chess::console::{ConsoleGame, PlayerKind};
use speed_chess::score_cache::DEFAULT_CAPACITY;
use speed_chess::search::SearchEngine;

#[derive(Parser, Debug)]
#[command(name = "speed_chess", version, about = "Play chess against the SpeedChess engine")]
struct Args {
    /// Starting position in FEN
    #[arg(long, default_value = STARTING_FEN)]
    fen: String,

    /// Search depth in plies (fractions allowed)
    #[arg(long, default_value_t = 4.0)]
    depth: f64,

    /// Depth consumed by a capture or checking move
    #[arg(long, default_value_t = 0.2)]
    extension_cost: f64,

    #[arg(long, value_enum, default_value_t = PlayerKind::Human)]
    white: PlayerKind,

    #[arg(long, value_enum, default_value_t = PlayerKind::Cpu)]
    black: PlayerKind,

    /// Maximum number of cached evaluations
    #[arg(long, default_value_t = DEFAULT_CAPACITY)]
    cache_capacity: usize,

    /// End the game after this many plies
    #[arg(long)]
    max_plies: Option<usize>,
}

fn main() -> ExitCode {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let board = match Board::from_fen(&args.fen) {
        Ok(board) => board,
        Err(err) => {
            tracing::error!(fen = %args.fen, "{}", err);
            return ExitCode::FAILURE;
        }
    };

    let config = EngineConfig {
        depth: args.depth,
        extension_cost: args.extension_cost,
        cache_capacity: args.cache_capacity,
        ..EngineConfig::default()
    };
    let engine = match SearchEngine::new(config) {
        Ok(engine) => engine,
        Err(err) => {
            tracing::error!("{}", err);
            return ExitCode::FAILURE;
        }
    };

    let config = engine.config();
    tracing::info!(
        depth = config.depth,
        extension_cost = config.extension_cost,
        cache_capacity = config.cache_capacity,
        white = ?args.white,
        black = ?args.black,
        "engine ready"
    );

    let stdin = io::stdin();
    let mut game = ConsoleGame::new(
        board,
        args.white,
        args.black,
        engine,
        stdin.lock(),
        io::stdout(),
    )
    .with_max_plies(args.max_plies);

    match game.play() {
        Ok(outcome) => {
            tracing::info!(?outcome, "game finished");
            ExitCode::SUCCESS
        }
        Err(err) => {
            tracing::error!("console i/o failed: {}", err);
            ExitCode::FAILURE
        }
    }
}
