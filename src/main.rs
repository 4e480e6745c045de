use anyhow::Context;
use checkers_core::engine::config::EngineConfig;
use checkers_core::engine::search::AlphaBetaEngine;
use checkers_core::logic::board::{Board, Color, Turn};
use checkers_core::logic::game::{GameState, Seats};
use clap::{Parser, ValueEnum};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

mod app;
mod ui;

use app::App;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Side {
    Red,
    Black,
}

impl From<Side> for Color {
    fn from(side: Side) -> Self {
        match side {
            Side::Red => Self::Red,
            Side::Black => Self::Black,
        }
    }
}

/// Play checkers against an alpha-beta engine in the terminal.
#[derive(Debug, Parser)]
#[command(name = "checkers", version)]
struct Args {
    /// Engine configuration as JSON; missing fields keep their defaults
    #[arg(long)]
    config: Option<PathBuf>,

    /// Search depth in plies, overrides the config file
    #[arg(long)]
    depth: Option<u8>,

    /// Seed for the color draw and the engine's tie-breaks
    #[arg(long)]
    seed: Option<u64>,

    /// Color the engine plays (random when omitted)
    #[arg(long, value_enum)]
    engine_color: Option<Side>,

    /// Start from this position instead of the opening (rows 1 to 8, '/' separated)
    #[arg(long)]
    position: Option<String>,

    /// Turn number of the starting position; even turns are Red's
    #[arg(long, default_value_t = 0)]
    turn: u32,
}

fn load_config(args: &Args) -> anyhow::Result<EngineConfig> {
    let mut config = match &args.config {
        Some(path) => EngineConfig::load_from_file(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => EngineConfig::default(),
    };
    if let Some(depth) = args.depth {
        config.search_depth = depth;
    }
    config.validate()?;
    Ok(config)
}

fn main() -> anyhow::Result<()> {
    // initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let config = load_config(&args)?;
    let config_json = serde_json::to_string(&config)?;
    tracing::debug!(config = %config_json, "engine configuration");

    let board = match &args.position {
        Some(fen) => Board::from_fen(fen).context("parsing --position")?,
        None => Board::new(),
    };
    let game = GameState::from_position(board, Turn(args.turn));

    let mut rng = args
        .seed
        .map_or_else(StdRng::from_entropy, StdRng::seed_from_u64);
    let seats = args
        .engine_color
        .map_or_else(|| Seats::random(&mut rng), |side| Seats::with_engine(side.into()));
    tracing::info!(engine = %seats.engine, human = %seats.human, "seats assigned");

    let engine = AlphaBetaEngine::new(Arc::new(config), rng);
    let stdin = io::stdin();
    let mut app = App::new(stdin.lock(), io::stdout(), game, seats, engine);
    app.run()
}
