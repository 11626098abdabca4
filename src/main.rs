use clap::Parser;
use neon_chess::{
    config::{self, GameConfig},
    coordinates::{CoordinatesError, Square},
    notation::{parse_coordinate_notation, NotationError},
    perft::{run_perft, PerftError},
    Game, GameError,
};
use thiserror::Error;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Error, Debug)]
enum NeonChessError {
    #[error("Configuration error: {0}")]
    ConfigError(#[from] config::ConfigError),

    #[error("Error during the perft command: {0}")]
    PerftError(#[from] PerftError),

    #[error("{0}")]
    GameError(#[from] GameError),

    #[error("Unable to read the move: {0}")]
    NotationError(#[from] NotationError),

    #[error("Unable to read the square: {0}")]
    SquareError(#[from] CoordinatesError),
}

mod arguments {
    use std::path::PathBuf;

    use clap::{Parser, Subcommand};
    use neon_chess::position::Position;

    /// A two player chess rule engine
    #[derive(Parser)]
    #[command(
        name = "neon_chess",
        version = "0.1.0",
        about = "A two player chess rule engine",
        subcommand_negates_reqs = true // This allows the user to run the program without any subcommands
    )]
    pub struct NeonChessArgs {
        /// Configuration file
        #[arg(short, long, global = true)]
        pub config: Option<PathBuf>,

        #[command(subcommand)]
        pub command: Option<Commands>,
    }

    #[derive(Debug, Clone, Subcommand)]
    pub enum Commands {
        /// List the legal moves of a position
        Moves {
            /// FEN string representing the position
            #[arg(short, long, default_value = Position::INITIAL_FEN)]
            fen: String,

            /// Only list the moves of the piece on this square
            #[arg(short, long)]
            square: Option<String>,
        },

        /// Play moves in coordinate notation and show the resulting game (default command)
        Play {
            /// FEN string representing the starting position
            #[arg(short, long)]
            fen: Option<String>,

            /// Moves to play, e.g. e2e4 e7e5 g1f3
            moves: Vec<String>,
        },

        /// Calculate the perft of a position
        Perft {
            /// The depth to calculate the perft
            #[arg(short, long)]
            depth: u16,

            /// FEN string representing the position to calculate the perft
            #[arg(short, long, default_value = Position::INITIAL_FEN)]
            fen: String,
        },
    }
}

fn init_tracing(config: &GameConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_filter));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn list_moves(fen: &str, square: Option<&str>) -> Result<(), NeonChessError> {
    let game = Game::from_fen(fen)?;
    let moves = match square {
        Some(square) => game.legal_moves_from(Square::try_from(square)?),
        None => game.all_legal_moves(),
    };

    for mv in &moves {
        if mv.requires_promotion() {
            println!("{} (promotion)", mv);
        } else {
            println!("{}", mv);
        }
    }
    println!("\n{} moves", moves.len());

    Ok(())
}

fn play(config: &GameConfig, fen: Option<&str>, moves: &[String]) -> Result<(), NeonChessError> {
    let mut game = Game::with_config(config);
    if let Some(fen) = fen {
        game.load_position(fen)?;
    }

    for text in moves {
        let mv = parse_coordinate_notation(game.position(), text)?;
        game.apply_move(mv)?;
    }

    println!("{}\n", game.position().to_unicode_string());
    if !game.move_list().is_empty() {
        println!("Moves: {}", game.move_list().join(" "));
    }
    println!("FEN: {}", game.to_fen());
    println!("Status: {}", game.status());

    Ok(())
}

fn run() -> Result<(), NeonChessError> {
    // Parse command line arguments
    let args = arguments::NeonChessArgs::parse();

    let config = config::load(args.config)?;
    init_tracing(&config);

    // Run the command
    match args.command.unwrap_or(arguments::Commands::Play { fen: None, moves: Vec::new() }) {
        arguments::Commands::Moves { fen, square } => list_moves(&fen, square.as_deref())?,
        arguments::Commands::Play { fen, moves } => play(&config, fen.as_deref(), &moves)?,
        arguments::Commands::Perft { depth, fen } => {
            run_perft(&fen, depth)?;
        }
    }

    Ok(())
}

/// Main entry point for the neon_chess command line.
fn main() {
    if let Err(e) = run() {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
