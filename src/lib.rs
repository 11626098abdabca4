pub mod config;
pub mod coordinates;
pub mod game;
pub mod r#move;
pub mod move_gen;
pub mod notation;
pub mod perft;
pub mod piece;
pub mod position;

pub use game::{Game, GameError, GameStatus};
