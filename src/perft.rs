use std::time::Instant;

use thiserror::Error;
use tracing::debug;

use crate::{
    move_gen::generate_all_legal_moves,
    piece::PieceType,
    position::{FenError, Position},
    r#move::Move,
};

/// Represents errors that can occur during perft (performance test) operations.
#[derive(Error, Debug)]
pub enum PerftError {
    #[error("Invalid FEN ({0}): {1}")]
    InvalidFen(String, FenError),
}

/// Returns the legal moves of the position with every pending promotion replaced by its four choices.
fn expanded_legal_moves(position: &Position) -> Vec<Move> {
    let mut moves = Vec::with_capacity(64);
    for mv in generate_all_legal_moves(position) {
        if mv.requires_promotion() {
            moves.extend(PieceType::PROMOTION_CHOICES.iter().filter_map(|&promotion| mv.with_promotion(promotion)));
        } else {
            moves.push(mv);
        }
    }
    moves
}

/// Counts the leaf nodes of the legal move tree of `position` at `depth`.
///
/// A pawn reaching the last rank counts once per promotion piece.
pub fn perft(position: &Position, depth: u16) -> u64 {
    if depth == 0 {
        return 1;
    }

    let moves = expanded_legal_moves(position);
    if depth == 1 {
        return moves.len() as u64;
    }

    moves
        .into_iter()
        .map(|mv| {
            let mut child = position.clone();
            child.make(mv);
            perft(&child, depth - 1)
        })
        .sum()
}

/// Breaks the perft count of `position` at `depth` down by root move.
pub fn divide(position: &Position, depth: u16) -> Vec<(Move, u64)> {
    if depth == 0 {
        return Vec::new();
    }

    expanded_legal_moves(position)
        .into_iter()
        .map(|mv| {
            let mut child = position.clone();
            child.make(mv);
            (mv, perft(&child, depth - 1))
        })
        .collect()
}

/// Execute a perft (performance test) on a given chess position for a specified depth.
///
/// Prints the divide view (one line per root move, in coordinate notation), the total node count, the execution time
/// and the number of nodes per second.
pub fn run_perft(fen: &str, depth: u16) -> Result<u64, PerftError> {
    let position = Position::new_from_fen(fen).map_err(|e| PerftError::InvalidFen(fen.to_string(), e))?;

    println!("Perft ({}) for position:\n\n{}\n", depth, position.to_compact_string());

    let start = Instant::now();
    let mut nodes = 0;
    for (mv, count) in divide(&position, depth) {
        println!("{}\t{}", mv.to_uci_string(), count);
        nodes += count;
    }
    let duration = start.elapsed();

    println!("\nNodes: {}", nodes);
    println!("Time: {:.3}", duration.as_secs_f64());
    println!("Nodes per second: {:.0}", nodes as f64 / duration.as_secs_f64());

    debug!(fen, depth, nodes, "perft done");
    Ok(nodes)
}
