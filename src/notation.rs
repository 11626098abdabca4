use thiserror::Error;

use crate::{
    coordinates::{CoordinatesError, Square},
    game::GameStatus,
    move_gen::generate_legal_moves_from,
    piece::{PieceError, PieceType},
    position::Position,
    r#move::{CastlingSide, Move},
};

/// Represents errors that can occur when parsing chess move notation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum NotationError {
    /// Error when the source square coordinates in the notation are invalid.
    #[error("Invalid from square: {0}")]
    InvalidFromSquare(CoordinatesError),

    /// Error when the destination square coordinates in the notation are invalid.
    #[error("Invalid to square: {0}")]
    InvalidToSquare(CoordinatesError),

    /// Error when the promotion piece letter is invalid.
    #[error("Invalid promotion piece: {0}")]
    InvalidPromotion(PieceError),

    /// Error when the overall notation format is incorrect.
    #[error("Invalid notation: {0}")]
    InvalidNotation(String),

    /// Error when there is no piece present at the specified source square.
    #[error("There is not a piece at the from square: {0}")]
    NoPieceAtFromSquare(Square),

    /// Error when the notation is well formed but does not describe a legal move.
    #[error("No legal move matches {0}")]
    NoMatchingMove(String),
}

/// Parses a chess move in coordinate notation and resolves it against the legal moves of the position.
///
/// Coordinate notation represents moves as the source square followed by the destination square, optionally followed by
/// a promotion piece (e.g., "e2e4", "e7e8q"). A pawn move to the last rank written without its promotion letter comes
/// back as a move that still requires its promotion piece.
///
/// # Errors
/// * `InvalidNotation` - If the text is not 4 or 5 characters long
/// * `InvalidFromSquare` / `InvalidToSquare` - If a square can not be read
/// * `InvalidPromotion` - If the promotion letter is not a piece letter
/// * `NoPieceAtFromSquare` - If there is no piece at the source square
/// * `NoMatchingMove` - If no legal move goes from the source to the destination with that promotion
pub fn parse_coordinate_notation(position: &Position, notation: &str) -> Result<Move, NotationError> {
    if !notation.is_ascii() || !(4..=5).contains(&notation.len()) {
        return Err(NotationError::InvalidNotation(notation.to_string()));
    }

    let from = Square::try_from(&notation[0..2]).map_err(NotationError::InvalidFromSquare)?;
    let to = Square::try_from(&notation[2..4]).map_err(NotationError::InvalidToSquare)?;

    let maybe_promotion = match notation[4..].chars().next() {
        Some(c) => Some(PieceType::try_from(c).map_err(NotationError::InvalidPromotion)?),
        None => None,
    };

    if position[from].is_none() {
        return Err(NotationError::NoPieceAtFromSquare(from));
    }

    let candidate = generate_legal_moves_from(position, from)
        .into_iter()
        .find(|mv| mv.to_square() == to)
        .ok_or_else(|| NotationError::NoMatchingMove(notation.to_string()))?;

    match maybe_promotion {
        Some(promotion) if candidate.requires_promotion() => {
            candidate.with_promotion(promotion).ok_or_else(|| NotationError::NoMatchingMove(notation.to_string()))
        }
        Some(_) => Err(NotationError::NoMatchingMove(notation.to_string())),
        None => Ok(candidate),
    }
}

/// Writes a move in simple algebraic notation, as shown in a move list.
///
/// `status_after` is the status of the position once the move is played and decides the check suffix. Moves are never
/// disambiguated: two knights reaching the same square both write `N` followed by the square.
pub fn to_simple_notation(mv: Move, status_after: GameStatus) -> String {
    let mut notation = match mv.castling_side() {
        Some(CastlingSide::Kingside) => String::from("O-O"),
        Some(CastlingSide::Queenside) => String::from("O-O-O"),
        None => {
            let mut text = String::with_capacity(8);
            let piece_type = mv.piece().piece_type();
            if piece_type != PieceType::Pawn {
                text.push(char::from(piece_type).to_ascii_uppercase());
            }
            if mv.is_capture() {
                if piece_type == PieceType::Pawn {
                    text.push(mv.from_square().file().into());
                }
                text.push('x');
            }
            text.push_str(&mv.to_square().to_string());
            if let Some(promotion) = mv.promotion() {
                text.push('=');
                text.push(char::from(promotion).to_ascii_uppercase());
            }
            text
        }
    };

    match status_after {
        GameStatus::Check => notation.push('+'),
        GameStatus::Checkmate { .. } => notation.push('#'),
        _ => {}
    }

    notation
}
