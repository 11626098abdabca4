use std::{collections::VecDeque, fmt::Display};

use thiserror::Error;
use tracing::{debug, trace};

use crate::{
    config::GameConfig,
    coordinates::Square,
    move_gen::{generate_all_legal_moves, generate_legal_moves_from},
    notation::to_simple_notation,
    piece::{Color, Piece, PieceType},
    position::{FenError, Position},
    r#move::Move,
};

/// Errors returned by the game when a request can not be honored.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GameError {
    #[error("Invalid position: {0}")]
    InvalidPosition(#[from] FenError),

    #[error("The move {0} needs a promotion piece")]
    PromotionRequired(Move),

    #[error("Illegal move: {0}")]
    IllegalMove(Move),
}

/// The state of the game from the point of view of the side to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    Ok,
    Check,
    Checkmate { winner: Color },
    Stalemate,
}

impl GameStatus {
    /// Returns whether the game is over.
    pub fn is_terminal(&self) -> bool {
        matches!(self, GameStatus::Checkmate { .. } | GameStatus::Stalemate)
    }
}

impl Display for GameStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameStatus::Ok => write!(f, "Ok"),
            GameStatus::Check => write!(f, "Check"),
            GameStatus::Checkmate { winner } => write!(f, "Checkmate, {} wins", winner),
            GameStatus::Stalemate => write!(f, "Stalemate"),
        }
    }
}

/// The position before a move and the move that was played from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub snapshot: Position,
    pub mv: Move,
}

/// Classifies a position for its side to move.
pub(crate) fn classify(position: &Position) -> GameStatus {
    let side_to_move = position.side_to_move();
    let in_check = position.is_check(side_to_move);
    let has_moves = !generate_all_legal_moves(position).is_empty();

    match (has_moves, in_check) {
        (true, false) => GameStatus::Ok,
        (true, true) => GameStatus::Check,
        (false, true) => GameStatus::Checkmate { winner: !side_to_move },
        (false, false) => GameStatus::Stalemate,
    }
}

/// A game of chess between two local players.
///
/// The game owns the current position and the undo history. Every move it accepts is checked against the legal moves
/// of the position, so the position always stays reachable by legal play from the last loaded position.
#[derive(Debug, Clone)]
pub struct Game {
    position: Position,
    history: VecDeque<HistoryEntry>,
    history_limit: Option<usize>,
}

impl Game {
    /// Creates a game at the standard starting position with an unbounded history.
    pub fn new() -> Self {
        Self::with_config(&GameConfig::default())
    }

    /// Creates a game at the standard starting position.
    pub fn with_config(config: &GameConfig) -> Self {
        Self { position: Position::new(), history: VecDeque::new(), history_limit: config.history_limit }
    }

    /// Creates a game from a FEN string.
    pub fn from_fen(fen: &str) -> Result<Self, GameError> {
        let mut game = Self::new();
        game.load_position(fen)?;
        Ok(game)
    }

    /// Goes back to the standard starting position and forgets the history.
    pub fn reset(&mut self) {
        self.position = Position::new();
        self.history.clear();
        debug!(fen = %self.position.to_fen(), "game reset");
    }

    /// Replaces the position with the one described by `fen` and forgets the history.
    ///
    /// On error the game is left exactly as it was.
    pub fn load_position(&mut self, fen: &str) -> Result<(), GameError> {
        let position = Position::new_from_fen(fen)?;
        self.position = position;
        self.history.clear();
        debug!(fen, "position loaded");
        Ok(())
    }

    pub fn position(&self) -> &Position {
        &self.position
    }

    /// Returns the piece on a square, if any.
    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.position[square]
    }

    pub fn side_to_move(&self) -> Color {
        self.position.side_to_move()
    }

    /// Returns whether a piece of color `by` attacks `square`. Pawns attack both diagonals, occupied or not.
    pub fn is_square_attacked(&self, square: Square, by: Color) -> bool {
        self.position.is_attacked(square, by)
    }

    /// Returns whether the king of `color` is attacked.
    pub fn in_check(&self, color: Color) -> bool {
        self.position.is_check(color)
    }

    /// Returns the legal moves of the piece on `square`. Empty when the square is empty or holds a piece of the side
    /// not to move.
    pub fn legal_moves_from(&self, square: Square) -> Vec<Move> {
        generate_legal_moves_from(&self.position, square)
    }

    /// Returns every legal move of the side to move.
    pub fn all_legal_moves(&self) -> Vec<Move> {
        generate_all_legal_moves(&self.position)
    }

    /// Plays a move.
    ///
    /// The move is matched against the legal moves by its squares and piece, so a hand built move is accepted even
    /// when the moved marker of its piece differs from the board. The generated move is the one played and recorded.
    /// A pawn reaching the last rank must carry its promotion piece: otherwise the move is refused with
    /// [`GameError::PromotionRequired`].
    pub fn apply_move(&mut self, mv: Move) -> Result<(), GameError> {
        let legal = self.legal_moves_from(mv.from_square()).into_iter().find(|legal| legal.same_route(&mv));

        let resolved = match (legal, mv.promotion()) {
            (Some(legal), Some(promotion)) => legal.with_promotion(promotion),
            (Some(legal), None) if legal.requires_promotion() => return Err(GameError::PromotionRequired(mv)),
            (Some(legal), None) => Some(legal),
            (None, _) => None,
        };

        let Some(mv) = resolved else {
            trace!(%mv, fen = %self.position.to_fen(), "illegal move refused");
            return Err(GameError::IllegalMove(mv));
        };

        let snapshot = self.position.clone();
        self.position.make(mv);
        self.history.push_back(HistoryEntry { snapshot, mv });

        if let Some(limit) = self.history_limit {
            while self.history.len() > limit {
                self.history.pop_front();
            }
        }

        debug!(%mv, fen = %self.position.to_fen(), "move applied");
        Ok(())
    }

    /// Plays a move that needs a promotion piece, with `promotion` as the chosen piece.
    pub fn apply_move_with_promotion(&mut self, mv: Move, promotion: PieceType) -> Result<(), GameError> {
        let promoted = mv.with_promotion(promotion).ok_or(GameError::IllegalMove(mv))?;
        self.apply_move(promoted)
    }

    /// Takes back the last move and returns it, or `None` when there is nothing to undo.
    pub fn undo(&mut self) -> Option<Move> {
        let entry = self.history.pop_back()?;
        self.position = entry.snapshot;
        debug!(mv = %entry.mv, fen = %self.position.to_fen(), "move undone");
        Some(entry.mv)
    }

    /// Classifies the current position for the side to move.
    pub fn status(&self) -> GameStatus {
        let status = classify(&self.position);
        if status.is_terminal() {
            debug!(%status, fen = %self.position.to_fen(), "game over");
        }
        status
    }

    /// Returns the moves that can still be undone, oldest first.
    pub fn history(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.history.iter()
    }

    /// Returns the moves that can still be undone in simple algebraic notation, oldest first.
    pub fn move_list(&self) -> Vec<String> {
        let afters = self.history.iter().skip(1).map(|entry| &entry.snapshot).chain(std::iter::once(&self.position));
        self.history.iter().zip(afters).map(|(entry, after)| to_simple_notation(entry.mv, classify(after))).collect()
    }

    /// Returns the FEN representation of the current position.
    pub fn to_fen(&self) -> String {
        self.position.to_fen()
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}
