use std::ops::Index;

use thiserror::Error;

use crate::{
    coordinates::{File, Rank, Square},
    move_gen::attacks,
    piece::{Color, Piece, PieceType},
    r#move::{CastlingRight, Move, MoveType},
};

/// Error type for parsing a FEN (Forsyth-Edwards Notation) string.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FenError {
    #[error("Missing FEN field: {0}")]
    MissingField(&'static str),

    #[error("Invalid piece placement: {0}")]
    InvalidPiecePlacement(String),

    #[error("Invalid active color: \"{0}\"")]
    InvalidActiveColor(String),

    #[error("Invalid castling availability: \"{0}\"")]
    InvalidCastlingAvailability(String),

    #[error("Invalid en passant square: \"{0}\"")]
    InvalidEnPassantSquare(String),

    #[error("Invalid halfmove clock: \"{0}\"")]
    InvalidHalfmoveClock(String),

    #[error("Invalid fullmove number: \"{0}\"")]
    InvalidFullmoveNumber(String),

    #[error("{color} must have exactly one king, found {count}")]
    InvalidKingCount { color: Color, count: usize },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct GameState {
    side_to_move: Color,
    castling_rights: CastlingRight,
    en_passant_square: Option<Square>,
    halfmove_clock: u16,
    fullmove_number: u16,
}

impl Default for GameState {
    fn default() -> Self {
        Self {
            side_to_move: Color::White,
            castling_rights: CastlingRight::empty(),
            en_passant_square: None,
            halfmove_clock: 0,
            fullmove_number: 1,
        }
    }
}

/// A chess position: the board and everything needed to continue the game from it.
///
/// `Position` is a plain value. Copying it is how moves are simulated and how the game keeps its undo snapshots.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Position {
    board: [Option<Piece>; Square::COUNT],
    state: GameState,
}

impl Position {
    pub const INITIAL_FEN: &'static str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

    fn read_piece_placement(&mut self, piece_placement: &str) -> Result<(), FenError> {
        let ranks: Vec<&str> = piece_placement.split('/').collect();
        if ranks.len() != Rank::COUNT {
            return Err(FenError::InvalidPiecePlacement(format!("expected 8 ranks, found {}", ranks.len())));
        }

        for (rank, row) in Rank::ALL.iter().rev().zip(ranks) {
            let mut file_index: usize = 0;
            for c in row.chars() {
                if let Some(number) = c.to_digit(10) {
                    if !(1..=8).contains(&number) {
                        return Err(FenError::InvalidPiecePlacement(format!("invalid empty square count '{c}'")));
                    }
                    file_index += number as usize;
                } else {
                    let piece = Piece::try_from(c).map_err(|e| FenError::InvalidPiecePlacement(e.to_string()))?;
                    if file_index >= File::COUNT {
                        return Err(FenError::InvalidPiecePlacement(format!("rank {rank} is longer than 8 files")));
                    }
                    self.put_piece(piece, Square::new(File::from(file_index as u8), *rank));
                    file_index += 1;
                }

                if file_index > File::COUNT {
                    return Err(FenError::InvalidPiecePlacement(format!("rank {rank} is longer than 8 files")));
                }
            }

            if file_index != File::COUNT {
                return Err(FenError::InvalidPiecePlacement(format!("rank {rank} is shorter than 8 files")));
            }
        }

        for color in Color::ALL {
            let count = self.board.iter().flatten().filter(|piece| piece.is(color, PieceType::King)).count();
            if count != 1 {
                return Err(FenError::InvalidKingCount { color, count });
            }
        }

        Ok(())
    }

    fn read_active_color(&mut self, active_color: &str) -> Result<(), FenError> {
        self.state.side_to_move = match active_color {
            "w" => Color::White,
            "b" => Color::Black,
            _ => return Err(FenError::InvalidActiveColor(active_color.to_string())),
        };
        Ok(())
    }

    fn read_castling(&mut self, castling_availability: &str) -> Result<(), FenError> {
        if castling_availability == "-" {
            return Ok(());
        }

        for c in castling_availability.chars() {
            self.state.castling_rights |= match c {
                'K' => CastlingRight::WHITE_KINGSIDE,
                'Q' => CastlingRight::WHITE_QUEENSIDE,
                'k' => CastlingRight::BLACK_KINGSIDE,
                'q' => CastlingRight::BLACK_QUEENSIDE,
                _ => return Err(FenError::InvalidCastlingAvailability(castling_availability.to_string())),
            };
        }
        Ok(())
    }

    fn read_en_passant_square(&mut self, en_passant_square: &str) -> Result<(), FenError> {
        self.state.en_passant_square = match en_passant_square {
            "-" => None,
            _ => {
                let square = Square::try_from(en_passant_square)
                    .map_err(|_| FenError::InvalidEnPassantSquare(en_passant_square.to_string()))?;
                if square.rank() != Rank::R3 && square.rank() != Rank::R6 {
                    return Err(FenError::InvalidEnPassantSquare(en_passant_square.to_string()));
                }
                Some(square)
            }
        };
        Ok(())
    }

    /// Creates a new chess position from a FEN (Forsyth-Edwards Notation) string.
    ///
    /// A FEN string contains 6 fields separated by spaces:
    ///
    /// 1. Piece placement: Each rank is described from 8 to 1, separated by '/'. Letters represent
    ///    pieces (P=pawn, N=knight, B=bishop, R=rook, Q=queen, K=king). Uppercase is white,
    ///    lowercase is black. Numbers represent empty squares.
    ///
    /// 2. Active color: "w" means White moves next, "b" means Black moves next.
    ///
    /// 3. Castling availability: Combination of "K"(white kingside), "Q"(white queenside),
    ///    "k"(black kingside), "q"(black queenside), or "-" if no castling is possible.
    ///
    /// 4. En passant target square: The square a pawn just jumped over, or "-".
    ///
    /// 5. Halfmove clock: Number of halfmoves since the last pawn advance or piece capture.
    ///
    /// 6. Fullmove number: Starts at 1 and increments after Black's move.
    ///
    /// The first two fields are required. The others default to "-", "-", "0" and "1". Every piece
    /// read from a FEN string is considered unmoved.
    pub fn new_from_fen(fen: &str) -> Result<Self, FenError> {
        let mut position = Position::default();

        let mut fields = fen.split_whitespace();
        position.read_piece_placement(fields.next().ok_or(FenError::MissingField("piece placement"))?)?;
        position.read_active_color(fields.next().ok_or(FenError::MissingField("active color"))?)?;
        position.read_castling(fields.next().unwrap_or("-"))?;
        position.read_en_passant_square(fields.next().unwrap_or("-"))?;

        let halfmove_clock = fields.next().unwrap_or("0");
        position.state.halfmove_clock =
            halfmove_clock.parse().map_err(|_| FenError::InvalidHalfmoveClock(halfmove_clock.to_string()))?;

        let fullmove_number = fields.next().unwrap_or("1");
        position.state.fullmove_number = match fullmove_number.parse() {
            Ok(number) if number >= 1 => number,
            _ => return Err(FenError::InvalidFullmoveNumber(fullmove_number.to_string())),
        };

        Ok(position)
    }

    /// Creates a new chess position with the standard initial board setup.
    pub fn new() -> Self {
        Self::new_from_fen(Self::INITIAL_FEN)
            .expect("This can not fail because the INITIAL_FEN will always be successfully parsed.")
    }

    fn write_piece_placement(&self) -> String {
        let mut result = String::with_capacity(70);
        for rank in Rank::ALL.iter().rev() {
            let mut empty_count = 0;
            for file in File::ALL {
                if let Some(piece) = self[Square::new(file, *rank)] {
                    if empty_count > 0 {
                        result.push_str(&empty_count.to_string());
                        empty_count = 0;
                    }
                    result.push(piece.into());
                } else {
                    empty_count += 1;
                }
            }
            if empty_count > 0 {
                result.push_str(&empty_count.to_string());
            }
            if rank != &Rank::R1 {
                result.push('/');
            }
        }
        result
    }

    fn write_castling(&self) -> String {
        let rights = self.castling_availability();
        if rights.is_empty() {
            return String::from("-");
        }

        [
            (CastlingRight::WHITE_KINGSIDE, 'K'),
            (CastlingRight::WHITE_QUEENSIDE, 'Q'),
            (CastlingRight::BLACK_KINGSIDE, 'k'),
            (CastlingRight::BLACK_QUEENSIDE, 'q'),
        ]
        .iter()
        .filter(|(right, _)| rights.contains(*right))
        .map(|(_, c)| *c)
        .collect()
    }

    /// Returns the FEN (Forsyth-Edwards Notation) representation of the position.
    pub fn to_fen(&self) -> String {
        format!(
            "{} {} {} {} {} {}",
            self.write_piece_placement(),
            char::from(self.side_to_move()),
            self.write_castling(),
            self.en_passant_square().map_or_else(|| String::from("-"), |square| square.to_string()),
            self.state.halfmove_clock,
            self.state.fullmove_number
        )
    }

    fn render(&self, glyph: impl Fn(Piece) -> char) -> String {
        let mut board = String::with_capacity(171);
        for rank in Rank::ALL.iter().rev() {
            board.push_str(&format!("{}  ", rank));
            for file in File::ALL {
                match self[Square::new(file, *rank)] {
                    Some(piece) => board.push(glyph(piece)),
                    None => board.push('.'),
                }
                if file != File::H {
                    board.push(' ');
                } else {
                    board.push('\n');
                }
            }
        }
        board.push_str("   a b c d e f g h");

        board
    }

    /// Generates a compact string representation of the current chess position.
    ///
    /// The board is displayed from white's perspective with rank numbers on the left edge and file letters on the
    /// bottom. Empty squares are represented by dots.
    ///
    /// ```text
    /// 8  r n b q k b n r
    /// 7  p p p p p p p p
    /// 6  . . . . . . . .
    /// 5  . . . . . . . .
    /// 4  . . . . . . . .
    /// 3  . . . . . . . .
    /// 2  P P P P P P P P
    /// 1  R N B Q K B N R
    ///    a b c d e f g h
    /// ```
    pub fn to_compact_string(&self) -> String {
        self.render(|piece| char::from(piece))
    }

    /// Same layout as [`Position::to_compact_string`], with chess glyphs instead of letters.
    pub fn to_unicode_string(&self) -> String {
        self.render(|piece| piece.unicode())
    }

    pub fn side_to_move(&self) -> Color {
        self.state.side_to_move
    }

    pub fn castling_availability(&self) -> CastlingRight {
        self.state.castling_rights
    }

    pub fn en_passant_square(&self) -> Option<Square> {
        self.state.en_passant_square
    }

    pub fn halfmove_clock(&self) -> u16 {
        self.state.halfmove_clock
    }

    pub fn fullmove_number(&self) -> u16 {
        self.state.fullmove_number
    }

    /// Returns the square of the king of the given color.
    ///
    /// # Panics
    /// Panics if there is no king of that color. Positions read from FEN always have one.
    pub fn king_square(&self, color: Color) -> Square {
        Square::ALL
            .into_iter()
            .find(|&square| self[square].is_some_and(|piece| piece.is(color, PieceType::King)))
            .expect("There should always be a king of each color on the board.")
    }

    /// Puts a piece on a square, replacing whatever stood there.
    pub fn put_piece(&mut self, piece: Piece, square: Square) {
        self.board[usize::from(square)] = Some(piece);
    }

    /// Removes and returns the piece on a square.
    pub fn remove_piece(&mut self, square: Square) -> Option<Piece> {
        self.board[usize::from(square)].take()
    }

    /// Moves the piece on `from` to `to`, marking it as moved. Returns the piece that stood on `to`, if any.
    pub fn move_piece(&mut self, from: Square, to: Square) -> Option<Piece> {
        let captured = self.remove_piece(to);
        if let Some(piece) = self.remove_piece(from) {
            self.put_piece(piece.moved(), to);
        }
        captured
    }

    /// Returns whether a piece of color `by` attacks `square`.
    pub fn is_attacked(&self, square: Square, by: Color) -> bool {
        attacks::is_attacked(self, square, by)
    }

    /// Returns whether the king of `color` is attacked.
    pub fn is_check(&self, color: Color) -> bool {
        self.is_attacked(self.king_square(color), !color)
    }

    /// Executes a move on the board and updates the game state.
    ///
    /// The move is trusted: it is neither validated nor recorded. A `PromotionPending` move leaves the pawn on the
    /// last rank, which is enough for king safety checks.
    pub fn make(&mut self, mv: Move) {
        let color = mv.piece().color();
        let piece_type = mv.piece().piece_type();

        if piece_type == PieceType::Pawn || mv.is_capture() {
            self.state.halfmove_clock = 0;
        } else {
            self.state.halfmove_clock = self.state.halfmove_clock.saturating_add(1);
        }

        match mv.move_type() {
            MoveType::EnPassant => {
                self.remove_piece(Square::new(mv.to_square().file(), mv.from_square().rank()));
            }
            MoveType::Castling(side) => {
                let rank = mv.from_square().rank();
                self.move_piece(Square::new(side.rook_from_file(), rank), Square::new(side.rook_to_file(), rank));
            }
            _ => {}
        }

        self.move_piece(mv.from_square(), mv.to_square());

        if let Some(promotion) = mv.promotion() {
            self.put_piece(Piece::new(color, promotion).moved(), mv.to_square());
        }

        let mut lost_rights = CastlingRight::touched_by(mv.from_square()) | CastlingRight::touched_by(mv.to_square());
        if piece_type == PieceType::King {
            lost_rights |= CastlingRight::for_color(color);
        }
        self.state.castling_rights &= !lost_rights;

        self.state.en_passant_square = match mv.move_type() {
            MoveType::TwoSquarePawnPush => mv.from_square().up(color.forward()).ok(),
            _ => None,
        };

        self.state.side_to_move = !self.state.side_to_move;
        if self.state.side_to_move == Color::White {
            self.state.fullmove_number = self.state.fullmove_number.saturating_add(1);
        }
    }
}

impl Default for Position {
    /// An empty board, White to move, no castling rights.
    fn default() -> Self {
        Self { board: [None; Square::COUNT], state: GameState::default() }
    }
}

impl Index<Square> for Position {
    type Output = Option<Piece>;
    fn index(&self, index: Square) -> &Self::Output {
        &self.board[usize::from(index)]
    }
}
