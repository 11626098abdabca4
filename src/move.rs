use std::fmt::Display;

use bitflags::bitflags;

use crate::{
    coordinates::{File, Rank, Square},
    piece::{Color, Piece, PieceType},
};

/// The two sides of the board a king can castle towards.
#[repr(u8)]
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub enum CastlingSide {
    Kingside = 0,
    Queenside = 1,
}

impl CastlingSide {
    pub const COUNT: usize = 2;

    pub const ALL: [CastlingSide; CastlingSide::COUNT] = [CastlingSide::Kingside, CastlingSide::Queenside];

    /// File the rook starts on.
    pub fn rook_from_file(self) -> File {
        match self {
            CastlingSide::Kingside => File::H,
            CastlingSide::Queenside => File::A,
        }
    }

    /// File the rook lands on.
    pub fn rook_to_file(self) -> File {
        match self {
            CastlingSide::Kingside => File::F,
            CastlingSide::Queenside => File::D,
        }
    }

    /// File the king lands on.
    pub fn king_to_file(self) -> File {
        match self {
            CastlingSide::Kingside => File::G,
            CastlingSide::Queenside => File::C,
        }
    }

    /// Files strictly between the king and the rook, which must all be empty.
    pub fn empty_files(self) -> &'static [File] {
        match self {
            CastlingSide::Kingside => &[File::F, File::G],
            CastlingSide::Queenside => &[File::B, File::C, File::D],
        }
    }

    /// Files the king starts on, crosses and lands on, which must not be attacked.
    pub fn king_path_files(self) -> &'static [File] {
        match self {
            CastlingSide::Kingside => &[File::E, File::F, File::G],
            CastlingSide::Queenside => &[File::E, File::D, File::C],
        }
    }
}

impl From<CastlingSide> for usize {
    fn from(side: CastlingSide) -> Self {
        side as usize
    }
}

bitflags! {
    /// The four independent castling rights of a position.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct CastlingRight: u8 {
        const WHITE_KINGSIDE = 0b0001;
        const WHITE_QUEENSIDE = 0b0010;
        const BLACK_KINGSIDE = 0b0100;
        const BLACK_QUEENSIDE = 0b1000;
    }
}

impl CastlingRight {
    /// Returns the right of one color to castle on one side.
    pub fn new(color: Color, side: CastlingSide) -> Self {
        match (color, side) {
            (Color::White, CastlingSide::Kingside) => CastlingRight::WHITE_KINGSIDE,
            (Color::White, CastlingSide::Queenside) => CastlingRight::WHITE_QUEENSIDE,
            (Color::Black, CastlingSide::Kingside) => CastlingRight::BLACK_KINGSIDE,
            (Color::Black, CastlingSide::Queenside) => CastlingRight::BLACK_QUEENSIDE,
        }
    }

    /// Returns both rights of a color.
    pub fn for_color(color: Color) -> Self {
        CastlingRight::new(color, CastlingSide::Kingside) | CastlingRight::new(color, CastlingSide::Queenside)
    }

    /// Returns the rights that are lost for good once a piece leaves or lands on `square`.
    ///
    /// A king leaving its home square loses both rights of its color, a rook leaving its corner loses the right of
    /// that corner, and any capture landing on a corner removes the right of the rook that stood there.
    pub fn touched_by(square: Square) -> Self {
        match (square.file(), square.rank()) {
            (File::E, Rank::R1) => CastlingRight::for_color(Color::White),
            (File::H, Rank::R1) => CastlingRight::WHITE_KINGSIDE,
            (File::A, Rank::R1) => CastlingRight::WHITE_QUEENSIDE,
            (File::E, Rank::R8) => CastlingRight::for_color(Color::Black),
            (File::H, Rank::R8) => CastlingRight::BLACK_KINGSIDE,
            (File::A, Rank::R8) => CastlingRight::BLACK_QUEENSIDE,
            _ => CastlingRight::empty(),
        }
    }
}

/// The kind of a move, with the data each kind needs to be executed.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub enum MoveType {
    /// A quiet move onto an empty square.
    Basic,

    /// A pawn advancing two squares from its home rank.
    TwoSquarePawnPush,

    /// A capture of the piece standing on the destination square.
    Capture(Piece),

    /// A pawn capture of an enemy pawn that just double-stepped past it.
    EnPassant,

    /// King and rook relocating together.
    Castling(CastlingSide),

    /// A pawn reaching the last rank before a promotion piece has been chosen.
    PromotionPending { capture: Option<Piece> },

    /// A pawn reaching the last rank and turning into `promotion`.
    Promotion { capture: Option<Piece>, promotion: PieceType },
}

/// A move of a piece from one square to another.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub struct Move {
    from_square: Square,
    to_square: Square,
    piece: Piece,
    move_type: MoveType,
}

impl Move {
    /// Creates a quiet move.
    pub fn new(from_square: Square, to_square: Square, piece: Piece) -> Self {
        Self { from_square, to_square, piece, move_type: MoveType::Basic }
    }

    /// Creates a capture of `capture`, standing on the destination square.
    pub fn new_capture(from_square: Square, to_square: Square, piece: Piece, capture: Piece) -> Self {
        Self { from_square, to_square, piece, move_type: MoveType::Capture(capture) }
    }

    /// Creates a two-square pawn push.
    pub fn new_two_square_pawn_push(from_square: Square, to_square: Square, piece: Piece) -> Self {
        Self { from_square, to_square, piece, move_type: MoveType::TwoSquarePawnPush }
    }

    /// Creates an en passant capture.
    pub fn new_en_passant(from_square: Square, to_square: Square, piece: Piece) -> Self {
        Self { from_square, to_square, piece, move_type: MoveType::EnPassant }
    }

    /// Creates a castling move. The squares are the king's.
    pub fn new_castling(from_square: Square, to_square: Square, piece: Piece, side: CastlingSide) -> Self {
        Self { from_square, to_square, piece, move_type: MoveType::Castling(side) }
    }

    /// Creates a pawn move to the last rank that still waits for its promotion piece.
    pub fn new_promotion_pending(from_square: Square, to_square: Square, piece: Piece, capture: Option<Piece>) -> Self {
        Self { from_square, to_square, piece, move_type: MoveType::PromotionPending { capture } }
    }

    /// Creates a promotion move.
    pub fn new_promotion(
        from_square: Square,
        to_square: Square,
        piece: Piece,
        capture: Option<Piece>,
        promotion: PieceType,
    ) -> Self {
        Self { from_square, to_square, piece, move_type: MoveType::Promotion { capture, promotion } }
    }

    pub fn from_square(&self) -> Square {
        self.from_square
    }

    pub fn to_square(&self) -> Square {
        self.to_square
    }

    /// Returns the piece that is moving, as it stood before the move.
    pub fn piece(&self) -> Piece {
        self.piece
    }

    pub fn move_type(&self) -> MoveType {
        self.move_type
    }

    /// Returns the piece removed from the destination square, if any. En passant captures remove a pawn from another
    /// square and report `None` here.
    pub fn captured_piece(&self) -> Option<Piece> {
        match self.move_type {
            MoveType::Capture(capture) => Some(capture),
            MoveType::PromotionPending { capture } | MoveType::Promotion { capture, .. } => capture,
            _ => None,
        }
    }

    pub fn is_capture(&self) -> bool {
        self.move_type == MoveType::EnPassant || self.captured_piece().is_some()
    }

    pub fn is_en_passant(&self) -> bool {
        self.move_type == MoveType::EnPassant
    }

    pub fn castling_side(&self) -> Option<CastlingSide> {
        match self.move_type {
            MoveType::Castling(side) => Some(side),
            _ => None,
        }
    }

    pub fn is_castle_kingside(&self) -> bool {
        self.castling_side() == Some(CastlingSide::Kingside)
    }

    pub fn is_castle_queenside(&self) -> bool {
        self.castling_side() == Some(CastlingSide::Queenside)
    }

    /// Returns the chosen promotion piece type, if any.
    pub fn promotion(&self) -> Option<PieceType> {
        match self.move_type {
            MoveType::Promotion { promotion, .. } => Some(promotion),
            _ => None,
        }
    }

    /// Returns whether the move reaches the last rank and still needs a promotion piece.
    pub fn requires_promotion(&self) -> bool {
        matches!(self.move_type, MoveType::PromotionPending { .. })
    }

    /// Returns the same promotion move with `promotion` as the chosen piece type.
    ///
    /// Returns `None` when the move is not a promotion or when `promotion` is not a piece a pawn can turn into.
    pub fn with_promotion(self, promotion: PieceType) -> Option<Move> {
        if !promotion.is_promotion_choice() {
            return None;
        }

        match self.move_type {
            MoveType::PromotionPending { capture } | MoveType::Promotion { capture, .. } => Some(Move {
                move_type: MoveType::Promotion { capture, promotion },
                ..self
            }),
            _ => None,
        }
    }

    /// Returns whether both moves take the same kind of piece between the same squares. The moved marker of the
    /// pieces and the move type are not compared.
    pub fn same_route(&self, other: &Move) -> bool {
        self.from_square == other.from_square
            && self.to_square == other.to_square
            && self.piece.color() == other.piece.color()
            && self.piece.piece_type() == other.piece.piece_type()
    }

    /// Returns the move in coordinate notation ("e2e4", "e7e8q").
    pub fn to_uci_string(&self) -> String {
        match self.promotion() {
            Some(promotion) => format!(
                "{}{}{}",
                self.from_square,
                self.to_square,
                char::from(promotion).to_ascii_lowercase()
            ),
            None => format!("{}{}", self.from_square, self.to_square),
        }
    }
}

impl Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_uci_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod castling_tests {
        use super::*;

        #[test]
        fn test_castling_right_per_color_and_side() {
            assert_eq!(CastlingRight::new(Color::White, CastlingSide::Kingside), CastlingRight::WHITE_KINGSIDE);
            assert_eq!(CastlingRight::new(Color::Black, CastlingSide::Queenside), CastlingRight::BLACK_QUEENSIDE);
            assert_eq!(
                CastlingRight::for_color(Color::Black),
                CastlingRight::BLACK_KINGSIDE | CastlingRight::BLACK_QUEENSIDE
            );
        }

        #[test]
        fn test_touched_squares() {
            assert_eq!(CastlingRight::touched_by(Square::E1), CastlingRight::for_color(Color::White));
            assert_eq!(CastlingRight::touched_by(Square::H8), CastlingRight::BLACK_KINGSIDE);
            assert_eq!(CastlingRight::touched_by(Square::A1), CastlingRight::WHITE_QUEENSIDE);
            assert_eq!(CastlingRight::touched_by(Square::E4), CastlingRight::empty());
        }
    }

    mod move_tests {
        use super::*;

        #[test]
        fn test_new_quiet_move() {
            let quiet_move = Move::new(Square::D2, Square::D3, Piece::WHITE_PAWN);
            assert_eq!(quiet_move.from_square(), Square::D2);
            assert_eq!(quiet_move.to_square(), Square::D3);
            assert_eq!(quiet_move.piece(), Piece::WHITE_PAWN);
            assert_eq!(quiet_move.move_type(), MoveType::Basic);
            assert!(!quiet_move.is_capture());
            assert!(!quiet_move.requires_promotion());
        }

        #[test]
        fn test_capture_flags() {
            let capture = Move::new_capture(Square::D4, Square::E6, Piece::WHITE_KNIGHT, Piece::BLACK_PAWN);
            assert!(capture.is_capture());
            assert_eq!(capture.captured_piece(), Some(Piece::BLACK_PAWN));

            let en_passant = Move::new_en_passant(Square::D5, Square::E6, Piece::WHITE_PAWN);
            assert!(en_passant.is_capture());
            assert!(en_passant.is_en_passant());
            assert_eq!(en_passant.captured_piece(), None);
        }

        #[test]
        fn test_castling_flags() {
            let kingside = Move::new_castling(Square::E1, Square::G1, Piece::WHITE_KING, CastlingSide::Kingside);
            assert!(kingside.is_castle_kingside());
            assert!(!kingside.is_castle_queenside());
            assert!(!kingside.is_capture());
        }

        #[test]
        fn test_promotion_choice() {
            let pending =
                Move::new_promotion_pending(Square::B7, Square::A8, Piece::WHITE_PAWN, Some(Piece::BLACK_ROOK));
            assert!(pending.requires_promotion());
            assert_eq!(pending.promotion(), None);
            assert!(pending.is_capture());

            let queen = pending.with_promotion(PieceType::Queen).unwrap();
            assert!(!queen.requires_promotion());
            assert_eq!(queen.promotion(), Some(PieceType::Queen));
            assert_eq!(queen.captured_piece(), Some(Piece::BLACK_ROOK));
            assert_eq!(queen.to_uci_string(), "b7a8q");

            assert_eq!(pending.with_promotion(PieceType::King), None);
            assert_eq!(Move::new(Square::E2, Square::E3, Piece::WHITE_PAWN).with_promotion(PieceType::Queen), None);
        }

        #[test]
        fn test_same_route_ignores_moved_marker() {
            let fresh = Move::new(Square::F3, Square::G5, Piece::WHITE_KNIGHT);
            let moved = Move::new_capture(Square::F3, Square::G5, Piece::WHITE_KNIGHT.moved(), Piece::BLACK_PAWN);
            assert!(fresh.same_route(&moved));
            assert!(!fresh.same_route(&Move::new(Square::F3, Square::G5, Piece::WHITE_BISHOP)));
            assert!(!fresh.same_route(&Move::new(Square::F3, Square::H4, Piece::WHITE_KNIGHT)));
        }

        #[test]
        fn test_uci_string() {
            assert_eq!(Move::new(Square::G1, Square::F3, Piece::WHITE_KNIGHT).to_uci_string(), "g1f3");
            assert_eq!(format!("{}", Move::new(Square::E7, Square::E5, Piece::BLACK_PAWN)), "e7e5");
        }
    }
}
