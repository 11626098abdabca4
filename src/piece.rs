use std::convert::From;
use std::fmt::Display;

use thiserror::Error;

/// Represents the color of a chess piece.
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Color {
    White = 0,
    Black = 1,
}

impl Color {
    pub const COUNT: usize = 2;

    /// Represents all colors of chess pieces.
    pub const ALL: [Color; Color::COUNT] = [Color::White, Color::Black];

    /// Returns the rank direction pawns of this color advance in.
    pub fn forward(self) -> i8 {
        match self {
            Color::White => 1,
            Color::Black => -1,
        }
    }
}

impl std::ops::Not for Color {
    type Output = Color;

    /// Returns the opposite color.
    fn not(self) -> Self::Output {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }
}

impl Display for Color {
    /// Formats the color as a string.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Color::White => write!(f, "White"),
            Color::Black => write!(f, "Black"),
        }
    }
}

impl From<Color> for u8 {
    /// Converts a `Color` to a `u8` value.
    fn from(color: Color) -> Self {
        color as u8
    }
}

impl From<u8> for Color {
    /// Converts a `u8` value to a `Color`.
    fn from(value: u8) -> Self {
        assert!(value <= Color::Black.into());
        unsafe { std::mem::transmute(value) }
    }
}

impl From<Color> for char {
    /// Converts a `Color` to its position descriptor letter.
    fn from(color: Color) -> Self {
        match color {
            Color::White => 'w',
            Color::Black => 'b',
        }
    }
}

/// Errors raised when reading pieces from text.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PieceError {
    #[error("Invalid piece character: '{0}'")]
    InvalidCharacter(char),
}

#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PieceType {
    Knight = 0,
    Bishop = 1,
    Rook = 2,
    Queen = 3,
    King = 4,
    Pawn = 5,
}

impl PieceType {
    /// Represents all piece types.
    pub const ALL: [PieceType; 6] = [
        PieceType::Pawn,
        PieceType::Knight,
        PieceType::Bishop,
        PieceType::Rook,
        PieceType::Queen,
        PieceType::King,
    ];

    /// The piece types a pawn may promote to.
    pub const PROMOTION_CHOICES: [PieceType; 4] =
        [PieceType::Queen, PieceType::Rook, PieceType::Bishop, PieceType::Knight];

    /// Returns whether a pawn may promote to this piece type.
    pub fn is_promotion_choice(self) -> bool {
        Self::PROMOTION_CHOICES.contains(&self)
    }
}

impl From<PieceType> for u8 {
    /// Converts a `PieceType` to a `u8` value.
    fn from(piece_type: PieceType) -> Self {
        piece_type as u8
    }
}

impl From<u8> for PieceType {
    /// Converts a `u8` value to a `PieceType`.
    fn from(value: u8) -> Self {
        assert!(value <= PieceType::Pawn.into());
        unsafe { std::mem::transmute(value) }
    }
}

impl From<PieceType> for char {
    fn from(piece_type: PieceType) -> Self {
        match piece_type {
            PieceType::Pawn => 'P',
            PieceType::Knight => 'N',
            PieceType::Bishop => 'B',
            PieceType::Rook => 'R',
            PieceType::Queen => 'Q',
            PieceType::King => 'K',
        }
    }
}

impl TryFrom<char> for PieceType {
    type Error = PieceError;

    fn try_from(value: char) -> Result<Self, Self::Error> {
        match value.to_ascii_lowercase() {
            'p' => Ok(PieceType::Pawn),
            'n' => Ok(PieceType::Knight),
            'b' => Ok(PieceType::Bishop),
            'r' => Ok(PieceType::Rook),
            'q' => Ok(PieceType::Queen),
            'k' => Ok(PieceType::King),
            _ => Err(PieceError::InvalidCharacter(value)),
        }
    }
}

impl Display for PieceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PieceType::Pawn => write!(f, "Pawn"),
            PieceType::Knight => write!(f, "Knight"),
            PieceType::Bishop => write!(f, "Bishop"),
            PieceType::Rook => write!(f, "Rook"),
            PieceType::Queen => write!(f, "Queen"),
            PieceType::King => write!(f, "King"),
        }
    }
}

/// Represents a chess piece.
///
/// A `Piece` packs a `Color`, a `PieceType` and a "has moved" marker in a single byte: bit 0 holds
/// the color, bits 1 to 3 the piece type and bit 4 is set once the piece has left its starting
/// square. Castling eligibility is decided by the position's castling rights, the marker is only
/// informative.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Piece(u8);

#[allow(dead_code)]
impl Piece {
    const MOVED_FLAG: u8 = 0b1_0000;

    pub const WHITE_KNIGHT: Piece = Piece(0);
    pub const WHITE_BISHOP: Piece = Piece(2);
    pub const WHITE_ROOK: Piece = Piece(4);
    pub const WHITE_QUEEN: Piece = Piece(6);
    pub const WHITE_KING: Piece = Piece(8);
    pub const WHITE_PAWN: Piece = Piece(10);
    pub const BLACK_KNIGHT: Piece = Piece(1);
    pub const BLACK_BISHOP: Piece = Piece(3);
    pub const BLACK_ROOK: Piece = Piece(5);
    pub const BLACK_QUEEN: Piece = Piece(7);
    pub const BLACK_KING: Piece = Piece(9);
    pub const BLACK_PAWN: Piece = Piece(11);

    /// Represents all possible chess pieces that have not moved yet.
    pub const ALL: [Piece; 12] = [
        Piece::WHITE_PAWN,
        Piece::WHITE_KNIGHT,
        Piece::WHITE_BISHOP,
        Piece::WHITE_ROOK,
        Piece::WHITE_QUEEN,
        Piece::WHITE_KING,
        Piece::BLACK_PAWN,
        Piece::BLACK_KNIGHT,
        Piece::BLACK_BISHOP,
        Piece::BLACK_ROOK,
        Piece::BLACK_QUEEN,
        Piece::BLACK_KING,
    ];

    /// Creates a new, unmoved `Piece` with the given `Color` and `PieceType`.
    pub fn new(color: Color, piece_type: PieceType) -> Self {
        Piece(u8::from(piece_type) << 1 | u8::from(color))
    }

    /// Returns the Color of the piece.
    pub fn color(&self) -> Color {
        Color::from(self.0 & 1)
    }

    /// Returns the PieceType of the piece.
    pub fn piece_type(&self) -> PieceType {
        PieceType::from((self.0 & !Self::MOVED_FLAG) >> 1)
    }

    /// Returns whether the piece has left its starting square.
    pub fn has_moved(&self) -> bool {
        self.0 & Self::MOVED_FLAG != 0
    }

    /// Returns the same piece, marked as having moved.
    pub fn moved(self) -> Piece {
        Piece(self.0 | Self::MOVED_FLAG)
    }

    /// Returns whether both pieces have the same color and type, regardless of their history.
    pub fn is(&self, color: Color, piece_type: PieceType) -> bool {
        self.color() == color && self.piece_type() == piece_type
    }

    /// Returns the chess glyph of the piece.
    pub fn unicode(&self) -> char {
        match (self.color(), self.piece_type()) {
            (Color::White, PieceType::King) => '\u{2654}',
            (Color::White, PieceType::Queen) => '\u{2655}',
            (Color::White, PieceType::Rook) => '\u{2656}',
            (Color::White, PieceType::Bishop) => '\u{2657}',
            (Color::White, PieceType::Knight) => '\u{2658}',
            (Color::White, PieceType::Pawn) => '\u{2659}',
            (Color::Black, PieceType::King) => '\u{265A}',
            (Color::Black, PieceType::Queen) => '\u{265B}',
            (Color::Black, PieceType::Rook) => '\u{265C}',
            (Color::Black, PieceType::Bishop) => '\u{265D}',
            (Color::Black, PieceType::Knight) => '\u{265E}',
            (Color::Black, PieceType::Pawn) => '\u{265F}',
        }
    }
}

impl From<Piece> for char {
    /// Converts a `Piece` to its position descriptor letter.
    fn from(piece: Piece) -> Self {
        match piece.color() {
            Color::White => char::from(piece.piece_type()).to_ascii_uppercase(),
            Color::Black => char::from(piece.piece_type()).to_ascii_lowercase(),
        }
    }
}

impl TryFrom<char> for Piece {
    type Error = PieceError;

    /// Converts a single character to an unmoved `Piece`. Uppercase letters are white pieces.
    fn try_from(value: char) -> Result<Self, Self::Error> {
        let color = match char::is_uppercase(value) {
            true => Color::White,
            false => Color::Black,
        };
        let piece_type = PieceType::try_from(value)?;
        Ok(Piece::new(color, piece_type))
    }
}

impl Display for Piece {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.color(), self.piece_type())
    }
}
