use once_cell::sync::Lazy;

use crate::{
    coordinates::{Direction, Square},
    piece::{Color, Piece, PieceType},
    position::Position,
};

const KNIGHT_OFFSETS: [(i8, i8); 8] = [(1, 2), (2, 1), (2, -1), (1, -2), (-1, -2), (-2, -1), (-2, 1), (-1, 2)];

static KNIGHT_TARGETS: Lazy<[Vec<Square>; Square::COUNT]> = Lazy::new(|| {
    std::array::from_fn(|index| {
        let from = Square::ALL[index];
        KNIGHT_OFFSETS.iter().filter_map(|&(files, ranks)| from.offset(files, ranks).ok()).collect()
    })
});

static KING_TARGETS: Lazy<[Vec<Square>; Square::COUNT]> = Lazy::new(|| {
    std::array::from_fn(|index| {
        let from = Square::ALL[index];
        Direction::ALL.iter().filter_map(|&direction| from.step(direction).ok()).collect()
    })
});

static PAWN_ATTACKS: Lazy<[[Vec<Square>; Square::COUNT]; Color::COUNT]> = Lazy::new(|| {
    std::array::from_fn(|color_index| {
        let forward = Color::from(color_index as u8).forward();
        std::array::from_fn(|index| {
            let from = Square::ALL[index];
            [-1, 1].iter().filter_map(|&files| from.offset(files, forward).ok()).collect()
        })
    })
});

// Squares from a square to the board edge, nearest first, one list per direction.
static RAYS: Lazy<[[Vec<Square>; Direction::COUNT]; Square::COUNT]> = Lazy::new(|| {
    std::array::from_fn(|index| {
        std::array::from_fn(|direction_index| {
            let direction = Direction::ALL[direction_index];
            let mut ray = Vec::with_capacity(7);
            let mut next = Square::ALL[index].step(direction);
            while let Ok(square) = next {
                ray.push(square);
                next = square.step(direction);
            }
            ray
        })
    })
});

/// Returns the squares a knight on `from` jumps to.
pub fn knight_targets(from: Square) -> &'static [Square] {
    &KNIGHT_TARGETS[usize::from(from)]
}

/// Returns the squares adjacent to `from`.
pub fn king_targets(from: Square) -> &'static [Square] {
    &KING_TARGETS[usize::from(from)]
}

/// Returns the two forward diagonals of a pawn of `color` on `from` (fewer on the edge files).
pub fn pawn_attacks(color: Color, from: Square) -> &'static [Square] {
    &PAWN_ATTACKS[usize::from(u8::from(color))][usize::from(from)]
}

/// Returns the squares from `from` to the board edge in a direction, nearest first.
pub fn ray(from: Square, direction: Direction) -> &'static [Square] {
    &RAYS[usize::from(from)][usize::from(direction)]
}

fn slider_reaches(position: &Position, from: Square, target: Square, directions: &[Direction]) -> bool {
    directions.iter().any(|&direction| {
        for &square in ray(from, direction) {
            if square == target {
                return true;
            }
            if position[square].is_some() {
                return false;
            }
        }
        false
    })
}

/// Returns whether `piece`, standing on `from`, attacks `target`.
///
/// Pawns attack both forward diagonals whether or not something stands there, which is what king safety and castling
/// checks need. Move generation has its own pawn capture rules and must not use this function.
pub fn attacks_square(position: &Position, from: Square, piece: Piece, target: Square) -> bool {
    match piece.piece_type() {
        PieceType::Pawn => pawn_attacks(piece.color(), from).contains(&target),
        PieceType::Knight => knight_targets(from).contains(&target),
        PieceType::King => king_targets(from).contains(&target),
        PieceType::Bishop => slider_reaches(position, from, target, &Direction::DIAGONAL),
        PieceType::Rook => slider_reaches(position, from, target, &Direction::ORTHOGONAL),
        PieceType::Queen => slider_reaches(position, from, target, &Direction::ALL),
    }
}

/// Returns whether any piece of color `by` attacks `target`.
pub fn is_attacked(position: &Position, target: Square, by: Color) -> bool {
    Square::ALL.iter().any(|&from| match position[from] {
        Some(piece) if piece.color() == by => attacks_square(position, from, piece, target),
        _ => false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_knight_targets() {
        assert_eq!(knight_targets(Square::A1).len(), 2);
        assert!(knight_targets(Square::A1).contains(&Square::B3));
        assert!(knight_targets(Square::A1).contains(&Square::C2));
        assert_eq!(knight_targets(Square::D4).len(), 8);
    }

    #[test]
    fn test_king_targets() {
        assert_eq!(king_targets(Square::H8).len(), 3);
        assert_eq!(king_targets(Square::E4).len(), 8);
    }

    #[test]
    fn test_pawn_attacks() {
        assert_eq!(pawn_attacks(Color::White, Square::A2), &[Square::B3]);
        assert_eq!(pawn_attacks(Color::Black, Square::E7), &[Square::D6, Square::F6]);
        assert!(pawn_attacks(Color::White, Square::E8).is_empty());
    }

    #[test]
    fn test_rays() {
        assert_eq!(ray(Square::A1, Direction::NorthEast).len(), 7);
        assert_eq!(ray(Square::A1, Direction::NorthEast)[0], Square::B2);
        assert!(ray(Square::A1, Direction::South).is_empty());
        assert_eq!(ray(Square::D4, Direction::West), &[Square::C4, Square::B4, Square::A4]);
    }

    #[test]
    fn test_is_attacked_by_rook() {
        let position = Position::new_from_fen("4k3/8/8/8/8/8/8/1R2K3 w - - 0 1").unwrap();

        assert!(is_attacked(&position, Square::B5, Color::White));
        assert!(!is_attacked(&position, Square::B5, Color::Black));
        assert!(!is_attacked(&position, Square::C2, Color::White));
    }

    #[test]
    fn test_is_attacked_stops_at_blockers() {
        let position = Position::new_from_fen("4k3/8/8/8/1p6/8/8/1R2K3 w - - 0 1").unwrap();

        assert!(is_attacked(&position, Square::B4, Color::White));
        assert!(!is_attacked(&position, Square::B5, Color::White));
    }

    #[test]
    fn test_is_attacked_by_queen() {
        let position = Position::new_from_fen("4k3/8/8/8/8/8/8/1Q2K3 w - - 0 1").unwrap();

        assert!(is_attacked(&position, Square::B5, Color::White));
        assert!(is_attacked(&position, Square::C2, Color::White));
        assert!(is_attacked(&position, Square::H7, Color::White));
        assert!(!is_attacked(&position, Square::H6, Color::White));
    }

    #[test]
    fn test_is_attacked_by_knight() {
        let position = Position::new_from_fen("4k3/8/8/3n4/8/8/8/4K3 b - - 0 1").unwrap();

        assert!(is_attacked(&position, Square::E3, Color::Black));
        assert!(!is_attacked(&position, Square::D4, Color::Black));
        assert!(!is_attacked(&position, Square::E3, Color::White));
    }

    #[test]
    fn test_pawns_attack_empty_diagonals() {
        let position = Position::new_from_fen("4k3/8/8/8/8/8/4P3/4K3 w - - 0 1").unwrap();

        assert!(is_attacked(&position, Square::D3, Color::White));
        assert!(is_attacked(&position, Square::F3, Color::White));
        assert!(!is_attacked(&position, Square::E3, Color::White));
    }
}
