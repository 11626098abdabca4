use tracing::trace;

use crate::{
    coordinates::{Direction, File, Rank, Square},
    piece::{Piece, PieceType},
    position::Position,
    r#move::{CastlingRight, CastlingSide, Move},
};

use super::attacks::{king_targets, knight_targets, pawn_attacks, ray};

fn generate_pawn_moves(position: &Position, from: Square, piece: Piece, moves: &mut Vec<Move>) {
    let color = piece.color();
    let forward = color.forward();
    let last_rank = Rank::R8.relative_to_color(color);

    // Pushes
    if let Ok(one) = from.up(forward) {
        if position[one].is_none() {
            if one.rank() == last_rank {
                moves.push(Move::new_promotion_pending(from, one, piece, None));
            } else {
                moves.push(Move::new(from, one, piece));

                if from.rank() == Rank::R2.relative_to_color(color) {
                    if let Ok(two) = one.up(forward) {
                        if position[two].is_none() {
                            moves.push(Move::new_two_square_pawn_push(from, two, piece));
                        }
                    }
                }
            }
        }
    }

    // Captures only land on a square holding an enemy piece.
    for &to in pawn_attacks(color, from) {
        if let Some(target) = position[to] {
            if target.color() != color {
                if to.rank() == last_rank {
                    moves.push(Move::new_promotion_pending(from, to, piece, Some(target)));
                } else {
                    moves.push(Move::new_capture(from, to, piece, target));
                }
            }
        }
    }

    // En passant
    if let Some(en_passant_sq) = position.en_passant_square() {
        if pawn_attacks(color, from).contains(&en_passant_sq) {
            let captured_sq = Square::new(en_passant_sq.file(), from.rank());
            if position[captured_sq].is_some_and(|p| p.is(!color, PieceType::Pawn)) {
                moves.push(Move::new_en_passant(from, en_passant_sq, piece));
            }
        }
    }
}

fn generate_slider_moves(
    position: &Position,
    from: Square,
    piece: Piece,
    directions: &[Direction],
    moves: &mut Vec<Move>,
) {
    for &direction in directions {
        for &to in ray(from, direction) {
            match position[to] {
                None => moves.push(Move::new(from, to, piece)),
                Some(target) => {
                    if target.color() != piece.color() {
                        moves.push(Move::new_capture(from, to, piece, target));
                    }
                    break;
                }
            }
        }
    }
}

fn generate_step_moves(position: &Position, from: Square, piece: Piece, targets: &[Square], moves: &mut Vec<Move>) {
    for &to in targets {
        match position[to] {
            None => moves.push(Move::new(from, to, piece)),
            Some(target) if target.color() != piece.color() => moves.push(Move::new_capture(from, to, piece, target)),
            Some(_) => {}
        }
    }
}

fn generate_castling_moves(position: &Position, from: Square, piece: Piece, moves: &mut Vec<Move>) {
    let color = piece.color();
    let rank = Rank::R1.relative_to_color(color);
    if from != Square::new(File::E, rank) {
        return;
    }

    for side in CastlingSide::ALL {
        if !position.castling_availability().contains(CastlingRight::new(color, side)) {
            continue;
        }

        let rook_sq = Square::new(side.rook_from_file(), rank);
        if !position[rook_sq].is_some_and(|p| p.is(color, PieceType::Rook)) {
            continue;
        }

        let path_is_empty = side.empty_files().iter().all(|&file| position[Square::new(file, rank)].is_none());
        if !path_is_empty {
            continue;
        }

        let path_is_safe =
            side.king_path_files().iter().all(|&file| !position.is_attacked(Square::new(file, rank), !color));
        if !path_is_safe {
            continue;
        }

        moves.push(Move::new_castling(from, Square::new(side.king_to_file(), rank), piece, side));
    }
}

/// Generates the pseudo-legal moves of the piece standing on `from`.
///
/// Pseudo-legal moves follow the movement rules of the piece and the occupancy of the board but may leave the mover's
/// king in check. Castling is the exception: its path safety is already verified here. Nothing is generated for an
/// empty square.
pub fn generate_pseudo_legal_moves(position: &Position, from: Square, moves: &mut Vec<Move>) {
    let Some(piece) = position[from] else {
        return;
    };

    match piece.piece_type() {
        PieceType::Pawn => generate_pawn_moves(position, from, piece, moves),
        PieceType::Knight => generate_step_moves(position, from, piece, knight_targets(from), moves),
        PieceType::Bishop => generate_slider_moves(position, from, piece, &Direction::DIAGONAL, moves),
        PieceType::Rook => generate_slider_moves(position, from, piece, &Direction::ORTHOGONAL, moves),
        PieceType::Queen => generate_slider_moves(position, from, piece, &Direction::ALL, moves),
        PieceType::King => {
            generate_step_moves(position, from, piece, king_targets(from), moves);
            generate_castling_moves(position, from, piece, moves);
        }
    }
}

/// Determines if a pseudo-legal move is legal, meaning it does not leave the mover's king in check.
///
/// The move is played on a copy of the position and the mover's king is tested on the copy. This covers pins,
/// discovered checks through en passant and king moves alike. The caller's position is never touched.
pub fn is_legal(position: &Position, mv: Move) -> bool {
    let mut simulation = position.clone();
    simulation.make(mv);
    let legal = !simulation.is_check(mv.piece().color());
    if !legal {
        trace!(%mv, "rejected move leaving the king in check");
    }
    legal
}

/// Generates the legal moves of the piece on `from`.
///
/// Returns an empty list when the square is empty or holds a piece of the side not to move.
pub fn generate_legal_moves_from(position: &Position, from: Square) -> Vec<Move> {
    match position[from] {
        Some(piece) if piece.color() == position.side_to_move() => {
            let mut moves = Vec::with_capacity(32);
            generate_pseudo_legal_moves(position, from, &mut moves);
            moves.retain(|mv| is_legal(position, *mv));
            moves
        }
        _ => Vec::new(),
    }
}

/// Generates every legal move of the side to move.
pub fn generate_all_legal_moves(position: &Position) -> Vec<Move> {
    Square::ALL.iter().flat_map(|&from| generate_legal_moves_from(position, from)).collect()
}
