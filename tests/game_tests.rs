use neon_chess::{
    coordinates::Square,
    notation::parse_coordinate_notation,
    piece::{Color, PieceType},
    position::Position,
    r#move::Move,
    Game, GameError, GameStatus,
};

fn play(game: &mut Game, moves: &[&str]) {
    for text in moves {
        let mv = parse_coordinate_notation(game.position(), text).unwrap();
        game.apply_move(mv).unwrap();
    }
}

fn find_move(game: &Game, from: Square, to: Square) -> Option<Move> {
    game.legal_moves_from(from).into_iter().find(|m| m.to_square() == to)
}

#[test]
fn initial_position_has_twenty_moves() {
    let game = Game::new();
    let moves = game.all_legal_moves();

    assert_eq!(moves.len(), 20);
    assert_eq!(moves.iter().filter(|m| m.piece().piece_type() == PieceType::Pawn).count(), 16);
    assert_eq!(moves.iter().filter(|m| m.piece().piece_type() == PieceType::Knight).count(), 4);
}

#[test]
fn legal_moves_never_leave_the_king_in_check() {
    let fens = [
        Position::INITIAL_FEN,
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
        "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1",
        "4k3/4r3/8/8/8/8/4B3/4K3 w - - 0 1",
    ];

    for fen in fens {
        let game = Game::from_fen(fen).unwrap();
        let mover = game.side_to_move();
        for mv in game.all_legal_moves() {
            let mut position = game.position().clone();
            position.make(mv);
            assert!(!position.is_check(mover), "{mv} leaves the king in check in {fen}");
        }
    }
}

#[test]
fn apply_then_undo_restores_the_position() {
    let mut game = Game::from_fen("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1").unwrap();
    let before = game.position().clone();

    for mv in game.all_legal_moves() {
        let mv = if mv.requires_promotion() { mv.with_promotion(PieceType::Queen).unwrap() } else { mv };
        game.apply_move(mv).unwrap();
        assert_eq!(game.undo(), Some(mv));
        assert_eq!(game.position(), &before);
    }
}

#[test]
fn undo_walks_back_a_whole_game() {
    let mut game = Game::new();
    play(&mut game, &["e2e4", "e7e5", "g1f3", "b8c6", "f1c4", "g8f6", "e1g1"]);
    assert_eq!(game.history().count(), 7);

    while game.undo().is_some() {}

    assert_eq!(game.to_fen(), Position::INITIAL_FEN);
    assert_eq!(game.undo(), None);
}

#[test]
fn en_passant_removes_the_passed_pawn() {
    let mut game = Game::from_fen("4k3/8/8/8/4p3/8/3P4/4K3 w - - 0 1").unwrap();
    play(&mut game, &["d2d4"]);
    assert_eq!(game.position().en_passant_square(), Some(Square::D3));

    let en_passant = find_move(&game, Square::E4, Square::D3).unwrap();
    assert!(en_passant.is_en_passant());
    game.apply_move(en_passant).unwrap();

    assert_eq!(game.piece_at(Square::D4), None);
    assert!(game.piece_at(Square::D3).is_some_and(|p| p.is(Color::Black, PieceType::Pawn)));
    assert_eq!(game.piece_at(Square::E4), None);
}

#[test]
fn en_passant_expires_after_one_move() {
    let mut game = Game::from_fen("4k3/8/8/8/4p3/8/3P4/4K3 w - - 0 1").unwrap();
    play(&mut game, &["d2d4", "e8d8", "e1d1"]);

    assert_eq!(game.position().en_passant_square(), None);
    assert!(find_move(&game, Square::E4, Square::D3).is_none());
}

#[test]
fn kingside_castling_blocked_by_a_piece() {
    let game = Game::from_fen("4k3/8/8/8/8/8/8/4K1NR w K - 0 1").unwrap();
    assert!(find_move(&game, Square::E1, Square::G1).is_none());
}

#[test]
fn kingside_castling_refused_through_or_into_attack() {
    // f1 attacked
    let game = Game::from_fen("4kr2/8/8/8/8/8/8/4K2R w K - 0 1").unwrap();
    assert!(find_move(&game, Square::E1, Square::G1).is_none());

    // g1 attacked
    let game = Game::from_fen("4k1r1/8/8/8/8/8/8/4K2R w K - 0 1").unwrap();
    assert!(find_move(&game, Square::E1, Square::G1).is_none());

    // king in check
    let game = Game::from_fen("4r1k1/8/8/8/8/8/8/4K2R w K - 0 1").unwrap();
    assert!(find_move(&game, Square::E1, Square::G1).is_none());
}

#[test]
fn kingside_castling_moves_king_and_rook() {
    let mut game = Game::from_fen("4k3/8/8/8/8/8/8/4K2R w K - 0 1").unwrap();
    let castling = find_move(&game, Square::E1, Square::G1).unwrap();
    assert!(castling.is_castle_kingside());
    game.apply_move(castling).unwrap();

    assert_eq!(game.piece_at(Square::E1), None);
    assert_eq!(game.piece_at(Square::H1), None);
    assert!(game.piece_at(Square::G1).is_some_and(|p| p.is(Color::White, PieceType::King)));
    assert!(game.piece_at(Square::F1).is_some_and(|p| p.is(Color::White, PieceType::Rook)));
    assert_eq!(game.to_fen(), "4k3/8/8/8/8/8/8/5RK1 b - - 1 1");
}

#[test]
fn castling_rights_lost_when_rook_moves() {
    let mut game = Game::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
    play(&mut game, &["h1h2", "a8a7", "h2h1", "a7a8"]);

    assert_eq!(game.to_fen(), "r3k2r/8/8/8/8/8/8/R3K2R w Qk - 4 3");
    assert!(find_move(&game, Square::E1, Square::G1).is_none());
    assert!(find_move(&game, Square::E1, Square::C1).is_some());
}

#[test]
fn fools_mate() {
    let mut game = Game::new();
    play(&mut game, &["f2f3", "e7e5", "g2g4", "d8h4"]);

    assert_eq!(game.status(), GameStatus::Checkmate { winner: Color::Black });
    assert!(game.status().is_terminal());
    assert!(game.all_legal_moves().is_empty());
    assert!(game.in_check(Color::White));
}

#[test]
fn check_is_reported() {
    let mut game = Game::new();
    play(&mut game, &["e2e4", "f7f6", "d2d4", "g7g5"]);
    assert_eq!(game.status(), GameStatus::Ok);

    play(&mut game, &["d1h5"]);
    assert_eq!(game.status(), GameStatus::Checkmate { winner: Color::White });

    game.undo();
    play(&mut game, &["f1b5"]);
    assert_eq!(game.status(), GameStatus::Ok);

    game.load_position("4k3/8/8/8/8/8/8/4K2R w - - 0 1").unwrap();
    play(&mut game, &["h1h8"]);
    assert_eq!(game.status(), GameStatus::Check);
}

#[test]
fn king_and_queen_stalemate() {
    let mut game = Game::from_fen("7k/8/6K1/8/8/8/8/5Q2 w - - 0 1").unwrap();
    play(&mut game, &["f1f7"]);

    assert_eq!(game.status(), GameStatus::Stalemate);
    assert!(!game.in_check(Color::Black));
    assert!(game.all_legal_moves().is_empty());
}

#[test]
fn promotion_flow() {
    let mut game = Game::from_fen("4k3/P7/8/8/8/8/8/4K3 w - - 0 1").unwrap();

    let pending = find_move(&game, Square::A7, Square::A8).unwrap();
    assert!(pending.requires_promotion());
    assert_eq!(game.apply_move(pending), Err(GameError::PromotionRequired(pending)));
    assert_eq!(game.to_fen(), "4k3/P7/8/8/8/8/8/4K3 w - - 0 1");

    game.apply_move_with_promotion(pending, PieceType::Queen).unwrap();
    let queen = game.piece_at(Square::A8).unwrap();
    assert!(queen.is(Color::White, PieceType::Queen));
    assert!(queen.has_moved());
    assert_eq!(game.status(), GameStatus::Check);
    assert_eq!(game.move_list(), vec!["a8=Q+"]);
}

#[test]
fn square_attacks_include_empty_pawn_diagonals() {
    let game = Game::from_fen("4k3/8/8/8/8/8/4P3/4K3 w - - 0 1").unwrap();

    assert!(game.is_square_attacked(Square::D3, Color::White));
    assert!(game.is_square_attacked(Square::F3, Color::White));
    assert!(!game.is_square_attacked(Square::E3, Color::White));
    assert!(find_move(&game, Square::E2, Square::D3).is_none());
}

#[test]
fn moves_only_for_the_side_to_move() {
    let game = Game::new();
    assert!(game.legal_moves_from(Square::E7).is_empty());
    assert!(game.legal_moves_from(Square::E4).is_empty());
    assert_eq!(game.legal_moves_from(Square::B1).len(), 2);
}

#[test]
fn invalid_position_is_reported() {
    assert!(matches!(Game::from_fen("8/8/8 w - - 0 1"), Err(GameError::InvalidPosition(_))));
    assert!(matches!(Game::from_fen("4k3/8/8/8/8/8/8/4K3 x - - 0 1"), Err(GameError::InvalidPosition(_))));
}

#[test]
fn moves_still_play_at_the_clock_limits() {
    let mut game = Game::from_fen("4k3/8/8/8/8/8/8/4K3 w - - 65535 10").unwrap();
    assert_eq!(game.legal_moves_from(Square::E1).len(), 5);
    play(&mut game, &["e1d1"]);
    assert_eq!(game.to_fen(), "4k3/8/8/8/8/8/8/3K4 b - - 65535 10");

    let mut game = Game::from_fen("4k3/8/8/8/8/8/8/4K3 b - - 0 65535").unwrap();
    play(&mut game, &["e8d8"]);
    assert_eq!(game.status(), GameStatus::Ok);
    assert_eq!(game.to_fen(), "3k4/8/8/8/8/8/8/4K3 w - - 1 65535");
}
