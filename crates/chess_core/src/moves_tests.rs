use super::*;

fn king_and_rook(color: Color, rook_pos: u8) -> GameState {
    let king_pos = Board::start_positions(color, PieceKind::King)[0];
    GameState::from_pieces(
        &[
            Piece::new(color, PieceKind::King, king_pos),
            Piece::new(color, PieceKind::Rook, rook_pos),
        ],
        Color::White,
    )
    .unwrap()
}

#[test]
fn test_castling_parse() {
    for (color, rook_pos) in [
        (Color::White, 0x00),
        (Color::White, 0x07),
        (Color::Black, 0x70),
        (Color::Black, 0x77),
    ] {
        let state = king_and_rook(color, rook_pos);
        let castle = Move::castle(rook_pos, &state);
        let expected_end = if rook_pos & 0x0F == 0 {
            rook_pos + 2
        } else {
            rook_pos - 1
        };
        let king_pos = Board::start_positions(color, PieceKind::King)[0];

        assert_eq!(castle.move_type(), MoveType::Castling);
        assert_eq!(castle.start(), king_pos);
        assert_eq!(castle.move_piece().position(), king_pos);
        assert!(castle.move_piece().is_kind(PieceKind::King));
        assert_eq!(castle.end(), expected_end);
        assert!(castle.target_piece().is_empty());

        let parsed = Move::parse(&castle.to_algebraic(), &state).unwrap();
        assert_eq!(parsed, castle);
    }
}

#[test]
fn test_castle_strings() {
    let state = GameState::new_game(Color::White);
    assert_eq!(Move::castle(0x00, &state).to_string(), "e1c1");
    assert_eq!(Move::castle(0x07, &state).to_string(), "e1g1");
    assert_eq!(Move::castle(0x70, &state).to_string(), "e8c8");
    assert_eq!(Move::castle(0x77, &state).to_string(), "e8g8");
}

#[test]
fn test_parse_ordinary_move() {
    let state = GameState::new_game(Color::Black);
    let mv = Move::parse("e2e4", &state).unwrap();
    assert_eq!(mv.start(), 0x14);
    assert_eq!(mv.end(), 0x34);
    assert_eq!(mv.move_type(), MoveType::Ordinary);
    assert!(mv.move_piece().is_kind(PieceKind::Pawn));
    assert!(!mv.is_capture());
    assert_eq!(mv, Move::simple(0x14, 0x34, &state));
    assert_eq!(mv.to_algebraic(), "e2e4");
}

#[test]
fn test_parse_en_passant() {
    // White pawn on e5, black answers d7d5.
    let state = GameState::from_pieces(
        &[
            Piece::new(Color::White, PieceKind::Pawn, 0x44),
            Piece::new(Color::Black, PieceKind::Pawn, 0x63),
        ],
        Color::White,
    )
    .unwrap();
    let state = state.apply_move(&Move::parse("d7d5", &state).unwrap());

    let mv = Move::parse("e5d6", &state).unwrap();
    assert_eq!(mv.move_type(), MoveType::EnPassant);
    assert_eq!(mv.end(), 0x53);
    assert_eq!(mv.target_piece().position(), 0x43);
    assert!(mv.target_piece().is_kind(PieceKind::Pawn));
    assert_eq!(mv, Move::en_passant(0x44, 0x43, &state));
}

#[test]
fn test_diagonal_pawn_move_without_double_push_is_ordinary() {
    let state = GameState::from_pieces(
        &[
            Piece::new(Color::White, PieceKind::Pawn, 0x44),
            Piece::new(Color::Black, PieceKind::Pawn, 0x53),
        ],
        Color::White,
    )
    .unwrap();
    let state = state.apply_move(&Move::parse("d6d5", &state).unwrap());
    let mv = Move::parse("e5d6", &state).unwrap();
    assert_eq!(mv.move_type(), MoveType::Ordinary);
}

#[test]
fn test_parse_promotion() {
    let state = GameState::from_pieces(
        &[
            Piece::new(Color::White, PieceKind::Pawn, 0x64),
            Piece::new(Color::Black, PieceKind::Rook, 0x75),
        ],
        Color::White,
    )
    .unwrap();
    for (text, move_type) in [
        ("e7e8q", MoveType::PromotionQueen),
        ("e7e8r", MoveType::PromotionRook),
        ("e7e8b", MoveType::PromotionBishop),
        ("e7e8k", MoveType::PromotionKnight),
        ("e7e8n", MoveType::PromotionKnight),
    ] {
        let mv = Move::parse(text, &state).unwrap();
        assert_eq!(mv.move_type(), move_type);
        assert!(!mv.is_capture());
    }

    let capture = Move::parse("e7f8q", &state).unwrap();
    assert!(capture.is_capture());
    assert!(capture.target_piece().is_kind(PieceKind::Rook));

    let knight = Move::pawn_promotion(0x64, 0x74, PieceKind::Knight, &state).unwrap();
    assert_eq!(knight.to_string(), "e7e8k");
}

#[test]
fn test_parse_rejects_bad_promotion() {
    let state = GameState::new_game(Color::White);
    assert_eq!(
        Move::parse("e2e4x", &state),
        Err(ChessError::IllegalMoveType('x'))
    );
    assert!(matches!(
        Move::pawn_promotion(0x64, 0x74, PieceKind::King, &state),
        Err(ChessError::IllegalMoveType(_))
    ));
    assert!(matches!(
        Move::pawn_promotion(0x64, 0x74, PieceKind::Pawn, &state),
        Err(ChessError::IllegalMoveType(_))
    ));
}

#[test]
fn test_parse_errors() {
    let state = GameState::new_game(Color::White);
    for bad in ["", "e2", "e2e", "e2e4qq", "z2e4", "e2e9", "e4e5", "é2e4"] {
        assert!(
            matches!(Move::parse(bad, &state), Err(ChessError::Parse { .. })),
            "{bad} should be rejected"
        );
    }
}

#[test]
fn test_promotion_kinds() {
    assert_eq!(MoveType::Ordinary.promotion_kind(), None);
    assert_eq!(MoveType::Castling.promotion_kind(), None);
    assert_eq!(MoveType::PromotionBishop.promotion_kind(), Some(PieceKind::Bishop));
    assert_eq!(MoveType::from_promotion_char('Q'), Ok(MoveType::PromotionQueen));
    for kind in [PieceKind::Queen, PieceKind::Rook, PieceKind::Bishop, PieceKind::Knight] {
        let move_type = MoveType::for_promotion(kind).unwrap();
        assert_eq!(move_type.promotion_kind(), Some(kind));
        let c = move_type.promotion_char().unwrap();
        assert_eq!(MoveType::from_promotion_char(c), Ok(move_type));
    }
}
