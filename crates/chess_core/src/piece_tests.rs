use super::*;

#[test]
fn test_create_piece_bits() {
    let piece = Piece::new(Color::White, PieceKind::Bishop, 0x00);
    assert_eq!(piece.color_and_type(), 0b1000 | 4);
    assert_eq!(piece.kind(), Some(PieceKind::Bishop));
    assert!(piece.is_white());
}

#[test]
fn test_piece_to_string() {
    for kind in PieceKind::ALL {
        assert_eq!(
            format!("White {}", kind.name()),
            Piece::new(Color::White, kind, 0).to_string()
        );
        assert_eq!(
            format!("Black {}", kind.name()),
            Piece::new(Color::Black, kind, 0).to_string()
        );
    }
    assert_eq!("None", Piece::empty(0x10).to_string());
}

#[test]
fn test_empty_type_means_absent_regardless_of_flags() {
    let ghost = Piece::from_bits(Piece::WHITE | Piece::CHALLENGED, 0x22);
    assert!(ghost.is_empty());
    assert_eq!(ghost.kind(), None);
}

#[test]
fn test_equality_ignores_hint_flags() {
    let plain = Piece::new(Color::Black, PieceKind::Knight, 0x45);
    let tagged = plain.with_flags(Piece::CHALLENGED | Piece::CHALLENGES_OTHER);
    assert_eq!(plain, tagged);
    assert!(tagged.has_flag(Piece::CHALLENGED));
    assert!(!plain.has_flag(Piece::CHALLENGED));
}

#[test]
fn test_empty_markers_at_different_positions_differ() {
    assert_ne!(Piece::empty(0x00), Piece::empty(0x01));
    assert_eq!(Piece::empty(0x33), Piece::empty(0x33));
}

#[test]
fn test_with_flags_cannot_change_color_or_type() {
    let rook = Piece::new(Color::Black, PieceKind::Rook, 0x70);
    let tagged = rook.with_flags(0xFF);
    assert_eq!(tagged.color_and_type(), rook.color_and_type());
    assert!(tagged.has_flag(Piece::HAS_MOVED));
}

#[test]
fn test_moved_to_clears_challenge_tags() {
    let queen = Piece::new(Color::White, PieceKind::Queen, 0x03)
        .with_flags(Piece::CHALLENGED | Piece::CHALLENGES_OTHER);
    let moved = queen.moved_to(0x33);
    assert_eq!(moved.position(), 0x33);
    assert_eq!(moved.kind(), Some(PieceKind::Queen));
    assert!(moved.has_flag(Piece::HAS_MOVED));
    assert!(!moved.has_flag(Piece::CHALLENGED));
    assert!(!moved.has_flag(Piece::CHALLENGES_OTHER));
}
