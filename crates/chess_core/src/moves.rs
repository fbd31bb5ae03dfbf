use std::fmt;

use crate::board::Board;
use crate::error::{ChessError, ChessResult};
use crate::game_state::GameState;
use crate::piece::Piece;
use crate::types::*;

/// Which rules a move follows when it is applied.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MoveType {
    Ordinary,
    EnPassant,
    Castling,
    PromotionQueen,
    PromotionRook,
    PromotionBishop,
    PromotionKnight,
}

impl MoveType {
    /// Piece kind a promotion produces, `None` for the other move types.
    pub fn promotion_kind(self) -> Option<PieceKind> {
        match self {
            MoveType::PromotionQueen => Some(PieceKind::Queen),
            MoveType::PromotionRook => Some(PieceKind::Rook),
            MoveType::PromotionBishop => Some(PieceKind::Bishop),
            MoveType::PromotionKnight => Some(PieceKind::Knight),
            _ => None,
        }
    }

    pub fn is_promotion(self) -> bool {
        self.promotion_kind().is_some()
    }

    pub fn for_promotion(kind: PieceKind) -> ChessResult<MoveType> {
        match kind {
            PieceKind::Queen => Ok(MoveType::PromotionQueen),
            PieceKind::Rook => Ok(MoveType::PromotionRook),
            PieceKind::Bishop => Ok(MoveType::PromotionBishop),
            PieceKind::Knight => Ok(MoveType::PromotionKnight),
            other => Err(ChessError::IllegalMoveType(
                other.name().chars().next().unwrap_or('?'),
            )),
        }
    }

    /// Decodes the fifth character of a move string. Both `k` and `n` mean
    /// knight; `k` is what the engine itself prints.
    pub fn from_promotion_char(c: char) -> ChessResult<MoveType> {
        match c.to_ascii_lowercase() {
            'q' => Ok(MoveType::PromotionQueen),
            'r' => Ok(MoveType::PromotionRook),
            'b' => Ok(MoveType::PromotionBishop),
            'k' | 'n' => Ok(MoveType::PromotionKnight),
            _ => Err(ChessError::IllegalMoveType(c)),
        }
    }

    pub fn promotion_char(self) -> Option<char> {
        match self {
            MoveType::PromotionQueen => Some('q'),
            MoveType::PromotionRook => Some('r'),
            MoveType::PromotionBishop => Some('b'),
            MoveType::PromotionKnight => Some('k'),
            _ => None,
        }
    }
}

/// A single ply, snapshotting the moving piece and whatever it captures.
///
/// Moves are only built through the factory functions, which read both
/// pieces from the state the move belongs to. None of the factories check
/// legality.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Move {
    start: u8,
    end: u8,
    move_type: MoveType,
    move_piece: Piece,
    target_piece: Piece,
}

impl Move {
    /// A move with no special rules attached; whatever stands on `end` is
    /// the capture target.
    pub fn simple(start: u8, end: u8, state: &GameState) -> Move {
        let board = state.board();
        Move {
            start,
            end,
            move_type: MoveType::Ordinary,
            move_piece: board.get(start),
            target_piece: board.get(end),
        }
    }

    /// The pawn on `start` takes the pawn on `enemy_pos` in passing and
    /// lands one rank past it.
    pub fn en_passant(start: u8, enemy_pos: u8, state: &GameState) -> Move {
        let board = state.board();
        let move_piece = board.get(start);
        let up = Board::direction(move_piece.color(), Direction::Up);
        Move {
            start,
            end: Board::step(enemy_pos, up),
            move_type: MoveType::EnPassant,
            move_piece,
            target_piece: board.get(enemy_pos),
        }
    }

    /// Castling with the rook on `rook_pos`. The move is expressed as the
    /// king's walk: from its start square to c-file for an a-file rook and to
    /// g-file for an h-file rook.
    pub fn castle(rook_pos: u8, state: &GameState) -> Move {
        let color = Color::from_is_white(rank_of(rook_pos) == 0);
        let king_pos = Board::start_positions(color, PieceKind::King)[0];
        let end = if file_of(rook_pos) == 0 {
            rook_pos + 2
        } else {
            rook_pos - 1
        };
        Move {
            start: king_pos,
            end,
            move_type: MoveType::Castling,
            move_piece: state.board().get(king_pos),
            target_piece: Piece::empty(end),
        }
    }

    /// A pawn reaching the last rank, straight or by capture.
    pub fn pawn_promotion(
        start: u8,
        end: u8,
        promote_to: PieceKind,
        state: &GameState,
    ) -> ChessResult<Move> {
        let move_type = MoveType::for_promotion(promote_to)?;
        Ok(Self::with_type(start, end, move_type, state))
    }

    fn with_type(start: u8, end: u8, move_type: MoveType, state: &GameState) -> Move {
        Move {
            move_type,
            ..Self::simple(start, end, state)
        }
    }

    /// Decodes `e2e4`, `e7e8q` and friends against `state`.
    ///
    /// Castling and en passant are inferred from the position: a king moving
    /// two files is a castle, and a pawn moving diagonally behind an enemy
    /// pawn that just made a double step captures it in passing.
    pub fn parse(text: &str, state: &GameState) -> ChessResult<Move> {
        if !text.is_ascii() || !(4..=5).contains(&text.len()) {
            return Err(ChessError::parse(text, "expected 4 or 5 characters"));
        }
        let start = Board::string_to_index(&text[0..2])?;
        let end = Board::string_to_index(&text[2..4])?;

        let piece = state.board().get(start);
        if piece.is_empty() {
            return Err(ChessError::parse(text, "no piece on the start square"));
        }

        if let Some(c) = text[4..].chars().next() {
            let move_type = MoveType::from_promotion_char(c)?;
            return Ok(Self::with_type(start, end, move_type, state));
        }

        if piece.is_kind(PieceKind::King)
            && start == Board::start_positions(piece.color(), PieceKind::King)[0]
            && rank_of(start) == rank_of(end)
            && file_of(start).abs_diff(file_of(end)) == 2
        {
            let rook_file = if file_of(end) < file_of(start) { 0 } else { 7 };
            return Ok(Self::castle((start & 0xF0) | rook_file, state));
        }

        if let Some(captured) = en_passant_victim(piece, start, end, state) {
            return Ok(Self::en_passant(start, captured, state));
        }

        Ok(Self::simple(start, end, state))
    }

    pub fn start(&self) -> u8 {
        self.start
    }

    pub fn end(&self) -> u8 {
        self.end
    }

    pub fn move_type(&self) -> MoveType {
        self.move_type
    }

    pub fn move_piece(&self) -> Piece {
        self.move_piece
    }

    /// The captured piece, or an empty marker. For en passant this sits
    /// beside the end square, not on it.
    pub fn target_piece(&self) -> Piece {
        self.target_piece
    }

    pub fn is_capture(&self) -> bool {
        !self.target_piece.is_empty()
    }

    pub fn to_algebraic(&self) -> String {
        self.to_string()
    }
}

/// Square of the pawn `piece` would take en passant by moving to `end`.
fn en_passant_victim(piece: Piece, start: u8, end: u8, state: &GameState) -> Option<u8> {
    if !piece.is_kind(PieceKind::Pawn) {
        return None;
    }
    let prev = state.previous_move()?;
    let pushed = prev.move_piece();
    if !pushed.is_kind(PieceKind::Pawn)
        || pushed.color() == piece.color()
        || prev.start().abs_diff(prev.end()) != 0x20
    {
        return None;
    }
    let beside = rank_of(start) == rank_of(prev.end())
        && file_of(start).abs_diff(file_of(prev.end())) == 1;
    let up = Board::direction(piece.color(), Direction::Up);
    (beside && end == Board::step(prev.end(), up)).then_some(prev.end())
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}",
            Board::index_to_string(self.start),
            Board::index_to_string(self.end)
        )?;
        if let Some(c) = self.move_type.promotion_char() {
            write!(f, "{c}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "moves_tests.rs"]
mod moves_tests;
