//! Pseudo-legal move generation on the 0x88 board.
//!
//! Moves obey how each piece travels but are not checked for leaving the
//! own king attacked. En passant, castling and promotion are never produced
//! here; they come from [`Move::parse`] or the explicit factories.

use crate::board::Board;
use crate::game_state::GameState;
use crate::moves::Move;
use crate::piece::Piece;
use crate::types::*;

pub const ORTHOGONAL_OFFSETS: [i8; 4] = [0x10, -0x10, 0x01, -0x01];
pub const DIAGONAL_OFFSETS: [i8; 4] = [0x0F, 0x11, -0x0F, -0x11];
pub const KNIGHT_OFFSETS: [i8; 8] = [0x21, 0x1F, 0x12, 0x0E, -0x21, -0x1F, -0x12, -0x0E];

/// Source of candidate moves for the search.
pub trait MoveCalculator: Send {
    /// Every candidate move for one side, in piece-list order.
    fn calculate_possible_moves(&self, state: &GameState, for_white: bool) -> Vec<Move>;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct PseudoLegalMoveCalculator;

impl PseudoLegalMoveCalculator {
    pub fn new() -> Self {
        Self
    }

    /// Moves of a single piece. `piece` must stand on its own position in
    /// `state`.
    pub fn calc_moves_for_piece(&self, state: &GameState, piece: Piece) -> Vec<Move> {
        let mut moves = Vec::new();
        self.push_moves(state, piece, &mut moves);
        moves
    }

    fn push_moves(&self, state: &GameState, piece: Piece, out: &mut Vec<Move>) {
        let Some(kind) = piece.kind() else {
            return;
        };
        match kind {
            PieceKind::Pawn => pawn_moves(state, piece, out),
            PieceKind::Knight => jump_moves(state, piece, &KNIGHT_OFFSETS, out),
            PieceKind::Rook => slide_moves(state, piece, &ORTHOGONAL_OFFSETS, false, out),
            PieceKind::Bishop => slide_moves(state, piece, &DIAGONAL_OFFSETS, false, out),
            PieceKind::Queen => {
                slide_moves(state, piece, &ORTHOGONAL_OFFSETS, false, out);
                slide_moves(state, piece, &DIAGONAL_OFFSETS, false, out);
            }
            PieceKind::King => {
                slide_moves(state, piece, &ORTHOGONAL_OFFSETS, true, out);
                slide_moves(state, piece, &DIAGONAL_OFFSETS, true, out);
            }
        }
    }
}

impl MoveCalculator for PseudoLegalMoveCalculator {
    fn calculate_possible_moves(&self, state: &GameState, for_white: bool) -> Vec<Move> {
        let pieces = state.pieces(Color::from_is_white(for_white));
        let mut moves = Vec::with_capacity(pieces.len() * 4);
        for &piece in pieces {
            self.push_moves(state, piece, &mut moves);
        }
        moves
    }
}

/// Walks each ray until it leaves the board or meets a piece. An enemy piece
/// ends the ray with a capture, an own piece ends it without one.
fn slide_moves(
    state: &GameState,
    piece: Piece,
    offsets: &[i8],
    single_step: bool,
    out: &mut Vec<Move>,
) {
    let board = state.board();
    let from = piece.position();
    let white = piece.is_white();
    for &offset in offsets {
        let mut to = Board::step(from, offset);
        while Board::is_index_valid(to) {
            if board.is_field_occupied(to) {
                if board.is_field_owned_by_white(to) != white {
                    out.push(Move::simple(from, to, state));
                }
                break;
            }
            out.push(Move::simple(from, to, state));
            if single_step {
                break;
            }
            to = Board::step(to, offset);
        }
    }
}

fn jump_moves(state: &GameState, piece: Piece, offsets: &[i8], out: &mut Vec<Move>) {
    let board = state.board();
    let from = piece.position();
    for &offset in offsets {
        let to = Board::step(from, offset);
        if !Board::is_index_valid(to) {
            continue;
        }
        if board.is_field_occupied(to) && board.is_field_owned_by_white(to) == piece.is_white() {
            continue;
        }
        out.push(Move::simple(from, to, state));
    }
}

fn pawn_moves(state: &GameState, piece: Piece, out: &mut Vec<Move>) {
    let board = state.board();
    let color = piece.color();
    let from = piece.position();
    let up = Board::direction(color, Direction::Up);

    let one = Board::step(from, up);
    if Board::is_index_valid(one) && !board.is_field_occupied(one) {
        out.push(Move::simple(from, one, state));
        let two = Board::step(one, up);
        if rank_of(from) == Board::pawn_start_rank(color)
            && Board::is_index_valid(two)
            && !board.is_field_occupied(two)
        {
            out.push(Move::simple(from, two, state));
        }
    }

    for side in [Direction::Left, Direction::Right] {
        let to = Board::step(one, Board::direction(color, side));
        if Board::is_index_valid(to)
            && board.is_field_occupied(to)
            && board.is_field_owned_by_white(to) != piece.is_white()
        {
            out.push(Move::simple(from, to, state));
        }
    }
}

#[cfg(test)]
#[path = "move_calculator_tests.rs"]
mod move_calculator_tests;
