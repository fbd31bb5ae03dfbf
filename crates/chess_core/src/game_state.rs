//! Immutable position snapshots.
//!
//! A [`GameState`] is never changed after it has been built. Applying a move
//! clones the board and both piece lists, edits the clone and hands it back,
//! so every ply of a search owns its own position.

use crate::board::Board;
use crate::error::{ChessError, ChessResult};
use crate::moves::{Move, MoveType};
use crate::piece::Piece;
use crate::types::*;

/// Whether each rook may still take part in castling. Rights are only ever
/// withdrawn, never granted back.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CastlingRights {
    pub white_a: bool,
    pub white_h: bool,
    pub black_a: bool,
    pub black_h: bool,
}

impl CastlingRights {
    pub const ALL: CastlingRights = CastlingRights {
        white_a: true,
        white_h: true,
        black_a: true,
        black_h: true,
    };

    pub const NONE: CastlingRights = CastlingRights {
        white_a: false,
        white_h: false,
        black_a: false,
        black_h: false,
    };

    /// Rights implied by a bare board: a rook keeps its right while it and
    /// its king are still on their opening squares.
    fn from_board(board: &Board) -> Self {
        let home = |color: Color, slot: usize| {
            let king = Board::start_positions(color, PieceKind::King)[0];
            let rook = Board::start_positions(color, PieceKind::Rook)[slot];
            let is_home = |index: u8, kind: PieceKind| {
                let piece = board.get(index);
                piece.is_kind(kind) && piece.color() == color
            };
            is_home(king, PieceKind::King) && is_home(rook, PieceKind::Rook)
        };
        CastlingRights {
            white_a: home(Color::White, 0),
            white_h: home(Color::White, 1),
            black_a: home(Color::Black, 0),
            black_h: home(Color::Black, 1),
        }
    }

    pub fn a_file(&self, color: Color) -> bool {
        match color {
            Color::White => self.white_a,
            Color::Black => self.black_a,
        }
    }

    pub fn h_file(&self, color: Color) -> bool {
        match color {
            Color::White => self.white_h,
            Color::Black => self.black_h,
        }
    }

    fn revoke_a_file(&mut self, color: Color) {
        match color {
            Color::White => self.white_a = false,
            Color::Black => self.black_a = false,
        }
    }

    fn revoke_h_file(&mut self, color: Color) {
        match color {
            Color::White => self.white_h = false,
            Color::Black => self.black_h = false,
        }
    }

    /// Withdraws whatever right a `kind` piece of `color` standing on
    /// `square` was holding.
    fn revoke_for(&mut self, color: Color, kind: PieceKind, square: u8) {
        match kind {
            PieceKind::King => {
                self.revoke_a_file(color);
                self.revoke_h_file(color);
            }
            PieceKind::Rook => {
                let homes = Board::start_positions(color, PieceKind::Rook);
                if square == homes[0] {
                    self.revoke_a_file(color);
                } else if square == homes[1] {
                    self.revoke_h_file(color);
                }
            }
            _ => {}
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameState {
    board: Board,
    white_pieces: Vec<Piece>,
    black_pieces: Vec<Piece>,
    castling: CastlingRights,
    previous_move: Option<Move>,
    engine_color: Color,
}

impl GameState {
    /// Opening position with the engine playing `engine_color`.
    pub fn new_game(engine_color: Color) -> Self {
        Self::from_board(Board::new_game(), engine_color)
    }

    /// Builds the piece lists from `board`, a1 first.
    pub fn from_board(board: Board, engine_color: Color) -> Self {
        let white_pieces = board.pieces().filter(|p| p.is_white()).collect();
        let black_pieces = board.pieces().filter(|p| !p.is_white()).collect();
        let castling = CastlingRights::from_board(&board);
        GameState {
            board,
            white_pieces,
            black_pieces,
            castling,
            previous_move: None,
            engine_color,
        }
    }

    /// Validating constructor for hand-written positions. Empty markers in
    /// `pieces` are skipped.
    pub fn from_pieces(pieces: &[Piece], engine_color: Color) -> ChessResult<Self> {
        let mut board = Board::empty();
        for piece in pieces.iter().filter(|p| !p.is_empty()) {
            let index = piece.position();
            if !Board::is_index_valid(index) {
                return Err(ChessError::InvalidIndex(index));
            }
            if board.is_field_occupied(index) {
                return Err(ChessError::OccupiedSquare(index));
            }
            board.set(*piece);
        }
        Ok(Self::from_board(board, engine_color))
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn white_pieces(&self) -> &[Piece] {
        &self.white_pieces
    }

    pub fn black_pieces(&self) -> &[Piece] {
        &self.black_pieces
    }

    pub fn pieces(&self, color: Color) -> &[Piece] {
        match color {
            Color::White => &self.white_pieces,
            Color::Black => &self.black_pieces,
        }
    }

    pub fn castling_rights(&self) -> CastlingRights {
        self.castling
    }

    pub fn can_a_rank_rook_castle(&self, color: Color) -> bool {
        self.castling.a_file(color)
    }

    pub fn can_h_rank_rook_castle(&self, color: Color) -> bool {
        self.castling.h_file(color)
    }

    pub fn previous_move(&self) -> Option<&Move> {
        self.previous_move.as_ref()
    }

    pub fn engine_color(&self) -> Color {
        self.engine_color
    }

    /// The opponent of whoever made the previous move; White at the start.
    pub fn side_to_move(&self) -> Color {
        self.previous_move
            .map(|m| m.move_piece().color().other())
            .unwrap_or(Color::White)
    }

    pub fn is_king_missing(&self, color: Color) -> bool {
        !self
            .pieces(color)
            .iter()
            .any(|p| p.is_kind(PieceKind::King))
    }

    /// Returns the position after `mv`.
    ///
    /// # Panics
    /// If either end of the move is off the board or the start square is
    /// empty. Moves come from the generator or [`Move::parse`], which never
    /// produce those.
    pub fn apply_move(&self, mv: &Move) -> GameState {
        let start = mv.start();
        let end = mv.end();
        assert!(Board::is_index_valid(start), "invalid start {start:#04x}");
        assert!(Board::is_index_valid(end), "invalid end {end:#04x}");

        let mover = self.board.get(start);
        let Some(kind) = mover.kind() else {
            panic!("no piece on {}", Board::index_to_string(start));
        };
        let color = mover.color();

        let mut next = self.clone();
        next.castling.revoke_for(color, kind, start);

        match mv.move_type() {
            MoveType::Castling => next.castle(mover, end),
            move_type => {
                let capture_square = match move_type {
                    MoveType::EnPassant => mv.target_piece().position(),
                    _ => end,
                };
                if let Some(captured) = next.remove(capture_square) {
                    if let Some(captured_kind) = captured.kind() {
                        next.castling
                            .revoke_for(captured.color(), captured_kind, capture_square);
                    }
                }
                let placed = match move_type.promotion_kind() {
                    Some(promoted) => mover.promoted_to(promoted, end),
                    None => mover.moved_to(end),
                };
                next.relocate(start, placed);
            }
        }

        next.previous_move = Some(*mv);
        next
    }

    /// Copy of this position in which every capture in `moves` marks its
    /// attacker [`Piece::CHALLENGES_OTHER`] and its victim
    /// [`Piece::CHALLENGED`]. Tags from earlier plies are dropped first.
    pub fn with_challenge_tags(&self, moves: &[Move]) -> GameState {
        let mut next = self.clone();
        for list in [&mut next.white_pieces, &mut next.black_pieces] {
            for piece in list.iter_mut() {
                *piece = piece.without_challenge_tags();
                next.board.set(*piece);
            }
        }
        for mv in moves.iter().filter(|m| m.is_capture()) {
            next.tag(mv.start(), Piece::CHALLENGES_OTHER);
            next.tag(mv.target_piece().position(), Piece::CHALLENGED);
        }
        next
    }

    fn list_mut(&mut self, color: Color) -> &mut Vec<Piece> {
        match color {
            Color::White => &mut self.white_pieces,
            Color::Black => &mut self.black_pieces,
        }
    }

    /// Takes whatever stands on `index` off the board and out of its list.
    fn remove(&mut self, index: u8) -> Option<Piece> {
        let piece = self.board.get(index);
        if piece.is_empty() {
            return None;
        }
        self.board.clear(index);
        let list = self.list_mut(piece.color());
        if let Some(i) = list.iter().position(|p| p.position() == index) {
            list.remove(i);
        }
        Some(piece)
    }

    /// Moves the list entry for `from` onto `placed`'s square, keeping its
    /// slot in the list.
    fn relocate(&mut self, from: u8, placed: Piece) {
        self.board.clear(from);
        self.board.set(placed);
        let list = self.list_mut(placed.color());
        if let Some(entry) = list.iter_mut().find(|p| p.position() == from) {
            *entry = placed;
        }
    }

    fn castle(&mut self, king: Piece, king_end: u8) {
        let king_start = king.position();
        let base = king_start & 0xF0;
        let (rook_start, rook_end) = if file_of(king_end) < file_of(king_start) {
            (base, king_end + 1)
        } else {
            (base | 0x07, king_end - 1)
        };

        // Anything on the landing squares is taken off so lists and board agree.
        let rook = self.board.get(rook_start);
        self.remove(king_end);
        self.relocate(king_start, king.moved_to(king_end));
        if rook.is_kind(PieceKind::Rook) && rook.color() == king.color() {
            self.remove(rook_end);
            self.relocate(rook_start, rook.moved_to(rook_end));
        }
    }

    fn tag(&mut self, index: u8, flag: u8) {
        let piece = self.board.get(index);
        if piece.is_empty() {
            return;
        }
        let tagged = piece.with_flags(flag);
        self.board.set(tagged);
        let list = self.list_mut(piece.color());
        if let Some(entry) = list.iter_mut().find(|p| p.position() == index) {
            *entry = tagged;
        }
    }
}

#[cfg(test)]
#[path = "game_state_tests.rs"]
mod game_state_tests;
