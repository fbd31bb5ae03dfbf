//! 0x88 board.
//!
//! The board is a 128-slot array laid out as 8 ranks of 16 files. Only the
//! left half of every rank is a real square; an index is valid iff
//! `index & 0x88 == 0`. Stepping off any edge with wrapping `u8` arithmetic
//! always lands on an index with one of those two bits set, so move
//! generation needs a single mask test per step instead of range checks.

use std::fmt;

use crate::error::{ChessError, ChessResult};
use crate::piece::Piece;
use crate::types::*;

pub const BOARD_SIZE: usize = 128;

const WHITE_PAWNS: [u8; 8] = [0x10, 0x11, 0x12, 0x13, 0x14, 0x15, 0x16, 0x17];
const BLACK_PAWNS: [u8; 8] = [0x60, 0x61, 0x62, 0x63, 0x64, 0x65, 0x66, 0x67];

/// Back rank layout shared by both colors, indexed by file.
const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    fields: [Piece; BOARD_SIZE],
}

impl Board {
    /// A board without any pieces. Every slot holds an empty marker that
    /// knows its own index.
    pub fn empty() -> Self {
        let mut fields = [Piece::default(); BOARD_SIZE];
        for (i, field) in fields.iter_mut().enumerate() {
            *field = Piece::empty(i as u8);
        }
        Self { fields }
    }

    /// The standard 32-piece opening array.
    pub fn new_game() -> Self {
        let mut board = Self::empty();
        for color in [Color::White, Color::Black] {
            for kind in PieceKind::ALL {
                for &index in Self::start_positions(color, kind) {
                    board.set(Piece::new(color, kind, index));
                }
            }
        }
        board
    }

    /// Places each piece on the square it names. Later pieces overwrite
    /// earlier ones on the same square.
    ///
    /// # Panics
    /// If a piece carries an invalid index.
    pub fn from_pieces(pieces: &[Piece]) -> Self {
        let mut board = Self::empty();
        for &piece in pieces {
            board.set(piece);
        }
        board
    }

    #[inline]
    pub fn is_index_valid(index: u8) -> bool {
        index & 0x88 == 0
    }

    /// Steps `offset` away from `index`. The result may be off the board;
    /// check it with [`Board::is_index_valid`].
    #[inline]
    pub fn step(index: u8, offset: i8) -> u8 {
        index.wrapping_add_signed(offset)
    }

    #[inline]
    pub fn get(&self, index: u8) -> Piece {
        assert!(Self::is_index_valid(index), "invalid board index {index:#04x}");
        self.fields[index as usize]
    }

    pub fn fields(&self) -> &[Piece; BOARD_SIZE] {
        &self.fields
    }

    /// Iterator over the occupied squares, a1 first.
    pub fn pieces(&self) -> impl Iterator<Item = Piece> + '_ {
        self.fields.iter().copied().filter(|p| !p.is_empty())
    }

    #[inline]
    pub fn is_field_occupied(&self, index: u8) -> bool {
        !self.get(index).is_empty()
    }

    /// Must only be asked about occupied squares.
    #[inline]
    pub fn is_field_owned_by_white(&self, index: u8) -> bool {
        let piece = self.get(index);
        debug_assert!(!piece.is_empty(), "ownership of empty square {index:#04x}");
        piece.is_white()
    }

    pub(crate) fn set(&mut self, piece: Piece) {
        let index = piece.position();
        assert!(Self::is_index_valid(index), "invalid board index {index:#04x}");
        self.fields[index as usize] = piece;
    }

    pub(crate) fn clear(&mut self, index: u8) {
        assert!(Self::is_index_valid(index), "invalid board index {index:#04x}");
        self.fields[index as usize] = Piece::empty(index);
    }

    /// `0x14` -> `"e2"`.
    ///
    /// # Panics
    /// If `index` is not a valid square.
    pub fn index_to_string(index: u8) -> String {
        assert!(Self::is_index_valid(index), "invalid board index {index:#04x}");
        let f = (b'a' + file_of(index)) as char;
        let r = (b'1' + rank_of(index)) as char;
        format!("{f}{r}")
    }

    /// `"e2"` -> `0x14`. The file letter may be upper case.
    pub fn string_to_index(text: &str) -> ChessResult<u8> {
        let b = text.as_bytes();
        if b.len() != 2 {
            return Err(ChessError::parse(text, "a square is one file and one rank"));
        }
        let f = b[0].to_ascii_lowercase();
        let r = b[1];
        if !(b'a'..=b'h').contains(&f) {
            return Err(ChessError::parse(text, "file must be a-h"));
        }
        if !(b'1'..=b'8').contains(&r) {
            return Err(ChessError::parse(text, "rank must be 1-8"));
        }
        square(f - b'a', r - b'1').ok_or_else(|| ChessError::parse(text, "square off the board"))
    }

    /// Signed step for `dir` as seen by the given side. Black's view is
    /// mirrored so that "up" always points towards the opponent.
    pub fn direction(color: Color, dir: Direction) -> i8 {
        match color {
            Color::White => Self::white_direction(dir),
            Color::Black => Self::black_direction(dir),
        }
    }

    pub fn white_direction(dir: Direction) -> i8 {
        match dir {
            Direction::Up => 0x10,
            Direction::Down => -0x10,
            Direction::Left => -0x01,
            Direction::Right => 0x01,
        }
    }

    pub fn black_direction(dir: Direction) -> i8 {
        -Self::white_direction(dir)
    }

    /// Squares a color/type occupies in the opening array. The king list has
    /// exactly one entry, which castling uses to find the king of a rook.
    pub fn start_positions(color: Color, kind: PieceKind) -> &'static [u8] {
        const WHITE_ROOKS: [u8; 2] = [0x00, 0x07];
        const WHITE_KNIGHTS: [u8; 2] = [0x01, 0x06];
        const WHITE_BISHOPS: [u8; 2] = [0x02, 0x05];
        const WHITE_QUEEN: [u8; 1] = [0x03];
        const WHITE_KING: [u8; 1] = [0x04];
        const BLACK_ROOKS: [u8; 2] = [0x70, 0x77];
        const BLACK_KNIGHTS: [u8; 2] = [0x71, 0x76];
        const BLACK_BISHOPS: [u8; 2] = [0x72, 0x75];
        const BLACK_QUEEN: [u8; 1] = [0x73];
        const BLACK_KING: [u8; 1] = [0x74];

        match (color, kind) {
            (Color::White, PieceKind::Pawn) => &WHITE_PAWNS,
            (Color::White, PieceKind::Rook) => &WHITE_ROOKS,
            (Color::White, PieceKind::Knight) => &WHITE_KNIGHTS,
            (Color::White, PieceKind::Bishop) => &WHITE_BISHOPS,
            (Color::White, PieceKind::Queen) => &WHITE_QUEEN,
            (Color::White, PieceKind::King) => &WHITE_KING,
            (Color::Black, PieceKind::Pawn) => &BLACK_PAWNS,
            (Color::Black, PieceKind::Rook) => &BLACK_ROOKS,
            (Color::Black, PieceKind::Knight) => &BLACK_KNIGHTS,
            (Color::Black, PieceKind::Bishop) => &BLACK_BISHOPS,
            (Color::Black, PieceKind::Queen) => &BLACK_QUEEN,
            (Color::Black, PieceKind::King) => &BLACK_KING,
        }
    }

    /// Rank index (0-based) the pawns of `color` start on.
    pub fn pawn_start_rank(color: Color) -> u8 {
        match color {
            Color::White => 1,
            Color::Black => 6,
        }
    }

    /// Kind of the piece that starts on `file` of the back rank.
    pub fn back_rank_kind(file: u8) -> PieceKind {
        BACK_RANK[(file & 0x07) as usize]
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::empty()
    }
}

fn piece_letter(piece: Piece) -> char {
    let letter = match piece.kind() {
        None => return '.',
        Some(PieceKind::Pawn) => 'p',
        Some(PieceKind::Rook) => 'r',
        Some(PieceKind::Knight) => 'n',
        Some(PieceKind::Bishop) => 'b',
        Some(PieceKind::Queen) => 'q',
        Some(PieceKind::King) => 'k',
    };
    if piece.is_white() {
        letter.to_ascii_uppercase()
    } else {
        letter
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in (0..8u8).rev() {
            write!(f, "{} ", rank + 1)?;
            for file in 0..8u8 {
                let index = (rank << 4) | file;
                write!(f, "{}", piece_letter(self.fields[index as usize]))?;
            }
            writeln!(f)?;
        }
        write!(f, "  abcdefgh")
    }
}

#[cfg(test)]
#[path = "board_tests.rs"]
mod board_tests;
