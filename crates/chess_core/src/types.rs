#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Color {
    White,
    Black,
}
impl Color {
    pub fn other(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }
    pub fn idx(self) -> usize {
        match self {
            Color::White => 0,
            Color::Black => 1,
        }
    }
    pub fn is_white(self) -> bool {
        self == Color::White
    }
    pub fn from_is_white(is_white: bool) -> Color {
        if is_white {
            Color::White
        } else {
            Color::Black
        }
    }
}

/// Piece types as stored in the low three bits of a [`crate::Piece`].
/// Zero is reserved for "no piece".
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum PieceKind {
    Pawn = 1,
    Rook = 2,
    Knight = 3,
    Bishop = 4,
    Queen = 5,
    King = 6,
}

impl PieceKind {
    pub const ALL: [PieceKind; 6] = [
        PieceKind::Pawn,
        PieceKind::Rook,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Queen,
        PieceKind::King,
    ];

    pub fn from_bits(bits: u8) -> Option<PieceKind> {
        match bits & 0b0111 {
            1 => Some(PieceKind::Pawn),
            2 => Some(PieceKind::Rook),
            3 => Some(PieceKind::Knight),
            4 => Some(PieceKind::Bishop),
            5 => Some(PieceKind::Queen),
            6 => Some(PieceKind::King),
            _ => None,
        }
    }

    pub fn bits(self) -> u8 {
        self as u8
    }

    /// Zero-based index, handy for per-kind lookup tables.
    pub fn idx(self) -> usize {
        self as usize - 1
    }

    pub fn name(self) -> &'static str {
        match self {
            PieceKind::Pawn => "Pawn",
            PieceKind::Rook => "Rook",
            PieceKind::Knight => "Knight",
            PieceKind::Bishop => "Bishop",
            PieceKind::Queen => "Queen",
            PieceKind::King => "King",
        }
    }
}

/// Board directions as seen from one side of the table. See
/// [`crate::Board::direction`] for the mirrored offsets.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

// Helpers
pub fn file_of(index: u8) -> u8 {
    index & 0x07
}
pub fn rank_of(index: u8) -> u8 {
    index >> 4
}
pub fn square(file: u8, rank: u8) -> Option<u8> {
    if file < 8 && rank < 8 {
        Some((rank << 4) | file)
    } else {
        None
    }
}
