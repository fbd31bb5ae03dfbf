//! Static evaluation: material plus piece-square tables.

use chessai_core::{GameState, Piece, PieceKind};
use serde::{Deserialize, Serialize};

/// Scores a position for one side. Positive is good for `for_white`'s side,
/// and the score for the other side is exactly the negation.
pub trait StateAnalyser: Send {
    fn static_analysis(&self, state: &GameState, for_white: bool) -> i32;
}

/// Material values in centipawns. The king dwarfs everything else so that
/// losing it dominates any evaluation.
pub fn piece_value(kind: PieceKind) -> i32 {
    match kind {
        PieceKind::Pawn => 100,
        PieceKind::Knight => 300,
        PieceKind::Bishop => 300,
        PieceKind::Rook => 500,
        PieceKind::Queen => 900,
        PieceKind::King => 10_000,
    }
}

/// Value of `piece`, zero for an empty marker.
pub fn value_of(piece: Piece) -> i32 {
    piece.kind().map(piece_value).unwrap_or(0)
}

fn side_relative(white: i32, black: i32, for_white: bool) -> i32 {
    if for_white {
        white - black
    } else {
        black - white
    }
}

/// Material only; no positional terms.
#[derive(Clone, Copy, Debug, Default)]
pub struct MaterialStateAnalyser;

impl StateAnalyser for MaterialStateAnalyser {
    fn static_analysis(&self, state: &GameState, for_white: bool) -> i32 {
        let sum = |pieces: &[Piece]| pieces.iter().map(|&p| value_of(p)).sum::<i32>();
        side_relative(
            sum(state.white_pieces()),
            sum(state.black_pieces()),
            for_white,
        )
    }
}

/// Material plus a per-square bonus for every piece.
#[derive(Clone, Copy, Debug, Default)]
pub struct SimpleStateAnalyser;

impl SimpleStateAnalyser {
    /// Positional bonus for `piece` on its current square.
    pub fn position_points(piece: Piece) -> i32 {
        let Some(kind) = piece.kind() else {
            return 0;
        };
        // Black reads the mirrored right half of the row.
        let index = if piece.is_white() {
            piece.position()
        } else {
            piece.position() + 8
        };
        table(kind)[index as usize]
    }
}

impl StateAnalyser for SimpleStateAnalyser {
    fn static_analysis(&self, state: &GameState, for_white: bool) -> i32 {
        let sum = |pieces: &[Piece]| {
            pieces
                .iter()
                .map(|&p| value_of(p) + Self::position_points(p))
                .sum::<i32>()
        };
        side_relative(
            sum(state.white_pieces()),
            sum(state.black_pieces()),
            for_white,
        )
    }
}

/// Which evaluator a selector is built with.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StateAnalyserKind {
    #[default]
    Simple,
    Material,
}

impl StateAnalyserKind {
    pub fn build(self) -> Box<dyn StateAnalyser> {
        match self {
            StateAnalyserKind::Simple => Box::new(SimpleStateAnalyser),
            StateAnalyserKind::Material => Box::new(MaterialStateAnalyser),
        }
    }
}

// ---------------------------------------------------------------------------
// Piece-square tables
// ---------------------------------------------------------------------------
//
// Tables are written as seen from White with rank 8 on top and expanded into
// the 128-slot 0x88 layout. The off-board right half of every row holds the
// point reflection of the board, so a black piece on `i` reads `i + 8` and
// `table[127 - i] == table[i]` for every valid `i`.

pub(crate) fn table(kind: PieceKind) -> &'static [i32; 128] {
    match kind {
        PieceKind::Pawn => &PAWN_POINTS,
        PieceKind::Knight => &KNIGHT_POINTS,
        PieceKind::Bishop => &BISHOP_POINTS,
        PieceKind::Rook => &ROOK_POINTS,
        PieceKind::Queen => &QUEEN_POINTS,
        PieceKind::King => &KING_POINTS,
    }
}

const fn mirrored(visual: [i32; 64]) -> [i32; 128] {
    let mut out = [0; 128];
    let mut rank = 0;
    while rank < 8 {
        let mut file = 0;
        while file < 8 {
            let value = visual[(7 - rank) * 8 + file];
            let index = rank * 16 + file;
            out[index] = value;
            out[127 - index] = value;
            file += 1;
        }
        rank += 1;
    }
    out
}

#[rustfmt::skip]
const PAWN_POINTS: [i32; 128] = mirrored([
     0,  0,  0,  0,  0,  0,  0,  0,
     7,  7, 13, 23, 26, 13,  7,  7,
    -2, -2,  4, 12, 15,  4, -2, -2,
    -3, -3,  2,  9, 11,  2, -3, -3,
    -4, -4,  0,  6,  8,  0, -4, -4,
    -4, -4,  0,  4,  6,  0, -4, -4,
    -1, -1,  1,  5,  6,  1, -1, -1,
     0,  0,  0,  0,  0,  0,  0,  0,
]);

#[rustfmt::skip]
const KNIGHT_POINTS: [i32; 128] = mirrored([
    -2,  2,  7,  9,  9,  7,  2, -2,
     1,  4, 12, 13, 13, 12,  4,  1,
     5, 11, 18, 19, 19, 18, 11,  5,
     3, 10, 14, 14, 14, 14, 10,  3,
     0,  5,  8,  9,  9,  8,  5,  0,
    -3,  1,  3,  4,  4,  3,  1, -3,
    -5, -3, -1,  0,  0, -1, -3, -5,
    -7, -5, -4, -2, -2, -4, -5, -7,
]);

#[rustfmt::skip]
const BISHOP_POINTS: [i32; 128] = mirrored([
     2,  3,  4,  4,  4,  4,  3,  2,
     4,  7,  7,  7,  7,  7,  7,  4,
     3,  5,  6,  6,  6,  6,  5,  3,
     3,  5,  7,  7,  7,  7,  5,  3,
     4,  5,  6,  8,  8,  6,  5,  4,
     4,  5,  5, -2, -2,  5,  5,  3,
     5,  5,  5,  3,  3,  5,  5,  5,
     0,  0,  0,  0,  0,  0,  0,  0,
]);

#[rustfmt::skip]
const ROOK_POINTS: [i32; 128] = mirrored([
     9,  9, 11, 10, 11,  9,  9,  9,
     4,  6,  7,  9,  9,  7,  6,  4,
     9, 10, 10, 11, 11, 10, 10,  9,
     8,  8,  8,  9,  9,  8,  8,  8,
     6,  6,  5,  6,  6,  5,  6,  6,
     4,  5,  5,  5,  5,  5,  5,  4,
     3,  4,  4,  6,  6,  4,  4,  3,
     0,  0,  0,  0,  0,  0,  0,  0,
]);

#[rustfmt::skip]
const QUEEN_POINTS: [i32; 128] = mirrored([
     2,  3,  4,  3,  4,  3,  3,  2,
     2,  3,  4,  4,  4,  4,  3,  2,
     3,  4,  4,  4,  4,  4,  4,  3,
     3,  3,  4,  4,  4,  4,  3,  3,
     2,  3,  3,  4,  4,  3,  3,  2,
     2,  2,  2,  3,  3,  2,  2,  2,
     2,  2,  2,  2,  2,  2,  2,  2,
     0,  0,  0,  0,  0,  0,  0,  0,
]);

const KING_POINTS: [i32; 128] = [0; 128];

#[cfg(test)]
#[path = "state_analyser_tests.rs"]
mod state_analyser_tests;
