//! Byte-sized piece tags that also carry their own board position.

use std::fmt;

use crate::types::{Color, PieceKind};

/// A piece as stored on the board and in the per-side piece lists.
///
/// Bit layout of `flags`:
/// - bits 0..=2: piece type (0 = empty, see [`PieceKind`])
/// - bit 3: set for white
/// - bits 4..=6: transient search hints ([`Piece::HAS_MOVED`],
///   [`Piece::CHALLENGES_OTHER`], [`Piece::CHALLENGED`])
///
/// A piece whose type bits are zero is absent no matter which other bits are
/// set. Equality only looks at color, type and position; the hint flags never
/// make two pieces different.
#[derive(Clone, Copy, Debug, Default)]
pub struct Piece {
    flags: u8,
    position: u8,
}

impl Piece {
    pub const TYPE_MASK: u8 = 0b0000_0111;
    pub const WHITE: u8 = 0b0000_1000;
    pub const COLOR_AND_TYPE_MASK: u8 = Self::TYPE_MASK | Self::WHITE;

    pub const HAS_MOVED: u8 = 0b0001_0000;
    pub const CHALLENGES_OTHER: u8 = 0b0010_0000;
    pub const CHALLENGED: u8 = 0b0100_0000;
    pub const FLAG_MASK: u8 = Self::HAS_MOVED | Self::CHALLENGES_OTHER | Self::CHALLENGED;

    pub fn new(color: Color, kind: PieceKind, position: u8) -> Self {
        let color_bit = if color.is_white() { Self::WHITE } else { 0 };
        Self {
            flags: color_bit | kind.bits(),
            position,
        }
    }

    /// Marker for an empty square at `position`.
    pub fn empty(position: u8) -> Self {
        Self { flags: 0, position }
    }

    /// Raw constructor over the bit layout described on the type.
    pub fn from_bits(flags: u8, position: u8) -> Self {
        Self { flags, position }
    }

    pub fn kind(&self) -> Option<PieceKind> {
        PieceKind::from_bits(self.flags)
    }

    pub fn is_empty(&self) -> bool {
        self.kind().is_none()
    }

    pub fn is_kind(&self, kind: PieceKind) -> bool {
        self.kind() == Some(kind)
    }

    pub fn is_white(&self) -> bool {
        self.flags & Self::WHITE != 0
    }

    pub fn color(&self) -> Color {
        Color::from_is_white(self.is_white())
    }

    pub fn color_and_type(&self) -> u8 {
        self.flags & Self::COLOR_AND_TYPE_MASK
    }

    pub fn position(&self) -> u8 {
        self.position
    }

    pub fn flags(&self) -> u8 {
        self.flags
    }

    pub fn has_flag(&self, flag: u8) -> bool {
        self.flags & flag == flag
    }

    /// Same piece with additional hint flags set. Color and type are untouched.
    pub fn with_flags(self, flags: u8) -> Self {
        Self {
            flags: self.flags | (flags & Self::FLAG_MASK),
            position: self.position,
        }
    }

    pub fn without_challenge_tags(self) -> Self {
        Self {
            flags: self.flags & !(Self::CHALLENGES_OTHER | Self::CHALLENGED),
            position: self.position,
        }
    }

    /// The piece after it has been moved to `position`. Challenge tags
    /// describe the old square and are dropped.
    pub fn moved_to(self, position: u8) -> Self {
        Self {
            flags: self.color_and_type() | Self::HAS_MOVED,
            position,
        }
    }

    /// Same color on `position`, but a different type (promotion).
    pub(crate) fn promoted_to(self, kind: PieceKind, position: u8) -> Self {
        Piece::new(self.color(), kind, position).with_flags(Self::HAS_MOVED)
    }
}

impl PartialEq for Piece {
    fn eq(&self, other: &Self) -> bool {
        self.color_and_type() == other.color_and_type() && self.position == other.position
    }
}

impl Eq for Piece {}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind() {
            None => write!(f, "None"),
            Some(kind) => {
                let color = if self.is_white() { "White" } else { "Black" };
                write!(f, "{} {}", color, kind.name())
            }
        }
    }
}

#[cfg(test)]
#[path = "piece_tests.rs"]
mod piece_tests;
