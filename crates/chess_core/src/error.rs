//! Error taxonomy for the engine core.
//!
//! Only input-facing failures are represented here. An off-board index
//! reaching the board or the state transition is a programming error and
//! trips an assertion instead of producing a value.

use thiserror::Error;

/// Recoverable failures surfaced to callers of the core.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChessError {
    /// A piece was given a position outside the valid 0x88 sub-range
    #[error("invalid board index {0:#04x}")]
    InvalidIndex(u8),

    /// A square or move string could not be decoded
    #[error("cannot parse `{input}`: {reason}")]
    Parse { input: String, reason: &'static str },

    /// A promotion to something other than queen, rook, bishop or knight
    #[error("illegal promotion piece `{0}`")]
    IllegalMoveType(char),

    /// Two pieces were placed on the same square while building a state
    #[error("square {0:#04x} is already occupied")]
    OccupiedSquare(u8),
}

impl ChessError {
    pub(crate) fn parse(input: &str, reason: &'static str) -> Self {
        ChessError::Parse {
            input: input.to_string(),
            reason,
        }
    }
}

/// Result type alias for core operations
pub type ChessResult<T> = Result<T, ChessError>;
