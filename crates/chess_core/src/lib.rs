pub mod board;
pub mod error;
pub mod game_state;
pub mod move_calculator;
pub mod moves;
pub mod piece;
pub mod time_control;
pub mod types;

// Re-export the position model (not engine-specific)
pub use board::*;
pub use error::{ChessError, ChessResult};
pub use game_state::*;
pub use move_calculator::*;
pub use moves::*;
pub use piece::*;
pub use time_control::*;
pub use types::*;

// =============================================================================
// Engine trait: implemented by every move selector the front end can drive
// =============================================================================

/// Result of a search operation
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// The best move found (None if the side to move has no moves)
    pub best_move: Option<Move>,
    /// Static score of the chosen line from the engine's perspective
    pub score: i32,
    /// Deepest fully completed search depth
    pub depth: u8,
    /// Number of nodes visited
    pub nodes: u64,
    /// Whether the search was cut short by the clock or a stop request
    pub stopped: bool,
}

/// Trait that all move selectors implement.
pub trait Engine: Send {
    /// Search the position with the given search limits.
    ///
    /// # Arguments
    /// * `state` - The position to analyse; the engine plays its own color
    /// * `limits` - Search limits (depth, time, stop flag)
    ///
    /// # Returns
    /// SearchResult containing best move, score, and statistics
    fn search(&mut self, state: &GameState, limits: SearchLimits) -> SearchResult;

    /// Returns the engine's name for the protocol handshake
    fn name(&self) -> &str;

    fn author(&self) -> &str {
        "ChessAI"
    }

    /// Reset internal state for a new game (search hints, counters)
    fn new_game(&mut self) {}

    /// Optional: Set a named option. Returns true if the option was recognized.
    fn set_option(&mut self, _name: &str, _value: &str) -> bool {
        false
    }
}
