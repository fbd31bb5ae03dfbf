//! MinMax engine
//!
//! Minimax search with alpha-beta pruning over the pseudo-legal moves of
//! `chessai_core`.
//!
//! The engine is assembled from three pluggable parts:
//! - a [`StateAnalyser`] that scores leaf positions
//! - a [`MoveAnalyser`] that orders moves before they are searched
//! - a [`chessai_core::MoveCalculator`] that generates them
//!
//! [`MoveSelector`] drives the search (fixed depth, iterative deepening, or
//! interruptible through a [`chessai_core::TimeControl`]) and
//! [`SearchWorker`] runs it on a background thread.

pub mod move_analyser;
pub mod move_selector;
pub mod state_analyser;
pub mod worker;

pub use move_analyser::{
    DummyMoveAnalyser, FastMoveAnalyser, MoveAnalyser, MoveAnalyserKind,
    PreviousBestMoveAnalyser,
};
pub use move_selector::MoveSelector;
pub use state_analyser::{
    piece_value, value_of, MaterialStateAnalyser, SimpleStateAnalyser, StateAnalyser,
    StateAnalyserKind,
};
pub use worker::SearchWorker;
