//! Move ordering. Good ordering is what lets alpha-beta cut subtrees early.

use std::cmp::Reverse;

use chessai_core::{GameState, Move, Piece};
use serde::{Deserialize, Serialize};

use crate::state_analyser::value_of;

/// Bonus for taking a piece that is itself attacking something.
pub const CHALLENGER_BONUS: i32 = 100;

pub trait MoveAnalyser: Send {
    /// Cheap guess at how promising `mv` is; higher is examined earlier.
    fn move_analysis(&self, state: &GameState, mv: &Move) -> i32;

    /// Reorders `moves` so that `previous_best` (the move that won this ply
    /// in the previous, shallower search) comes first.
    fn sort_moves_by_best(
        &self,
        state: &GameState,
        moves: &mut [Move],
        previous_best: Option<&Move>,
    );

    /// Whether the ordering reads the challenge tags. The search only pays
    /// for tagging positions when it does.
    fn uses_challenge_tags(&self) -> bool {
        false
    }
}

/// Leaves the generator's order alone. Maximises node counts, which makes
/// it the baseline for pruning measurements.
#[derive(Clone, Copy, Debug, Default)]
pub struct DummyMoveAnalyser;

impl MoveAnalyser for DummyMoveAnalyser {
    fn move_analysis(&self, _state: &GameState, _mv: &Move) -> i32 {
        0
    }

    fn sort_moves_by_best(
        &self,
        _state: &GameState,
        _moves: &mut [Move],
        _previous_best: Option<&Move>,
    ) {
    }
}

/// Only pulls the previous best move to the front.
#[derive(Clone, Copy, Debug, Default)]
pub struct PreviousBestMoveAnalyser;

impl MoveAnalyser for PreviousBestMoveAnalyser {
    fn move_analysis(&self, _state: &GameState, _mv: &Move) -> i32 {
        0
    }

    fn sort_moves_by_best(
        &self,
        _state: &GameState,
        moves: &mut [Move],
        previous_best: Option<&Move>,
    ) {
        let Some(best) = previous_best else {
            return;
        };
        if let Some(i) = moves.iter().position(|m| m == best) {
            moves[..=i].rotate_right(1);
        }
    }
}

/// Captures first, most valuable victim first, with bonuses read from the
/// challenge tags the search leaves on the position.
#[derive(Clone, Copy, Debug, Default)]
pub struct FastMoveAnalyser;

impl FastMoveAnalyser {
    fn score(mv: &Move) -> i32 {
        let target = mv.target_piece();
        let mut value = value_of(target);
        if target.has_flag(Piece::CHALLENGES_OTHER) {
            value += CHALLENGER_BONUS;
        }
        let mover = mv.move_piece();
        if mover.has_flag(Piece::CHALLENGED) {
            value += value_of(mover);
        }
        value
    }
}

impl MoveAnalyser for FastMoveAnalyser {
    fn move_analysis(&self, _state: &GameState, mv: &Move) -> i32 {
        Self::score(mv)
    }

    fn sort_moves_by_best(
        &self,
        _state: &GameState,
        moves: &mut [Move],
        previous_best: Option<&Move>,
    ) {
        moves.sort_by_cached_key(|m| (Some(m) != previous_best, Reverse(Self::score(m))));
    }

    fn uses_challenge_tags(&self) -> bool {
        true
    }
}

/// Which ordering a selector is built with.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoveAnalyserKind {
    Dummy,
    PreviousBest,
    #[default]
    Fast,
}

impl MoveAnalyserKind {
    pub fn build(self) -> Box<dyn MoveAnalyser> {
        match self {
            MoveAnalyserKind::Dummy => Box::new(DummyMoveAnalyser),
            MoveAnalyserKind::PreviousBest => Box::new(PreviousBestMoveAnalyser),
            MoveAnalyserKind::Fast => Box::new(FastMoveAnalyser),
        }
    }
}

#[cfg(test)]
#[path = "move_analyser_tests.rs"]
mod move_analyser_tests;
