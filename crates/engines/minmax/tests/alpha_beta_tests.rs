//! Pruned search against plain minimax on positions from random playouts.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;

use chessai_core::{Color, GameState, MoveCalculator, PseudoLegalMoveCalculator};
use minmax_engine::{
    DummyMoveAnalyser, FastMoveAnalyser, MaterialStateAnalyser, MoveAnalyser, MoveSelector,
    SimpleStateAnalyser,
};

fn random_position(seed: u64) -> GameState {
    let mut rng = StdRng::seed_from_u64(seed);
    let calc = PseudoLegalMoveCalculator::new();
    let mut state = GameState::new_game(Color::White);
    let plies = rng.gen_range(2..14);
    for _ in 0..plies {
        let side = state.side_to_move();
        if state.is_king_missing(Color::White) || state.is_king_missing(Color::Black) {
            break;
        }
        let moves = calc.calculate_possible_moves(&state, side.is_white());
        match moves.choose(&mut rng) {
            Some(mv) => state = state.apply_move(mv),
            None => break,
        }
    }
    state
}

fn selector_for(state: &GameState, move_analyser: Box<dyn MoveAnalyser>) -> MoveSelector {
    MoveSelector::new(
        state.side_to_move(),
        Box::new(SimpleStateAnalyser),
        move_analyser,
        Box::new(PseudoLegalMoveCalculator::new()),
    )
}

struct Comparison {
    seed: u64,
    pruned: (Option<String>, i32, u64),
    full: (Option<String>, i32, u64),
}

fn compare(seed: u64, depth: u8) -> Comparison {
    let state = random_position(seed);
    let mut pruned = selector_for(&state, Box::new(DummyMoveAnalyser));
    let mut full = selector_for(&state, Box::new(DummyMoveAnalyser));

    let a = pruned.best_move(&state, depth).map(|m| m.to_string());
    let b = full.best_move_exhaustive(&state, depth).map(|m| m.to_string());
    Comparison {
        seed,
        pruned: (a, pruned.last_score(), pruned.nodes_visited()),
        full: (b, full.last_score(), full.nodes_visited_max()),
    }
}

#[test]
fn pruning_keeps_move_and_value() {
    let results: Vec<Comparison> = (0..24u64).into_par_iter().map(|s| compare(s, 3)).collect();
    for c in results {
        assert_eq!(c.pruned.0, c.full.0, "best move differs for seed {}", c.seed);
        if c.full.0.is_some() {
            assert_eq!(c.pruned.1, c.full.1, "root value differs for seed {}", c.seed);
        }
        assert!(
            c.pruned.2 <= c.full.2,
            "seed {}: pruned {} > full {}",
            c.seed,
            c.pruned.2,
            c.full.2
        );
    }
}

#[test]
fn pruning_keeps_move_and_value_at_depth_four() {
    let results: Vec<Comparison> = (100..102u64).into_par_iter().map(|s| compare(s, 4)).collect();
    for c in results {
        assert_eq!(c.pruned.0, c.full.0, "best move differs for seed {}", c.seed);
        if c.full.0.is_some() {
            assert_eq!(c.pruned.1, c.full.1, "root value differs for seed {}", c.seed);
            assert!(c.pruned.2 < c.full.2, "no cutoff for seed {}", c.seed);
        }
    }
}

#[test]
fn ordering_does_not_change_the_root_value() {
    let values: Vec<Option<(u64, i32, i32)>> = (200..216u64)
        .into_par_iter()
        .map(|seed| {
            let state = random_position(seed);
            let mut ordered = selector_for(&state, Box::new(FastMoveAnalyser));
            let mut full = selector_for(&state, Box::new(DummyMoveAnalyser));
            // Warm the hints with a shallower pass first.
            ordered.best_move(&state, 2);
            let found = ordered.best_move(&state, 3).is_some();
            let expected = full.best_move_exhaustive(&state, 3).is_some();
            assert_eq!(found, expected, "seed {seed}");
            found.then(|| (seed, ordered.last_score(), full.last_score()))
        })
        .collect();
    for (seed, ordered, full) in values.into_iter().flatten() {
        assert_eq!(ordered, full, "seed {seed}");
    }
}

#[test]
fn opening_depth_one_loses_no_material() {
    let state = GameState::new_game(Color::White);
    let mut sel = MoveSelector::new(
        Color::White,
        Box::new(MaterialStateAnalyser),
        Box::new(FastMoveAnalyser),
        Box::new(PseudoLegalMoveCalculator::new()),
    );
    let mv = sel.best_move(&state, 1).expect("white has moves");
    assert!(mv.move_piece().is_white());
    assert!(sel.last_score() >= 0);
}
