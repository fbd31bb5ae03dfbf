//! Minimax search with alpha-beta pruning and iterative deepening.
//!
//! Scores are always taken from the engine's point of view: the engine's
//! plies maximise, the opponent's plies minimise. The selector keeps one
//! best-move slot per ply. A finished search leaves the chosen move in slot
//! zero, and every slot seeds the move ordering of the next, deeper search.

use std::time::{Duration, Instant};

use chessai_core::{
    Color, Engine, GameState, Move, MoveCalculator, PseudoLegalMoveCalculator, SearchLimits,
    SearchResult, TimeControl,
};
use tracing::debug;

use crate::move_analyser::{FastMoveAnalyser, MoveAnalyser};
use crate::state_analyser::{SimpleStateAnalyser, StateAnalyser};

/// Default length of the best-move array. It grows on demand.
const DEFAULT_PATH_CAPACITY: usize = 8;

pub struct MoveSelector {
    engine_color: Color,
    state_analyser: Box<dyn StateAnalyser>,
    move_analyser: Box<dyn MoveAnalyser>,
    move_calculator: Box<dyn MoveCalculator>,
    /// Best move found at each ply of the last search.
    best_moves: Vec<Option<Move>>,
    nodes_visited: u64,
    nodes_visited_max: u64,
    last_score: i32,
    last_depth: u8,
    /// Whether the last search ended before reaching its maximum depth.
    stopped: bool,
    improved_estimate: bool,
    /// Cancellation token consulted inside the tree. Only set while an
    /// interruptible depth is running.
    control: Option<TimeControl>,
    aborted: bool,
}

impl MoveSelector {
    pub fn new(
        engine_color: Color,
        state_analyser: Box<dyn StateAnalyser>,
        move_analyser: Box<dyn MoveAnalyser>,
        move_calculator: Box<dyn MoveCalculator>,
    ) -> Self {
        Self::with_path_capacity(
            engine_color,
            state_analyser,
            move_analyser,
            move_calculator,
            DEFAULT_PATH_CAPACITY,
        )
    }

    /// Like [`MoveSelector::new`] with `initial_len` best-move slots up front.
    pub fn with_path_capacity(
        engine_color: Color,
        state_analyser: Box<dyn StateAnalyser>,
        move_analyser: Box<dyn MoveAnalyser>,
        move_calculator: Box<dyn MoveCalculator>,
        initial_len: usize,
    ) -> Self {
        Self {
            engine_color,
            state_analyser,
            move_analyser,
            move_calculator,
            best_moves: vec![None; initial_len],
            nodes_visited: 0,
            nodes_visited_max: 0,
            last_score: 0,
            last_depth: 0,
            stopped: false,
            improved_estimate: false,
            control: None,
            aborted: false,
        }
    }

    /// Simple evaluation, fast ordering and the pseudo-legal generator.
    pub fn with_defaults(engine_color: Color) -> Self {
        Self::new(
            engine_color,
            Box::new(SimpleStateAnalyser),
            Box::new(FastMoveAnalyser),
            Box::new(PseudoLegalMoveCalculator::new()),
        )
    }

    pub fn engine_color(&self) -> Color {
        self.engine_color
    }

    pub fn set_engine_color(&mut self, color: Color) {
        self.engine_color = color;
    }

    /// Nodes entered by the pruned search since the last reset.
    pub fn nodes_visited(&self) -> u64 {
        self.nodes_visited
    }

    /// Nodes entered by [`MoveSelector::best_move_exhaustive`] since the
    /// last reset.
    pub fn nodes_visited_max(&self) -> u64 {
        self.nodes_visited_max
    }

    pub fn best_moves(&self) -> &[Option<Move>] {
        &self.best_moves
    }

    /// Root value of the last completed depth.
    pub fn last_score(&self) -> i32 {
        self.last_score
    }

    /// Last depth searched to completion.
    pub fn last_depth(&self) -> u8 {
        self.last_depth
    }

    pub fn stopped(&self) -> bool {
        self.stopped
    }

    pub fn improved_estimate(&self) -> bool {
        self.improved_estimate
    }

    /// Makes [`MoveSelector::best_move_with_control`] skip a depth it does
    /// not expect to finish in the remaining time.
    pub fn set_improved_estimate(&mut self, enabled: bool) {
        self.improved_estimate = enabled;
    }

    pub fn reset_counters(&mut self) {
        self.nodes_visited = 0;
        self.nodes_visited_max = 0;
    }

    /// Forgets the move-ordering hints of earlier searches.
    pub fn clear_best_moves(&mut self) {
        self.best_moves.fill(None);
    }

    /// Fixed-depth search. Returns `None` for depth zero or when the engine
    /// has no move.
    pub fn best_move(&mut self, state: &GameState, depth: u8) -> Option<Move> {
        self.nodes_visited = 0;
        self.stopped = false;
        self.search_depth(state, depth)
    }

    /// Iterative deepening up to `max_depth`, checking the clock only
    /// between depths. The first depth always runs.
    pub fn best_move_iterative(
        &mut self,
        state: &GameState,
        time_limit: Duration,
        max_depth: u8,
    ) -> Option<Move> {
        let tc = TimeControl::new(Some(time_limit));
        tc.start();
        self.deepen(state, &tc, max_depth, false, false)
    }

    /// Like [`MoveSelector::best_move_iterative`], but also skips the next
    /// depth when its estimated duration exceeds the time left.
    pub fn best_move_iterative_improved(
        &mut self,
        state: &GameState,
        time_limit: Duration,
        max_depth: u8,
    ) -> Option<Move> {
        let tc = TimeControl::new(Some(time_limit));
        tc.start();
        self.deepen(state, &tc, max_depth, true, false)
    }

    /// Iterative deepening that can also be cut short inside a depth.
    ///
    /// The tree reads `tc` every `check_interval` nodes. An interrupted
    /// depth is thrown away and the result of the last completed depth is
    /// returned. The first depth is never interrupted, so a position with
    /// moves always yields one. `tc` is expected to be started already.
    pub fn best_move_with_control(
        &mut self,
        state: &GameState,
        tc: &TimeControl,
        max_depth: u8,
    ) -> Option<Move> {
        self.deepen(state, tc, max_depth, self.improved_estimate, true)
    }

    /// Plain minimax over the full tree, no pruning and no reordering.
    /// Counts into `nodes_visited_max`; the root value lands in
    /// `last_score`. Picks the first move with the highest value.
    pub fn best_move_exhaustive(&mut self, state: &GameState, depth: u8) -> Option<Move> {
        self.nodes_visited_max = 0;
        if depth == 0 {
            return None;
        }
        self.nodes_visited_max += 1;
        if Self::is_game_over(state) {
            return None;
        }
        let moves = self.moves_for(state, true);
        let mut best: Option<(Move, i32)> = None;
        for mv in moves {
            let child = state.apply_move(&mv);
            let value = self.min_max_exhaustive(depth as usize - 1, false, &child);
            if best.map_or(true, |(_, v)| value > v) {
                best = Some((mv, value));
            }
        }
        let (mv, value) = best?;
        self.last_score = value;
        self.last_depth = depth;
        Some(mv)
    }

    fn deepen(
        &mut self,
        state: &GameState,
        tc: &TimeControl,
        max_depth: u8,
        improved: bool,
        interruptible: bool,
    ) -> Option<Move> {
        self.reset_counters();
        self.stopped = false;

        let mut best = None;
        let mut previous: Option<Duration> = None;
        let mut last: Option<Duration> = None;

        for depth in 1..=max_depth {
            if depth > 1 {
                if tc.check_time() {
                    self.stopped = true;
                    break;
                }
                if improved && !Self::next_depth_fits(tc, last, previous) {
                    debug!(depth, "not enough time left for the next depth");
                    self.stopped = true;
                    break;
                }
            }

            let hint = self.best_moves.first().copied().flatten();
            self.control = (interruptible && depth > 1).then(|| tc.clone());
            let depth_start = Instant::now();
            let result = self.search_depth(state, depth);
            self.control = None;

            if self.aborted {
                if let Some(slot) = self.best_moves.first_mut() {
                    *slot = hint;
                }
                debug!(depth, nodes = self.nodes_visited, "depth interrupted");
                self.stopped = true;
                break;
            }

            best = result;
            previous = last;
            last = Some(depth_start.elapsed());
            debug!(
                depth,
                nodes = self.nodes_visited,
                elapsed_ms = tc.elapsed().as_millis() as u64,
                score = self.last_score,
                best = %best.map(|m| m.to_algebraic()).unwrap_or_default(),
                "completed depth"
            );
        }
        best
    }

    /// The next depth is assumed to take at least twice as long as the last
    /// one, or longer if the last step grew faster than that.
    fn next_depth_fits(
        tc: &TimeControl,
        last: Option<Duration>,
        previous: Option<Duration>,
    ) -> bool {
        let (Some(last), Some(remaining)) = (last, tc.remaining()) else {
            return true;
        };
        let growth = match previous {
            Some(p) if !p.is_zero() => (last.as_secs_f64() / p.as_secs_f64()).max(2.0),
            _ => 2.0,
        };
        Duration::try_from_secs_f64(last.as_secs_f64() * growth)
            .map_or(false, |estimate| estimate <= remaining)
    }

    /// One fixed-depth pass that keeps the node counter running.
    fn search_depth(&mut self, state: &GameState, depth: u8) -> Option<Move> {
        if depth == 0 {
            return None;
        }
        let plies = depth as usize;
        if self.best_moves.len() < plies {
            self.best_moves.resize(plies, None);
        }
        self.aborted = false;
        let score = self.min_max(plies, 0, true, state, i32::MIN, i32::MAX);
        if self.aborted {
            return None;
        }
        self.last_score = score;
        self.last_depth = depth;
        self.best_moves[0]
    }

    /// A ply's best-move slot is updated on every improvement, including the
    /// move that causes a cutoff, so the next deeper pass tries the refutation
    /// first.
    fn min_max(
        &mut self,
        search_depth: usize,
        current_depth: usize,
        is_maximizer: bool,
        state: &GameState,
        mut alpha: i32,
        mut beta: i32,
    ) -> i32 {
        self.nodes_visited += 1;
        let nodes = self.nodes_visited;
        if self
            .control
            .as_ref()
            .is_some_and(|tc| tc.should_check_time(nodes) && tc.check_time())
        {
            self.aborted = true;
            return 0;
        }

        if current_depth == search_depth {
            return self.evaluate(state);
        }
        let hint = self.best_moves[current_depth].take();
        if Self::is_game_over(state) {
            return self.evaluate(state);
        }

        // The opponent's captures mark which of its pieces are attacking and
        // which of ours are attacked, before our moves snapshot them.
        let tagged;
        let parent = if self.move_analyser.uses_challenge_tags() {
            tagged = state.with_challenge_tags(&self.moves_for(state, !is_maximizer));
            &tagged
        } else {
            state
        };
        let mut moves = self.moves_for(parent, is_maximizer);
        if moves.is_empty() {
            return self.evaluate(state);
        }
        self.move_analyser
            .sort_moves_by_best(parent, &mut moves, hint.as_ref());

        for mv in moves {
            let child = parent.apply_move(&mv);
            let value = self.min_max(
                search_depth,
                current_depth + 1,
                !is_maximizer,
                &child,
                alpha,
                beta,
            );
            if self.aborted {
                return 0;
            }
            if is_maximizer {
                if value > alpha {
                    alpha = value;
                    self.best_moves[current_depth] = Some(mv);
                    if alpha >= beta {
                        return alpha;
                    }
                }
            } else if value < beta {
                beta = value;
                self.best_moves[current_depth] = Some(mv);
                if alpha >= beta {
                    return beta;
                }
            }
        }

        if is_maximizer {
            alpha
        } else {
            beta
        }
    }

    fn min_max_exhaustive(
        &mut self,
        depth_left: usize,
        is_maximizer: bool,
        state: &GameState,
    ) -> i32 {
        self.nodes_visited_max += 1;
        if depth_left == 0 || Self::is_game_over(state) {
            return self.evaluate(state);
        }
        let moves = self.moves_for(state, is_maximizer);
        if moves.is_empty() {
            return self.evaluate(state);
        }
        let mut best = if is_maximizer { i32::MIN } else { i32::MAX };
        for mv in moves {
            let child = state.apply_move(&mv);
            let value = self.min_max_exhaustive(depth_left - 1, !is_maximizer, &child);
            best = if is_maximizer {
                best.max(value)
            } else {
                best.min(value)
            };
        }
        best
    }

    /// Moves for the engine when maximising, for its opponent otherwise.
    fn moves_for(&self, state: &GameState, is_maximizer: bool) -> Vec<Move> {
        let for_white = self.engine_color.is_white() == is_maximizer;
        self.move_calculator
            .calculate_possible_moves(state, for_white)
    }

    fn evaluate(&self, state: &GameState) -> i32 {
        self.state_analyser
            .static_analysis(state, self.engine_color.is_white())
    }

    /// A captured king ends the line.
    fn is_game_over(state: &GameState) -> bool {
        state.is_king_missing(Color::White) || state.is_king_missing(Color::Black)
    }
}

impl Engine for MoveSelector {
    /// Plays the side to move. Honours the depth limit, the clock and the
    /// stop flag in `limits`.
    fn search(&mut self, state: &GameState, limits: SearchLimits) -> SearchResult {
        if !limits.time_control.is_started() {
            limits.start();
        }
        self.set_engine_color(state.side_to_move());

        let best_move = self.best_move_with_control(state, &limits.time_control, limits.depth);

        SearchResult {
            best_move,
            score: self.last_score,
            depth: self.last_depth,
            nodes: self.nodes_visited,
            stopped: self.stopped,
        }
    }

    fn name(&self) -> &str {
        "MinMax"
    }

    fn new_game(&mut self) {
        self.reset_counters();
        self.clear_best_moves();
        self.last_score = 0;
        self.last_depth = 0;
        self.stopped = false;
    }

    fn set_option(&mut self, name: &str, value: &str) -> bool {
        match name {
            "improved_time_estimate" => match value.parse::<bool>() {
                Ok(enabled) => {
                    self.set_improved_estimate(enabled);
                    true
                }
                Err(_) => false,
            },
            _ => false,
        }
    }
}

#[cfg(test)]
#[path = "move_selector_tests.rs"]
mod move_selector_tests;
