//! One game as seen by the front end: the position, who the engine plays,
//! and the search that may be running in the background.

use std::time::Duration;

use chessai_core::{
    file_of, rank_of, ChessError, Color, Engine, GameState, Move, MoveType, PieceKind,
    PseudoLegalMoveCalculator, SearchLimits, SearchResult,
};
use minmax_engine::{MoveSelector, SearchWorker};
use tracing::{debug, info, trace, warn};

use crate::config::EngineConfig;
use crate::protocol::{Command, Response};

pub struct Session {
    config: EngineConfig,
    state: GameState,
    engine_color: Color,
    force_mode: bool,
    game_over: bool,
    quitting: bool,
    max_depth: u8,
    move_time: Duration,
    /// Idle selector. Absent while a worker owns it.
    selector: Option<MoveSelector>,
    worker: Option<SearchWorker>,
}

impl Session {
    /// A fresh game with the engine playing Black.
    pub fn new(config: EngineConfig) -> Self {
        let engine_color = Color::Black;
        Self {
            selector: Some(config.build_selector(engine_color)),
            state: GameState::new_game(engine_color),
            engine_color,
            force_mode: false,
            game_over: false,
            quitting: false,
            max_depth: config.max_depth,
            move_time: config.move_time(),
            worker: None,
            config,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn engine_color(&self) -> Color {
        self.engine_color
    }

    pub fn is_force_mode(&self) -> bool {
        self.force_mode
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    pub fn is_quitting(&self) -> bool {
        self.quitting
    }

    pub fn is_searching(&self) -> bool {
        self.worker.is_some()
    }

    pub fn max_depth(&self) -> u8 {
        self.max_depth
    }

    pub fn move_time(&self) -> Duration {
        self.move_time
    }

    pub fn handle(&mut self, command: Command) -> Vec<Response> {
        debug!(?command, "received");
        match command {
            Command::Xboard => Vec::new(),
            Command::Protover(_) => vec![Response::Features {
                name: self.engine_name(),
            }],
            Command::New => {
                self.cancel_search();
                self.new_game();
                Vec::new()
            }
            Command::Force => {
                self.cancel_search();
                self.force_mode = true;
                Vec::new()
            }
            Command::Go => {
                self.cancel_search();
                self.force_mode = false;
                self.engine_color = self.state.side_to_move();
                self.start_search()
            }
            Command::Quit => {
                self.cancel_search();
                self.quitting = true;
                Vec::new()
            }
            Command::White => {
                self.cancel_search();
                self.engine_color = Color::Black;
                Vec::new()
            }
            Command::Black => {
                self.cancel_search();
                self.engine_color = Color::White;
                Vec::new()
            }
            Command::SetTime(time) => {
                self.move_time = time;
                Vec::new()
            }
            Command::SetDepth(depth) => {
                self.max_depth = depth;
                Vec::new()
            }
            Command::Ping(n) => vec![Response::Pong(n)],
            Command::MoveNow => {
                if let Some(worker) = &self.worker {
                    worker.stop();
                }
                Vec::new()
            }
            Command::Move(text) => self.opponent_move(&text),
            Command::Invalid { line, reason } => vec![Response::Error {
                reason: reason.to_string(),
                command: line,
            }],
            Command::Unknown(line) => {
                warn!(%line, "unknown command");
                vec![Response::Error {
                    reason: "unknown command".to_string(),
                    command: line,
                }]
            }
        }
    }

    /// Collects the engine's move if the background search has finished.
    pub fn poll(&mut self) -> Vec<Response> {
        match &self.worker {
            Some(worker) if worker.is_finished() => self.finish_search(),
            _ => Vec::new(),
        }
    }

    /// Blocks until the running search, if any, has produced its move.
    pub fn wait(&mut self) -> Vec<Response> {
        if self.worker.is_some() {
            self.finish_search()
        } else {
            Vec::new()
        }
    }

    fn engine_name(&self) -> String {
        self.selector
            .as_ref()
            .map(|s| s.name().to_string())
            .unwrap_or_else(|| "MinMax".to_string())
    }

    fn new_game(&mut self) {
        self.engine_color = Color::Black;
        self.state = GameState::new_game(self.engine_color);
        self.force_mode = false;
        self.game_over = false;
        self.max_depth = self.config.max_depth;
        self.move_time = self.config.move_time();
        if let Some(selector) = &mut self.selector {
            selector.new_game();
        }
        info!("new game");
    }

    fn opponent_move(&mut self, text: &str) -> Vec<Response> {
        if self.game_over {
            return vec![Response::Error {
                reason: "game is over".to_string(),
                command: text.to_string(),
            }];
        }
        self.cancel_search();

        let mv = match self.validate(text) {
            Ok(mv) => mv,
            Err(e) => {
                warn!(text, error = %e, "rejected move");
                return vec![Response::IllegalMove(text.to_string())];
            }
        };
        self.state = self.state.apply_move(&mv);
        trace!("position after {mv}:\n{}", self.state.board());

        let responses = self.check_game_over();
        let engine_to_move = self.state.side_to_move() == self.engine_color;
        if responses.is_empty() && !self.force_mode && engine_to_move {
            return self.start_search();
        }
        responses
    }

    /// Parses `text` and makes sure it moves a piece of the side to move.
    ///
    /// Ordinary moves must be in the generator's list. A promotion must be a
    /// pawn step onto the last rank that the generator would also make. A
    /// castle needs its right and an empty path between king and rook.
    /// En passant is only inferred by the parser when it is available.
    fn validate(&self, text: &str) -> Result<Move, ChessError> {
        let mv = Move::parse(text, &self.state)?;
        let side = self.state.side_to_move();
        let illegal = |reason| ChessError::Parse {
            input: text.to_string(),
            reason,
        };
        let piece = mv.move_piece();
        if piece.color() != side {
            return Err(illegal("not a move for the side to move"));
        }
        let generated = || {
            PseudoLegalMoveCalculator::new()
                .calc_moves_for_piece(&self.state, piece)
                .into_iter()
                .any(|m| m.start() == mv.start() && m.end() == mv.end())
        };

        match mv.move_type() {
            MoveType::Ordinary => {
                if !generated() {
                    return Err(illegal("not a move for the side to move"));
                }
            }
            MoveType::EnPassant => {}
            MoveType::Castling => {
                if !self.castle_allowed(&mv) {
                    return Err(illegal("castling is not available"));
                }
            }
            _ => {
                let last_rank = if side.is_white() { 7 } else { 0 };
                let is_pawn_step = piece.is_kind(PieceKind::Pawn)
                    && rank_of(mv.end()) == last_rank
                    && rank_of(mv.start()).abs_diff(last_rank) == 1;
                if !is_pawn_step || !generated() {
                    return Err(illegal("only a pawn reaching the last rank promotes"));
                }
            }
        }
        Ok(mv)
    }

    fn castle_allowed(&self, mv: &Move) -> bool {
        let side = self.state.side_to_move();
        let start = mv.start();
        let base = start & 0xF0;
        let (right, between) = if file_of(mv.end()) < file_of(start) {
            (self.state.can_a_rank_rook_castle(side), 1..file_of(start))
        } else {
            (self.state.can_h_rank_rook_castle(side), file_of(start) + 1..7)
        };
        right
            && between
                .map(|file| base | file)
                .all(|square| !self.state.board().is_field_occupied(square))
    }

    fn start_search(&mut self) -> Vec<Response> {
        if self.game_over {
            return Vec::new();
        }
        let Some(selector) = self.selector.take() else {
            return Vec::new();
        };
        let limits = SearchLimits::depth_and_time(self.max_depth, self.move_time);
        debug!(
            depth = self.max_depth,
            move_time_ms = self.move_time.as_millis() as u64,
            "thinking"
        );
        self.worker = Some(SearchWorker::spawn(selector, self.state.clone(), limits));
        Vec::new()
    }

    /// Stops the search and throws its result away.
    fn cancel_search(&mut self) {
        let Some(worker) = self.worker.take() else {
            return;
        };
        worker.stop();
        match worker.join() {
            Ok((selector, _)) => self.selector = Some(selector),
            Err(_) => self.replace_selector(),
        }
    }

    fn finish_search(&mut self) -> Vec<Response> {
        let Some(worker) = self.worker.take() else {
            return Vec::new();
        };
        let result = match worker.join() {
            Ok((selector, result)) => {
                self.selector = Some(selector);
                result
            }
            Err(_) => {
                self.replace_selector();
                return vec![Response::Error {
                    reason: "search failed".to_string(),
                    command: "go".to_string(),
                }];
            }
        };
        self.play_engine_move(result)
    }

    fn play_engine_move(&mut self, result: SearchResult) -> Vec<Response> {
        let Some(mv) = result.best_move else {
            self.game_over = true;
            return vec![Response::GameResult {
                winner: self.engine_color.other(),
                message: "Engine has no moves".to_string(),
            }];
        };
        info!(
            %mv,
            score = result.score,
            depth = result.depth,
            nodes = result.nodes,
            stopped = result.stopped,
            "engine move"
        );
        self.state = self.state.apply_move(&mv);
        trace!("position after {mv}:\n{}", self.state.board());
        let mut responses = vec![Response::Move(mv)];
        responses.extend(self.check_game_over());
        responses
    }

    fn check_game_over(&mut self) -> Vec<Response> {
        for loser in [Color::White, Color::Black] {
            if self.state.is_king_missing(loser) {
                self.game_over = true;
                let winner = loser.other();
                info!(?winner, "game over");
                return vec![Response::GameResult {
                    winner,
                    message: format!("{winner:?} captured the king"),
                }];
            }
        }
        Vec::new()
    }

    fn replace_selector(&mut self) {
        warn!("search thread panicked, rebuilding the engine");
        self.selector = Some(self.config.build_selector(self.engine_color));
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod session_tests;
