//! Runs a search on its own thread so the caller can keep reading input.

use std::thread::{self, JoinHandle};

use chessai_core::{Engine, GameState, SearchLimits, SearchResult, TimeControl};
use tracing::debug;

use crate::move_selector::MoveSelector;

/// A search in flight. The selector travels to the worker thread and comes
/// back through [`SearchWorker::join`].
pub struct SearchWorker {
    handle: JoinHandle<(MoveSelector, SearchResult)>,
    control: TimeControl,
}

impl SearchWorker {
    /// Starts the clock on the calling thread, so a [`SearchWorker::stop`]
    /// issued right after spawning is never undone, then hands the search to
    /// a new thread.
    pub fn spawn(mut selector: MoveSelector, state: GameState, limits: SearchLimits) -> Self {
        limits.start();
        let control = limits.time_control.clone();
        let handle = thread::spawn(move || {
            let result = selector.search(&state, limits);
            debug!(
                depth = result.depth,
                nodes = result.nodes,
                stopped = result.stopped,
                "background search finished"
            );
            (selector, result)
        });
        Self { handle, control }
    }

    /// Asks the search to return its best completed result.
    pub fn stop(&self) {
        self.control.stop();
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Waits for the search. Errors only if the worker thread panicked.
    pub fn join(self) -> thread::Result<(MoveSelector, SearchResult)> {
        self.handle.join()
    }
}

#[cfg(test)]
#[path = "worker_tests.rs"]
mod worker_tests;
