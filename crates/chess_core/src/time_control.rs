//! Search budgets and the shared stop flag.
//!
//! A [`TimeControl`] is cheap to clone; every clone shares one stop flag and
//! one start instant, so a front end can hold a clone and cancel a search
//! running on another thread.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};

/// How deep and how long a search may go. Whichever limit is hit first ends
/// the search.
#[derive(Debug, Clone)]
pub struct SearchLimits {
    /// Maximum search depth in plies
    pub depth: u8,
    /// Wall-clock budget for one move (None = no limit)
    pub move_time: Option<Duration>,
    /// Stop flag and clock shared with whoever may cancel the search
    pub time_control: TimeControl,
}

impl SearchLimits {
    /// Fixed-depth search without a clock.
    pub fn depth(depth: u8) -> Self {
        Self {
            depth,
            move_time: None,
            time_control: TimeControl::new(None),
        }
    }

    /// Iterative deepening up to `depth` within `move_time`.
    pub fn depth_and_time(depth: u8, move_time: Duration) -> Self {
        Self {
            depth,
            move_time: Some(move_time),
            time_control: TimeControl::new(Some(move_time)),
        }
    }

    /// Iterative deepening bounded by time only.
    pub fn time(move_time: Duration) -> Self {
        Self::depth_and_time(u8::MAX, move_time)
    }

    #[inline]
    pub fn should_stop(&self) -> bool {
        self.time_control.is_stopped()
    }

    /// Starts the clock. Call when the search begins.
    pub fn start(&self) {
        self.time_control.start();
    }
}

impl Default for SearchLimits {
    fn default() -> Self {
        Self::depth(4)
    }
}

#[derive(Debug, Clone)]
pub struct TimeControl {
    stopped: Arc<AtomicBool>,
    start_time: Arc<RwLock<Option<Instant>>>,
    time_limit: Option<Duration>,
    /// Nodes between two clock reads inside the search.
    check_interval: u64,
}

impl TimeControl {
    /// # Arguments
    /// * `time_limit` - Maximum time allowed for the search (None = infinite)
    pub fn new(time_limit: Option<Duration>) -> Self {
        Self {
            stopped: Arc::new(AtomicBool::new(false)),
            start_time: Arc::new(RwLock::new(None)),
            time_limit,
            check_interval: 1024,
        }
    }

    /// Same control, reading the clock every `nodes` visited nodes instead.
    pub fn with_check_interval(mut self, nodes: u64) -> Self {
        self.check_interval = nodes.max(1);
        self
    }

    pub fn time_limit(&self) -> Option<Duration> {
        self.time_limit
    }

    /// Starts (or restarts) the clock and clears the stop flag.
    pub fn start(&self) {
        if let Ok(mut start) = self.start_time.write() {
            *start = Some(Instant::now());
        }
        self.stopped.store(false, Ordering::SeqCst);
    }

    /// Asks every search sharing this control to finish as soon as it can.
    pub fn stop(&self) {
        self.stopped.store(true, Ordering::SeqCst);
    }

    #[inline]
    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::Relaxed)
    }

    /// Reads the clock and trips the stop flag once the budget is spent.
    /// Returns whether the search should stop.
    pub fn check_time(&self) -> bool {
        if self.is_stopped() {
            return true;
        }
        let Some(limit) = self.time_limit else {
            return false;
        };
        if self.is_started() && self.elapsed() >= limit {
            self.stop();
            return true;
        }
        false
    }

    /// True every `check_interval` nodes.
    #[inline]
    pub fn should_check_time(&self, nodes: u64) -> bool {
        nodes % self.check_interval == 0
    }

    /// Whether [`TimeControl::start`] has been called on this control or a
    /// clone of it.
    pub fn is_started(&self) -> bool {
        self.start_time.read().map(|s| s.is_some()).unwrap_or(false)
    }

    /// Time since [`TimeControl::start`], zero before it.
    pub fn elapsed(&self) -> Duration {
        self.start_time
            .read()
            .ok()
            .and_then(|s| s.map(|t| t.elapsed()))
            .unwrap_or(Duration::ZERO)
    }

    /// Budget left, `None` without a limit.
    pub fn remaining(&self) -> Option<Duration> {
        let limit = self.time_limit?;
        Some(limit.saturating_sub(self.elapsed()))
    }
}

impl Default for TimeControl {
    fn default() -> Self {
        Self::new(None)
    }
}

#[cfg(test)]
#[path = "time_control_tests.rs"]
mod time_control_tests;
