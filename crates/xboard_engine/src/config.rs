//! Engine settings read from a TOML file.

use std::path::Path;
use std::time::Duration;

use anyhow::Context;
use chessai_core::{Color, PseudoLegalMoveCalculator};
use minmax_engine::{MoveAnalyserKind, MoveSelector, StateAnalyserKind};
use serde::{Deserialize, Serialize};

/// Every field is optional in the file; missing ones take the defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Deepest iterative-deepening step
    pub max_depth: u8,
    /// Thinking time per move in milliseconds
    pub move_time_ms: u64,
    pub state_analyser: StateAnalyserKind,
    pub move_analyser: MoveAnalyserKind,
    /// Skip a depth that is not expected to finish in the time left
    pub improved_time_estimate: bool,
    /// Filter used when `RUST_LOG` is unset
    pub log_level: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_depth: 6,
            move_time_ms: 5000,
            state_analyser: StateAnalyserKind::Simple,
            move_analyser: MoveAnalyserKind::Fast,
            improved_time_estimate: true,
            log_level: "info".to_string(),
        }
    }
}

impl EngineConfig {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        Self::from_toml(&contents).with_context(|| format!("invalid config {}", path.display()))
    }

    pub fn from_toml(contents: &str) -> anyhow::Result<Self> {
        let config: EngineConfig = toml::from_str(contents)?;
        anyhow::ensure!(config.max_depth > 0, "max_depth must be at least 1");
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let contents = toml::to_string_pretty(self).context("failed to serialize config")?;
        std::fs::write(path, contents)
            .with_context(|| format!("failed to write config {}", path.display()))
    }

    pub fn move_time(&self) -> Duration {
        Duration::from_millis(self.move_time_ms)
    }

    /// A selector wired with the configured analysers.
    pub fn build_selector(&self, engine_color: Color) -> MoveSelector {
        let mut selector = MoveSelector::new(
            engine_color,
            self.state_analyser.build(),
            self.move_analyser.build(),
            Box::new(PseudoLegalMoveCalculator::new()),
        );
        selector.set_improved_estimate(self.improved_time_estimate);
        selector
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod config_tests;
