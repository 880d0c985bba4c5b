//! Search configuration.

use std::fmt;
use std::str::FromStr;

use crate::error::StrategyParseError;
use crate::eval::EvalConfig;

/// Depth used when none is configured.
pub const DEFAULT_DEPTH: u8 = 2;

/// Tree walk used to choose a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Strategy {
    /// Exhaustive minimax, no pruning.
    Minimax,
    /// Minimax with alpha-beta cutoffs: same value, fewer nodes.
    #[default]
    AlphaBeta,
    /// One-ply minimax for a weak opponent; the configured depth is ignored.
    Shallow,
}

impl FromStr for Strategy {
    type Err = StrategyParseError;

    fn from_str(s: &str) -> Result<Strategy, StrategyParseError> {
        match s.to_ascii_lowercase().as_str() {
            "minimax" => Ok(Strategy::Minimax),
            "alphabeta" | "alpha-beta" => Ok(Strategy::AlphaBeta),
            "shallow" => Ok(Strategy::Shallow),
            _ => Err(StrategyParseError { found: s.to_string() }),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Strategy::Minimax => "minimax",
            Strategy::AlphaBeta => "alphabeta",
            Strategy::Shallow => "shallow",
        };
        f.write_str(name)
    }
}

/// Parameters for one call to [`choose_move`](crate::choose_move).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchConfig {
    /// Plies to search.
    pub depth: u8,
    pub strategy: Strategy,
    /// Shuffle moves at every node so equal-valued moves vary between games.
    pub shuffle: bool,
    /// Seed for the shuffle; `None` draws a fresh seed per search.
    pub seed: Option<u64>,
    pub eval: EvalConfig,
}

impl SearchConfig {
    /// Plies actually searched, after the strategy has had its say.
    pub fn effective_depth(&self) -> u8 {
        match self.strategy {
            Strategy::Shallow => 1,
            Strategy::Minimax | Strategy::AlphaBeta => self.depth,
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            depth: DEFAULT_DEPTH,
            strategy: Strategy::default(),
            shuffle: true,
            seed: None,
            eval: EvalConfig::default(),
        }
    }
}
