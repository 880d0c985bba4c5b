//! Depth-limited adversarial search over a single mutable position.
//!
//! The searcher borrows the caller's [`Position`] mutably for the whole call
//! and walks the tree with apply/revert; the position is handed back exactly
//! as it was received. Nothing is shared between searches except the RNG.

pub mod minimax;

use rand::SeedableRng;
use rand::rngs::StdRng;
use rookery_core::{Move, Position};
use tracing::info;

use crate::config::SearchConfig;
use crate::error::SearchError;

/// Bound larger than any evaluation, checkmate included.
pub const INF: i32 = 1_000_000;

/// Result of a completed search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchResult {
    /// Best move at the root; `None` when the side to move has no move or
    /// the game is already over.
    pub best_move: Option<Move>,
    /// Root value in centipawns from White's perspective.
    pub score: i32,
    /// Positions visited, the root included.
    pub nodes: u64,
    /// Plies searched.
    pub depth: u8,
}

/// Minimax / alpha-beta searcher.
pub struct Searcher {
    config: SearchConfig,
    rng: StdRng,
    nodes: u64,
}

impl Searcher {
    /// Create a searcher. The shuffle RNG is seeded from `config.seed`, or
    /// from the thread RNG when no seed is given.
    pub fn new(config: SearchConfig) -> Self {
        let seed = config.seed.unwrap_or_else(rand::random);
        Self {
            config,
            rng: StdRng::seed_from_u64(seed),
            nodes: 0,
        }
    }

    #[inline]
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Positions visited since the last reset.
    #[inline]
    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    /// Zero the node counter.
    pub fn reset_nodes(&mut self) {
        self.nodes = 0;
    }

    /// Choose a move for the side to move in `position`.
    pub fn search(&mut self, position: &mut Position) -> Result<SearchResult, SearchError> {
        let depth = self.config.effective_depth();
        if depth == 0 {
            return Err(SearchError::ZeroDepth);
        }
        if position.pending_promotion().is_some() {
            return Err(SearchError::PromotionPending);
        }

        self.reset_nodes();
        let (best_move, score) = self.root(position, depth)?;
        let result = SearchResult {
            best_move,
            score,
            nodes: self.nodes,
            depth,
        };

        info!(
            strategy = %self.config.strategy,
            depth,
            nodes = result.nodes,
            score,
            best = ?best_move.map(|mv| mv.to_coordinate()),
            "search complete"
        );
        Ok(result)
    }
}

/// Choose a move for the side to move using `config`.
///
/// `position` is mutated during the search and restored before returning.
pub fn choose_move(position: &mut Position, config: &SearchConfig) -> Result<Option<Move>, SearchError> {
    Searcher::new(*config).search(position).map(|result| result.best_move)
}
