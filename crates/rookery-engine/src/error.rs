//! Error types for the search engine.

use rookery_core::PositionError;

/// Errors raised while choosing a move.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    /// The search walked the position into an inconsistent state.
    #[error(transparent)]
    Position(#[from] PositionError),
    /// A search needs at least one ply.
    #[error("search depth must be at least 1")]
    ZeroDepth,
    /// The position awaits a promotion choice, so no side may move.
    #[error("cannot search while a promotion is pending")]
    PromotionPending,
}

/// Errors from parsing a [`Strategy`](crate::Strategy) name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown strategy \"{found}\", expected minimax, alphabeta or shallow")]
pub struct StrategyParseError {
    pub found: String,
}
