//! Error types for position mutation and board snapshots.

use crate::chess_move::Move;
use crate::piece_kind::PieceKind;
use crate::square::Square;

/// Errors raised while mutating a [`Position`](crate::Position).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PositionError {
    /// The move is not among the legal moves of the current position.
    #[error("illegal move: {mv}")]
    IllegalMove {
        /// The rejected move.
        mv: Move,
    },
    /// `revert` was called with no move left to undo.
    #[error("no move to undo")]
    EmptyHistory,
    /// `resolve_promotion` was called while no pawn is waiting to promote.
    #[error("no promotion is pending")]
    NoPendingPromotion,
    /// A move was attempted while a pawn still waits for its promotion choice.
    #[error("pawn on {square} is waiting for a promotion choice")]
    PromotionPending {
        /// Square of the pawn awaiting promotion.
        square: Square,
    },
    /// A pawn cannot promote to the requested kind.
    #[error("cannot promote to {kind:?}")]
    InvalidPromotion {
        /// The rejected kind.
        kind: PieceKind,
    },
    /// Internal bookkeeping disagrees with the board, e.g. a corrupted capture log.
    #[error("invariant violated: {detail}")]
    InvariantViolation {
        /// What was inconsistent.
        detail: String,
    },
}

/// Errors that occur when reading a board snapshot string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SnapshotError {
    /// The snapshot does not have exactly 2 space-separated fields.
    #[error("expected placement and side fields, found {found} fields")]
    WrongFieldCount {
        /// Number of fields found.
        found: usize,
    },
    /// The placement does not have exactly 8 ranks.
    #[error("expected 8 ranks in placement, found {found}")]
    WrongRankCount {
        /// Number of ranks found.
        found: usize,
    },
    /// A rank describes more or fewer than 8 squares.
    #[error("rank {rank_index} describes {length} squares, expected 8")]
    BadRankLength {
        /// Zero-based rank index as written (0 = rank 8).
        rank_index: usize,
        /// Number of squares described.
        length: usize,
    },
    /// An unrecognized character appeared in the placement.
    #[error("invalid piece character: '{character}'")]
    InvalidPieceChar {
        /// The invalid character.
        character: char,
    },
    /// The side field is not "w" or "b".
    #[error("invalid side to move: \"{found}\"")]
    InvalidSide {
        /// The invalid side string.
        found: String,
    },
    /// A side does not have exactly one king.
    #[error("expected 1 king for {color}, found {count}")]
    InvalidKingCount {
        /// Which side has the wrong king count.
        color: &'static str,
        /// Number of kings found.
        count: usize,
    },
    /// The placement parsed but the resulting position is inconsistent.
    #[error(transparent)]
    Position(#[from] PositionError),
}

#[cfg(test)]
mod tests {
    use super::{PositionError, SnapshotError};
    use crate::square::Square;

    #[test]
    fn position_error_display() {
        assert_eq!(PositionError::EmptyHistory.to_string(), "no move to undo");
        let err = PositionError::PromotionPending { square: Square::E8 };
        assert_eq!(err.to_string(), "pawn on e8 is waiting for a promotion choice");
    }

    #[test]
    fn snapshot_error_display() {
        let err = SnapshotError::WrongRankCount { found: 7 };
        assert_eq!(err.to_string(), "expected 8 ranks in placement, found 7");
    }
}
