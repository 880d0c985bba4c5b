//! Static evaluation.
//!
//! Scores are centipawns from White's perspective: positive favors White,
//! negative favors Black. Terminal positions score as a fixed extreme
//! (checkmate) or zero (stalemate, dead draw).

pub mod material;
pub mod pst;

use rookery_core::{GameStatus, Position};

use self::material::material;
use self::pst::pst_value;

/// Magnitude of a checkmate score.
pub const CHECKMATE: i32 = 100_000;

/// Evaluation switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EvalConfig {
    /// Add piece-square bonuses on top of material. Off by default:
    /// material alone is the reference scoring.
    pub piece_square_tables: bool,
}

/// Score `position` from White's perspective.
///
/// Relies on the status recorded by move generation: a position only
/// scores as checkmate or stalemate once its legal moves were generated.
pub fn evaluate(position: &Position, config: &EvalConfig) -> i32 {
    match position.status() {
        // The side to move is the side that got mated.
        GameStatus::Checkmate => return -position.side_to_move().sign() * CHECKMATE,
        GameStatus::Stalemate | GameStatus::InsufficientMaterial => return 0,
        GameStatus::Ongoing => {}
    }

    let mut score = material(position);
    if config.piece_square_tables {
        score += position
            .pieces()
            .map(|(sq, piece)| piece.color().sign() * pst_value(piece, sq))
            .sum::<i32>();
    }
    score
}
