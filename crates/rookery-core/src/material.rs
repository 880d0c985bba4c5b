//! Dead-draw classification by remaining material.

use crate::error::PositionError;
use crate::piece::Piece;
use crate::piece_kind::PieceKind;
use crate::square::Square;

/// Material is only classified once this many pieces or fewer remain.
pub const MAX_DRAWN_PIECES: usize = 4;

/// Return `true` if `pieces` match one of the drawn patterns:
/// K v K, K+B v K, K+N v K, or K+B v K+B with bishops on same-colored squares.
///
/// `pieces` is every occupied square on the board.
pub fn is_dead_draw(pieces: &[(Square, Piece)]) -> Result<bool, PositionError> {
    let kings = pieces.iter().filter(|(_, p)| p.kind() == PieceKind::King).count();
    if kings != 2 {
        return Err(PositionError::InvariantViolation {
            detail: format!("expected 2 kings on the board, found {kings}"),
        });
    }

    let others: Vec<(Square, Piece)> = pieces
        .iter()
        .copied()
        .filter(|(_, p)| p.kind() != PieceKind::King)
        .collect();

    match others.as_slice() {
        [] => Ok(true),
        [(_, piece)] => Ok(piece.kind().is_minor()),
        [(a_sq, a), (b_sq, b)]
            if a.color() != b.color() && a.kind() == PieceKind::Bishop && b.kind() == PieceKind::Bishop =>
        {
            Ok(a_sq.is_light() == b_sq.is_light())
        }
        _ => Ok(false),
    }
}
