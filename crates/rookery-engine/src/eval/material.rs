//! Material values.
//!
//! Scores are centipawns from White's perspective (positive = White ahead).

use rookery_core::{PieceKind, Position};

/// Base material values indexed by [`PieceKind::index()`].
///
/// | Piece  | value |
/// |--------|-------|
/// | Pawn   |   100 |
/// | Knight |   300 |
/// | Bishop |   300 |
/// | Rook   |   500 |
/// | Queen  |   900 |
/// | King   |  9000 |
///
/// Both kings are always on the board, so the king term cancels out; it is
/// kept so a lone king is never valued below any other piece.
pub const MATERIAL_VALUE: [i32; PieceKind::COUNT] = [100, 300, 300, 500, 900, 9000];

/// Value of a single piece of `kind`.
#[inline]
pub const fn piece_value(kind: PieceKind) -> i32 {
    MATERIAL_VALUE[kind.index()]
}

/// Signed material sum over every occupied square.
pub fn material(position: &Position) -> i32 {
    position
        .pieces()
        .map(|(_, piece)| piece.color().sign() * piece_value(piece.kind()))
        .sum()
}
