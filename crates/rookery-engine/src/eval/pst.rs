//! Piece-square tables (PST) for all six piece types.
//!
//! All tables are defined from White's perspective in LERF order:
//! index 0 = A1, index 7 = H1, index 8 = A2, ..., index 63 = H8.
//! Use [`pst_value`] to look up the value for either color.

use rookery_core::{Color, Piece, PieceKind, Square};

#[rustfmt::skip]
const PAWN_PST: [i32; 64] = [
    // Rank 1 (never used)
      0,   0,   0,   0,   0,   0,   0,   0,
    // Rank 2
      5,  10,  10, -20, -20,  10,  10,   5,
    // Rank 3
      5,  -5, -10,   0,   0, -10,  -5,   5,
    // Rank 4
      0,   0,   0,  20,  20,   0,   0,   0,
    // Rank 5
      5,   5,  10,  25,  25,  10,   5,   5,
    // Rank 6
     10,  10,  20,  30,  30,  20,  10,  10,
    // Rank 7
     50,  50,  50,  50,  50,  50,  50,  50,
    // Rank 8 (never used)
      0,   0,   0,   0,   0,   0,   0,   0,
];

#[rustfmt::skip]
const KNIGHT_PST: [i32; 64] = [
    -50, -40, -30, -30, -30, -30, -40, -50,
    -40, -20,   0,   5,   5,   0, -20, -40,
    -30,   5,  10,  15,  15,  10,   5, -30,
    -30,   0,  15,  20,  20,  15,   0, -30,
    -30,   5,  15,  20,  20,  15,   5, -30,
    -30,   0,  10,  15,  15,  10,   0, -30,
    -40, -20,   0,   0,   0,   0, -20, -40,
    -50, -40, -30, -30, -30, -30, -40, -50,
];

#[rustfmt::skip]
const BISHOP_PST: [i32; 64] = [
    -20, -10, -10, -10, -10, -10, -10, -20,
    -10,   5,   0,   0,   0,   0,   5, -10,
    -10,  10,  10,  10,  10,  10,  10, -10,
    -10,   0,  10,  10,  10,  10,   0, -10,
    -10,   5,   5,  10,  10,   5,   5, -10,
    -10,   0,   5,  10,  10,   5,   0, -10,
    -10,   0,   0,   0,   0,   0,   0, -10,
    -20, -10, -10, -10, -10, -10, -10, -20,
];

#[rustfmt::skip]
const ROOK_PST: [i32; 64] = [
      0,   0,   0,   5,   5,   0,   0,   0,
     -5,   0,   0,   0,   0,   0,   0,  -5,
     -5,   0,   0,   0,   0,   0,   0,  -5,
     -5,   0,   0,   0,   0,   0,   0,  -5,
     -5,   0,   0,   0,   0,   0,   0,  -5,
     -5,   0,   0,   0,   0,   0,   0,  -5,
      5,  10,  10,  10,  10,  10,  10,   5,
      0,   0,   0,   0,   0,   0,   0,   0,
];

#[rustfmt::skip]
const QUEEN_PST: [i32; 64] = [
    -20, -10, -10,  -5,  -5, -10, -10, -20,
    -10,   0,   5,   0,   0,   0,   0, -10,
    -10,   5,   5,   5,   5,   5,   0, -10,
      0,   0,   5,   5,   5,   5,   0,  -5,
     -5,   0,   5,   5,   5,   5,   0,  -5,
    -10,   0,   5,   5,   5,   5,   0, -10,
    -10,   0,   0,   0,   0,   0,   0, -10,
    -20, -10, -10,  -5,  -5, -10, -10, -20,
];

/// Middlegame king table: stay behind the pawn shield.
#[rustfmt::skip]
const KING_PST: [i32; 64] = [
     20,  30,  10,   0,   0,  10,  30,  20,
     20,  20,   0,   0,   0,   0,  20,  20,
    -10, -20, -20, -20, -20, -20, -20, -10,
    -20, -30, -30, -40, -40, -30, -30, -20,
    -30, -40, -40, -50, -50, -40, -40, -30,
    -30, -40, -40, -50, -50, -40, -40, -30,
    -30, -40, -40, -50, -50, -40, -40, -30,
    -30, -40, -40, -50, -50, -40, -40, -30,
];

/// Tables indexed by [`PieceKind::index()`].
const TABLES: [&[i32; 64]; PieceKind::COUNT] = [
    &PAWN_PST,
    &KNIGHT_PST,
    &BISHOP_PST,
    &ROOK_PST,
    &QUEEN_PST,
    &KING_PST,
];

/// Positional bonus for `piece` standing on `sq`, from its owner's point of view.
///
/// Black looks up the vertically mirrored square.
#[inline]
pub fn pst_value(piece: Piece, sq: Square) -> i32 {
    let index = match piece.color() {
        Color::White => sq.index(),
        Color::Black => sq.index() ^ 56,
    };
    TABLES[piece.kind().index()][index]
}

#[cfg(test)]
mod tests {
    use rookery_core::{Color, Piece, PieceKind, Square};

    use super::pst_value;

    #[test]
    fn colors_mirror() {
        let white = Piece::new(PieceKind::Knight, Color::White);
        let black = Piece::new(PieceKind::Knight, Color::Black);
        assert_eq!(pst_value(white, Square::G1), pst_value(black, Square::G8));
        assert_eq!(pst_value(white, Square::D4), pst_value(black, Square::D5));
    }

    #[test]
    fn central_knights_beat_rim_knights() {
        let knight = Piece::new(PieceKind::Knight, Color::White);
        assert!(pst_value(knight, Square::E4) > pst_value(knight, Square::A4));
    }

    #[test]
    fn advanced_pawns_gain() {
        let pawn = Piece::new(PieceKind::Pawn, Color::Black);
        assert!(pst_value(pawn, Square::E2) > pst_value(pawn, Square::E6));
    }
}
