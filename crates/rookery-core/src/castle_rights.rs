//! Castling rights stored as a 4-bit field within a `u8`.

use std::fmt;

use crate::color::Color;
use crate::square::Square;

/// Which side of the board to castle toward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CastleSide {
    KingSide,
    QueenSide,
}

impl CastleSide {
    /// Both sides, king-side first.
    pub const ALL: [CastleSide; 2] = [CastleSide::KingSide, CastleSide::QueenSide];
}

/// Castling rights: bit 0 = WK, 1 = WQ, 2 = BK, 3 = BQ.
///
/// Over forward play rights only ever shrink; [`Position::revert`](crate::Position::revert)
/// restores the snapshot taken before the move.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct CastleRights(u8);

/// Rights lost when a move starts on, or lands on, a given square.
///
/// A king leaving its home square drops both rights for its color; a rook
/// leaving its corner, or being captured there, drops that corner's right.
const REVOKED_BY_SQUARE: [CastleRights; 64] = {
    let mut table = [CastleRights::NONE; 64];
    table[Square::E1.index()] = CastleRights::WHITE_BOTH;
    table[Square::A1.index()] = CastleRights::WHITE_QUEEN;
    table[Square::H1.index()] = CastleRights::WHITE_KING;
    table[Square::E8.index()] = CastleRights::BLACK_BOTH;
    table[Square::A8.index()] = CastleRights::BLACK_QUEEN;
    table[Square::H8.index()] = CastleRights::BLACK_KING;
    table
};

impl CastleRights {
    pub const NONE: CastleRights = CastleRights(0);
    pub const ALL: CastleRights = CastleRights(0b1111);

    pub const WHITE_KING: CastleRights = CastleRights(0b0001);
    pub const WHITE_QUEEN: CastleRights = CastleRights(0b0010);
    pub const BLACK_KING: CastleRights = CastleRights(0b0100);
    pub const BLACK_QUEEN: CastleRights = CastleRights(0b1000);

    pub const WHITE_BOTH: CastleRights = CastleRights(0b0011);
    pub const BLACK_BOTH: CastleRights = CastleRights(0b1100);

    /// Return `true` if no castling rights remain.
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Return `true` if all bits in `other` are set in `self`.
    #[inline]
    pub const fn contains(self, other: CastleRights) -> bool {
        (self.0 & other.0) == other.0
    }

    /// Return new rights with all bits from `other` added.
    #[inline]
    pub const fn insert(self, other: CastleRights) -> CastleRights {
        CastleRights(self.0 | other.0)
    }

    /// Return new rights with all bits from `other` removed.
    #[inline]
    pub const fn remove(self, other: CastleRights) -> CastleRights {
        CastleRights(self.0 & !other.0)
    }

    /// Check whether a specific color and side may still castle.
    #[inline]
    pub const fn has(self, color: Color, side: CastleSide) -> bool {
        self.contains(Self::flag(color, side))
    }

    /// The single-bit flag for a color and side.
    #[inline]
    pub const fn flag(color: Color, side: CastleSide) -> CastleRights {
        match (color, side) {
            (Color::White, CastleSide::KingSide) => Self::WHITE_KING,
            (Color::White, CastleSide::QueenSide) => Self::WHITE_QUEEN,
            (Color::Black, CastleSide::KingSide) => Self::BLACK_KING,
            (Color::Black, CastleSide::QueenSide) => Self::BLACK_QUEEN,
        }
    }

    /// Rights that remain after a move from `from` to `to`.
    #[inline]
    pub const fn after_move(self, from: Square, to: Square) -> CastleRights {
        self.remove(REVOKED_BY_SQUARE[from.index()])
            .remove(REVOKED_BY_SQUARE[to.index()])
    }
}

impl fmt::Display for CastleRights {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "-");
        }
        let letters = [
            (Self::WHITE_KING, 'K'),
            (Self::WHITE_QUEEN, 'Q'),
            (Self::BLACK_KING, 'k'),
            (Self::BLACK_QUEEN, 'q'),
        ];
        for (flag, letter) in letters {
            if self.contains(flag) {
                write!(f, "{letter}")?;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for CastleRights {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CastleRights({self})")
    }
}

/// Fixed squares involved in one castling move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CastlePath {
    pub king_from: Square,
    pub king_to: Square,
    pub rook_from: Square,
    pub rook_to: Square,
}

impl CastlePath {
    /// The king and rook squares for `color` castling toward `side`.
    pub const fn of(color: Color, side: CastleSide) -> CastlePath {
        match (color, side) {
            (Color::White, CastleSide::KingSide) => CastlePath {
                king_from: Square::E1,
                king_to: Square::G1,
                rook_from: Square::H1,
                rook_to: Square::F1,
            },
            (Color::White, CastleSide::QueenSide) => CastlePath {
                king_from: Square::E1,
                king_to: Square::C1,
                rook_from: Square::A1,
                rook_to: Square::D1,
            },
            (Color::Black, CastleSide::KingSide) => CastlePath {
                king_from: Square::E8,
                king_to: Square::G8,
                rook_from: Square::H8,
                rook_to: Square::F8,
            },
            (Color::Black, CastleSide::QueenSide) => CastlePath {
                king_from: Square::E8,
                king_to: Square::C8,
                rook_from: Square::A8,
                rook_to: Square::D8,
            },
        }
    }

    /// Look up the path whose king destination is `king_to`.
    pub fn by_king_destination(king_to: Square) -> Option<CastlePath> {
        Color::ALL
            .into_iter()
            .flat_map(|color| CastleSide::ALL.map(|side| CastlePath::of(color, side)))
            .find(|path| path.king_to == king_to)
    }
}

#[cfg(test)]
mod tests {
    use super::{CastlePath, CastleRights, CastleSide};
    use crate::color::Color;
    use crate::square::Square;

    #[test]
    fn has_color_side() {
        let rights = CastleRights::WHITE_KING.insert(CastleRights::BLACK_QUEEN);
        assert!(rights.has(Color::White, CastleSide::KingSide));
        assert!(!rights.has(Color::White, CastleSide::QueenSide));
        assert!(!rights.has(Color::Black, CastleSide::KingSide));
        assert!(rights.has(Color::Black, CastleSide::QueenSide));
    }

    #[test]
    fn king_move_drops_both() {
        let rights = CastleRights::ALL.after_move(Square::E1, Square::F1);
        assert_eq!(rights, CastleRights::BLACK_BOTH);
    }

    #[test]
    fn rook_capture_on_corner_drops_that_right() {
        // A white piece landing on h8 removes Black's king-side right.
        let rights = CastleRights::ALL.after_move(Square::B2, Square::H8);
        assert!(!rights.contains(CastleRights::BLACK_KING));
        assert!(rights.contains(CastleRights::BLACK_QUEEN));
        assert!(rights.contains(CastleRights::WHITE_BOTH));
    }

    #[test]
    fn quiet_moves_keep_rights() {
        assert_eq!(CastleRights::ALL.after_move(Square::E2, Square::E4), CastleRights::ALL);
    }

    #[test]
    fn display() {
        assert_eq!(format!("{}", CastleRights::ALL), "KQkq");
        assert_eq!(format!("{}", CastleRights::NONE), "-");
        assert_eq!(format!("{}", CastleRights::WHITE_QUEEN.insert(CastleRights::BLACK_KING)), "Qk");
    }

    #[test]
    fn castle_paths() {
        let path = CastlePath::of(Color::Black, CastleSide::QueenSide);
        assert_eq!(path.rook_from, Square::A8);
        assert_eq!(path.rook_to, Square::D8);
        assert_eq!(CastlePath::by_king_destination(Square::G1), Some(CastlePath::of(Color::White, CastleSide::KingSide)));
        assert_eq!(CastlePath::by_king_destination(Square::E4), None);
    }
}
