//! Move value objects.

use std::fmt;
use std::hash::{Hash, Hasher};

use crate::piece::Piece;
use crate::piece_kind::PieceKind;
use crate::square::Square;

/// Special-move flags. Part of a move's identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct MoveFlags {
    pub en_passant: bool,
    pub castle: bool,
    pub promotes_to: Option<PieceKind>,
}

/// A move: origin, destination, the piece moved, the piece captured and
/// the special-move flags.
///
/// Two moves are equal iff origin, destination and flags coincide; the
/// recorded pieces are bookkeeping and take no part in comparison. Moves are
/// immutable once built; [`Move::with_promotion`] returns a new value.
#[derive(Clone, Copy)]
pub struct Move {
    from: Square,
    to: Square,
    piece: Piece,
    captured: Option<Piece>,
    flags: MoveFlags,
}

impl Move {
    /// A normal move or capture.
    pub const fn new(from: Square, to: Square, piece: Piece, captured: Option<Piece>) -> Move {
        Move {
            from,
            to,
            piece,
            captured,
            flags: MoveFlags {
                en_passant: false,
                castle: false,
                promotes_to: None,
            },
        }
    }

    /// An en passant capture. `captured` is the pawn taken beside the destination.
    pub const fn en_passant(from: Square, to: Square, pawn: Piece, captured: Piece) -> Move {
        Move {
            from,
            to,
            piece: pawn,
            captured: Some(captured),
            flags: MoveFlags {
                en_passant: true,
                castle: false,
                promotes_to: None,
            },
        }
    }

    /// A castling move, described by the king's origin and destination.
    pub const fn castle(from: Square, to: Square, king: Piece) -> Move {
        Move {
            from,
            to,
            piece: king,
            captured: None,
            flags: MoveFlags {
                en_passant: false,
                castle: true,
                promotes_to: None,
            },
        }
    }

    /// This move with its promotion choice fixed to `kind`.
    pub const fn with_promotion(self, kind: PieceKind) -> Move {
        Move {
            flags: MoveFlags {
                promotes_to: Some(kind),
                ..self.flags
            },
            ..self
        }
    }

    /// This move with no promotion choice attached.
    pub const fn without_promotion(self) -> Move {
        Move {
            flags: MoveFlags {
                promotes_to: None,
                ..self.flags
            },
            ..self
        }
    }

    #[inline]
    pub const fn from(self) -> Square {
        self.from
    }

    #[inline]
    pub const fn to(self) -> Square {
        self.to
    }

    /// The piece being moved.
    #[inline]
    pub const fn piece(self) -> Piece {
        self.piece
    }

    /// The piece removed by this move, if any.
    #[inline]
    pub const fn captured(self) -> Option<Piece> {
        self.captured
    }

    #[inline]
    pub const fn flags(self) -> MoveFlags {
        self.flags
    }

    #[inline]
    pub const fn is_en_passant(self) -> bool {
        self.flags.en_passant
    }

    #[inline]
    pub const fn is_castle(self) -> bool {
        self.flags.castle
    }

    #[inline]
    pub const fn is_capture(self) -> bool {
        self.captured.is_some()
    }

    /// The chosen promotion kind, if one is attached.
    #[inline]
    pub const fn promotes_to(self) -> Option<PieceKind> {
        self.flags.promotes_to
    }

    /// Return `true` if this is a pawn move onto its last rank.
    #[inline]
    pub fn is_promotion(self) -> bool {
        self.piece.kind() == PieceKind::Pawn && self.to.rank() == self.piece.color().promotion_rank()
    }

    /// Coordinate notation, e.g. `e2e4` or `e7e8q`.
    pub fn to_coordinate(self) -> String {
        self.to_string()
    }

    /// Piece glyph followed by the destination, e.g. `♘f3`.
    pub fn glyph_notation(self) -> String {
        format!("{}{}", self.piece.glyph(), self.to)
    }
}

impl PartialEq for Move {
    fn eq(&self, other: &Move) -> bool {
        self.from == other.from && self.to == other.to && self.flags == other.flags
    }
}

impl Eq for Move {}

impl Hash for Move {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.from.hash(state);
        self.to.hash(state);
        self.flags.hash(state);
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;
        if let Some(kind) = self.flags.promotes_to {
            write!(f, "{}", kind.letter())?;
        }
        Ok(())
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Move({} {:?}", self, self.piece)?;
        if let Some(captured) = self.captured {
            write!(f, " x{captured:?}")?;
        }
        if self.flags.en_passant {
            write!(f, " ep")?;
        }
        if self.flags.castle {
            write!(f, " castle")?;
        }
        write!(f, ")")
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::Move;
    use crate::color::Color;
    use crate::piece::Piece;
    use crate::piece_kind::PieceKind;
    use crate::square::Square;

    fn white(kind: PieceKind) -> Piece {
        Piece::new(kind, Color::White)
    }

    #[test]
    fn identity_ignores_bookkeeping() {
        let a = Move::new(Square::E2, Square::E4, white(PieceKind::Pawn).with_ident(5), None);
        let b = Move::new(Square::E2, Square::E4, white(PieceKind::Queen), None);
        assert_eq!(a, b);

        let mut set = HashSet::new();
        set.insert(a);
        set.insert(b);
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn flags_take_part_in_identity() {
        let pawn = white(PieceKind::Pawn);
        let black_pawn = Piece::new(PieceKind::Pawn, Color::Black);
        let plain = Move::new(Square::E5, Square::D6, pawn, None);
        let ep = Move::en_passant(Square::E5, Square::D6, pawn, black_pawn);
        assert_ne!(plain, ep);

        let push = Move::new(Square::A7, Square::A8, pawn, None);
        assert_ne!(push, push.with_promotion(PieceKind::Queen));
        assert_eq!(push, push.with_promotion(PieceKind::Rook).without_promotion());
    }

    #[test]
    fn promotion_detection() {
        let pawn = white(PieceKind::Pawn);
        assert!(Move::new(Square::B7, Square::B8, pawn, None).is_promotion());
        assert!(!Move::new(Square::B6, Square::B7, pawn, None).is_promotion());
        let black = Piece::new(PieceKind::Pawn, Color::Black);
        assert!(Move::new(Square::H2, Square::G1, black, Some(white(PieceKind::Knight))).is_promotion());
        assert!(!Move::new(Square::A7, Square::A8, white(PieceKind::Rook), None).is_promotion());
    }

    #[test]
    fn notation() {
        let pawn = white(PieceKind::Pawn);
        assert_eq!(Move::new(Square::E2, Square::E4, pawn, None).to_coordinate(), "e2e4");
        let promo = Move::new(Square::E7, Square::E8, pawn, None).with_promotion(PieceKind::Queen);
        assert_eq!(promo.to_string(), "e7e8q");
        let knight = Move::new(Square::G1, Square::F3, white(PieceKind::Knight), None);
        assert_eq!(knight.glyph_notation(), "♘f3");
    }

    #[test]
    fn castle_flags() {
        let mv = Move::castle(Square::E8, Square::C8, Piece::new(PieceKind::King, Color::Black));
        assert!(mv.is_castle());
        assert!(!mv.is_capture());
        assert!(!mv.is_en_passant());
    }
}
