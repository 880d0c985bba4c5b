//! A piece on the board: color, kind and identity, bit-packed into a `u16`.

use std::fmt;

use crate::color::Color;
use crate::piece_kind::PieceKind;

/// A colored chess piece with an identity ordinal.
///
/// Bit layout:
/// - bits 0-2: [`PieceKind`] (values 0-5)
/// - bit 3: [`Color`] (0 = White, 1 = Black)
/// - bits 8-15: identity, telling apart otherwise identical pieces
///   (the two white rooks are identities 1 and 2, pawns 1-8 by file)
///
/// Two pieces compare equal only if color, kind and identity all match.
/// Use [`Piece::is`] to compare color and kind alone.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece(u16);

impl Piece {
    /// Create a piece with identity 0.
    #[inline]
    pub const fn new(kind: PieceKind, color: Color) -> Piece {
        Piece(((color as u16) << 3) | (kind as u16))
    }

    /// Return a copy of this piece carrying the given identity.
    #[inline]
    pub const fn with_ident(self, ident: u8) -> Piece {
        Piece((self.0 & 0x00FF) | ((ident as u16) << 8))
    }

    /// Return the piece kind.
    #[inline]
    pub const fn kind(self) -> PieceKind {
        match self.0 & 0x07 {
            0 => PieceKind::Pawn,
            1 => PieceKind::Knight,
            2 => PieceKind::Bishop,
            3 => PieceKind::Rook,
            4 => PieceKind::Queen,
            _ => PieceKind::King,
        }
    }

    /// Return the color.
    #[inline]
    pub const fn color(self) -> Color {
        match (self.0 >> 3) & 0x01 {
            0 => Color::White,
            _ => Color::Black,
        }
    }

    /// Return the identity ordinal.
    #[inline]
    pub const fn ident(self) -> u8 {
        (self.0 >> 8) as u8
    }

    /// Return `true` if this piece has the given color and kind, whatever its identity.
    #[inline]
    pub const fn is(self, color: Color, kind: PieceKind) -> bool {
        self.0 & 0x00FF == Piece::new(kind, color).0
    }

    /// Contiguous index 0-11 (White 0-5, Black 6-11) for fixed-size tables.
    #[inline]
    pub const fn index(self) -> usize {
        self.color().index() * PieceKind::COUNT + self.kind().index()
    }

    /// Snapshot letter: uppercase for White, lowercase for Black.
    #[inline]
    pub fn letter(self) -> char {
        let base = self.kind().letter();
        match self.color() {
            Color::White => base.to_ascii_uppercase(),
            Color::Black => base,
        }
    }

    /// Unicode chess glyph for this piece.
    pub const fn glyph(self) -> char {
        match (self.color(), self.kind()) {
            (Color::White, PieceKind::King) => '♔',
            (Color::White, PieceKind::Queen) => '♕',
            (Color::White, PieceKind::Rook) => '♖',
            (Color::White, PieceKind::Bishop) => '♗',
            (Color::White, PieceKind::Knight) => '♘',
            (Color::White, PieceKind::Pawn) => '♙',
            (Color::Black, PieceKind::King) => '♚',
            (Color::Black, PieceKind::Queen) => '♛',
            (Color::Black, PieceKind::Rook) => '♜',
            (Color::Black, PieceKind::Bishop) => '♝',
            (Color::Black, PieceKind::Knight) => '♞',
            (Color::Black, PieceKind::Pawn) => '♟',
        }
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

impl fmt::Debug for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind_char = self.kind().letter().to_ascii_uppercase();
        write!(f, "{}{}{}", self.color(), kind_char, self.ident())
    }
}
