//! Board snapshot: piece placement plus side to move, as a compact string.
//!
//! The format is the first two fields of FEN, e.g.
//! `rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w`. Castling rights and the
//! en passant target are not carried.

use std::fmt;
use std::str::FromStr;

use crate::color::Color;
use crate::error::SnapshotError;
use crate::piece::Piece;
use crate::piece_kind::PieceKind;
use crate::position::Position;
use crate::square::Square;

/// Snapshot of the standard initial setup.
pub const STARTING_PLACEMENT: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w";

/// Read-only projection of a position's occupancy and side to move.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Snapshot {
    board: [Option<Piece>; Square::COUNT],
    side_to_move: Color,
}

impl Snapshot {
    /// Capture the occupancy and side to move of `position`.
    pub fn of(position: &Position) -> Snapshot {
        let mut board = [None; Square::COUNT];
        for (sq, piece) in position.pieces() {
            board[sq.index()] = Some(piece);
        }
        Snapshot {
            board,
            side_to_move: position.side_to_move(),
        }
    }

    #[inline]
    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.board[sq.index()]
    }

    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    /// Build a fresh position from this snapshot.
    ///
    /// Pieces are numbered per color and kind in square order, matching the
    /// numbering of [`Position::new_game`] for the initial setup. The result
    /// holds no castling rights and no en passant target.
    pub fn into_position(self) -> Result<Position, SnapshotError> {
        let mut next_ident = [[1u8; PieceKind::COUNT]; Color::COUNT];
        let mut board = [None; Square::COUNT];
        for sq in Square::all() {
            if let Some(piece) = self.board[sq.index()] {
                let counter = &mut next_ident[piece.color().index()][piece.kind().index()];
                board[sq.index()] = Some(Piece::new(piece.kind(), piece.color()).with_ident(*counter));
                *counter = counter.saturating_add(1);
            }
        }
        Position::from_board(board, self.side_to_move)
    }
}

impl FromStr for Snapshot {
    type Err = SnapshotError;

    fn from_str(s: &str) -> Result<Snapshot, SnapshotError> {
        let fields: Vec<&str> = s.split_whitespace().collect();
        if fields.len() != 2 {
            return Err(SnapshotError::WrongFieldCount {
                found: fields.len(),
            });
        }

        let ranks: Vec<&str> = fields[0].split('/').collect();
        if ranks.len() != 8 {
            return Err(SnapshotError::WrongRankCount { found: ranks.len() });
        }

        let mut board = [None; Square::COUNT];
        for (rank_index, rank_str) in ranks.iter().enumerate() {
            // Ranks are written from 8 down to 1
            let rank = 7 - rank_index as u8;
            let mut file: u8 = 0;

            for c in rank_str.chars() {
                if let Some(digit) = c.to_digit(10) {
                    if !(1..=8).contains(&digit) {
                        return Err(SnapshotError::InvalidPieceChar { character: c });
                    }
                    let length = file as usize + digit as usize;
                    if length > 8 {
                        return Err(SnapshotError::BadRankLength { rank_index, length });
                    }
                    file = length as u8;
                } else {
                    let kind = PieceKind::from_letter(c)
                        .ok_or(SnapshotError::InvalidPieceChar { character: c })?;
                    let color = if c.is_ascii_uppercase() {
                        Color::White
                    } else {
                        Color::Black
                    };
                    if file >= 8 {
                        return Err(SnapshotError::BadRankLength {
                            rank_index,
                            length: file as usize + 1,
                        });
                    }
                    board[Square::new(rank, file).index()] = Some(Piece::new(kind, color));
                    file += 1;
                }
            }

            if file != 8 {
                return Err(SnapshotError::BadRankLength {
                    rank_index,
                    length: file as usize,
                });
            }
        }

        let side_to_move = match fields[1] {
            "w" => Color::White,
            "b" => Color::Black,
            other => {
                return Err(SnapshotError::InvalidSide {
                    found: other.to_string(),
                });
            }
        };

        Ok(Snapshot { board, side_to_move })
    }
}

impl fmt::Display for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in (0u8..8).rev() {
            let mut empty = 0u8;
            for file in 0u8..8 {
                match self.board[Square::new(rank, file).index()] {
                    Some(piece) => {
                        if empty > 0 {
                            write!(f, "{empty}")?;
                            empty = 0;
                        }
                        write!(f, "{}", piece.letter())?;
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                write!(f, "{empty}")?;
            }
            if rank > 0 {
                write!(f, "/")?;
            }
        }
        write!(f, " {}", self.side_to_move)
    }
}

impl fmt::Debug for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Snapshot(\"{self}\")")
    }
}

#[cfg(test)]
mod tests {
    use super::{STARTING_PLACEMENT, Snapshot};
    use crate::castle_rights::CastleRights;
    use crate::color::Color;
    use crate::error::SnapshotError;
    use crate::piece_kind::PieceKind;
    use crate::position::Position;
    use crate::square::Square;

    #[test]
    fn new_game_projects_to_starting_placement() {
        let snapshot = Snapshot::of(&Position::new_game());
        assert_eq!(snapshot.to_string(), STARTING_PLACEMENT);
    }

    #[test]
    fn parsed_start_matches_new_game() {
        let parsed = STARTING_PLACEMENT
            .parse::<Snapshot>()
            .unwrap()
            .into_position()
            .unwrap()
            .with_castling(CastleRights::ALL);
        assert_eq!(parsed, Position::new_game());
    }

    #[test]
    fn roundtrip_after_moves() {
        let s = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R b";
        let snapshot: Snapshot = s.parse().unwrap();
        assert_eq!(snapshot.to_string(), s);
        assert_eq!(snapshot.side_to_move(), Color::Black);
        let queen = snapshot.piece_at(Square::E7).unwrap();
        assert!(queen.is(Color::Black, PieceKind::Queen));
    }

    #[test]
    fn rejects_malformed_input() {
        assert_eq!(
            "8/8/8/8/8/8/8 w".parse::<Snapshot>(),
            Err(SnapshotError::WrongRankCount { found: 7 })
        );
        assert_eq!(
            "8/8/8/8/8/8/8/8".parse::<Snapshot>(),
            Err(SnapshotError::WrongFieldCount { found: 1 })
        );
        assert_eq!(
            "8/8/8/8/8/8/8/7 w".parse::<Snapshot>(),
            Err(SnapshotError::BadRankLength { rank_index: 7, length: 7 })
        );
        assert_eq!(
            "8/8/8/8/8/8/8/7x w".parse::<Snapshot>(),
            Err(SnapshotError::InvalidPieceChar { character: 'x' })
        );
        assert_eq!(
            "8/8/8/8/8/8/8/8 x".parse::<Snapshot>(),
            Err(SnapshotError::InvalidSide { found: "x".to_string() })
        );
    }

    #[test]
    fn long_digit_run_is_rejected() {
        let placement = format!("{}/4k3/8/8/8/8/8/4K3 w", "8".repeat(33));
        assert_eq!(
            placement.parse::<Snapshot>(),
            Err(SnapshotError::BadRankLength { rank_index: 0, length: 16 })
        );
        assert_eq!(
            "44k3/8/8/8/8/8/8/4K3 w".parse::<Snapshot>(),
            Err(SnapshotError::BadRankLength { rank_index: 0, length: 9 })
        );
    }

    #[test]
    fn position_needs_one_king_each() {
        let snapshot: Snapshot = "8/8/8/8/8/8/8/4K3 w".parse().unwrap();
        assert_eq!(
            snapshot.into_position(),
            Err(SnapshotError::InvalidKingCount { color: "black", count: 0 })
        );
    }
}
