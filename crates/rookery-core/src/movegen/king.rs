//! King move and castling generation.

use crate::attacks::is_square_attacked;
use crate::castle_rights::{CastlePath, CastleSide};
use crate::chess_move::Move;
use crate::direction::Direction;
use crate::piece::Piece;
use crate::piece_kind::PieceKind;
use crate::position::Position;
use crate::square::Square;

use super::MoveList;

/// Generate pseudo-legal king steps plus fully vetted castling moves.
pub(super) fn gen_king(position: &Position, from: Square, king: Piece, list: &mut MoveList) {
    let us = king.color();
    for dir in Direction::ALL_RAYS {
        let Some(to) = from.offset(dir) else {
            continue;
        };
        match position.piece_at(to) {
            None => list.push(Move::new(from, to, king, None)),
            Some(target) if target.color() != us => {
                list.push(Move::new(from, to, king, Some(target)));
            }
            Some(_) => {}
        }
    }

    let them = !us;
    for side in CastleSide::ALL {
        if !position.castling().has(us, side) {
            continue;
        }
        let path = CastlePath::of(us, side);
        if path.king_from != from {
            continue;
        }
        let rook_home = position
            .piece_at(path.rook_from)
            .is_some_and(|p| p.is(us, PieceKind::Rook));
        if !rook_home {
            continue;
        }

        // Every square strictly between king and rook must be empty.
        let Some(toward_rook) = Direction::between(path.king_from, path.rook_from) else {
            continue;
        };
        let path_clear = toward_rook
            .ray(path.king_from)
            .take_while(|&sq| sq != path.rook_from)
            .all(|sq| position.piece_at(sq).is_none());
        if !path_clear {
            continue;
        }

        // The king may not start in, pass through, or land on an attacked square.
        let Some(toward_dest) = Direction::between(path.king_from, path.king_to) else {
            continue;
        };
        let mut walked = std::iter::once(path.king_from).chain(
            toward_dest
                .ray(path.king_from)
                .take_while(|&sq| sq != path.king_to)
                .chain(std::iter::once(path.king_to)),
        );
        if walked.any(|sq| is_square_attacked(position, sq, them)) {
            continue;
        }

        list.push(Move::castle(path.king_from, path.king_to, king));
    }
}
