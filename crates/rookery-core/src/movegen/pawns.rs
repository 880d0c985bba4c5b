//! Pawn move generation.

use crate::chess_move::Move;
use crate::direction::Direction;
use crate::piece::Piece;
use crate::piece_kind::PieceKind;
use crate::position::Position;
use crate::square::Square;

use super::MoveList;

/// Generate pseudo-legal pushes and captures for the pawn on `from`.
///
/// A push or capture onto the last rank is emitted once, without a
/// promotion choice; the choice is supplied when the move is resolved.
pub(super) fn gen_pawn(position: &Position, from: Square, pawn: Piece, list: &mut MoveList) {
    let us = pawn.color();
    let forward = us.forward();

    if let Some(one) = from.offset(Direction::new(forward, 0))
        && position.piece_at(one).is_none()
    {
        list.push(Move::new(from, one, pawn, None));
        if from.rank() == us.pawn_rank()
            && let Some(two) = one.offset(Direction::new(forward, 0))
            && position.piece_at(two).is_none()
        {
            list.push(Move::new(from, two, pawn, None));
        }
    }

    for side in [-1, 1] {
        let Some(to) = from.offset(Direction::new(forward, side)) else {
            continue;
        };
        match position.piece_at(to) {
            Some(target) if target.color() != us => {
                list.push(Move::new(from, to, pawn, Some(target)));
            }
            Some(_) => {}
            None if position.en_passant() == Some(to) => {
                let beside = Square::new(from.rank(), to.file());
                if let Some(victim) = position.piece_at(beside)
                    && victim.is(!us, PieceKind::Pawn)
                {
                    list.push(Move::en_passant(from, to, pawn, victim));
                }
            }
            None => {}
        }
    }
}
