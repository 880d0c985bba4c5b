//! Knight move generation.

use crate::chess_move::Move;
use crate::direction::Direction;
use crate::piece::Piece;
use crate::position::Position;
use crate::square::Square;

use super::MoveList;

/// Generate pseudo-legal knight jumps from `from`.
pub(super) fn gen_knight(position: &Position, from: Square, knight: Piece, list: &mut MoveList) {
    for jump in Direction::KNIGHT_JUMPS {
        let Some(to) = from.offset(jump) else {
            continue;
        };
        match position.piece_at(to) {
            None => list.push(Move::new(from, to, knight, None)),
            Some(target) if target.color() != knight.color() => {
                list.push(Move::new(from, to, knight, Some(target)));
            }
            Some(_) => {}
        }
    }
}
