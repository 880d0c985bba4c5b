//! Sliding piece (bishop, rook, queen) move generation.

use crate::chess_move::Move;
use crate::direction::Direction;
use crate::piece::Piece;
use crate::position::Position;
use crate::square::Square;

use super::MoveList;

/// Walk each ray in `rays` from `from`, stopping at the first piece met.
/// An enemy blocker yields one capture; an ally yields nothing.
pub(super) fn gen_slider(
    position: &Position,
    from: Square,
    slider: Piece,
    rays: &[Direction],
    list: &mut MoveList,
) {
    for &dir in rays {
        for to in dir.ray(from) {
            match position.piece_at(to) {
                None => list.push(Move::new(from, to, slider, None)),
                Some(target) => {
                    if target.color() != slider.color() {
                        list.push(Move::new(from, to, slider, Some(target)));
                    }
                    break;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::movegen::pseudo_moves;
    use crate::position::Position;
    use crate::snapshot::Snapshot;
    use crate::square::Square;

    #[test]
    fn queen_in_open_board_has_27_moves() {
        let pos: Position = "4k3/8/8/8/3Q4/8/8/7K w".parse::<Snapshot>().unwrap().into_position().unwrap();
        let queen = pseudo_moves(&pos).iter().filter(|m| m.from() == Square::D4).count();
        assert_eq!(queen, 27);
    }

    #[test]
    fn rook_stops_at_blockers() {
        let pos: Position = "4k3/8/8/8/R2n4/8/P7/7K w".parse::<Snapshot>().unwrap().into_position().unwrap();
        let targets: Vec<Square> = pseudo_moves(&pos)
            .iter()
            .filter(|m| m.from() == Square::A4)
            .map(|m| m.to())
            .collect();
        // North to a8, east through the knight on d4, south to a3.
        assert_eq!(targets.len(), 4 + 3 + 1);
        assert!(targets.contains(&Square::D4));
        assert!(!targets.contains(&Square::E4));
        assert!(!targets.contains(&Square::A2));
    }
}
