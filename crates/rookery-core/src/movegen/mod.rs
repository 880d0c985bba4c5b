//! Legal move generation.
//!
//! Pseudo-legal moves are produced per piece kind, then filtered against the
//! pins and checks reported by [`analyze`](crate::attacks::analyze).

mod king;
mod knights;
mod pawns;
mod sliders;

use tracing::debug;

use crate::attacks::{Analysis, analyze, is_attacked_after};
use crate::chess_move::Move;
use crate::direction::Direction;
use crate::piece_kind::PieceKind;
use crate::position::{GameStatus, Position};
use crate::square::Square;

use self::king::gen_king;
use self::knights::gen_knight;
use self::pawns::gen_pawn;
use self::sliders::gen_slider;

/// Growable buffer of generated moves.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MoveList {
    moves: Vec<Move>,
}

impl MoveList {
    /// Create an empty move list. 218 is the most moves any position allows.
    pub fn new() -> MoveList {
        MoveList {
            moves: Vec::with_capacity(218),
        }
    }

    /// Push a move onto the list.
    #[inline]
    pub fn push(&mut self, mv: Move) {
        self.moves.push(mv);
    }

    /// Return the number of moves in the list.
    #[inline]
    pub fn len(&self) -> usize {
        self.moves.len()
    }

    /// Return `true` if the list is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    /// Return a slice of the moves.
    #[inline]
    pub fn as_slice(&self) -> &[Move] {
        &self.moves
    }

    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Move> {
        self.moves.iter()
    }

    /// Return `true` if a move equal to `mv` is present.
    pub fn contains(&self, mv: &Move) -> bool {
        self.moves.contains(mv)
    }

    /// Consume the list, returning the underlying vector.
    pub fn into_vec(self) -> Vec<Move> {
        self.moves
    }
}

impl std::ops::Index<usize> for MoveList {
    type Output = Move;
    #[inline]
    fn index(&self, index: usize) -> &Move {
        &self.moves[index]
    }
}

impl<'a> IntoIterator for &'a MoveList {
    type Item = &'a Move;
    type IntoIter = std::slice::Iter<'a, Move>;
    fn into_iter(self) -> Self::IntoIter {
        self.moves.iter()
    }
}

impl IntoIterator for MoveList {
    type Item = Move;
    type IntoIter = std::vec::IntoIter<Move>;
    fn into_iter(self) -> Self::IntoIter {
        self.moves.into_iter()
    }
}

impl FromIterator<Move> for MoveList {
    fn from_iter<I: IntoIterator<Item = Move>>(iter: I) -> Self {
        MoveList {
            moves: iter.into_iter().collect(),
        }
    }
}

/// Geometrically possible moves for the side to move, ignoring king safety
/// except for castling, whose squares are vetted here.
pub fn pseudo_moves(position: &Position) -> MoveList {
    let us = position.side_to_move();
    let mut list = MoveList::new();
    for (from, piece) in position.pieces().filter(|(_, p)| p.color() == us) {
        match piece.kind() {
            PieceKind::Pawn => gen_pawn(position, from, piece, &mut list),
            PieceKind::Knight => gen_knight(position, from, piece, &mut list),
            PieceKind::Bishop => gen_slider(position, from, piece, &Direction::DIAGONAL, &mut list),
            PieceKind::Rook => gen_slider(position, from, piece, &Direction::ORTHOGONAL, &mut list),
            PieceKind::Queen => gen_slider(position, from, piece, &Direction::ALL_RAYS, &mut list),
            PieceKind::King => gen_king(position, from, piece, &mut list),
        }
    }
    list
}

/// Square of the pawn removed by an en passant capture.
#[inline]
fn en_passant_victim(mv: Move) -> Square {
    Square::new(mv.from().rank(), mv.to().file())
}

/// Decide whether a pseudo-legal move keeps the mover's king safe.
fn is_legal(position: &Position, analysis: &Analysis, block: &[Square], mv: Move) -> bool {
    let us = position.side_to_move();
    let king = position.king_square(us);

    if mv.piece().kind() == PieceKind::King {
        // Castling squares were vetted during generation.
        return mv.is_castle() || !is_attacked_after(position, mv.to(), !us, &[king], None);
    }
    if analysis.is_double_check() {
        return false;
    }
    if let Some(pin) = analysis.pin_direction(mv.from()) {
        match Direction::between(mv.from(), mv.to()) {
            Some(dir) if dir == pin || dir == -pin => {}
            _ => return false,
        }
    }
    if analysis.in_check {
        let answers = block.contains(&mv.to())
            || (mv.is_en_passant() && block.contains(&en_passant_victim(mv)));
        if !answers {
            return false;
        }
    }
    if mv.is_en_passant() {
        // Both pawns leave the rank at once, which may expose the king.
        return !is_attacked_after(
            position,
            king,
            !us,
            &[mv.from(), en_passant_victim(mv)],
            Some(mv.to()),
        );
    }
    true
}

/// Strictly legal moves for the side to move. Does not touch the game status.
///
/// Returns an empty list while a promotion is pending.
pub fn legal_moves(position: &Position) -> (MoveList, Analysis) {
    let analysis = analyze(position);
    if position.pending_promotion().is_some() {
        return (MoveList::new(), analysis);
    }
    let block = if analysis.in_check {
        analysis.block_squares(position.king_square(position.side_to_move()))
    } else {
        Vec::new()
    };
    let moves = pseudo_moves(position)
        .into_iter()
        .filter(|&mv| is_legal(position, &analysis, &block, mv))
        .collect();
    (moves, analysis)
}

/// Generate all legal moves for the current position.
///
/// When none exist the position is marked checkmated (king attacked) or
/// stalemated. A pending promotion yields an empty list and leaves the status
/// alone.
pub fn generate_legal_moves(position: &mut Position) -> MoveList {
    if position.pending_promotion().is_some() {
        return MoveList::new();
    }
    let (moves, analysis) = legal_moves(position);
    if moves.is_empty() {
        let status = if analysis.in_check {
            GameStatus::Checkmate
        } else {
            GameStatus::Stalemate
        };
        debug!(side = %position.side_to_move(), ?status, "no legal moves");
        position.set_status(status);
    }
    moves
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attacks::is_square_attacked;
    use crate::castle_rights::CastleRights;
    use crate::snapshot::Snapshot;

    fn position(placement: &str) -> Position {
        placement.parse::<Snapshot>().unwrap().into_position().unwrap()
    }

    #[test]
    fn starting_position_20_moves() {
        let mut pos = Position::new_game();
        let moves = generate_legal_moves(&mut pos);
        assert_eq!(
            moves.len(),
            20,
            "starting position should have 20 legal moves, got {}",
            moves.len()
        );
        assert_eq!(pos.status(), GameStatus::Ongoing);
    }

    #[test]
    fn pinned_knight_zero_moves() {
        // King on e1, knight on e2, rook on e8: the knight is pinned along the e-file
        let mut pos = position("4r2k/8/8/8/8/8/4N3/4K3 w");
        let moves = generate_legal_moves(&mut pos);
        assert_eq!(moves.iter().filter(|m| m.from() == Square::E2).count(), 0);
    }

    #[test]
    fn pinned_rook_slides_along_pin() {
        let mut pos = position("4r2k/8/8/8/8/8/4R3/4K3 w");
        let moves = generate_legal_moves(&mut pos);
        let rook: Vec<Square> = moves
            .iter()
            .filter(|m| m.from() == Square::E2)
            .map(|m| m.to())
            .collect();
        assert_eq!(rook.len(), 6);
        assert!(rook.iter().all(|sq| sq.file() == 4));
        assert!(rook.contains(&Square::E8));
    }

    #[test]
    fn double_check_king_only() {
        // King e1, black knight f3 and black rook e8: double check
        let mut pos = position("4r1k1/8/8/8/8/5n2/8/4K3 w");
        let moves = generate_legal_moves(&mut pos);
        assert!(!moves.is_empty());
        for mv in &moves {
            assert_eq!(
                mv.piece().kind(),
                PieceKind::King,
                "in double check only king moves are legal, got {mv}"
            );
        }
    }

    #[test]
    fn single_check_block_or_capture() {
        // Rook on a1 can block on b1..d1 only by capturing or interposing.
        let mut pos = position("7k/8/8/8/8/8/R7/4K2q w");
        let moves = generate_legal_moves(&mut pos);
        let rook: Vec<Square> = moves
            .iter()
            .filter(|m| m.from() == Square::A2)
            .map(|m| m.to())
            .collect();
        assert!(rook.is_empty(), "a2 rook cannot reach the first-rank check ray: {rook:?}");

        let mut pos = position("7k/8/8/8/8/8/7R/4K2q w");
        let moves = generate_legal_moves(&mut pos);
        let rook: Vec<Square> = moves
            .iter()
            .filter(|m| m.from() == Square::H2)
            .map(|m| m.to())
            .collect();
        assert_eq!(rook, vec![Square::H1]);
    }

    #[test]
    fn king_cannot_retreat_along_check_ray() {
        let mut pos = position("7k/8/8/8/8/8/8/r3K3 w");
        let moves = generate_legal_moves(&mut pos);
        assert!(!moves.iter().any(|m| m.to() == Square::F1));
        assert!(moves.iter().any(|m| m.to() == Square::E2));
    }

    #[test]
    fn castling_not_through_check() {
        // Bishop on a6 attacks f1, preventing king-side castling
        let mut pos = position("4k3/8/b7/8/8/8/8/R3K2R w").with_castling(CastleRights::WHITE_BOTH);
        let moves = generate_legal_moves(&mut pos);
        let castles: Vec<Square> = moves.iter().filter(|m| m.is_castle()).map(|m| m.to()).collect();
        assert_eq!(castles, vec![Square::C1]);
    }

    #[test]
    fn castling_needs_empty_path() {
        let mut pos = position("4k3/8/8/8/8/8/8/RN2K2R w").with_castling(CastleRights::WHITE_BOTH);
        let moves = generate_legal_moves(&mut pos);
        let castles: Vec<Square> = moves.iter().filter(|m| m.is_castle()).map(|m| m.to()).collect();
        assert_eq!(castles, vec![Square::G1]);
    }

    #[test]
    fn no_castling_out_of_check() {
        let mut pos = position("4r1k1/8/8/8/8/8/8/R3K2R w").with_castling(CastleRights::WHITE_BOTH);
        let moves = generate_legal_moves(&mut pos);
        assert!(!moves.iter().any(|m| m.is_castle()));
    }

    #[test]
    fn en_passant_legal() {
        // White pawn e5, black pawn d5 just moved, target d6
        let mut pos = position("4k3/8/8/3pP3/8/8/8/4K3 w").with_en_passant(Some(Square::D6));
        let moves = generate_legal_moves(&mut pos);
        let ep: Vec<&Move> = moves.iter().filter(|m| m.is_en_passant()).collect();
        assert_eq!(ep.len(), 1);
        assert_eq!(ep[0].to(), Square::D6);
    }

    #[test]
    fn en_passant_discovered_check_illegal() {
        // King a5, pawn b5, black pawn c5 (just double-pushed), black rook h5.
        // bxc6 would expose the king to the rook.
        let mut pos = position("4k3/8/8/KPp4r/8/8/8/8 w").with_en_passant(Some(Square::C6));
        let moves = generate_legal_moves(&mut pos);
        assert!(!moves.iter().any(|m| m.is_en_passant()));
    }

    #[test]
    fn en_passant_captures_checking_pawn() {
        // Black pawn d5 gives check to the king on e4 and may be taken en passant.
        let mut pos = position("4k3/8/8/3pP3/4K3/8/8/8 w").with_en_passant(Some(Square::D6));
        let moves = generate_legal_moves(&mut pos);
        assert!(moves.iter().any(|m| m.is_en_passant()));
    }

    #[test]
    fn promotion_is_one_pending_move() {
        let mut pos = position("4k3/P7/8/8/8/8/8/4K3 w");
        let moves = generate_legal_moves(&mut pos);
        let promos: Vec<&Move> = moves.iter().filter(|m| m.is_promotion()).collect();
        assert_eq!(promos.len(), 1);
        assert_eq!(promos[0].promotes_to(), None);
    }

    #[test]
    fn checkmate_sets_status() {
        let mut pos = position("7k/8/8/7R/8/8/8/4K1R1 b");
        let moves = generate_legal_moves(&mut pos);
        assert!(moves.is_empty());
        assert_eq!(pos.status(), GameStatus::Checkmate);
    }

    #[test]
    fn stalemate_sets_status() {
        let mut pos = position("8/8/8/8/8/1q6/2k5/K7 w");
        let moves = generate_legal_moves(&mut pos);
        assert!(moves.is_empty());
        assert_eq!(pos.status(), GameStatus::Stalemate);
    }

    #[test]
    fn legal_moves_leave_king_safe() {
        let mut pos = position("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w")
            .with_castling(CastleRights::ALL);
        let us = pos.side_to_move();
        for mv in generate_legal_moves(&mut pos) {
            pos.apply(mv).unwrap();
            if pos.pending_promotion().is_none() {
                assert!(!is_square_attacked(&pos, pos.king_square(us), !us), "{mv} exposes the king");
            }
            pos.revert().unwrap();
        }
    }
}
