//! Perft (performance test) for move generation correctness verification.
//!
//! Promotions are counted once per promotion choice, so the totals match the
//! published reference numbers.

use crate::chess_move::Move;
use crate::error::PositionError;
use crate::movegen::generate_legal_moves;
use crate::piece_kind::PieceKind;
use crate::position::Position;

/// Every fully specified move reachable from the generated list: each
/// promotion is expanded into its four choices.
fn expanded_moves(position: &mut Position) -> Vec<Move> {
    let mut moves = Vec::new();
    for mv in generate_legal_moves(position) {
        if mv.is_promotion() {
            moves.extend(PieceKind::PROMOTIONS.map(|kind| mv.with_promotion(kind)));
        } else {
            moves.push(mv);
        }
    }
    moves
}

/// Count the number of leaf nodes at the given depth.
///
/// Depth 0 returns 1 (the current position). The position is walked with
/// apply/revert and left exactly as it was found.
pub fn perft(position: &mut Position, depth: usize) -> Result<u64, PositionError> {
    if depth == 0 {
        return Ok(1);
    }

    let moves = expanded_moves(position);

    if depth == 1 {
        return Ok(moves.len() as u64);
    }

    let mut nodes = 0u64;
    for mv in moves {
        position.apply(mv)?;
        let count = perft(position, depth - 1);
        position.revert()?;
        nodes += count?;
    }
    Ok(nodes)
}

/// Run perft with per-move breakdown (useful for debugging).
///
/// Returns `(coordinate_move, node_count)` pairs sorted alphabetically.
pub fn divide(position: &mut Position, depth: usize) -> Result<Vec<(String, u64)>, PositionError> {
    let mut results = Vec::new();
    for mv in expanded_moves(position) {
        position.apply(mv)?;
        let count = if depth <= 1 {
            Ok(1)
        } else {
            perft(position, depth - 1)
        };
        position.revert()?;
        results.push((mv.to_coordinate(), count?));
    }
    results.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(results)
}
