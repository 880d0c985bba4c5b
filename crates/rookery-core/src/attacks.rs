//! King-centric attack analysis: checks, pins and square-attack probes.
//!
//! Everything here is a read-only function of a [`Position`]. Rays are cast
//! outward from the king (or the probed square) and the first piece met on
//! each ray decides the outcome, so no attack tables are needed.

use crate::color::Color;
use crate::direction::Direction;
use crate::piece::Piece;
use crate::piece_kind::PieceKind;
use crate::position::Position;
use crate::square::Square;

/// An allied piece that may only move along `direction` or its inverse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pin {
    pub square: Square,
    /// Step from the king toward the pinned piece.
    pub direction: Direction,
}

/// An enemy piece giving check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Check {
    pub attacker: Square,
    pub kind: PieceKind,
    /// Step from the king toward the attacker; `None` for knight checks.
    pub direction: Option<Direction>,
}

/// Result of [`analyze`] for the side to move.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Analysis {
    pub in_check: bool,
    pub pins: Vec<Pin>,
    pub checks: Vec<Check>,
}

impl Analysis {
    /// The pin ray through `sq`, if an allied piece there is pinned.
    pub fn pin_direction(&self, sq: Square) -> Option<Direction> {
        self.pins
            .iter()
            .find(|pin| pin.square == sq)
            .map(|pin| pin.direction)
    }

    /// Return `true` if two or more pieces give check.
    #[inline]
    pub fn is_double_check(&self) -> bool {
        self.checks.len() >= 2
    }

    /// Squares a non-king move may land on to answer a single check: the
    /// checker itself plus, for sliders, every square between it and the king.
    ///
    /// Empty when not in check or in double check.
    pub fn block_squares(&self, king: Square) -> Vec<Square> {
        let [check] = self.checks.as_slice() else {
            return Vec::new();
        };
        match check.direction {
            Some(dir) => {
                let mut squares: Vec<Square> =
                    dir.ray(king).take_while(|&sq| sq != check.attacker).collect();
                squares.push(check.attacker);
                squares
            }
            None => vec![check.attacker],
        }
    }
}

/// Whether `piece`, standing `distance` steps from a target along `dir`
/// (target toward piece), attacks that target with nothing in between.
fn attacks_along(piece: Piece, dir: Direction, distance: u8) -> bool {
    match piece.kind() {
        PieceKind::Rook => dir.is_orthogonal(),
        PieceKind::Bishop => dir.is_diagonal(),
        PieceKind::Queen => true,
        PieceKind::King => distance == 1,
        // A pawn strikes one rank forward, so it sits one rank behind its target.
        PieceKind::Pawn => distance == 1 && dir.is_diagonal() && dir.rank == -piece.color().forward(),
        PieceKind::Knight => false,
    }
}

/// Compute checks and pins against the king of the side to move.
pub fn analyze(position: &Position) -> Analysis {
    let us = position.side_to_move();
    let king = position.king_square(us);
    let mut analysis = Analysis::default();

    for dir in Direction::ALL_RAYS {
        let mut shield: Option<Square> = None;
        for (step, sq) in dir.ray(king).enumerate() {
            let Some(piece) = position.piece_at(sq) else {
                continue;
            };
            if piece.color() == us {
                if shield.is_some() {
                    // Two allies on the ray: nothing behind them can pin.
                    break;
                }
                shield = Some(sq);
                continue;
            }
            if attacks_along(piece, dir, step as u8 + 1) {
                match shield {
                    Some(square) => analysis.pins.push(Pin { square, direction: dir }),
                    None => analysis.checks.push(Check {
                        attacker: sq,
                        kind: piece.kind(),
                        direction: Some(dir),
                    }),
                }
            }
            break;
        }
    }

    for jump in Direction::KNIGHT_JUMPS {
        if let Some(sq) = king.offset(jump)
            && let Some(piece) = position.piece_at(sq)
            && piece.is(!us, PieceKind::Knight)
        {
            analysis.checks.push(Check {
                attacker: sq,
                kind: PieceKind::Knight,
                direction: None,
            });
        }
    }

    analysis.in_check = !analysis.checks.is_empty();
    analysis
}

/// What a probe sees on a square after hypothetical changes.
enum Cell {
    Empty,
    Blocker,
    Occupied(Piece),
}

/// Return `true` if `by` attacks `target`.
pub fn is_square_attacked(position: &Position, target: Square, by: Color) -> bool {
    is_attacked_after(position, target, by, &[], None)
}

/// Like [`is_square_attacked`], but as if the squares in `vacated` were empty
/// and `filled` held a non-attacking blocker.
///
/// Used to vet king steps (the king leaves its square and must not shadow a
/// slider) and en passant (two pawns leave one rank at once).
pub(crate) fn is_attacked_after(
    position: &Position,
    target: Square,
    by: Color,
    vacated: &[Square],
    filled: Option<Square>,
) -> bool {
    let cell = |sq: Square| {
        if filled == Some(sq) {
            Cell::Blocker
        } else if vacated.contains(&sq) {
            Cell::Empty
        } else {
            position.piece_at(sq).map_or(Cell::Empty, Cell::Occupied)
        }
    };

    for dir in Direction::ALL_RAYS {
        for (step, sq) in dir.ray(target).enumerate() {
            match cell(sq) {
                Cell::Empty => continue,
                Cell::Blocker => break,
                Cell::Occupied(piece) => {
                    if piece.color() == by && attacks_along(piece, dir, step as u8 + 1) {
                        return true;
                    }
                    break;
                }
            }
        }
    }

    Direction::KNIGHT_JUMPS.into_iter().any(|jump| {
        target
            .offset(jump)
            .is_some_and(|sq| matches!(cell(sq), Cell::Occupied(p) if p.is(by, PieceKind::Knight)))
    })
}
