//! Minimax and alpha-beta tree walks.
//!
//! Values are from White's perspective: White maximizes, Black minimizes.
//! Every successful `apply` is paired with exactly one `revert` on every
//! path, including cutoffs and errors raised below it. A failed `apply`
//! rolls itself back, so it needs no `revert`.

use rand::seq::SliceRandom;
use rookery_core::{Color, Move, PieceKind, Position, generate_legal_moves};
use tracing::{debug, trace};

use super::{INF, Searcher};
use crate::config::Strategy;
use crate::error::SearchError;
use crate::eval::evaluate;

/// What [`Searcher::expand`] found at a node.
enum Node {
    /// Static value of a leaf.
    Leaf(i32),
    /// Children to search.
    Branch(Vec<Move>),
}

impl Searcher {
    /// Legal moves with every promotion expanded into its four choices,
    /// queen first, shuffled when configured.
    ///
    /// Generating the moves also records checkmate or stalemate on
    /// `position`, which is what lets leaves score as terminal.
    fn candidate_moves(&mut self, position: &mut Position, shuffle: bool) -> Vec<Move> {
        let mut moves = Vec::new();
        for mv in generate_legal_moves(position) {
            if mv.is_promotion() {
                moves.extend(PieceKind::PROMOTIONS.map(|kind| mv.with_promotion(kind)));
            } else {
                moves.push(mv);
            }
        }
        if shuffle && self.config.shuffle {
            moves.shuffle(&mut self.rng);
        }
        moves
    }

    /// Count the node, then return its static value if it is a leaf.
    ///
    /// A node is a leaf when the game is over, the depth is spent, or the
    /// side to move has no legal move.
    fn expand(&mut self, position: &mut Position, depth: u8) -> Node {
        self.nodes += 1;
        if position.is_game_over() {
            return Node::Leaf(evaluate(position, &self.config.eval));
        }
        let moves = self.candidate_moves(position, depth > 0);
        if depth == 0 || moves.is_empty() {
            return Node::Leaf(evaluate(position, &self.config.eval));
        }
        Node::Branch(moves)
    }

    /// Exhaustive minimax to `depth` plies.
    pub fn minimax(&mut self, position: &mut Position, depth: u8, maximizing: bool) -> Result<i32, SearchError> {
        let moves = match self.expand(position, depth) {
            Node::Leaf(value) => return Ok(value),
            Node::Branch(moves) => moves,
        };

        let mut best = if maximizing { -INF } else { INF };
        for mv in moves {
            position.apply(mv)?;
            let value = self.minimax(position, depth - 1, !maximizing);
            position.revert()?;
            let value = value?;
            best = if maximizing { best.max(value) } else { best.min(value) };
        }
        Ok(best)
    }

    /// Minimax with alpha-beta cutoffs. A cutoff stops the sibling loop
    /// outright; the returned bound is fail-soft.
    pub fn alpha_beta(
        &mut self,
        position: &mut Position,
        depth: u8,
        mut alpha: i32,
        mut beta: i32,
        maximizing: bool,
    ) -> Result<i32, SearchError> {
        let moves = match self.expand(position, depth) {
            Node::Leaf(value) => return Ok(value),
            Node::Branch(moves) => moves,
        };

        if maximizing {
            let mut value = -INF;
            for mv in moves {
                position.apply(mv)?;
                let child = self.alpha_beta(position, depth - 1, alpha, beta, false);
                position.revert()?;
                value = value.max(child?);
                if value >= beta {
                    trace!(depth, mv = %mv, value, beta, "beta cutoff");
                    break;
                }
                alpha = alpha.max(value);
            }
            Ok(value)
        } else {
            let mut value = INF;
            for mv in moves {
                position.apply(mv)?;
                let child = self.alpha_beta(position, depth - 1, alpha, beta, true);
                position.revert()?;
                value = value.min(child?);
                if value <= alpha {
                    trace!(depth, mv = %mv, value, alpha, "alpha cutoff");
                    break;
                }
                beta = beta.min(value);
            }
            Ok(value)
        }
    }

    /// Search every root move and keep the first one that strictly improves
    /// on the best value seen so far.
    pub(super) fn root(&mut self, position: &mut Position, depth: u8) -> Result<(Option<Move>, i32), SearchError> {
        let moves = match self.expand(position, depth) {
            Node::Leaf(value) => return Ok((None, value)),
            Node::Branch(moves) => moves,
        };

        let maximizing = position.side_to_move() == Color::White;
        let strategy = self.config.strategy;
        let mut best_move = None;
        let mut best_value = if maximizing { -INF } else { INF };
        let (mut alpha, mut beta) = (-INF, INF);

        for mv in moves {
            position.apply(mv)?;
            let value = match strategy {
                Strategy::AlphaBeta => self.alpha_beta(position, depth - 1, alpha, beta, !maximizing),
                Strategy::Minimax | Strategy::Shallow => self.minimax(position, depth - 1, !maximizing),
            };
            position.revert()?;
            let value = value?;

            let improves = if maximizing {
                value > best_value
            } else {
                value < best_value
            };
            if improves {
                debug!(mv = %mv, value, "new best root move");
                best_value = value;
                best_move = Some(mv);
            }
            if maximizing {
                alpha = alpha.max(best_value);
            } else {
                beta = beta.min(best_value);
            }
        }

        Ok((best_move, best_value))
    }
}
