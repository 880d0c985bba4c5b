//! The mutable game position and its reversible mutation primitives.

use std::fmt;

use tracing::{debug, trace};

use crate::castle_rights::{CastlePath, CastleRights, CastleSide};
use crate::chess_move::Move;
use crate::color::Color;
use crate::error::{PositionError, SnapshotError};
use crate::material;
use crate::movegen::generate_legal_moves;
use crate::piece::Piece;
use crate::piece_kind::PieceKind;
use crate::square::Square;

/// Identity handed to the first promoted piece of a game; starting pieces use 1 and 2.
const FIRST_PROMOTION_IDENT: u8 = 3;

/// Back-rank arrangement from the a-file to the h-file, with identities.
const BACK_RANK: [(PieceKind, u8); 8] = [
    (PieceKind::Rook, 1),
    (PieceKind::Knight, 1),
    (PieceKind::Bishop, 1),
    (PieceKind::Queen, 1),
    (PieceKind::King, 1),
    (PieceKind::Bishop, 2),
    (PieceKind::Knight, 2),
    (PieceKind::Rook, 2),
];

/// Whether the game has ended, and how.
///
/// Checkmate and stalemate are established by move generation; insufficient
/// material is re-evaluated by every [`Position::apply`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GameStatus {
    #[default]
    Ongoing,
    Checkmate,
    Stalemate,
    InsufficientMaterial,
}

impl GameStatus {
    /// Return `true` for any finished game.
    #[inline]
    pub const fn is_terminal(self) -> bool {
        !matches!(self, GameStatus::Ongoing)
    }
}

/// Everything needed to invert one [`Position::apply`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryEntry {
    /// The move as applied.
    pub mv: Move,
    /// The piece that stood on the origin square.
    pub moved: Piece,
    /// The removed piece and the square it was taken from (differs from the
    /// destination for en passant).
    pub captured: Option<(Square, Piece)>,
    /// Castling rights before the move.
    pub castling_before: CastleRights,
    /// En passant target before the move.
    pub en_passant_before: Option<Square>,
    /// Game status before the move.
    pub status_before: GameStatus,
    /// The piece the pawn became, once the promotion was resolved.
    pub promoted_to: Option<Piece>,
}

/// Board, side to move, castling and en passant state, plus the move log.
///
/// One instance is meant to live for a whole game. Search mutates it with
/// [`apply`](Position::apply) and restores it with
/// [`revert`](Position::revert); every `apply` must be matched by exactly
/// one `revert` before control returns to the caller that issued it.
#[derive(Clone, PartialEq, Eq)]
pub struct Position {
    board: [Option<Piece>; Square::COUNT],
    side_to_move: Color,
    /// Cached king squares, indexed by [`Color::index()`].
    kings: [Square; Color::COUNT],
    castling: CastleRights,
    en_passant: Option<Square>,
    history: Vec<HistoryEntry>,
    /// Pieces removed from play, indexed by the color of the removed piece.
    captured: [Vec<Piece>; Color::COUNT],
    status: GameStatus,
    pending_promotion: Option<Square>,
    next_promotion_ident: u8,
    /// Pieces on the board when the position was set up.
    initial_pieces: u8,
}

impl Position {
    /// The standard initial setup, White to move.
    pub fn new_game() -> Position {
        let mut board = [None; Square::COUNT];
        for color in Color::ALL {
            let back = color.back_rank();
            let pawns = color.pawn_rank();
            for (file, &(kind, ident)) in BACK_RANK.iter().enumerate() {
                let file = file as u8;
                board[Square::new(back, file).index()] =
                    Some(Piece::new(kind, color).with_ident(ident));
                board[Square::new(pawns, file).index()] =
                    Some(Piece::new(PieceKind::Pawn, color).with_ident(file + 1));
            }
        }

        Position {
            board,
            side_to_move: Color::White,
            kings: [Square::E1, Square::E8],
            castling: CastleRights::ALL,
            en_passant: None,
            history: Vec::new(),
            captured: [Vec::new(), Vec::new()],
            status: GameStatus::Ongoing,
            pending_promotion: None,
            next_promotion_ident: FIRST_PROMOTION_IDENT,
            initial_pieces: 32,
        }
    }

    /// Build a position from a board array. No castling rights are granted;
    /// see [`with_castling`](Position::with_castling).
    pub fn from_board(
        board: [Option<Piece>; Square::COUNT],
        side_to_move: Color,
    ) -> Result<Position, SnapshotError> {
        let mut kings = [Square::E1, Square::E8];
        for color in Color::ALL {
            let found: Vec<Square> = Square::all()
                .filter(|sq| board[sq.index()].is_some_and(|p| p.is(color, PieceKind::King)))
                .collect();
            if found.len() != 1 {
                return Err(SnapshotError::InvalidKingCount {
                    color: match color {
                        Color::White => "white",
                        Color::Black => "black",
                    },
                    count: found.len(),
                });
            }
            kings[color.index()] = found[0];
        }

        let initial_pieces = board.iter().flatten().count() as u8;
        let mut position = Position {
            board,
            side_to_move,
            kings,
            castling: CastleRights::NONE,
            en_passant: None,
            history: Vec::new(),
            captured: [Vec::new(), Vec::new()],
            status: GameStatus::Ongoing,
            pending_promotion: None,
            next_promotion_ident: FIRST_PROMOTION_IDENT,
            initial_pieces,
        };
        position.refresh_material_status()?;
        Ok(position)
    }

    /// Grant castling rights. Rights whose king or rook is not on its home
    /// square are dropped.
    pub fn with_castling(mut self, rights: CastleRights) -> Position {
        let mut granted = CastleRights::NONE;
        for color in Color::ALL {
            for side in CastleSide::ALL {
                let flag = CastleRights::flag(color, side);
                let path = CastlePath::of(color, side);
                let king_home = self.piece_at(path.king_from).is_some_and(|p| p.is(color, PieceKind::King));
                let rook_home = self.piece_at(path.rook_from).is_some_and(|p| p.is(color, PieceKind::Rook));
                if rights.contains(flag) && king_home && rook_home {
                    granted = granted.insert(flag);
                }
            }
        }
        self.castling = granted;
        self
    }

    /// Set the en passant target square.
    pub fn with_en_passant(mut self, target: Option<Square>) -> Position {
        self.en_passant = target;
        self
    }

    /// Return the piece on `sq`, if any.
    #[inline]
    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.board[sq.index()]
    }

    /// Iterate over all occupied squares in index order.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(|sq| self.board[sq.index()].map(|p| (sq, p)))
    }

    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    /// The cached square of `color`'s king.
    #[inline]
    pub fn king_square(&self, color: Color) -> Square {
        self.kings[color.index()]
    }

    #[inline]
    pub fn castling(&self) -> CastleRights {
        self.castling
    }

    /// The square a pawn may capture onto en passant, if any.
    #[inline]
    pub fn en_passant(&self) -> Option<Square> {
        self.en_passant
    }

    /// Applied moves, oldest first.
    #[inline]
    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    /// Pieces of `color` removed from play, in capture order.
    #[inline]
    pub fn captured(&self, color: Color) -> &[Piece] {
        &self.captured[color.index()]
    }

    #[inline]
    pub fn status(&self) -> GameStatus {
        self.status
    }

    #[inline]
    pub fn in_checkmate(&self) -> bool {
        self.status == GameStatus::Checkmate
    }

    #[inline]
    pub fn in_stalemate(&self) -> bool {
        self.status == GameStatus::Stalemate
    }

    #[inline]
    pub fn drawn_by_insufficient_material(&self) -> bool {
        self.status == GameStatus::InsufficientMaterial
    }

    /// Return `true` once the game has ended by any rule.
    #[inline]
    pub fn is_game_over(&self) -> bool {
        self.status.is_terminal()
    }

    /// Square of a pawn that reached its last rank and awaits a promotion choice.
    #[inline]
    pub fn pending_promotion(&self) -> Option<Square> {
        self.pending_promotion
    }

    #[inline]
    pub(crate) fn set_status(&mut self, status: GameStatus) {
        if status != self.status {
            debug!(from = ?self.status, to = ?status, "game status changed");
        }
        self.status = status;
    }

    /// Apply `mv` without checking legality.
    ///
    /// The caller guarantees `mv` came from
    /// [`generate_legal_moves`] on this exact position; use
    /// [`apply_move`](Position::apply_move) for untrusted input. A pawn
    /// reaching its last rank is moved but stays a pawn, and the side to move
    /// is not flipped, until [`resolve_promotion`](Position::resolve_promotion)
    /// is called; a move already carrying
    /// [`promotes_to`](Move::promotes_to) is resolved immediately.
    ///
    /// On error the position is left as it was before the call.
    pub fn apply(&mut self, mv: Move) -> Result<(), PositionError> {
        if let Some(square) = self.pending_promotion {
            return Err(PositionError::PromotionPending { square });
        }

        let from = mv.from();
        let to = mv.to();
        let moved = self.board[from.index()].ok_or_else(|| PositionError::InvariantViolation {
            detail: format!("no piece on {from} to play {mv}"),
        })?;
        let us = moved.color();
        let promotes = moved.kind() == PieceKind::Pawn && to.rank() == us.promotion_rank();

        if let Some(kind) = mv.promotes_to()
            && (!promotes || !kind.is_promotion_choice())
        {
            return Err(PositionError::InvalidPromotion { kind });
        }
        let castle_path = if mv.is_castle() {
            let path = CastlePath::by_king_destination(to)
                .filter(|path| path.king_from == from)
                .ok_or_else(|| PositionError::InvariantViolation {
                    detail: format!("{mv} is not a castling path"),
                })?;
            if self.board[path.rook_from.index()].is_none() {
                return Err(PositionError::InvariantViolation {
                    detail: format!("no rook on {} to castle with", path.rook_from),
                });
            }
            Some(path)
        } else {
            None
        };

        let castling_before = self.castling;
        let en_passant_before = self.en_passant;
        let status_before = self.status;

        // Captured-piece bookkeeping, including the off-square en passant victim.
        let capture_square = if mv.is_en_passant() {
            Square::new(from.rank(), to.file())
        } else {
            to
        };
        let captured = self.board[capture_square.index()]
            .take()
            .map(|victim| (capture_square, victim));
        if let Some((_, victim)) = captured {
            self.captured[victim.color().index()].push(victim);
        }

        self.board[from.index()] = None;
        self.board[to.index()] = Some(moved);

        if moved.kind() == PieceKind::King {
            self.kings[us.index()] = to;
        }

        self.en_passant = if moved.kind() == PieceKind::Pawn && from.rank().abs_diff(to.rank()) == 2 {
            Some(Square::new((from.rank() + to.rank()) / 2, from.file()))
        } else {
            None
        };

        if let Some(path) = castle_path {
            let rook = self.board[path.rook_from.index()].take();
            self.board[path.rook_to.index()] = rook;
        }

        self.castling = self.castling.after_move(from, to);

        self.history.push(HistoryEntry {
            mv,
            moved,
            captured,
            castling_before,
            en_passant_before,
            status_before,
            promoted_to: None,
        });
        trace!(mv = %mv, ply = self.history.len(), "apply");

        if promotes {
            self.pending_promotion = Some(to);
            if let Some(kind) = mv.promotes_to()
                && let Err(err) = self.resolve_promotion(kind)
            {
                self.revert()?;
                return Err(err);
            }
            return Ok(());
        }

        self.side_to_move = !self.side_to_move;
        if let Err(err) = self.refresh_material_status() {
            self.revert()?;
            return Err(err);
        }
        Ok(())
    }

    /// Complete a pending promotion by replacing the pawn with `kind`, then
    /// hand the move to the opponent. On error the promotion stays pending.
    pub fn resolve_promotion(&mut self, kind: PieceKind) -> Result<(), PositionError> {
        let square = self.pending_promotion.ok_or(PositionError::NoPendingPromotion)?;
        if !kind.is_promotion_choice() {
            return Err(PositionError::InvalidPromotion { kind });
        }
        let pawn = self.board[square.index()].ok_or_else(|| PositionError::InvariantViolation {
            detail: format!("promotion square {square} is empty"),
        })?;

        let promoted = Piece::new(kind, pawn.color()).with_ident(self.next_promotion_ident);
        self.next_promotion_ident = self.next_promotion_ident.saturating_add(1);
        self.board[square.index()] = Some(promoted);
        if let Some(entry) = self.history.last_mut() {
            entry.promoted_to = Some(promoted);
        }
        self.pending_promotion = None;
        self.side_to_move = !self.side_to_move;

        if let Err(err) = self.refresh_material_status() {
            self.board[square.index()] = Some(pawn);
            self.next_promotion_ident = self.next_promotion_ident.saturating_sub(1);
            if let Some(entry) = self.history.last_mut() {
                entry.promoted_to = None;
            }
            self.pending_promotion = Some(square);
            self.side_to_move = !self.side_to_move;
            return Err(err);
        }
        trace!(square = %square, piece = ?promoted, "promotion resolved");
        Ok(())
    }

    /// Undo the last [`apply`](Position::apply), restoring every effect exactly.
    ///
    /// Fails with [`PositionError::EmptyHistory`] and leaves the position
    /// untouched when no move has been applied.
    pub fn revert(&mut self) -> Result<(), PositionError> {
        let entry = self.history.pop().ok_or(PositionError::EmptyHistory)?;
        let mv = entry.mv;
        let from = mv.from();
        let to = mv.to();

        // An unresolved promotion never handed the move over.
        if self.pending_promotion.take().is_none() {
            self.side_to_move = !self.side_to_move;
        }
        if entry.promoted_to.is_some() {
            self.next_promotion_ident = self.next_promotion_ident.saturating_sub(1);
        }

        self.board[to.index()] = None;
        self.board[from.index()] = Some(entry.moved);

        if mv.is_castle()
            && let Some(path) = CastlePath::by_king_destination(to)
        {
            let rook = self.board[path.rook_to.index()].take();
            self.board[path.rook_from.index()] = rook;
        }

        if let Some((square, victim)) = entry.captured {
            self.board[square.index()] = Some(victim);
            self.captured[victim.color().index()].pop();
        }

        if entry.moved.kind() == PieceKind::King {
            self.kings[entry.moved.color().index()] = from;
        }

        self.castling = entry.castling_before;
        self.en_passant = entry.en_passant_before;
        self.status = entry.status_before;
        trace!(mv = %mv, ply = self.history.len(), "revert");
        Ok(())
    }

    /// Apply `mv` after checking it against the legal moves of this position.
    ///
    /// `mv` may carry a promotion choice; the matching legal move is the one
    /// with the same origin, destination and special-move flags.
    pub fn apply_move(&mut self, mv: Move) -> Result<(), PositionError> {
        if let Some(square) = self.pending_promotion {
            return Err(PositionError::PromotionPending { square });
        }
        let wanted = mv.without_promotion();
        let legal = generate_legal_moves(self);
        let found = legal
            .iter()
            .copied()
            .find(|candidate| *candidate == wanted)
            .ok_or(PositionError::IllegalMove { mv })?;
        match mv.promotes_to() {
            Some(kind) => self.apply(found.with_promotion(kind)),
            None => self.apply(found),
        }
    }

    /// Undo the last move. Alias of [`revert`](Position::revert) for callers
    /// that pair it with [`apply_move`](Position::apply_move).
    pub fn undo_move(&mut self) -> Result<(), PositionError> {
        self.revert()
    }

    /// Pieces still in play according to the capture log.
    fn remaining_by_log(&self) -> Result<usize, PositionError> {
        let removed = self.captured[0].len() + self.captured[1].len();
        (self.initial_pieces as usize)
            .checked_sub(removed)
            .ok_or_else(|| PositionError::InvariantViolation {
                detail: format!(
                    "capture log holds {removed} pieces but the game began with {}",
                    self.initial_pieces
                ),
            })
    }

    /// Classify the material left on the board as a dead draw or not.
    ///
    /// Only examined once the capture log implies four or fewer pieces remain.
    pub fn insufficient_material(&self) -> Result<bool, PositionError> {
        let remaining = self.remaining_by_log()?;
        if remaining > material::MAX_DRAWN_PIECES {
            return Ok(false);
        }
        let on_board: Vec<(Square, Piece)> = self.pieces().collect();
        if on_board.len() != remaining {
            return Err(PositionError::InvariantViolation {
                detail: format!(
                    "capture log implies {remaining} pieces remain, board holds {}",
                    on_board.len()
                ),
            });
        }
        material::is_dead_draw(&on_board)
    }

    fn refresh_material_status(&mut self) -> Result<(), PositionError> {
        let status = if self.insufficient_material()? {
            GameStatus::InsufficientMaterial
        } else {
            GameStatus::Ongoing
        };
        self.set_status(status);
        Ok(())
    }

    /// Return a pretty-printable wrapper for this position.
    pub fn pretty(&self) -> PrettyBoard<'_> {
        PrettyBoard(self)
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::new_game()
    }
}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Position(\"{}\" castling={} ep={:?} status={:?} ply={})",
            crate::snapshot::Snapshot::of(self),
            self.castling,
            self.en_passant,
            self.status,
            self.history.len()
        )
    }
}

/// Wrapper for pretty-printing a position as an 8x8 grid, rank 8 on top.
pub struct PrettyBoard<'a>(&'a Position);

impl fmt::Display for PrettyBoard<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let position = self.0;
        for rank in (0u8..8).rev() {
            write!(f, "{}  ", rank + 1)?;
            for file in 0u8..8 {
                let c = position
                    .piece_at(Square::new(rank, file))
                    .map_or('.', Piece::letter);
                if file < 7 {
                    write!(f, "{c} ")?;
                } else {
                    write!(f, "{c}")?;
                }
            }
            writeln!(f)?;
        }
        write!(f, "   a b c d e f g h")
    }
}
