//! Core chess types: board representation, move generation, and game rules.

mod attacks;
mod castle_rights;
mod chess_move;
mod color;
mod direction;
mod error;
mod material;
mod movegen;
mod perft;
mod piece;
mod piece_kind;
mod position;
mod snapshot;
mod square;

pub use attacks::{Analysis, Check, Pin, analyze, is_square_attacked};
pub use castle_rights::{CastlePath, CastleRights, CastleSide};
pub use chess_move::{Move, MoveFlags};
pub use color::Color;
pub use direction::Direction;
pub use error::{PositionError, SnapshotError};
pub use material::{MAX_DRAWN_PIECES, is_dead_draw};
pub use movegen::{MoveList, generate_legal_moves, legal_moves, pseudo_moves};
pub use perft::{divide, perft};
pub use piece::Piece;
pub use piece_kind::PieceKind;
pub use position::{GameStatus, HistoryEntry, Position, PrettyBoard};
pub use snapshot::{STARTING_PLACEMENT, Snapshot};
pub use square::Square;
