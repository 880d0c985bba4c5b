//! Evaluation and move selection for rookery.

pub mod config;
pub mod error;
pub mod eval;
pub mod search;

pub use config::{DEFAULT_DEPTH, SearchConfig, Strategy};
pub use error::{SearchError, StrategyParseError};
pub use eval::{CHECKMATE, EvalConfig, evaluate};
pub use search::{INF, SearchResult, Searcher, choose_move};
