//! Iterative-deepening alpha-beta chess bot.
//!
//! The search in [`search`] is generic over the [`board::Rules`] capability
//! and a static [`search::eval::Evaluator`]; [`board::cozy::Position`] plugs
//! in chess via `cozy-chess`.

pub mod board;
pub mod error;
pub mod game;
pub mod perft;
pub mod search;
pub mod selfplay;

pub use board::cozy::Position;
pub use board::{Rules, RulesError, Side};
pub use error::{ConfigError, SearchError};
pub use search::{SearchParams, SearchReport, SearchResult, Searcher};
