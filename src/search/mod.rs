//! Game-tree search: alpha-beta minimax, transposition table, killer-move
//! ordering and the iterative-deepening driver.

pub mod alphabeta;
pub mod deepening;
pub mod eval;
pub mod history;
pub mod killers;
pub mod ordering;
pub mod tt;
pub mod zobrist;

pub use alphabeta::{SearchParams, SearchResult, Searcher, INF, REPETITION_PENALTY};
pub use deepening::{IterationInfo, SearchReport};
