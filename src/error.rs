use std::path::PathBuf;
use thiserror::Error;

use crate::board::RulesError;

#[derive(Debug, Error)]
pub enum SearchError {
    /// The rules engine reported no legal moves for a position it does not
    /// consider finished.
    #[error("no legal moves in a position that is not game over (signature {signature:#018x})")]
    NoMovesWithoutGameOver { signature: u64 },
    #[error(transparent)]
    Rules(#[from] RulesError),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config {}: {source}", path.display())]
    Io { path: PathBuf, #[source] source: std::io::Error },
    #[error("invalid config {}: {source}", path.display())]
    Parse { path: PathBuf, #[source] source: serde_json::Error },
}
