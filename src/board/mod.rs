//! Rules-engine capability consumed by the search.
//!
//! The search never looks inside a position. Everything it needs (move
//! generation, make/unmake, terminal detection, the position signature) goes
//! through [`Rules`], which the position type implements itself.

pub mod cozy;

use std::fmt::{Debug, Display};
use thiserror::Error;

/// Which side of the minimax a player is on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    Maximizing,
    Minimizing,
}

impl Side {
    pub fn is_maximizing(self) -> bool { self == Side::Maximizing }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RulesError {
    #[error("illegal move: {0}")]
    IllegalMove(String),
    #[error("undo called with no move applied")]
    EmptyUndo,
    #[error("FEN error: {0}")]
    InvalidFen(String),
}

/// A mutable game position together with the rules that govern it.
///
/// `apply` and `undo` are strictly paired and LIFO: every successful `apply`
/// must be matched by exactly one `undo` before the caller returns.
pub trait Rules {
    type Move: Copy + Eq + Debug + Display;

    /// Legal moves in the generator's own enumeration order.
    fn legal_moves(&self) -> Vec<Self::Move>;

    fn apply(&mut self, mv: Self::Move) -> Result<(), RulesError>;

    fn undo(&mut self) -> Result<(), RulesError>;

    fn is_capture(&self, mv: Self::Move) -> bool;

    fn gives_check(&self, mv: Self::Move) -> bool;

    fn is_checkmate(&self) -> bool;

    fn is_stalemate(&self) -> bool;

    fn is_insufficient_material(&self) -> bool;

    /// Any terminal state. Rules with extra draw conditions override this.
    fn is_game_over(&self) -> bool {
        self.is_checkmate() || self.is_stalemate() || self.is_insufficient_material()
    }

    /// Canonical signature: equal for positions with the same future play.
    fn signature(&self) -> u64;

    fn side_to_move(&self) -> Side;
}
