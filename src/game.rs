//! Playing whole games with a search session: outcome detection and the
//! move loop shared by self-play and the command line.

use cozy_chess::Color;
use log::warn;
use serde::{Deserialize, Serialize};

use crate::board::cozy::Position;
use crate::board::Rules;
use crate::error::SearchError;
use crate::search::alphabeta::Searcher;
use crate::search::eval::Evaluator;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Winner {
    White,
    Black,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum GameOutcome {
    Checkmate { winner: Winner },
    Stalemate,
    InsufficientMaterial,
    FiftyMoveRule,
    FivefoldRepetition,
    /// Stopped by the caller's ply cap while still in progress.
    PlyLimit,
}

impl GameOutcome {
    /// 1 white win, 0 draw or unfinished, -1 black win.
    pub fn result(self) -> i8 {
        match self {
            GameOutcome::Checkmate { winner: Winner::White } => 1,
            GameOutcome::Checkmate { winner: Winner::Black } => -1,
            _ => 0,
        }
    }

    pub fn describe(self) -> &'static str {
        match self {
            GameOutcome::Checkmate { winner: Winner::White } => "Checkmate! White wins",
            GameOutcome::Checkmate { winner: Winner::Black } => "Checkmate! Black wins",
            GameOutcome::Stalemate => "Stalemate!",
            GameOutcome::InsufficientMaterial => "Insufficient material!",
            GameOutcome::FiftyMoveRule => "Draw by the fifty-move rule",
            GameOutcome::FivefoldRepetition => "Draw by fivefold repetition",
            GameOutcome::PlyLimit => "Stopped at the ply limit",
        }
    }
}

/// How the game stands, or `None` while it is still in progress.
pub fn outcome(pos: &Position) -> Option<GameOutcome> {
    if pos.is_checkmate() {
        let white_mated = pos.board().side_to_move() == Color::White;
        let winner = if white_mated { Winner::Black } else { Winner::White };
        return Some(GameOutcome::Checkmate { winner });
    }
    if pos.is_stalemate() { return Some(GameOutcome::Stalemate); }
    if pos.is_insufficient_material() { return Some(GameOutcome::InsufficientMaterial); }
    if pos.board().halfmove_clock() >= 100 { return Some(GameOutcome::FiftyMoveRule); }
    if pos.is_fivefold_repetition() { return Some(GameOutcome::FivefoldRepetition); }
    None
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlayedGame {
    pub moves: Vec<String>,
    pub outcome: GameOutcome,
}

/// Engine move for the side to move, falling back to the first legal move
/// when the search produced none (budget spent before depth 1).
pub fn engine_move<E: Evaluator<Position>>(
    pos: &mut Position,
    engine: &mut Searcher<Position, E>,
) -> Result<Option<cozy_chess::Move>, SearchError> {
    let report = engine.think(pos)?;
    if report.best.is_some() { return Ok(report.best); }
    let fallback = pos.legal_moves().first().copied();
    if let Some(m) = fallback {
        warn!("search returned no move; playing first legal move {}", pos.uci(m));
    }
    Ok(fallback)
}

/// Let one engine play both sides from `pos` until the game ends or
/// `max_plies` moves have been made. Every position reached, the start
/// included, is recorded in the engine's played history.
pub fn play_out<E, F>(
    pos: &mut Position,
    engine: &mut Searcher<Position, E>,
    max_plies: usize,
    mut on_move: F,
) -> Result<PlayedGame, SearchError>
where
    E: Evaluator<Position>,
    F: FnMut(&Position, &str),
{
    let mut moves = Vec::new();
    engine.record_position(pos);
    loop {
        if let Some(o) = outcome(pos) { return Ok(PlayedGame { moves, outcome: o }); }
        if moves.len() >= max_plies {
            return Ok(PlayedGame { moves, outcome: GameOutcome::PlyLimit });
        }
        let Some(mv) = engine_move(pos, engine)? else {
            return Err(SearchError::NoMovesWithoutGameOver { signature: pos.signature() });
        };
        let uci = pos.uci(mv);
        pos.apply(mv)?;
        engine.record_position(pos);
        on_move(pos, &uci);
        moves.push(uci);
    }
}
