use std::fs;
use std::path::Path;
use std::time::Duration;

use log::trace;
use serde::{Deserialize, Serialize};

use crate::board::cozy::Position;
use crate::board::Rules;
use crate::error::{ConfigError, SearchError};
use crate::search::eval::{Evaluator, Heuristic};
use crate::search::history::PositionHistory;
use crate::search::killers::KillerStore;
use crate::search::ordering::order_moves;
use crate::search::tt::{Bound, CachePolicy, Entry, Tt, DEFAULT_ENTRIES};

/// Window bound used as "infinity"; well outside any evaluation.
pub const INF: i32 = 1_000_000;
/// Added to every node whose position already occurred in the played game.
pub const REPETITION_PENALTY: i32 = -50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchParams {
    pub max_depth: u32,
    pub max_time_ms: u64,
    pub use_tt: bool,
    pub tt_entries: usize,
    pub cache_policy: CachePolicy,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            max_depth: 3,
            max_time_ms: 5_000,
            use_tt: true,
            tt_entries: DEFAULT_ENTRIES,
            cache_policy: CachePolicy::DepthOnly,
        }
    }
}

impl SearchParams {
    pub fn max_time(&self) -> Duration { Duration::from_millis(self.max_time_ms) }

    /// Missing fields fall back to their defaults.
    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)
            .map_err(|source| ConfigError::Io { path: path.to_path_buf(), source })?;
        serde_json::from_str(&text)
            .map_err(|source| ConfigError::Parse { path: path.to_path_buf(), source })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchResult<M> {
    pub score: i32,
    /// Absent at leaves and terminal nodes.
    pub best: Option<M>,
}

/// One search session: owns the transposition table, killer store and
/// played-position history. Independent sessions share nothing.
pub struct Searcher<P: Rules, E> {
    eval: E,
    params: SearchParams,
    pub(crate) tt: Tt,
    killers: KillerStore<P::Move>,
    history: PositionHistory,
    pub(crate) nodes: u64,
}

impl Default for Searcher<Position, Heuristic> {
    fn default() -> Self { Self::new(Heuristic, SearchParams::default()) }
}

impl<P: Rules, E: Evaluator<P>> Searcher<P, E> {
    pub fn new(eval: E, params: SearchParams) -> Self {
        Self {
            eval,
            params,
            tt: Tt::with_entries(params.tt_entries),
            killers: KillerStore::new(),
            history: PositionHistory::new(),
            nodes: 0,
        }
    }

    pub fn params(&self) -> &SearchParams { &self.params }

    /// Nodes visited since construction or the last `reset_nodes`.
    pub fn nodes(&self) -> u64 { self.nodes }

    pub fn reset_nodes(&mut self) { self.nodes = 0; }

    pub fn killers(&self) -> &KillerStore<P::Move> { &self.killers }

    pub fn history(&self) -> &PositionHistory { &self.history }

    /// Note a position that was actually played. Call after committing a move.
    pub fn record_position(&mut self, pos: &P) { self.history.record(pos.signature()); }

    pub fn tt_probe(&self, pos: &P) -> Option<Entry> { self.tt.get(pos.signature()) }

    pub fn tt_store(&mut self, pos: &P, depth: u32, score: i32) {
        self.tt.put(Entry::new(pos.signature(), depth, score, Bound::Exact));
    }

    pub fn set_tt_capacity_entries(&mut self, cap: usize) {
        self.params.tt_entries = cap;
        self.tt.set_capacity_entries(cap);
    }

    pub fn set_tt_capacity_mb(&mut self, mb: usize) {
        self.tt.set_capacity_mb(mb);
        self.params.tt_entries = self.tt.capacity();
    }

    /// Forget everything learned: table, killers and played history.
    pub fn clear(&mut self) {
        self.tt.clear();
        self.killers.clear();
        self.history.clear();
    }

    /// Alpha-beta minimax from `pos` to `depth` plies.
    ///
    /// `pos` is left exactly as it was passed in, including when an error
    /// is returned. A table hit answers immediately and hands `prior` back
    /// as the move.
    pub fn search(
        &mut self,
        pos: &mut P,
        depth: u32,
        alpha: i32,
        beta: i32,
        maximizing: bool,
        prior: Option<P::Move>,
    ) -> Result<SearchResult<P::Move>, SearchError> {
        self.alphabeta(pos, depth, alpha, beta, maximizing, prior, false)
    }

    /// Root variant used by iterative deepening: never answers from the
    /// table, so a move is always produced for a live position.
    pub(crate) fn search_root(
        &mut self,
        pos: &mut P,
        depth: u32,
        maximizing: bool,
        prior: Option<P::Move>,
    ) -> Result<SearchResult<P::Move>, SearchError> {
        self.alphabeta(pos, depth, -INF, INF, maximizing, prior, true)
    }

    #[allow(clippy::too_many_arguments)]
    fn alphabeta(
        &mut self,
        pos: &mut P,
        depth: u32,
        mut alpha: i32,
        mut beta: i32,
        maximizing: bool,
        prior: Option<P::Move>,
        root: bool,
    ) -> Result<SearchResult<P::Move>, SearchError> {
        self.nodes += 1;
        let key = pos.signature();

        if self.params.use_tt && !root {
            if let Some(en) = self.tt.get(key) {
                if self.params.cache_policy.accepts(&en, depth, alpha, beta) {
                    return Ok(SearchResult { score: en.score, best: prior });
                }
            }
        }

        let penalty = if self.history.contains(key) { REPETITION_PENALTY } else { 0 };

        if depth == 0 || pos.is_game_over() {
            let score = self.eval.evaluate(pos) + penalty;
            self.tt_put(key, depth, score, Bound::Exact);
            return Ok(SearchResult { score, best: None });
        }

        let mut moves = pos.legal_moves();
        if moves.is_empty() {
            return Err(SearchError::NoMovesWithoutGameOver { signature: key });
        }
        if let Some(pm) = prior {
            if let Some(i) = moves.iter().position(|&m| m == pm) {
                let m = moves.remove(i);
                moves.insert(0, m);
            }
        }
        order_moves(pos, &mut moves, &self.killers, depth);

        let (orig_alpha, orig_beta) = (alpha, beta);
        let mut best_score = if maximizing { -INF } else { INF };
        let mut best_move = None;
        for m in moves {
            pos.apply(m)?;
            let child = self.alphabeta(pos, depth - 1, alpha, beta, !maximizing, None, false);
            // restore before looking at the outcome so errors unwind cleanly
            pos.undo()?;
            let score = child?.score + penalty;

            if maximizing {
                if score > best_score { best_score = score; best_move = Some(m); }
                alpha = alpha.max(score);
                if score >= beta {
                    trace!("beta cutoff at depth {} by {}", depth, m);
                    self.killers.record(depth, m);
                    break;
                }
            } else {
                if score < best_score { best_score = score; best_move = Some(m); }
                beta = beta.min(score);
                if score <= alpha {
                    trace!("alpha cutoff at depth {} by {}", depth, m);
                    self.killers.record(depth, m);
                    break;
                }
            }
        }

        let bound = if best_score <= orig_alpha {
            Bound::Upper
        } else if best_score >= orig_beta {
            Bound::Lower
        } else {
            Bound::Exact
        };
        self.tt_put(key, depth, best_score, bound);
        Ok(SearchResult { score: best_score, best: best_move })
    }

    fn tt_put(&mut self, key: u64, depth: u32, score: i32, bound: Bound) {
        if self.params.use_tt { self.tt.put(Entry::new(key, depth, score, bound)); }
    }

    pub(crate) fn bump_generation(&mut self) { self.tt.bump_generation(); }
}
