//! Iterative deepening under a wall-clock budget.
//!
//! The clock is sampled once before each depth. A depth that has started
//! always runs to completion, so the budget is a soft ceiling.

use std::time::{Duration, Instant};

use log::{debug, info};

use crate::board::Rules;
use crate::error::SearchError;
use crate::search::alphabeta::Searcher;
use crate::search::eval::Evaluator;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IterationInfo<M> {
    pub depth: u32,
    pub score: i32,
    pub best: Option<M>,
    pub nodes: u64,
    pub elapsed: Duration,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchReport<M> {
    /// Best move of the deepest completed iteration that produced one.
    pub best: Option<M>,
    /// Score of the deepest completed iteration.
    pub score: Option<i32>,
    /// Deepest completed iteration, 0 when none ran.
    pub depth: u32,
    pub nodes: u64,
    pub elapsed: Duration,
    pub iterations: Vec<IterationInfo<M>>,
}

impl<M> SearchReport<M> {
    fn empty() -> Self {
        Self {
            best: None,
            score: None,
            depth: 0,
            nodes: 0,
            elapsed: Duration::ZERO,
            iterations: Vec::new(),
        }
    }
}

impl<P: Rules, E: Evaluator<P>> Searcher<P, E> {
    /// Best move for the side to move, or `None` when the budget ran out
    /// before depth 1 or the position is already over.
    pub fn find_best_move(
        &mut self,
        pos: &mut P,
        max_depth: u32,
        max_time: Duration,
    ) -> Result<Option<P::Move>, SearchError> {
        Ok(self.find_best_move_with_report(pos, max_depth, max_time)?.best)
    }

    /// `find_best_move` with the session's configured depth and time limits.
    pub fn think(&mut self, pos: &mut P) -> Result<SearchReport<P::Move>, SearchError> {
        let (depth, time) = (self.params().max_depth, self.params().max_time());
        self.find_best_move_with_report(pos, depth, time)
    }

    pub fn find_best_move_with_report(
        &mut self,
        pos: &mut P,
        max_depth: u32,
        max_time: Duration,
    ) -> Result<SearchReport<P::Move>, SearchError> {
        let start = Instant::now();
        let nodes_before = self.nodes;
        let maximizing = pos.side_to_move().is_maximizing();
        self.bump_generation();

        let mut report = SearchReport::empty();
        for depth in 1..=max_depth {
            // a zero budget means no iteration starts
            if start.elapsed() >= max_time {
                debug!("time budget {:?} spent before depth {}", max_time, depth);
                break;
            }
            let iter_nodes = self.nodes;
            let r = self.search_root(pos, depth, maximizing, report.best)?;
            if let Some(m) = r.best { report.best = Some(m); }
            report.score = Some(r.score);
            report.depth = depth;
            let info = IterationInfo {
                depth,
                score: r.score,
                best: r.best,
                nodes: self.nodes - iter_nodes,
                elapsed: start.elapsed(),
            };
            debug!(
                "depth {} score {} best {} nodes {} time {:?}",
                info.depth,
                info.score,
                info.best.map_or_else(|| "-".to_string(), |m| m.to_string()),
                info.nodes,
                info.elapsed
            );
            report.iterations.push(info);
        }

        report.nodes = self.nodes - nodes_before;
        report.elapsed = start.elapsed();
        if let Some(m) = report.best {
            info!(
                "best move {} at depth {} ({} nodes, {:?})",
                m, report.depth, report.nodes, report.elapsed
            );
        }
        Ok(report)
    }
}
