use chessbot::perft::perft;
use chessbot::search::eval::Evaluator;
use chessbot::search::INF;
use chessbot::{Rules, RulesError, SearchError, SearchParams, Searcher, Side};
use std::time::Duration;

/// A two-move-per-ply game tree that can be told to misbehave at a ply.
#[derive(Clone, Debug, Default)]
struct Tree {
    path: Vec<u8>,
    dead_end_at: Option<usize>,
    reject_apply_at: Option<usize>,
}

impl Tree {
    fn dead_end_at(ply: usize) -> Self {
        Self { dead_end_at: Some(ply), ..Self::default() }
    }

    fn reject_apply_at(ply: usize) -> Self {
        Self { reject_apply_at: Some(ply), ..Self::default() }
    }

    fn signature_of(path: &[u8]) -> u64 {
        path.iter().fold(0xcbf2_9ce4_8422_2325, |h, &m| {
            (h ^ (u64::from(m) + 1)).wrapping_mul(0x100_0000_01b3)
        })
    }
}

impl Rules for Tree {
    type Move = u8;

    fn legal_moves(&self) -> Vec<u8> {
        if self.dead_end_at == Some(self.path.len()) { Vec::new() } else { vec![0, 1] }
    }

    fn apply(&mut self, mv: u8) -> Result<(), RulesError> {
        if self.reject_apply_at == Some(self.path.len()) {
            return Err(RulesError::IllegalMove(mv.to_string()));
        }
        self.path.push(mv);
        Ok(())
    }

    fn undo(&mut self) -> Result<(), RulesError> {
        self.path.pop().map(|_| ()).ok_or(RulesError::EmptyUndo)
    }

    fn is_capture(&self, _: u8) -> bool { false }

    fn gives_check(&self, _: u8) -> bool { false }

    fn is_checkmate(&self) -> bool { false }

    fn is_stalemate(&self) -> bool { false }

    fn is_insufficient_material(&self) -> bool { false }

    fn signature(&self) -> u64 { Self::signature_of(&self.path) }

    fn side_to_move(&self) -> Side {
        if self.path.len() % 2 == 0 { Side::Maximizing } else { Side::Minimizing }
    }
}

struct PathLength;

impl Evaluator<Tree> for PathLength {
    fn evaluate(&self, pos: &Tree) -> i32 { pos.path.iter().map(|&m| i32::from(m)).sum() }
}

fn searcher() -> Searcher<Tree, PathLength> {
    Searcher::new(PathLength, SearchParams::default())
}

#[test]
fn healthy_tree_searches_normally() {
    let mut t = Tree::default();
    let r = searcher().search(&mut t, 3, -INF, INF, true, None).unwrap();
    // max picks 1, min picks 0, max picks 1
    assert_eq!(r.score, 2);
    assert_eq!(r.best, Some(1));
    assert!(t.path.is_empty());
}

#[test]
fn no_moves_without_game_over_is_reported() {
    let mut t = Tree::dead_end_at(2);
    let before = t.signature();
    let err = searcher().search(&mut t, 3, -INF, INF, true, None).unwrap_err();
    match err {
        SearchError::NoMovesWithoutGameOver { signature } => {
            assert_eq!(signature, Tree::signature_of(&[0, 0]), "first dead end reached");
        }
        other => panic!("unexpected error {other:?}"),
    }
    assert_eq!(t.signature(), before);
    assert!(t.path.is_empty(), "every applied move undone");
}

#[test]
fn dead_end_at_a_leaf_is_not_an_error() {
    // depth runs out before the move list is asked for
    let mut t = Tree::dead_end_at(2);
    let r = searcher().search(&mut t, 2, -INF, INF, true, None).unwrap();
    assert!(r.best.is_some());
}

#[test]
fn rules_error_mid_tree_unwinds_cleanly() {
    let mut t = Tree::reject_apply_at(2);
    let before = t.signature();
    let err = searcher().search(&mut t, 4, -INF, INF, true, None).unwrap_err();
    assert!(matches!(err, SearchError::Rules(RulesError::IllegalMove(_))), "got {err:?}");
    assert_eq!(t.signature(), before);
    assert_eq!(t.path.len(), 0);
}

#[test]
fn driver_propagates_errors_and_restores() {
    let mut t = Tree::reject_apply_at(1);
    let mut s = searcher();
    let err = s.find_best_move(&mut t, 3, Duration::from_secs(10)).unwrap_err();
    assert!(matches!(err, SearchError::Rules(_)));
    assert!(t.path.is_empty());

    // depth 1 never applies past the root, so it completes before depth 2 fails
    let report = s.find_best_move_with_report(&mut t, 1, Duration::from_secs(10)).unwrap();
    assert_eq!(report.depth, 1);
    assert!(report.best.is_some());
}

#[test]
fn perft_restores_on_error() {
    let mut t = Tree::default();
    assert_eq!(perft(&mut t, 4).unwrap(), 16);
    let mut bad = Tree::reject_apply_at(2);
    assert!(matches!(perft(&mut bad, 4), Err(RulesError::IllegalMove(_))));
    assert!(bad.path.is_empty());
    assert_eq!(bad.undo(), Err(RulesError::EmptyUndo));
}
