use chessbot::search::eval::Heuristic;
use chessbot::search::tt::{Bound, Entry, Tt};
use chessbot::{Position, SearchParams, Searcher};
use std::time::Duration;

#[test]
fn tt_capacity_enforced() {
    let mut tt = Tt::with_entries(8);
    for i in 0..64u64 {
        tt.put(Entry::new(i, (i % 4) as u32, i as i32, Bound::Exact));
    }
    assert!(tt.len() <= 8, "tt size {} exceeds capacity", tt.len());
    assert_eq!(tt.capacity(), 8);
}

#[test]
fn tt_depth_preferred_on_eviction() {
    // a single bucket
    let mut tt = Tt::with_entries(4);
    tt.put(Entry::new(1, 6, 0, Bound::Exact));
    for k in 2..=8u64 { tt.put(Entry::new(k, 1, 0, Bound::Exact)); }
    assert!(tt.get(1).is_some(), "deep entry evicted unexpectedly");
    assert_eq!(tt.len(), 4);
}

#[test]
fn resizing_clears_and_bounds_the_table() {
    let mut pos = Position::startpos();
    let params = SearchParams { tt_entries: 16, ..SearchParams::default() };
    let mut s = Searcher::new(Heuristic, params);
    s.find_best_move(&mut pos, 3, Duration::from_secs(30)).unwrap();
    assert!(s.tt_probe(&pos).is_some() || s.nodes() > 16);

    s.set_tt_capacity_entries(64);
    assert_eq!(s.params().tt_entries, 64);
    assert!(s.tt_probe(&pos).is_none());

    s.set_tt_capacity_mb(1);
    assert!(s.params().tt_entries > 64);
}

#[test]
fn clear_forgets_everything() {
    let mut pos = Position::startpos();
    let mut s = Searcher::default();
    s.record_position(&pos);
    s.find_best_move(&mut pos, 3, Duration::from_secs(30)).unwrap();
    s.clear();
    assert!(s.tt_probe(&pos).is_none());
    assert!(s.history().is_empty());
    assert!((0..=3).all(|d| s.killers().at(d).is_empty()));
}
