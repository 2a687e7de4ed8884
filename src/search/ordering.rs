//! Move ordering: captures, checks and killers float to the front.

use crate::board::Rules;
use crate::search::killers::KillerStore;

pub const CAPTURE_BONUS: i32 = 1_000;
pub const CHECK_BONUS: i32 = 500;
pub const KILLER_BONUS: i32 = 2_000;

/// Additive priority of a single move.
pub fn move_priority<P: Rules>(
    pos: &P,
    m: P::Move,
    killers: &KillerStore<P::Move>,
    depth: u32,
) -> i32 {
    let mut score = 0;
    if pos.is_capture(m) { score += CAPTURE_BONUS; }
    if pos.gives_check(m) { score += CHECK_BONUS; }
    if killers.is_killer(depth, m) { score += KILLER_BONUS; }
    score
}

/// Sort `moves` by descending priority. The sort is stable, so ties keep
/// the order they came in.
pub fn order_moves<P: Rules>(
    pos: &P,
    moves: &mut [P::Move],
    killers: &KillerStore<P::Move>,
    depth: u32,
) {
    moves.sort_by_cached_key(|&m| -move_priority(pos, m, killers, depth));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::cozy::Position;
    use cozy_chess::Move;

    fn uci_list(pos: &Position, moves: &[Move]) -> Vec<String> {
        moves.iter().map(|&m| pos.uci(m)).collect()
    }

    #[test]
    fn capture_check_killer_bands() {
        // White: Qd1 can take on d7 with check; Ra1 can take a7; quiet king moves.
        let pos = Position::from_fen("4k3/p2p4/8/8/8/8/8/R2QK3 w - - 0 1").unwrap();
        let killers = KillerStore::new();
        let qxd7 = pos.parse_move("d1d7").unwrap();
        let rxa7 = pos.parse_move("a1a7").unwrap();
        let quiet = pos.parse_move("e1f2").unwrap();
        assert_eq!(move_priority(&pos, qxd7, &killers, 2), CAPTURE_BONUS + CHECK_BONUS);
        assert_eq!(move_priority(&pos, rxa7, &killers, 2), CAPTURE_BONUS);
        assert_eq!(move_priority(&pos, quiet, &killers, 2), 0);
    }

    #[test]
    fn killer_outranks_capture_and_scores_add() {
        let pos = Position::from_fen("4k3/p2p4/8/8/8/8/8/R2QK3 w - - 0 1").unwrap();
        let qxd7 = pos.parse_move("d1d7").unwrap();
        let quiet = pos.parse_move("e1f2").unwrap();
        let mut killers = KillerStore::new();
        killers.record(2, quiet);
        killers.record(2, qxd7);
        assert_eq!(move_priority(&pos, qxd7, &killers, 2), 3_500);
        let mut moves = pos.legal_moves();
        order_moves(&pos, &mut moves, &killers, 2);
        assert_eq!(uci_list(&pos, &moves[..2]), vec!["d1d7", "e1f2"]);
        // other depths see no killers
        assert_eq!(move_priority(&pos, quiet, &killers, 1), 0);
    }

    #[test]
    fn ties_keep_generator_order() {
        let pos = Position::startpos();
        let killers = KillerStore::new();
        let original = pos.legal_moves();
        let mut moves = original.clone();
        order_moves(&pos, &mut moves, &killers, 1);
        assert_eq!(moves, original);
    }
}
