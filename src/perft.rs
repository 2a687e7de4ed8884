use crate::board::{Rules, RulesError};

/// Leaf count to `depth` plies, walking the tree with the `apply`/`undo`
/// pair so the undo discipline is exercised along with move generation.
pub fn perft<P: Rules>(pos: &mut P, depth: u32) -> Result<u64, RulesError> {
    if depth == 0 { return Ok(1); }
    let mut nodes = 0u64;
    for m in pos.legal_moves() {
        pos.apply(m)?;
        let sub = perft(pos, depth - 1);
        pos.undo()?;
        nodes += sub?;
    }
    Ok(nodes)
}
