use std::collections::HashSet;

/// Signatures of positions reached in the game actually played.
///
/// Filled by the caller after each committed move; the search only reads it.
#[derive(Clone, Debug, Default)]
pub struct PositionHistory {
    seen: HashSet<u64>,
}

impl PositionHistory {
    pub fn new() -> Self { Self::default() }

    /// Returns false if the signature was already present.
    pub fn record(&mut self, signature: u64) -> bool { self.seen.insert(signature) }

    pub fn contains(&self, signature: u64) -> bool { self.seen.contains(&signature) }

    pub fn len(&self) -> usize { self.seen.len() }

    pub fn is_empty(&self) -> bool { self.seen.is_empty() }

    pub fn clear(&mut self) { self.seen.clear(); }
}
