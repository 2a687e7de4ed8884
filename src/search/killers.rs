//! Killer moves: beta-cutoff moves, bucketed by remaining depth.

/// Per-depth killer lists. Every distinct move that caused a cutoff at a
/// depth stays listed, in the order it first did so, until `clear`.
///
/// Entries are hints only; a stored move may be illegal in the position
/// being ordered, so callers match by equality against the legal list.
#[derive(Clone, Debug)]
pub struct KillerStore<M> {
    by_depth: Vec<Vec<M>>,
}

impl<M> Default for KillerStore<M> {
    fn default() -> Self { Self { by_depth: Vec::new() } }
}

impl<M: Copy + Eq> KillerStore<M> {
    pub fn new() -> Self { Self::default() }

    /// Returns false if `m` was already a killer at `depth`.
    pub fn record(&mut self, depth: u32, m: M) -> bool {
        let d = depth as usize;
        if d >= self.by_depth.len() { self.by_depth.resize_with(d + 1, Vec::new); }
        let list = &mut self.by_depth[d];
        if list.contains(&m) { return false; }
        list.push(m);
        true
    }

    pub fn is_killer(&self, depth: u32, m: M) -> bool {
        self.by_depth.get(depth as usize).map_or(false, |l| l.contains(&m))
    }

    /// Killers at `depth`, oldest first.
    pub fn at(&self, depth: u32) -> &[M] {
        self.by_depth.get(depth as usize).map_or(&[], Vec::as_slice)
    }

    /// Total number of stored killers across all depths.
    pub fn len(&self) -> usize { self.by_depth.iter().map(Vec::len).sum() }

    pub fn is_empty(&self) -> bool { self.len() == 0 }

    pub fn clear(&mut self) { self.by_depth.clear(); }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_every_distinct_killer_in_first_seen_order() {
        let mut k = KillerStore::new();
        assert!(k.record(3, 'a'));
        assert!(k.record(3, 'b'));
        assert!(k.record(3, 'c'));
        assert_eq!(k.at(3), &['a', 'b', 'c']);
        assert!(k.is_killer(3, 'a'));
    }

    #[test]
    fn repeat_is_not_duplicated() {
        let mut k = KillerStore::new();
        k.record(1, 'a');
        k.record(1, 'b');
        assert!(!k.record(1, 'a'));
        assert_eq!(k.at(1), &['a', 'b']);
        assert_eq!(k.len(), 2);
    }

    #[test]
    fn depths_are_independent() {
        let mut k = KillerStore::new();
        k.record(5, 'x');
        assert!(k.is_killer(5, 'x'));
        assert!(!k.is_killer(4, 'x'));
        assert!(!k.is_killer(9, 'x'));
        assert!(k.at(0).is_empty());
        k.clear();
        assert!(k.is_empty());
    }
}
