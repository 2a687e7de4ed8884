//! Fixed-capacity transposition table.
//!
//! Four-way buckets keyed by the 64-bit position signature. Same-key writes
//! only replace an entry of equal or smaller depth; otherwise an empty slot
//! is used, and failing that the shallowest, oldest slot is evicted.

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Bound {
    Exact,
    Lower,
    Upper,
}

/// When a stored score may stand in for a fresh search.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CachePolicy {
    /// Any entry at least as deep as the request is reused as exact,
    /// whatever window produced it.
    #[default]
    DepthOnly,
    /// Bound-aware reuse: exact entries always, lower bounds only at or
    /// above beta, upper bounds only at or below alpha.
    Bounded,
}

impl CachePolicy {
    pub fn accepts(self, e: &Entry, depth: u32, alpha: i32, beta: i32) -> bool {
        if e.depth < depth { return false; }
        match self {
            CachePolicy::DepthOnly => true,
            CachePolicy::Bounded => match e.bound {
                Bound::Exact => true,
                Bound::Lower => e.score >= beta,
                Bound::Upper => e.score <= alpha,
            },
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct Entry {
    pub key: u64,
    pub depth: u32,
    pub score: i32,
    pub bound: Bound,
    pub gen: u32,
}

impl Entry {
    pub fn new(key: u64, depth: u32, score: i32, bound: Bound) -> Self {
        Self { key, depth, score, bound, gen: 0 }
    }
}

const DEFAULT_WAYS: usize = 4;
pub const DEFAULT_ENTRIES: usize = 1 << 16;

#[derive(Default, Clone, Copy)]
struct Bucket {
    slots: [Option<Entry>; DEFAULT_WAYS],
}

pub struct Tt {
    buckets: Vec<Bucket>,
    gen: u32,
}

impl Default for Tt {
    fn default() -> Self { Self::with_entries(DEFAULT_ENTRIES) }
}

impl std::fmt::Debug for Tt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tt")
            .field("capacity", &self.capacity())
            .field("gen", &self.gen)
            .finish()
    }
}

impl Tt {
    pub fn with_entries(cap: usize) -> Self {
        let mut t = Self { buckets: Vec::new(), gen: 0 };
        t.set_capacity_entries(cap);
        t
    }

    pub fn clear(&mut self) {
        for b in &mut self.buckets { *b = Bucket::default(); }
    }

    fn bucket_index(&self, key: u64) -> usize {
        let mixed = key ^ (key >> 32);
        (mixed as usize) % self.buckets.len().max(1)
    }

    pub fn get(&self, key: u64) -> Option<Entry> {
        let bucket = self.buckets.get(self.bucket_index(key))?;
        bucket.slots.iter().flatten().find(|e| e.key == key).copied()
    }

    pub fn len(&self) -> usize {
        self.buckets.iter().map(|b| b.slots.iter().flatten().count()).sum()
    }

    pub fn is_empty(&self) -> bool { self.len() == 0 }

    pub fn capacity(&self) -> usize { self.buckets.len() * DEFAULT_WAYS }

    /// Drops every stored entry.
    pub fn set_capacity_entries(&mut self, cap: usize) {
        let entries = cap.max(DEFAULT_WAYS);
        let buckets = (entries + DEFAULT_WAYS - 1) / DEFAULT_WAYS;
        self.buckets.clear();
        self.buckets.resize_with(buckets, Bucket::default);
    }

    pub fn set_capacity_mb(&mut self, mb: usize) {
        let per_entry = std::mem::size_of::<Option<Entry>>().max(1);
        let entries = (mb.saturating_mul(1024 * 1024) / per_entry).max(DEFAULT_WAYS);
        self.set_capacity_entries(entries);
    }

    pub fn put(&mut self, e: Entry) {
        if self.buckets.is_empty() { return; }
        let idx = self.bucket_index(e.key);
        let e = Entry { gen: self.gen, ..e };
        let bucket = &mut self.buckets[idx];
        // Replace same key if at least as deep
        for slot in bucket.slots.iter_mut() {
            if let Some(cur) = *slot {
                if cur.key == e.key {
                    if e.depth >= cur.depth { *slot = Some(e); }
                    return;
                }
            }
        }
        if let Some(slot) = bucket.slots.iter_mut().find(|s| s.is_none()) {
            *slot = Some(e);
            return;
        }
        // Evict lowest depth, then oldest generation
        let victim = bucket
            .slots
            .iter()
            .enumerate()
            .filter_map(|(i, s)| s.map(|cur| (cur.depth, cur.gen, i)))
            .min()
            .map_or(0, |(_, _, i)| i);
        bucket.slots[victim] = Some(e);
    }

    pub fn bump_generation(&mut self) { self.gen = self.gen.wrapping_add(1); }

    pub fn generation(&self) -> u32 { self.gen }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shallower_write_keeps_deeper_entry() {
        let mut tt = Tt::with_entries(16);
        tt.put(Entry::new(7, 4, 10, Bound::Exact));
        tt.put(Entry::new(7, 2, -3, Bound::Exact));
        assert_eq!(tt.get(7).map(|e| (e.depth, e.score)), Some((4, 10)));
        tt.put(Entry::new(7, 4, 11, Bound::Exact));
        assert_eq!(tt.get(7).map(|e| e.score), Some(11));
    }

    #[test]
    fn bounded_policy_respects_window() {
        let lower = Entry::new(1, 3, 50, Bound::Lower);
        let upper = Entry::new(1, 3, 50, Bound::Upper);
        let p = CachePolicy::Bounded;
        assert!(p.accepts(&lower, 3, 0, 40));
        assert!(!p.accepts(&lower, 3, 0, 60));
        assert!(p.accepts(&upper, 2, 60, 100));
        assert!(!p.accepts(&upper, 2, 40, 100));
        assert!(!p.accepts(&lower, 4, 0, 40), "shallow entry never answers a deeper query");
        assert!(CachePolicy::DepthOnly.accepts(&lower, 3, 0, 60));
    }

    #[test]
    fn older_generation_evicted_first_at_equal_depth() {
        let mut tt = Tt::with_entries(4);
        for k in 0..4u64 { tt.put(Entry::new(k << 40, 1, 0, Bound::Exact)); }
        assert_eq!(tt.generation(), 0);
        tt.bump_generation();
        assert_eq!(tt.generation(), 1);
        tt.put(Entry::new(0, 1, 0, Bound::Exact));
        assert_eq!(tt.get(0).map(|e| e.gen), Some(1), "stamped with the current generation");
        tt.put(Entry::new(4 << 40, 1, 0, Bound::Exact));
        assert_eq!(tt.len(), 4);
        assert!(tt.get(0).is_some(), "refreshed entry survives");
        assert!(tt.get(1 << 40).is_none(), "oldest shallow entry evicted");
        assert!(tt.get(4 << 40).is_some());
    }
}
