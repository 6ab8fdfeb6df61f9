//! Entity generators.
//!
//! One module per entity family. Generators are pure over their inputs plus
//! the RNG inside [`FakeValues`]: they take parent key slices and mutable
//! state carriers, and return fully keyed records ready for insertion.
//!
//! Uniqueness the store would reject is enforced here instead, with
//! rejection sampling bounded by [`MAX_ATTEMPTS_PER_ROW`]. When the attempt
//! budget runs out a generator returns fewer rows than asked, and the caller
//! carries on with what it got.

pub mod channel;
pub mod comment;
pub mod company;
pub mod country;
pub mod currency;
pub mod donation;
pub mod nationality;
pub mod platform;
pub mod sponsorship;
pub mod subscription;
pub mod user;
pub mod video;

use ahash::{AHashMap, AHashSet};

/// Attempt budget per requested row for rejection-sampled generators.
pub const MAX_ATTEMPTS_PER_ROW: usize = 10;

/// Monotonic surrogate-id source for one table. Ids start at 1 and are
/// assigned in-process, so child generators never need to read ids back
/// mid-level.
#[derive(Debug)]
pub struct IdAllocator {
    next: i64,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self { next: 1 }
    }

    pub fn next(&mut self) -> i64 {
        let id = self.next;
        self.next += 1;
        id
    }
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self::new()
    }
}

/// Composite-pair uniqueness carrier, shared across chunks of one join
/// table.
#[derive(Debug, Default)]
pub struct PairSet {
    seen: AHashSet<(i64, i64)>,
}

impl PairSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// True when the pair was new.
    pub fn insert(&mut self, a: i64, b: i64) -> bool {
        self.seen.insert((a, b))
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}

/// Per-parent sequence counter. `next(parent)` yields 1, 2, 3, ... per
/// parent, gapless across chunks as long as the same map is passed along.
#[derive(Debug, Default)]
pub struct SequenceMap {
    next: AHashMap<i64, i64>,
}

impl SequenceMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next(&mut self, parent: i64) -> i64 {
        let counter = self.next.entry(parent).or_insert(1);
        let seq = *counter;
        *counter += 1;
        seq
    }
}

/// Cross-chunk state for platform memberships: the (platform, user) pairs
/// already emitted plus the member numbers taken per platform.
#[derive(Debug, Default)]
pub struct MemberState {
    pub pairs: PairSet,
    pub member_nos: AHashMap<i64, AHashSet<i64>>,
}

impl MemberState {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Resumable position for generators that emit a fixed fan-out per parent
/// (channel tiers). Survives across chunks so a parent's children are never
/// split inconsistently.
#[derive(Debug, Default, Clone, Copy)]
pub struct FanOutCursor {
    pub parent_idx: usize,
    pub child_idx: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_allocator_starts_at_one() {
        let mut ids = IdAllocator::new();
        assert_eq!(ids.next(), 1);
        assert_eq!(ids.next(), 2);
        assert_eq!(ids.next(), 3);
    }

    #[test]
    fn test_pair_set_rejects_duplicates() {
        let mut pairs = PairSet::new();
        assert!(pairs.insert(1, 2));
        assert!(!pairs.insert(1, 2));
        assert!(pairs.insert(2, 1));
        assert_eq!(pairs.len(), 2);
    }

    #[test]
    fn test_sequence_map_is_per_parent_and_gapless() {
        let mut seqs = SequenceMap::new();
        assert_eq!(seqs.next(10), 1);
        assert_eq!(seqs.next(10), 2);
        assert_eq!(seqs.next(20), 1);
        assert_eq!(seqs.next(10), 3);
    }
}
