//! Ordered store of ring positions.

use std::collections::{BTreeMap, HashSet};

/// Sorted ring positions and their owning nodes.
///
/// Positions live in a `BTreeMap` (sorted, distinct keys) with a parallel
/// membership set used to detect position collisions in O(1). The map's key
/// set and the membership set are always equal.
#[derive(Debug, Clone, Default)]
pub(crate) struct RingStore {
    positions: BTreeMap<u32, String>,
    occupied: HashSet<u32>,
}

impl RingStore {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Insert a position; first writer wins.
    ///
    /// A position already held by an earlier replica (of this node or any
    /// other) keeps its owner and the new entry is dropped. The hash space
    /// is 2^32, so drops are rare and cost at most a slightly uneven
    /// replica count.
    pub(crate) fn insert(&mut self, position: u32, owner: &str) {
        if self.occupied.insert(position) {
            self.positions.insert(position, owner.to_owned());
        }
    }

    /// Remove a position, but only if `owner` actually holds it.
    ///
    /// Candidate positions recomputed on node removal may never have been
    /// inserted (dropped on collision) or may be held by whichever node
    /// inserted first. Removal must verify ownership exactly — inferring
    /// the entry from position alone could take out another node's
    /// position.
    pub(crate) fn remove(&mut self, position: u32, owner: &str) {
        if self.positions.get(&position).is_some_and(|held| held == owner) {
            self.positions.remove(&position);
            self.occupied.remove(&position);
        }
    }

    /// Owner of the smallest position `>= key_hash`, wrapping around to
    /// the smallest position overall. `None` only when the store is empty.
    pub(crate) fn successor_owner(&self, key_hash: u32) -> Option<&str> {
        self.positions
            .range(key_hash..)
            .next()
            .or_else(|| self.positions.iter().next())
            .map(|(_, owner)| owner.as_str())
    }

    /// Number of positions currently on the ring.
    pub(crate) fn len(&self) -> usize {
        self.positions.len()
    }
}
