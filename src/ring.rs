//! Consistent hashing ring over named nodes.

use std::collections::HashSet;

use tracing::debug;

use crate::error::RingError;
use crate::hash::{hash_str, replica_hash};
use crate::store::RingStore;

/// Consistent hashing ring mapping string keys to named nodes.
///
/// Each node is projected onto the 32-bit ring at `replicas` positions
/// (virtual nodes); a key belongs to the node owning the first position at
/// or after the key's hash, wrapping around. Adding or removing one node
/// remaps roughly 1/N of keys.
///
/// The ring is plain mutable state: membership changes take `&mut self`,
/// lookups take `&self`. It performs no I/O and never blocks; callers
/// sharing a ring across threads wrap it in a lock. Independent instances
/// share nothing.
#[derive(Debug, Clone)]
pub struct HashRing {
    store: RingStore,
    nodes: HashSet<String>,
    replicas: usize,
}

impl HashRing {
    /// Create an empty ring with `replicas` virtual nodes per node.
    ///
    /// Typical replica counts are 40–160; more replicas smooth the key
    /// distribution at the cost of more ring entries per membership change.
    pub fn new(replicas: usize) -> Result<Self, RingError> {
        if replicas == 0 {
            return Err(RingError::InvalidReplicaCount);
        }
        Ok(Self {
            store: RingStore::new(),
            nodes: HashSet::new(),
            replicas,
        })
    }

    /// Create a ring seeded with `nodes`, ignoring duplicates in the list.
    ///
    /// Ring layout depends only on the node identifiers, never on the order
    /// they were supplied in.
    pub fn with_nodes<I, S>(nodes: I, replicas: usize) -> Result<Self, RingError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut ring = Self::new(replicas)?;
        for node in nodes {
            let node = node.into();
            if !ring.nodes.contains(&node) {
                ring.add_node(node)?;
            }
        }
        Ok(ring)
    }

    /// Register a node and place its virtual nodes on the ring.
    ///
    /// Keys that land on the new positions move from their previous
    /// successor to this node; nothing else moves.
    pub fn add_node(&mut self, node_id: impl Into<String>) -> Result<(), RingError> {
        let node_id = node_id.into();
        if self.nodes.contains(&node_id) {
            return Err(RingError::DuplicateNode(node_id));
        }
        for replica in 0..self.replicas {
            self.store.insert(replica_hash(&node_id, replica), &node_id);
        }
        debug!(%node_id, replicas = self.replicas, "added node to ring");
        self.nodes.insert(node_id);
        Ok(())
    }

    /// Unregister a node and take its virtual nodes off the ring.
    ///
    /// The node's candidate positions are recomputed rather than stored;
    /// any that lost an insert-time collision are skipped by the store's
    /// verified removal. Keys the node owned move to their next successor.
    pub fn remove_node(&mut self, node_id: &str) -> Result<(), RingError> {
        if !self.nodes.remove(node_id) {
            return Err(RingError::NodeNotFound(node_id.to_owned()));
        }
        for replica in 0..self.replicas {
            self.store.remove(replica_hash(node_id, replica), node_id);
        }
        debug!(%node_id, "removed node from ring");
        Ok(())
    }

    /// Resolve `key` to the node owning its hash successor.
    pub fn locate(&self, key: &str) -> Result<&str, RingError> {
        if self.nodes.is_empty() {
            return Err(RingError::EmptyRing);
        }
        // A node stays registered even if every one of its replicas lost an
        // insert-time collision; with no surviving positions at all there
        // is still no lookup target.
        self.store
            .successor_owner(hash_str(key))
            .ok_or(RingError::EmptyRing)
    }

    /// Number of registered nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of virtual-node positions currently on the ring.
    pub fn vnode_count(&self) -> usize {
        self.store.len()
    }

    /// Whether `node_id` is registered.
    pub fn contains_node(&self, node_id: &str) -> bool {
        self.nodes.contains(node_id)
    }

    /// All registered node identifiers, in no particular order.
    pub fn node_ids(&self) -> Vec<&str> {
        self.nodes.iter().map(String::as_str).collect()
    }

    /// Virtual nodes per node.
    pub fn replicas(&self) -> usize {
        self.replicas
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_replicas_rejected() {
        assert!(matches!(
            HashRing::new(0),
            Err(RingError::InvalidReplicaCount)
        ));
    }

    #[test]
    fn test_locate_on_empty_ring_fails() {
        let ring = HashRing::new(80).unwrap();
        assert!(matches!(ring.locate("k"), Err(RingError::EmptyRing)));
    }

    #[test]
    fn test_single_node_owns_everything() {
        let ring = HashRing::with_nodes(["only"], 80).unwrap();
        for i in 0..100 {
            assert_eq!(ring.locate(&format!("key-{i}")).unwrap(), "only");
        }
    }

    #[test]
    fn test_duplicate_add_rejected_and_ring_unchanged() {
        let mut ring = HashRing::with_nodes(["a", "b"], 80).unwrap();
        let vnodes = ring.vnode_count();

        let err = ring.add_node("a").unwrap_err();
        assert!(matches!(err, RingError::DuplicateNode(id) if id == "a"));
        assert_eq!(ring.node_count(), 2);
        assert_eq!(ring.vnode_count(), vnodes);
    }

    #[test]
    fn test_remove_unknown_node_rejected_and_ring_unchanged() {
        let mut ring = HashRing::with_nodes(["a", "b"], 80).unwrap();
        let vnodes = ring.vnode_count();

        let err = ring.remove_node("ghost").unwrap_err();
        assert!(matches!(err, RingError::NodeNotFound(id) if id == "ghost"));
        assert_eq!(ring.node_count(), 2);
        assert_eq!(ring.vnode_count(), vnodes);
    }

    #[test]
    fn test_initial_node_list_deduplicated() {
        let ring = HashRing::with_nodes(["a", "b", "a", "a"], 80).unwrap();
        assert_eq!(ring.node_count(), 2);
        assert_eq!(ring.vnode_count(), 160);
    }

    #[test]
    fn test_remove_last_node_empties_ring() {
        let mut ring = HashRing::with_nodes(["a"], 80).unwrap();
        ring.remove_node("a").unwrap();

        assert_eq!(ring.node_count(), 0);
        assert_eq!(ring.vnode_count(), 0);
        assert!(matches!(ring.locate("k"), Err(RingError::EmptyRing)));
    }

    #[test]
    fn test_locate_is_stable() {
        let ring = HashRing::with_nodes(["a", "b", "c"], 80).unwrap();
        for i in 0..50 {
            let key = format!("key-{i}");
            assert_eq!(ring.locate(&key).unwrap(), ring.locate(&key).unwrap());
        }
    }

    #[test]
    fn test_membership_accessors() {
        let ring = HashRing::with_nodes(["a", "b"], 40).unwrap();

        assert!(ring.contains_node("a"));
        assert!(!ring.contains_node("c"));
        assert_eq!(ring.replicas(), 40);

        let mut ids = ring.node_ids();
        ids.sort_unstable();
        assert_eq!(ids, ["a", "b"]);
    }
}
