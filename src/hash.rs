//! Ring position hashing.

/// Hash a string to a position in the 32-bit ring space.
///
/// BLAKE3 truncated to its first four bytes (little-endian). Deterministic
/// across processes and releases, so independently built rings agree on key
/// placement.
pub(crate) fn hash_str(s: &str) -> u32 {
    let digest = blake3::hash(s.as_bytes());
    let bytes: [u8; 4] = digest.as_bytes()[..4].try_into().expect("4 bytes");
    u32::from_le_bytes(bytes)
}

/// Position of one replica of a node: `hash(node_id + "." + replica)`.
///
/// Recomputed on every membership change; the ring never stores which
/// positions belong to a node.
pub(crate) fn replica_hash(node_id: &str, replica: usize) -> u32 {
    hash_str(&format!("{node_id}.{replica}"))
}
