//! Error types for ring operations.

/// Errors produced by ring membership changes and lookups.
///
/// All variants are caller-recoverable usage errors; a failed operation
/// leaves the ring exactly as it was.
#[derive(Debug, thiserror::Error)]
pub enum RingError {
    /// The node is already registered on the ring.
    #[error("duplicate node: {0}")]
    DuplicateNode(String),

    /// The node is not registered on the ring.
    #[error("node not found: {0}")]
    NodeNotFound(String),

    /// Lookup on a ring with no nodes.
    #[error("ring is empty")]
    EmptyRing,

    /// The ring was configured with zero virtual nodes per node.
    #[error("replica count must be at least 1")]
    InvalidReplicaCount,
}
