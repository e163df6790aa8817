//! Consistent hashing ring with virtual nodes.
//!
//! This crate maps arbitrary string keys to a dynamic set of named nodes so
//! that load spreads roughly evenly and a single membership change remaps
//! only about 1/N of keys. Each node is projected onto a 32-bit ring at
//! `blake3(node_id + "." + replica)` positions; a key belongs to the node
//! owning the first position at or after `blake3(key)`, wrapping around to
//! the smallest position.
//!
//! The ring resolves keys to node *identifiers* only — callers map those to
//! addresses, connections, or shards themselves. Replication, health
//! checking, and capacity weighting are concerns layered above
//! [`HashRing::locate`].

mod error;
mod hash;
mod ring;
mod store;

pub use error::RingError;
pub use ring::HashRing;
