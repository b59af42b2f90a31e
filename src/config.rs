//! Configuration constants for the auction node.
//!
//! This module centralizes magic numbers and protocol constants
//! to improve maintainability and enable easier tuning.

use sha2::{Digest, Sha256};

/// Prefix used to namespace persisted auction records in the key-value store.
pub const AUCTION_KEY_PREFIX: &str = "auction:";

/// Topic string all auction nodes rendezvous on for peer discovery.
pub const DISCOVERY_TOPIC: &str = "auction-p2p";

/// Number of leading hex characters of a transport public key used as a
/// peer's display name. Two peers sharing a prefix overwrite one registry
/// entry; the reference implementation accepts this collision risk.
pub const PEER_NAME_LEN: usize = 6;

/// Persistence key for an auction record.
pub fn auction_key(auction_id: &str) -> String {
    format!("{AUCTION_KEY_PREFIX}{auction_id}")
}

/// 32-byte discovery topic digest handed to the swarm collaborator.
///
/// The rendezvous topic is the SHA-256 of [`DISCOVERY_TOPIC`], so every node
/// derives the same swarm topic without coordination.
pub fn discovery_topic_digest() -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(DISCOVERY_TOPIC.as_bytes());
    hasher.finalize().into()
}
