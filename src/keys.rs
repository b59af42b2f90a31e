//! Node identity keys.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::PEER_NAME_LEN;

/// A routable RPC identity: the 32-byte public key a peer's RPC server
/// listens on. Opaque to this crate; the transport collaborator knows how
/// to route to it.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PeerKey([u8; 32]);

impl PeerKey {
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Parse a key from a raw frame, e.g. the handshake payload.
    pub fn from_slice(bytes: &[u8]) -> Option<Self> {
        let arr: [u8; 32] = bytes.try_into().ok()?;
        Some(Self(arr))
    }

    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    pub fn to_vec(&self) -> Vec<u8> {
        self.0.to_vec()
    }

    /// Short display name: the first [`PEER_NAME_LEN`] hex characters.
    ///
    /// Collision-prone by construction; callers that need a unique identity
    /// must use the full key.
    pub fn display_name(&self) -> String {
        short_name(&self.0)
    }
}

/// Display name for an arbitrary transport key: the first
/// [`PEER_NAME_LEN`] hex characters of its encoding.
pub fn short_name(key_bytes: &[u8]) -> String {
    let mut name = hex::encode(key_bytes);
    name.truncate(PEER_NAME_LEN);
    name
}

impl fmt::Display for PeerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

impl fmt::Debug for PeerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PeerKey({})", self.display_name())
    }
}
