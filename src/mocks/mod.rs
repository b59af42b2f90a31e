//! Mock implementations for testing.
//!
//! These stand in for the external collaborators (RPC transport, durable
//! store, raw connections) so the core can be exercised without a network
//! or a disk. [`RpcRouter`] additionally routes requests between in-process
//! coordinators for multi-node tests.

pub mod connection;
pub mod persistence;
pub mod rpc;

pub use connection::MockConnection;
pub use persistence::MockKv;
pub use rpc::{MockRpc, RecordedRequest, RpcRouter};

use crate::keys::PeerKey;

/// Deterministic test key: all 32 bytes set to `n`.
pub fn make_test_peer_key(n: u8) -> PeerKey {
    PeerKey::from_bytes([n; 32])
}
