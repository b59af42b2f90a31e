//! Durable key-value persistence abstraction.

use async_trait::async_trait;

use crate::error::AuctionResult;

/// Append-structured durable store used as a write-through mirror of the
/// in-memory auction map.
///
/// Keys are namespaced strings (see [`crate::config::auction_key`]); values
/// are whole JSON documents with full-overwrite semantics, no field merging.
#[async_trait]
pub trait KvStore: Send + Sync + Clone {
    /// One-time initialization barrier. Must complete before the first
    /// [`put`](Self::put); the coordinator awaits it at startup.
    async fn ready(&self) -> AuctionResult<()>;

    /// Durable upsert of `value` under `key`.
    async fn put(&self, key: &str, value: serde_json::Value) -> AuctionResult<()>;
}
