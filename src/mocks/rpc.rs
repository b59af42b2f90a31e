//! Mock RPC client and an in-process request router.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::auction::RpcMethod;
use crate::error::{AuctionError, AuctionResult};
use crate::keys::PeerKey;
use crate::traits::{RpcClient, RpcHandler};

/// A recorded outbound request for test assertions.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub peer: PeerKey,
    pub method: RpcMethod,
    pub payload: Vec<u8>,
}

/// Records every request and answers each with a canned `{"status":"ok"}`.
///
/// Individual peers can be marked as failing; the request is still recorded
/// (it was attempted) but resolves to an error.
#[derive(Clone, Default)]
pub struct MockRpc {
    requests: Arc<RwLock<Vec<RecordedRequest>>>,
    failing_peers: Arc<RwLock<HashSet<PeerKey>>>,
}

impl MockRpc {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every request to `peer` fail from now on.
    pub async fn fail_peer(&self, peer: &PeerKey) {
        self.failing_peers.write().await.insert(peer.clone());
    }

    pub async fn recorded_requests(&self) -> Vec<RecordedRequest> {
        self.requests.read().await.clone()
    }

    pub async fn clear_requests(&self) {
        self.requests.write().await.clear();
    }
}

#[async_trait]
impl RpcClient for MockRpc {
    async fn request(
        &self,
        peer: &PeerKey,
        method: RpcMethod,
        payload: Vec<u8>,
    ) -> AuctionResult<Vec<u8>> {
        self.requests.write().await.push(RecordedRequest {
            peer: peer.clone(),
            method,
            payload,
        });

        if self.failing_peers.read().await.contains(peer) {
            return Err(AuctionError::Rpc(format!(
                "simulated failure reaching {peer}"
            )));
        }
        Ok(br#"{"status":"ok"}"#.to_vec())
    }
}

/// Routes requests to in-process [`RpcHandler`]s by peer key.
///
/// The multi-node harness registers each coordinator under its RPC key;
/// a `request` then behaves like a real round trip, running the remote
/// node's inbound dispatch and returning its response body.
#[derive(Clone, Default)]
pub struct RpcRouter {
    handlers: Arc<RwLock<HashMap<PeerKey, Arc<dyn RpcHandler>>>>,
    partitioned: Arc<RwLock<HashSet<PeerKey>>>,
}

impl RpcRouter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `handler` as the node listening on `key`.
    pub async fn register(&self, key: PeerKey, handler: Arc<dyn RpcHandler>) {
        self.handlers.write().await.insert(key, handler);
    }

    /// Simulate a network partition: requests to `key` fail until restored.
    pub async fn partition(&self, key: &PeerKey) {
        self.partitioned.write().await.insert(key.clone());
    }

    /// Heal a previous [`partition`](Self::partition).
    pub async fn restore(&self, key: &PeerKey) {
        self.partitioned.write().await.remove(key);
    }
}

#[async_trait]
impl RpcClient for RpcRouter {
    async fn request(
        &self,
        peer: &PeerKey,
        method: RpcMethod,
        payload: Vec<u8>,
    ) -> AuctionResult<Vec<u8>> {
        if self.partitioned.read().await.contains(peer) {
            return Err(AuctionError::Rpc(format!("{peer} is unreachable")));
        }

        let handler = self
            .handlers
            .read()
            .await
            .get(peer)
            .cloned()
            .ok_or_else(|| AuctionError::Rpc(format!("no node listening on {peer}")))?;

        handler.handle_request(method.as_str(), &payload).await
    }
}
