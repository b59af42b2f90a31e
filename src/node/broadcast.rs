//! Fan-out of locally accepted mutations, and catch-up for new peers.

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::auction::{Auction, OpenAuctionRequest, RpcMethod};
use crate::error::AuctionResult;
use crate::keys::PeerKey;
use crate::node::PeerRegistry;
use crate::traits::RpcClient;

/// Mirrors a mutation to every registered peer, one request at a time.
///
/// Fan-out is deliberately sequential: each peer's round trip is awaited
/// before the next begins, so total latency is the sum of the round trips.
/// A failed request is logged and skipped; the peer stays registered and is
/// retried on the next broadcast.
#[derive(Clone)]
pub struct ReplicationBroadcaster<R: RpcClient> {
    rpc: R,
    peers: PeerRegistry,
}

impl<R: RpcClient> ReplicationBroadcaster<R> {
    pub fn new(rpc: R, peers: PeerRegistry) -> Self {
        Self { rpc, peers }
    }

    pub fn peers(&self) -> &PeerRegistry {
        &self.peers
    }

    /// Send `(method, payload)` to every registered peer. Returns how many
    /// deliveries succeeded; per-peer failures never propagate.
    pub async fn broadcast<T: Serialize + Sync>(
        &self,
        method: RpcMethod,
        payload: &T,
    ) -> AuctionResult<usize> {
        let body = serde_json::to_vec(payload)?;
        let peers = self.peers.all().await;

        let mut delivered = 0;
        for (name, key) in &peers {
            match self.rpc.request(key, method, body.clone()).await {
                Ok(response) => {
                    debug!(
                        "Response from peer {name}: {}",
                        response_status(&response)
                    );
                    delivered += 1;
                }
                Err(e) => {
                    warn!("Error propagating {method} to {name}: {e}");
                }
            }
        }
        Ok(delivered)
    }

    /// Bring a newly registered peer up to date: one `openAuction` request
    /// per known auction, sequentially, each failure logged independently so
    /// one bad transfer does not abort the rest.
    ///
    /// Only the auctions themselves are re-sent; bids and closes missed
    /// while disconnected are not replayed.
    pub async fn catch_up(&self, name: &str, peer: &PeerKey, auctions: Vec<Auction>) {
        if auctions.is_empty() {
            return;
        }
        info!("Sending {} known auction(s) to peer {name}", auctions.len());

        for auction in auctions {
            let request = OpenAuctionRequest {
                auction_id: auction.auction_id,
                item: auction.item,
                starting_price: auction.starting_price,
            };
            let body = match serde_json::to_vec(&request) {
                Ok(body) => body,
                Err(e) => {
                    warn!("Failed to serialize catch-up request: {e}");
                    continue;
                }
            };
            if let Err(e) = self.rpc.request(peer, RpcMethod::OpenAuction, body).await {
                warn!(
                    "Error sending open auction {} to {name}: {e}",
                    request.auction_id
                );
            }
        }
    }
}

fn response_status(response: &[u8]) -> String {
    serde_json::from_slice::<serde_json::Value>(response)
        .ok()
        .and_then(|v| v.get("status").and_then(|s| s.as_str()).map(String::from))
        .unwrap_or_else(|| String::from_utf8_lossy(response).into_owned())
}
