//! Composition root: wires connection events and inbound RPC to the core.
//!
//! The discovery/transport collaborator delivers three events per connection
//! (open, first data frame, error) and the RPC-serving collaborator delivers
//! inbound requests via [`RpcHandler`]. This is the only component that
//! touches those collaborators directly; everything else sees the narrow
//! trait seams.

use async_trait::async_trait;

use tracing::{debug, info, warn};

use crate::auction::{
    status_response, AuctionStore, BidOutcome, CloseAuctionRequest, CloseOutcome,
    OpenAuctionRequest, PlaceBidRequest, RpcMethod, OPEN_STATUS,
};
use crate::error::{AuctionError, AuctionResult};
use crate::keys::{short_name, PeerKey};
use crate::node::{Origin, PeerRegistry, ReplicationBroadcaster, StateMachine};
use crate::traits::{Connection, KvStore, RpcClient, RpcHandler};

/// One auction node's coordination surface.
///
/// Owns the peer registry and the state machine; local callers go through
/// the `Origin::Local` entry points, inbound RPC always applies with
/// `Origin::Replica` so replicated mutations can never echo back out.
pub struct Coordinator<R: RpcClient, P: KvStore> {
    rpc_public_key: PeerKey,
    peers: PeerRegistry,
    machine: StateMachine<R, P>,
}

impl<R: RpcClient, P: KvStore> Coordinator<R, P> {
    /// Build a node and run the persistence readiness barrier.
    ///
    /// `rpc_public_key` is the identity this node's RPC server listens on;
    /// it is what peers receive in the handshake frame.
    pub async fn start(rpc_public_key: PeerKey, rpc: R, kv: P) -> AuctionResult<Self> {
        kv.ready().await?;

        let peers = PeerRegistry::new();
        let broadcaster = ReplicationBroadcaster::new(rpc, peers.clone());
        let machine = StateMachine::new(AuctionStore::new(), kv, broadcaster);
        info!("Auction node ready, RPC key {rpc_public_key}");

        Ok(Self {
            rpc_public_key,
            peers,
            machine,
        })
    }

    pub fn rpc_public_key(&self) -> &PeerKey {
        &self.rpc_public_key
    }

    pub fn peers(&self) -> &PeerRegistry {
        &self.peers
    }

    pub fn machine(&self) -> &StateMachine<R, P> {
        &self.machine
    }

    // ── Local entry points (mirrored to peers) ──────────────────────────

    pub async fn open_auction(&self, req: &OpenAuctionRequest) -> AuctionResult<()> {
        self.machine.open_auction(req, Origin::Local).await
    }

    pub async fn place_bid(&self, req: &PlaceBidRequest) -> AuctionResult<BidOutcome> {
        self.machine.place_bid(req, Origin::Local).await
    }

    pub async fn close_auction(&self, req: &CloseAuctionRequest) -> AuctionResult<CloseOutcome> {
        self.machine.close_auction(req, Origin::Local).await
    }

    // ── Connection lifecycle (driven by the swarm collaborator) ─────────

    /// A new transport connection was established.
    ///
    /// Derives the peer's display name from its transport key and
    /// immediately writes our RPC public key as the handshake frame,
    /// fire-and-forget with no acknowledgement or retry. Returns the name the
    /// caller should tag later data/error events with.
    pub async fn on_connection_open<C: Connection>(
        &self,
        remote_transport_key: &[u8],
        conn: &C,
    ) -> AuctionResult<String> {
        let name = short_name(remote_transport_key);
        info!("New peer found, {name}");

        conn.write(self.rpc_public_key.to_vec()).await?;
        Ok(name)
    }

    /// First data frame from a connection: the remote's RPC public key.
    ///
    /// Registers the peer and brings it up to date with one `openAuction`
    /// transfer per known auction.
    pub async fn on_peer_data(&self, name: &str, payload: &[u8]) -> AuctionResult<()> {
        let Some(key) = PeerKey::from_slice(payload) else {
            return Err(AuctionError::InvalidInput(format!(
                "handshake payload from {name} is not a 32-byte public key ({} bytes)",
                payload.len()
            )));
        };

        self.peers.register(name, key.clone()).await;
        info!("New peer connected");

        let auctions = self.machine.store().all().await;
        self.broadcaster().catch_up(name, &key, auctions).await;
        Ok(())
    }

    /// The connection behind `name` reported an error; forget the peer.
    ///
    /// A later reconnect re-registers from scratch; mutations replicated
    /// while the peer was gone are not replayed beyond the open-auction
    /// catch-up.
    pub async fn on_connection_error(&self, name: &str) {
        warn!("Connection error for peer {name}, removing");
        self.peers.remove(name).await;
    }

    fn broadcaster(&self) -> &ReplicationBroadcaster<R> {
        self.machine.broadcaster()
    }
}

#[async_trait]
impl<R: RpcClient, P: KvStore> RpcHandler for Coordinator<R, P> {
    /// Dispatch an inbound peer request. Always applies with
    /// [`Origin::Replica`], so handling a replicated mutation never
    /// triggers a further broadcast.
    async fn handle_request(&self, method: &str, payload: &[u8]) -> AuctionResult<Vec<u8>> {
        let Some(method) = RpcMethod::from_str(method) else {
            return Err(AuctionError::Rpc(format!("unknown method {method:?}")));
        };
        debug!("Inbound {method} request ({} bytes)", payload.len());

        let status = match method {
            RpcMethod::OpenAuction => {
                let req: OpenAuctionRequest = serde_json::from_slice(payload)?;
                self.machine.open_auction(&req, Origin::Replica).await?;
                OPEN_STATUS
            }
            RpcMethod::PlaceBid => {
                let req: PlaceBidRequest = serde_json::from_slice(payload)?;
                self.machine.place_bid(&req, Origin::Replica).await?.status()
            }
            RpcMethod::CloseAuction => {
                let req: CloseAuctionRequest = serde_json::from_slice(payload)?;
                self.machine
                    .close_auction(&req, Origin::Replica)
                    .await?
                    .status()
            }
        };
        Ok(status_response(status))
    }
}
