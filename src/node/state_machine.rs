//! Open/bid/close semantics with persistence write-through and mirroring.

use tracing::{debug, info};

use crate::auction::{
    Auction, AuctionStore, BidOutcome, CloseAuctionRequest, CloseOutcome, ClosedAuction,
    OpenAuctionRequest, PlaceBidRequest, RpcMethod,
};
use crate::config::auction_key;
use crate::error::AuctionResult;
use crate::node::ReplicationBroadcaster;
use crate::traits::{KvStore, RpcClient};

/// Where a mutation entered the node.
///
/// A [`Local`](Origin::Local) mutation is mirrored to every registered peer
/// after it is applied; a [`Replica`](Origin::Replica) mutation came in over
/// RPC and is never rebroadcast. This structural split is the sole
/// loop-prevention mechanism: there are no message ids, hop counts, or
/// origin stamps on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    /// Initiated on this node (menu or any local caller).
    Local,
    /// Received from a peer over RPC.
    Replica,
}

impl Origin {
    const fn mirrors(self) -> bool {
        matches!(self, Self::Local)
    }
}

/// Applies the three auction operations to the local store, writes each
/// accepted mutation through to durable storage, and fans local mutations
/// out to peers.
///
/// The accept/reject decision and the in-memory update happen synchronously
/// under one store lock; the persistence write and the broadcast are the
/// only suspension points and run after the lock is released. A persistence
/// failure propagates without rolling back the in-memory mutation.
#[derive(Clone)]
pub struct StateMachine<R: RpcClient, P: KvStore> {
    store: AuctionStore,
    kv: P,
    broadcaster: ReplicationBroadcaster<R>,
}

impl<R: RpcClient, P: KvStore> StateMachine<R, P> {
    pub fn new(store: AuctionStore, kv: P, broadcaster: ReplicationBroadcaster<R>) -> Self {
        Self {
            store,
            kv,
            broadcaster,
        }
    }

    pub fn store(&self) -> &AuctionStore {
        &self.store
    }

    pub fn broadcaster(&self) -> &ReplicationBroadcaster<R> {
        &self.broadcaster
    }

    /// Create (or overwrite) an auction with unset bid fields.
    ///
    /// Re-opening an existing id silently resets it; open never fails
    /// validation.
    pub async fn open_auction(
        &self,
        req: &OpenAuctionRequest,
        origin: Origin,
    ) -> AuctionResult<()> {
        let record = Auction::open(
            req.auction_id.clone(),
            req.item.clone(),
            req.starting_price,
        );
        self.store.insert(record.clone()).await;
        self.persist(&record).await?;
        info!("Auction opened: {} ({})", record.auction_id, record.item);

        if origin.mirrors() {
            self.broadcaster.broadcast(RpcMethod::OpenAuction, req).await?;
        }
        Ok(())
    }

    /// Accept the bid iff the auction exists and the amount strictly exceeds
    /// the current highest bid (or no bid is set yet).
    ///
    /// The starting price is never consulted, and rejection does not reveal
    /// whether the auction was missing or the bid too low.
    pub async fn place_bid(
        &self,
        req: &PlaceBidRequest,
        origin: Origin,
    ) -> AuctionResult<BidOutcome> {
        let updated = self
            .store
            .with_record(&req.auction_id, |auction| {
                if auction.accepts_bid(req.bid_amount) {
                    auction.highest_bid = Some(req.bid_amount);
                    auction.highest_bidder = Some(req.bidder.clone());
                    Some(auction.clone())
                } else {
                    None
                }
            })
            .await
            .flatten();

        let Some(record) = updated else {
            debug!(
                "Rejected bid of {} on {} from {}",
                req.bid_amount, req.auction_id, req.bidder
            );
            return Ok(BidOutcome::Rejected);
        };

        self.persist(&record).await?;
        info!(
            "Bid placed: {} now at {} by {}",
            record.auction_id, req.bid_amount, req.bidder
        );

        if origin.mirrors() {
            self.broadcaster.broadcast(RpcMethod::PlaceBid, req).await?;
        }
        Ok(BidOutcome::Accepted)
    }

    /// Persist a closed copy of the auction and return the winning snapshot.
    ///
    /// Only the durable copy gains the `closed` flag; the in-memory record
    /// stays open, so this node keeps evaluating (and possibly accepting)
    /// later bids against it; see the closed-flag note in DESIGN.md.
    pub async fn close_auction(
        &self,
        req: &CloseAuctionRequest,
        origin: Origin,
    ) -> AuctionResult<CloseOutcome> {
        let Some(record) = self.store.get(&req.auction_id).await else {
            debug!("Close requested for unknown auction {}", req.auction_id);
            return Ok(CloseOutcome::NotFound);
        };

        let snapshot = ClosedAuction {
            auction_id: record.auction_id.clone(),
            item: record.item.clone(),
            highest_bid: record.highest_bid,
            highest_bidder: record.highest_bidder.clone(),
        };

        let mut persisted = record;
        persisted.closed = true;
        self.persist(&persisted).await?;
        info!(
            "Auction closed: {} won by {:?} at {:?}",
            snapshot.auction_id, snapshot.highest_bidder, snapshot.highest_bid
        );

        if origin.mirrors() {
            self.broadcaster
                .broadcast(RpcMethod::CloseAuction, req)
                .await?;
        }
        Ok(CloseOutcome::Closed(snapshot))
    }

    async fn persist(&self, record: &Auction) -> AuctionResult<()> {
        let value = serde_json::to_value(record)?;
        self.kv.put(&auction_key(&record.auction_id), value).await
    }
}
