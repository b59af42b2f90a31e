//! In-memory auction state, the single source of truth a node consults.

use std::collections::BTreeMap;
use std::sync::Arc;

use tokio::sync::Mutex;

use crate::auction::Auction;

type AuctionMap = Arc<Mutex<BTreeMap<String, Auction>>>;

/// Clonable handle over the node's auction map.
///
/// All mutations happen under a single lock acquisition and never hold the
/// lock across an await point, so an operation's accept/reject decision and
/// its record update cannot interleave with another operation's.
///
/// A `BTreeMap` keeps iteration (and therefore catch-up order) deterministic.
#[derive(Clone, Default)]
pub struct AuctionStore {
    auctions: AuctionMap,
}

impl AuctionStore {
    pub fn new() -> Self {
        Self {
            auctions: Arc::new(Mutex::new(BTreeMap::new())),
        }
    }

    /// Insert or overwrite a record. Overwriting is deliberate: re-opening an
    /// id resets its bid state.
    pub async fn insert(&self, auction: Auction) {
        self.auctions
            .lock()
            .await
            .insert(auction.auction_id.clone(), auction);
    }

    pub async fn get(&self, auction_id: &str) -> Option<Auction> {
        self.auctions.lock().await.get(auction_id).cloned()
    }

    /// Run `f` against the record for `auction_id` under the lock, returning
    /// its result, or `None` if the auction does not exist. The closure runs
    /// synchronously; decision and mutation cannot be interleaved.
    pub async fn with_record<R>(
        &self,
        auction_id: &str,
        f: impl FnOnce(&mut Auction) -> R,
    ) -> Option<R> {
        let mut auctions = self.auctions.lock().await;
        auctions.get_mut(auction_id).map(f)
    }

    /// Snapshot of every record, in id order.
    pub async fn all(&self) -> Vec<Auction> {
        self.auctions.lock().await.values().cloned().collect()
    }

    pub async fn len(&self) -> usize {
        self.auctions.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.auctions.lock().await.is_empty()
    }
}
