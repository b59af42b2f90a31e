//! The auction record and its persisted layout.

use serde::{Deserialize, Serialize};

/// A single auction as tracked by one node.
///
/// The persisted JSON layout is
/// `{auctionId, item, startingPrice, highestBid, highestBidder, closed?}`:
/// bid fields serialize as `null` until the first accepted bid, `closed` is
/// omitted unless true.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Auction {
    pub auction_id: String,

    pub item: String,

    /// Seller-declared floor. Recorded and replicated, but never compared
    /// against incoming bids: the first bid is accepted at any amount. This
    /// matches the reference behavior.
    pub starting_price: u64,

    pub highest_bid: Option<u64>,

    pub highest_bidder: Option<String>,

    /// Set only on the persisted copy written by a close operation; the
    /// in-memory record is never flagged (reference behavior, see DESIGN.md).
    #[serde(default, skip_serializing_if = "is_false")]
    pub closed: bool,
}

#[allow(clippy::trivially_copy_pass_by_ref)]
fn is_false(v: &bool) -> bool {
    !*v
}

impl Auction {
    /// A freshly opened auction: no bids, not closed.
    pub fn open(auction_id: String, item: String, starting_price: u64) -> Self {
        Self {
            auction_id,
            item,
            starting_price,
            highest_bid: None,
            highest_bidder: None,
            closed: false,
        }
    }

    /// Whether `amount` would become the new highest bid.
    ///
    /// Strictly-greater comparison; the first bid always qualifies.
    pub fn accepts_bid(&self, amount: u64) -> bool {
        match self.highest_bid {
            None => true,
            Some(current) => amount > current,
        }
    }
}
