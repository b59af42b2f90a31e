//! Auction domain types: records, typed requests, and the in-memory store.

pub mod record;
pub mod requests;
pub mod store;

pub use record::Auction;
pub use requests::{
    status_response, BidOutcome, CloseAuctionRequest, CloseOutcome, ClosedAuction,
    OpenAuctionRequest, PlaceBidRequest, RpcMethod, OPEN_STATUS,
};
pub use store::AuctionStore;
