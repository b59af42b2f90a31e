//! Leaderless peer-to-peer auction node.
//!
//! Any node can open an auction, accept bids, and close an auction; every
//! locally accepted mutation is opportunistically mirrored to all known
//! peers, and newly connected peers receive a one-time catch-up of known
//! auctions. Consistency is best-effort: nodes apply mutations
//! independently and may diverge under partial connectivity.
//!
//! Transport, discovery, RPC serving, durable storage, and the interactive
//! menu are external collaborators plugged in through the traits in
//! [`traits`].

pub mod auction;
pub mod config;
pub mod error;
pub mod keys;
pub mod node;
pub mod traits;

#[cfg(any(test, feature = "test-support"))]
pub mod mocks;

pub use auction::{
    Auction, AuctionStore, BidOutcome, CloseAuctionRequest, CloseOutcome, ClosedAuction,
    OpenAuctionRequest, PlaceBidRequest, RpcMethod,
};
pub use error::{AuctionError, AuctionResult};
pub use keys::PeerKey;
pub use node::{Coordinator, Origin, PeerRegistry, ReplicationBroadcaster, StateMachine};
pub use traits::{Connection, KvStore, RpcClient, RpcHandler};
