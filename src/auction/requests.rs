//! Typed RPC requests and operation outcomes.
//!
//! Requests cross the wire as UTF-8 JSON with camelCase fields. The `parse`
//! constructors are the ingress boundary for free-text input: numeric fields
//! are parsed to `u64` here, so a non-numeric amount fails the operation
//! instead of reaching the comparison logic as text.

use serde::{Deserialize, Serialize};

use crate::error::{AuctionError, AuctionResult};

/// The three replicated RPC methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RpcMethod {
    OpenAuction,
    PlaceBid,
    CloseAuction,
}

impl RpcMethod {
    /// Wire name of the method.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::OpenAuction => "openAuction",
            Self::PlaceBid => "placeBid",
            Self::CloseAuction => "closeAuction",
        }
    }

    /// Reverse lookup for inbound dispatch.
    pub fn from_str(name: &str) -> Option<Self> {
        match name {
            "openAuction" => Some(Self::OpenAuction),
            "placeBid" => Some(Self::PlaceBid),
            "closeAuction" => Some(Self::CloseAuction),
            _ => None,
        }
    }
}

impl std::fmt::Display for RpcMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Request body for `openAuction`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenAuctionRequest {
    pub auction_id: String,
    pub item: String,
    pub starting_price: u64,
}

impl OpenAuctionRequest {
    /// Build a request from free-text menu input, parsing the price.
    pub fn parse(auction_id: &str, item: &str, starting_price: &str) -> AuctionResult<Self> {
        Ok(Self {
            auction_id: auction_id.to_string(),
            item: item.to_string(),
            starting_price: parse_amount("starting price", starting_price)?,
        })
    }
}

/// Request body for `placeBid`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceBidRequest {
    pub auction_id: String,
    pub bid_amount: u64,
    pub bidder: String,
}

impl PlaceBidRequest {
    /// Build a request from free-text menu input, parsing the amount.
    pub fn parse(auction_id: &str, bid_amount: &str, bidder: &str) -> AuctionResult<Self> {
        Ok(Self {
            auction_id: auction_id.to_string(),
            bid_amount: parse_amount("bid amount", bid_amount)?,
            bidder: bidder.to_string(),
        })
    }
}

/// Request body for `closeAuction`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CloseAuctionRequest {
    pub auction_id: String,
}

impl CloseAuctionRequest {
    pub fn new(auction_id: &str) -> Self {
        Self {
            auction_id: auction_id.to_string(),
        }
    }
}

fn parse_amount(field: &str, text: &str) -> AuctionResult<u64> {
    text.trim()
        .parse()
        .map_err(|_| AuctionError::InvalidInput(format!("{field} must be a number, got {text:?}")))
}

/// Outcome of a `placeBid` operation.
///
/// Rejection is deliberately one variant: the reference protocol does not
/// distinguish "bid too low" from "auction not found".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BidOutcome {
    Accepted,
    Rejected,
}

impl BidOutcome {
    /// Wire status string.
    pub const fn status(self) -> &'static str {
        match self {
            Self::Accepted => "bid placed",
            Self::Rejected => "bid too low or auction not found",
        }
    }
}

/// Snapshot returned by a successful close: the winning state at close time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClosedAuction {
    pub auction_id: String,
    pub item: String,
    pub highest_bid: Option<u64>,
    pub highest_bidder: Option<String>,
}

/// Outcome of a `closeAuction` operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CloseOutcome {
    Closed(ClosedAuction),
    NotFound,
}

impl CloseOutcome {
    /// Wire status string.
    pub const fn status(&self) -> &'static str {
        match self {
            Self::Closed(_) => "auction closed",
            Self::NotFound => "auction not found",
        }
    }
}

/// Wire status for a successful open; open never fails validation.
pub const OPEN_STATUS: &str = "auction opened";

/// Build the `{"status": ...}` response body every method answers with.
pub fn status_response(status: &str) -> Vec<u8> {
    serde_json::json!({ "status": status }).to_string().into_bytes()
}
