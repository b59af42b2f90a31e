//! Request/response RPC abstraction.

use async_trait::async_trait;

use crate::auction::RpcMethod;
use crate::error::AuctionResult;
use crate::keys::PeerKey;

/// Outbound side of the RPC collaborator: serialize a `(method, payload)`
/// pair to a remote node and resolve its response or failure.
///
/// Timeout and retry behavior belong to the implementation; the core issues
/// one request per call and treats any error as a failed delivery.
#[async_trait]
pub trait RpcClient: Send + Sync + Clone {
    /// Send `payload` to the node listening on `peer` and await its response
    /// body.
    async fn request(
        &self,
        peer: &PeerKey,
        method: RpcMethod,
        payload: Vec<u8>,
    ) -> AuctionResult<Vec<u8>>;
}

/// Inbound side: the RPC-serving collaborator hands every received request
/// to this hook and writes back whatever it returns.
///
/// The [`Coordinator`](crate::node::Coordinator) implements this; errors
/// (including unknown method names) propagate to the server's own error
/// boundary rather than becoming status payloads.
#[async_trait]
pub trait RpcHandler: Send + Sync {
    async fn handle_request(&self, method: &str, payload: &[u8]) -> AuctionResult<Vec<u8>>;
}
