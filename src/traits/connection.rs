//! Raw connection abstraction for the handshake frame.

use async_trait::async_trait;

use crate::error::AuctionResult;

/// Write side of a newly established swarm connection.
///
/// The coordinator uses this exactly once per connection, to send its RPC
/// public key as the first raw frame. There is no acknowledgement and no
/// retry; if the frame is lost the remote end never registers us.
#[async_trait]
pub trait Connection: Send + Sync {
    async fn write(&self, payload: Vec<u8>) -> AuctionResult<()>;
}
