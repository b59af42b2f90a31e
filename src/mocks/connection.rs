//! Mock raw connection.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::{AuctionError, AuctionResult};
use crate::traits::Connection;

/// Records every frame written to it; can simulate a dropped handshake.
#[derive(Clone, Default)]
pub struct MockConnection {
    frames: Arc<RwLock<Vec<Vec<u8>>>>,
    fail_writes: Arc<AtomicBool>,
}

impl MockConnection {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn written(&self) -> Vec<Vec<u8>> {
        self.frames.read().await.clone()
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl Connection for MockConnection {
    async fn write(&self, payload: Vec<u8>) -> AuctionResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(AuctionError::Rpc("simulated connection failure".into()));
        }
        self.frames.write().await.push(payload);
        Ok(())
    }
}
