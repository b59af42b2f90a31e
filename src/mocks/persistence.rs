//! Mock durable key-value store.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::{AuctionError, AuctionResult};
use crate::traits::KvStore;

/// In-memory [`KvStore`] that records writes and enforces the `ready()`
/// barrier: a `put` before `ready` is reported as an error so tests catch
/// ordering mistakes.
#[derive(Clone, Default)]
pub struct MockKv {
    values: Arc<RwLock<BTreeMap<String, serde_json::Value>>>,
    puts: Arc<AtomicUsize>,
    ready: Arc<AtomicBool>,
    fail_puts: Arc<AtomicBool>,
}

impl MockKv {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get(&self, key: &str) -> Option<serde_json::Value> {
        self.values.read().await.get(key).cloned()
    }

    pub async fn keys(&self) -> Vec<String> {
        self.values.read().await.keys().cloned().collect()
    }

    /// Total number of successful writes.
    pub async fn put_count(&self) -> usize {
        self.puts.load(Ordering::SeqCst)
    }

    pub fn ready_called(&self) -> bool {
        self.ready.load(Ordering::SeqCst)
    }

    /// Make subsequent writes fail (simulated storage outage).
    pub async fn set_fail_puts(&self, fail: bool) {
        self.fail_puts.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl KvStore for MockKv {
    async fn ready(&self) -> AuctionResult<()> {
        self.ready.store(true, Ordering::SeqCst);
        Ok(())
    }

    async fn put(&self, key: &str, value: serde_json::Value) -> AuctionResult<()> {
        if !self.ready_called() {
            return Err(AuctionError::Persistence(
                "put issued before ready()".into(),
            ));
        }
        if self.fail_puts.load(Ordering::SeqCst) {
            return Err(AuctionError::Persistence("simulated write failure".into()));
        }

        self.values.write().await.insert(key.to_string(), value);
        self.puts.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
