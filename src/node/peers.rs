//! Runtime membership: the connected peers a node replicates to.

use std::collections::BTreeMap;
use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::keys::PeerKey;

type PeerMap = Arc<Mutex<BTreeMap<String, PeerKey>>>;

/// Clonable handle over the display-name → RPC-key map.
///
/// Entries exist only while the underlying connection is alive; nothing here
/// is persisted. Names are short hex prefixes, so two peers with a shared
/// prefix overwrite one entry (accepted, see `config::PEER_NAME_LEN`).
///
/// A `BTreeMap` keyed by name makes broadcast fan-out order deterministic.
#[derive(Clone, Default)]
pub struct PeerRegistry {
    peers: PeerMap,
}

impl PeerRegistry {
    pub fn new() -> Self {
        Self {
            peers: Arc::new(Mutex::new(BTreeMap::new())),
        }
    }

    /// Insert or overwrite the entry for `name`.
    pub async fn register(&self, name: &str, key: PeerKey) {
        let previous = self.peers.lock().await.insert(name.to_string(), key);
        if previous.is_some() {
            debug!("Peer {name} re-registered, replacing previous RPC key");
        } else {
            info!("Registered peer {name}");
        }
    }

    /// Drop the entry for `name`, if present.
    pub async fn remove(&self, name: &str) {
        if self.peers.lock().await.remove(name).is_some() {
            info!("Removed peer {name}");
        }
    }

    /// Snapshot of all peers in name order.
    pub async fn all(&self) -> Vec<(String, PeerKey)> {
        self.peers
            .lock()
            .await
            .iter()
            .map(|(name, key)| (name.clone(), key.clone()))
            .collect()
    }

    pub async fn len(&self) -> usize {
        self.peers.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.peers.lock().await.is_empty()
    }
}
