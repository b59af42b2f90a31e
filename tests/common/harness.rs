//! Multi-node test harness.
//!
//! Simulates an N-node swarm: each node is a real [`Coordinator`] backed by
//! a [`MockKv`], and all nodes share one [`RpcRouter`] so a broadcast from
//! one node runs the others' inbound dispatch exactly as a remote peer
//! would.

use std::sync::Arc;

use auction_swarm::mocks::{make_test_peer_key, MockConnection, MockKv, RpcRouter};
use auction_swarm::{Coordinator, PeerKey, RpcHandler};

/// One node of the simulated swarm.
pub struct NodeContext {
    pub key: PeerKey,
    pub coordinator: Arc<Coordinator<RpcRouter, MockKv>>,
    pub kv: MockKv,
}

impl NodeContext {
    /// The display name this node is registered under on its peers.
    pub fn name(&self) -> String {
        self.key.display_name()
    }
}

/// N coordinators joined through a shared in-memory router.
pub struct SwarmHarness {
    pub router: RpcRouter,
    nodes: Vec<NodeContext>,
}

impl SwarmHarness {
    /// Create `n` started nodes, registered on the router but not yet
    /// connected to each other.
    pub async fn new(n: usize) -> Self {
        init_test_logging();

        let router = RpcRouter::new();
        let mut nodes = Vec::with_capacity(n);

        for i in 0..n {
            let key = make_test_peer_key(i as u8 + 1);
            let kv = MockKv::new();
            let coordinator = Arc::new(
                Coordinator::start(key.clone(), router.clone(), kv.clone())
                    .await
                    .expect("coordinator start"),
            );
            let handler: Arc<dyn RpcHandler> = coordinator.clone();
            router.register(key.clone(), handler).await;
            nodes.push(NodeContext {
                key,
                coordinator,
                kv,
            });
        }

        Self { router, nodes }
    }

    pub fn node(&self, i: usize) -> &NodeContext {
        &self.nodes[i]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Simulate the full connection sequence between nodes `a` and `b`:
    /// both sides observe the connection, write their handshake frame, and
    /// deliver it to the other side's data handler (registering the peer
    /// and triggering catch-up).
    pub async fn connect(&self, a: usize, b: usize) {
        let (node_a, node_b) = (&self.nodes[a], &self.nodes[b]);

        let conn_a = MockConnection::new();
        let conn_b = MockConnection::new();

        // Each side derives the other's name from the transport key and
        // writes its own RPC key as the first frame.
        let name_of_b = node_a
            .coordinator
            .on_connection_open(node_b.key.as_bytes(), &conn_a)
            .await
            .expect("handshake write");
        let name_of_a = node_b
            .coordinator
            .on_connection_open(node_a.key.as_bytes(), &conn_b)
            .await
            .expect("handshake write");

        // Deliver the handshake frames.
        for frame in conn_a.written().await {
            node_b
                .coordinator
                .on_peer_data(&name_of_a, &frame)
                .await
                .expect("peer data");
        }
        for frame in conn_b.written().await {
            node_a
                .coordinator
                .on_peer_data(&name_of_b, &frame)
                .await
                .expect("peer data");
        }
    }

    /// Fully connect every pair of nodes.
    pub async fn connect_all(&self) {
        for a in 0..self.nodes.len() {
            for b in (a + 1)..self.nodes.len() {
                self.connect(a, b).await;
            }
        }
    }

    /// Sever `a`'s view of `b`: the connection errors out and the peer
    /// entry is dropped.
    pub async fn disconnect(&self, a: usize, b: usize) {
        let name_of_b = self.nodes[b].name();
        self.nodes[a]
            .coordinator
            .on_connection_error(&name_of_b)
            .await;
    }
}

fn init_test_logging() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
    let _ = tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_test_writer())
        .try_init();
}
