//! The replication core: state machine, peer registry, broadcaster, and the
//! coordinator that wires them to the transport collaborators.

pub mod broadcast;
pub mod coordinator;
pub mod peers;
pub mod state_machine;

pub use broadcast::ReplicationBroadcaster;
pub use coordinator::Coordinator;
pub use peers::PeerRegistry;
pub use state_machine::{Origin, StateMachine};
