//! Trait abstractions for the external collaborators.
//!
//! The discovery/transport swarm, the request/response RPC layer, and the
//! durable key-value engine are supplied from outside this crate. These
//! traits are the narrow seams they plug into, and they make the core
//! testable without a network or a disk.

pub mod connection;
pub mod persistence;
pub mod rpc;

pub use connection::Connection;
pub use persistence::KvStore;
pub use rpc::{RpcClient, RpcHandler};
