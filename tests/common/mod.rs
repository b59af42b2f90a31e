pub mod harness;

pub use harness::SwarmHarness;
