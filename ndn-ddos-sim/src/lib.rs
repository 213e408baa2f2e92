//! In-memory demo harness for `ndn-ddos-strategy`: fixtures implementing the strategy's
//! collaborator traits, and an async driver loop that feeds it a stream of events.
//!
//! This crate is simulation plumbing only (§1 "out of scope" — face I/O, the wire codec, the
//! simulator event loop) — none of the mitigation logic lives here.

pub mod driver;
pub mod fixtures;

pub use driver::{SimEvent, run};
pub use fixtures::{FaceRegistry, InMemoryFib, InMemoryPit};
