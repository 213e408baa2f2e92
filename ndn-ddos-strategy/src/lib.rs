//! Forwarding-plane strategy for detecting and mitigating Interest-flooding attacks on a Named
//! Data Networking router, through cooperative hop-by-hop NACK pushback and per-face rate
//! limiting. Registered under the stable strategy name `/localhost/nfd/strategy/ddos`.
//!
//! This crate is sans-IO: it owns per-prefix mitigation state and the three entry points a
//! forwarder's event loop drives ([`Strategy::handle_interest`], [`Strategy::handle_nack`],
//! [`Strategy::handle_deadline_reached`]), and returns [`Command`]s describing what to send or
//! forward rather than performing any I/O itself. The PIT, FIB, and face layer are consumed
//! through the [`collaborators`] traits; a host forwarder (or `ndn-ddos-sim`'s in-memory
//! fixtures, for testing) implements them.

mod clock;
mod collaborators;
mod command;
mod config;
mod errors;
mod face;
mod interest;
mod interest_handler;
mod metrics;
mod nack;
mod nack_handler;
mod nack_id;
mod name;
mod pushback;
mod rate_limiter;
mod record;
mod record_store;
mod state_machine;
mod strategy;

pub const STRATEGY_NAME: &str = "/localhost/nfd/strategy/ddos";

pub use clock::RevertTimer;
pub use collaborators::{Faces, Fib, Pit, PitEntry};
pub use command::Command;
pub use config::StrategyConfig;
pub use errors::DdosError;
pub use face::FaceId;
pub use interest::Interest;
pub use metrics::StrategyMetrics;
pub use nack::{Nack, NackId, NackReason};
pub use nack_id::NackIdGenerator;
pub use name::Name;
pub use record::{Flavour, FlavourState, PrefixRecord, RouterRole};
pub use strategy::{State, Strategy};

#[cfg(feature = "proptest")]
pub mod proptest_support;
