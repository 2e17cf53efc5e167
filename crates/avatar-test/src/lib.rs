//! Avatar Test Harness - simulation and end-to-end scenarios
//!
//! This crate provides:
//! - Deterministic frame simulation with seeded jitter and stalls
//! - End-to-end user scenarios (generate, emote, pause, export)

pub mod scenarios;
pub mod simulator;

pub use scenarios::*;
pub use simulator::*;
