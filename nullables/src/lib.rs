//! Nullable infrastructure for deterministic testing.
//!
//! The client's external dependencies (clock, identity provider) are
//! abstracted behind traits. This crate provides test-friendly
//! implementations that return deterministic values, can be controlled
//! programmatically, and never touch the network.
//!
//! Usage: swap real implementations for nullables in tests.

pub mod clock;
pub mod identity;

pub use clock::NullClock;
pub use identity::NullIdentity;
