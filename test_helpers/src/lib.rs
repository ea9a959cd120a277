//! Test helpers shared across crates in the workspace.
//!
//! [`capture`] records `tracing` events emitted while a closure runs, so tests
//! can assert on the warnings the binder logs. [`figment`] wraps
//! `figment::Jail` for tests that gather configuration from files and
//! environment variables.

pub mod capture;
pub mod figment;
