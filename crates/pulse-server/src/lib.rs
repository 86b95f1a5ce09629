//! pulse-server library entry.
//!
//! This crate wires the counted root endpoint, the diagnostics mount, the
//! once-per-second RPS reporter, and the shutdown coordinator into a small
//! serving stack. It is intended to be consumed by the binary (`main.rs`)
//! and by integration tests.

pub mod app_state;
pub mod config;
pub mod diag;
pub mod ops;
pub mod reporter;
pub mod router;
pub mod shutdown;
