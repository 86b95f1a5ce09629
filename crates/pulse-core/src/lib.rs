//! pulse core: the request-accounting primitive and shared error surface.
//!
//! This crate defines the counter contract shared by the serving crate and
//! its tests. It intentionally carries no transport or runtime dependencies
//! so independent instances can be exercised without an HTTP stack.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! All fallible paths must surface as `PulseError`/`Result`.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod counter;
pub mod error;

pub use counter::RequestCounter;
pub use error::{PulseError, Result};
