//! SRE practice app core: response payloads, error types, and the
//! random-source seam.
//!
//! This crate defines the JSON contracts and error surface shared by the
//! server and its tests. It intentionally carries no transport or runtime
//! dependencies so payload logic can be exercised without an HTTP stack.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! All fallible paths must surface as `SreError`/`Result`.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod protocol;
pub mod random;

/// Shared result type.
pub use error::{Result, SreError};
pub use random::{RandomSource, ScriptedRandom, ThreadRandom};
