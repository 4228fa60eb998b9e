//! buildmeta core: the build metadata record, its compile-time defaults, and
//! the shared error type.
//!
//! This crate carries no transport or runtime dependencies so the record can be
//! rendered by the server, by tests, or by any other tooling that wants the same
//! JSON document.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! All fallible paths surface as `BuildMetaError`/`Result`.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod metadata;

/// Shared result type.
pub use error::{BuildMetaError, Result};
pub use metadata::{BuildConstants, Metadata, BUILD};
