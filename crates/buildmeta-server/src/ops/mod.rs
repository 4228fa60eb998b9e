//! Operational HTTP endpoints.
//!
//! - `/metadata` : build metadata (version, build time, commit, domain, name)

pub mod metadata;

pub use metadata::{metadata_endpoint, METADATA_HANDLER_PATH};
