//! Top-level facade crate for buildmeta.
//!
//! Re-exports the core record types and the server library so users can depend on a single crate.

pub mod core {
    pub use buildmeta_core::*;
}

pub mod server {
    pub use buildmeta_server::*;
}
