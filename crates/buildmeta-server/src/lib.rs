//! buildmeta server library entry.
//!
//! Wires config, application state, and the metadata endpoint into an axum
//! router. Consumed by the binary (`main.rs`) and by integration tests.

pub mod app_state;
pub mod config;
pub mod ops;
pub mod router;

pub use app_state::AppState;
pub use router::{build_router, metadata_router};
