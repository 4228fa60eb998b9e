//! Axum router wiring.
//!
//! Exposes the metadata document at the configured path (`/metadata` by default).

use axum::{routing::any, Router};
use buildmeta_core::error::Result;
use buildmeta_core::Metadata;

use crate::{app_state::AppState, ops};

pub fn build_router(state: AppState) -> Router {
    let path = state.cfg().server.path.clone();

    Router::new()
        .route(&path, any(ops::metadata_endpoint))
        .with_state(state)
}

/// Router serving `metadata` at the default path.
pub fn metadata_router(metadata: &Metadata) -> Result<Router> {
    Ok(build_router(AppState::from_metadata(metadata)?))
}
