//! Shared application state for the buildmeta server.
//!
//! Everything here is resolved once at startup and read-only afterwards. The
//! response body is pre-rendered so request handling never touches serde.

use std::sync::Arc;

use buildmeta_core::error::Result;
use buildmeta_core::Metadata;
use bytes::Bytes;

use crate::config::ServerConfig;

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    cfg: ServerConfig,
    metadata: Metadata,
    body: Bytes,
}

impl AppState {
    /// Resolve the served record from the compile-time values with the
    /// config's per-field overrides applied, and render its body.
    pub fn new(cfg: ServerConfig) -> Result<Self> {
        Self::with_metadata(cfg, Metadata::from_build())
    }

    /// Build state around an explicit base record. Config overrides still apply.
    pub fn with_metadata(cfg: ServerConfig, base: Metadata) -> Result<Self> {
        cfg.validate()?;

        let metadata = cfg.metadata.apply(base);
        let body = Bytes::from(metadata.to_pretty_json()?);

        Ok(Self {
            inner: Arc::new(AppStateInner { cfg, metadata, body }),
        })
    }

    /// Default config (path `/metadata`), serving `metadata` as given.
    pub fn from_metadata(metadata: &Metadata) -> Result<Self> {
        Self::with_metadata(ServerConfig::default(), metadata.clone())
    }

    pub fn cfg(&self) -> &ServerConfig {
        &self.inner.cfg
    }

    pub fn metadata(&self) -> &Metadata {
        &self.inner.metadata
    }

    /// Pre-rendered JSON document (refcounted, cheap to clone).
    pub fn body(&self) -> Bytes {
        self.inner.body.clone()
    }
}
