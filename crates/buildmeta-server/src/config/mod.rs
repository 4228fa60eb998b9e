//! Server config loader (strict parsing).

pub mod schema;

use std::fs;
use std::path::Path;

use buildmeta_core::error::{BuildMetaError, Result};

pub use schema::{MetadataOverrides, ServerConfig, ServerSection};

/// Config path used when `BUILDMETA_CONFIG` is not set.
pub const DEFAULT_CONFIG_PATH: &str = "buildmeta.yaml";

pub fn load_from_file(path: &str) -> Result<ServerConfig> {
    let s = fs::read_to_string(path)
        .map_err(|e| BuildMetaError::Io(format!("read config failed ({path}): {e}")))?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<ServerConfig> {
    let cfg: ServerConfig = serde_yaml::from_str(s)
        .map_err(|e| BuildMetaError::InvalidConfig(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}

/// Resolve the config named by `BUILDMETA_CONFIG`.
///
/// An explicit path must exist; only the implicit `DEFAULT_CONFIG_PATH` may be
/// absent, in which case the built-in defaults are used.
pub fn load(env_path: Option<String>) -> Result<ServerConfig> {
    match env_path {
        Some(path) => load_from_file(&path),
        None => load_or_default(DEFAULT_CONFIG_PATH),
    }
}

/// Load `path` if it exists, otherwise fall back to the built-in defaults.
pub fn load_or_default(path: &str) -> Result<ServerConfig> {
    if Path::new(path).exists() {
        load_from_file(path)
    } else {
        tracing::info!(%path, "config file not found, using defaults");
        Ok(ServerConfig::default())
    }
}
