//! Shared error type across buildmeta crates.

use thiserror::Error;

/// Shared result type.
pub type Result<T> = std::result::Result<T, BuildMetaError>;

/// Unified error type used by core and server.
///
/// Every variant is a startup-time failure; request handling never produces one.
#[derive(Debug, Error)]
pub enum BuildMetaError {
    #[error("invalid config: {0}")]
    InvalidConfig(String),
    #[error("unsupported config version")]
    UnsupportedVersion,
    #[error("io: {0}")]
    Io(String),
    #[error("encode: {0}")]
    Encode(String),
}

impl From<std::io::Error> for BuildMetaError {
    fn from(e: std::io::Error) -> Self {
        BuildMetaError::Io(e.to_string())
    }
}
