use std::net::SocketAddr;

use buildmeta_core::error::{BuildMetaError, Result};
use buildmeta_core::Metadata;
use serde::Deserialize;

use crate::ops::METADATA_HANDLER_PATH;

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    pub version: u32,

    #[serde(default)]
    pub server: ServerSection,

    #[serde(default)]
    pub metadata: MetadataOverrides,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            version: 1,
            server: ServerSection::default(),
            metadata: MetadataOverrides::default(),
        }
    }
}

impl ServerConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(BuildMetaError::UnsupportedVersion);
        }

        self.server.validate()?;
        self.metadata.validate()?;

        Ok(())
    }

    pub fn listen_addr(&self) -> Result<SocketAddr> {
        self.server.listen.parse().map_err(|e| {
            BuildMetaError::InvalidConfig(format!(
                "server.listen must be a valid SocketAddr ({}): {e}",
                self.server.listen
            ))
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerSection {
    #[serde(default = "default_listen")]
    pub listen: String,

    #[serde(default = "default_path")]
    pub path: String,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            path: default_path(),
        }
    }
}

impl ServerSection {
    pub fn validate(&self) -> Result<()> {
        if self.listen.parse::<SocketAddr>().is_err() {
            return Err(BuildMetaError::InvalidConfig(
                "server.listen must be a valid SocketAddr".into(),
            ));
        }
        if !self.path.starts_with('/') {
            return Err(BuildMetaError::InvalidConfig(
                "server.path must start with '/'".into(),
            ));
        }
        // literal paths only; ':' and '*' would turn into router captures
        if self
            .path
            .chars()
            .any(|c| c.is_whitespace() || c == ':' || c == '*')
        {
            return Err(BuildMetaError::InvalidConfig(
                "server.path must not contain whitespace, ':' or '*'".into(),
            ));
        }
        Ok(())
    }
}

fn default_listen() -> String {
    "0.0.0.0:8080".into()
}
fn default_path() -> String {
    METADATA_HANDLER_PATH.into()
}

/// Deployment-time replacements for individual build values.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MetadataOverrides {
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub build_time: Option<String>,
    #[serde(default)]
    pub commit_sha: Option<String>,
    #[serde(default)]
    pub domain: Option<String>,
    #[serde(default)]
    pub canonical_name: Option<String>,
}

impl MetadataOverrides {
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("version", &self.version),
            ("build_time", &self.build_time),
            ("commit_sha", &self.commit_sha),
            ("domain", &self.domain),
            ("canonical_name", &self.canonical_name),
        ];
        for (name, value) in fields {
            if value.as_deref().is_some_and(|v| v.trim().is_empty()) {
                return Err(BuildMetaError::InvalidConfig(format!(
                    "metadata.{name} must not be empty"
                )));
            }
        }
        Ok(())
    }

    /// Replace every field of `base` that has an override.
    pub fn apply(&self, base: Metadata) -> Metadata {
        Metadata::new(
            pick(&self.version, base.version()),
            pick(&self.build_time, base.build_time()),
            pick(&self.commit_sha, base.commit_sha()),
            pick(&self.domain, base.domain()),
            pick(&self.canonical_name, base.canonical_name()),
        )
    }
}

fn pick(value: &Option<String>, base: &str) -> String {
    value.as_deref().unwrap_or(base).to_owned()
}
