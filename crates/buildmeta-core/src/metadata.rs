//! Build metadata record.
//!
//! Values are injected at compile time through environment variables read by
//! `option_env!`, e.g.
//!
//! ```text
//! BUILDMETA_VERSION=1.2.3 BUILDMETA_COMMIT_SHA=$(git rev-parse HEAD) cargo build --release
//! ```
//!
//! Anything left unset falls back to a fixed placeholder.

use std::io;

use serde::Serialize;
use serde_json::ser::{Formatter, PrettyFormatter};

use crate::error::{BuildMetaError, Result};

/// Raw compile-time values, before they are copied into a [`Metadata`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildConstants {
    pub version: &'static str,
    pub build_time: &'static str,
    pub commit_sha: &'static str,
    pub domain: &'static str,
    pub canonical_name: &'static str,
}

const fn or_placeholder(value: Option<&'static str>, placeholder: &'static str) -> &'static str {
    match value {
        Some(v) => v,
        None => placeholder,
    }
}

/// Values baked into this binary.
pub const BUILD: BuildConstants = BuildConstants {
    version: or_placeholder(option_env!("BUILDMETA_VERSION"), "latest"),
    build_time: or_placeholder(option_env!("BUILDMETA_BUILD_TIME"), "build-time"),
    commit_sha: or_placeholder(option_env!("BUILDMETA_COMMIT_SHA"), "commit-sha"),
    domain: or_placeholder(option_env!("BUILDMETA_DOMAIN"), "domain"),
    canonical_name: or_placeholder(option_env!("BUILDMETA_CANONICAL_NAME"), "canonical-name"),
};

/// Immutable snapshot served by the metadata endpoint.
///
/// Field order is the JSON key order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Metadata {
    #[serde(rename = "Version")]
    version: String,
    #[serde(rename = "BuildTime")]
    build_time: String,
    #[serde(rename = "CommitSHA")]
    commit_sha: String,
    #[serde(rename = "Domain")]
    domain: String,
    #[serde(rename = "CanonicalName")]
    canonical_name: String,
}

impl Metadata {
    pub fn new(
        version: impl Into<String>,
        build_time: impl Into<String>,
        commit_sha: impl Into<String>,
        domain: impl Into<String>,
        canonical_name: impl Into<String>,
    ) -> Self {
        Self {
            version: version.into(),
            build_time: build_time.into(),
            commit_sha: commit_sha.into(),
            domain: domain.into(),
            canonical_name: canonical_name.into(),
        }
    }

    /// Record built from the compile-time [`BUILD`] table.
    pub fn from_build() -> Self {
        Self::from(BUILD)
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn build_time(&self) -> &str {
        &self.build_time
    }

    pub fn commit_sha(&self) -> &str {
        &self.commit_sha
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    pub fn canonical_name(&self) -> &str {
        &self.canonical_name
    }

    /// Render as JSON indented with four spaces, terminated by a newline.
    ///
    /// `<`, `>`, `&`, U+2028 and U+2029 are written as `\uXXXX` escapes so the
    /// document is safe to embed in HTML.
    pub fn to_pretty_json(&self) -> Result<String> {
        let mut buf = Vec::with_capacity(192);
        let fmt = HtmlSafeFormatter::new(PrettyFormatter::with_indent(b"    "));
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, fmt);
        self.serialize(&mut ser)
            .map_err(|e| BuildMetaError::Encode(e.to_string()))?;
        buf.push(b'\n');

        String::from_utf8(buf).map_err(|e| BuildMetaError::Encode(e.to_string()))
    }
}

impl From<BuildConstants> for Metadata {
    fn from(c: BuildConstants) -> Self {
        Self::new(c.version, c.build_time, c.commit_sha, c.domain, c.canonical_name)
    }
}

impl Default for Metadata {
    fn default() -> Self {
        Self::from_build()
    }
}

/// Pretty printer that additionally escapes HTML-significant characters.
struct HtmlSafeFormatter<'a> {
    inner: PrettyFormatter<'a>,
}

impl<'a> HtmlSafeFormatter<'a> {
    fn new(inner: PrettyFormatter<'a>) -> Self {
        Self { inner }
    }
}

impl Formatter for HtmlSafeFormatter<'_> {
    fn write_string_fragment<W>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        let mut start = 0;
        for (i, c) in fragment.char_indices() {
            let escaped: &[u8] = match c {
                '<' => b"\\u003c",
                '>' => b"\\u003e",
                '&' => b"\\u0026",
                '\u{2028}' => b"\\u2028",
                '\u{2029}' => b"\\u2029",
                _ => continue,
            };
            writer.write_all(&fragment.as_bytes()[start..i])?;
            writer.write_all(escaped)?;
            start = i + c.len_utf8();
        }
        writer.write_all(&fragment.as_bytes()[start..])
    }

    fn begin_array<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.inner.begin_array(writer)
    }

    fn end_array<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.inner.end_array(writer)
    }

    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.inner.begin_array_value(writer, first)
    }

    fn end_array_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.inner.end_array_value(writer)
    }

    fn begin_object<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.inner.begin_object(writer)
    }

    fn end_object<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.inner.end_object(writer)
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.inner.begin_object_key(writer, first)
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.inner.begin_object_value(writer)
    }

    fn end_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.inner.end_object_value(writer)
    }
}
