//! Configuration types for PAGE XML generation.
//!
//! Everything that shapes a generated document, apart from the image, its
//! file name and the rectangles, lives in [`BuildConfig`], built via its
//! [`BuildConfigBuilder`]. The default configuration reproduces the classic
//! output: schema 2010-03-19, creator `User123`, XML declaration, compact
//! layout, sequential ImageRegion ids.

use crate::error::PageXmlError;
use crate::schema::{parse_version, SchemaVersion};
use crate::xml::{is_xml_char, WriteOptions};
use serde::{Deserialize, Serialize};

/// Creator written into `Metadata/Creator` unless overridden.
pub const DEFAULT_CREATOR: &str = "User123";

/// Largest accepted indent width.
pub const MAX_INDENT: usize = 16;

/// Configuration for building and writing PAGE XML documents.
///
/// # Example
/// ```rust
/// use pagexml_baseline::{BuildConfig, RegionIdPolicy, SchemaVersion};
///
/// let config = BuildConfig::builder()
///     .version_str("2017-07-15")
///     .indent(2)
///     .region_ids(RegionIdPolicy::Legacy)
///     .build()
///     .unwrap();
/// assert_eq!(config.version, SchemaVersion::V2017);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildConfig {
    /// Schema revision for namespace and polygon encoding. Default: 2010-03-19.
    pub version: SchemaVersion,

    /// Text of `Metadata/Creator`. Default: `User123`.
    pub creator: String,

    /// How ImageRegions are labelled. Default: [`RegionIdPolicy::Sequential`].
    pub region_ids: RegionIdPolicy,

    /// Emit `<?xml version="1.0" encoding="UTF-8" standalone="no"?>`. Default: true.
    pub xml_declaration: bool,

    /// Pretty-print with this many spaces per level; `None` writes a single
    /// line. Default: `None`.
    pub indent: Option<usize>,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            version: SchemaVersion::default(),
            creator: DEFAULT_CREATOR.to_string(),
            region_ids: RegionIdPolicy::default(),
            xml_declaration: true,
            indent: None,
        }
    }
}

impl BuildConfig {
    /// Create a new builder for `BuildConfig`.
    pub fn builder() -> BuildConfigBuilder {
        BuildConfigBuilder {
            config: Self::default(),
        }
    }

    /// Writer options derived from this configuration.
    pub fn write_options(&self) -> WriteOptions {
        WriteOptions {
            xml_declaration: self.xml_declaration,
            indent: self.indent,
        }
    }

    /// Check that a document can be produced from this configuration.
    ///
    /// Used by [`BuildConfigBuilder::build`] and again by the document
    /// builder, since the fields are public and may be changed after
    /// construction.
    pub fn validate(&self) -> Result<(), PageXmlError> {
        if self.creator.trim().is_empty() {
            return Err(PageXmlError::InvalidConfig("creator must not be empty".into()));
        }
        if let Some(c) = self.creator.chars().find(|c| !is_xml_char(*c)) {
            return Err(PageXmlError::InvalidConfig(format!(
                "creator contains U+{:04X}, which is not allowed in XML",
                c as u32
            )));
        }
        if let Some(n) = self.indent {
            if n > MAX_INDENT {
                return Err(PageXmlError::InvalidConfig(format!(
                    "indent must be 0–{MAX_INDENT}, got {n}"
                )));
            }
        }
        Ok(())
    }
}

/// Builder for [`BuildConfig`].
#[derive(Debug)]
pub struct BuildConfigBuilder {
    config: BuildConfig,
}

impl BuildConfigBuilder {
    pub fn version(mut self, version: SchemaVersion) -> Self {
        self.config.version = version;
        self
    }

    /// Set the version from a raw string; unknown strings select 2010-03-19.
    pub fn version_str(mut self, version: &str) -> Self {
        self.config.version = parse_version(version);
        self
    }

    pub fn creator(mut self, creator: impl Into<String>) -> Self {
        self.config.creator = creator.into();
        self
    }

    pub fn region_ids(mut self, policy: RegionIdPolicy) -> Self {
        self.config.region_ids = policy;
        self
    }

    pub fn xml_declaration(mut self, v: bool) -> Self {
        self.config.xml_declaration = v;
        self
    }

    pub fn indent(mut self, width: usize) -> Self {
        self.config.indent = Some(width);
        self
    }

    pub fn compact(mut self) -> Self {
        self.config.indent = None;
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<BuildConfig, PageXmlError> {
        self.config.validate()?;
        Ok(self.config)
    }
}

// ── Enums ────────────────────────────────────────────────────────────────

/// How region ids are assigned.
///
/// | Policy | TextRegion id | ImageRegion ids |
/// |--------|---------------|-----------------|
/// | `Sequential` | `r0` | `r1`, `r2`, … in input order |
/// | `Legacy` | last computed id (`r0` with no rectangles, else `rN`) | none |
///
/// `Legacy` reproduces documents written by older tooling, where each
/// rectangle's id overwrote the text region's id instead of labelling the
/// new image region. Use it only when a downstream consumer depends on that
/// shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegionIdPolicy {
    /// Unique sequential ids on every region. (default)
    #[default]
    Sequential,
    /// Unlabelled ImageRegions; TextRegion id overwritten per rectangle.
    Legacy,
}
