//! PAGE XML schema versions and their namespace URIs.
//!
//! Two schema revisions are supported. They differ in the namespace URI
//! written on the root element and in how polygons are encoded inside
//! `Coords` (see [`crate::coords`]).
//!
//! Version selection is deliberately lenient: [`parse_version`] never fails
//! and maps anything it does not recognise to [`SchemaVersion::V2010`], so
//! callers passing legacy or mistyped version strings keep working.

use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// Namespace prefix shared by every PAGE content schema.
pub const NAMESPACE_BASE: &str = "http://schema.primaresearch.org/PAGE/gts/pagecontent/";

/// XML Schema instance namespace, bound to the `xsi` prefix on the root.
pub const XSI_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema-instance";

/// A supported PAGE content schema revision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SchemaVersion {
    /// `2010-03-19`: polygons as `<Point x=".." y=".."/>` children. (default)
    #[default]
    #[serde(rename = "2010-03-19")]
    V2010,
    /// `2017-07-15`: polygons as a single `points="x,y x,y ..."` attribute.
    #[serde(rename = "2017-07-15")]
    V2017,
}

impl SchemaVersion {
    /// Every supported version, oldest first.
    pub const ALL: [SchemaVersion; 2] = [SchemaVersion::V2010, SchemaVersion::V2017];

    /// The version's date string as it appears in the namespace URI.
    pub fn as_str(self) -> &'static str {
        match self {
            SchemaVersion::V2010 => "2010-03-19",
            SchemaVersion::V2017 => "2017-07-15",
        }
    }

    /// Full namespace URI, e.g. `http://schema.primaresearch.org/PAGE/gts/pagecontent/2017-07-15`.
    pub fn namespace(self) -> String {
        format!("{NAMESPACE_BASE}{}", self.as_str())
    }

    /// Value of `xsi:schemaLocation`: the namespace followed by its XSD URL.
    pub fn schema_location(self) -> String {
        let ns = self.namespace();
        format!("{ns} {ns}/pagecontent.xsd")
    }
}

impl fmt::Display for SchemaVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SchemaVersion {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(parse_version(s))
    }
}

/// Resolve a caller-supplied version string.
///
/// Exact matches on `"2017-07-15"` and `"2010-03-19"` select that version;
/// every other input, including the empty string, resolves to
/// [`SchemaVersion::V2010`].
pub fn parse_version(s: &str) -> SchemaVersion {
    match s {
        "2017-07-15" => SchemaVersion::V2017,
        "2010-03-19" => SchemaVersion::V2010,
        other => {
            debug!("Unrecognised PAGE XML version '{other}', using 2010-03-19");
            SchemaVersion::V2010
        }
    }
}
