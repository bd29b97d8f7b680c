//! Typed PAGE document model and its XML tree rendering.
//!
//! [`Document`] is what the builder returns. It keeps the structure as plain
//! data so callers can inspect regions and metadata directly;
//! [`Document::to_tree`] turns it into the `PcGts` element tree, delegating
//! every polygon to [`crate::coords::encode_coords`].

use crate::coords::encode_coords;
use crate::geometry::Polygon;
use crate::schema::{SchemaVersion, XSI_NAMESPACE};
use crate::xml::{Element, WriteOptions};
use serde::{Deserialize, Serialize};

/// A complete PAGE document for one image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Resolved schema version; never an unrecognised caller string.
    pub version: SchemaVersion,
    pub metadata: Metadata,
    pub page: Page,
}

/// `Metadata` element contents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    pub creator: String,
    /// Formatted `%Y-%m-%dT%H:%M:%S`.
    pub created: String,
    /// Same instant as `created`.
    pub last_change: String,
}

/// `Page` element contents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    pub image_filename: String,
    pub image_width: u32,
    pub image_height: u32,
    /// Text region first, then image regions in input order.
    pub regions: Vec<Region>,
}

/// The element kind of a region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RegionKind {
    TextRegion,
    ImageRegion,
}

impl RegionKind {
    pub fn element_name(self) -> &'static str {
        match self {
            RegionKind::TextRegion => "TextRegion",
            RegionKind::ImageRegion => "ImageRegion",
        }
    }
}

/// One layout region.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    pub kind: RegionKind,
    /// Value of the `type` attribute (`paragraph` for the text region).
    pub region_type: Option<String>,
    pub id: Option<String>,
    pub polygon: Polygon,
}

impl Region {
    fn to_element(&self, version: SchemaVersion) -> Element {
        let mut el = Element::new(self.kind.element_name());
        if let Some(ref t) = self.region_type {
            el.set_attr("type", t.as_str());
        }
        if let Some(ref id) = self.id {
            el.set_attr("id", id.as_str());
        }
        el.with_child(encode_coords(version, &self.polygon))
    }
}

impl Document {
    /// Namespace URI of the resolved version.
    pub fn namespace(&self) -> String {
        self.version.namespace()
    }

    /// The text region (always the first region).
    pub fn text_region(&self) -> Option<&Region> {
        self.page
            .regions
            .iter()
            .find(|r| r.kind == RegionKind::TextRegion)
    }

    /// Image regions in input order.
    pub fn image_regions(&self) -> impl Iterator<Item = &Region> {
        self.page
            .regions
            .iter()
            .filter(|r| r.kind == RegionKind::ImageRegion)
    }

    /// Render the `PcGts` element tree.
    pub fn to_tree(&self) -> Element {
        let metadata = Element::new("Metadata")
            .with_child(Element::new("Creator").with_text(self.metadata.creator.as_str()))
            .with_child(Element::new("Created").with_text(self.metadata.created.as_str()))
            .with_child(Element::new("LastChange").with_text(self.metadata.last_change.as_str()));

        let page = self.page.regions.iter().fold(
            Element::new("Page")
                .with_attr("imageFilename", self.page.image_filename.as_str())
                .with_attr("imageWidth", self.page.image_width.to_string())
                .with_attr("imageHeight", self.page.image_height.to_string()),
            |page, region| page.with_child(region.to_element(self.version)),
        );

        Element::new("PcGts")
            .with_attr("xmlns", self.version.namespace())
            .with_attr("xmlns:xsi", XSI_NAMESPACE)
            .with_attr("xsi:schemaLocation", self.version.schema_location())
            .with_child(metadata)
            .with_child(page)
    }

    /// Serialise the document.
    pub fn to_xml_string(&self, opts: &WriteOptions) -> String {
        self.to_tree().to_xml_string(opts)
    }
}
