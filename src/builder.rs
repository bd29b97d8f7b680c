//! Document construction: one full-page text region plus one image region
//! per caller-supplied rectangle.
//!
//! The builder is pure apart from a single read of the injected [`Clock`].
//! It never touches the file system; see [`crate::output`] for writing.

use crate::clock::{format_timestamp, Clock, SystemClock};
use crate::config::{BuildConfig, RegionIdPolicy};
use crate::document::{Document, Metadata, Page, Region, RegionKind};
use crate::error::PageXmlError;
use crate::geometry::{ImageDescriptor, Polygon, Rectangle};
use crate::schema::parse_version;
use crate::xml::is_xml_char;
use tracing::debug;

/// Build a document with the default configuration and the system clock.
///
/// `version` is resolved leniently: anything other than `"2017-07-15"`
/// produces a 2010-03-19 document.
///
/// # Example
/// ```rust
/// use pagexml_baseline::{build, ImageDescriptor, Rectangle};
///
/// let doc = build(
///     ImageDescriptor::new(100, 50),
///     "scan_0001.png",
///     "2017-07-15",
///     &[Rectangle::new(10, 5, 20, 8)],
/// )
/// .unwrap();
/// assert_eq!(doc.page.regions.len(), 2);
/// ```
pub fn build(
    image: ImageDescriptor,
    image_filename: &str,
    version: &str,
    regions: &[Rectangle],
) -> Result<Document, PageXmlError> {
    let config = BuildConfig {
        version: parse_version(version),
        ..BuildConfig::default()
    };
    build_document(image, image_filename, regions, &config, &SystemClock)
}

/// Build a document with an explicit configuration and time source.
///
/// # Errors
/// [`PageXmlError::Build`] when `config` or `image_filename` cannot yield a
/// well-formed tree (e.g. an empty creator, a control character in the file
/// name). No partial document is returned.
pub fn build_document(
    image: ImageDescriptor,
    image_filename: &str,
    regions: &[Rectangle],
    config: &BuildConfig,
    clock: &dyn Clock,
) -> Result<Document, PageXmlError> {
    config.validate().map_err(|e| PageXmlError::Build {
        reason: match e {
            PageXmlError::InvalidConfig(msg) => msg,
            other => other.to_string(),
        },
    })?;
    if let Some(c) = image_filename.chars().find(|c| !is_xml_char(*c)) {
        return Err(PageXmlError::Build {
            reason: format!(
                "image filename contains U+{:04X}, which is not allowed in XML",
                c as u32
            ),
        });
    }

    // One reading for both fields.
    let timestamp = format_timestamp(clock.now());
    let metadata = Metadata {
        creator: config.creator.clone(),
        created: timestamp.clone(),
        last_change: timestamp,
    };

    let mut text_region = Region {
        kind: RegionKind::TextRegion,
        region_type: Some("paragraph".to_string()),
        id: Some(region_id(0)),
        polygon: Polygon::page_inset(image),
    };

    let mut image_regions = Vec::with_capacity(regions.len());
    for (i, rect) in regions.iter().enumerate() {
        let id = region_id(i + 1);
        let id = match config.region_ids {
            RegionIdPolicy::Sequential => Some(id),
            RegionIdPolicy::Legacy => {
                text_region.id = Some(id);
                None
            }
        };
        image_regions.push(Region {
            kind: RegionKind::ImageRegion,
            region_type: None,
            id,
            polygon: Polygon::from(*rect),
        });
    }

    let mut all_regions = Vec::with_capacity(image_regions.len() + 1);
    all_regions.push(text_region);
    all_regions.extend(image_regions);

    debug!(
        "Built {} document for '{}' ({}x{}, {} image regions)",
        config.version,
        image_filename,
        image.width,
        image.height,
        regions.len()
    );

    Ok(Document {
        version: config.version,
        metadata,
        page: Page {
            image_filename: image_filename.to_string(),
            image_width: image.width,
            image_height: image.height,
            regions: all_regions,
        },
    })
}

fn region_id(index: usize) -> String {
    format!("r{index}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::geometry::Point;
    use crate::schema::SchemaVersion;
    use chrono::NaiveDate;

    fn clock() -> FixedClock {
        FixedClock(
            NaiveDate::from_ymd_opt(2023, 11, 30)
                .unwrap()
                .and_hms_opt(23, 59, 58)
                .unwrap(),
        )
    }

    fn config(policy: RegionIdPolicy) -> BuildConfig {
        BuildConfig::builder().region_ids(policy).build().unwrap()
    }

    fn rects() -> Vec<Rectangle> {
        vec![Rectangle::new(10, 5, 20, 8), Rectangle::new(0, 0, 4, 4)]
    }

    #[test]
    fn text_region_only_without_rectangles() {
        let doc = build_document(
            ImageDescriptor::new(100, 50),
            "a.png",
            &[],
            &BuildConfig::default(),
            &clock(),
        )
        .unwrap();
        assert_eq!(doc.page.regions.len(), 1);
        let text = &doc.page.regions[0];
        assert_eq!(text.kind, RegionKind::TextRegion);
        assert_eq!(text.id.as_deref(), Some("r0"));
        assert_eq!(text.region_type.as_deref(), Some("paragraph"));
        assert_eq!(text.polygon.0[1], Point::new(98, 1));
    }

    #[test]
    fn metadata_uses_one_clock_reading() {
        let doc = build_document(
            ImageDescriptor::new(10, 10),
            "a.png",
            &[],
            &BuildConfig::default(),
            &clock(),
        )
        .unwrap();
        assert_eq!(doc.metadata.creator, "User123");
        assert_eq!(doc.metadata.created, "2023-11-30T23:59:58");
        assert_eq!(doc.metadata.created, doc.metadata.last_change);
    }

    #[test]
    fn sequential_ids() {
        let doc = build_document(
            ImageDescriptor::new(100, 50),
            "a.png",
            &rects(),
            &config(RegionIdPolicy::Sequential),
            &clock(),
        )
        .unwrap();
        let ids: Vec<Option<&str>> = doc.page.regions.iter().map(|r| r.id.as_deref()).collect();
        assert_eq!(ids, vec![Some("r0"), Some("r1"), Some("r2")]);
    }

    #[test]
    fn legacy_ids_overwrite_text_region() {
        let doc = build_document(
            ImageDescriptor::new(100, 50),
            "a.png",
            &rects(),
            &config(RegionIdPolicy::Legacy),
            &clock(),
        )
        .unwrap();
        let ids: Vec<Option<&str>> = doc.page.regions.iter().map(|r| r.id.as_deref()).collect();
        assert_eq!(ids, vec![Some("r2"), None, None]);
    }

    #[test]
    fn legacy_ids_without_rectangles_keep_r0() {
        let doc = build_document(
            ImageDescriptor::new(100, 50),
            "a.png",
            &[],
            &config(RegionIdPolicy::Legacy),
            &clock(),
        )
        .unwrap();
        assert_eq!(doc.page.regions[0].id.as_deref(), Some("r0"));
    }

    #[test]
    fn image_regions_follow_input_order() {
        let doc = build_document(
            ImageDescriptor::new(100, 50),
            "a.png",
            &rects(),
            &BuildConfig::default(),
            &clock(),
        )
        .unwrap();
        let polys: Vec<Polygon> = doc.image_regions().map(|r| r.polygon).collect();
        assert_eq!(
            polys,
            vec![
                Polygon::from(Rectangle::new(10, 5, 20, 8)),
                Polygon::from(Rectangle::new(0, 0, 4, 4))
            ]
        );
    }

    #[test]
    fn invalid_config_is_a_build_error() {
        let mut cfg = BuildConfig::default();
        cfg.creator = String::new();
        let err = build_document(ImageDescriptor::new(10, 10), "a.png", &[], &cfg, &clock())
            .unwrap_err();
        match err {
            PageXmlError::Build { reason } => assert!(reason.contains("creator")),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn control_character_in_filename_is_a_build_error() {
        let err = build(ImageDescriptor::new(10, 10), "a\u{1}b.png", "2010-03-19", &[])
            .unwrap_err();
        match err {
            PageXmlError::Build { reason } => assert!(reason.contains("U+0001"), "got: {reason}"),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn unusual_but_legal_filenames_pass() {
        let doc = build(ImageDescriptor::new(10, 10), "a&b <é>\t.png", "2017-07-15", &[]).unwrap();
        assert_eq!(doc.page.image_filename, "a&b <é>\t.png");
    }

    #[test]
    fn build_resolves_version_string() {
        let doc = build(ImageDescriptor::new(10, 10), "a.png", "bogus", &[]).unwrap();
        assert_eq!(doc.version, SchemaVersion::V2010);
        let doc = build(ImageDescriptor::new(10, 10), "a.png", "2017-07-15", &[]).unwrap();
        assert_eq!(doc.version, SchemaVersion::V2017);
    }
}
