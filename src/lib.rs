//! # pagexml-baseline
//!
//! Generate baseline PAGE XML layout documents for scanned page images.
//!
//! When no real layout analysis has run, downstream document-analysis tools
//! still expect a PAGE file next to every image. This crate writes the
//! simplest valid one: a single `paragraph` text region covering the page
//! (inset by one pixel) plus one image region per rectangle the caller
//! already knows about. Nothing is computed from pixel content.
//!
//! ## Pipeline Overview
//!
//! ```text
//! image
//!  │
//!  ├─ 1. Probe   read width/height from the image header
//!  ├─ 2. Build   PcGts → Metadata + Page → TextRegion r0 + ImageRegion r1..rN
//!  ├─ 3. Encode  polygons as Point children (2010-03-19) or points="" (2017-07-15)
//!  └─ 4. Write   {output}/{stem}.xml via temp file + rename
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use pagexml_baseline::{build, ImageDescriptor, Rectangle, WriteOptions};
//!
//! let doc = build(
//!     ImageDescriptor::new(100, 50),
//!     "scan_0001.png",
//!     "2017-07-15",
//!     &[Rectangle::new(10, 5, 20, 8)],
//! )?;
//! let xml = doc.to_xml_string(&WriteOptions::default());
//! assert!(xml.contains(r#"<Coords points="10,5 30,5 30,13 10,13"/>"#));
//! # Ok::<(), pagexml_baseline::PageXmlError>(())
//! ```
//!
//! For reproducible output, pass a [`FixedClock`] to [`build_document`].
//!
//! ## Schema Versions
//!
//! | Version | Polygon encoding |
//! |---------|------------------|
//! | `2010-03-19` (default) | `<Coords><Point x=".." y=".."/>×4</Coords>` |
//! | `2017-07-15` | `<Coords points="x,y x,y x,y x,y"/>` |
//!
//! Unrecognised version strings are treated as `2010-03-19`.
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `pagexml` binary (clap + anyhow + indicatif + tracing-subscriber) |

// ── Modules ──────────────────────────────────────────────────────────────

pub mod batch;
pub mod builder;
pub mod clock;
pub mod config;
pub mod coords;
pub mod document;
pub mod error;
pub mod geometry;
pub mod output;
pub mod progress;
pub mod schema;
pub mod xml;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use batch::{process_images, BatchReport, BatchStats, ItemResult};
pub use builder::{build, build_document};
pub use clock::{format_timestamp, Clock, FixedClock, SystemClock, TIMESTAMP_FORMAT};
pub use config::{BuildConfig, BuildConfigBuilder, RegionIdPolicy, DEFAULT_CREATOR};
pub use coords::{encode_coords, format_points};
pub use document::{Document, Metadata, Page, Region, RegionKind};
pub use error::{ItemError, PageXmlError};
pub use geometry::{load_regions, ImageDescriptor, Point, Polygon, Rectangle};
pub use output::{save_document, xml_output_path};
pub use progress::{BatchProgressCallback, NoopProgressCallback, ProgressCallback};
pub use schema::{parse_version, SchemaVersion};
pub use xml::{Element, Node, WriteOptions};
