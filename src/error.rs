//! Error types for the pagexml-baseline library.
//!
//! Two distinct error types reflect two distinct failure modes:
//!
//! * [`PageXmlError`] — **Fatal**: the call cannot proceed at all (the build
//!   configuration cannot produce a well-formed tree, the output file cannot
//!   be written, every image in a batch failed). Returned as
//!   `Err(PageXmlError)` from the top-level functions.
//!
//! * [`ItemError`] — **Non-fatal**: a single image of a batch failed (missing
//!   file, undecodable header, unwritable target) while the others are fine.
//!   Stored inside [`crate::batch::ItemResult`] so callers can inspect partial
//!   success.

use std::path::PathBuf;
use thiserror::Error;

/// All fatal errors returned by the pagexml-baseline library.
#[derive(Debug, Error)]
pub enum PageXmlError {
    // ── Build errors ──────────────────────────────────────────────────────
    /// The document tree could not be initialised from the given configuration.
    ///
    /// No partial document is ever returned alongside this error.
    #[error("Failed to initialise PAGE XML document: {reason}")]
    Build { reason: String },

    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Input errors ──────────────────────────────────────────────────────
    /// Image file was not found at the given path.
    #[error("Image file not found: '{path}'\nCheck the path exists and is readable.")]
    ImageNotFound { path: PathBuf },

    /// The file exists but its header could not be decoded as an image.
    #[error("Cannot read image dimensions from '{path}': {detail}")]
    ImageUnreadable { path: PathBuf, detail: String },

    /// A rectangle specification could not be parsed.
    #[error("Invalid region '{input}': {reason}\nExpected x,y,width,height (e.g. 10,5,20,8).")]
    InvalidRegion { input: String, reason: String },

    // ── I/O errors ────────────────────────────────────────────────────────
    /// Could not create or write the output XML file.
    #[error("Failed to write output file '{path}': {source}")]
    OutputWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Every image of a batch failed; nothing was written.
    #[error("All {total} images failed.\nFirst error: {first_error}")]
    AllImagesFailed { total: usize, first_error: String },
}

/// A non-fatal error for a single image of a batch.
#[derive(Debug, Clone, Error, serde::Serialize, serde::Deserialize)]
pub enum ItemError {
    /// The image could not be opened or its dimensions read.
    #[error("{image}: cannot load image: {detail}")]
    LoadFailed { image: PathBuf, detail: String },

    /// The document could not be built.
    #[error("{image}: build failed: {detail}")]
    BuildFailed { image: PathBuf, detail: String },

    /// The document was built but could not be written.
    #[error("{image}: cannot write '{target}': {detail}")]
    WriteFailed {
        image: PathBuf,
        target: PathBuf,
        detail: String,
    },

    /// An earlier image of the same batch already wrote `target`.
    #[error("{image}: '{target}' was already written for '{claimed_by}'")]
    OutputCollision {
        image: PathBuf,
        target: PathBuf,
        claimed_by: PathBuf,
    },
}

impl ItemError {
    /// Classify a fatal error raised while processing one batch item.
    pub(crate) fn from_fatal(image: PathBuf, err: PageXmlError) -> Self {
        match err {
            PageXmlError::ImageNotFound { .. } | PageXmlError::ImageUnreadable { .. } => {
                ItemError::LoadFailed {
                    image,
                    detail: err.to_string(),
                }
            }
            PageXmlError::OutputWriteFailed { path, source } => ItemError::WriteFailed {
                image,
                target: path,
                detail: source.to_string(),
            },
            other => ItemError::BuildFailed {
                image,
                detail: other.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_write_failed_names_target_path() {
        let e = PageXmlError::OutputWriteFailed {
            path: PathBuf::from("/out/page_001.xml"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        let msg = e.to_string();
        assert!(msg.contains("/out/page_001.xml"), "got: {msg}");
        assert!(msg.contains("denied"), "got: {msg}");
    }

    #[test]
    fn build_error_display() {
        let e = PageXmlError::Build {
            reason: "creator is empty".into(),
        };
        assert!(e.to_string().contains("creator is empty"));
    }

    #[test]
    fn all_images_failed_display() {
        let e = PageXmlError::AllImagesFailed {
            total: 3,
            first_error: "scan.png: cannot load image".into(),
        };
        let msg = e.to_string();
        assert!(msg.contains("All 3 images"), "got: {msg}");
        assert!(msg.contains("scan.png"), "got: {msg}");
    }

    #[test]
    fn write_failure_becomes_item_write_error() {
        let fatal = PageXmlError::OutputWriteFailed {
            path: PathBuf::from("out/a.xml"),
            source: std::io::Error::other("disk full"),
        };
        match ItemError::from_fatal(PathBuf::from("a.png"), fatal) {
            ItemError::WriteFailed { target, detail, .. } => {
                assert_eq!(target, PathBuf::from("out/a.xml"));
                assert!(detail.contains("disk full"));
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn collision_names_both_images() {
        let e = ItemError::OutputCollision {
            image: PathBuf::from("b/p.png"),
            target: PathBuf::from("out/p.xml"),
            claimed_by: PathBuf::from("a/p.png"),
        };
        let msg = e.to_string();
        assert!(msg.starts_with("b/p.png"), "got: {msg}");
        assert!(msg.contains("out/p.xml"), "got: {msg}");
        assert!(msg.contains("a/p.png"), "got: {msg}");
    }

    #[test]
    fn missing_image_becomes_item_load_error() {
        let fatal = PageXmlError::ImageNotFound {
            path: PathBuf::from("gone.png"),
        };
        let item = ItemError::from_fatal(PathBuf::from("gone.png"), fatal);
        assert!(matches!(item, ItemError::LoadFailed { .. }));
        assert!(item.to_string().starts_with("gone.png"));
    }
}
