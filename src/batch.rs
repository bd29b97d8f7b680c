//! Batch driver: one document per image file.
//!
//! ```text
//! image path ──▶ dimensions ──▶ build ──▶ save
//!               (header only)  (core)    (atomic write)
//! ```
//!
//! Images are processed one after another. A failing image is recorded in
//! its [`ItemResult`] and the batch moves on; only a batch where nothing at
//! all was written is an error.
//!
//! Output names come from the file stem alone, so `p.png` and `p.bmp` share
//! `p.xml`. The first image to write a path keeps it; later ones fail with
//! [`ItemError::OutputCollision`] and leave the file untouched.

use crate::builder::build_document;
use crate::clock::Clock;
use crate::config::BuildConfig;
use crate::error::{ItemError, PageXmlError};
use crate::geometry::{ImageDescriptor, Rectangle};
use crate::output::{save_document, xml_output_path};
use crate::progress::ProgressCallback;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{info, warn};

/// Outcome for one input image.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemResult {
    pub image: PathBuf,
    /// Written XML path, when successful.
    pub output: Option<PathBuf>,
    /// Number of regions in the document (text region included).
    pub regions: usize,
    pub error: Option<ItemError>,
}

/// Aggregate counters for a batch.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BatchStats {
    pub total: usize,
    pub written: usize,
    pub failed: usize,
    pub duration_ms: u64,
}

/// Everything a batch produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchReport {
    pub items: Vec<ItemResult>,
    pub stats: BatchStats,
}

/// Generate and write a document for every image in `images`.
///
/// The same `regions` are applied to every image. Each document's
/// `imageFilename` is the image's file name without directories.
///
/// # Errors
/// [`PageXmlError::AllImagesFailed`] when no document could be written.
/// An empty `images` slice yields an empty report.
pub fn process_images(
    images: &[PathBuf],
    regions: &[Rectangle],
    output_folder: &Path,
    config: &BuildConfig,
    clock: &dyn Clock,
    progress: Option<&ProgressCallback>,
) -> Result<BatchReport, PageXmlError> {
    let start = Instant::now();
    let total = images.len();
    if let Some(cb) = progress {
        cb.on_batch_start(total);
    }

    let mut items = Vec::with_capacity(total);
    // target path -> image that wrote it
    let mut claimed: HashMap<PathBuf, PathBuf> = HashMap::new();
    for (i, image) in images.iter().enumerate() {
        let index = i + 1;
        if let Some(cb) = progress {
            cb.on_image_start(index, total, image);
        }

        let item = match process_one(image, regions, output_folder, config, clock, &claimed) {
            Ok((output, count)) => {
                claimed.insert(output.clone(), image.clone());
                if let Some(cb) = progress {
                    cb.on_image_complete(index, total, &output);
                }
                ItemResult {
                    image: image.clone(),
                    output: Some(output),
                    regions: count,
                    error: None,
                }
            }
            Err(err) => {
                warn!("Skipping {}: {}", image.display(), err);
                if let Some(cb) = progress {
                    cb.on_image_error(index, total, &err.to_string());
                }
                ItemResult {
                    image: image.clone(),
                    output: None,
                    regions: 0,
                    error: Some(err),
                }
            }
        };
        items.push(item);
    }

    let written = items.iter().filter(|it| it.error.is_none()).count();
    let failed = total - written;

    if let Some(cb) = progress {
        cb.on_batch_complete(total, written);
    }

    if total > 0 && written == 0 {
        let first_error = items
            .iter()
            .find_map(|it| it.error.as_ref())
            .map(|e| e.to_string())
            .unwrap_or_else(|| "Unknown error".to_string());
        return Err(PageXmlError::AllImagesFailed { total, first_error });
    }

    let stats = BatchStats {
        total,
        written,
        failed,
        duration_ms: start.elapsed().as_millis() as u64,
    };
    info!(
        "Batch complete: {}/{} documents written, {}ms",
        written, total, stats.duration_ms
    );

    Ok(BatchReport { items, stats })
}

fn process_one(
    image: &Path,
    regions: &[Rectangle],
    output_folder: &Path,
    config: &BuildConfig,
    clock: &dyn Clock,
    claimed: &HashMap<PathBuf, PathBuf>,
) -> Result<(PathBuf, usize), ItemError> {
    let label = image
        .file_name()
        .map(|n| n.to_string_lossy())
        .unwrap_or_else(|| image.to_string_lossy());

    let target = xml_output_path(&label, output_folder);
    if let Some(first) = claimed.get(&target) {
        return Err(ItemError::OutputCollision {
            image: image.to_path_buf(),
            target,
            claimed_by: first.clone(),
        });
    }

    let fatal = |e: PageXmlError| ItemError::from_fatal(image.to_path_buf(), e);
    let descriptor = ImageDescriptor::from_path(image).map_err(fatal)?;
    let document = build_document(descriptor, &label, regions, config, clock).map_err(fatal)?;
    let output = save_document(&document, &label, output_folder, config).map_err(fatal)?;
    Ok((output, document.page.regions.len()))
}
