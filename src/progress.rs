//! Progress-callback trait for per-image batch events.
//!
//! Pass an [`Arc<dyn BatchProgressCallback>`] to
//! [`crate::batch::process_images`] to receive events as each image is
//! processed. The CLI uses it to drive its progress bar; library callers can
//! forward events wherever they like.
//!
//! # Example
//!
//! ```rust
//! use pagexml_baseline::BatchProgressCallback;
//! use std::path::Path;
//! use std::sync::atomic::{AtomicUsize, Ordering};
//!
//! struct Counter(AtomicUsize);
//!
//! impl BatchProgressCallback for Counter {
//!     fn on_image_complete(&self, index: usize, total: usize, output: &Path) {
//!         self.0.fetch_add(1, Ordering::SeqCst);
//!         eprintln!("{}/{} → {}", index, total, output.display());
//!     }
//! }
//! ```

use std::path::Path;
use std::sync::Arc;

/// Called by the batch driver as it processes each image.
///
/// All methods default to no-ops so implementors only override what they
/// need. `index` is 1-based.
pub trait BatchProgressCallback: Send + Sync {
    /// Called once before the first image.
    fn on_batch_start(&self, total: usize) {
        let _ = total;
    }

    /// Called before an image's dimensions are read.
    fn on_image_start(&self, index: usize, total: usize, image: &Path) {
        let _ = (index, total, image);
    }

    /// Called after an image's document has been written.
    fn on_image_complete(&self, index: usize, total: usize, output: &Path) {
        let _ = (index, total, output);
    }

    /// Called when an image fails to load, build or write.
    fn on_image_error(&self, index: usize, total: usize, error: &str) {
        let _ = (index, total, error);
    }

    /// Called once after every image has been attempted.
    fn on_batch_complete(&self, total: usize, written: usize) {
        let _ = (total, written);
    }
}

/// A no-op implementation, used when no callback is supplied.
pub struct NoopProgressCallback;

impl BatchProgressCallback for NoopProgressCallback {}

/// Convenience alias for a shared callback.
pub type ProgressCallback = Arc<dyn BatchProgressCallback>;
