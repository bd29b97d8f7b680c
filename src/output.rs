//! Writing documents to disk.
//!
//! A document for `scans/page_001.tif` lands at
//! `{output_folder}/page_001.xml`. Writes go through a temporary file in the
//! target directory followed by a rename, so a crash never leaves a
//! half-written XML file behind.

use crate::config::BuildConfig;
use crate::document::Document;
use crate::error::PageXmlError;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::info;

/// Target path for the document of `image_filename` inside `output_folder`.
///
/// Only the file name of `image_filename` is used; its last extension is
/// replaced by `.xml` (a name without extension simply gains `.xml`).
pub fn xml_output_path(image_filename: &str, output_folder: impl AsRef<Path>) -> PathBuf {
    let stem = Path::new(image_filename)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "page".to_string());
    output_folder.as_ref().join(format!("{stem}.xml"))
}

/// Serialise `document` and write it next to its siblings in `output_folder`.
///
/// Creates `output_folder` if needed. Returns the written path.
///
/// # Errors
/// [`PageXmlError::OutputWriteFailed`] carrying the attempted target path.
pub fn save_document(
    document: &Document,
    image_filename: &str,
    output_folder: impl AsRef<Path>,
    config: &BuildConfig,
) -> Result<PathBuf, PageXmlError> {
    let folder = output_folder.as_ref();
    let path = xml_output_path(image_filename, folder);
    let write_failed = |source: std::io::Error| PageXmlError::OutputWriteFailed {
        path: path.clone(),
        source,
    };

    std::fs::create_dir_all(folder).map_err(write_failed)?;

    let xml = document.to_xml_string(&config.write_options());

    let mut tmp = NamedTempFile::new_in(folder).map_err(write_failed)?;
    tmp.write_all(xml.as_bytes()).map_err(write_failed)?;
    tmp.flush().map_err(write_failed)?;
    tmp.persist(&path).map_err(|e| write_failed(e.error))?;

    info!("Wrote {} ({} bytes)", path.display(), xml.len());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::build_document;
    use crate::clock::FixedClock;
    use crate::geometry::ImageDescriptor;
    use chrono::NaiveDate;

    fn doc() -> Document {
        let clock = FixedClock(
            NaiveDate::from_ymd_opt(2020, 1, 1)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap(),
        );
        build_document(
            ImageDescriptor::new(20, 20),
            "scan.png",
            &[],
            &BuildConfig::default(),
            &clock,
        )
        .unwrap()
    }

    #[test]
    fn output_path_replaces_extension() {
        assert_eq!(
            xml_output_path("page_001.png", "/out"),
            PathBuf::from("/out/page_001.xml")
        );
        assert_eq!(
            xml_output_path("dir/sub/scan.v2.tif", "out"),
            PathBuf::from("out/scan.v2.xml")
        );
        assert_eq!(xml_output_path("noext", "out"), PathBuf::from("out/noext.xml"));
    }

    #[test]
    fn save_creates_folder_and_file() {
        let dir = tempfile::tempdir().unwrap();
        let folder = dir.path().join("nested/out");
        let path = save_document(&doc(), "scan.png", &folder, &BuildConfig::default()).unwrap();
        assert_eq!(path, folder.join("scan.xml"));
        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.starts_with("<?xml"));
        assert!(written.contains("<Created>2020-01-01T00:00:00</Created>"));

        // No temp files left behind.
        let entries = std::fs::read_dir(&folder).unwrap().count();
        assert_eq!(entries, 1);
    }

    #[test]
    fn save_overwrites_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("scan.xml"), "old").unwrap();
        let path = save_document(&doc(), "scan.png", dir.path(), &BuildConfig::default()).unwrap();
        assert_ne!(std::fs::read_to_string(path).unwrap(), "old");
    }

    #[test]
    fn save_failure_reports_target_path() {
        let dir = tempfile::tempdir().unwrap();
        // A regular file where the output folder should be.
        let blocker = dir.path().join("blocked");
        std::fs::write(&blocker, "x").unwrap();
        let err = save_document(&doc(), "scan.png", &blocker, &BuildConfig::default()).unwrap_err();
        match err {
            PageXmlError::OutputWriteFailed { path, .. } => {
                assert_eq!(path, blocker.join("scan.xml"));
            }
            other => panic!("unexpected: {other:?}"),
        }
    }
}
