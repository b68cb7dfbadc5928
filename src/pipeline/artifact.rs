//! Artifact materialisation: response bytes → a downloadable archive handle.
//!
//! The service replies with the archive as an opaque body; this stage parks
//! it in a private temp directory under the canonical filename and hands
//! back a [`ResultReference`]. The handle owns the temp directory, so the
//! backing file lives exactly as long as the handle: when a later
//! submission succeeds and the old reference is dropped, its storage goes
//! with it. Callers that want to keep the archive copy it out with
//! [`ResultReference::persist_to`].

use crate::error::StudioError;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tracing::{debug, info};

/// A locally-resolvable handle to the result archive.
#[derive(Debug)]
pub struct ResultReference {
    path: PathBuf,
    len: usize,
    _temp_dir: TempDir,
}

impl ResultReference {
    /// Filesystem path of the materialised archive.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// `file://` URI for handing to anything that opens links.
    pub fn uri(&self) -> String {
        format!("file://{}", self.path.display())
    }

    /// The archive filename (e.g. `processed_photos.zip`).
    pub fn filename(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// Size of the archive in bytes.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Read the archive back into memory.
    pub fn read(&self) -> Result<Vec<u8>, StudioError> {
        std::fs::read(&self.path).map_err(|e| StudioError::UnusableResult {
            reason: format!("archive read: {e}"),
        })
    }

    /// Copy the archive to a caller-chosen destination.
    ///
    /// Uses write-to-temp-then-rename so a crash mid-copy never leaves a
    /// truncated file at `dest`. Returns the number of bytes written.
    pub async fn persist_to(&self, dest: impl AsRef<Path>) -> Result<u64, StudioError> {
        let dest = dest.as_ref();

        if let Some(parent) = dest.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await.map_err(|e| {
                    StudioError::OutputWriteFailed {
                        path: dest.to_path_buf(),
                        source: e,
                    }
                })?;
            }
        }

        let tmp_path = dest.with_extension("zip.tmp");
        let written = tokio::fs::copy(&self.path, &tmp_path).await.map_err(|e| {
            StudioError::OutputWriteFailed {
                path: dest.to_path_buf(),
                source: e,
            }
        })?;

        tokio::fs::rename(&tmp_path, dest).await.map_err(|e| {
            StudioError::OutputWriteFailed {
                path: dest.to_path_buf(),
                source: e,
            }
        })?;

        info!("Archive saved to {}", dest.display());
        Ok(written)
    }
}

/// Park the response body in a temp directory as a named archive file.
pub fn materialize(bytes: &[u8], archive_name: &str) -> Result<ResultReference, StudioError> {
    let temp_dir = TempDir::new().map_err(|e| StudioError::UnusableResult {
        reason: format!("archive tempdir: {e}"),
    })?;

    let path = temp_dir.path().join(archive_name);
    std::fs::write(&path, bytes).map_err(|e| StudioError::UnusableResult {
        reason: format!("archive write: {e}"),
    })?;

    debug!("Materialised archive: {} ({} bytes)", path.display(), bytes.len());
    Ok(ResultReference {
        path,
        len: bytes.len(),
        _temp_dir: temp_dir,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_ARCHIVE_NAME;

    #[test]
    fn materialize_round_trips_bytes_exactly() {
        let body: Vec<u8> = (0..200u16).map(|b| (b % 251) as u8).collect();
        let result = materialize(&body, DEFAULT_ARCHIVE_NAME).unwrap();

        assert_eq!(result.len(), 200);
        assert_eq!(result.filename(), "processed_photos.zip");
        assert_eq!(result.read().unwrap(), body);
        assert!(result.uri().ends_with("processed_photos.zip"));
    }

    #[test]
    fn dropping_reference_releases_backing_file() {
        let path = {
            let result = materialize(b"PK\x03\x04", DEFAULT_ARCHIVE_NAME).unwrap();
            result.path().to_path_buf()
        };
        assert!(!path.exists());
    }

    #[test]
    fn superseding_reference_releases_predecessor() {
        let first = materialize(b"old archive", DEFAULT_ARCHIVE_NAME).unwrap();
        let old_path = first.path().to_path_buf();

        let second = materialize(b"new archive", DEFAULT_ARCHIVE_NAME).unwrap();
        drop(first);

        assert!(!old_path.exists(), "superseded archive must be released");
        assert!(second.path().exists());
    }

    #[tokio::test]
    async fn persist_to_copies_archive() {
        let result = materialize(b"PK\x03\x04archive-bytes", DEFAULT_ARCHIVE_NAME).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("out").join("mine.zip");

        let written = result.persist_to(&dest).await.unwrap();
        assert_eq!(written, 17);
        assert_eq!(std::fs::read(&dest).unwrap(), b"PK\x03\x04archive-bytes");
        // No stray temp file left behind.
        assert!(!dest.with_extension("zip.tmp").exists());
    }

    #[tokio::test]
    async fn persist_to_overwrites_existing_file() {
        let result = materialize(b"fresh", DEFAULT_ARCHIVE_NAME).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("mine.zip");
        std::fs::write(&dest, b"stale content").unwrap();

        result.persist_to(&dest).await.unwrap();
        assert_eq!(std::fs::read(&dest).unwrap(), b"fresh");
    }
}
