//! Input collection: the single source of truth for what will be submitted.
//!
//! [`InputCollector`] owns the selected photo, the user-chosen processing
//! options, and the preview handle derived from the photo. Field updates are
//! passive: each setter just records the new value; nothing here talks to
//! the network. [`InputCollector::build_payload`] snapshots the current
//! state into the bundle the transport layer sends, and is the one place a
//! missing photo is rejected.
//!
//! ## Preview lifecycle
//!
//! Every selection derives a fresh [`PreviewReference`]: a temp-backed copy
//! of the photo addressable by a `file://` URI, suitable for handing to any
//! local viewer. The handle owns its backing directory: replacing it (or
//! dropping the collector) deletes the previous copy, so preview storage can
//! never accumulate across repeated selections.

use crate::error::StudioError;
use crate::pipeline::input;
use crate::pipeline::payload::Payload;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tracing::debug;

/// How many photos the print layout should carry.
///
/// The service lays out either a 3-up or a 6-up sheet; these are the only
/// two options it accepts, so the type admits nothing else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CopyCount {
    /// Three copies per sheet.
    Three,
    /// Six copies per sheet. (default)
    #[default]
    Six,
}

impl CopyCount {
    /// The wire representation sent in the `copies` form field.
    pub fn as_str(&self) -> &'static str {
        match self {
            CopyCount::Three => "3",
            CopyCount::Six => "6",
        }
    }
}

impl std::fmt::Display for CopyCount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// User-configurable processing options.
///
/// The background color is any string; the service is authoritative on
/// acceptable encodings, so nothing is validated client-side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessingOptions {
    pub background_color: String,
    pub copy_count: CopyCount,
}

impl Default for ProcessingOptions {
    fn default() -> Self {
        Self {
            background_color: "#ffffff".to_string(),
            copy_count: CopyCount::Six,
        }
    }
}

/// The photo chosen for submission: raw bytes plus the labels the multipart
/// part carries.
#[derive(Debug, Clone)]
pub struct SelectedPhoto {
    pub bytes: Vec<u8>,
    pub filename: String,
    /// Sniffed from the leading magic bytes; advisory only, so an unrecognised
    /// format is labelled `application/octet-stream`, never rejected.
    pub mime: &'static str,
}

impl SelectedPhoto {
    /// Wrap in-memory photo bytes, sniffing the MIME label.
    pub fn new(bytes: Vec<u8>, filename: impl Into<String>) -> Self {
        let mime = input::sniff_mime(&bytes);
        Self {
            bytes,
            filename: filename.into(),
            mime,
        }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// A locally-resolvable handle to a preview copy of the selected photo.
///
/// The backing file lives in a private temp directory owned by the handle;
/// dropping the handle deletes it. Never sent to the service.
#[derive(Debug)]
pub struct PreviewReference {
    path: PathBuf,
    _temp_dir: TempDir,
}

impl PreviewReference {
    fn derive(photo: &SelectedPhoto) -> Result<Self, StudioError> {
        let temp_dir = TempDir::new()
            .map_err(|e| StudioError::Internal(format!("preview tempdir: {e}")))?;

        // Only the final path component; the filename may echo whatever
        // the caller passed in.
        let name = Path::new(&photo.filename)
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "photo".to_string());

        let path = temp_dir.path().join(name);
        std::fs::write(&path, &photo.bytes)
            .map_err(|e| StudioError::Internal(format!("preview write: {e}")))?;

        debug!("Derived preview: {}", path.display());
        Ok(Self {
            path,
            _temp_dir: temp_dir,
        })
    }

    /// Filesystem path of the preview copy.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// `file://` URI for viewers that want one.
    pub fn uri(&self) -> String {
        format!("file://{}", self.path.display())
    }
}

/// Collects the photo and options a submission will carry.
#[derive(Debug, Default)]
pub struct InputCollector {
    photo: Option<SelectedPhoto>,
    options: ProcessingOptions,
    preview: Option<PreviewReference>,
}

impl InputCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select a photo, replacing any previous selection.
    ///
    /// Derives a fresh [`PreviewReference`]; the previous preview's backing
    /// file is deleted as its handle is replaced.
    pub fn select_photo(&mut self, photo: SelectedPhoto) -> Result<&PreviewReference, StudioError> {
        let preview = PreviewReference::derive(&photo)?;
        debug!(
            "Selected photo '{}' ({} bytes, {})",
            photo.filename,
            photo.len(),
            photo.mime
        );
        self.photo = Some(photo);
        Ok(&*self.preview.insert(preview))
    }

    /// Read a photo from disk and select it.
    pub fn select_photo_from_path(
        &mut self,
        path: impl AsRef<Path>,
    ) -> Result<&PreviewReference, StudioError> {
        let photo = input::resolve_photo(path.as_ref())?;
        self.select_photo(photo)
    }

    /// Set the background color. Any string is accepted verbatim; the
    /// service decides what encodings it understands.
    pub fn set_background_color(&mut self, color: impl Into<String>) {
        self.options.background_color = color.into();
    }

    pub fn set_copy_count(&mut self, count: CopyCount) {
        self.options.copy_count = count;
    }

    pub fn options(&self) -> &ProcessingOptions {
        &self.options
    }

    pub fn photo(&self) -> Option<&SelectedPhoto> {
        self.photo.as_ref()
    }

    pub fn has_photo(&self) -> bool {
        self.photo.is_some()
    }

    /// Preview handle for the current selection, if any.
    pub fn preview(&self) -> Option<&PreviewReference> {
        self.preview.as_ref()
    }

    /// Snapshot the current state into a submission payload.
    ///
    /// # Errors
    /// [`StudioError::NoPhotoSelected`] when no photo has been selected.
    /// This is the only validation this workflow performs.
    pub fn build_payload(&self) -> Result<Payload, StudioError> {
        let photo = self.photo.as_ref().ok_or(StudioError::NoPhotoSelected)?;
        Ok(Payload {
            photo: photo.clone(),
            bg_color: self.options.background_color.clone(),
            copies: self.options.copy_count,
        })
    }
}
