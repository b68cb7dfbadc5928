//! Input resolution: read a user-supplied photo path into memory.
//!
//! The service accepts the photo as an opaque binary part, so nothing here
//! inspects image content. The only checks are the ambient filesystem ones
//! (does the file exist, can we read it); a file of any format is accepted.
//! The magic-byte sniff exists purely to label the multipart part with a
//! sensible `Content-Type`; unrecognised formats fall back to
//! `application/octet-stream` and are submitted anyway.

use crate::collector::SelectedPhoto;
use crate::error::StudioError;
use std::path::Path;
use tracing::debug;

/// Read the photo at `path` into a [`SelectedPhoto`].
///
/// # Errors
/// [`StudioError::PhotoNotFound`] / [`StudioError::PermissionDenied`] for the
/// usual filesystem failures.
pub fn resolve_photo(path: &Path) -> Result<SelectedPhoto, StudioError> {
    if !path.exists() {
        return Err(StudioError::PhotoNotFound {
            path: path.to_path_buf(),
        });
    }

    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::PermissionDenied => {
            return Err(StudioError::PermissionDenied {
                path: path.to_path_buf(),
            });
        }
        Err(_) => {
            return Err(StudioError::PhotoNotFound {
                path: path.to_path_buf(),
            });
        }
    };

    let filename = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "photo".to_string());

    let photo = SelectedPhoto::new(bytes, filename);
    debug!(
        "Resolved photo: {} ({} bytes, {})",
        path.display(),
        photo.len(),
        photo.mime
    );
    Ok(photo)
}

/// Guess a MIME label from leading magic bytes.
///
/// Advisory only: the label decorates the multipart part, it never gates
/// submission.
pub fn sniff_mime(bytes: &[u8]) -> &'static str {
    if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
        "image/jpeg"
    } else if bytes.starts_with(&[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]) {
        "image/png"
    } else if bytes.len() >= 12 && &bytes[..4] == b"RIFF" && &bytes[8..12] == b"WEBP" {
        "image/webp"
    } else {
        "application/octet-stream"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn sniff_common_formats() {
        assert_eq!(sniff_mime(&[0xFF, 0xD8, 0xFF, 0xE0]), "image/jpeg");
        assert_eq!(
            sniff_mime(&[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0x00]),
            "image/png"
        );
        assert_eq!(
            sniff_mime(b"RIFF\x00\x00\x00\x00WEBPVP8 "),
            "image/webp"
        );
    }

    #[test]
    fn sniff_unknown_is_octet_stream_not_an_error() {
        assert_eq!(sniff_mime(b"definitely text"), "application/octet-stream");
        assert_eq!(sniff_mime(&[]), "application/octet-stream");
    }

    #[test]
    fn resolve_missing_photo() {
        let err = resolve_photo(Path::new("/definitely/not/a/real/photo.jpg")).unwrap_err();
        assert!(matches!(err, StudioError::PhotoNotFound { .. }));
    }

    #[test]
    fn resolve_reads_bytes_and_filename() {
        let mut f = tempfile::NamedTempFile::with_suffix(".jpg").unwrap();
        f.write_all(&[0xFF, 0xD8, 0xFF, 0xE0, 1, 2, 3]).unwrap();

        let photo = resolve_photo(f.path()).unwrap();
        assert_eq!(photo.len(), 7);
        assert_eq!(photo.mime, "image/jpeg");
        assert_eq!(
            photo.filename,
            f.path().file_name().unwrap().to_string_lossy()
        );
    }

    #[test]
    fn resolve_accepts_non_image_bytes() {
        // Content filtering is not this layer's job.
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(b"not an image at all").unwrap();

        let photo = resolve_photo(f.path()).unwrap();
        assert_eq!(photo.mime, "application/octet-stream");
    }
}
