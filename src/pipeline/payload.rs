//! Payload assembly: photo + options → the multipart form the service expects.
//!
//! The wire contract is three form fields per submission: the binary photo
//! part plus two text fields. Field names are fixed (the service looks them
//! up by name) so they live here as constants rather than being derived
//! from anything.

use crate::collector::{CopyCount, SelectedPhoto};
use crate::error::StudioError;
use reqwest::multipart::{Form, Part};

/// Form field carrying the photo bytes.
pub const FIELD_PHOTO: &str = "photo";
/// Form field carrying the background-color string.
pub const FIELD_BG_COLOR: &str = "bg_color";
/// Form field carrying the copy count as text.
pub const FIELD_COPIES: &str = "copies";

/// The normalized bundle of everything one submission carries.
///
/// Built by [`crate::collector::InputCollector::build_payload`]; values are
/// snapshots; later collector edits affect only future payloads.
#[derive(Debug, Clone)]
pub struct Payload {
    pub photo: SelectedPhoto,
    pub bg_color: String,
    pub copies: CopyCount,
}

impl Payload {
    /// Convert into the multipart form sent over the wire.
    pub fn into_form(self) -> Result<Form, StudioError> {
        let photo_part = Part::bytes(self.photo.bytes)
            .file_name(self.photo.filename)
            .mime_str(self.photo.mime)
            .map_err(|e| StudioError::Internal(format!("photo part: {e}")))?;

        Ok(Form::new()
            .part(FIELD_PHOTO, photo_part)
            .text(FIELD_BG_COLOR, self.bg_color)
            .text(FIELD_COPIES, self.copies.as_str()))
    }
}
