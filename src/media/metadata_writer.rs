// SPDX-License-Identifier: MPL-2.0
//! Edit sessions: load an image's EXIF data, apply edits, write a new image.
//!
//! An [`EditSession`] owns the original image bytes and the decoded
//! [`MetadataStore`]. Edits are validated and merged into the store; the
//! image is only re-encoded on [`EditSession::render`] or
//! [`EditSession::save_to`], and the source file is never overwritten by the
//! session itself.

use super::container::{self, ContainerKind};
use super::exif_codec::{ExifCodec, TiffCodec};
use super::metadata_store::{MergeReport, MetadataStore};
use crate::domain::error::MetadataError;
use crate::domain::metadata::EditRequest;
use crate::error::{Error, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Suffix appended to the file stem of edited copies.
const EDITED_SUFFIX: &str = "-edited";

/// An image opened for EXIF editing.
#[derive(Debug, Clone)]
pub struct EditSession<C: ExifCodec = TiffCodec> {
    codec: C,
    image: Vec<u8>,
    store: MetadataStore,
}

impl EditSession<TiffCodec> {
    /// Opens `path` with the default codec.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is not an image container
    /// EXIF can live in, or carries EXIF data that cannot be parsed.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with(path, TiffCodec::default())
    }
}

impl<C: ExifCodec> EditSession<C> {
    /// Opens `path`, decoding and re-encoding with `codec`.
    pub fn open_with<P: AsRef<Path>>(path: P, codec: C) -> Result<Self> {
        let path = path.as_ref();
        let image = std::fs::read(path)
            .map_err(|e| Error::Io(format!("Failed to read file '{}': {}", path.display(), e)))?;
        let session = Self::from_bytes(image, codec)?;
        info!(path = %path.display(), "opened image for editing");
        Ok(session)
    }

    /// Builds a session from in-memory image bytes.
    ///
    /// An image without EXIF data starts with an empty store. Only JPEG
    /// sessions can be rendered; other containers are read-only.
    pub fn from_bytes(image: Vec<u8>, codec: C) -> std::result::Result<Self, MetadataError> {
        let store = match container::extract_exif_blob(&image)? {
            Some(blob) => codec.decode(&blob)?,
            None => {
                debug!("image has no EXIF segment, starting from an empty store");
                MetadataStore::new()
            }
        };
        Ok(Self {
            codec,
            image,
            store,
        })
    }

    #[must_use]
    pub fn store(&self) -> &MetadataStore {
        &self.store
    }

    /// Whether the image container can take an edited EXIF segment.
    #[must_use]
    pub fn is_writable(&self) -> bool {
        ContainerKind::sniff(&self.image).is_some_and(ContainerKind::supports_embedding)
    }

    /// Validates and merges `request` into the store.
    pub fn apply(&mut self, request: &EditRequest) -> MergeReport {
        let report = self.store.apply_edits(request);
        info!(
            applied = report.applied.len(),
            rejected = report.rejected.len(),
            "applied edit request"
        );
        report
    }

    /// Serializes the store and embeds it into a copy of the image.
    pub fn render(&self) -> std::result::Result<Vec<u8>, MetadataError> {
        if !self.is_writable() {
            return Err(MetadataError::UnsupportedFormat);
        }
        let blob = self.codec.encode(&self.store)?;
        container::embed_exif(&self.image, &blob)
    }

    /// Renders the edited image and writes it to `path`.
    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let data = self.render()?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, data).map_err(|e| {
            Error::Io(format!(
                "Failed to write edited image to '{}': {}",
                path.display(),
                e
            ))
        })?;
        info!(path = %path.display(), "saved edited image");
        Ok(())
    }
}

/// Default output path for an edited copy: `photo.jpg` → `photo-edited.jpg`.
#[must_use]
pub fn edited_output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_string());
    let extension = input
        .extension()
        .map(|e| e.to_string_lossy().into_owned())
        .unwrap_or_else(|| "jpg".to_string());
    input.with_file_name(format!("{stem}{EDITED_SUFFIX}.{extension}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::metadata::{EditableTag, TagValue};
    use crate::test_utils::MINIMAL_JPEG;
    use tempfile::tempdir;

    #[test]
    fn test_edited_output_path() {
        assert_eq!(
            edited_output_path(Path::new("/tmp/dog.jpg")),
            PathBuf::from("/tmp/dog-edited.jpg")
        );
        assert_eq!(
            edited_output_path(Path::new("shot.JPEG")),
            PathBuf::from("shot-edited.JPEG")
        );
    }

    #[test]
    fn image_without_exif_opens_empty() {
        let session = EditSession::from_bytes(MINIMAL_JPEG.to_vec(), TiffCodec::default())
            .expect("open");
        assert!(session.store().is_empty());
        assert!(session.is_writable());
    }

    #[test]
    fn unedited_image_without_exif_renders() {
        let session = EditSession::from_bytes(MINIMAL_JPEG.to_vec(), TiffCodec::default())
            .expect("open");
        let rendered = session.render().expect("render empty store");

        let reopened = EditSession::from_bytes(rendered, TiffCodec::default()).expect("reopen");
        assert!(reopened.store().is_empty());
    }

    #[test]
    fn non_jpeg_bytes_are_unsupported() {
        let err = EditSession::from_bytes(b"not an image".to_vec(), TiffCodec::default())
            .unwrap_err();
        assert_eq!(err, MetadataError::UnsupportedFormat);
    }

    #[test]
    fn tiff_session_reads_but_does_not_render() {
        let mut store = MetadataStore::new();
        store.apply_edits(&EditRequest::new().with("Make", "Leica"));
        let tiff = crate::media::exif_codec::dump(&store).expect("dump");

        let session = EditSession::from_bytes(tiff, TiffCodec::default()).expect("open");
        assert_eq!(session.store().display_value(EditableTag::Make), "Leica");
        assert!(!session.is_writable());
        assert_eq!(session.render(), Err(MetadataError::UnsupportedFormat));
    }

    #[test]
    fn render_then_reopen_keeps_edits() {
        let mut session =
            EditSession::from_bytes(MINIMAL_JPEG.to_vec(), TiffCodec::default()).expect("open");
        let report = session.apply(&EditRequest::new().with("Model", "X100V"));
        assert!(report.is_clean());

        let rendered = session.render().expect("render");
        let reopened = EditSession::from_bytes(rendered, TiffCodec::default()).expect("reopen");
        assert_eq!(
            reopened.store().typed(EditableTag::Model),
            Some(&TagValue::Text(b"X100V".to_vec()))
        );
    }

    #[test]
    fn save_to_writes_new_file_and_keeps_source() {
        let dir = tempdir().expect("tempdir");
        let source = dir.path().join("dog.jpg");
        std::fs::write(&source, MINIMAL_JPEG).expect("write");

        let mut session = EditSession::open(&source).expect("open");
        session.apply(&EditRequest::new().with("Make", "Fujifilm"));
        let output = edited_output_path(&source);
        session.save_to(&output).expect("save");

        assert_eq!(std::fs::read(&source).expect("read"), MINIMAL_JPEG);
        let saved = EditSession::open(&output).expect("reopen");
        assert_eq!(saved.store().display_value(EditableTag::Make), "Fujifilm");
    }

    #[test]
    fn open_missing_file_is_io_error() {
        let dir = tempdir().expect("tempdir");
        let err = EditSession::open(dir.path().join("missing.jpg")).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
