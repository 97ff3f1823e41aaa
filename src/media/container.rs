// SPDX-License-Identifier: MPL-2.0
//! EXIF blob extraction and embedding for image containers.
//!
//! Extraction works for every container `kamadak-exif` can read. Embedding is
//! JPEG only: the EXIF blob lives in an APP1 segment whose payload starts with
//! `Exif\0\0`. Embedding replaces that segment when present; otherwise the new
//! segment goes right after the JFIF APP0 segment (if it leads the file) or
//! right after SOI. Image data is copied through byte for byte.

use crate::domain::error::MetadataError;
use std::io::Cursor;

/// Identifier prefixing the EXIF payload of an APP1 segment.
const EXIF_MARKER: &[u8] = b"Exif\0\0";

const SOI: [u8; 2] = [0xFF, 0xD8];
const APP0: u8 = 0xE0;
const APP1: u8 = 0xE1;

/// Position of the EXIF segment, or where one should go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ExifSlot {
    /// Existing segment spanning `start..end`, payload at `payload..end`.
    Existing {
        start: usize,
        payload: usize,
        end: usize,
    },
    Insert(usize),
}

/// Image container, sniffed from leading bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerKind {
    Jpeg,
    Tiff,
    Png,
    Webp,
    Heif,
}

impl ContainerKind {
    /// Identifies the container of `data`, if it is one EXIF can live in.
    #[must_use]
    pub fn sniff(data: &[u8]) -> Option<Self> {
        if is_jpeg(data) {
            Some(Self::Jpeg)
        } else if data.starts_with(b"II*\0") || data.starts_with(b"MM\0*") {
            Some(Self::Tiff)
        } else if data.starts_with(b"\x89PNG\r\n\x1a\n") {
            Some(Self::Png)
        } else if data.len() >= 12 && &data[..4] == b"RIFF" && &data[8..12] == b"WEBP" {
            Some(Self::Webp)
        } else if data.len() >= 8 && &data[4..8] == b"ftyp" {
            Some(Self::Heif)
        } else {
            None
        }
    }

    /// Whether [`embed_exif`] can write into this container.
    #[must_use]
    pub fn supports_embedding(self) -> bool {
        self == Self::Jpeg
    }
}

/// Returns whether `data` starts with a JPEG SOI marker.
#[must_use]
pub fn is_jpeg(data: &[u8]) -> bool {
    data.starts_with(&SOI)
}

/// Extracts the TIFF-structured EXIF blob from any supported container.
///
/// JPEG segments are walked directly; other containers go through
/// `kamadak-exif`'s container reader. Returns `Ok(None)` when the image
/// carries no EXIF data.
pub fn extract_exif_blob(image: &[u8]) -> Result<Option<Vec<u8>>, MetadataError> {
    match ContainerKind::sniff(image) {
        Some(ContainerKind::Jpeg) => read_exif_blob(image),
        Some(_) => match exif::Reader::new().read_from_container(&mut Cursor::new(image)) {
            Ok(exif) => Ok(Some(exif.buf().to_vec())),
            Err(exif::Error::NotFound(_)) => Ok(None),
            Err(err) => Err(MetadataError::CorruptedMetadata(err.to_string())),
        },
        None => Err(MetadataError::UnsupportedFormat),
    }
}

/// Extracts the TIFF-structured EXIF blob from a JPEG image.
///
/// Returns `Ok(None)` when the image carries no EXIF segment.
///
/// # Errors
///
/// [`MetadataError::UnsupportedFormat`] when `image` is not a JPEG stream,
/// [`MetadataError::CorruptedMetadata`] when its segment structure is broken.
pub fn read_exif_blob(image: &[u8]) -> Result<Option<Vec<u8>>, MetadataError> {
    if !is_jpeg(image) {
        return Err(MetadataError::UnsupportedFormat);
    }
    match find_exif_slot(image)? {
        ExifSlot::Existing { payload, end, .. } => Ok(Some(image[payload..end].to_vec())),
        ExifSlot::Insert(_) => Ok(None),
    }
}

/// Returns a copy of `image` with `blob` as its EXIF segment.
///
/// # Errors
///
/// [`MetadataError::UnsupportedFormat`] when `image` is not a JPEG stream,
/// [`MetadataError::Serialization`] when `blob` does not fit one APP1 segment.
pub fn embed_exif(image: &[u8], blob: &[u8]) -> Result<Vec<u8>, MetadataError> {
    if !is_jpeg(image) {
        return Err(MetadataError::UnsupportedFormat);
    }

    let segment = build_exif_segment(blob)?;
    let (head, tail) = match find_exif_slot(image)? {
        ExifSlot::Existing { start, end, .. } => (start, end),
        ExifSlot::Insert(pos) => (pos, pos),
    };

    let mut out = Vec::with_capacity(image.len() - (tail - head) + segment.len());
    out.extend_from_slice(&image[..head]);
    out.extend_from_slice(&segment);
    out.extend_from_slice(&image[tail..]);
    Ok(out)
}

/// Walks marker segments up to SOS looking for the EXIF APP1 segment.
fn find_exif_slot(data: &[u8]) -> Result<ExifSlot, MetadataError> {
    let mut pos = SOI.len();
    let mut insert_at = SOI.len();

    while pos + 2 <= data.len() {
        if data[pos] != 0xFF {
            return Err(MetadataError::CorruptedMetadata(format!(
                "expected JPEG marker at offset {pos}"
            )));
        }

        let marker = data[pos + 1];
        match marker {
            // Fill byte before a marker
            0xFF => {
                pos += 1;
                continue;
            }
            // EOI or SOS: no more header segments
            0xD9 | 0xDA => break,
            0x01 | 0xD0..=0xD8 => {
                pos += 2;
                continue;
            }
            _ => {}
        }

        if pos + 4 > data.len() {
            return Err(MetadataError::CorruptedMetadata(
                "truncated JPEG segment header".to_string(),
            ));
        }
        let length = usize::from(u16::from_be_bytes([data[pos + 2], data[pos + 3]]));
        let end = pos + 2 + length;
        if length < 2 || end > data.len() {
            return Err(MetadataError::CorruptedMetadata(format!(
                "JPEG segment at offset {pos} overruns the file"
            )));
        }

        let payload = pos + 4;
        if marker == APP1 && data[payload..end].starts_with(EXIF_MARKER) {
            return Ok(ExifSlot::Existing {
                start: pos,
                payload: payload + EXIF_MARKER.len(),
                end,
            });
        }

        if marker == APP0 && pos == SOI.len() {
            insert_at = end;
        }
        pos = end;
    }

    Ok(ExifSlot::Insert(insert_at))
}

/// Builds an APP1 segment: marker, length, `Exif\0\0`, blob.
fn build_exif_segment(blob: &[u8]) -> Result<Vec<u8>, MetadataError> {
    // Length counts itself, the identifier and the blob
    let total_len = 2 + EXIF_MARKER.len() + blob.len();
    let length = u16::try_from(total_len).map_err(|_| {
        MetadataError::Serialization(format!(
            "EXIF data of {} bytes does not fit a JPEG APP1 segment",
            blob.len()
        ))
    })?;

    let mut segment = Vec::with_capacity(2 + total_len);
    segment.extend_from_slice(&[0xFF, APP1]);
    segment.extend_from_slice(&length.to_be_bytes());
    segment.extend_from_slice(EXIF_MARKER);
    segment.extend_from_slice(blob);
    Ok(segment)
}
