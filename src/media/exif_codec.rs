// SPDX-License-Identifier: MPL-2.0
//! Binary EXIF (TIFF structure) codec.
//!
//! The [`ExifCodec`] trait is the seam between the in-memory
//! [`MetadataStore`] and the bytes embedded in an image. [`TiffCodec`] is the
//! implementation backed by `kamadak-exif`: its reader for decoding and its
//! experimental writer for encoding.
//!
//! Encoding writes every group of the store, typed and foreign values alike,
//! plus the carried sub-IFD fields and the thumbnail. IFD pointers and
//! thumbnail offsets are recomputed by the writer.

use super::metadata_store::{context_of, MetadataStore, StoredValue};
use crate::domain::error::MetadataError;
use crate::domain::metadata::{Rational, TagGroup, TagValue};
use exif::experimental::Writer;
use exif::{Field, In, Tag, Value};
use std::io::Cursor;
use tracing::debug;

/// Decodes and encodes binary EXIF blobs.
pub trait ExifCodec {
    /// Parses a TIFF-structured EXIF blob. An empty blob yields an empty store.
    fn decode(&self, blob: &[u8]) -> Result<MetadataStore, MetadataError>;

    /// Serializes the store back into a TIFF-structured EXIF blob.
    fn encode(&self, store: &MetadataStore) -> Result<Vec<u8>, MetadataError>;
}

/// `kamadak-exif` backed codec.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TiffCodec {
    /// Byte order of encoded blobs. Decoding detects it from the blob.
    pub little_endian: bool,
}

impl TiffCodec {
    #[must_use]
    pub fn new(little_endian: bool) -> Self {
        Self { little_endian }
    }
}

impl ExifCodec for TiffCodec {
    fn decode(&self, blob: &[u8]) -> Result<MetadataStore, MetadataError> {
        if blob.is_empty() {
            return Ok(MetadataStore::new());
        }
        let exif = exif::Reader::new()
            .read_raw(blob.to_vec())
            .map_err(|err| MetadataError::CorruptedMetadata(err.to_string()))?;
        Ok(MetadataStore::from_exif(&exif))
    }

    fn encode(&self, store: &MetadataStore) -> Result<Vec<u8>, MetadataError> {
        let fields = collect_fields(store)?;
        if fields.is_empty() && store.carried_fields().is_empty() && store.thumbnail().is_none() {
            debug!("store is empty, encoding a bare IFD0");
            return Ok(empty_tiff(self.little_endian));
        }

        let mut writer = Writer::new();
        for field in &fields {
            writer.push_field(field);
        }
        for field in store.carried_fields() {
            writer.push_field(field);
        }
        if let Some(jpeg) = store.thumbnail() {
            writer.set_jpeg(jpeg, In::THUMBNAIL);
        }

        let mut buf = Cursor::new(Vec::new());
        writer
            .write(&mut buf, self.little_endian)
            .map_err(|err| MetadataError::Serialization(err.to_string()))?;

        let blob = buf.into_inner();
        debug!(
            bytes = blob.len(),
            fields = fields.len() + store.carried_fields().len(),
            little_endian = self.little_endian,
            "encoded EXIF blob"
        );
        Ok(blob)
    }
}

/// Serializes `store` with the default (big-endian) codec.
pub fn dump(store: &MetadataStore) -> Result<Vec<u8>, MetadataError> {
    TiffCodec::default().encode(store)
}

/// TIFF header followed by an IFD0 with no entries and no next IFD.
fn empty_tiff(little_endian: bool) -> Vec<u8> {
    let mut blob = Vec::with_capacity(14);
    if little_endian {
        blob.extend_from_slice(b"II\x2a\x00");
        blob.extend_from_slice(&8u32.to_le_bytes());
    } else {
        blob.extend_from_slice(b"MM\x00\x2a");
        blob.extend_from_slice(&8u32.to_be_bytes());
    }
    // entry count, then next IFD offset
    blob.extend_from_slice(&[0; 6]);
    blob
}

/// Builds one `exif::Field` per stored value of the primary and GPS groups.
fn collect_fields(store: &MetadataStore) -> Result<Vec<Field>, MetadataError> {
    let mut fields = Vec::new();
    for group in TagGroup::ALL {
        let context = context_of(group);
        for (&code, stored) in store.group(group) {
            let value = match stored {
                StoredValue::Typed(value) => to_exif_value(code, value)?,
                StoredValue::Foreign(value) => value.clone(),
            };
            fields.push(Field {
                tag: Tag(context, code),
                ifd_num: In::PRIMARY,
                value,
            });
        }
    }
    Ok(fields)
}

// =============================================================================
// Typed value serialization
// =============================================================================

fn to_exif_value(code: u16, value: &TagValue) -> Result<Value, MetadataError> {
    match value {
        TagValue::Integer(n) => u32::try_from(*n)
            .map(|n| Value::Long(vec![n]))
            .map_err(|_| {
                MetadataError::Serialization(format!(
                    "tag 0x{code:04x}: {n} does not fit an unsigned 32-bit integer"
                ))
            }),
        TagValue::Text(bytes) => {
            if bytes.contains(&0) {
                return Err(MetadataError::Serialization(format!(
                    "tag 0x{code:04x}: text contains a NUL byte"
                )));
            }
            Ok(Value::Ascii(vec![bytes.clone()]))
        }
        TagValue::Reference(byte) => Ok(Value::Ascii(vec![vec![*byte]])),
        TagValue::Coordinate(dms) => {
            let mut components = Vec::with_capacity(3);
            for component in dms.components() {
                components.push(to_exif_rational(code, component)?);
            }
            Ok(Value::Rational(components))
        }
    }
}

fn to_exif_rational(code: u16, rational: Rational) -> Result<exif::Rational, MetadataError> {
    let num = u32::try_from(rational.numerator());
    let denom = u32::try_from(rational.denominator());
    match (num, denom) {
        (Ok(num), Ok(denom)) => Ok(exif::Rational { num, denom }),
        _ => Err(MetadataError::Serialization(format!(
            "tag 0x{code:04x}: {rational} is not an unsigned 32-bit rational"
        ))),
    }
}

// =============================================================================
// Tests
// =============================================================================
