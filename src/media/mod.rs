// SPDX-License-Identifier: MPL-2.0
//! Image-facing side of metadata editing.
//!
//! This module turns image bytes into a [`MetadataStore`] and back: EXIF blob
//! extraction and embedding, the binary TIFF codec, edit sessions and the
//! sample image download.

pub mod container;
pub mod exif_codec;
pub mod metadata_store;
pub mod metadata_writer;
pub mod sample;

// Re-export commonly used types
pub use container::{embed_exif, extract_exif_blob, ContainerKind};
pub use exif_codec::{dump, ExifCodec, TiffCodec};
pub use metadata_store::{DisplayField, MergeReport, MetadataStore, StoredValue};
pub use metadata_writer::{edited_output_path, EditSession};
