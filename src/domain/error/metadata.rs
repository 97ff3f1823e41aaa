// SPDX-License-Identifier: MPL-2.0
//! Errors raised while validating, merging and serializing EXIF metadata.

use std::fmt;

/// Errors that can occur during metadata operations.
///
/// `Format` is the only variant expected from ordinary user input; it is
/// reported per tag and never aborts a batch of edits. `Serialization` and
/// `Io` abort a save attempt without touching the in-memory store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetadataError {
    /// The tag name is not part of the editable tag set.
    UnknownTag(String),

    /// The raw value does not satisfy the tag's format rule.
    Format {
        tag: String,
        raw: String,
        reason: String,
    },

    /// The store holds a value the binary format cannot represent.
    Serialization(String),

    /// The image container does not support embedding EXIF data.
    UnsupportedFormat,

    /// The EXIF data in the image could not be parsed.
    CorruptedMetadata(String),

    /// Reading or writing the image failed.
    Io(String),
}

impl MetadataError {
    /// Builds a `Format` error for `tag` and the rejected `raw` input.
    pub fn format(tag: &str, raw: &str, reason: impl Into<String>) -> Self {
        MetadataError::Format {
            tag: tag.to_string(),
            raw: raw.to_string(),
            reason: reason.into(),
        }
    }

    /// Returns the tag name this error refers to, if any.
    #[must_use]
    pub fn tag(&self) -> Option<&str> {
        match self {
            MetadataError::UnknownTag(tag) | MetadataError::Format { tag, .. } => Some(tag),
            _ => None,
        }
    }

    /// Returns the i18n message key for this error type.
    #[must_use]
    pub fn i18n_key(&self) -> &'static str {
        match self {
            MetadataError::UnknownTag(_) => "error-unknown-tag",
            MetadataError::Format { .. } => "error-invalid-value",
            MetadataError::Serialization(_) => "error-serialization",
            MetadataError::UnsupportedFormat => "error-unsupported-format",
            MetadataError::CorruptedMetadata(_) => "error-corrupted-metadata",
            MetadataError::Io(_) => "error-io",
        }
    }

    /// Returns the arguments referenced by the message behind [`Self::i18n_key`].
    #[must_use]
    pub fn i18n_args(&self) -> Vec<(&'static str, String)> {
        match self {
            MetadataError::UnknownTag(tag) => vec![("tag", tag.clone())],
            MetadataError::Format { tag, raw, reason } => vec![
                ("tag", tag.clone()),
                ("raw", raw.clone()),
                ("reason", reason.clone()),
            ],
            MetadataError::Serialization(msg)
            | MetadataError::CorruptedMetadata(msg)
            | MetadataError::Io(msg) => vec![("message", msg.clone())],
            MetadataError::UnsupportedFormat => Vec::new(),
        }
    }
}

impl fmt::Display for MetadataError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetadataError::UnknownTag(tag) => write!(f, "Unknown tag: {tag}"),
            MetadataError::Format { tag, raw, reason } => {
                write!(f, "Invalid value {raw:?} for {tag}: {reason}")
            }
            MetadataError::Serialization(msg) => write!(f, "Cannot serialize metadata: {msg}"),
            MetadataError::UnsupportedFormat => {
                write!(f, "Format does not support embedding EXIF data")
            }
            MetadataError::CorruptedMetadata(msg) => write!(f, "Corrupted metadata: {msg}"),
            MetadataError::Io(msg) => write!(f, "I/O error: {msg}"),
        }
    }
}

impl std::error::Error for MetadataError {}
