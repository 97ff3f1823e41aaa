// SPDX-License-Identifier: MPL-2.0
//! Validation of user-supplied tag values.
//!
//! A batch of edits is always evaluated in full: each tag yields its own
//! [`ValidationOutcome`], and one rejected value never prevents the others
//! from being checked. Empty input means "leave the tag alone" and produces
//! no outcome at all.

use super::coordinate::CoordinateRational;
use super::tag::EditableTag;
use super::value::TagValue;
use crate::domain::error::MetadataError;

// =============================================================================
// EditRequest
// =============================================================================

/// Raw textual edits keyed by tag name, in submission order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditRequest {
    entries: Vec<(String, String)>,
}

impl EditRequest {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the raw value for `tag`, replacing an earlier value for the same name.
    pub fn set(&mut self, tag: impl Into<String>, raw: impl Into<String>) {
        let tag = tag.into();
        let raw = raw.into();
        match self.entries.iter_mut().find(|(name, _)| *name == tag) {
            Some(entry) => entry.1 = raw,
            None => self.entries.push((tag, raw)),
        }
    }

    /// Builder form of [`Self::set`].
    #[must_use]
    pub fn with(mut self, tag: impl Into<String>, raw: impl Into<String>) -> Self {
        self.set(tag, raw);
        self
    }

    /// Parses a `Tag=Value` assignment. Only the first `=` separates.
    #[must_use]
    pub fn parse_assignment(assignment: &str) -> Option<(String, String)> {
        let (tag, raw) = assignment.split_once('=')?;
        let tag = tag.trim();
        (!tag.is_empty()).then(|| (tag.to_string(), raw.to_string()))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(t, r)| (t.as_str(), r.as_str()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for EditRequest {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut request = Self::new();
        for (tag, raw) in iter {
            request.set(tag, raw);
        }
        request
    }
}

// =============================================================================
// ValidationOutcome
// =============================================================================

/// Result of validating one non-empty edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationOutcome {
    Accepted(TagValue),
    Rejected(MetadataError),
}

impl ValidationOutcome {
    #[must_use]
    pub fn is_accepted(&self) -> bool {
        matches!(self, ValidationOutcome::Accepted(_))
    }
}

/// A validation outcome together with the tag name it was requested for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagOutcome {
    pub name: String,
    pub outcome: ValidationOutcome,
}

/// Validates a single edit.
///
/// Returns `None` when `raw` is empty: no edit was requested, which is
/// neither an acceptance nor a rejection.
#[must_use]
pub fn validate(name: &str, raw: &str) -> Option<ValidationOutcome> {
    if raw.is_empty() {
        return None;
    }

    let outcome = match EditableTag::lookup(name).and_then(|tag| tag.validate(raw)) {
        Ok(value) => ValidationOutcome::Accepted(value),
        Err(err) => ValidationOutcome::Rejected(err),
    };
    Some(outcome)
}

/// Validates every edit in `request`, skipping empty values.
#[must_use]
pub fn validate_request(request: &EditRequest) -> Vec<TagOutcome> {
    request
        .iter()
        .filter_map(|(name, raw)| {
            validate(name, raw).map(|outcome| TagOutcome {
                name: name.to_string(),
                outcome,
            })
        })
        .collect()
}

// =============================================================================
// Per-tag rules
// =============================================================================

pub(super) fn parse_integer(tag: EditableTag, raw: &str) -> Result<TagValue, MetadataError> {
    raw.trim()
        .parse::<i64>()
        .map(TagValue::Integer)
        .map_err(|_| MetadataError::format(tag.name(), raw, "expected an integer"))
}

pub(super) fn parse_text(tag: EditableTag, raw: &str) -> Result<TagValue, MetadataError> {
    if raw.is_empty() {
        return Err(MetadataError::format(tag.name(), raw, "value must not be empty"));
    }
    Ok(TagValue::Text(raw.as_bytes().to_vec()))
}

/// `YYYY:MM:DD HH:MM:SS`: two whitespace-separated tokens, each made of at
/// least three `:`-separated integers. The original text is stored as-is.
pub(super) fn parse_date_time(tag: EditableTag, raw: &str) -> Result<TagValue, MetadataError> {
    let invalid = || MetadataError::format(tag.name(), raw, "expected YYYY:MM:DD HH:MM:SS");

    let tokens: Vec<&str> = raw.split_whitespace().collect();
    if tokens.len() != 2 {
        return Err(invalid());
    }

    for token in tokens {
        let parts: Vec<&str> = token.split(':').collect();
        if parts.len() < 3 {
            return Err(invalid());
        }
        if parts[..3].iter().any(|part| part.parse::<i64>().is_err()) {
            return Err(invalid());
        }
    }

    Ok(TagValue::Text(raw.as_bytes().to_vec()))
}

pub(super) fn parse_coordinate(tag: EditableTag, raw: &str) -> Result<TagValue, MetadataError> {
    let value = raw
        .trim()
        .parse::<f64>()
        .map_err(|_| MetadataError::format(tag.name(), raw, "expected a decimal number"))?;

    CoordinateRational::from_decimal(value)
        .map(TagValue::Coordinate)
        .map_err(|err| MetadataError::format(tag.name(), raw, err.to_string()))
}

pub(super) fn parse_reference(
    tag: EditableTag,
    raw: &str,
    allowed: &[u8; 2],
) -> Result<TagValue, MetadataError> {
    match raw.as_bytes() {
        [byte] if allowed.contains(byte) => Ok(TagValue::Reference(*byte)),
        _ => Err(MetadataError::format(
            tag.name(),
            raw,
            format!(
                "expected {} or {}",
                char::from(allowed[0]),
                char::from(allowed[1])
            ),
        )),
    }
}

// =============================================================================
// Tests
// =============================================================================
