// SPDX-License-Identifier: MPL-2.0
//! In-memory EXIF tag dictionary.
//!
//! A [`MetadataStore`] holds one `code → value` map per IFD group (primary
//! image and GPS). Values of the editable tags are decoded into typed
//! [`TagValue`]s; everything else is kept as the raw `exif::Value` and never
//! looked at again. Fields from other IFDs (Exif sub-IFD, interoperability,
//! thumbnail) and the thumbnail JPEG itself are carried through unchanged so
//! that a load → edit → save cycle only touches what was edited.
//!
//! [`MetadataStore::merge`] is the only way to change a store once built.

use crate::domain::error::MetadataError;
use crate::domain::metadata::{
    apply_reference, validate_request, CoordinateRational, EditRequest, EditableTag,
    GpsCoordinates, Rational, TagGroup, TagOutcome, TagValue, ValidationOutcome,
};
use exif::{Context, Field, In, Tag, Value};
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// EXIF context matching a tag group.
pub(crate) fn context_of(group: TagGroup) -> Context {
    match group {
        TagGroup::Primary => Context::Tiff,
        TagGroup::Gps => Context::Gps,
    }
}

// =============================================================================
// StoredValue
// =============================================================================

/// A value held in a store group.
#[derive(Debug, Clone)]
pub enum StoredValue {
    /// Value of an editable tag, decoded or written by this crate.
    Typed(TagValue),
    /// Value passed through untouched: an unknown code, or a known code
    /// whose stored shape does not match the tag's expected type.
    Foreign(Value),
}

impl StoredValue {
    #[must_use]
    pub fn as_typed(&self) -> Option<&TagValue> {
        match self {
            StoredValue::Typed(value) => Some(value),
            StoredValue::Foreign(_) => None,
        }
    }

    /// Display string for `tag`: the tag's decoder for typed values, the
    /// raw EXIF rendering otherwise.
    #[must_use]
    pub fn display(&self, tag: EditableTag) -> String {
        match self {
            StoredValue::Typed(value) => tag.decode(value),
            StoredValue::Foreign(value) => value
                .display_as(Tag(context_of(tag.group()), tag.code()))
                .to_string()
                .trim_matches('"')
                .to_string(),
        }
    }
}

// =============================================================================
// Reports
// =============================================================================

/// What a merge did with each outcome.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeReport {
    /// Tags written into the store, in outcome order.
    pub applied: Vec<EditableTag>,
    /// Every rejected edit, each to be reported on its own.
    pub rejected: Vec<MetadataError>,
}

impl MergeReport {
    /// True when nothing was rejected.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.rejected.is_empty()
    }
}

/// One row of the display panels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayField {
    pub tag: EditableTag,
    /// Decoded value, empty when the tag is absent.
    pub value: String,
}

// =============================================================================
// MetadataStore
// =============================================================================

#[derive(Debug, Clone, Default)]
pub struct MetadataStore {
    primary: BTreeMap<u16, StoredValue>,
    gps: BTreeMap<u16, StoredValue>,
    carried: Vec<Field>,
    thumbnail: Option<Vec<u8>>,
}

impl MetadataStore {
    /// Creates an empty store, as for an image without EXIF data.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store from parsed EXIF data, keeping the thumbnail JPEG.
    #[must_use]
    pub fn from_exif(exif: &exif::Exif) -> Self {
        let thumbnail = thumbnail_bytes(exif);
        Self::from_fields(exif.fields().cloned(), thumbnail)
    }

    /// Builds a store from individual fields.
    ///
    /// Primary and GPS fields are split into their groups; every other field
    /// is carried through as-is.
    #[must_use]
    pub fn from_fields(
        fields: impl IntoIterator<Item = Field>,
        thumbnail: Option<Vec<u8>>,
    ) -> Self {
        let mut store = Self {
            thumbnail,
            ..Self::default()
        };

        for field in fields {
            let group = match (field.tag.context(), field.ifd_num) {
                (Context::Tiff, In::PRIMARY) => TagGroup::Primary,
                (Context::Gps, In::PRIMARY) => TagGroup::Gps,
                _ => {
                    store.carried.push(field);
                    continue;
                }
            };
            let code = field.tag.number();
            let value = decode_value(group, code, field.value);
            store.group_mut(group).insert(code, value);
        }

        debug!(
            primary = store.primary.len(),
            gps = store.gps.len(),
            carried = store.carried.len(),
            "decoded metadata store"
        );
        store
    }

    /// All values of one group, ordered by code.
    #[must_use]
    pub fn group(&self, group: TagGroup) -> &BTreeMap<u16, StoredValue> {
        match group {
            TagGroup::Primary => &self.primary,
            TagGroup::Gps => &self.gps,
        }
    }

    fn group_mut(&mut self, group: TagGroup) -> &mut BTreeMap<u16, StoredValue> {
        match group {
            TagGroup::Primary => &mut self.primary,
            TagGroup::Gps => &mut self.gps,
        }
    }

    #[must_use]
    pub fn get(&self, tag: EditableTag) -> Option<&StoredValue> {
        self.group(tag.group()).get(&tag.code())
    }

    /// Typed value of `tag`, if present and decodable.
    #[must_use]
    pub fn typed(&self, tag: EditableTag) -> Option<&TagValue> {
        self.get(tag).and_then(StoredValue::as_typed)
    }

    /// Fields outside the primary and GPS groups.
    #[must_use]
    pub fn carried_fields(&self) -> &[Field] {
        &self.carried
    }

    #[must_use]
    pub fn thumbnail(&self) -> Option<&[u8]> {
        self.thumbnail.as_deref()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.primary.is_empty() && self.gps.is_empty() && self.carried.is_empty()
    }

    /// Applies every accepted outcome and reports every rejected one.
    ///
    /// Each accepted value overwrites whatever was stored under its code.
    /// Applying the same outcomes again leaves the store unchanged.
    pub fn merge(&mut self, outcomes: &[TagOutcome]) -> MergeReport {
        let mut report = MergeReport::default();

        for TagOutcome { name, outcome } in outcomes {
            match outcome {
                ValidationOutcome::Accepted(value) => match EditableTag::lookup(name) {
                    Ok(tag) => {
                        debug!(tag = %tag, value = %value, "applying edit");
                        self.group_mut(tag.group())
                            .insert(tag.code(), StoredValue::Typed(value.clone()));
                        report.applied.push(tag);
                    }
                    Err(err) => report.rejected.push(err),
                },
                ValidationOutcome::Rejected(err) => {
                    warn!(tag = %name, "rejected edit: {err}");
                    report.rejected.push(err.clone());
                }
            }
        }

        report
    }

    /// Validates `request` and merges the result.
    pub fn apply_edits(&mut self, request: &EditRequest) -> MergeReport {
        self.merge(&validate_request(request))
    }

    /// Display rows for every editable tag, in registry order.
    #[must_use]
    pub fn decode_for_display(&self) -> Vec<DisplayField> {
        EditableTag::ALL
            .into_iter()
            .map(|tag| DisplayField {
                tag,
                value: self.display_value(tag),
            })
            .collect()
    }

    /// Display string of one tag, empty when absent.
    #[must_use]
    pub fn display_value(&self, tag: EditableTag) -> String {
        self.get(tag)
            .map(|value| value.display(tag))
            .unwrap_or_default()
    }

    /// Signed latitude in decimal degrees, `0.0` when absent.
    #[must_use]
    pub fn latitude(&self) -> f64 {
        self.signed_axis(EditableTag::GpsLatitude, EditableTag::GpsLatitudeRef)
    }

    /// Signed longitude in decimal degrees, `0.0` when absent.
    #[must_use]
    pub fn longitude(&self) -> f64 {
        self.signed_axis(EditableTag::GpsLongitude, EditableTag::GpsLongitudeRef)
    }

    /// Both axes as [`GpsCoordinates`], for map consumers.
    #[must_use]
    pub fn location(&self) -> GpsCoordinates {
        GpsCoordinates::new(self.latitude(), self.longitude())
    }

    fn signed_axis(&self, coordinate: EditableTag, reference: EditableTag) -> f64 {
        let Some(stored) = self.get(coordinate) else {
            return 0.0;
        };
        let Some(dms) = stored.as_typed().and_then(TagValue::as_coordinate) else {
            warn!(tag = %coordinate, "stored value is not a DMS triplet, treating as absent");
            return 0.0;
        };
        // No reference tag means no sign to apply
        let reference = self
            .typed(reference)
            .and_then(TagValue::as_reference)
            .unwrap_or(b'N');
        apply_reference(reference, dms.to_decimal())
    }
}

// =============================================================================
// Decoding helpers
// =============================================================================

/// Decodes a raw EXIF value into a typed value when `code` is an editable
/// tag and the stored shape matches; otherwise keeps it foreign.
fn decode_value(group: TagGroup, code: u16, value: Value) -> StoredValue {
    EditableTag::from_code(group, code)
        .and_then(|tag| typed_value(tag, &value))
        .map_or(StoredValue::Foreign(value), StoredValue::Typed)
}

fn typed_value(tag: EditableTag, value: &Value) -> Option<TagValue> {
    match (tag, value) {
        (EditableTag::ImageWidth | EditableTag::ImageLength, Value::Short(v)) if v.len() == 1 => {
            Some(TagValue::Integer(i64::from(v[0])))
        }
        (EditableTag::ImageWidth | EditableTag::ImageLength, Value::Long(v)) if v.len() == 1 => {
            Some(TagValue::Integer(i64::from(v[0])))
        }
        (EditableTag::Make | EditableTag::Model | EditableTag::DateTime, Value::Ascii(v))
            if v.len() == 1 =>
        {
            Some(TagValue::Text(v[0].clone()))
        }
        (EditableTag::GpsLatitudeRef | EditableTag::GpsLongitudeRef, Value::Ascii(v))
            if v.len() == 1 && v[0].len() == 1 =>
        {
            Some(TagValue::Reference(v[0][0]))
        }
        (EditableTag::GpsLatitude | EditableTag::GpsLongitude, Value::Rational(v))
            if v.len() == 3 =>
        {
            let component =
                |r: &exif::Rational| Rational::new(i64::from(r.num), i64::from(r.denom));
            Some(TagValue::Coordinate(CoordinateRational::new(
                component(&v[0])?,
                component(&v[1])?,
                component(&v[2])?,
            )))
        }
        _ => None,
    }
}

/// Slices the thumbnail JPEG out of the raw EXIF buffer, if one is referenced.
fn thumbnail_bytes(exif: &exif::Exif) -> Option<Vec<u8>> {
    let offset = exif
        .get_field(Tag::JPEGInterchangeFormat, In::THUMBNAIL)?
        .value
        .get_uint(0)?;
    let length = exif
        .get_field(Tag::JPEGInterchangeFormatLength, In::THUMBNAIL)?
        .value
        .get_uint(0)?;
    let start = usize::try_from(offset).ok()?;
    let end = start.checked_add(usize::try_from(length).ok()?)?;
    exif.buf().get(start..end).map(<[u8]>::to_vec)
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{assert_abs_diff_eq, F64_EPSILON};

    fn field(context: Context, code: u16, value: Value) -> Field {
        Field {
            tag: Tag(context, code),
            ifd_num: In::PRIMARY,
            value,
        }
    }

    fn dms(d: u32, m: u32, s: (u32, u32)) -> Value {
        Value::Rational(vec![
            exif::Rational { num: d, denom: 1 },
            exif::Rational { num: m, denom: 1 },
            exif::Rational {
                num: s.0,
                denom: s.1,
            },
        ])
    }

    fn sample_store() -> MetadataStore {
        MetadataStore::from_fields(
            vec![
                field(Context::Tiff, 0x0100, Value::Short(vec![640])),
                field(Context::Tiff, 0x010f, Value::Ascii(vec![b"Canon".to_vec()])),
                field(Context::Tiff, 0x0112, Value::Short(vec![6])),
                field(Context::Gps, 0x0001, Value::Ascii(vec![b"S".to_vec()])),
                field(Context::Gps, 0x0002, dms(12, 30, (0, 1))),
                field(Context::Exif, 0x829a, Value::Rational(vec![(1, 250).into()])),
            ],
            None,
        )
    }

    #[test]
    fn from_fields_splits_groups() {
        let store = sample_store();
        assert_eq!(store.group(TagGroup::Primary).len(), 3);
        assert_eq!(store.group(TagGroup::Gps).len(), 2);
        assert_eq!(store.carried_fields().len(), 1);
    }

    #[test]
    fn known_codes_are_typed_and_unknown_codes_are_foreign() {
        let store = sample_store();
        assert_eq!(
            store.typed(EditableTag::ImageWidth),
            Some(&TagValue::Integer(640))
        );
        assert_eq!(
            store.typed(EditableTag::GpsLatitudeRef),
            Some(&TagValue::Reference(b'S'))
        );
        assert!(matches!(
            store.group(TagGroup::Primary).get(&0x0112),
            Some(StoredValue::Foreign(Value::Short(_)))
        ));
    }

    #[test]
    fn mismatched_shape_stays_foreign() {
        let store = MetadataStore::from_fields(
            vec![field(
                Context::Gps,
                0x0002,
                Value::Rational(vec![(1, 0).into(), (0, 1).into(), (0, 1).into()]),
            )],
            None,
        );
        assert!(matches!(
            store.get(EditableTag::GpsLatitude),
            Some(StoredValue::Foreign(_))
        ));
        assert_abs_diff_eq!(store.latitude(), 0.0);
    }

    #[test]
    fn latitude_applies_south_reference() {
        assert_abs_diff_eq!(sample_store().latitude(), -12.5, epsilon = F64_EPSILON);
    }

    #[test]
    fn latitude_north_is_positive() {
        let mut store = sample_store();
        store.apply_edits(&EditRequest::new().with("GPSLatitudeRef", "N"));
        assert_abs_diff_eq!(store.latitude(), 12.5, epsilon = F64_EPSILON);
    }

    #[test]
    fn absent_coordinates_are_zero() {
        let store = MetadataStore::new();
        assert_abs_diff_eq!(store.latitude(), 0.0);
        assert_abs_diff_eq!(store.longitude(), 0.0);
        assert!(store.location().is_null_island());
    }

    #[test]
    fn longitude_without_reference_is_unsigned() {
        let mut store = MetadataStore::new();
        store.apply_edits(&EditRequest::new().with("GPSLongitude", "-2.5"));
        assert_abs_diff_eq!(store.longitude(), 2.5, epsilon = F64_EPSILON);

        store.apply_edits(&EditRequest::new().with("GPSLongitudeRef", "W"));
        assert_abs_diff_eq!(store.longitude(), -2.5, epsilon = F64_EPSILON);
    }

    #[test]
    fn partial_failure_merge_applies_valid_edits_only() {
        let mut store = sample_store();
        let request = EditRequest::new()
            .with("Make", "Nikon")
            .with("ImageWidth", "oops");

        let report = store.apply_edits(&request);

        assert_eq!(report.applied, vec![EditableTag::Make]);
        assert_eq!(report.rejected.len(), 1);
        assert_eq!(report.rejected[0].tag(), Some("ImageWidth"));
        assert_eq!(
            store.typed(EditableTag::Make),
            Some(&TagValue::Text(b"Nikon".to_vec()))
        );
        assert_eq!(
            store.typed(EditableTag::ImageWidth),
            Some(&TagValue::Integer(640))
        );
    }

    #[test]
    fn merge_inserts_missing_tags() {
        let mut store = MetadataStore::new();
        let report = store.apply_edits(&EditRequest::new().with("Model", "EOS R5"));
        assert!(report.is_clean());
        assert_eq!(store.display_value(EditableTag::Model), "EOS R5");
    }

    #[test]
    fn merge_is_idempotent() {
        let outcomes = validate_request(
            &EditRequest::new()
                .with("Make", "Canon")
                .with("GPSLatitude", "48.8566"),
        );

        let mut once = sample_store();
        once.merge(&outcomes);
        let mut twice = sample_store();
        twice.merge(&outcomes);
        twice.merge(&outcomes);

        assert_eq!(once.decode_for_display(), twice.decode_for_display());
        for tag in EditableTag::ALL {
            assert_eq!(once.typed(tag), twice.typed(tag));
        }
        assert_eq!(
            once.group(TagGroup::Primary).keys().collect::<Vec<_>>(),
            twice.group(TagGroup::Primary).keys().collect::<Vec<_>>()
        );
    }

    #[test]
    fn empty_values_leave_store_untouched() {
        let mut store = sample_store();
        let report = store.apply_edits(&EditRequest::new().with("Make", ""));
        assert!(report.applied.is_empty());
        assert!(report.rejected.is_empty());
        assert_eq!(store.display_value(EditableTag::Make), "Canon");
    }

    #[test]
    fn decode_for_display_lists_every_tag() {
        let rows = sample_store().decode_for_display();
        assert_eq!(rows.len(), EditableTag::ALL.len());

        let value = |tag| rows.iter().find(|r| r.tag == tag).unwrap().value.clone();
        assert_eq!(value(EditableTag::ImageWidth), "640");
        assert_eq!(value(EditableTag::Make), "Canon");
        assert_eq!(value(EditableTag::GpsLatitudeRef), "S");
        assert_eq!(value(EditableTag::GpsLatitude), "12.5");
        assert_eq!(value(EditableTag::Model), "");
        assert_eq!(value(EditableTag::GpsLongitude), "");
    }
}
