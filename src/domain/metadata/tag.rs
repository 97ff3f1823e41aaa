// SPDX-License-Identifier: MPL-2.0
//! The fixed set of editable EXIF tags.
//!
//! Each [`EditableTag`] variant carries its IFD group, on-disk tag code,
//! display category, and the pair of functions that turn raw user input into
//! a [`TagValue`] ([`EditableTag::validate`]) and a stored value back into a
//! display string ([`EditableTag::decode`]).

use super::validation;
use super::value::TagValue;
use crate::domain::error::MetadataError;
use std::fmt;
use std::str::FromStr;

// =============================================================================
// TagGroup / TagCategory
// =============================================================================

/// IFD group a tag code belongs to. Each group has its own code space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TagGroup {
    /// 0th IFD: primary image attributes.
    Primary,
    /// GPS IFD.
    Gps,
}

impl TagGroup {
    pub const ALL: [TagGroup; 2] = [TagGroup::Primary, TagGroup::Gps];
}

impl fmt::Display for TagGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TagGroup::Primary => write!(f, "Primary"),
            TagGroup::Gps => write!(f, "GPS"),
        }
    }
}

/// Panel a tag is shown in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TagCategory {
    Image,
    Location,
}

impl TagCategory {
    /// Categories in panel order.
    pub const ALL: [TagCategory; 2] = [TagCategory::Image, TagCategory::Location];

    /// Returns the i18n key for the category title.
    #[must_use]
    pub const fn i18n_key(self) -> &'static str {
        match self {
            TagCategory::Image => "category-image",
            TagCategory::Location => "category-location",
        }
    }
}

// =============================================================================
// EditableTag
// =============================================================================

/// One editable EXIF field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EditableTag {
    ImageWidth,
    ImageLength,
    Make,
    Model,
    DateTime,
    GpsLatitudeRef,
    GpsLatitude,
    GpsLongitudeRef,
    GpsLongitude,
}

impl EditableTag {
    /// All tags in display order.
    pub const ALL: [EditableTag; 9] = [
        EditableTag::ImageWidth,
        EditableTag::ImageLength,
        EditableTag::Make,
        EditableTag::Model,
        EditableTag::DateTime,
        EditableTag::GpsLatitudeRef,
        EditableTag::GpsLatitude,
        EditableTag::GpsLongitudeRef,
        EditableTag::GpsLongitude,
    ];

    /// EXIF tag name, as used in edit requests.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            EditableTag::ImageWidth => "ImageWidth",
            EditableTag::ImageLength => "ImageLength",
            EditableTag::Make => "Make",
            EditableTag::Model => "Model",
            EditableTag::DateTime => "DateTime",
            EditableTag::GpsLatitudeRef => "GPSLatitudeRef",
            EditableTag::GpsLatitude => "GPSLatitude",
            EditableTag::GpsLongitudeRef => "GPSLongitudeRef",
            EditableTag::GpsLongitude => "GPSLongitude",
        }
    }

    #[must_use]
    pub const fn group(self) -> TagGroup {
        match self {
            EditableTag::ImageWidth
            | EditableTag::ImageLength
            | EditableTag::Make
            | EditableTag::Model
            | EditableTag::DateTime => TagGroup::Primary,
            EditableTag::GpsLatitudeRef
            | EditableTag::GpsLatitude
            | EditableTag::GpsLongitudeRef
            | EditableTag::GpsLongitude => TagGroup::Gps,
        }
    }

    /// Tag code within [`Self::group`].
    #[must_use]
    pub const fn code(self) -> u16 {
        match self {
            EditableTag::ImageWidth => 0x0100,
            EditableTag::ImageLength => 0x0101,
            EditableTag::Make => 0x010f,
            EditableTag::Model => 0x0110,
            EditableTag::DateTime => 0x0132,
            EditableTag::GpsLatitudeRef => 0x0001,
            EditableTag::GpsLatitude => 0x0002,
            EditableTag::GpsLongitudeRef => 0x0003,
            EditableTag::GpsLongitude => 0x0004,
        }
    }

    #[must_use]
    pub const fn category(self) -> TagCategory {
        match self.group() {
            TagGroup::Primary => TagCategory::Image,
            TagGroup::Gps => TagCategory::Location,
        }
    }

    /// Returns the i18n key of the field label.
    #[must_use]
    pub const fn i18n_key(self) -> &'static str {
        match self {
            EditableTag::ImageWidth => "tag-image-width",
            EditableTag::ImageLength => "tag-image-length",
            EditableTag::Make => "tag-make",
            EditableTag::Model => "tag-model",
            EditableTag::DateTime => "tag-date-time",
            EditableTag::GpsLatitudeRef => "tag-gps-latitude-ref",
            EditableTag::GpsLatitude => "tag-gps-latitude",
            EditableTag::GpsLongitudeRef => "tag-gps-longitude-ref",
            EditableTag::GpsLongitude => "tag-gps-longitude",
        }
    }

    /// Looks up a tag by name.
    ///
    /// # Errors
    ///
    /// Returns [`MetadataError::UnknownTag`] when `name` is not editable.
    pub fn lookup(name: &str) -> Result<Self, MetadataError> {
        Self::ALL
            .into_iter()
            .find(|tag| tag.name() == name)
            .ok_or_else(|| MetadataError::UnknownTag(name.to_string()))
    }

    /// Inverse lookup from a stored code. Codes outside the set return `None`.
    #[must_use]
    pub fn from_code(group: TagGroup, code: u16) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|tag| tag.group() == group && tag.code() == code)
    }

    /// Validates raw user input and converts it to the tag's binary form.
    ///
    /// # Errors
    ///
    /// Returns [`MetadataError::Format`] when `raw` breaks the tag's rule.
    pub fn validate(self, raw: &str) -> Result<TagValue, MetadataError> {
        match self {
            EditableTag::ImageWidth | EditableTag::ImageLength => {
                validation::parse_integer(self, raw)
            }
            EditableTag::Make | EditableTag::Model => validation::parse_text(self, raw),
            EditableTag::DateTime => validation::parse_date_time(self, raw),
            EditableTag::GpsLatitude | EditableTag::GpsLongitude => {
                validation::parse_coordinate(self, raw)
            }
            EditableTag::GpsLatitudeRef => validation::parse_reference(self, raw, b"NS"),
            EditableTag::GpsLongitudeRef => validation::parse_reference(self, raw, b"EW"),
        }
    }

    /// Produces the display string for a stored value.
    ///
    /// Dimensions have no decoder and show the raw value. Text tags show the
    /// decoded string, coordinates show decimal degrees without the sign.
    /// A value whose shape does not fit the decoder is shown raw.
    #[must_use]
    pub fn decode(self, value: &TagValue) -> String {
        let decoded = match self {
            EditableTag::ImageWidth | EditableTag::ImageLength => None,
            EditableTag::Make
            | EditableTag::Model
            | EditableTag::DateTime
            | EditableTag::GpsLatitudeRef
            | EditableTag::GpsLongitudeRef => value.as_text(),
            EditableTag::GpsLatitude | EditableTag::GpsLongitude => value
                .as_coordinate()
                .map(|c| c.to_decimal().to_string()),
        };
        decoded.unwrap_or_else(|| value.to_string())
    }
}

impl fmt::Display for EditableTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for EditableTag {
    type Err = MetadataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::lookup(s)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::metadata::{CoordinateRational, Rational};

    #[test]
    fn names_and_codes_are_unique_within_group() {
        for (i, a) in EditableTag::ALL.iter().enumerate() {
            for b in &EditableTag::ALL[i + 1..] {
                assert_ne!(a.name(), b.name());
                assert!(a.group() != b.group() || a.code() != b.code());
            }
        }
    }

    #[test]
    fn lookup_by_name() {
        assert_eq!(EditableTag::lookup("Make"), Ok(EditableTag::Make));
        assert_eq!(
            "GPSLatitude".parse::<EditableTag>(),
            Ok(EditableTag::GpsLatitude)
        );
    }

    #[test]
    fn lookup_unknown_name_fails() {
        assert_eq!(
            EditableTag::lookup("Orientation"),
            Err(MetadataError::UnknownTag("Orientation".into()))
        );
        // Names are case sensitive
        assert!(EditableTag::lookup("make").is_err());
    }

    #[test]
    fn from_code_respects_group() {
        assert_eq!(
            EditableTag::from_code(TagGroup::Gps, 2),
            Some(EditableTag::GpsLatitude)
        );
        assert_eq!(EditableTag::from_code(TagGroup::Primary, 2), None);
        assert_eq!(
            EditableTag::from_code(TagGroup::Primary, 0x010f),
            Some(EditableTag::Make)
        );
        assert_eq!(EditableTag::from_code(TagGroup::Primary, 0x0112), None);
    }

    #[test]
    fn categories_follow_groups() {
        assert_eq!(EditableTag::Model.category(), TagCategory::Image);
        assert_eq!(EditableTag::GpsLongitudeRef.category(), TagCategory::Location);
    }

    #[test]
    fn decode_dimension_is_raw() {
        assert_eq!(EditableTag::ImageWidth.decode(&TagValue::Integer(4000)), "4000");
    }

    #[test]
    fn decode_text_tags() {
        assert_eq!(
            EditableTag::Make.decode(&TagValue::Text(b"Canon".to_vec())),
            "Canon"
        );
        assert_eq!(
            EditableTag::GpsLatitudeRef.decode(&TagValue::Reference(b'S')),
            "S"
        );
    }

    #[test]
    fn decode_coordinate_shows_decimal_degrees() {
        let c = CoordinateRational::new(
            Rational::whole(12),
            Rational::whole(30),
            Rational::ZERO,
        );
        assert_eq!(
            EditableTag::GpsLatitude.decode(&TagValue::Coordinate(c)),
            "12.5"
        );
    }

    #[test]
    fn decode_mismatched_shape_falls_back_to_raw() {
        assert_eq!(EditableTag::GpsLatitude.decode(&TagValue::Integer(3)), "3");
    }
}
