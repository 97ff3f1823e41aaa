// SPDX-License-Identifier: MPL-2.0
//! Metadata domain types.
//!
//! This module provides the pure side of EXIF editing:
//! - [`EditableTag`]: the fixed registry of editable tags, with their group,
//!   code, validation rule and display decoder
//! - [`Rational`] and [`CoordinateRational`]: exact fractions and DMS triplets
//! - [`TagValue`]: typed values produced by validation
//! - [`validate`] / [`validate_request`]: per-tag validation of raw input
//! - [`GpsCoordinates`]: signed decimal location for map consumers

mod coordinate;
mod rational;
mod tag;
mod types;
mod validation;
mod value;

pub use coordinate::{apply_reference, CoordinateRational};
pub use rational::{Rational, RationalError};
pub use tag::{EditableTag, TagCategory, TagGroup};
pub use types::GpsCoordinates;
pub use validation::{validate, validate_request, EditRequest, TagOutcome, ValidationOutcome};
pub use value::TagValue;
