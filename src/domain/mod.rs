// SPDX-License-Identifier: MPL-2.0
//! Domain layer - Core business logic with ZERO external dependencies.
//!
//! This module contains pure domain types, value objects, and business rules.
//! It has no dependencies on external crates (except `std`) to ensure
//! testability and architectural purity.
//!
//! # Modules
//!
//! - [`error`]: Domain error types ([`MetadataError`](error::MetadataError))
//! - [`metadata`]: Tag registry, rationals, coordinates and validation
//!   ([`EditableTag`](metadata::EditableTag), [`Rational`](metadata::Rational),
//!   [`CoordinateRational`](metadata::CoordinateRational),
//!   [`GpsCoordinates`](metadata::GpsCoordinates))

pub mod error;
pub mod metadata;
