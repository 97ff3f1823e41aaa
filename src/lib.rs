// SPDX-License-Identifier: MPL-2.0
//! `exif_retouch` edits the EXIF metadata of images from the command line.
//!
//! It reads the tag dictionary out of an image, shows a fixed set of image
//! and GPS tags in localized panels, validates textual edits against each
//! tag's format, converts GPS coordinates between decimal degrees and DMS
//! rationals, and writes the merged dictionary back into a copy of the image.

#![doc(html_root_url = "https://docs.rs/exif_retouch/0.1.0")]

pub mod app;
pub mod config;
pub mod domain;
pub mod error;
pub mod i18n;
pub mod media;

#[cfg(test)]
mod test_utils;
