// SPDX-License-Identifier: MPL-2.0
//! Internationalization (i18n) support for the application.
//!
//! This module provides localization capabilities using the Fluent localization system.
//! It handles language detection, translation file loading, and string formatting.
//!
//! # Features
//!
//! - Automatic locale detection from CLI, config, or system settings
//! - Translation files embedded from `assets/i18n/` at build time
//! - Placeholder substitution for messages such as validation errors
//! - Fallback to `en-US` when no preferred locale is shipped

pub mod fluent;

pub use fluent::I18n;
