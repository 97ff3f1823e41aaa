// SPDX-License-Identifier: MPL-2.0
//! Centralized path management for application directories.
//!
//! # Path Resolution Order
//!
//! Paths are resolved in the following priority order:
//! 1. **Explicit override** - parameter to `_with_override()` functions (for tests)
//! 2. **CLI arguments** (`--data-dir`, `--config-dir`) - set via [`init_cli_overrides`]
//! 3. **Environment variables** (`EXIF_RETOUCH_DATA_DIR`, `EXIF_RETOUCH_CONFIG_DIR`)
//! 4. **Platform default** - via `dirs` crate
//!
//! The data directory holds the downloaded sample image cache; the config
//! directory holds `settings.toml`.

use std::path::PathBuf;
use std::sync::OnceLock;

/// Application name used for directory naming.
const APP_NAME: &str = "ExifRetouch";

/// Subdirectory of the data directory holding downloaded assets.
const CACHE_SUBDIR: &str = "cache";

/// Environment variable to override the data directory.
pub const ENV_DATA_DIR: &str = "EXIF_RETOUCH_DATA_DIR";

/// Environment variable to override the config directory.
pub const ENV_CONFIG_DIR: &str = "EXIF_RETOUCH_CONFIG_DIR";

/// Global CLI override for data directory (set once at startup).
static CLI_DATA_DIR: OnceLock<Option<PathBuf>> = OnceLock::new();

/// Global CLI override for config directory (set once at startup).
static CLI_CONFIG_DIR: OnceLock<Option<PathBuf>> = OnceLock::new();

/// Initializes CLI overrides for data and config directories.
///
/// Call once at startup, before any path is resolved. Later calls are
/// ignored and return `false`.
pub fn init_cli_overrides(data_dir: Option<String>, config_dir: Option<String>) -> bool {
    let data_set = CLI_DATA_DIR.set(data_dir.map(PathBuf::from)).is_ok();
    let config_set = CLI_CONFIG_DIR.set(config_dir.map(PathBuf::from)).is_ok();
    data_set && config_set
}

/// Shared resolution: override, then CLI, then environment, then platform.
fn resolve_dir(
    override_path: Option<PathBuf>,
    cli: &OnceLock<Option<PathBuf>>,
    env_var: &str,
    platform: fn() -> Option<PathBuf>,
) -> Option<PathBuf> {
    if let Some(path) = override_path {
        return Some(path);
    }

    if let Some(path) = cli.get().and_then(Clone::clone) {
        return Some(path);
    }

    if let Ok(env_path) = std::env::var(env_var) {
        if !env_path.is_empty() {
            return Some(PathBuf::from(env_path));
        }
    }

    platform().map(|mut path| {
        path.push(APP_NAME);
        path
    })
}

/// Returns the application data directory path.
///
/// Platform defaults:
/// - Linux: `~/.local/share/ExifRetouch/`
/// - macOS: `~/Library/Application Support/ExifRetouch/`
/// - Windows: `C:\Users\<User>\AppData\Roaming\ExifRetouch\`
pub fn get_app_data_dir() -> Option<PathBuf> {
    get_app_data_dir_with_override(None)
}

/// Returns the application data directory path with an optional override.
pub fn get_app_data_dir_with_override(override_path: Option<PathBuf>) -> Option<PathBuf> {
    resolve_dir(override_path, &CLI_DATA_DIR, ENV_DATA_DIR, dirs::data_dir)
}

/// Returns the application config directory path.
pub fn get_app_config_dir() -> Option<PathBuf> {
    get_app_config_dir_with_override(None)
}

/// Returns the application config directory path with an optional override.
pub fn get_app_config_dir_with_override(override_path: Option<PathBuf>) -> Option<PathBuf> {
    resolve_dir(override_path, &CLI_CONFIG_DIR, ENV_CONFIG_DIR, dirs::config_dir)
}

/// Returns the directory where downloaded assets are cached.
pub fn get_cache_dir() -> Option<PathBuf> {
    get_app_data_dir().map(|mut path| {
        path.push(CACHE_SUBDIR);
        path
    })
}
