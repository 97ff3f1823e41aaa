// SPDX-License-Identifier: MPL-2.0
//! Command-line front end: wiring between configuration, localization, edit
//! sessions and the text panels.
//!
//! [`run`] resolves directories and settings, then hands over to [`execute`],
//! which does the actual work against explicit writers so it can be driven
//! from tests.

pub mod paths;
mod view;

pub use view::{error_message, rejection_lines, view_location, view_panel, ViewContext};

use crate::config::{self, Config};
use crate::domain::error::MetadataError;
use crate::domain::metadata::EditRequest;
use crate::error::{Error, Result};
use crate::i18n::I18n;
use crate::media::{edited_output_path, sample, EditSession, TiffCodec};
use std::io::Write;
use std::path::PathBuf;
use tracing::{debug, warn};

/// Runtime flags passed in from the command line.
#[derive(Debug, Default, Clone)]
pub struct Flags {
    /// Optional locale override in BCP-47 form (e.g. `fr`, `en-US`).
    pub lang: Option<String>,
    /// Image to edit. The sample image is used when absent.
    pub file_path: Option<String>,
    /// Raw `Tag=Value` assignments, in command-line order.
    pub edits: Vec<String>,
    /// Where to write the edited image. Defaults to `<stem>-edited.<ext>`.
    pub output: Option<String>,
    /// Optional data directory override (sample image cache).
    /// Takes precedence over `EXIF_RETOUCH_DATA_DIR` environment variable.
    pub data_dir: Option<String>,
    /// Optional config directory override (for settings.toml).
    /// Takes precedence over `EXIF_RETOUCH_CONFIG_DIR` environment variable.
    pub config_dir: Option<String>,
}

/// Entry point used by the binary.
pub fn run(flags: Flags) -> Result<()> {
    paths::init_cli_overrides(flags.data_dir.clone(), flags.config_dir.clone());

    let config = config::load().unwrap_or_else(|err| {
        warn!("failed to load settings, using defaults: {err}");
        Config::default()
    });

    let stdout = std::io::stdout();
    let stderr = std::io::stderr();
    execute(&flags, &config, &mut stdout.lock(), &mut stderr.lock())
}

/// Opens the image, prints its panels and applies the requested edits.
///
/// Without edits the panels are printed and nothing is written. Edits on a
/// read-only container fail before any validation. Otherwise each rejection
/// is reported on `err`; when at least one edit was applied the edited copy
/// is saved and the updated panels are printed.
pub fn execute(
    flags: &Flags,
    config: &Config,
    out: &mut impl Write,
    err: &mut impl Write,
) -> Result<()> {
    let i18n = I18n::new(flags.lang.clone(), config);
    let image_path = match &flags.file_path {
        Some(path) => PathBuf::from(path),
        None => {
            let path = fetch_sample(&i18n, config, out)?;
            writeln!(
                out,
                "{}",
                i18n.tr_with_args("sample-using", &[("path", &path.display().to_string())])
            )?;
            path
        }
    };

    let codec = TiffCodec::new(config.little_endian());
    let mut session = EditSession::open_with(&image_path, codec)?;
    if !flags.edits.is_empty() && !session.is_writable() {
        let unsupported = MetadataError::UnsupportedFormat;
        writeln!(err, "{}", error_message(&i18n, &unsupported))?;
        return Err(unsupported.into());
    }

    let (request, malformed) = build_request(&flags.edits);
    for assignment in &malformed {
        writeln!(
            err,
            "{}",
            i18n.tr_with_args("error-invalid-assignment", &[("assignment", assignment)])
        )?;
    }

    if request.is_empty() {
        if malformed.is_empty() {
            print_panels(&i18n, &session, out)?;
        } else {
            writeln!(err, "{}", i18n.tr("edit-nothing-applied"))?;
        }
        return Ok(());
    }

    let report = session.apply(&request);
    for line in rejection_lines(&i18n, &report.rejected) {
        writeln!(err, "{line}")?;
    }
    if report.applied.is_empty() {
        writeln!(err, "{}", i18n.tr("edit-nothing-applied"))?;
        return Ok(());
    }

    let output = flags
        .output
        .as_ref()
        .map_or_else(|| edited_output_path(&image_path), PathBuf::from);
    if let Err(save_error) = session.save_to(&output) {
        if let Error::Metadata(metadata_error) = &save_error {
            writeln!(err, "{}", error_message(&i18n, metadata_error))?;
        }
        return Err(save_error);
    }

    writeln!(
        out,
        "{}",
        i18n.tr_with_args("edit-applied", &[("count", &report.applied.len().to_string())])
    )?;
    writeln!(
        out,
        "{}",
        i18n.tr_with_args("save-complete", &[("path", &output.display().to_string())])
    )?;
    writeln!(out)?;
    print_panels(&i18n, &session, out)
}

/// Splits `Tag=Value` assignments into a request and the malformed leftovers.
fn build_request(assignments: &[String]) -> (EditRequest, Vec<String>) {
    let mut request = EditRequest::new();
    let mut malformed = Vec::new();
    for assignment in assignments {
        match EditRequest::parse_assignment(assignment) {
            Some((tag, raw)) => request.set(tag, raw),
            None => malformed.push(assignment.clone()),
        }
    }
    debug!(edits = request.len(), malformed = malformed.len(), "parsed edit request");
    (request, malformed)
}

fn print_panels(i18n: &I18n, session: &EditSession, out: &mut impl Write) -> Result<()> {
    let ctx = ViewContext {
        i18n,
        store: session.store(),
    };
    write!(out, "{}", view::view(&ctx))?;
    Ok(())
}

/// Downloads the sample image on a current-thread runtime.
fn fetch_sample(i18n: &I18n, config: &Config, out: &mut impl Write) -> Result<PathBuf> {
    let url = config.sample_image_url();
    if let Some(path) = sample::sample_image_path().filter(|p| sample::is_sample_cached(p)) {
        return Ok(path);
    }
    writeln!(out, "{}", i18n.tr_with_args("sample-downloading", &[("url", url)]))?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| Error::Io(e.to_string()))?;
    runtime.block_on(sample::ensure_sample_image(url))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::metadata::EditableTag;
    use crate::test_utils::MINIMAL_JPEG;
    use tempfile::tempdir;

    fn flags_for(path: &std::path::Path, edits: &[&str]) -> Flags {
        Flags {
            lang: Some("en-US".to_string()),
            file_path: Some(path.display().to_string()),
            edits: edits.iter().map(ToString::to_string).collect(),
            ..Flags::default()
        }
    }

    #[test]
    fn build_request_separates_malformed_assignments() {
        let (request, malformed) = build_request(&[
            "Make=Canon".to_string(),
            "nonsense".to_string(),
            "Model=".to_string(),
        ]);
        assert_eq!(request.len(), 2);
        assert_eq!(malformed, vec!["nonsense".to_string()]);
    }

    #[test]
    fn execute_without_edits_prints_panels_only() {
        let dir = tempdir().expect("tempdir");
        let image = dir.path().join("dog.jpg");
        std::fs::write(&image, MINIMAL_JPEG).expect("write");

        let (mut out, mut err) = (Vec::new(), Vec::new());
        execute(&flags_for(&image, &[]), &Config::default(), &mut out, &mut err)
            .expect("execute");

        let out = String::from_utf8(out).expect("utf8");
        assert!(out.contains("[Image]"));
        assert!(out.contains("No GPS location recorded"));
        assert!(err.is_empty());
        assert!(!dir.path().join("dog-edited.jpg").exists());
    }

    #[test]
    fn execute_reports_rejections_and_saves_accepted_edits() {
        let dir = tempdir().expect("tempdir");
        let image = dir.path().join("dog.jpg");
        std::fs::write(&image, MINIMAL_JPEG).expect("write");

        let (mut out, mut err) = (Vec::new(), Vec::new());
        execute(
            &flags_for(&image, &["Make=Canon", "ImageWidth=oops"]),
            &Config::default(),
            &mut out,
            &mut err,
        )
        .expect("execute");

        let err = String::from_utf8(err).expect("utf8");
        assert_eq!(err.lines().count(), 1);
        assert!(err.contains("ImageWidth"));

        let out = String::from_utf8(out).expect("utf8");
        assert!(out.contains("Tags updated: 1"));

        let saved = EditSession::open(dir.path().join("dog-edited.jpg")).expect("reopen");
        assert_eq!(saved.store().display_value(EditableTag::Make), "Canon");
        assert_eq!(std::fs::read(&image).expect("read"), MINIMAL_JPEG);
    }

    #[test]
    fn execute_with_only_rejections_writes_nothing() {
        let dir = tempdir().expect("tempdir");
        let image = dir.path().join("dog.jpg");
        std::fs::write(&image, MINIMAL_JPEG).expect("write");
        let output = dir.path().join("out.jpg");

        let mut flags = flags_for(&image, &["GPSLatitudeRef=X"]);
        flags.output = Some(output.display().to_string());
        let (mut out, mut err) = (Vec::new(), Vec::new());
        execute(&flags, &Config::default(), &mut out, &mut err).expect("execute");

        assert!(!output.exists());
        let err = String::from_utf8(err).expect("utf8");
        assert!(err.contains("GPSLatitudeRef"));
        assert!(err.contains("No change was applied"));
    }

    #[test]
    fn execute_rejects_edits_on_read_only_container() {
        let dir = tempdir().expect("tempdir");
        let image = dir.path().join("scan.png");
        let mut png = b"\x89PNG\r\n\x1a\n".to_vec();
        png.extend_from_slice(&[0, 0, 0, 0]);
        png.extend_from_slice(b"IEND");
        png.extend_from_slice(&[0xAE, 0x42, 0x60, 0x82]);
        std::fs::write(&image, &png).expect("write");

        let (mut out, mut err) = (Vec::new(), Vec::new());
        let result = execute(
            &flags_for(&image, &["Make=Canon", "ImageWidth=oops"]),
            &Config::default(),
            &mut out,
            &mut err,
        );

        assert!(matches!(result, Err(Error::Metadata(MetadataError::UnsupportedFormat))));
        let err = String::from_utf8(err).expect("utf8");
        assert_eq!(err.trim_end(), "This image format does not support writing EXIF data");
        assert!(out.is_empty());
        assert!(!dir.path().join("scan-edited.png").exists());
    }

    #[test]
    fn execute_on_missing_image_fails() {
        let dir = tempdir().expect("tempdir");
        let (mut out, mut err) = (Vec::new(), Vec::new());
        let result = execute(
            &flags_for(&dir.path().join("missing.jpg"), &[]),
            &Config::default(),
            &mut out,
            &mut err,
        );
        assert!(matches!(result, Err(Error::Io(_))));
    }
}
