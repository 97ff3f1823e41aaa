// SPDX-License-Identifier: MPL-2.0
use exif_retouch::app::{self, Flags};
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const USAGE: &str = "\
Usage: exif-retouch [OPTIONS] [IMAGE]

Shows the EXIF tags of IMAGE (a sample photo when omitted) and applies edits.

Options:
  --set TAG=VALUE     Edit a tag, may be repeated (e.g. --set Make=Canon)
  -o, --output PATH   Where to write the edited image (default: <name>-edited.<ext>)
  --lang LOCALE       Interface language (en-US, fr)
  --data-dir DIR      Directory for downloaded assets
  --config-dir DIR    Directory holding settings.toml
  -h, --help          Print this help
";

fn parse_flags() -> Result<Option<Flags>, pico_args::Error> {
    let mut args = pico_args::Arguments::from_env();
    if args.contains(["-h", "--help"]) {
        return Ok(None);
    }

    let flags = Flags {
        lang: args.opt_value_from_str("--lang")?,
        edits: args.values_from_str("--set")?,
        output: args.opt_value_from_str(["-o", "--output"])?,
        data_dir: args.opt_value_from_str("--data-dir")?,
        config_dir: args.opt_value_from_str("--config-dir")?,
        file_path: args
            .finish()
            .into_iter()
            .next()
            .and_then(|s| s.into_string().ok()),
    };
    Ok(Some(flags))
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let flags = match parse_flags() {
        Ok(Some(flags)) => flags,
        Ok(None) => {
            print!("{USAGE}");
            return ExitCode::SUCCESS;
        }
        Err(err) => {
            eprintln!("{err}\n\n{USAGE}");
            return ExitCode::from(2);
        }
    };

    match app::run(flags) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}
