// SPDX-License-Identifier: MPL-2.0
//! Sample image download.
//!
//! When no image is given on the command line, a sample JPEG is downloaded
//! once into the cache directory and reused on later runs.

use crate::app::paths;
use crate::error::{Error, Result};
use futures_util::{Stream, StreamExt};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Filename of the cached sample image.
const SAMPLE_FILENAME: &str = "sample.jpg";

/// Suffix of the partial file written while downloading.
const PARTIAL_SUFFIX: &str = "part";

/// Returns the path where the sample image is cached.
pub fn sample_image_path() -> Option<PathBuf> {
    paths::get_cache_dir().map(|mut p| {
        p.push(SAMPLE_FILENAME);
        p
    })
}

/// Checks whether a usable sample image exists at `path`.
pub fn is_sample_cached(path: &Path) -> bool {
    match std::fs::read(path) {
        Ok(data) => super::container::is_jpeg(&data),
        Err(_) => false,
    }
}

/// Returns the cached sample image, downloading it from `url` first if needed.
pub async fn ensure_sample_image(url: &str) -> Result<PathBuf> {
    let path = sample_image_path()
        .ok_or_else(|| Error::Config("No data directory available".to_string()))?;

    if is_sample_cached(&path) {
        debug!(path = %path.display(), "using cached sample image");
        return Ok(path);
    }

    info!(url, "downloading sample image");
    let bytes = fetch_sample_image(url, &path).await?;
    info!(bytes, path = %path.display(), "sample image downloaded");
    Ok(path)
}

/// Downloads `url` to `dest`.
///
/// The body goes to a partial file first and is moved into place only once
/// it is complete and looks like a JPEG. Returns the number of bytes written.
pub async fn fetch_sample_image(url: &str, dest: &Path) -> Result<u64> {
    let client = reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::limited(10))
        .user_agent(concat!("ExifRetouch/", env!("CARGO_PKG_VERSION")))
        .build()?;

    let response = client.get(url).send().await?;
    if !response.status().is_success() {
        return Err(Error::Network(format!("HTTP status: {}", response.status())));
    }

    if let Some(parent) = dest.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let partial = dest.with_extension(PARTIAL_SUFFIX);
    let (downloaded, header) = write_partial(response.bytes_stream(), &partial).await?;

    if !super::container::is_jpeg(&header) {
        discard_partial(&partial);
        return Err(Error::Network(format!(
            "Downloaded file is not a JPEG image ({downloaded} bytes)"
        )));
    }

    std::fs::rename(&partial, dest)?;
    Ok(downloaded)
}

/// Streams `chunks` into `partial`.
///
/// Returns the number of bytes written and the first two of them. The file
/// is removed when a chunk or a write fails.
async fn write_partial<S, B, E>(mut chunks: S, partial: &Path) -> Result<(u64, Vec<u8>)>
where
    S: Stream<Item = std::result::Result<B, E>> + Unpin,
    B: AsRef<[u8]>,
    Error: From<E>,
{
    let written = async {
        let mut file = std::fs::File::create(partial)?;
        let mut downloaded: u64 = 0;
        let mut header = Vec::with_capacity(2);

        while let Some(chunk) = chunks.next().await {
            let chunk = chunk?;
            let chunk = chunk.as_ref();
            file.write_all(chunk)?;
            if header.len() < 2 {
                header.extend(chunk.iter().take(2 - header.len()));
            }
            downloaded += chunk.len() as u64;
        }
        Ok::<_, Error>((downloaded, header))
    }
    .await;

    if written.is_err() {
        discard_partial(partial);
    }
    written
}

fn discard_partial(partial: &Path) {
    if let Err(e) = std::fs::remove_file(partial) {
        warn!(path = %partial.display(), "failed to remove partial download: {e}");
    }
}
