use reqwest::blocking::Client;
use reqwest::Url;
use std::io;
use std::path::Path;
use std::time::Duration;

use crate::error::{FetchError, Result};

pub(crate) const PART_SUFFIX: &str = ".part";

/// Blocking client with no overall request timeout; large checkpoints can
/// take longer than reqwest's 30 second default.
pub fn client() -> Result<Client> {
    Client::builder()
        .timeout(None::<Duration>)
        .build()
        .map_err(FetchError::Client)
}

/// Downloads `url` to `output_path`, returning the number of bytes received.
///
/// The body is streamed into a hidden temporary file beside `output_path` and
/// renamed over it once complete, so a failed transfer never leaves a
/// truncated file at the target path.
pub fn download_file(client: &Client, url: &Url, output_path: &Path) -> Result<u64> {
    log::info!("Downloading from {} to {:?}", url, output_path);

    let mut response = client
        .get(url.clone())
        .send()
        .map_err(|source| FetchError::Request {
            url: url.to_string(),
            source,
        })?;

    log::debug!("Response status: {}", response.status());
    if !response.status().is_success() {
        return Err(FetchError::Status {
            url: url.to_string(),
            status: response.status(),
        });
    }

    let mut part = part_file(output_path)?;

    let bytes = io::copy(&mut response, part.as_file_mut()).map_err(|source| {
        FetchError::Transfer {
            path: output_path.to_path_buf(),
            source,
        }
    })?;

    part.persist(output_path)
        .map_err(|e| FetchError::Persist {
            path: output_path.to_path_buf(),
            source: e.error,
        })?;

    log::info!("Download completed: {} bytes", bytes);
    Ok(bytes)
}

/// Directory and file name prefix used for the in-progress `.part` files of `output_path`.
pub(crate) fn part_location(output_path: &Path) -> (&Path, String) {
    let dir = output_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let prefix = format!(
        ".{}.",
        output_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    );
    (dir, prefix)
}

fn part_file(output_path: &Path) -> Result<tempfile::NamedTempFile> {
    let (dir, prefix) = part_location(output_path);

    let mut builder = tempfile::Builder::new();
    builder.prefix(&prefix).suffix(PART_SUFFIX);
    // Same mode as File::create; the umask still applies at open.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(std::fs::Permissions::from_mode(0o666));
    }

    builder
        .tempfile_in(dir)
        .map_err(|source| FetchError::Create {
            path: output_path.to_path_buf(),
            source,
        })
}
