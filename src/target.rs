use reqwest::Url;
use std::path::{Path, PathBuf};

use crate::error::{FetchError, Result};

pub const MODEL_URL: &str = "https://ml-site.cdn-apple.com/models/sharp/sharp_2572gikvuh.pt";
pub const MODEL_FILE_NAME: &str = "sharp_2572gikvuh.pt";

/// A remote resource and the local path it is saved to.
///
/// The local file is named after the last path segment of the URL.
#[derive(Debug, Clone)]
pub struct Target {
    url: Url,
    path: PathBuf,
}

impl Target {
    /// The SHARP checkpoint, saved into the current working directory.
    pub fn model() -> Result<Self> {
        Ok(Self {
            url: parse_url(MODEL_URL)?,
            path: PathBuf::from(MODEL_FILE_NAME),
        })
    }

    pub fn from_url(url: &str) -> Result<Self> {
        let url = parse_url(url)?;
        let path = PathBuf::from(file_name_of(&url)?);
        Ok(Self { url, path })
    }

    pub fn in_dir(url: &str, dir: &Path) -> Result<Self> {
        let url = parse_url(url)?;
        let path = dir.join(file_name_of(&url)?);
        Ok(Self { url, path })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn file_name(&self) -> &str {
        self.path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or_default()
    }
}

fn parse_url(url: &str) -> Result<Url> {
    Url::parse(url).map_err(|e| FetchError::InvalidUrl {
        url: url.to_string(),
        reason: e.to_string(),
    })
}

fn file_name_of(url: &Url) -> Result<String> {
    url.path_segments()
        .and_then(|mut segments| segments.rfind(|s| !s.is_empty()))
        .filter(|name| *name != "." && *name != "..")
        .map(str::to_string)
        .ok_or_else(|| FetchError::NoFileName {
            url: url.to_string(),
        })
}
