use reqwest::blocking::Client;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::download::{self, download_file, part_location, PART_SUFFIX};
use crate::error::{FetchError, Result};
use crate::target::Target;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchReport {
    pub path: PathBuf,
    /// Size on disk as reported by the filesystem.
    pub size: u64,
}

pub struct Fetcher {
    target: Target,
    client: Client,
}

impl Fetcher {
    pub fn new(target: Target) -> Result<Self> {
        Ok(Self::with_client(target, download::client()?))
    }

    pub fn with_client(target: Target, client: Client) -> Self {
        Self { target, client }
    }

    pub fn run(&self) -> Result<FetchReport> {
        let path = self.target.path();
        log::info!("Fetching {} into {:?}", self.target.url(), path);

        if clean_target(path)? {
            log::info!("Removed existing file {:?}", path);
        }
        let swept = sweep_part_files(path)?;
        if swept > 0 {
            log::warn!("Removed {} leftover partial download(s) of {:?}", swept, path);
        }

        download_file(&self.client, self.target.url(), path)?;

        let size = fs::metadata(path)
            .map_err(|source| FetchError::Metadata {
                path: path.to_path_buf(),
                source,
            })?
            .len();
        log::info!("File size of {:?}: {} bytes", path, size);

        Ok(FetchReport {
            path: path.to_path_buf(),
            size,
        })
    }
}

/// Removes the file at `path` if there is one. Returns whether anything was removed.
pub fn clean_target(path: &Path) -> Result<bool> {
    match fs::remove_file(path) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(source) => Err(FetchError::Clean {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Removes `.part` files left beside `path` by interrupted runs. Returns how many were removed.
pub fn sweep_part_files(path: &Path) -> Result<usize> {
    let (dir, prefix) = part_location(path);
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(0),
        Err(source) => {
            return Err(FetchError::Clean {
                path: dir.to_path_buf(),
                source,
            })
        }
    };

    let mut removed = 0;
    for entry in entries.flatten() {
        let name = entry.file_name();
        let name = name.to_string_lossy();
        if !(name.starts_with(&prefix) && name.ends_with(PART_SUFFIX)) {
            continue;
        }
        let part = entry.path();
        log::debug!("Removing leftover partial download {:?}", part);
        if clean_target(&part)? {
            removed += 1;
        }
    }
    Ok(removed)
}
