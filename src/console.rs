use std::io::{self, Write};

use crate::fetch::Fetcher;
use crate::target::Target;

pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILURE: i32 = 1;

/// Fetches `target`, writing the human-readable progress lines to `out`.
///
/// Returns the process exit code. Only a failure to write to `out` is an `Err`.
pub fn fetch_and_report<W: Write>(target: Target, out: &mut W) -> io::Result<i32> {
    writeln!(out, "Downloading {} to {}...", target.url(), target.file_name())?;
    out.flush()?;

    match Fetcher::new(target).and_then(|fetcher| fetcher.run()) {
        Ok(report) => {
            log::info!("Fetch completed successfully");
            writeln!(out, "Download complete.")?;
            writeln!(out, "File size: {} bytes", report.size)?;
            Ok(EXIT_SUCCESS)
        }
        Err(e) => {
            let e = anyhow::Error::new(e);
            log::error!("Fetch failed: {:#}", e);
            writeln!(out, "Download failed: {:#}", e)?;
            Ok(EXIT_FAILURE)
        }
    }
}
