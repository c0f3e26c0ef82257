use anyhow::Result;
use log::{info, warn};
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs;
use std::io;

use sharp_fetch::{console, Target};

fn setup_logging() -> Result<()> {
    let log_dir = directories::BaseDirs::new()
        .ok_or_else(|| anyhow::anyhow!("Failed to get base directories"))?
        .data_local_dir()
        .join("sharp-fetch")
        .join("logs");

    fs::create_dir_all(&log_dir)?;

    let log_file = log_dir.join(format!(
        "fetch_{}.log",
        chrono::Local::now().format("%Y%m%d_%H%M%S")
    ));

    WriteLogger::init(LevelFilter::Info, log_config(), fs::File::create(log_file)?)?;

    Ok(())
}

fn log_config() -> simplelog::Config {
    ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_target_level(LevelFilter::Error)
        .set_location_level(LevelFilter::Debug)
        .build()
}

fn main() -> Result<()> {
    if let Err(e) = setup_logging() {
        // stderr gets warnings and errors only
        WriteLogger::init(LevelFilter::Warn, log_config(), io::stderr())?;
        warn!("File logging unavailable, using stderr: {:#}", e);
    }

    let target = Target::model()?;
    info!("sharp-fetch starting");

    let code = console::fetch_and_report(target, &mut io::stdout().lock())?;
    if code != console::EXIT_SUCCESS {
        std::process::exit(code);
    }
    Ok(())
}
