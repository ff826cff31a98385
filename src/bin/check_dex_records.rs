//! Validates a directory of dex record files and prints a JSON summary.

use anyhow::{Result, bail};
use dexrecords::logging::setup_logging;
use dexrecords::verify_dir;
use std::env;
use std::path::PathBuf;
use tracing::info;

const USAGE: &str = "Usage: check-dex-records <dir>";

fn main() {
    if let Err(err) = run() {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    setup_logging();
    let dir = parse_dir()?;
    let report = verify_dir(&dir)?;
    info!(dir = %dir.display(), ignored = report.ignored, "dex records verified");
    println!("{}", serde_json::to_string(&report)?);
    Ok(())
}

fn parse_dir() -> Result<PathBuf> {
    let mut args = env::args_os().skip(1);
    let Some(first) = args.next() else {
        bail!(USAGE);
    };
    if matches!(first.to_str(), Some("-h" | "--help")) || args.next().is_some() {
        bail!(USAGE);
    }
    Ok(PathBuf::from(first))
}
