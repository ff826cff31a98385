//! Writes the builtin stake pool registry out as dex record files.
//!
//! Takes no registry input: the pool lists are compiled in. Only the output
//! directory can be chosen.

use anyhow::Result;
use dexrecords::config::{DEFAULT_OUT_DIR, OUT_DIR_ENV};
use dexrecords::logging::setup_logging;
use dexrecords::{EmitConfig, Invocation, Registry, generate_and_emit};

fn main() {
    if let Err(err) = run() {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    setup_logging();
    let config = match EmitConfig::from_env()? {
        Invocation::Run(config) => config,
        Invocation::Help => {
            print_usage();
            return Ok(());
        }
    };
    generate_and_emit(&Registry::builtin(), &config)?;
    Ok(())
}

fn print_usage() {
    println!(
        "Usage: make-dex-records [--out-dir PATH] [--no-create]\n\n\
         Writes depositSol<i>.json, oneWayPoolPair<i>.json and twoWayPoolPair<i>.json\n\
         for the builtin pool registry, replacing files of the same name.\n\n\
         Options:\n  \
         --out-dir PATH  output directory (env {OUT_DIR_ENV}, default ./{DEFAULT_OUT_DIR})\n  \
         --no-create     fail instead of creating a missing output directory"
    );
}
