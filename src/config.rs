//! Output location for `make-dex-records`.
//!
//! Resolution order: `--out-dir`, then `DEX_RECORDS_OUT_DIR`, then `jsons`
//! under the working directory. Registry contents are never configurable.

use anyhow::{Result, anyhow, bail};
use std::ffi::OsString;
use std::path::PathBuf;

pub const OUT_DIR_ENV: &str = "DEX_RECORDS_OUT_DIR";
pub const DEFAULT_OUT_DIR: &str = "jsons";

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EmitConfig {
    pub out_dir: PathBuf,
    pub create_dirs: bool,
}

/// What the command line asked for.
#[derive(Debug, Eq, PartialEq)]
pub enum Invocation {
    Run(EmitConfig),
    Help,
}

impl EmitConfig {
    /// Parse CLI arguments (without argv[0]) with `env_out_dir` as the
    /// fallback for a missing `--out-dir`.
    pub fn from_args<I>(args: I, env_out_dir: Option<OsString>) -> Result<Invocation>
    where
        I: IntoIterator<Item = OsString>,
    {
        let mut args = args.into_iter();
        let mut out_dir: Option<PathBuf> = None;
        let mut create_dirs = true;

        while let Some(arg) = args.next() {
            match arg.to_str() {
                Some("-h" | "--help") => return Ok(Invocation::Help),
                Some("--out-dir") => {
                    let value = args
                        .next()
                        .ok_or_else(|| anyhow!("--out-dir requires a value"))?;
                    if out_dir.is_some() {
                        bail!("--out-dir provided multiple times");
                    }
                    out_dir = Some(PathBuf::from(value));
                }
                Some("--no-create") => create_dirs = false,
                _ => bail!("Unknown argument: {}", arg.to_string_lossy()),
            }
        }

        let out_dir = out_dir
            .or_else(|| {
                env_out_dir
                    .filter(|value| !value.is_empty())
                    .map(PathBuf::from)
            })
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUT_DIR));

        Ok(Invocation::Run(EmitConfig {
            out_dir,
            create_dirs,
        }))
    }

    /// Resolve from the process arguments and environment.
    pub fn from_env() -> Result<Invocation> {
        Self::from_args(std::env::args_os().skip(1), std::env::var_os(OUT_DIR_ENV))
    }
}
