use anyhow::{Context, Result, bail};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

pub fn helper_binary(name: &str) -> PathBuf {
    let path = match name {
        "make-dex-records" => env!("CARGO_BIN_EXE_make-dex-records"),
        "check-dex-records" => env!("CARGO_BIN_EXE_check-dex-records"),
        other => panic!("unknown helper binary {other}"),
    };
    PathBuf::from(path)
}

pub fn run_command(mut cmd: Command) -> Result<Output> {
    let output = cmd
        .output()
        .with_context(|| format!("failed to run command: {:?}", cmd))?;
    if output.status.success() {
        Ok(output)
    } else {
        bail!(
            "command {:?} failed: status {:?}\nstdout: {}\nstderr: {}",
            cmd,
            output.status.code(),
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        )
    }
}

/// File name to raw bytes for every regular file directly under `dir`.
pub fn snapshot_dir(dir: &Path) -> Result<BTreeMap<String, Vec<u8>>> {
    let mut files = BTreeMap::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .context("non-utf8 file name")?
            .to_string();
        files.insert(name, fs::read(&path)?);
    }
    Ok(files)
}
