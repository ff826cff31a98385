//! Writes generated records out as individually named artifacts.
//!
//! Artifacts are written one at a time in generation order. The first
//! failure aborts the batch; files written before it stay on disk.

use crate::record::{ArtifactSet, RecordCategory};
use anyhow::{Context, Result, bail};
use std::collections::BTreeMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::{Builder, NamedTempFile};
use tracing::debug;

/// Destination for serialized records. Writing an existing name replaces it.
pub trait RecordSink {
    fn write(&mut self, name: &str, contents: &str) -> Result<()>;
}

/// Writes each artifact as a file under `dir`.
pub struct DirSink {
    dir: PathBuf,
}

impl DirSink {
    /// Open `dir` as a sink, creating it first when `create_dirs` is set.
    pub fn open(dir: &Path, create_dirs: bool) -> Result<Self> {
        if create_dirs {
            fs::create_dir_all(dir)
                .with_context(|| format!("creating output directory {}", dir.display()))?;
        }
        if !dir.is_dir() {
            bail!("Output directory not found: {}", dir.display());
        }
        Ok(Self {
            dir: dir.to_path_buf(),
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl RecordSink for DirSink {
    // Stage in the target directory so the rename stays on one filesystem.
    fn write(&mut self, name: &str, contents: &str) -> Result<()> {
        let target = self.dir.join(name);
        let mut staged =
            staging_file(&self.dir).with_context(|| format!("staging {}", target.display()))?;
        staged
            .write_all(contents.as_bytes())
            .with_context(|| format!("writing {}", target.display()))?;
        staged
            .persist(&target)
            .with_context(|| format!("replacing {}", target.display()))?;
        Ok(())
    }
}

// Created 0o666 under the umask, as `fs::write` would; tempfile defaults to 0o600.
fn staging_file(dir: &Path) -> io::Result<NamedTempFile> {
    let mut builder = Builder::new();
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(fs::Permissions::from_mode(0o666));
    }
    builder.tempfile_in(dir)
}

/// Per-category artifact counts from one emission run.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct EmitSummary {
    pub counts: BTreeMap<RecordCategory, usize>,
}

impl EmitSummary {
    pub fn count(&self, category: RecordCategory) -> usize {
        self.counts.get(&category).copied().unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }
}

/// Serialize and write every artifact in `set`, stopping at the first error.
pub fn emit_all(set: &ArtifactSet, sink: &mut dyn RecordSink) -> Result<EmitSummary> {
    let mut summary = EmitSummary::default();
    for category in RecordCategory::ALL {
        summary.counts.insert(category, 0);
    }

    for artifact in set.iter() {
        let name = artifact.file_name();
        let contents = artifact
            .record
            .to_json()
            .with_context(|| format!("serializing {name}"))?;
        sink.write(&name, &contents)
            .with_context(|| format!("emitting {name}"))?;
        debug!(artifact = %name, bytes = contents.len(), "wrote dex record");
        *summary.counts.entry(artifact.category).or_default() += 1;
    }

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::Registry;
    use anyhow::anyhow;

    #[derive(Default)]
    struct MemorySink {
        files: BTreeMap<String, String>,
        order: Vec<String>,
        fail_on: Option<String>,
    }

    impl RecordSink for MemorySink {
        fn write(&mut self, name: &str, contents: &str) -> Result<()> {
            if self.fail_on.as_deref() == Some(name) {
                return Err(anyhow!("disk full"));
            }
            self.order.push(name.to_string());
            self.files.insert(name.to_string(), contents.to_string());
            Ok(())
        }
    }

    #[test]
    fn emits_every_category_in_order() {
        let set = ArtifactSet::generate(&Registry::builtin());
        let mut sink = MemorySink::default();
        let summary = emit_all(&set, &mut sink).unwrap();

        assert_eq!(summary.count(RecordCategory::DepositSol), 9);
        assert_eq!(summary.count(RecordCategory::OneWayPoolPair), 23);
        assert_eq!(summary.count(RecordCategory::TwoWayPoolPair), 21);
        assert_eq!(summary.total(), sink.files.len());
        assert_eq!(sink.order.first().map(String::as_str), Some("depositSol0.json"));
        assert_eq!(sink.order[9], "oneWayPoolPair0.json");
        assert_eq!(sink.order.last().map(String::as_str), Some("twoWayPoolPair20.json"));

        let lido = &sink.files["depositSol0.json"];
        assert!(lido.starts_with("{\n  \"mint\": \"7dHbWXmci3dT8UFYWYZweBLXgycu7Y3iL6trKn1Y7ARj\""));
        assert!(!lido.ends_with('\n'));
    }

    #[test]
    fn write_failure_aborts_remaining_batch() {
        let set = ArtifactSet::generate(&Registry::builtin());
        let mut sink = MemorySink {
            fail_on: Some("oneWayPoolPair2.json".to_string()),
            ..MemorySink::default()
        };
        let err = emit_all(&set, &mut sink).unwrap_err();
        assert!(format!("{err:#}").contains("emitting oneWayPoolPair2.json"));
        assert!(format!("{err:#}").contains("disk full"));
        assert_eq!(sink.files.len(), 9 + 2);
        assert!(!sink.files.keys().any(|k| k.starts_with("twoWayPoolPair")));
    }

    #[test]
    fn empty_set_reports_zero_counts() {
        let mut sink = MemorySink::default();
        let summary = emit_all(&ArtifactSet::default(), &mut sink).unwrap();
        assert_eq!(summary.total(), 0);
        assert_eq!(summary.counts.len(), 3);
    }
}
