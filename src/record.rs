//! Record categories, artifact naming, and read-back of emitted files.

use crate::combos::{OneWayPoolPair, TwoWayPoolPair, deposit_sol_set, one_way_pairs, two_way_pairs};
use crate::pool::PoolDescriptor;
use crate::registry::Registry;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

pub const ARTIFACT_EXTENSION: &str = "json";

/// Which generated sequence a record belongs to. Also the artifact name prefix.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum RecordCategory {
    DepositSol,
    OneWayPoolPair,
    TwoWayPoolPair,
}

impl RecordCategory {
    pub const ALL: [RecordCategory; 3] = [
        RecordCategory::DepositSol,
        RecordCategory::OneWayPoolPair,
        RecordCategory::TwoWayPoolPair,
    ];

    pub fn prefix(self) -> &'static str {
        match self {
            RecordCategory::DepositSol => "depositSol",
            RecordCategory::OneWayPoolPair => "oneWayPoolPair",
            RecordCategory::TwoWayPoolPair => "twoWayPoolPair",
        }
    }

    /// `depositSol3.json` for `(DepositSol, 3)`.
    pub fn file_name(self, index: usize) -> String {
        format!("{}{index}.{ARTIFACT_EXTENSION}", self.prefix())
    }

    /// Inverse of [`RecordCategory::file_name`].
    ///
    /// Leading zeros and signs are rejected so each index has exactly one
    /// spelling.
    pub fn parse_file_name(name: &str) -> Option<(RecordCategory, usize)> {
        let stem = name.strip_suffix(&format!(".{ARTIFACT_EXTENSION}"))?;
        Self::ALL.into_iter().find_map(|category| {
            let digits = stem.strip_prefix(category.prefix())?;
            if digits.is_empty()
                || !digits.chars().all(|c| c.is_ascii_digit())
                || (digits.len() > 1 && digits.starts_with('0'))
            {
                return None;
            }
            digits.parse().ok().map(|index| (category, index))
        })
    }
}

impl std::fmt::Display for RecordCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.prefix())
    }
}

/// Any one emitted record. The JSON carries no tag; the key set decides.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DexRecord {
    DepositSol(PoolDescriptor),
    OneWayPoolPair(OneWayPoolPair),
    TwoWayPoolPair(TwoWayPoolPair),
}

impl DexRecord {
    pub fn category(&self) -> RecordCategory {
        match self {
            DexRecord::DepositSol(_) => RecordCategory::DepositSol,
            DexRecord::OneWayPoolPair(_) => RecordCategory::OneWayPoolPair,
            DexRecord::TwoWayPoolPair(_) => RecordCategory::TwoWayPoolPair,
        }
    }

    /// Pretty JSON with two-space indent and no trailing newline.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("serializing dex record")
    }
}

/// Read one emitted artifact back.
pub fn load_dex_record(path: &Path) -> Result<DexRecord> {
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("parsing dex record {}", path.display()))
}

/// A generated record together with its position in its category.
#[derive(Clone, Debug)]
pub struct Artifact {
    pub category: RecordCategory,
    pub index: usize,
    pub record: DexRecord,
}

impl Artifact {
    pub fn file_name(&self) -> String {
        self.category.file_name(self.index)
    }
}

/// Everything a registry generates, in emission order.
#[derive(Clone, Debug, Default)]
pub struct ArtifactSet {
    artifacts: Vec<Artifact>,
}

impl ArtifactSet {
    pub fn generate(registry: &Registry) -> Self {
        let deposit_sol = deposit_sol_set(registry)
            .into_iter()
            .map(DexRecord::DepositSol);
        let one_way = one_way_pairs(registry)
            .into_iter()
            .map(DexRecord::OneWayPoolPair);
        let two_way = two_way_pairs(registry)
            .into_iter()
            .map(DexRecord::TwoWayPoolPair);

        let mut artifacts = Vec::new();
        for (category, records) in [
            (RecordCategory::DepositSol, deposit_sol.collect::<Vec<_>>()),
            (RecordCategory::OneWayPoolPair, one_way.collect()),
            (RecordCategory::TwoWayPoolPair, two_way.collect()),
        ] {
            artifacts.extend(
                records
                    .into_iter()
                    .enumerate()
                    .map(|(index, record)| Artifact {
                        category,
                        index,
                        record,
                    }),
            );
        }
        Self { artifacts }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Artifact> {
        self.artifacts.iter()
    }

    pub fn len(&self) -> usize {
        self.artifacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.artifacts.is_empty()
    }

    pub fn count(&self, category: RecordCategory) -> usize {
        self.artifacts
            .iter()
            .filter(|artifact| artifact.category == category)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PoolTy;

    #[test]
    fn file_names_round_trip() {
        assert_eq!(RecordCategory::DepositSol.file_name(3), "depositSol3.json");
        assert_eq!(
            RecordCategory::parse_file_name("oneWayPoolPair12.json"),
            Some((RecordCategory::OneWayPoolPair, 12))
        );
        assert_eq!(
            RecordCategory::parse_file_name("twoWayPoolPair0.json"),
            Some((RecordCategory::TwoWayPoolPair, 0))
        );
    }

    #[test]
    fn parse_rejects_foreign_names() {
        for name in [
            "depositSol.json",
            "depositSol01.json",
            "depositSol+1.json",
            "depositSol1.txt",
            "oneWayPoolPairX.json",
            "README.md",
        ] {
            assert_eq!(RecordCategory::parse_file_name(name), None, "{name}");
        }
    }

    #[test]
    fn untagged_records_resolve_by_key_set() {
        let sol: DexRecord = serde_json::from_str(
            r#"{"mint":"m","mainAccount":"a","ty":"Marinade"}"#,
        )
        .unwrap();
        assert_eq!(sol.category(), RecordCategory::DepositSol);

        let two: DexRecord = serde_json::from_str(
            r#"{"aTy":"Spl","bTy":"Socean","aMint":"m1","bMint":"m2","aMainAccount":"a1","bMainAccount":"a2"}"#,
        )
        .unwrap();
        match two {
            DexRecord::TwoWayPoolPair(pair) => assert_eq!(pair.b_ty, PoolTy::Socean),
            other => panic!("unexpected record {other:?}"),
        }

        let bad = serde_json::from_str::<DexRecord>(r#"{"mint":"m","mainAccount":"a"}"#);
        assert!(bad.is_err());
    }

    #[test]
    fn pretty_json_matches_emitted_layout() {
        let record = DexRecord::DepositSol(PoolDescriptor::new("m", "a", PoolTy::Lido));
        assert_eq!(
            record.to_json().unwrap(),
            "{\n  \"mint\": \"m\",\n  \"mainAccount\": \"a\",\n  \"ty\": \"Lido\"\n}"
        );
    }

    #[test]
    fn artifact_set_indexes_each_category_from_zero() {
        let set = ArtifactSet::generate(&Registry::builtin());
        assert_eq!(set.len(), 9 + 23 + 21);
        assert_eq!(set.count(RecordCategory::OneWayPoolPair), 23);
        for category in RecordCategory::ALL {
            let indices: Vec<_> = set
                .iter()
                .filter(|a| a.category == category)
                .map(|a| a.index)
                .collect();
            assert_eq!(indices, (0..indices.len()).collect::<Vec<_>>());
        }
        let first = set.iter().next().unwrap();
        assert_eq!(first.file_name(), "depositSol0.json");
        assert_eq!(first.record.category(), RecordCategory::DepositSol);
    }
}
