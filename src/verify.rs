//! Re-reads an output directory and checks it is a coherent record set.

use crate::pool::{Operation, PoolTy};
use crate::record::{DexRecord, RecordCategory};
use crate::schema::RecordSchema;
use anyhow::{Context, Result, bail};
use serde::Serialize;
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};
use std::fs::{self, File};
use std::io::BufReader;
use std::path::Path;

/// Outcome of [`verify_dir`]. Serialized as the `check-dex-records` output.
#[derive(Clone, Debug, Default, Serialize)]
pub struct VerifyReport {
    pub deposit_sol: usize,
    pub one_way_pool_pair: usize,
    pub two_way_pool_pair: usize,
    /// Files that do not look like record artifacts.
    pub ignored: usize,
}

impl VerifyReport {
    pub fn count(&self, category: RecordCategory) -> usize {
        match category {
            RecordCategory::DepositSol => self.deposit_sol,
            RecordCategory::OneWayPoolPair => self.one_way_pool_pair,
            RecordCategory::TwoWayPoolPair => self.two_way_pool_pair,
        }
    }

    fn bump(&mut self, category: RecordCategory) {
        match category {
            RecordCategory::DepositSol => self.deposit_sol += 1,
            RecordCategory::OneWayPoolPair => self.one_way_pool_pair += 1,
            RecordCategory::TwoWayPoolPair => self.two_way_pool_pair += 1,
        }
    }
}

/// Validate every record artifact under `dir`.
///
/// Fails on the first schema or shape error, on a pool tag that cannot perform
/// its side of the record, on index gaps within a category,
/// and on routes that appear twice (two-way pairs compared in canonical
/// mint order).
pub fn verify_dir(dir: &Path) -> Result<VerifyReport> {
    let schema = RecordSchema::bundled()?;
    let mut report = VerifyReport::default();
    let mut found: BTreeMap<(RecordCategory, usize), DexRecord> = BTreeMap::new();

    let entries = fs::read_dir(dir).with_context(|| format!("reading {}", dir.display()))?;
    for entry in entries {
        let path = entry?.path();
        let parsed = path
            .file_name()
            .and_then(|name| name.to_str())
            .and_then(RecordCategory::parse_file_name);
        let Some((category, index)) = parsed.filter(|_| path.is_file()) else {
            report.ignored += 1;
            continue;
        };

        let file = File::open(&path).with_context(|| format!("opening {}", path.display()))?;
        let value: Value = serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("parsing {}", path.display()))?;
        schema
            .validate(&value)
            .with_context(|| format!("validating {}", path.display()))?;
        let record: DexRecord = serde_json::from_value(value)
            .with_context(|| format!("decoding {}", path.display()))?;
        if record.category() != category {
            bail!(
                "{} holds a {} record but is named as {}",
                path.display(),
                record.category(),
                category
            );
        }
        check_operations(&record).with_context(|| format!("checking {}", path.display()))?;
        found.insert((category, index), record);
        report.bump(category);
    }

    for category in RecordCategory::ALL {
        let indices: Vec<usize> = found
            .keys()
            .filter(|(c, _)| *c == category)
            .map(|(_, index)| *index)
            .collect();
        if let Some(gap) = (0..indices.len()).find(|expected| indices[*expected] != *expected) {
            bail!("{category} records are not contiguous: missing index {gap}");
        }
    }

    check_unique_routes(found.values())?;
    Ok(report)
}

const DEPOSIT_SOL: &[Operation] = &[Operation::DepositSol];
const WITHDRAW_STAKE: &[Operation] = &[Operation::WithdrawStake];
const DEPOSIT_STAKE: &[Operation] = &[Operation::DepositStake];
const BOTH_STAKE: &[Operation] = &[Operation::DepositStake, Operation::WithdrawStake];

// Each side of a record must name a program implementing that side's
// operation; unknown tags implement nothing.
fn check_operations(record: &DexRecord) -> Result<()> {
    let sides: Vec<(&str, &PoolTy, &[Operation])> = match record {
        DexRecord::DepositSol(pool) => vec![("ty", &pool.ty, DEPOSIT_SOL)],
        DexRecord::OneWayPoolPair(pair) => vec![
            ("withdrawStakeTy", &pair.withdraw_stake_ty, WITHDRAW_STAKE),
            ("depositStakeTy", &pair.deposit_stake_ty, DEPOSIT_STAKE),
        ],
        DexRecord::TwoWayPoolPair(pair) => vec![
            ("aTy", &pair.a_ty, BOTH_STAKE),
            ("bTy", &pair.b_ty, BOTH_STAKE),
        ],
    };
    for (field, ty, required) in sides {
        for op in required {
            if !ty.supports(*op) {
                bail!("{field} {ty} does not support {}", op.as_str());
            }
        }
    }
    Ok(())
}

fn check_unique_routes<'a>(records: impl Iterator<Item = &'a DexRecord>) -> Result<()> {
    let mut one_way = BTreeSet::new();
    let mut two_way = BTreeSet::new();
    for record in records {
        match record {
            DexRecord::DepositSol(_) => {}
            DexRecord::OneWayPoolPair(pair) => {
                let route = (
                    pair.withdraw_stake_main_account.as_str(),
                    pair.deposit_stake_main_account.as_str(),
                );
                if !one_way.insert(route) {
                    bail!("duplicate one-way pool pair {} -> {}", route.0, route.1);
                }
            }
            DexRecord::TwoWayPoolPair(pair) => {
                if pair.a_main_account == pair.b_main_account {
                    bail!("two-way pool pair pairs {} with itself", pair.a_main_account);
                }
                let canon = pair.canonicalized()?;
                if !two_way.insert((canon.a_main_account.clone(), canon.b_main_account.clone())) {
                    bail!(
                        "duplicate two-way pool pair {} <-> {}",
                        canon.a_main_account,
                        canon.b_main_account
                    );
                }
            }
        }
    }
    Ok(())
}
