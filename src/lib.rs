//! Stake pool dex record generation.
//!
//! The router learns which stake pools it may route through from a directory
//! of small JSON records. This crate holds the pool registry those records
//! come from, derives every routable combination from it, and writes one
//! file per record:
//!
//! - `depositSol<i>.json`: pools that take a direct SOL deposit,
//! - `oneWayPoolPair<i>.json`: withdraw stake from one pool, deposit into another,
//! - `twoWayPoolPair<i>.json`: both-capable pools that can route either way.
//!
//! The binaries are thin wrappers: `make-dex-records` writes the set and
//! `check-dex-records` re-reads a directory and validates it.

use anyhow::{Context, Result};
use tracing::info;

pub mod combos;
pub mod config;
pub mod emit;
pub mod logging;
pub mod pool;
pub mod record;
pub mod registry;
pub mod schema;
pub mod verify;

pub use combos::{OneWayPoolPair, TwoWayPoolPair, deposit_sol_set, one_way_pairs, two_way_pairs};
pub use config::{EmitConfig, Invocation};
pub use emit::{DirSink, EmitSummary, RecordSink, emit_all};
pub use pool::{Operation, PoolDescriptor, PoolTy};
pub use record::{Artifact, ArtifactSet, DexRecord, RecordCategory, load_dex_record};
pub use registry::Registry;
pub use schema::RecordSchema;
pub use verify::{VerifyReport, verify_dir};

/// Validate `registry`, generate its records, and write them into
/// `config.out_dir`.
///
/// Everything is generated in memory before the first write.
pub fn generate_and_emit(registry: &Registry, config: &EmitConfig) -> Result<EmitSummary> {
    registry.validate().context("invalid pool registry")?;
    let set = ArtifactSet::generate(registry);
    let mut sink = DirSink::open(&config.out_dir, config.create_dirs)?;
    let summary = emit_all(&set, &mut sink)?;
    info!(
        out_dir = %sink.dir().display(),
        deposit_sol = summary.count(RecordCategory::DepositSol),
        one_way_pool_pair = summary.count(RecordCategory::OneWayPoolPair),
        two_way_pool_pair = summary.count(RecordCategory::TwoWayPoolPair),
        "dex records written"
    );
    Ok(summary)
}
