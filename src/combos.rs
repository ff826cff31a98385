//! Derives the routable record set from a [`Registry`].
//!
//! All three generators are pure and deterministic: the same registry order
//! always yields the same sequence, which is what keeps artifact indices
//! stable across runs.

use crate::pool::{PoolDescriptor, PoolTy};
use crate::registry::Registry;
use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};
use std::mem::swap;

/// Withdraw stake from one pool and deposit it into another.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct OneWayPoolPair {
    pub withdraw_stake_ty: PoolTy,
    pub deposit_stake_ty: PoolTy,
    pub withdraw_stake_mint: String,
    pub deposit_stake_mint: String,
    pub withdraw_stake_main_account: String,
    pub deposit_stake_main_account: String,
}

impl OneWayPoolPair {
    pub fn new(withdraw: &PoolDescriptor, deposit: &PoolDescriptor) -> Self {
        Self {
            withdraw_stake_ty: withdraw.ty.clone(),
            deposit_stake_ty: deposit.ty.clone(),
            withdraw_stake_mint: withdraw.mint.clone(),
            deposit_stake_mint: deposit.mint.clone(),
            withdraw_stake_main_account: withdraw.main_account.clone(),
            deposit_stake_main_account: deposit.main_account.clone(),
        }
    }
}

/// Two pools that can each withdraw stake into the other.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct TwoWayPoolPair {
    pub a_ty: PoolTy,
    pub b_ty: PoolTy,
    pub a_mint: String,
    pub b_mint: String,
    pub a_main_account: String,
    pub b_main_account: String,
}

impl TwoWayPoolPair {
    pub fn new(a: &PoolDescriptor, b: &PoolDescriptor) -> Self {
        Self {
            a_ty: a.ty.clone(),
            b_ty: b.ty.clone(),
            a_mint: a.mint.clone(),
            b_mint: b.mint.clone(),
            a_main_account: a.main_account.clone(),
            b_main_account: b.main_account.clone(),
        }
    }

    /// The same pair with the lower mint on the `a` side.
    ///
    /// Mints are compared as decoded 32-byte keys, the order on-chain records
    /// are keyed by. Base-58 strings of different lengths do not sort the same
    /// way. Equal mints fall back to comparing main accounts.
    pub fn canonicalized(&self) -> Result<Self> {
        let a_key = (decode_address(&self.a_mint)?, decode_address(&self.a_main_account)?);
        let b_key = (decode_address(&self.b_mint)?, decode_address(&self.b_main_account)?);
        let mut res = self.clone();
        if a_key > b_key {
            swap(&mut res.a_ty, &mut res.b_ty);
            swap(&mut res.a_mint, &mut res.b_mint);
            swap(&mut res.a_main_account, &mut res.b_main_account);
        }
        Ok(res)
    }
}

/// Decode a base-58 account address into its 32 key bytes.
pub fn decode_address(value: &str) -> Result<[u8; 32]> {
    let bytes = bs58::decode(value)
        .into_vec()
        .with_context(|| format!("invalid base-58 address {value}"))?;
    <[u8; 32]>::try_from(bytes.as_slice())
        .map_err(|_| anyhow!("address {value} decodes to {} bytes, expected 32", bytes.len()))
}

/// Pools a SOL deposit can route into.
///
/// Every withdraw-capable and both-capable pool takes SOL directly; of the
/// deposit-only pools just the first does. An empty deposit list contributes
/// nothing rather than faulting.
pub fn deposit_sol_set(registry: &Registry) -> Vec<PoolDescriptor> {
    registry
        .withdraw_capable
        .iter()
        .chain(registry.deposit_capable.iter().take(1))
        .chain(registry.both_capable.iter())
        .cloned()
        .collect()
}

/// Every (withdraw, deposit) route, each emitted once.
///
/// Withdraw-only pools pair with every deposit target first, then each
/// deposit-only pool receives from every both-capable pool. Both-capable to
/// both-capable routes are left to [`two_way_pairs`].
pub fn one_way_pairs(registry: &Registry) -> Vec<OneWayPoolPair> {
    let from_withdraw_only = registry.withdraw_capable.iter().flat_map(move |w| {
        registry
            .deposit_capable
            .iter()
            .chain(registry.both_capable.iter())
            .map(move |d| OneWayPoolPair::new(w, d))
    });
    let into_deposit_only = registry.deposit_capable.iter().flat_map(move |d| {
        registry
            .both_capable
            .iter()
            .map(move |w| OneWayPoolPair::new(w, d))
    });
    from_withdraw_only.chain(into_deposit_only).collect()
}

/// Every unordered pair of distinct both-capable pools, `a` before `b` in
/// registry order.
pub fn two_way_pairs(registry: &Registry) -> Vec<TwoWayPoolPair> {
    let pools = &registry.both_capable;
    pools
        .iter()
        .enumerate()
        .flat_map(move |(j, a)| pools[j + 1..].iter().map(move |b| TwoWayPoolPair::new(a, b)))
        .collect()
}
