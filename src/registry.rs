//! The stake-pool registry records are generated from.
//!
//! Pools are grouped by which stake operations they support. Order inside
//! each list only fixes artifact indices; it carries no precedence.

use crate::pool::{Operation, PoolDescriptor, PoolTy};
use anyhow::{Result, bail};

/// Pools grouped by stake capability.
///
/// `deposit_capable` lists the deposit-stake-only pools that also take SOL
/// deposits first; only its first entry becomes a `depositSol` record.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Registry {
    pub withdraw_capable: Vec<PoolDescriptor>,
    pub deposit_capable: Vec<PoolDescriptor>,
    pub both_capable: Vec<PoolDescriptor>,
}

impl Registry {
    /// The registry shipped with the router.
    pub fn builtin() -> Self {
        Self {
            withdraw_capable: vec![PoolDescriptor::new(
                "7dHbWXmci3dT8UFYWYZweBLXgycu7Y3iL6trKn1Y7ARj",
                "49Yi1TKkNyYjPAFdR9LBvoHcUjuPX4Df5T5yv39w2XTn",
                PoolTy::Lido,
            )],
            deposit_capable: vec![
                PoolDescriptor::new(
                    "mSoLzYCxHdYgdzU16g5QSh3i5K3z3KZK7ytfqcJm7So",
                    "8szGkuLTAux9XMgZ2vtY39jVSowEcpBfFfD8hXSEqdGC",
                    PoolTy::Marinade,
                ),
                // wSOL mint: unstake.it pays out SOL, it has no LST of its own.
                PoolDescriptor::new(
                    "So11111111111111111111111111111111111111112",
                    "3rBnnH9TTgd3xwu48rnzGsaQkSr1hR64nY71DrDt6VrQ",
                    PoolTy::Unstakeit,
                ),
            ],
            both_capable: vec![
                PoolDescriptor::new(
                    "Hg35Vd8K3BS2pLB3xwC2WqQV8pmpCm3oNRGYP1PEpmCM",
                    "GUAMR8ciiaijraJeLDEDrFVaueLm9YzWWY9R7CBPL9rA",
                    PoolTy::Eversol,
                ),
                PoolDescriptor::new(
                    "5oVNBeEEQvYi1cX3ir8Dx5n1P7pdxydbGF2X4TxVusJm",
                    "5oc4nmbNTda9fx8Tw57ShLD132aqDK65vuHH4RU1K4LZ",
                    PoolTy::Socean,
                ),
                PoolDescriptor::new(
                    "GEJpt3Wjmr628FqXxTgxMce1pLntcPV4uFi8ksxMyPQh",
                    "7ge2xKsZXmqPxa3YmXxXmzCp9Hc2ezrTxh6PECaxCwrL",
                    PoolTy::Spl,
                ),
                PoolDescriptor::new(
                    "J1toso1uCk3RLmjorhTtrVwY9HJ7X8V9yYac6Y7kGCPn",
                    "Jito4APyf642JPZPx3hGc6WWJ8zPKtRbRs4P815Awbb",
                    PoolTy::Spl,
                ),
                PoolDescriptor::new(
                    "7Q2afV64in6N6SeZsAAB81TJzwDoD6zpqmHkzi9Dcavn",
                    "CtMyWsrUtAwXWiGr9WjHT5fC3p3fgV8cyGpLTo2LJzG1",
                    PoolTy::Spl,
                ),
                PoolDescriptor::new(
                    "LAinEtNLgpmCP9Rvsf5Hn8W6EhNiKLZQti1xfWMLy6X",
                    "2qyEeSAWKfU18AFthrF7JA8z8ZCi1yt76Tqs917vwQTV",
                    PoolTy::Spl,
                ),
                PoolDescriptor::new(
                    "CgnTSoL3DgY9SFHxcLj6CgCgKKoTBr6tp4CPAEWy25DE",
                    "CgntPoLka5pD5fesJYhGmUCF8KU1QS1ZmZiuAuMZr2az",
                    PoolTy::Spl,
                ),
            ],
        }
    }

    /// Check the registry shape before generating records from it.
    ///
    /// `deposit_capable` must be non-empty, and every pool's program must
    /// implement the operations its list (and the deposit-SOL set) implies.
    pub fn validate(&self) -> Result<()> {
        if self.deposit_capable.is_empty() {
            bail!("registry has no deposit-capable pools; the first one is the deposit-SOL pool");
        }

        check_list(
            "withdraw_capable",
            &self.withdraw_capable,
            &[Operation::WithdrawStake, Operation::DepositSol],
        )?;
        check_list(
            "deposit_capable",
            &self.deposit_capable,
            &[Operation::DepositStake],
        )?;
        check_list(
            "deposit_sol candidate deposit_capable",
            &self.deposit_capable[..1],
            &[Operation::DepositSol],
        )?;
        check_list(
            "both_capable",
            &self.both_capable,
            &[
                Operation::DepositStake,
                Operation::WithdrawStake,
                Operation::DepositSol,
            ],
        )?;
        Ok(())
    }
}

fn check_list(list: &str, pools: &[PoolDescriptor], required: &[Operation]) -> Result<()> {
    for (idx, pool) in pools.iter().enumerate() {
        for op in required {
            if !pool.ty.supports(*op) {
                bail!(
                    "{list}[{idx}] ({} pool {}) does not support {}",
                    pool.ty,
                    pool.main_account,
                    op.as_str()
                );
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_registry_is_valid() {
        let registry = Registry::builtin();
        registry.validate().unwrap();
        assert_eq!(registry.withdraw_capable.len(), 1);
        assert_eq!(registry.deposit_capable.len(), 2);
        assert_eq!(registry.both_capable.len(), 7);
        assert_eq!(registry.deposit_capable[0].ty, PoolTy::Marinade);
    }

    #[test]
    fn empty_deposit_list_is_rejected() {
        let mut registry = Registry::builtin();
        registry.deposit_capable.clear();
        let err = registry.validate().unwrap_err();
        assert!(err.to_string().contains("no deposit-capable pools"));
    }

    #[test]
    fn unstakeit_cannot_lead_deposit_list() {
        let mut registry = Registry::builtin();
        registry.deposit_capable.reverse();
        let err = registry.validate().unwrap_err().to_string();
        assert!(
            err.starts_with("deposit_sol candidate deposit_capable[0] (Unstakeit pool"),
            "{err}"
        );
        assert!(err.contains("deposit-sol"), "{err}");
    }

    #[test]
    fn withdraw_only_pool_in_both_list_is_rejected() {
        let mut registry = Registry::builtin();
        registry
            .both_capable
            .push(PoolDescriptor::new("m", "a", PoolTy::Lido));
        let err = registry.validate().unwrap_err().to_string();
        assert!(err.contains("both_capable[7]"), "{err}");
        assert!(err.contains("deposit-stake"), "{err}");
    }
}
