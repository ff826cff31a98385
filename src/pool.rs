use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// One stake pool as recorded in the registry and in `depositSol` artifacts.
///
/// Field order is the serialized key order: `mint`, `mainAccount`, `ty`.
/// Addresses are opaque base-58 strings; nothing here checks them against
/// the chain.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PoolDescriptor {
    pub mint: String,
    pub main_account: String,
    pub ty: PoolTy,
}

impl PoolDescriptor {
    pub fn new(mint: &str, main_account: &str, ty: PoolTy) -> Self {
        Self {
            mint: mint.to_string(),
            main_account: main_account.to_string(),
            ty,
        }
    }
}

/// Stake pool program a descriptor belongs to.
///
/// Known tags keep serialization consistent; `Other` lets records written by
/// newer tooling be read back without failing.
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum PoolTy {
    Eversol,
    Lido,
    Marinade,
    Socean,
    Spl,
    Unstakeit,
    Other(String),
}

/// Stake pool operation a routed swap leg can perform.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Operation {
    DepositSol,
    DepositStake,
    WithdrawStake,
}

impl Operation {
    pub fn as_str(self) -> &'static str {
        match self {
            Operation::DepositSol => "deposit-sol",
            Operation::DepositStake => "deposit-stake",
            Operation::WithdrawStake => "withdraw-stake",
        }
    }
}

impl PoolTy {
    pub fn as_str(&self) -> &str {
        match self {
            PoolTy::Eversol => "Eversol",
            PoolTy::Lido => "Lido",
            PoolTy::Marinade => "Marinade",
            PoolTy::Socean => "Socean",
            PoolTy::Spl => "Spl",
            PoolTy::Unstakeit => "Unstakeit",
            PoolTy::Other(value) => value.as_str(),
        }
    }

    fn from_str(value: &str) -> Self {
        match value {
            "Eversol" => PoolTy::Eversol,
            "Lido" => PoolTy::Lido,
            "Marinade" => PoolTy::Marinade,
            "Socean" => PoolTy::Socean,
            "Spl" => PoolTy::Spl,
            "Unstakeit" => PoolTy::Unstakeit,
            other => PoolTy::Other(other.to_string()),
        }
    }

    /// Whether the pool program implements `op`.
    ///
    /// Lido has no deposit-stake instruction and Unstakeit only takes stake
    /// accounts in.
    pub fn supports(&self, op: Operation) -> bool {
        match op {
            Operation::DepositSol => matches!(
                self,
                PoolTy::Eversol | PoolTy::Lido | PoolTy::Marinade | PoolTy::Socean | PoolTy::Spl
            ),
            Operation::DepositStake => matches!(
                self,
                PoolTy::Eversol
                    | PoolTy::Marinade
                    | PoolTy::Socean
                    | PoolTy::Spl
                    | PoolTy::Unstakeit
            ),
            Operation::WithdrawStake => matches!(
                self,
                PoolTy::Eversol | PoolTy::Lido | PoolTy::Socean | PoolTy::Spl
            ),
        }
    }
}

impl Serialize for PoolTy {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for PoolTy {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Ok(Self::from_str(&value))
    }
}

impl std::fmt::Display for PoolTy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
