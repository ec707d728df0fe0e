use alloy::primitives::{Address, U256};
use serde::{Deserialize, Serialize};
use std::{collections::HashSet, fs, path::Path};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid address: {0}")]
    InvalidAddress(String),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("Duplicate id error: {0}")]
    DuplicateId(String),
}

/// Tokens credited to `owner` when the ledger starts.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct GenesisAllocation {
    pub owner: Address,
    pub id: U256,
    pub amount: U256,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct LedgerConfigFile {
    /// Address the ledger is deployed at; bound into every signature
    pub address: Address,
    #[serde(default)]
    pub genesis: Vec<GenesisAllocation>,
}

impl LedgerConfigFile {
    fn validate_allocation_uniqueness(genesis: &[GenesisAllocation]) -> Result<(), ConfigError> {
        let mut seen = HashSet::new();
        for allocation in genesis {
            if !seen.insert((allocation.owner, allocation.id)) {
                return Err(ConfigError::DuplicateId(format!(
                    "Duplicate genesis allocation for owner {} and id {}",
                    allocation.owner, allocation.id
                )));
            }
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.address == Address::ZERO {
            return Err(ConfigError::InvalidAddress(
                "ledger address must not be zero".into(),
            ));
        }
        if let Some(allocation) = self.genesis.iter().find(|a| a.owner == Address::ZERO) {
            return Err(ConfigError::InvalidAddress(format!(
                "genesis allocation of id {} has a zero owner",
                allocation.id
            )));
        }
        Self::validate_allocation_uniqueness(&self.genesis)?;
        Ok(())
    }
}

pub fn load_config(path: impl AsRef<Path>) -> Result<LedgerConfigFile, ConfigError> {
    let config_str = fs::read_to_string(path)?;
    let config: LedgerConfigFile = serde_json::from_str(&config_str)?;
    config.validate()?;
    Ok(config)
}
