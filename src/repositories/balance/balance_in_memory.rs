use alloy::primitives::{Address, U256};
use dashmap::DashMap;

use super::BalanceRepositoryTrait;
use crate::models::{BalanceError, RepositoryError};

#[derive(Debug, Default, Clone)]
pub struct InMemoryBalanceRepository {
    store: DashMap<(Address, U256), U256>, // (owner, token id) -> balance
}

impl InMemoryBalanceRepository {
    pub fn new() -> Self {
        Self {
            store: DashMap::new(),
        }
    }
}

impl BalanceRepositoryTrait for InMemoryBalanceRepository {
    fn balance_of(&self, owner: Address, id: U256) -> Result<U256, RepositoryError> {
        Ok(self
            .store
            .get(&(owner, id))
            .map(|balance| *balance)
            .unwrap_or_default())
    }

    fn credit(&self, owner: Address, id: U256, amount: U256) -> Result<U256, BalanceError> {
        let mut entry = self.store.entry((owner, id)).or_default();
        let updated = entry
            .checked_add(amount)
            .ok_or(BalanceError::Overflow)?;
        *entry = updated;
        Ok(updated)
    }

    fn debit(&self, owner: Address, id: U256, amount: U256) -> Result<U256, BalanceError> {
        let mut entry = self.store.entry((owner, id)).or_default();
        let updated = entry
            .checked_sub(amount)
            .ok_or(BalanceError::Underflow)?;
        *entry = updated;
        Ok(updated)
    }
}
