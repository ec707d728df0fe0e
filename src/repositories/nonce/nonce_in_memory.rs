//! In-memory implementation of the signer nonce table.

use alloy::primitives::{Address, U256};
use dashmap::DashMap;

use super::NonceRepositoryTrait;
use crate::models::RepositoryError;

#[derive(Debug, Default, Clone)]
pub struct InMemoryNonceRepository {
    store: DashMap<Address, U256>, // signer -> next expected nonce
}

impl InMemoryNonceRepository {
    pub fn new() -> Self {
        Self {
            store: DashMap::new(),
        }
    }
}

impl NonceRepositoryTrait for InMemoryNonceRepository {
    fn get_nonce(&self, signer: Address) -> Result<U256, RepositoryError> {
        Ok(self
            .store
            .get(&signer)
            .map(|nonce| *nonce)
            .unwrap_or_default())
    }

    fn set_nonce(&self, signer: Address, nonce: U256) -> Result<(), RepositoryError> {
        self.store.insert(signer, nonce);
        Ok(())
    }
}
