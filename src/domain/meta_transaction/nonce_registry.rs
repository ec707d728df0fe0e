use alloy::primitives::{Address, U256};
use log::debug;

use crate::{models::MetaTransactionError, repositories::NonceRepositoryTrait};

/// Per-signer strictly ordered nonces.
///
/// A signature is only accepted for the signer's current nonce, and each
/// accepted signature moves the nonce forward by exactly one.
pub struct NonceRegistry<'a, R: NonceRepositoryTrait> {
    repository: &'a R,
}

impl<'a, R: NonceRepositoryTrait> NonceRegistry<'a, R> {
    pub fn new(repository: &'a R) -> Self {
        Self { repository }
    }

    pub fn current(&self, signer: Address) -> Result<U256, MetaTransactionError> {
        Ok(self.repository.get_nonce(signer)?)
    }

    pub fn check(&self, signer: Address, provided: U256) -> Result<(), MetaTransactionError> {
        let expected = self.current(signer)?;
        if provided != expected {
            debug!(
                "nonce mismatch for {}: expected {}, provided {}",
                signer, expected, provided
            );
            return Err(MetaTransactionError::InvalidNonce { expected, provided });
        }
        Ok(())
    }

    /// Increments the signer's nonce and returns the new value.
    pub fn advance(&self, signer: Address) -> Result<U256, MetaTransactionError> {
        let next = self
            .current(signer)?
            .checked_add(U256::from(1))
            .ok_or(MetaTransactionError::Overflow)?;
        self.repository.set_nonce(signer, next)?;
        Ok(next)
    }
}
