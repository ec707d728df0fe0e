//! Nonce Repository Module
//!
//! Stores the meta-transaction nonce of every signer. A signer that never
//! signed anything has nonce zero.
//!
//! ## Repository Implementations
//!
//! - [`InMemoryNonceRepository`]: DashMap-backed storage, cloned to snapshot the ledger

mod nonce_in_memory;
pub use nonce_in_memory::InMemoryNonceRepository;

use alloy::primitives::{Address, U256};

#[cfg(test)]
use mockall::automock;

use crate::models::RepositoryError;

#[cfg_attr(test, automock)]
pub trait NonceRepositoryTrait {
    fn get_nonce(&self, signer: Address) -> Result<U256, RepositoryError>;

    fn set_nonce(&self, signer: Address, nonce: U256) -> Result<(), RepositoryError>;
}
