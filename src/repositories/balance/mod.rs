//! Balance Repository Module
//!
//! Multi-token balances keyed by `(owner, id)`. Mutations are checked: a debit
//! below zero fails with [`BalanceError::Underflow`] and a credit past
//! `U256::MAX` with [`BalanceError::Overflow`], leaving the balance untouched.

mod balance_in_memory;
pub use balance_in_memory::InMemoryBalanceRepository;

use alloy::primitives::{Address, U256};

#[cfg(test)]
use mockall::automock;

use crate::models::{BalanceError, RepositoryError};

#[cfg_attr(test, automock)]
pub trait BalanceRepositoryTrait {
    fn balance_of(&self, owner: Address, id: U256) -> Result<U256, RepositoryError>;

    /// Adds `amount` and returns the new balance.
    fn credit(&self, owner: Address, id: U256, amount: U256) -> Result<U256, BalanceError>;

    /// Subtracts `amount` and returns the new balance.
    fn debit(&self, owner: Address, id: U256, amount: U256) -> Result<U256, BalanceError>;
}
