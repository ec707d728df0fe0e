//! # Host
//!
//! Everything the ledger needs from the surrounding chain: code detection,
//! ERC-1271 wallets, fee tokens held by other contracts, ERC-1155 receiver
//! hooks and whole-call checkpoints.

mod in_memory;
pub use in_memory::*;

use alloy::primitives::{Address, Bytes, FixedBytes, B256, U256};
use serde::Serialize;
use thiserror::Error;

#[cfg(test)]
use mockall::automock;

use crate::constants::{ERC1155_BATCH_RECEIVED_VALUE, ERC1155_RECEIVED_VALUE};

#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
pub enum HostError {
    #[error("No contract code at {0}")]
    NoCode(Address),
    #[error("Out of gas: {required} required, {limit} forwarded")]
    OutOfGas { limit: u64, required: u64 },
    #[error("Call reverted: {0}")]
    Reverted(String),
    #[error("Insufficient balance")]
    InsufficientBalance,
    #[error("Insufficient allowance")]
    InsufficientAllowance,
    #[error("Operator not approved")]
    NotApproved,
    #[error("Balance overflow")]
    Overflow,
}

/// What an ERC-1271 wallet is asked to vouch for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WalletPayload {
    /// `isValidSignature(bytes,bytes)` with the full signed message
    Bytes(Bytes),
    /// `isValidSignature(bytes32,bytes)` with the protocol hash
    Hash(B256),
}

/// Arguments of an ERC-1155 receiver hook.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ReceiverHook {
    Single {
        operator: Address,
        from: Address,
        id: U256,
        amount: U256,
        data: Bytes,
    },
    Batch {
        operator: Address,
        from: Address,
        ids: Vec<U256>,
        amounts: Vec<U256>,
        data: Bytes,
    },
}

impl ReceiverHook {
    /// Value a receiver must return to accept the transfer.
    pub fn accepted_value(&self) -> FixedBytes<4> {
        match self {
            ReceiverHook::Single { .. } => ERC1155_RECEIVED_VALUE,
            ReceiverHook::Batch { .. } => ERC1155_BATCH_RECEIVED_VALUE,
        }
    }
}

/// Handle returned by [`HostTrait::checkpoint`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Checkpoint(pub usize);

#[cfg_attr(test, automock)]
pub trait HostTrait {
    fn is_contract(&self, account: Address) -> bool;

    /// Returns the wallet's raw 4 byte answer.
    fn is_valid_signature(
        &self,
        wallet: Address,
        payload: &WalletPayload,
        signature: &[u8],
    ) -> Result<FixedBytes<4>, HostError>;

    /// `token.transferFrom(from, to, amount)` issued by `spender`.
    fn erc20_transfer_from(
        &mut self,
        token: Address,
        spender: Address,
        from: Address,
        to: Address,
        amount: U256,
    ) -> Result<(), HostError>;

    /// `token.safeTransferFrom(from, to, id, amount, "")` issued by `operator`.
    fn erc1155_safe_transfer_from(
        &mut self,
        token: Address,
        operator: Address,
        from: Address,
        to: Address,
        id: U256,
        amount: U256,
    ) -> Result<(), HostError>;

    /// Runs a receiver hook with at most `gas_limit` gas and returns its answer.
    fn call_receiver(
        &mut self,
        receiver: Address,
        hook: &ReceiverHook,
        gas_limit: u64,
    ) -> Result<FixedBytes<4>, HostError>;

    fn checkpoint(&mut self) -> Checkpoint;

    /// Discards every change made after `checkpoint` was taken.
    fn revert_to_checkpoint(&mut self, checkpoint: Checkpoint);

    fn commit_checkpoint(&mut self, checkpoint: Checkpoint);
}
