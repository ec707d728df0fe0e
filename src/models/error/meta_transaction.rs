use alloy::primitives::U256;
use serde::Serialize;
use thiserror::Error;

use super::{BalanceError, RepositoryError};

/// Reasons a meta-transaction is rejected.
///
/// Every variant is terminal: the ledger store, the host and the event log are
/// restored to their state before the call. Signature problems of any kind
/// (undecodable payload, unknown type, bad wallet response, recovery mismatch)
/// are reported as the single [`MetaTransactionError::InvalidSignature`].
#[derive(Debug, Error, Clone, PartialEq, Eq, Serialize)]
pub enum MetaTransactionError {
    #[error("Invalid signature")]
    InvalidSignature,

    #[error("Invalid nonce: expected {expected}, provided {provided}")]
    InvalidNonce { expected: U256, provided: U256 },

    #[error("Invalid recipient: transfers to the zero address are not allowed")]
    InvalidRecipient,

    #[error("Balance underflow")]
    Underflow,

    #[error("Balance overflow")]
    Overflow,

    #[error("Unsupported fee asset")]
    UnsupportedAsset,

    #[error("Ledger is not an approved operator for the fee token")]
    InvalidOperator,

    #[error("Receiver rejected the transfer")]
    InvalidOnReceive,

    #[error("Receiver callback targets the ledger itself")]
    InvalidMethod,

    #[error("Ids and amounts must have the same length")]
    InvalidArrayLength,

    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),
}

impl From<BalanceError> for MetaTransactionError {
    fn from(error: BalanceError) -> Self {
        match error {
            BalanceError::Underflow => MetaTransactionError::Underflow,
            BalanceError::Overflow => MetaTransactionError::Overflow,
            BalanceError::Repository(e) => MetaTransactionError::Repository(e),
        }
    }
}
