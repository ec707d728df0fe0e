use alloy::primitives::{Address, U256};
use serde::Serialize;

use super::{FeeToken, LedgerEvent};

/// Fee paid to a relayer out of the signer's balance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SettledFee {
    pub token: FeeToken,
    pub recipient: Address,
    pub amount: U256,
}

/// Outcome of a committed meta-transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetaTransactionReceipt {
    /// Signer nonce after the call
    pub nonce: U256,
    /// Events in publication order
    pub events: Vec<LedgerEvent>,
    pub fee: Option<SettledFee>,
}
