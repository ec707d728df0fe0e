use alloy::primitives::{Address, U256};
use serde::Serialize;

/// Notifications published by the ledger once a call commits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "camelCase")]
pub enum LedgerEvent {
    NonceChange {
        signer: Address,
        new_nonce: U256,
    },
    TransferSingle {
        operator: Address,
        from: Address,
        to: Address,
        id: U256,
        amount: U256,
    },
    TransferBatch {
        operator: Address,
        from: Address,
        to: Address,
        ids: Vec<U256>,
        amounts: Vec<U256>,
    },
    ApprovalForAll {
        owner: Address,
        operator: Address,
        approved: bool,
    },
}
