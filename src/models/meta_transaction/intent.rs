use alloy::primitives::{Address, Bytes, U256};

/// What a signer authorizes with a single-token meta transfer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferIntent {
    pub from: Address,
    pub to: Address,
    pub id: U256,
    pub amount: U256,
    pub nonce: U256,
    pub is_gas_fee: bool,
    pub data: Bytes,
}

/// What a signer authorizes with a batch meta transfer. `ids` and `amounts`
/// are paired by index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchTransferIntent {
    pub from: Address,
    pub to: Address,
    pub ids: Vec<U256>,
    pub amounts: Vec<U256>,
    pub nonce: U256,
    pub is_gas_fee: bool,
    pub data: Bytes,
}

/// What a signer authorizes with a meta approval.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApprovalIntent {
    pub owner: Address,
    pub operator: Address,
    pub approved: bool,
    pub nonce: U256,
    pub is_gas_fee: bool,
}
