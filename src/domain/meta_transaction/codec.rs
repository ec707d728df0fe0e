//! Canonical byte messages a signer authorizes.
//!
//! Every message starts with the type hash of its operation and the ledger
//! address, followed by the operation fields, the nonce, a fee flag word and
//! the ABI-encoded signed data. Fixed-width fields are packed, so the layout
//! is unambiguous and any change to a single field changes the bytes.

use alloy::{
    primitives::{keccak256, Address, Bytes, B256, U256},
    sol_types::SolValue,
};

use crate::{
    constants::{META_APPROVAL_TYPEHASH, META_BATCH_TRANSFER_TYPEHASH, META_TRANSFER_TYPEHASH},
    models::{ApprovalIntent, BatchTransferIntent, GasReceipt, TransferIntent},
};

/// Signed data of a transfer: `abi.encode(receipt, data)` or `abi.encode(data)`.
pub fn encode_transfer_data(receipt: Option<&GasReceipt>, data: &[u8]) -> Vec<u8> {
    let data = Bytes::copy_from_slice(data);
    match receipt {
        Some(receipt) => (receipt.clone(), data).abi_encode_params(),
        None => data.abi_encode(),
    }
}

/// Signed data of an approval: `abi.encode(receipt)` or nothing.
pub fn encode_approval_data(receipt: Option<&GasReceipt>) -> Vec<u8> {
    receipt.map(SolValue::abi_encode).unwrap_or_default()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageCodec {
    ledger: Address,
}

impl MessageCodec {
    pub fn new(ledger: Address) -> Self {
        Self { ledger }
    }

    pub fn ledger(&self) -> Address {
        self.ledger
    }

    pub fn transfer_message(
        &self,
        intent: &TransferIntent,
        receipt: Option<&GasReceipt>,
    ) -> Vec<u8> {
        let mut message = self.header(&META_TRANSFER_TYPEHASH);
        message.extend_from_slice(intent.from.as_slice());
        message.extend_from_slice(intent.to.as_slice());
        push_word(&mut message, intent.id);
        push_word(&mut message, intent.amount);
        push_word(&mut message, intent.nonce);
        push_flag(&mut message, intent.is_gas_fee);
        message.extend(encode_transfer_data(receipt, &intent.data));
        message
    }

    pub fn batch_transfer_message(
        &self,
        intent: &BatchTransferIntent,
        receipt: Option<&GasReceipt>,
    ) -> Vec<u8> {
        let mut message = self.header(&META_BATCH_TRANSFER_TYPEHASH);
        message.extend_from_slice(intent.from.as_slice());
        message.extend_from_slice(intent.to.as_slice());
        message.extend_from_slice(packed_hash(&intent.ids).as_slice());
        message.extend_from_slice(packed_hash(&intent.amounts).as_slice());
        push_word(&mut message, intent.nonce);
        push_flag(&mut message, intent.is_gas_fee);
        message.extend(encode_transfer_data(receipt, &intent.data));
        message
    }

    pub fn approval_message(
        &self,
        intent: &ApprovalIntent,
        receipt: Option<&GasReceipt>,
    ) -> Vec<u8> {
        let mut message = self.header(&META_APPROVAL_TYPEHASH);
        message.extend_from_slice(intent.owner.as_slice());
        message.extend_from_slice(intent.operator.as_slice());
        push_flag(&mut message, intent.approved);
        push_word(&mut message, intent.nonce);
        push_flag(&mut message, intent.is_gas_fee);
        message.extend(encode_approval_data(receipt));
        message
    }

    fn header(&self, typehash: &B256) -> Vec<u8> {
        let mut message = Vec::with_capacity(256);
        message.extend_from_slice(typehash.as_slice());
        message.extend_from_slice(self.ledger.as_slice());
        message
    }
}

fn push_word(message: &mut Vec<u8>, value: U256) {
    message.extend_from_slice(&value.to_be_bytes::<32>());
}

fn push_flag(message: &mut Vec<u8>, flag: bool) {
    push_word(message, U256::from(flag as u8));
}

/// `keccak256` of the values packed as consecutive 32 byte words.
fn packed_hash(values: &[U256]) -> B256 {
    let mut packed = Vec::with_capacity(values.len() * 32);
    for value in values {
        packed.extend_from_slice(&value.to_be_bytes::<32>());
    }
    keccak256(packed)
}
