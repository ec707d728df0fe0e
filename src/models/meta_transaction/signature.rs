use alloy::primitives::{Bytes, U256};
use num_enum::{IntoPrimitive, TryFromPrimitive};
use serde::Serialize;
use strum::Display;

use crate::{constants::SIGNATURE_TRAILER_LENGTH, models::MetaTransactionError};

/// How a meta-transaction signature is checked, selected by the last byte of
/// the signature.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, TryFromPrimitive, IntoPrimitive, Display, Serialize,
)]
#[repr(u8)]
pub enum SignatureType {
    /// ECDSA over the protocol hash. `0x00` is read as this type.
    #[num_enum(alternatives = [0])]
    EoaHash = 0x01,
    /// ECDSA over the `"\x19Ethereum Signed Message:\n32"` prefixed protocol hash
    EoaPersonalHash = 0x02,
    /// ERC-1271 wallet asked with the raw message bytes
    ContractWalletBytes = 0x03,
    /// ERC-1271 wallet asked with the protocol hash
    ContractWalletHash = 0x04,
}

/// Signature bytes as carried in a payload: `core || nonce (32 bytes) || type (1 byte)`.
///
/// The type byte is kept raw so an unknown type is only rejected while the
/// signature is validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetaSignature {
    pub core: Bytes,
    pub nonce: U256,
    pub signature_type: u8,
}

impl MetaSignature {
    pub fn new(core: Bytes, nonce: U256, signature_type: SignatureType) -> Self {
        Self {
            core,
            nonce,
            signature_type: signature_type.into(),
        }
    }

    pub fn decode(signature: &[u8]) -> Result<Self, MetaTransactionError> {
        if signature.len() < SIGNATURE_TRAILER_LENGTH {
            return Err(MetaTransactionError::InvalidSignature);
        }
        let type_offset = signature.len() - 1;
        let nonce_offset = type_offset - 32;

        Ok(Self {
            core: Bytes::copy_from_slice(&signature[..nonce_offset]),
            nonce: U256::from_be_slice(&signature[nonce_offset..type_offset]),
            signature_type: signature[type_offset],
        })
    }

    pub fn encode(&self) -> Bytes {
        let mut out = Vec::with_capacity(self.core.len() + SIGNATURE_TRAILER_LENGTH);
        out.extend_from_slice(&self.core);
        out.extend_from_slice(&self.nonce.to_be_bytes::<32>());
        out.push(self.signature_type);
        out.into()
    }

    /// `None` for discriminators outside the supported set.
    pub fn kind(&self) -> Option<SignatureType> {
        SignatureType::try_from(self.signature_type).ok()
    }
}
