//! Relayer supplied payloads: `abi.encode(bytes signature, bytes signedData)`.
//!
//! Anything that does not decode is reported as an invalid signature.

use alloy::{primitives::Bytes, sol_types::SolValue};
use log::debug;

use super::codec::encode_transfer_data;
use crate::models::{GasReceipt, MetaSignature, MetaTransactionError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetaPayload {
    pub signature: MetaSignature,
    pub signed_data: Bytes,
}

impl MetaPayload {
    pub fn new(signature: MetaSignature, signed_data: impl Into<Bytes>) -> Self {
        Self {
            signature,
            signed_data: signed_data.into(),
        }
    }

    pub fn decode(payload: &[u8]) -> Result<Self, MetaTransactionError> {
        let (signature, signed_data) = <(Bytes, Bytes)>::abi_decode_params(payload, true)
            .map_err(|e| {
                debug!("undecodable meta-transaction payload: {}", e);
                MetaTransactionError::InvalidSignature
            })?;

        Ok(Self {
            signature: MetaSignature::decode(&signature)?,
            signed_data,
        })
    }

    pub fn encode(&self) -> Bytes {
        (self.signature.encode(), self.signed_data.clone())
            .abi_encode_params()
            .into()
    }
}

/// Signed data of a transfer after decoding for the relayer's claim flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferData {
    pub receipt: Option<GasReceipt>,
    pub data: Bytes,
}

impl TransferData {
    pub fn decode(signed_data: &[u8], is_gas_fee: bool) -> Result<Self, MetaTransactionError> {
        let decoded = if is_gas_fee {
            <(GasReceipt, Bytes)>::abi_decode_params(signed_data, true)
                .map(|(receipt, data)| Self {
                    receipt: Some(receipt),
                    data,
                })
        } else {
            Bytes::abi_decode(signed_data, true).map(|data| Self {
                receipt: None,
                data,
            })
        };

        decoded.map_err(|e| {
            debug!(
                "transfer data does not decode with fee claim {}: {}",
                is_gas_fee, e
            );
            MetaTransactionError::InvalidSignature
        })
    }

    pub fn encode(&self) -> Vec<u8> {
        encode_transfer_data(self.receipt.as_ref(), &self.data)
    }
}

/// Fee receipt of an approval, present only when a fee is claimed.
pub fn decode_approval_data(
    signed_data: &[u8],
    is_gas_fee: bool,
) -> Result<Option<GasReceipt>, MetaTransactionError> {
    if !is_gas_fee {
        return Ok(None);
    }

    GasReceipt::abi_decode(signed_data, true)
        .map(Some)
        .map_err(|e| {
            debug!("approval data does not decode as a fee receipt: {}", e);
            MetaTransactionError::InvalidSignature
        })
}
