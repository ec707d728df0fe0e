use alloy::primitives::{eip191_hash_message, Address, Bytes, B256};
use log::debug;

use super::signing_hash;
use crate::{
    constants::{ECDSA_SIGNATURE_LENGTH, ERC1271_MAGIC_VALUE_BYTES, ERC1271_MAGIC_VALUE_BYTES32},
    models::{MetaSignature, MetaTransactionError, SignatureType},
    services::{HostTrait, WalletPayload},
    utils::recover_address_from_prehash,
};

/// Checks that a message was authorized by a signer, either a key-pair
/// account or an ERC-1271 contract wallet.
///
/// Every failure collapses into [`MetaTransactionError::InvalidSignature`];
/// the precise reason is only logged.
#[derive(Debug, Clone, Copy)]
pub struct SignatureValidator {
    domain_separator: B256,
}

impl SignatureValidator {
    pub fn new(domain_separator: B256) -> Self {
        Self { domain_separator }
    }

    pub fn validate<H: HostTrait>(
        &self,
        host: &H,
        signer: Address,
        message: &[u8],
        signature: &MetaSignature,
    ) -> Result<(), MetaTransactionError> {
        if self.is_valid(host, signer, message, signature) {
            Ok(())
        } else {
            Err(MetaTransactionError::InvalidSignature)
        }
    }

    pub fn is_valid<H: HostTrait>(
        &self,
        host: &H,
        signer: Address,
        message: &[u8],
        signature: &MetaSignature,
    ) -> bool {
        if signer == Address::ZERO {
            debug!("rejecting signature for the zero address");
            return false;
        }

        let Some(kind) = signature.kind() else {
            debug!("unsupported signature type {:#04x}", signature.signature_type);
            return false;
        };

        let hash = signing_hash(&self.domain_separator, message);
        match kind {
            SignatureType::EoaHash => recovers_to(&hash, &signature.core, signer),
            SignatureType::EoaPersonalHash => {
                recovers_to(&eip191_hash_message(hash), &signature.core, signer)
            }
            SignatureType::ContractWalletBytes => wallet_accepts(
                host,
                signer,
                &WalletPayload::Bytes(Bytes::copy_from_slice(message)),
                &signature.core,
            ),
            SignatureType::ContractWalletHash => {
                wallet_accepts(host, signer, &WalletPayload::Hash(hash), &signature.core)
            }
        }
    }
}

fn recovers_to(hash: &B256, core: &[u8], signer: Address) -> bool {
    if core.len() != ECDSA_SIGNATURE_LENGTH {
        debug!("ECDSA signature has {} bytes", core.len());
        return false;
    }

    match recover_address_from_prehash(hash, core) {
        Ok(recovered) => recovered == signer,
        Err(e) => {
            debug!("signature recovery failed: {}", e);
            false
        }
    }
}

fn wallet_accepts<H: HostTrait>(
    host: &H,
    wallet: Address,
    payload: &WalletPayload,
    core: &[u8],
) -> bool {
    let expected = match payload {
        WalletPayload::Bytes(_) => ERC1271_MAGIC_VALUE_BYTES,
        WalletPayload::Hash(_) => ERC1271_MAGIC_VALUE_BYTES32,
    };

    match host.is_valid_signature(wallet, payload, core) {
        Ok(value) => value == expected,
        Err(e) => {
            debug!("wallet {} signature check failed: {}", wallet, e);
            false
        }
    }
}
