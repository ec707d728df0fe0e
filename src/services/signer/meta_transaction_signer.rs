use alloy::{
    primitives::{eip191_hash_message, Address, Bytes, FixedBytes, B256},
    signers::{k256::ecdsa::SigningKey, local::LocalSigner as AlloyLocalSignerClient, SignerSync},
};

use super::SignerError;
use crate::{
    domain::{
        domain_separator, encode_approval_data, encode_transfer_data, signing_hash,
        MessageCodec, MetaPayload,
    },
    models::{
        ApprovalIntent, BatchTransferIntent, GasReceipt, MetaSignature, SignatureType,
        TransferIntent,
    },
};

/// Signs meta-transactions for one ledger with a local secp256k1 key.
///
/// For the contract wallet signature types the key is the wallet owner's and
/// the intent names the wallet as signer.
pub struct MetaTransactionSigner {
    local_signer_client: AlloyLocalSignerClient<SigningKey>,
    codec: MessageCodec,
    domain_separator: B256,
}

impl MetaTransactionSigner {
    pub fn new(raw_key: &[u8], ledger: Address) -> Result<Self, SignerError> {
        if raw_key.len() != 32 {
            return Err(SignerError::KeyError(format!(
                "expected 32 key bytes, got {}",
                raw_key.len()
            )));
        }
        let key_bytes = FixedBytes::from_slice(raw_key);
        let local_signer_client = AlloyLocalSignerClient::from_bytes(&key_bytes)
            .map_err(|e| SignerError::KeyError(e.to_string()))?;

        Ok(Self {
            local_signer_client,
            codec: MessageCodec::new(ledger),
            domain_separator: domain_separator(ledger),
        })
    }

    /// Accepts a hex key with or without `0x` prefix.
    pub fn from_hex(key: &str, ledger: Address) -> Result<Self, SignerError> {
        let raw_key = hex::decode(key.strip_prefix("0x").unwrap_or(key))
            .map_err(|e| SignerError::KeyError(format!("invalid hex key: {}", e)))?;
        Self::new(&raw_key, ledger)
    }

    pub fn address(&self) -> Address {
        self.local_signer_client.address()
    }

    /// Signs a canonical message and returns the 65 byte signature core.
    pub fn sign_message(
        &self,
        message: &[u8],
        signature_type: SignatureType,
    ) -> Result<Bytes, SignerError> {
        let hash = signing_hash(&self.domain_separator, message);
        let digest = match signature_type {
            SignatureType::EoaPersonalHash => eip191_hash_message(hash),
            SignatureType::EoaHash
            | SignatureType::ContractWalletBytes
            | SignatureType::ContractWalletHash => hash,
        };

        let signature = self
            .local_signer_client
            .sign_hash_sync(&digest)
            .map_err(|e| SignerError::SigningError(format!("Failed to sign message: {e}")))?;
        Ok(Bytes::copy_from_slice(&signature.as_bytes()))
    }

    /// Builds the relayer payload for a single transfer. The receipt is only
    /// included when the intent authorizes a fee.
    pub fn sign_transfer(
        &self,
        intent: &TransferIntent,
        receipt: Option<&GasReceipt>,
        signature_type: SignatureType,
    ) -> Result<Bytes, SignerError> {
        let receipt = receipt.filter(|_| intent.is_gas_fee);
        let message = self.codec.transfer_message(intent, receipt);
        let signed_data = encode_transfer_data(receipt, &intent.data);
        self.payload(&message, signed_data, intent.nonce, signature_type)
    }

    pub fn sign_batch_transfer(
        &self,
        intent: &BatchTransferIntent,
        receipt: Option<&GasReceipt>,
        signature_type: SignatureType,
    ) -> Result<Bytes, SignerError> {
        let receipt = receipt.filter(|_| intent.is_gas_fee);
        let message = self.codec.batch_transfer_message(intent, receipt);
        let signed_data = encode_transfer_data(receipt, &intent.data);
        self.payload(&message, signed_data, intent.nonce, signature_type)
    }

    pub fn sign_approval(
        &self,
        intent: &ApprovalIntent,
        receipt: Option<&GasReceipt>,
        signature_type: SignatureType,
    ) -> Result<Bytes, SignerError> {
        let receipt = receipt.filter(|_| intent.is_gas_fee);
        let message = self.codec.approval_message(intent, receipt);
        let signed_data = encode_approval_data(receipt);
        self.payload(&message, signed_data, intent.nonce, signature_type)
    }

    fn payload(
        &self,
        message: &[u8],
        signed_data: Vec<u8>,
        nonce: alloy::primitives::U256,
        signature_type: SignatureType,
    ) -> Result<Bytes, SignerError> {
        let core = self.sign_message(message, signature_type)?;
        let signature = MetaSignature::new(core, nonce, signature_type);
        Ok(MetaPayload::new(signature, signed_data).encode())
    }
}
