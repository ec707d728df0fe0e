use alloy::primitives::{Address, B256};
use k256::ecdsa::{RecoveryId, Signature, SigningKey, VerifyingKey};
use serde::Serialize;
use sha3::{Digest, Keccak256};

use crate::constants::ECDSA_SIGNATURE_LENGTH;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, Serialize)]
pub enum Secp256k1Error {
    #[error("Secp256k1 recovery error: {0}")]
    RecoveryError(String),
    #[error("Secp256k1 signing error: {0}")]
    SigningError(String),
    #[error("Invalid signature length: expected {expected} bytes, got {actual}")]
    InvalidLength { expected: usize, actual: usize },
}

/// Derives the account address of a public key: the last 20 bytes of the
/// Keccak-256 hash of the uncompressed point without its `0x04` marker.
pub fn public_key_to_address(key: &VerifyingKey) -> Address {
    let point = key.to_encoded_point(false);
    let hash = Keccak256::digest(&point.as_bytes()[1..]);
    Address::from_slice(&hash[12..])
}

/// Recovers the signing address of a 65 byte `r || s || v` signature over a
/// 32 byte digest. `v` may be given as `0`/`1` or `27`/`28`.
pub fn recover_address_from_prehash(
    hash: &B256,
    signature: &[u8],
) -> Result<Address, Secp256k1Error> {
    if signature.len() != ECDSA_SIGNATURE_LENGTH {
        return Err(Secp256k1Error::InvalidLength {
            expected: ECDSA_SIGNATURE_LENGTH,
            actual: signature.len(),
        });
    }

    let v = match signature[64] {
        v @ (0 | 1) => v,
        v @ (27 | 28) => v - 27,
        other => {
            return Err(Secp256k1Error::RecoveryError(format!(
                "invalid recovery byte {}",
                other
            )))
        }
    };
    let rec_id = RecoveryId::try_from(v)
        .map_err(|e| Secp256k1Error::RecoveryError(e.to_string()))?;
    let sig = Signature::from_slice(&signature[..64])
        .map_err(|e| Secp256k1Error::RecoveryError(e.to_string()))?;

    let key = VerifyingKey::recover_from_prehash(hash.as_slice(), &sig, rec_id)
        .map_err(|e| Secp256k1Error::RecoveryError(e.to_string()))?;

    Ok(public_key_to_address(&key))
}

/// Signs a 32 byte digest, returning `r || s || v` with `v` in `27`/`28`.
pub fn sign_prehash(key: &SigningKey, hash: &B256) -> Result<[u8; 65], Secp256k1Error> {
    let (sig, rec_id) = key
        .sign_prehash_recoverable(hash.as_slice())
        .map_err(|e| Secp256k1Error::SigningError(e.to_string()))?;

    let mut out = [0u8; 65];
    out[..64].copy_from_slice(&sig.to_bytes());
    out[64] = rec_id.to_byte() + 27;
    Ok(out)
}
