use alloy::primitives::{keccak256, Address, B256};

use crate::constants::{DOMAIN_SEPARATOR_TYPEHASH, EIP712_PREFIX};

const DOMAIN_SEPARATOR_INPUT_SIZE: usize = 64; // typehash + left padded address
const SIGNING_HASH_INPUT_SIZE: usize = 66; // 2 (prefix) + 32 (domain) + 32 (message hash)

/// Computes the domain separator binding signatures to one ledger instance.
///
/// # Arguments
/// * `ledger` - Address of the ledger contract
///
/// # Returns
/// `keccak256(DOMAIN_SEPARATOR_TYPEHASH || uint256(ledger))`
pub fn domain_separator(ledger: Address) -> B256 {
    let mut input = [0u8; DOMAIN_SEPARATOR_INPUT_SIZE];
    input[..32].copy_from_slice(DOMAIN_SEPARATOR_TYPEHASH.as_slice());
    input[44..].copy_from_slice(ledger.as_slice());
    keccak256(input)
}

/// Computes the protocol hash of a message.
///
/// # Arguments
/// * `domain_separator` - Separator of the ledger the message targets
/// * `message` - Canonical message bytes
///
/// # Returns
/// `keccak256(0x19 0x01 || domain_separator || keccak256(message))`
pub fn signing_hash(domain_separator: &B256, message: &[u8]) -> B256 {
    let mut input = [0u8; SIGNING_HASH_INPUT_SIZE];
    input[0..2].copy_from_slice(&EIP712_PREFIX);
    input[2..34].copy_from_slice(domain_separator.as_slice());
    input[34..66].copy_from_slice(keccak256(message).as_slice());
    keccak256(input)
}
