use alloy::primitives::{b256, fixed_bytes, keccak256, FixedBytes, B256};
use once_cell::sync::Lazy;

/// keccak256("EIP712Domain(address verifyingContract)")
pub const DOMAIN_SEPARATOR_TYPEHASH: B256 =
    b256!("035aff83d86937d35b32e04f0ddc6ff469290eef2f1b692d8a815c89404d4749");

/// Prefix of the protocol hash, `0x19 0x01`
pub const EIP712_PREFIX: [u8; 2] = [0x19, 0x01];

pub static META_TRANSFER_TYPEHASH: Lazy<B256> = Lazy::new(|| {
    keccak256("metaSafeTransferFrom(address,address,uint256,uint256,bool,bytes)")
});

pub static META_BATCH_TRANSFER_TYPEHASH: Lazy<B256> = Lazy::new(|| {
    keccak256("metaSafeBatchTransferFrom(address,address,uint256[],uint256[],bool,bytes)")
});

pub static META_APPROVAL_TYPEHASH: Lazy<B256> =
    Lazy::new(|| keccak256("metaSetApprovalForAll(address,address,bool,bool,bytes)"));

/// Return value of `onERC1155Received` accepting a single transfer
pub const ERC1155_RECEIVED_VALUE: FixedBytes<4> = fixed_bytes!("f23a6e61");

/// Return value of `onERC1155BatchReceived` accepting a batch transfer
pub const ERC1155_BATCH_RECEIVED_VALUE: FixedBytes<4> = fixed_bytes!("bc197c81");

/// ERC-1271 magic value for `isValidSignature(bytes,bytes)`
pub const ERC1271_MAGIC_VALUE_BYTES: FixedBytes<4> = fixed_bytes!("20c13b0b");

/// ERC-1271 magic value for `isValidSignature(bytes32,bytes)`
pub const ERC1271_MAGIC_VALUE_BYTES32: FixedBytes<4> = fixed_bytes!("1626ba7e");

/// Length of an ECDSA signature core, `r || s || v`
pub const ECDSA_SIGNATURE_LENGTH: usize = 65;

/// Trailing nonce word plus the one byte signature type
pub const SIGNATURE_TRAILER_LENGTH: usize = 33;

/// Only `gas_left - gas_left / CALL_GAS_RETENTION_DIVISOR` can be forwarded to a callee
pub const CALL_GAS_RETENTION_DIVISOR: u64 = 64;

/// Fee token kind byte for multi-token (ERC-1155) fees
pub const FEE_TOKEN_KIND_ERC1155: u8 = 0;

/// Fee token kind byte for fungible (ERC-20) fees
pub const FEE_TOKEN_KIND_ERC20: u8 = 1;
