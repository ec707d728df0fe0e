//! # Signer
//!
//! Client side of a meta-transaction: builds and signs the payload a relayer
//! submits on the signer's behalf.

mod meta_transaction_signer;
pub use meta_transaction_signer::*;

use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
pub enum SignerError {
    #[error("Failed to sign message: {0}")]
    SigningError(String),

    #[error("Invalid key format: {0}")]
    KeyError(String),
}
