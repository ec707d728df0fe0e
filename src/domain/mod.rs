//! # Domain Module
//!
//! Core logic of the meta-transaction ledger:
//!
//! * Message construction and signature validation
//! * Nonce ordering
//! * Fee settlement and receiver callbacks
//! * Atomic orchestration of transfers and approvals

pub mod meta_transaction;
pub use meta_transaction::*;
