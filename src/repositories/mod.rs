//! # Repository Module
//!
//! Ledger state behind repository traits: balances, operator approvals and
//! signer nonces.

mod approval;
pub use approval::*;

mod balance;
pub use balance::*;

mod nonce;
pub use nonce::*;

mod ledger_store;
pub use ledger_store::*;
