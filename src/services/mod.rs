//! # Services Module
//!
//! Collaborators of the ledger: the host environment it runs in and the
//! signing service used by meta-transaction senders.

mod host;
pub use host::*;

mod signer;
pub use signer::*;
