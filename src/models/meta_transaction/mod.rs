//! Value objects exchanged between a signer, a relayer and the ledger.

mod context;
pub use context::*;

mod event;
pub use event::*;

mod gas_receipt;
pub use gas_receipt::*;

mod intent;
pub use intent::*;

mod receipt;
pub use receipt::*;

mod signature;
pub use signature::*;
