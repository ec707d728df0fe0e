//! Meta-transaction authorization and fee settlement.

mod codec;
pub use codec::*;

mod domain_separator;
pub use domain_separator::*;

mod fee_settlement;
pub use fee_settlement::*;

mod meta_ledger;
pub use meta_ledger::*;

mod nonce_registry;
pub use nonce_registry::*;

mod payload;
pub use payload::*;

mod receiver_callback;
pub use receiver_callback::*;

mod signature_validator;
pub use signature_validator::*;
