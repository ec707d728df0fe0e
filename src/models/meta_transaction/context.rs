use alloy::primitives::Address;
use serde::{Deserialize, Serialize};

/// Execution context of a relayed call.
///
/// `caller` is the immediate caller of the ledger (the relayer or a contract
/// acting for it) and `gas` the gas still available when the ledger is
/// entered. `origin`, the account that started the outer transaction, is
/// carried for callers' bookkeeping only: the ledger never reads it, and fees
/// without an explicit recipient go to `caller`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallContext {
    pub caller: Address,
    pub origin: Address,
    pub gas: u64,
}

impl CallContext {
    pub fn new(caller: Address, gas: u64) -> Self {
        Self {
            caller,
            origin: caller,
            gas,
        }
    }

    pub fn with_origin(mut self, origin: Address) -> Self {
        self.origin = origin;
        self
    }
}
