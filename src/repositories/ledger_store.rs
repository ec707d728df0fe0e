use super::{InMemoryApprovalRepository, InMemoryBalanceRepository, InMemoryNonceRepository};

/// All state owned by a ledger instance.
///
/// Cloning produces an independent copy, which is how a call takes the
/// snapshot it restores on failure.
#[derive(Debug, Default, Clone)]
pub struct LedgerStore {
    pub balances: InMemoryBalanceRepository,
    pub approvals: InMemoryApprovalRepository,
    pub nonces: InMemoryNonceRepository,
}

impl LedgerStore {
    pub fn new() -> Self {
        Self::default()
    }
}
