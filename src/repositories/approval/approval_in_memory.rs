use alloy::primitives::Address;
use dashmap::DashSet;

use super::ApprovalRepositoryTrait;
use crate::models::RepositoryError;

#[derive(Debug, Default, Clone)]
pub struct InMemoryApprovalRepository {
    store: DashSet<(Address, Address)>, // (owner, operator) pairs that are approved
}

impl InMemoryApprovalRepository {
    pub fn new() -> Self {
        Self {
            store: DashSet::new(),
        }
    }
}

impl ApprovalRepositoryTrait for InMemoryApprovalRepository {
    fn is_approved_for_all(
        &self,
        owner: Address,
        operator: Address,
    ) -> Result<bool, RepositoryError> {
        Ok(self.store.contains(&(owner, operator)))
    }

    fn set_approval_for_all(
        &self,
        owner: Address,
        operator: Address,
        approved: bool,
    ) -> Result<(), RepositoryError> {
        if approved {
            self.store.insert((owner, operator));
        } else {
            self.store.remove(&(owner, operator));
        }
        Ok(())
    }
}
