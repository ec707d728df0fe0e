//! Operator approvals: whether `operator` may move every token of `owner`.

mod approval_in_memory;
pub use approval_in_memory::InMemoryApprovalRepository;

use alloy::primitives::Address;

#[cfg(test)]
use mockall::automock;

use crate::models::RepositoryError;

#[cfg_attr(test, automock)]
pub trait ApprovalRepositoryTrait {
    fn is_approved_for_all(&self, owner: Address, operator: Address)
        -> Result<bool, RepositoryError>;

    fn set_approval_for_all(
        &self,
        owner: Address,
        operator: Address,
        approved: bool,
    ) -> Result<(), RepositoryError>;
}
