use serde::Serialize;
use thiserror::Error;

use super::RepositoryError;

/// Failures of a balance mutation.
#[derive(Debug, Error, Clone, PartialEq, Eq, Serialize)]
pub enum BalanceError {
    #[error("Balance underflow")]
    Underflow,
    #[error("Balance overflow")]
    Overflow,
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
