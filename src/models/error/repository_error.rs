use serde::Serialize;
use thiserror::Error;

/// Failure of a storage backend behind a repository trait. The in-memory
/// repositories never fail.
#[derive(Debug, Error, Clone, PartialEq, Eq, Serialize)]
pub enum RepositoryError {
    #[error("An unknown error occurred: {0}")]
    Unknown(String),
}
