//! # Configuration
//!
//! Two layers: [`RuntimeConfig`] read from environment variables and the
//! [`LedgerConfigFile`] JSON document describing the ledger to start.

mod config_file;
pub use config_file::*;

mod runtime_config;
pub use runtime_config::*;
