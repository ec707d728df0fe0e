//! Multi-token ledger with relayed, signature-authorized transfers and
//! approvals, paying relayers a fee out of the signer's holdings.

pub mod config;
pub mod constants;
pub mod domain;
pub mod logging;
pub mod models;
pub mod repositories;
pub mod services;
pub mod utils;
