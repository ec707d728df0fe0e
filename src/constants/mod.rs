mod logging;
pub use logging::*;

mod meta_transaction;
pub use meta_transaction::*;

mod config;
pub use config::*;
