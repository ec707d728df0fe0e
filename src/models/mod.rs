mod error;
pub use error::*;

mod meta_transaction;
pub use meta_transaction::*;
