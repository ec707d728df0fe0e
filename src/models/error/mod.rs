mod repository_error;
pub use repository_error::*;

mod balance;
pub use balance::*;

mod meta_transaction;
pub use meta_transaction::*;
