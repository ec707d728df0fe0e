mod secp256k;
pub use secp256k::*;

mod gas;
pub use gas::*;
