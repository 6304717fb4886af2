pub mod consts;
mod error;
pub mod flow;
mod ledger;
mod options;
mod provision;
mod signer;
mod submit;
pub mod utils;

pub use error::*;
pub use flow::*;
pub use ledger::*;
pub use options::*;
pub use provision::*;
pub use signer::*;
pub use submit::*;
pub use utils::*;
