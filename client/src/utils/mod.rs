mod account;
mod ata;
mod io;
mod mint;

pub use account::*;
pub use ata::*;
pub use io::*;
pub use mint::*;
