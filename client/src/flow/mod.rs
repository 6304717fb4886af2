pub mod launch;
pub mod metadata;

pub use launch::*;
pub use metadata::*;
