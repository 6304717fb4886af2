#![allow(dead_code)]
mod svm;

pub use svm::*;
pub use print::*;
