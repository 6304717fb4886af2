pub mod consts;
pub mod fee;
pub mod metadata;
pub mod pda;
pub mod plan;
pub mod sdk;
pub mod utils;

pub mod prelude {
    pub use crate::consts::*;
    pub use crate::fee::*;
    pub use crate::metadata::*;
    pub use crate::pda::*;
    pub use crate::plan::*;
    pub use crate::sdk::*;
    pub use crate::utils::*;
}
