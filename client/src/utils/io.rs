use crate::error::{MintKitError, Result};

pub fn serialize<T: serde::Serialize>(value: &T) -> Result<Vec<u8>> {
    bincode::serialize(value).map_err(|e| MintKitError::Serialization(e.to_string()))
}
