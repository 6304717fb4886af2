use mpl_token_metadata::{instructions::CreateMetadataAccountV3Builder, types::DataV2};
use solana_sdk::{instruction::Instruction, pubkey::Pubkey};
use thiserror::Error;

use crate::consts::*;
use crate::pda::find_metadata_pda;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MetadataError {
    #[error("name exceeds {MAX_NAME_LEN} bytes ({0})")]
    NameTooLong(usize),
    #[error("symbol exceeds {MAX_SYMBOL_LEN} bytes ({0})")]
    SymbolTooLong(usize),
    #[error("uri exceeds {MAX_URI_LEN} bytes ({0})")]
    UriTooLong(usize),
    #[error("name must not be empty")]
    EmptyName,
}

/// Descriptive fields attached to a mint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenMetadata {
    pub name: String,
    pub symbol: String,
    pub uri: String,
}

impl TokenMetadata {
    pub fn new(name: impl Into<String>, symbol: impl Into<String>, uri: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            symbol: symbol.into(),
            uri: uri.into(),
        }
    }

    pub fn validate(&self) -> Result<(), MetadataError> {
        if self.name.is_empty() {
            return Err(MetadataError::EmptyName);
        }
        if self.name.len() > MAX_NAME_LEN {
            return Err(MetadataError::NameTooLong(self.name.len()));
        }
        if self.symbol.len() > MAX_SYMBOL_LEN {
            return Err(MetadataError::SymbolTooLong(self.symbol.len()));
        }
        if self.uri.len() > MAX_URI_LEN {
            return Err(MetadataError::UriTooLong(self.uri.len()));
        }
        Ok(())
    }

    fn to_data(&self) -> DataV2 {
        DataV2 {
            name: self.name.clone(),
            symbol: self.symbol.clone(),
            uri: self.uri.clone(),
            seller_fee_basis_points: SELLER_FEE_BASIS_POINTS,
            creators: None,
            collection: None,
            uses: None,
        }
    }
}

/// `CreateMetadataAccountV3` for `mint`: mutable, no royalty, no creators,
/// no collection. `update_authority` signs.
pub fn build_create_metadata_ix(
    mint: Pubkey,
    mint_authority: Pubkey,
    payer: Pubkey,
    update_authority: Pubkey,
    metadata: &TokenMetadata,
) -> Instruction {
    let (metadata_pda, _) = find_metadata_pda(&mint);

    CreateMetadataAccountV3Builder::new()
        .metadata(metadata_pda)
        .mint(mint)
        .mint_authority(mint_authority)
        .payer(payer)
        .update_authority(update_authority, true)
        .data(metadata.to_data())
        .is_mutable(true)
        .instruction()
}
