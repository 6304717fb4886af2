use mintkit_api::consts::*;
use solana_sdk::{account::Account, commitment_config::CommitmentConfig, pubkey::Pubkey};
use spl_token_2022::{
    extension::{BaseStateWithExtensions, ExtensionType, StateWithExtensions},
    state::{Account as TokenAccountState, AccountState, Mint as MintState},
};

use crate::error::{MintKitError, Result};
use crate::ledger::Ledger;

/// Decoded token account together with its address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenAccount {
    pub address: Pubkey,
    pub mint: Pubkey,
    pub owner: Pubkey,
    pub amount: u64,
    pub delegate: Option<Pubkey>,
    pub delegated_amount: u64,
    pub is_frozen: bool,
    pub is_native: Option<u64>,
    pub close_authority: Option<Pubkey>,
}

/// Decoded mint together with its address and extension list.
#[derive(Debug, Clone, PartialEq)]
pub struct MintInfo {
    pub address: Pubkey,
    pub mint_authority: Option<Pubkey>,
    pub supply: u64,
    pub decimals: u8,
    pub is_initialized: bool,
    pub freeze_authority: Option<Pubkey>,
    pub extensions: Vec<ExtensionType>,
}

pub async fn get_token_account(
    ledger: &dyn Ledger,
    address: &Pubkey,
    commitment: CommitmentConfig,
    program_id: &Pubkey,
) -> Result<TokenAccount> {
    let account = ledger
        .get_account(address, commitment)
        .await?
        .ok_or(MintKitError::AccountNotFound(*address))?;
    unpack_token_account(address, &account, program_id)
}

pub fn unpack_token_account(address: &Pubkey, account: &Account, program_id: &Pubkey) -> Result<TokenAccount> {
    check_owner_and_size(address, account, program_id, ACCOUNT_LEN)?;

    let state = StateWithExtensions::<TokenAccountState>::unpack(&account.data)?;
    let base = state.base;

    Ok(TokenAccount {
        address: *address,
        mint: base.mint,
        owner: base.owner,
        amount: base.amount,
        delegate: base.delegate.into(),
        delegated_amount: base.delegated_amount,
        is_frozen: base.state == AccountState::Frozen,
        is_native: base.is_native.into(),
        close_authority: base.close_authority.into(),
    })
}

pub async fn get_mint(
    ledger: &dyn Ledger,
    address: &Pubkey,
    commitment: CommitmentConfig,
    program_id: &Pubkey,
) -> Result<MintInfo> {
    let account = ledger
        .get_account(address, commitment)
        .await?
        .ok_or(MintKitError::AccountNotFound(*address))?;
    unpack_mint(address, &account, program_id)
}

pub fn unpack_mint(address: &Pubkey, account: &Account, program_id: &Pubkey) -> Result<MintInfo> {
    check_owner_and_size(address, account, program_id, MINT_LEN)?;

    let state = StateWithExtensions::<MintState>::unpack(&account.data)?;
    let extensions = state.get_extension_types()?;
    let base = state.base;

    Ok(MintInfo {
        address: *address,
        mint_authority: base.mint_authority.into(),
        supply: base.supply,
        decimals: base.decimals,
        is_initialized: base.is_initialized,
        freeze_authority: base.freeze_authority.into(),
        extensions,
    })
}

/// Bytes needed by a token account for `mint`, including the extensions the
/// mint forces on its accounts.
pub fn account_len_for_mint(mint: &MintInfo) -> Result<usize> {
    let required = ExtensionType::get_required_init_account_extensions(&mint.extensions);
    Ok(ExtensionType::try_calculate_account_len::<TokenAccountState>(&required)?)
}

fn check_owner_and_size(address: &Pubkey, account: &Account, program_id: &Pubkey, min_len: usize) -> Result<()> {
    if account.owner != *program_id {
        return Err(MintKitError::InvalidAccountOwner {
            address: *address,
            owner: account.owner,
            expected: *program_id,
        });
    }
    if account.data.len() < min_len {
        return Err(MintKitError::InvalidAccountSize {
            address: *address,
            len: account.data.len(),
        });
    }
    Ok(())
}
