use mintkit_api::prelude::*;
use solana_sdk::{commitment_config::CommitmentConfig, pubkey::Pubkey, signature::Signature, signer::Signer};
use tracing::info;

use crate::error::{MintKitError, Result};
use crate::ledger::Ledger;
use crate::options::TokenOptions;
use crate::submit::submit;
use crate::utils::{account_len_for_mint, get_mint};

/// Associated token account address for `(owner, mint)`.
///
/// Off-curve owners (PDAs) are refused unless `allow_owner_off_curve`.
pub fn associated_token_address(
    owner: &Pubkey,
    mint: &Pubkey,
    allow_owner_off_curve: bool,
    opts: &TokenOptions,
) -> Result<Pubkey> {
    if !allow_owner_off_curve && !owner.is_on_curve() {
        return Err(MintKitError::OwnerOffCurve(*owner));
    }
    let (address, _) = find_associated_token_address(
        owner,
        mint,
        &opts.program_id,
        &opts.associated_token_program_id,
    );
    Ok(address)
}

/// Plan that creates a token account for `(owner, mint)`.
///
/// Without `account` this is the associated-account `Create`, whose address
/// is implied. With `account` the mint is read first so the allocation fits
/// the mint's extensions.
pub async fn build_account_creation(
    ledger: &dyn Ledger,
    payer: &Pubkey,
    mint: &Pubkey,
    owner: &Pubkey,
    account: Option<&Pubkey>,
    commitment: CommitmentConfig,
    opts: &TokenOptions,
) -> Result<(InstructionPlan, Pubkey)> {
    let Some(account) = account else {
        let (address, _) = find_associated_token_address(
            owner,
            mint,
            &opts.program_id,
            &opts.associated_token_program_id,
        );
        let plan = build_create_associated_account_plan(
            payer,
            owner,
            mint,
            &opts.program_id,
            &opts.associated_token_program_id,
            opts.fee,
        );
        return Ok((plan, address));
    };

    let mint_state = get_mint(ledger, mint, commitment, &opts.program_id).await?;
    let space = account_len_for_mint(&mint_state)?;
    let lamports = ledger.get_minimum_balance_for_rent_exemption(space).await?;

    let plan = build_create_account_plan(
        payer,
        account,
        mint,
        owner,
        space,
        lamports,
        &opts.program_id,
        opts.fee,
    )?;

    Ok((plan, *account))
}

/// Creates a token account for `(owner, mint)` and returns its address.
///
/// With no `keypair` the associated account is created; otherwise the
/// account lives at `keypair`'s address and `keypair` co-signs.
pub async fn create_account(
    ledger: &dyn Ledger,
    payer: &dyn Signer,
    mint: &Pubkey,
    owner: &Pubkey,
    keypair: Option<&dyn Signer>,
    opts: &TokenOptions,
) -> Result<(Pubkey, Signature)> {
    let payer_pk = payer.pubkey();
    let account_pk = keypair.map(|k| k.pubkey());

    let (plan, address) = build_account_creation(
        ledger,
        &payer_pk,
        mint,
        owner,
        account_pk.as_ref(),
        opts.confirm.commitment,
        opts,
    )
    .await?;

    let mut signers: Vec<&dyn Signer> = vec![payer];
    signers.extend(keypair);
    let signature = submit(ledger, &plan, &payer_pk, &signers, &opts.confirm).await?;

    info!(account = %address, %mint, %owner, %signature, "created token account");
    Ok((address, signature))
}
