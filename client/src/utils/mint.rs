use mintkit_api::prelude::*;
use solana_sdk::{pubkey::Pubkey, signature::Signature, signer::Signer};
use tracing::info;

use crate::error::Result;
use crate::ledger::Ledger;
use crate::options::TokenOptions;
use crate::signer::{resolve_signers, Authority};
use crate::submit::submit;

/// Plan for a new mint at `mint`: fee directive, rent-exempt allocation,
/// `InitializeMint2`.
#[allow(clippy::too_many_arguments)]
pub async fn build_mint_creation(
    ledger: &dyn Ledger,
    payer: &Pubkey,
    mint_authority: &Pubkey,
    freeze_authority: Option<&Pubkey>,
    decimals: u8,
    mint: &Pubkey,
    program_id: &Pubkey,
    fee: FeePolicy,
) -> Result<(InstructionPlan, Pubkey)> {
    let lamports = ledger.get_minimum_balance_for_rent_exemption(MINT_LEN).await?;

    let plan = build_create_mint_plan(
        payer,
        mint,
        mint_authority,
        freeze_authority,
        decimals,
        lamports,
        program_id,
        fee,
    )?;

    Ok((plan, *mint))
}

/// Creates and initializes a new mint, signed by `payer` and `mint`.
pub async fn create_mint(
    ledger: &dyn Ledger,
    payer: &dyn Signer,
    mint_authority: &Pubkey,
    freeze_authority: Option<&Pubkey>,
    decimals: u8,
    mint: &dyn Signer,
    opts: &TokenOptions,
) -> Result<(Pubkey, Signature)> {
    let payer_pk = payer.pubkey();

    let (plan, mint_pubkey) = build_mint_creation(
        ledger,
        &payer_pk,
        mint_authority,
        freeze_authority,
        decimals,
        &mint.pubkey(),
        &opts.program_id,
        opts.fee,
    )
    .await?;

    let signature = submit(ledger, &plan, &payer_pk, &[payer, mint], &opts.confirm).await?;

    info!(mint = %mint_pubkey, decimals, %signature, "created mint");
    Ok((mint_pubkey, signature))
}

/// Plan for `MintTo`. `amount` is already in base units.
pub fn build_mint_issuance(
    mint: &Pubkey,
    destination: &Pubkey,
    authority: &Pubkey,
    multisig_signers: &[Pubkey],
    amount: u64,
    program_id: &Pubkey,
    fee: FeePolicy,
) -> Result<InstructionPlan> {
    let signer_refs: Vec<&Pubkey> = multisig_signers.iter().collect();
    Ok(build_mint_to_plan(
        mint,
        destination,
        authority,
        &signer_refs,
        amount,
        program_id,
        fee,
    )?)
}

/// Mints `amount` base units of `mint` into `destination`.
///
/// `multi_signers` only matters when `authority` is a bare multisig
/// address; see [`resolve_signers`].
#[allow(clippy::too_many_arguments)]
pub async fn mint_to(
    ledger: &dyn Ledger,
    payer: &dyn Signer,
    mint: &Pubkey,
    destination: &Pubkey,
    authority: Authority<'_>,
    multi_signers: &[&dyn Signer],
    amount: u64,
    opts: &TokenOptions,
) -> Result<Signature> {
    let payer_pk = payer.pubkey();
    let is_multisig = matches!(authority, Authority::Address(_));
    let (authority_pk, signers) = resolve_signers(authority, multi_signers);

    let multisig_keys: Vec<Pubkey> = if is_multisig {
        signers.iter().map(|s| s.pubkey()).collect()
    } else {
        Vec::new()
    };

    let plan = build_mint_issuance(
        mint,
        destination,
        &authority_pk,
        &multisig_keys,
        amount,
        &opts.program_id,
        opts.fee,
    )?;

    let mut all_signers: Vec<&dyn Signer> = vec![payer];
    all_signers.extend(signers);
    let signature = submit(ledger, &plan, &payer_pk, &all_signers, &opts.confirm).await?;

    info!(%mint, %destination, amount, %signature, "minted tokens");
    Ok(signature)
}
