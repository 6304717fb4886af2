use mintkit_api::prelude::*;
use solana_sdk::{instruction::Instruction, pubkey::Pubkey, signature::Signature, signer::Signer};
use tracing::info;

use crate::error::Result;
use crate::ledger::Ledger;
use crate::options::TokenOptions;
use crate::submit::submit;

/// Supplies the instruction that attaches metadata to a mint.
pub trait MetadataSource: Send + Sync {
    fn instruction(
        &self,
        mint: &Pubkey,
        mint_authority: &Pubkey,
        payer: &Pubkey,
        metadata: &TokenMetadata,
    ) -> Result<Instruction>;
}

/// Metaplex token metadata; the mint authority is also the update authority.
#[derive(Debug, Clone, Copy, Default)]
pub struct MplTokenMetadata;

impl MetadataSource for MplTokenMetadata {
    fn instruction(
        &self,
        mint: &Pubkey,
        mint_authority: &Pubkey,
        payer: &Pubkey,
        metadata: &TokenMetadata,
    ) -> Result<Instruction> {
        metadata.validate()?;
        Ok(build_create_metadata_ix(*mint, *mint_authority, *payer, *mint_authority, metadata))
    }
}

/// Attaches `metadata` to `mint`.
///
/// `payer` also acts as mint and update authority. `mint` co-signs only
/// when the source's instruction lists it as a signer.
pub async fn attach_metadata(
    ledger: &dyn Ledger,
    source: &dyn MetadataSource,
    payer: &dyn Signer,
    mint: &dyn Signer,
    metadata: &TokenMetadata,
    opts: &TokenOptions,
) -> Result<Signature> {
    let payer_pk = payer.pubkey();
    let mint_pk = mint.pubkey();

    let ix = source.instruction(&mint_pk, &payer_pk, &payer_pk, metadata)?;
    let plan = build_attachment_plan(ix, opts.fee);

    let mut signers: Vec<&dyn Signer> = vec![payer];
    if plan.required_signers().contains(&mint_pk) {
        signers.push(mint);
    }
    let signature = submit(ledger, &plan, &payer_pk, &signers, &opts.confirm).await?;

    info!(mint = %mint_pk, name = %metadata.name, symbol = %metadata.symbol, %signature, "attached metadata");
    Ok(signature)
}
