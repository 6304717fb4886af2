use mintkit_api::prelude::*;
use solana_sdk::{
    commitment_config::CommitmentConfig,
    pubkey::Pubkey,
    signature::{Keypair, Signature},
    signer::Signer,
};
use tracing::info;

use crate::error::{MintKitError, Result};
use crate::flow::metadata::{attach_metadata, MetadataSource};
use crate::ledger::Ledger;
use crate::options::TokenOptions;
use crate::provision::{get_or_create_associated_token_account, ProvisionOptions};
use crate::signer::Authority;
use crate::utils::{create_mint, mint_to};

/// What to launch. `supply` is in whole tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetParams {
    pub metadata: TokenMetadata,
    pub decimals: u8,
    pub supply: u64,
}

impl AssetParams {
    pub fn validate(&self) -> Result<()> {
        self.metadata.validate()?;
        self.base_units().map(|_| ())
    }

    /// `supply * 10^decimals`.
    pub fn base_units(&self) -> Result<u64> {
        to_base_units(self.supply, self.decimals).ok_or_else(|| {
            MintKitError::Configuration(format!(
                "supply {} with {} decimals overflows u64",
                self.supply, self.decimals
            ))
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LaunchOptions {
    pub token: TokenOptions,
    pub allow_owner_off_curve: bool,
}

impl Default for LaunchOptions {
    fn default() -> Self {
        Self {
            token: TokenOptions::default(),
            allow_owner_off_curve: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchReport {
    pub mint: Pubkey,
    pub metadata: Pubkey,
    pub recipient_account: Pubkey,
    /// Issued amount in base units.
    pub amount: u64,
    pub mint_signature: Signature,
    pub metadata_signature: Signature,
    pub mint_to_signature: Signature,
}

/// Creates a mint, attaches metadata, provisions `recipient`'s associated
/// account and issues the full supply into it.
///
/// Steps run in order and the first error aborts. Nothing already
/// committed is rolled back, so a mint without metadata or supply is a
/// possible outcome.
pub async fn launch(
    ledger: &dyn Ledger,
    payer: &dyn Signer,
    recipient: &Pubkey,
    asset: &AssetParams,
    metadata: &dyn MetadataSource,
    opts: &LaunchOptions,
) -> Result<LaunchReport> {
    let mint = Keypair::new();
    launch_with_mint(ledger, payer, &mint, recipient, asset, metadata, opts).await
}

/// [`launch`] with a caller-supplied mint keypair.
pub async fn launch_with_mint(
    ledger: &dyn Ledger,
    payer: &dyn Signer,
    mint: &dyn Signer,
    recipient: &Pubkey,
    asset: &AssetParams,
    metadata: &dyn MetadataSource,
    opts: &LaunchOptions,
) -> Result<LaunchReport> {
    asset.validate()?;
    let amount = asset.base_units()?;
    let payer_pk = payer.pubkey();

    // the mint must be final before anything references it
    let strict = opts
        .token
        .with_confirm(opts.token.confirm.with_commitment(CommitmentConfig::finalized()));
    let (mint_pk, mint_signature) =
        create_mint(ledger, payer, &payer_pk, None, asset.decimals, mint, &strict).await?;

    let metadata_signature =
        attach_metadata(ledger, metadata, payer, mint, &asset.metadata, &opts.token).await?;

    let provision = ProvisionOptions {
        allow_owner_off_curve: opts.allow_owner_off_curve,
        commitment: opts.token.confirm.commitment,
        token: opts.token,
    };
    let recipient_account =
        get_or_create_associated_token_account(ledger, payer, &mint_pk, recipient, &provision).await?;

    let mint_to_signature = mint_to(
        ledger,
        payer,
        &mint_pk,
        &recipient_account.address,
        Authority::Signer(payer),
        &[],
        amount,
        &opts.token,
    )
    .await?;

    info!(
        mint = %mint_pk,
        recipient = %recipient,
        amount = %to_ui_amount(amount, asset.decimals),
        "launch complete"
    );

    Ok(LaunchReport {
        mint: mint_pk,
        metadata: find_metadata_pda(&mint_pk).0,
        recipient_account: recipient_account.address,
        amount,
        mint_signature,
        metadata_signature,
        mint_to_signature,
    })
}
