use solana_sdk::{commitment_config::CommitmentConfig, pubkey::Pubkey, signer::Signer};
use tracing::{debug, info, warn};

use crate::error::{MintKitError, Result};
use crate::ledger::Ledger;
use crate::options::TokenOptions;
use crate::utils::{associated_token_address, create_account, get_token_account, TokenAccount};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProvisionOptions {
    pub allow_owner_off_curve: bool,
    /// Commitment used for the lookups.
    pub commitment: CommitmentConfig,
    pub token: TokenOptions,
}

impl Default for ProvisionOptions {
    fn default() -> Self {
        let token = TokenOptions::default();
        Self {
            allow_owner_off_curve: false,
            commitment: token.confirm.commitment,
            token,
        }
    }
}

#[derive(Debug)]
enum Step {
    Lookup,
    Create,
    Relookup,
    Validate(TokenAccount),
}

/// Returns the associated token account for `(owner, mint)`, creating it
/// when it does not exist yet.
///
/// Creation is best effort: a failed create transaction is logged and
/// ignored, because a concurrent provisioner may have created the same
/// derived address first. The second lookup decides the outcome. An
/// existing account bound to another mint or owner is rejected.
pub async fn get_or_create_associated_token_account(
    ledger: &dyn Ledger,
    payer: &dyn Signer,
    mint: &Pubkey,
    owner: &Pubkey,
    opts: &ProvisionOptions,
) -> Result<TokenAccount> {
    let address = associated_token_address(owner, mint, opts.allow_owner_off_curve, &opts.token)?;
    let program_id = opts.token.program_id;

    let mut step = Step::Lookup;
    loop {
        step = match step {
            Step::Lookup => match get_token_account(ledger, &address, opts.commitment, &program_id).await {
                Ok(account) => Step::Validate(account),
                Err(e) if e.is_missing_account() => {
                    debug!(%address, reason = %e, "associated account missing");
                    Step::Create
                }
                Err(e) => return Err(e),
            },

            Step::Create => {
                match create_account(ledger, payer, mint, owner, None, &opts.token).await {
                    Ok(_) => info!(%address, %owner, %mint, "provisioned associated account"),
                    Err(e) => warn!(%address, error = %e, "create failed, re-reading account"),
                }
                Step::Relookup
            }

            Step::Relookup => {
                Step::Validate(get_token_account(ledger, &address, opts.commitment, &program_id).await?)
            }

            Step::Validate(account) => return validate_token_account(account, mint, owner),
        };
    }
}

/// Checks that `account` is bound to `mint` and controlled by `owner`.
pub fn validate_token_account(account: TokenAccount, mint: &Pubkey, owner: &Pubkey) -> Result<TokenAccount> {
    if account.mint != *mint {
        return Err(MintKitError::InvalidMint {
            address: account.address,
            actual: account.mint,
            expected: *mint,
        });
    }
    if account.owner != *owner {
        return Err(MintKitError::InvalidOwner {
            address: account.address,
            actual: account.owner,
            expected: *owner,
        });
    }
    Ok(account)
}
