use std::time::Duration;

use mintkit_api::prelude::*;
use solana_sdk::{
    commitment_config::CommitmentConfig,
    message::Message,
    packet::PACKET_DATA_SIZE,
    pubkey::Pubkey,
    signature::Signature,
    signer::Signer,
    transaction::Transaction,
};
use tokio::time::{sleep, Instant};
use tracing::debug;

use crate::consts::*;
use crate::error::{MintKitError, Result};
use crate::ledger::Ledger;
use crate::utils::serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfirmOptions {
    pub commitment: CommitmentConfig,
    pub skip_preflight: bool,
    pub timeout: Duration,
    pub poll_interval: Duration,
}

impl ConfirmOptions {
    pub fn with_commitment(self, commitment: CommitmentConfig) -> Self {
        Self { commitment, ..self }
    }
}

impl Default for ConfirmOptions {
    fn default() -> Self {
        Self {
            commitment: CommitmentConfig::finalized(),
            skip_preflight: false,
            timeout: Duration::from_secs(CONFIRM_TIMEOUT_SECS),
            poll_interval: Duration::from_millis(CONFIRM_POLL_INTERVAL_MS),
        }
    }
}

/// Stamps `plan` with a fresh blockhash and `fee_payer`, signs it with
/// `signers`, sends it and waits for `opts.commitment`.
///
/// Every signer the plan requires (the fee payer included) must be in
/// `signers`; duplicates are dropped. Nothing is retried.
pub async fn submit(
    ledger: &dyn Ledger,
    plan: &InstructionPlan,
    fee_payer: &Pubkey,
    signers: &[&dyn Signer],
    opts: &ConfirmOptions,
) -> Result<Signature> {
    let signers = unique_signers(signers);
    let recent_blockhash = ledger.get_latest_blockhash().await?;

    let message = Message::new(plan.instructions(), Some(fee_payer));
    let mut tx = Transaction::new_unsigned(message);
    tx.try_sign(&signers[..], recent_blockhash)
        .map_err(|e| MintKitError::Submission(format!("failed to sign: {}", e)))?;

    let size = serialize(&tx)?.len();
    if size > PACKET_DATA_SIZE {
        return Err(MintKitError::Submission(format!(
            "transaction is {} bytes, limit is {}",
            size, PACKET_DATA_SIZE
        )));
    }

    let signature = ledger.send_transaction(&tx, opts.skip_preflight).await?;
    debug!(%signature, instructions = plan.instructions().len(), "transaction sent");

    confirm(ledger, &signature, opts).await?;
    Ok(signature)
}

/// Polls until `signature` reaches `opts.commitment` or `opts.timeout` elapses.
pub async fn confirm(ledger: &dyn Ledger, signature: &Signature, opts: &ConfirmOptions) -> Result<()> {
    let deadline = Instant::now() + opts.timeout;

    loop {
        match ledger.signature_status(signature, opts.commitment).await? {
            Some(Ok(())) => return Ok(()),
            Some(Err(e)) => {
                return Err(MintKitError::Submission(format!(
                    "transaction {} failed: {}",
                    signature, e
                )))
            }
            None if Instant::now() >= deadline => {
                return Err(MintKitError::ConfirmationTimeout {
                    signature: *signature,
                    commitment: opts.commitment.commitment,
                })
            }
            None => {
                debug!(%signature, "awaiting confirmation");
                sleep(opts.poll_interval).await;
            }
        }
    }
}

fn unique_signers<'a>(signers: &[&'a dyn Signer]) -> Vec<&'a dyn Signer> {
    let mut seen: Vec<Pubkey> = Vec::with_capacity(signers.len());
    let mut unique = Vec::with_capacity(signers.len());
    for signer in signers {
        let key = signer.pubkey();
        if !seen.contains(&key) {
            seen.push(key);
            unique.push(*signer);
        }
    }
    unique
}
