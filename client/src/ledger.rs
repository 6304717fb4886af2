use async_trait::async_trait;
use solana_client::{nonblocking::rpc_client::RpcClient, rpc_config::RpcSendTransactionConfig};
use solana_sdk::{
    account::Account,
    commitment_config::CommitmentConfig,
    hash::Hash,
    pubkey::Pubkey,
    signature::Signature,
    transaction::{Transaction, TransactionError},
};

use crate::error::{MintKitError, Result};

/// Remote ledger operations the launcher depends on.
///
/// `RpcClient` is the production implementation; anything that can answer
/// these five calls (a local validator, an in-memory fake) can drive the
/// builders, the provisioner and the launch flow.
#[async_trait]
pub trait Ledger: Send + Sync {
    async fn get_account(&self, address: &Pubkey, commitment: CommitmentConfig) -> Result<Option<Account>>;

    async fn get_minimum_balance_for_rent_exemption(&self, data_len: usize) -> Result<u64>;

    async fn get_latest_blockhash(&self) -> Result<Hash>;

    /// Fails with `Submission` when the ledger refuses the transaction.
    async fn send_transaction(&self, transaction: &Transaction, skip_preflight: bool) -> Result<Signature>;

    /// `None` while the signature has not reached `commitment`.
    async fn signature_status(
        &self,
        signature: &Signature,
        commitment: CommitmentConfig,
    ) -> Result<Option<std::result::Result<(), TransactionError>>>;
}

#[async_trait]
impl Ledger for RpcClient {
    async fn get_account(&self, address: &Pubkey, commitment: CommitmentConfig) -> Result<Option<Account>> {
        let response = self.get_account_with_commitment(address, commitment).await?;
        Ok(response.value)
    }

    async fn get_minimum_balance_for_rent_exemption(&self, data_len: usize) -> Result<u64> {
        Ok(RpcClient::get_minimum_balance_for_rent_exemption(self, data_len).await?)
    }

    async fn get_latest_blockhash(&self) -> Result<Hash> {
        Ok(RpcClient::get_latest_blockhash(self).await?)
    }

    async fn send_transaction(&self, transaction: &Transaction, skip_preflight: bool) -> Result<Signature> {
        let config = RpcSendTransactionConfig {
            skip_preflight,
            preflight_commitment: Some(self.commitment().commitment),
            ..RpcSendTransactionConfig::default()
        };
        self.send_transaction_with_config(transaction, config)
            .await
            .map_err(|e| MintKitError::Submission(e.to_string()))
    }

    async fn signature_status(
        &self,
        signature: &Signature,
        commitment: CommitmentConfig,
    ) -> Result<Option<std::result::Result<(), TransactionError>>> {
        Ok(self.get_signature_status_with_commitment(signature, commitment).await?)
    }
}
