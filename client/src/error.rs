use mintkit_api::metadata::MetadataError;
use solana_client::client_error::ClientError;
use solana_sdk::{
    commitment_config::CommitmentLevel,
    program_error::ProgramError,
    pubkey::Pubkey,
    signature::Signature,
};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, MintKitError>;

#[derive(Error, Debug)]
pub enum MintKitError {
    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("rpc error: {0}")]
    Rpc(String),

    /// The ledger refused the transaction, or it executed with an error.
    #[error("transaction rejected: {0}")]
    Submission(String),

    #[error("transaction {signature} did not reach {commitment:?} before the timeout")]
    ConfirmationTimeout {
        signature: Signature,
        commitment: CommitmentLevel,
    },

    #[error("token account {0} not found")]
    AccountNotFound(Pubkey),

    #[error("account {address} is owned by program {owner}, expected {expected}")]
    InvalidAccountOwner {
        address: Pubkey,
        owner: Pubkey,
        expected: Pubkey,
    },

    #[error("account {address} holds {len} bytes, too small to decode")]
    InvalidAccountSize { address: Pubkey, len: usize },

    #[error("token account {address} belongs to mint {actual}, expected {expected}")]
    InvalidMint {
        address: Pubkey,
        actual: Pubkey,
        expected: Pubkey,
    },

    #[error("token account {address} is owned by {actual}, expected {expected}")]
    InvalidOwner {
        address: Pubkey,
        actual: Pubkey,
        expected: Pubkey,
    },

    #[error("owner {0} is off curve; pass allow_owner_off_curve for PDA owners")]
    OwnerOffCurve(Pubkey),

    #[error("token program error: {0}")]
    Program(#[from] ProgramError),

    #[error("serialization failed: {0}")]
    Serialization(String),
}

impl MintKitError {
    /// Lookup failures that mean "no usable account here yet".
    pub fn is_missing_account(&self) -> bool {
        matches!(self, Self::AccountNotFound(_) | Self::InvalidAccountOwner { .. })
    }
}

impl From<ClientError> for MintKitError {
    fn from(e: ClientError) -> Self {
        Self::Rpc(e.to_string())
    }
}

impl From<MetadataError> for MintKitError {
    fn from(e: MetadataError) -> Self {
        Self::Configuration(e.to_string())
    }
}
