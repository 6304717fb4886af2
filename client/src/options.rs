use mintkit_api::fee::FeePolicy;
use solana_sdk::pubkey::Pubkey;

use crate::submit::ConfirmOptions;

/// Programs, fee and confirmation settings shared by every token operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenOptions {
    pub program_id: Pubkey,
    pub associated_token_program_id: Pubkey,
    pub fee: FeePolicy,
    pub confirm: ConfirmOptions,
}

impl TokenOptions {
    pub fn with_fee(self, fee: FeePolicy) -> Self {
        Self { fee, ..self }
    }

    pub fn with_confirm(self, confirm: ConfirmOptions) -> Self {
        Self { confirm, ..self }
    }
}

impl Default for TokenOptions {
    fn default() -> Self {
        Self {
            program_id: spl_token::ID,
            associated_token_program_id: spl_associated_token_account::ID,
            fee: FeePolicy::default(),
            confirm: ConfirmOptions::default(),
        }
    }
}
