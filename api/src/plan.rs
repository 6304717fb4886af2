use solana_sdk::{instruction::Instruction, pubkey::Pubkey};

use crate::fee::{fee_rate_of, FeePolicy};

/// Ordered instruction list for one transaction, fee directive first.
///
/// A plan carries no fee payer and no blockhash; those are stamped at
/// submission time so that a plan never holds an expired recency anchor.
/// The only constructor seeds the fee directive, so index 0 is guaranteed.
#[derive(Debug, Clone, PartialEq)]
pub struct InstructionPlan {
    instructions: Vec<Instruction>,
}

impl InstructionPlan {
    pub fn new(fee: FeePolicy) -> Self {
        Self {
            instructions: vec![fee.instruction()],
        }
    }

    pub fn with_instructions(fee: FeePolicy, instructions: impl IntoIterator<Item = Instruction>) -> Self {
        let mut plan = Self::new(fee);
        plan.instructions.extend(instructions);
        plan
    }

    pub fn push(&mut self, ix: Instruction) -> &mut Self {
        self.instructions.push(ix);
        self
    }

    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    pub fn fee_rate(&self) -> Option<u64> {
        self.instructions.first().and_then(fee_rate_of)
    }

    /// Accounts that must sign, in first-seen order.
    pub fn required_signers(&self) -> Vec<Pubkey> {
        let mut signers: Vec<Pubkey> = Vec::new();
        for meta in self.instructions.iter().flat_map(|ix| ix.accounts.iter()) {
            if meta.is_signer && !signers.contains(&meta.pubkey) {
                signers.push(meta.pubkey);
            }
        }
        signers
    }
}
