use solana_sdk::{
    compute_budget::{self, ComputeBudgetInstruction},
    instruction::Instruction,
};

use crate::consts::*;

/// Priority fee rate, in micro-lamports per compute unit.
///
/// The policy is a plain value: it is handed to every builder instead of
/// being read from process state, and `with_override` is the only way a
/// call site may deviate from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeePolicy {
    micro_lamports_per_cu: u64,
}

impl FeePolicy {
    pub const fn new(micro_lamports_per_cu: u64) -> Self {
        Self { micro_lamports_per_cu }
    }

    pub fn micro_lamports_per_cu(&self) -> u64 {
        self.micro_lamports_per_cu
    }

    pub fn with_override(self, rate: Option<u64>) -> Self {
        rate.map(Self::new).unwrap_or(self)
    }

    /// The fee directive. Always instruction 0 of a plan.
    pub fn instruction(&self) -> Instruction {
        ComputeBudgetInstruction::set_compute_unit_price(self.micro_lamports_per_cu)
    }
}

impl Default for FeePolicy {
    fn default() -> Self {
        Self::new(DEFAULT_PRIORITY_FEE_MICRO_LAMPORTS)
    }
}

/// Returns the rate carried by `ix` if it is a compute-unit price directive.
pub fn fee_rate_of(ix: &Instruction) -> Option<u64> {
    if ix.program_id != compute_budget::id() {
        return None;
    }
    match ix.data.split_first() {
        Some((&SET_COMPUTE_UNIT_PRICE_TAG, rest)) if rest.len() == 8 => {
            let mut bytes = [0u8; 8];
            bytes.copy_from_slice(rest);
            Some(u64::from_le_bytes(bytes))
        }
        _ => None,
    }
}
