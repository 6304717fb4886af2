use solana_sdk::{
    instruction::{AccountMeta, Instruction},
    program_error::ProgramError,
    pubkey::Pubkey,
    system_instruction, system_program,
};
use spl_token_2022::instruction as token_instruction;

use crate::consts::*;
use crate::fee::FeePolicy;
use crate::pda::find_associated_token_address;
use crate::plan::InstructionPlan;

/// Fee directive, allocation of a `MINT_LEN` account owned by
/// `token_program_id`, then `InitializeMint2`.
#[allow(clippy::too_many_arguments)]
pub fn build_create_mint_plan(
    payer: &Pubkey,
    mint: &Pubkey,
    mint_authority: &Pubkey,
    freeze_authority: Option<&Pubkey>,
    decimals: u8,
    lamports: u64,
    token_program_id: &Pubkey,
    fee: FeePolicy,
) -> Result<InstructionPlan, ProgramError> {
    let create_mint_ix = system_instruction::create_account(
        payer,
        mint,
        lamports,
        MINT_LEN as u64,
        token_program_id,
    );

    let init_mint_ix = token_instruction::initialize_mint2(
        token_program_id,
        mint,
        mint_authority,
        freeze_authority,
        decimals,
    )?;

    Ok(InstructionPlan::with_instructions(fee, [create_mint_ix, init_mint_ix]))
}

/// Non-idempotent `Create` of the associated account. A second submission
/// for the same `(owner, mint)` is rejected by the program.
pub fn build_create_associated_account_ix(
    payer: &Pubkey,
    owner: &Pubkey,
    mint: &Pubkey,
    token_program_id: &Pubkey,
    associated_token_program_id: &Pubkey,
) -> Instruction {
    let (address, _) = find_associated_token_address(owner, mint, token_program_id, associated_token_program_id);

    Instruction {
        program_id: *associated_token_program_id,
        accounts: vec![
            AccountMeta::new(*payer, true),
            AccountMeta::new(address, false),
            AccountMeta::new_readonly(*owner, false),
            AccountMeta::new_readonly(*mint, false),
            AccountMeta::new_readonly(system_program::id(), false),
            AccountMeta::new_readonly(*token_program_id, false),
        ],
        data: vec![0], // AssociatedTokenAccountInstruction::Create
    }
}

pub fn build_create_associated_account_plan(
    payer: &Pubkey,
    owner: &Pubkey,
    mint: &Pubkey,
    token_program_id: &Pubkey,
    associated_token_program_id: &Pubkey,
    fee: FeePolicy,
) -> InstructionPlan {
    let ix = build_create_associated_account_ix(payer, owner, mint, token_program_id, associated_token_program_id);
    InstructionPlan::with_instructions(fee, [ix])
}

/// Fee directive, allocation of `space` bytes at `account`, then
/// `InitializeAccount3` binding it to `mint` and `owner`.
#[allow(clippy::too_many_arguments)]
pub fn build_create_account_plan(
    payer: &Pubkey,
    account: &Pubkey,
    mint: &Pubkey,
    owner: &Pubkey,
    space: usize,
    lamports: u64,
    token_program_id: &Pubkey,
    fee: FeePolicy,
) -> Result<InstructionPlan, ProgramError> {
    let create_account_ix = system_instruction::create_account(
        payer,
        account,
        lamports,
        space as u64,
        token_program_id,
    );

    let init_account_ix = token_instruction::initialize_account3(
        token_program_id,
        account,
        mint,
        owner,
    )?;

    Ok(InstructionPlan::with_instructions(fee, [create_account_ix, init_account_ix]))
}

/// Fee directive then `MintTo`. `amount` is in base units.
pub fn build_mint_to_plan(
    mint: &Pubkey,
    destination: &Pubkey,
    authority: &Pubkey,
    multisig_signers: &[&Pubkey],
    amount: u64,
    token_program_id: &Pubkey,
    fee: FeePolicy,
) -> Result<InstructionPlan, ProgramError> {
    let mint_to_ix = token_instruction::mint_to(
        token_program_id,
        mint,
        destination,
        authority,
        multisig_signers,
        amount,
    )?;

    Ok(InstructionPlan::with_instructions(fee, [mint_to_ix]))
}

/// Prefixes an externally built instruction (metadata) with the fee directive.
pub fn build_attachment_plan(ix: Instruction, fee: FeePolicy) -> InstructionPlan {
    InstructionPlan::with_instructions(fee, [ix])
}
