use solana_sdk::pubkey::Pubkey;

/// Associated token account address for `(owner, mint)` under the given
/// token and associated-token programs.
pub fn find_associated_token_address(
    owner: &Pubkey,
    mint: &Pubkey,
    token_program_id: &Pubkey,
    associated_token_program_id: &Pubkey,
) -> (Pubkey, u8) {
    Pubkey::find_program_address(
        &[owner.as_ref(), token_program_id.as_ref(), mint.as_ref()],
        associated_token_program_id,
    )
}

pub fn find_metadata_pda(mint: &Pubkey) -> (Pubkey, u8) {
    mpl_token_metadata::accounts::Metadata::find_pda(mint)
}
