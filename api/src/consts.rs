use solana_sdk::program_pack::Pack;

/// Compute-unit price attached to every transaction unless overridden.
pub const DEFAULT_PRIORITY_FEE_MICRO_LAMPORTS: u64 = 100_000;

pub const MINT_LEN: usize       = spl_token::state::Mint::LEN;
pub const ACCOUNT_LEN: usize    = spl_token::state::Account::LEN;

pub const MAX_NAME_LEN: usize   = 32;
pub const MAX_SYMBOL_LEN: usize = 10;
pub const MAX_URI_LEN: usize    = 200;

pub const SELLER_FEE_BASIS_POINTS: u16 = 0; // no royalty

// `SetComputeUnitPrice` discriminant in the compute budget program
pub const SET_COMPUTE_UNIT_PRICE_TAG: u8 = 3;
