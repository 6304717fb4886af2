use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use mintkit_api::fee::FeePolicy;
use mintkit_client::{ConfirmOptions, MintKitError, Result, TokenOptions};
use solana_sdk::{commitment_config::CommitmentConfig, pubkey::Pubkey, signature::Keypair};

use crate::keypair::{get_keypair_path, get_payer, keypair_from_base58, pubkey_from_base58};

pub const ENV_PAYER: &str     = "MINTKIT_PAYER";
pub const ENV_RECIPIENT: &str = "MINTKIT_RECIPIENT";

/// Loads `.env` from the working directory, if present, so its values are
/// visible to the argument parser.
pub fn load_env() {
    dotenvy::dotenv().ok();
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cluster {
    Localnet,
    Mainnet,
    Devnet,
    Testnet,
    Custom(String),
}

impl Cluster {
    pub fn rpc_url(&self) -> String {
        match self {
            Cluster::Localnet => "http://127.0.0.1:8899".to_string(),
            Cluster::Mainnet => "https://api.mainnet-beta.solana.com".to_string(),
            Cluster::Devnet => "https://api.devnet.solana.com".to_string(),
            Cluster::Testnet => "https://api.testnet.solana.com".to_string(),
            Cluster::Custom(url) => url.clone(),
        }
    }

    pub fn is_mainnet(&self) -> bool {
        match self {
            Cluster::Mainnet => true,
            Cluster::Custom(url) => url.contains("mainnet"),
            _ => false,
        }
    }
}

impl FromStr for Cluster {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "l" => Ok(Cluster::Localnet),
            "m" => Ok(Cluster::Mainnet),
            "d" => Ok(Cluster::Devnet),
            "t" => Ok(Cluster::Testnet),
            s if s.starts_with("http://") || s.starts_with("https://") => Ok(Cluster::Custom(s.to_string())),
            _ => Err(format!(
                "Invalid cluster value: '{}'. Use l, m, d, t, or a valid RPC URL (http:// or https://)",
                s
            )),
        }
    }
}

pub fn parse_commitment(s: &str) -> std::result::Result<CommitmentConfig, String> {
    match s {
        "processed" => Ok(CommitmentConfig::processed()),
        "confirmed" => Ok(CommitmentConfig::confirmed()),
        "finalized" => Ok(CommitmentConfig::finalized()),
        _ => Err(format!(
            "Invalid commitment: '{}'. Use processed, confirmed or finalized",
            s
        )),
    }
}

/// The payer comes from a base58 secret when one is configured, otherwise
/// from the keypair file.
pub fn resolve_payer(secret: Option<&str>, keypair_path: Option<PathBuf>) -> Result<Keypair> {
    match secret.filter(|s| !s.trim().is_empty()) {
        Some(secret) => keypair_from_base58(secret)
            .map_err(|e| MintKitError::Configuration(format!("{}: {}", ENV_PAYER, e))),
        None => {
            let path = get_keypair_path(keypair_path);
            get_payer(path).map_err(|e| MintKitError::Configuration(format!("{:#}", e)))
        }
    }
}

pub fn resolve_recipient(value: Option<&str>) -> Result<Pubkey> {
    let value = value
        .filter(|s| !s.trim().is_empty())
        .ok_or_else(|| MintKitError::Configuration(format!("Missing {}", ENV_RECIPIENT)))?;
    pubkey_from_base58(value).map_err(|e| MintKitError::Configuration(format!("{}: {}", ENV_RECIPIENT, e)))
}

pub fn token_options(
    priority_fee: Option<u64>,
    commitment: CommitmentConfig,
    skip_preflight: bool,
    timeout_secs: u64,
) -> Result<TokenOptions> {
    if timeout_secs == 0 {
        return Err(MintKitError::Configuration("Confirmation timeout must be positive".into()));
    }
    let confirm = ConfirmOptions {
        commitment,
        skip_preflight,
        timeout: Duration::from_secs(timeout_secs),
        ..ConfirmOptions::default()
    };
    Ok(TokenOptions::default()
        .with_fee(FeePolicy::default().with_override(priority_fee))
        .with_confirm(confirm))
}
