use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use solana_sdk::{pubkey::Pubkey, signature::Keypair, signer::Signer};

pub fn get_keypair_path(keypair: Option<PathBuf>) -> PathBuf {
    keypair.unwrap_or_else(|| {
        let mut path = dirs::home_dir().unwrap_or_default();
        path.push(".config/solana/id.json");
        path
    })
}

/// Loads a keypair from a Solana CLI style JSON file (`[u8; 64]`).
pub fn get_payer(path: PathBuf) -> Result<Keypair> {
    let bytes = std::fs::read(&path)
        .with_context(|| format!("Failed to read keypair file: {}", path.display()))?;
    let secret: Vec<u8> = serde_json::from_slice(&bytes)
        .with_context(|| format!("Failed to parse keypair JSON: {}", path.display()))?;
    keypair_from_bytes(&secret)
}

/// Decodes a base58 secret key.
pub fn keypair_from_base58(secret: &str) -> Result<Keypair> {
    let bytes = bs58::decode(secret.trim())
        .into_vec()
        .context("Secret key is not valid base58")?;
    keypair_from_bytes(&bytes)
}

/// Accepts either a base58 address or a base58 secret key, returning the
/// address in both cases.
pub fn pubkey_from_base58(value: &str) -> Result<Pubkey> {
    let value = value.trim();
    if let Ok(pubkey) = value.parse::<Pubkey>() {
        return Ok(pubkey);
    }
    keypair_from_base58(value)
        .map(|k| k.pubkey())
        .map_err(|_| anyhow!("Value is neither an address nor a secret key"))
}

fn keypair_from_bytes(bytes: &[u8]) -> Result<Keypair> {
    if bytes.len() != 64 {
        return Err(anyhow!("Invalid keypair length: expected 64 bytes, got {}", bytes.len()));
    }
    if bytes.iter().all(|&b| b == 0) {
        return Err(anyhow!("Invalid keypair: all-zero key rejected"));
    }
    Keypair::from_bytes(bytes).map_err(|e| anyhow!("Invalid keypair bytes: {}", e))
}
