use std::fmt;

use solana_sdk::{pubkey::Pubkey, signer::Signer};

/// Authority over a mint operation: either a signer held by the caller, or
/// the bare address of a multisig account whose members sign separately.
#[derive(Clone, Copy)]
pub enum Authority<'a> {
    Address(Pubkey),
    Signer(&'a dyn Signer),
}

impl fmt::Debug for Authority<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Authority::Address(address) => f.debug_tuple("Address").field(address).finish(),
            Authority::Signer(signer) => f.debug_tuple("Signer").field(&signer.pubkey()).finish(),
        }
    }
}

impl From<Pubkey> for Authority<'_> {
    fn from(address: Pubkey) -> Self {
        Authority::Address(address)
    }
}

impl<'a, S: Signer> From<&'a S> for Authority<'a> {
    fn from(signer: &'a S) -> Self {
        Authority::Signer(signer)
    }
}

/// Returns the authority's address and the signers the transaction needs.
///
/// A bare address passes `multi_signers` through unchanged. A full signer
/// is its own and only required signer; `multi_signers` is ignored.
pub fn resolve_signers<'a>(
    authority: Authority<'a>,
    multi_signers: &[&'a dyn Signer],
) -> (Pubkey, Vec<&'a dyn Signer>) {
    match authority {
        Authority::Address(address) => (address, multi_signers.to_vec()),
        Authority::Signer(signer) => (signer.pubkey(), vec![signer]),
    }
}
