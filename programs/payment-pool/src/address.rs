//! Pool address derivation
//!
//! A pool lives at the program address derived from
//! `[b"pool", owner, name_seed(name), bump]`. The bump is the first value,
//! searching down from 255, for which the derived point is off the ed25519
//! curve, so no private key can sign for it.

use anchor_lang::prelude::*;

use crate::error::PoolError;
use crate::state::MAX_NAME_LEN;

/// Seed prefix for pool PDA derivation
pub const POOL_SEED: &[u8] = b"pool";

/// Name bytes used as a seed, bounded to the 32-byte seed limit.
pub fn name_seed(name: &str) -> &[u8] {
    let bytes = name.as_bytes();
    &bytes[..bytes.len().min(MAX_NAME_LEN)]
}

/// Signer seeds for the pool account (when bump is known)
pub fn pool_seeds<'a>(owner: &'a Pubkey, name: &'a str, bump: &'a [u8; 1]) -> [&'a [u8]; 4] {
    [POOL_SEED, owner.as_ref(), name_seed(name), bump]
}

/// Derive the pool address and its canonical bump.
pub fn derive_pool_address(program_id: &Pubkey, owner: &Pubkey, name: &str) -> Result<(Pubkey, u8)> {
    search_bump(|bump| {
        let bump_seed = [bump];
        Pubkey::create_program_address(&pool_seeds(owner, name, &bump_seed), program_id).ok()
    })
}

/// First bump, from 255 down, for which `derive` yields an address.
fn search_bump(mut derive: impl FnMut(u8) -> Option<Pubkey>) -> Result<(Pubkey, u8)> {
    for bump in (0..=u8::MAX).rev() {
        if let Some(address) = derive(bump) {
            return Ok((address, bump));
        }
    }
    err!(PoolError::NoValidBump)
}

/// Re-derive the pool address for a known bump.
pub fn pool_address(program_id: &Pubkey, owner: &Pubkey, name: &str, bump: u8) -> Result<Pubkey> {
    let bump_seed = [bump];
    Pubkey::create_program_address(&pool_seeds(owner, name, &bump_seed), program_id)
        .map_err(|_| error!(PoolError::InvalidBumpSeed))
}
