//! Precondition checks shared by `new_pool` and `pay_pool`
//!
//! Every check returns a specific [`PoolError`] and none of them mutate
//! state, so a handler can run all of them before staging any effect.

use anchor_lang::prelude::*;

use crate::address::{derive_pool_address, pool_address};
use crate::error::PoolError;
use crate::state::{Pool, MAX_CAPACITY, MAX_NAME_LEN};

pub fn require_signer(signed: bool) -> Result<()> {
    require!(signed, PoolError::SignerMissing);
    Ok(())
}

/// Name must be 1..=32 bytes of UTF-8
pub fn require_valid_name(name: &str) -> Result<()> {
    require!(!name.is_empty(), PoolError::NameEmpty);
    require!(name.len() <= MAX_NAME_LEN, PoolError::NameTooLong);
    Ok(())
}

pub fn require_valid_capacity(capacity: u16) -> Result<()> {
    require!(
        (1..=MAX_CAPACITY).contains(&capacity),
        PoolError::InvalidCapacity
    );
    Ok(())
}

/// `(address, bump)` must be exactly what derivation yields for `(owner, name)`.
pub fn require_canonical_bump(
    program_id: &Pubkey,
    owner: &Pubkey,
    name: &str,
    address: &Pubkey,
    bump: u8,
) -> Result<()> {
    let (expected_address, expected_bump) = derive_pool_address(program_id, owner, name)?;
    require!(
        bump == expected_bump && *address == expected_address,
        PoolError::InvalidBumpSeed
    );
    Ok(())
}

pub fn require_vacant(occupied: bool) -> Result<()> {
    require!(!occupied, PoolError::AccountAlreadyExists);
    Ok(())
}

pub fn require_name_match(pool: &Pool, name: &str) -> Result<()> {
    require!(pool.name == name, PoolError::NameMismatch);
    Ok(())
}

pub fn require_owner(pool: &Pool, owner: &Pubkey) -> Result<()> {
    require_keys_eq!(pool.owner, *owner, PoolError::OwnerMismatch);
    Ok(())
}

/// The record at `address` must sit at its own derived address.
pub fn require_derived_address(program_id: &Pubkey, pool: &Pool, address: &Pubkey) -> Result<()> {
    let expected = pool_address(program_id, &pool.owner, &pool.name, pool.bump)?;
    require_keys_eq!(expected, *address, PoolError::InvalidBumpSeed);
    Ok(())
}

pub fn require_room(pool: &Pool) -> Result<()> {
    require!(!pool.is_full(), PoolError::PoolFull);
    Ok(())
}

pub fn require_positive_amount(amount: u64) -> Result<()> {
    require!(amount > 0, PoolError::InvalidAmount);
    Ok(())
}

pub fn require_funds(available: u64, needed: u64) -> Result<()> {
    require!(available >= needed, PoolError::InsufficientFunds);
    Ok(())
}
