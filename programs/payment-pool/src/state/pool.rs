//! Pool state account
//!
//! A pool records who created it, its name, and the ordered list of payers
//! that have contributed lamports to it. The lamports themselves live on the
//! pool account; only the payer identities are stored in the record.
//!
//! # Storage
//! Space for `capacity` payer entries is reserved when the account is created
//! and never reallocated. The Borsh length prefix of `payers` is the used
//! count, so the list is a fixed-capacity array in all but name.

use anchor_lang::prelude::*;
use solana_program::entrypoint::MAX_PERMITTED_DATA_INCREASE;

use crate::error::PoolError;

/// Maximum pool name length in bytes
pub const MAX_NAME_LEN: usize = 32;

/// Serialized size of one payer entry
pub const PAYER_ENTRY_LEN: usize = 32;

/// Largest capacity whose account, with a full-length name, can still be
/// created through a CPI.
pub const MAX_CAPACITY: u16 =
    ((MAX_PERMITTED_DATA_INCREASE - Pool::HEADER_LEN - MAX_NAME_LEN) / PAYER_ENTRY_LEN) as u16;

/// Payment pool account.
///
/// PDA Seeds: `[b"pool", owner.as_ref(), name_seed(name)]`
#[account]
#[derive(Debug, PartialEq, Eq)]
pub struct Pool {
    /// Creator of the pool (immutable)
    pub owner: Pubkey,

    /// Pool name, 1..=32 bytes (immutable)
    pub name: String,

    /// Maximum number of payers (immutable)
    pub capacity: u16,

    /// Canonical PDA bump found at creation
    pub bump: u8,

    /// Payers in payment order
    pub payers: Vec<Pubkey>,
}

impl Pool {
    /// Fixed part of the account: everything except name bytes and payer entries
    pub const HEADER_LEN: usize = 8 // discriminator
        + 32 // owner
        + 4  // name length prefix
        + 2  // capacity
        + 1  // bump
        + 4; // payers length prefix

    /// Account space for a pool with this name and capacity.
    pub fn space(name: &str, capacity: u16) -> usize {
        Self::HEADER_LEN + name.len() + (capacity as usize) * PAYER_ENTRY_LEN
    }

    /// Fresh pool record with no payers
    pub fn new(owner: Pubkey, name: String, capacity: u16, bump: u8) -> Self {
        Self {
            owner,
            name,
            capacity,
            bump,
            payers: Vec::with_capacity(capacity as usize),
        }
    }

    pub fn payer_count(&self) -> usize {
        self.payers.len()
    }

    pub fn is_full(&self) -> bool {
        self.payers.len() >= self.capacity as usize
    }

    /// Slots still available
    pub fn remaining(&self) -> usize {
        (self.capacity as usize).saturating_sub(self.payers.len())
    }

    /// Append a payer, returning its index in the list.
    pub fn record_payer(&mut self, payer: Pubkey) -> Result<usize> {
        require!(!self.is_full(), PoolError::PoolFull);
        self.payers.push(payer);
        Ok(self.payers.len() - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_space_matches_serialized_len() {
        let mut pool = Pool::new(Pubkey::new_unique(), "A pool".to_string(), 3, 254);
        for _ in 0..3 {
            pool.record_payer(Pubkey::new_unique()).unwrap();
        }

        let mut data = Vec::new();
        pool.try_serialize(&mut data).unwrap();
        assert_eq!(data.len(), Pool::space("A pool", 3));
    }

    #[test]
    fn test_max_pool_fits_cpi_limit() {
        let name = "n".repeat(MAX_NAME_LEN);
        assert!(Pool::space(&name, MAX_CAPACITY) <= MAX_PERMITTED_DATA_INCREASE);
        assert!(Pool::space(&name, MAX_CAPACITY + 1) > MAX_PERMITTED_DATA_INCREASE);
    }

    #[test]
    fn test_record_payer_until_full() {
        let mut pool = Pool::new(Pubkey::new_unique(), "pool".to_string(), 2, 255);
        let first = Pubkey::new_unique();
        let second = Pubkey::new_unique();

        assert_eq!(pool.record_payer(first).unwrap(), 0);
        assert_eq!(pool.remaining(), 1);
        assert_eq!(pool.record_payer(second).unwrap(), 1);
        assert!(pool.is_full());

        assert!(pool.record_payer(Pubkey::new_unique()).is_err());
        assert_eq!(pool.payers, vec![first, second]);
    }

    #[test]
    fn test_roundtrip_keeps_name_bytes() {
        let pool = Pool::new(Pubkey::new_unique(), "héllo wörld".to_string(), 4, 250);
        let mut data = vec![0u8; Pool::space(&pool.name, pool.capacity)];
        pool.try_serialize(&mut &mut data[..]).unwrap();

        let decoded = Pool::try_deserialize(&mut &data[..]).unwrap();
        assert_eq!(decoded, pool);
        assert!(decoded.payers.is_empty());
    }
}
