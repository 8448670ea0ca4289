//! Ledger access for pool operations
//!
//! Pool operations never touch `AccountInfo`s directly. They read and write
//! through [`PoolLedger`], which is backed on-chain by the instruction's
//! accounts and system-program CPIs ([`AccountLedger`]), and on the host by an
//! in-memory, transactional account map ([`MemoryLedger`]).

use anchor_lang::prelude::*;

use crate::state::Pool;

pub mod accounts;
#[cfg(not(target_os = "solana"))]
pub mod memory;

pub use accounts::AccountLedger;
#[cfg(not(target_os = "solana"))]
pub use memory::{MemoryAccount, MemoryLedger};

/// Accounts visible to one pool operation.
pub trait PoolLedger {
    /// Whether `key` signed the enclosing transaction.
    fn is_signer(&self, key: &Pubkey) -> Result<bool>;

    fn lamports(&self, key: &Pubkey) -> Result<u64>;

    /// Minimum balance for an account of `data_len` bytes to persist.
    fn rent_exempt_minimum(&self, data_len: usize) -> Result<u64>;

    /// The pool record at `address`, or `None` when the address holds no
    /// program-owned pool.
    fn load_pool(&self, address: &Pubkey) -> Result<Option<Pool>>;

    /// Whether `address` already carries data or belongs to another program.
    fn is_occupied(&self, address: &Pubkey) -> Result<bool>;

    /// Fund `address` up to `lamports` from `funder`, then allocate `space`
    /// bytes and hand the account to this program. `signer_seeds` sign for
    /// the derived address.
    fn create_pool_account(
        &mut self,
        funder: &Pubkey,
        address: &Pubkey,
        space: usize,
        lamports: u64,
        signer_seeds: &[&[u8]],
    ) -> Result<()>;

    fn transfer(&mut self, from: &Pubkey, to: &Pubkey, lamports: u64) -> Result<()>;

    fn store_pool(&mut self, address: &Pubkey, pool: &Pool) -> Result<()>;
}
