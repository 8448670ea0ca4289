//! In-memory ledger for host builds
//!
//! Accounts live in an address-keyed map. [`MemoryLedger::transact`] is the
//! transaction boundary: it snapshots the map, runs one operation with a
//! given signer set, and restores the snapshot when the operation fails, so a
//! failed operation leaves every account exactly as it was.

use std::collections::{BTreeMap, BTreeSet};

use anchor_lang::prelude::*;

use super::PoolLedger;
use crate::error::PoolError;
use crate::state::Pool;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MemoryAccount {
    pub lamports: u64,
    pub owner: Pubkey,
    pub data: Vec<u8>,
}

#[derive(Clone, Debug)]
pub struct MemoryLedger {
    program_id: Pubkey,
    rent: Rent,
    accounts: BTreeMap<Pubkey, MemoryAccount>,
    signers: BTreeSet<Pubkey>,
}

impl MemoryLedger {
    pub fn new(program_id: Pubkey) -> Self {
        Self {
            program_id,
            rent: Rent::default(),
            accounts: BTreeMap::new(),
            signers: BTreeSet::new(),
        }
    }

    /// Credit lamports to a (system-owned, if new) account.
    pub fn fund(&mut self, key: &Pubkey, lamports: u64) -> Result<()> {
        let account = self.accounts.entry(*key).or_insert_with(|| MemoryAccount {
            owner: solana_program::system_program::ID,
            ..MemoryAccount::default()
        });
        account.lamports = account
            .lamports
            .checked_add(lamports)
            .ok_or(error!(PoolError::ArithmeticOverflow))?;
        Ok(())
    }

    pub fn account(&self, key: &Pubkey) -> Option<&MemoryAccount> {
        self.accounts.get(key)
    }

    /// Lamports at `key`, zero for unknown addresses.
    pub fn balance(&self, key: &Pubkey) -> u64 {
        self.accounts.get(key).map_or(0, |account| account.lamports)
    }

    /// Current pool record at `address`, if any.
    pub fn fetch_pool(&self, address: &Pubkey) -> Option<Pool> {
        self.load_pool(address).ok().flatten()
    }

    /// Run `op` as one atomic unit signed by `signers`.
    pub fn transact<T>(
        &mut self,
        signers: &[Pubkey],
        op: impl FnOnce(&mut Self) -> Result<T>,
    ) -> Result<T> {
        let snapshot = self.accounts.clone();
        self.signers = signers.iter().copied().collect();

        let result = op(self);

        self.signers.clear();
        if result.is_err() {
            self.accounts = snapshot;
        }
        result
    }

    fn debit(&mut self, key: &Pubkey, lamports: u64) -> Result<()> {
        let account = self
            .accounts
            .get_mut(key)
            .ok_or(error!(PoolError::InsufficientFunds))?;
        account.lamports = account
            .lamports
            .checked_sub(lamports)
            .ok_or(error!(PoolError::InsufficientFunds))?;
        Ok(())
    }

    fn credit(&mut self, key: &Pubkey, lamports: u64) -> Result<()> {
        let account = self.accounts.entry(*key).or_insert_with(|| MemoryAccount {
            owner: solana_program::system_program::ID,
            ..MemoryAccount::default()
        });
        account.lamports = account
            .lamports
            .checked_add(lamports)
            .ok_or(error!(PoolError::ArithmeticOverflow))?;
        Ok(())
    }
}

impl PoolLedger for MemoryLedger {
    fn is_signer(&self, key: &Pubkey) -> Result<bool> {
        Ok(self.signers.contains(key))
    }

    fn lamports(&self, key: &Pubkey) -> Result<u64> {
        Ok(self.balance(key))
    }

    fn rent_exempt_minimum(&self, data_len: usize) -> Result<u64> {
        Ok(self.rent.minimum_balance(data_len))
    }

    fn load_pool(&self, address: &Pubkey) -> Result<Option<Pool>> {
        let Some(account) = self.accounts.get(address) else {
            return Ok(None);
        };
        if account.owner != self.program_id || account.data.is_empty() {
            return Ok(None);
        }
        Ok(Pool::try_deserialize(&mut &account.data[..]).ok())
    }

    fn is_occupied(&self, address: &Pubkey) -> Result<bool> {
        Ok(self.accounts.get(address).is_some_and(|account| {
            !account.data.is_empty() || account.owner != solana_program::system_program::ID
        }))
    }

    fn create_pool_account(
        &mut self,
        funder: &Pubkey,
        address: &Pubkey,
        space: usize,
        lamports: u64,
        signer_seeds: &[&[u8]],
    ) -> Result<()> {
        // The runtime only lets a program sign for addresses its seeds derive
        let derived = Pubkey::create_program_address(signer_seeds, &self.program_id)
            .map_err(|_| error!(PoolError::InvalidBumpSeed))?;
        require_keys_eq!(derived, *address, PoolError::InvalidBumpSeed);
        require!(self.signers.contains(funder), PoolError::SignerMissing);
        require!(!self.is_occupied(address)?, PoolError::AccountAlreadyExists);

        let top_up = lamports.saturating_sub(self.balance(address));
        if top_up > 0 {
            self.debit(funder, top_up)?;
            self.credit(address, top_up)?;
        }

        if let Some(account) = self.accounts.get_mut(address) {
            account.owner = self.program_id;
            account.data = vec![0; space];
        }
        Ok(())
    }

    fn transfer(&mut self, from: &Pubkey, to: &Pubkey, lamports: u64) -> Result<()> {
        require!(self.signers.contains(from), PoolError::SignerMissing);
        self.debit(from, lamports)?;
        self.credit(to, lamports)
    }

    fn store_pool(&mut self, address: &Pubkey, pool: &Pool) -> Result<()> {
        let account = self
            .accounts
            .get_mut(address)
            .ok_or(error!(PoolError::PoolNotFound))?;
        require_keys_eq!(account.owner, self.program_id, PoolError::PoolNotFound);
        let mut writer: &mut [u8] = &mut account.data[..];
        pool.try_serialize(&mut writer)
    }
}
