//! On-chain ledger backed by an instruction's accounts
//!
//! Lamport movements go through the system program so the runtime enforces
//! signatures and balances. Atomicity comes from the runtime: if the
//! instruction fails, none of these writes survive.

use anchor_lang::prelude::*;
use anchor_lang::system_program::{self, Allocate, Assign, CreateAccount, Transfer};

use super::PoolLedger;
use crate::error::PoolError;
use crate::state::Pool;

pub struct AccountLedger<'a, 'info> {
    program_id: &'a Pubkey,
    system_program: AccountInfo<'info>,
    accounts: Vec<AccountInfo<'info>>,
}

impl<'a, 'info> AccountLedger<'a, 'info> {
    pub fn new(
        program_id: &'a Pubkey,
        system_program: AccountInfo<'info>,
        accounts: Vec<AccountInfo<'info>>,
    ) -> Self {
        Self {
            program_id,
            system_program,
            accounts,
        }
    }

    fn account(&self, key: &Pubkey) -> Result<&AccountInfo<'info>> {
        self.accounts
            .iter()
            .find(|info| info.key == key)
            .ok_or_else(|| error!(PoolError::AccountNotProvided))
    }
}

impl<'a, 'info> PoolLedger for AccountLedger<'a, 'info> {
    fn is_signer(&self, key: &Pubkey) -> Result<bool> {
        Ok(self.account(key)?.is_signer)
    }

    fn lamports(&self, key: &Pubkey) -> Result<u64> {
        Ok(self.account(key)?.lamports())
    }

    fn rent_exempt_minimum(&self, data_len: usize) -> Result<u64> {
        Ok(Rent::get()?.minimum_balance(data_len))
    }

    fn load_pool(&self, address: &Pubkey) -> Result<Option<Pool>> {
        let info = self.account(address)?;
        if info.owner != self.program_id || info.data_is_empty() {
            return Ok(None);
        }
        let data = info.try_borrow_data()?;
        Ok(Pool::try_deserialize(&mut &data[..]).ok())
    }

    fn is_occupied(&self, address: &Pubkey) -> Result<bool> {
        let info = self.account(address)?;
        Ok(!info.data_is_empty() || *info.owner != solana_program::system_program::ID)
    }

    fn create_pool_account(
        &mut self,
        funder: &Pubkey,
        address: &Pubkey,
        space: usize,
        lamports: u64,
        signer_seeds: &[&[u8]],
    ) -> Result<()> {
        let funder = self.account(funder)?.clone();
        let pool = self.account(address)?.clone();
        let signer = &[signer_seeds];
        let current = pool.lamports();

        if current == 0 {
            return system_program::create_account(
                CpiContext::new_with_signer(
                    self.system_program.clone(),
                    CreateAccount {
                        from: funder,
                        to: pool,
                    },
                    signer,
                ),
                lamports,
                space as u64,
                self.program_id,
            );
        }

        // Someone already sent lamports here: top up, then allocate and assign
        let top_up = lamports.saturating_sub(current);
        if top_up > 0 {
            system_program::transfer(
                CpiContext::new(
                    self.system_program.clone(),
                    Transfer {
                        from: funder,
                        to: pool.clone(),
                    },
                ),
                top_up,
            )?;
        }
        system_program::allocate(
            CpiContext::new_with_signer(
                self.system_program.clone(),
                Allocate {
                    account_to_allocate: pool.clone(),
                },
                signer,
            ),
            space as u64,
        )?;
        system_program::assign(
            CpiContext::new_with_signer(
                self.system_program.clone(),
                Assign {
                    account_to_assign: pool,
                },
                signer,
            ),
            self.program_id,
        )
    }

    fn transfer(&mut self, from: &Pubkey, to: &Pubkey, lamports: u64) -> Result<()> {
        let from = self.account(from)?.clone();
        let to = self.account(to)?.clone();
        system_program::transfer(
            CpiContext::new(self.system_program.clone(), Transfer { from, to }),
            lamports,
        )
    }

    fn store_pool(&mut self, address: &Pubkey, pool: &Pool) -> Result<()> {
        let info = self.account(address)?;
        require_keys_eq!(*info.owner, *self.program_id, PoolError::PoolNotFound);
        let mut data = info.try_borrow_mut_data()?;
        let mut writer: &mut [u8] = &mut data[..];
        pool.try_serialize(&mut writer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct TestAccount {
        key: Pubkey,
        is_signer: bool,
        lamports: u64,
        data: Vec<u8>,
        owner: Pubkey,
    }

    impl TestAccount {
        fn system(lamports: u64) -> Self {
            Self {
                key: Pubkey::new_unique(),
                is_signer: false,
                lamports,
                data: Vec::new(),
                owner: solana_program::system_program::ID,
            }
        }

        fn owned_by(owner: Pubkey, data: Vec<u8>) -> Self {
            Self {
                key: Pubkey::new_unique(),
                is_signer: false,
                lamports: 1_000_000,
                data,
                owner,
            }
        }

        fn info(&mut self) -> AccountInfo<'_> {
            AccountInfo::new(
                &self.key,
                self.is_signer,
                true,
                &mut self.lamports,
                &mut self.data,
                &self.owner,
                false,
                0,
            )
        }
    }

    fn system_program() -> TestAccount {
        TestAccount {
            key: solana_program::system_program::ID,
            ..TestAccount::system(1)
        }
    }

    fn sample_pool() -> Pool {
        let mut pool = Pool::new(Pubkey::new_unique(), "pool".to_string(), 3, 254);
        pool.record_payer(Pubkey::new_unique()).unwrap();
        pool
    }

    fn encoded(pool: &Pool) -> Vec<u8> {
        let mut data = vec![0; Pool::space(&pool.name, pool.capacity)];
        pool.try_serialize(&mut &mut data[..]).unwrap();
        data
    }

    #[test]
    fn test_reads_signer_and_lamports() {
        let program_id = crate::ID;
        let mut system = system_program();
        let mut payer = TestAccount::system(500);
        payer.is_signer = true;
        let mut other = TestAccount::system(7);
        let (payer_key, other_key) = (payer.key, other.key);

        let ledger = AccountLedger::new(&program_id, system.info(), vec![payer.info(), other.info()]);

        assert!(ledger.is_signer(&payer_key).unwrap());
        assert!(!ledger.is_signer(&other_key).unwrap());
        assert_eq!(ledger.lamports(&payer_key).unwrap(), 500);
        assert_eq!(ledger.lamports(&other_key).unwrap(), 7);
    }

    #[test]
    fn test_unlisted_account_is_not_provided() {
        let program_id = crate::ID;
        let mut system = system_program();
        let mut payer = TestAccount::system(500);

        let mut ledger = AccountLedger::new(&program_id, system.info(), vec![payer.info()]);
        let missing = Pubkey::new_unique();

        let not_provided: anchor_lang::error::Error = PoolError::AccountNotProvided.into();
        assert_eq!(ledger.is_signer(&missing).unwrap_err(), not_provided);
        assert_eq!(ledger.lamports(&missing).unwrap_err(), not_provided);
        assert_eq!(ledger.load_pool(&missing).unwrap_err(), not_provided);
        assert_eq!(ledger.is_occupied(&missing).unwrap_err(), not_provided);
        assert_eq!(
            ledger.store_pool(&missing, &sample_pool()).unwrap_err(),
            not_provided
        );
    }

    #[test]
    fn test_load_pool_only_reads_program_records() {
        let program_id = crate::ID;
        let pool = sample_pool();
        let mut system = system_program();
        let mut valid = TestAccount::owned_by(program_id, encoded(&pool));
        let mut foreign = TestAccount::owned_by(Pubkey::new_unique(), encoded(&pool));
        let mut empty = TestAccount::owned_by(program_id, Vec::new());
        let mut garbage = TestAccount::owned_by(program_id, vec![0xAB; 16]);
        let keys = [valid.key, foreign.key, empty.key, garbage.key];

        let ledger = AccountLedger::new(
            &program_id,
            system.info(),
            vec![valid.info(), foreign.info(), empty.info(), garbage.info()],
        );

        assert_eq!(ledger.load_pool(&keys[0]).unwrap(), Some(pool));
        assert_eq!(ledger.load_pool(&keys[1]).unwrap(), None);
        assert_eq!(ledger.load_pool(&keys[2]).unwrap(), None);
        assert_eq!(ledger.load_pool(&keys[3]).unwrap(), None);
    }

    #[test]
    fn test_occupancy_matches_memory_ledger() {
        let program_id = crate::ID;
        let mut system = system_program();
        let mut funded = TestAccount::system(5_000_000);
        let mut owned = TestAccount::owned_by(program_id, Vec::new());
        let mut with_data = TestAccount::system(5_000_000);
        with_data.data = vec![0; 8];
        let keys = [funded.key, owned.key, with_data.key];

        let ledger = AccountLedger::new(
            &program_id,
            system.info(),
            vec![funded.info(), owned.info(), with_data.info()],
        );

        let mut memory = crate::ledger::MemoryLedger::new(program_id);
        memory.fund(&keys[0], 5_000_000).unwrap();

        assert!(!ledger.is_occupied(&keys[0]).unwrap());
        assert!(!memory.is_occupied(&keys[0]).unwrap());
        assert!(ledger.is_occupied(&keys[1]).unwrap());
        assert!(ledger.is_occupied(&keys[2]).unwrap());
    }

    #[test]
    fn test_store_then_load_round_trips() {
        let program_id = crate::ID;
        let pool = sample_pool();
        let mut system = system_program();
        let mut account = TestAccount::owned_by(
            program_id,
            vec![0; Pool::space(&pool.name, pool.capacity)],
        );
        let key = account.key;

        let mut ledger = AccountLedger::new(&program_id, system.info(), vec![account.info()]);
        ledger.store_pool(&key, &pool).unwrap();

        assert_eq!(ledger.load_pool(&key).unwrap(), Some(pool));
    }

    #[test]
    fn test_store_refuses_foreign_account() {
        let program_id = crate::ID;
        let pool = sample_pool();
        let mut system = system_program();
        let mut account = TestAccount::owned_by(
            Pubkey::new_unique(),
            vec![0; Pool::space(&pool.name, pool.capacity)],
        );
        let key = account.key;

        let mut ledger = AccountLedger::new(&program_id, system.info(), vec![account.info()]);

        assert_eq!(
            ledger.store_pool(&key, &pool).unwrap_err(),
            PoolError::PoolNotFound.into()
        );
        drop(ledger);
        assert!(account.data.iter().all(|byte| *byte == 0));
    }
}
