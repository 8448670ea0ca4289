//! New Pool Instruction
//!
//! Creates a pool account at the address derived from the caller and the
//! pool name. The caller pays the rent-exempt minimum for the account, which
//! is sized for `capacity` payers up front.

use anchor_lang::prelude::*;

use crate::address::pool_seeds;
use crate::error::PoolError;
use crate::events::PoolCreated;
use crate::guard;
use crate::ledger::{AccountLedger, PoolLedger};
use crate::state::Pool;

/// Accounts for new_pool instruction.
#[derive(Accounts)]
pub struct NewPool<'info> {
    /// CHECK: must be the address derived from `owner` and the pool name and
    /// must not hold a pool yet; both are checked by the handler, which then
    /// creates the account.
    #[account(mut)]
    pub pool: UncheckedAccount<'info>,

    /// CHECK: pool creator. Signs and funds the account.
    #[account(mut, signer @ PoolError::SignerMissing)]
    pub owner: UncheckedAccount<'info>,

    pub system_program: Program<'info, System>,
}

/// Handler for new_pool instruction.
pub fn handler(ctx: Context<NewPool>, name: String, capacity: u16, bump: u8) -> Result<()> {
    let pool_key = ctx.accounts.pool.key();
    let owner_key = ctx.accounts.owner.key();

    let mut ledger = AccountLedger::new(
        ctx.program_id,
        ctx.accounts.system_program.to_account_info(),
        vec![
            ctx.accounts.pool.to_account_info(),
            ctx.accounts.owner.to_account_info(),
        ],
    );
    let pool = create_pool(
        &mut ledger,
        ctx.program_id,
        &owner_key,
        &pool_key,
        name,
        capacity,
        bump,
    )?;

    emit!(PoolCreated {
        pool: pool_key,
        owner: owner_key,
        name: pool.name.clone(),
        capacity,
        timestamp: Clock::get()?.unix_timestamp,
    });

    msg!("Pool created: {}", pool_key);
    msg!("Name: {}, capacity: {}", pool.name, capacity);

    Ok(())
}

/// Validate and create a pool record at `address`.
///
/// All checks run before the ledger is touched. The account is funded and
/// assigned first and the record written last, so the only step that can
/// still fail after validation (the system-program funding) happens before
/// any pool data exists.
pub fn create_pool<L: PoolLedger>(
    ledger: &mut L,
    program_id: &Pubkey,
    owner: &Pubkey,
    address: &Pubkey,
    name: String,
    capacity: u16,
    bump: u8,
) -> Result<Pool> {
    // ========== VALIDATION ==========

    guard::require_signer(ledger.is_signer(owner)?)?;
    guard::require_valid_name(&name)?;
    guard::require_valid_capacity(capacity)?;
    guard::require_canonical_bump(program_id, owner, &name, address, bump)?;
    guard::require_vacant(ledger.is_occupied(address)?)?;

    let space = Pool::space(&name, capacity);
    let minimum = ledger.rent_exempt_minimum(space)?;
    let needed = minimum.saturating_sub(ledger.lamports(address)?);
    guard::require_funds(ledger.lamports(owner)?, needed)?;

    // ========== ACCOUNT CREATION ==========

    let bump_seed = [bump];
    let seeds = pool_seeds(owner, &name, &bump_seed);
    ledger.create_pool_account(owner, address, space, minimum, &seeds)?;

    // ========== STATE UPDATE ==========

    let pool = Pool::new(*owner, name, capacity, bump);
    ledger.store_pool(address, &pool)?;

    Ok(pool)
}
