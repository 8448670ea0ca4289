//! Pay Pool Instruction
//!
//! Moves lamports from a payer into a pool and appends the payer to the
//! pool's payer list.
//!
//! # Authorization
//! Only the payer signs. `pool_owner` is passed so the payment names the pool
//! it expects to pay into; it is compared with the stored owner but its
//! signature is not required.
//!
//! # Repeat payers
//! A payer already in the list may pay again. Each payment takes its own
//! slot, so the list is a payment log bounded by `capacity`.

use anchor_lang::prelude::*;

use crate::error::PoolError;
use crate::events::PoolPaid;
use crate::guard;
use crate::ledger::{AccountLedger, PoolLedger};
use crate::state::Pool;

/// Accounts for pay_pool instruction.
#[derive(Accounts)]
pub struct PayPool<'info> {
    /// CHECK: deserialized and validated against `name` and `pool_owner` by
    /// the handler.
    #[account(mut)]
    pub pool: UncheckedAccount<'info>,

    /// CHECK: identity only, compared with the owner stored in the pool.
    pub pool_owner: UncheckedAccount<'info>,

    /// CHECK: payment source. Must sign.
    #[account(mut, signer @ PoolError::SignerMissing)]
    pub payer: UncheckedAccount<'info>,

    pub system_program: Program<'info, System>,
}

/// Handler for pay_pool instruction.
pub fn handler(ctx: Context<PayPool>, name: String, amount: u64) -> Result<()> {
    let pool_key = ctx.accounts.pool.key();
    let payer_key = ctx.accounts.payer.key();

    let mut ledger = AccountLedger::new(
        ctx.program_id,
        ctx.accounts.system_program.to_account_info(),
        vec![
            ctx.accounts.pool.to_account_info(),
            ctx.accounts.pool_owner.to_account_info(),
            ctx.accounts.payer.to_account_info(),
        ],
    );
    let pool = apply_payment(
        &mut ledger,
        ctx.program_id,
        &pool_key,
        &ctx.accounts.pool_owner.key(),
        &payer_key,
        &name,
        amount,
    )?;

    emit!(PoolPaid {
        pool: pool_key,
        payer: payer_key,
        amount,
        payer_count: pool.payer_count() as u16,
        timestamp: Clock::get()?.unix_timestamp,
    });

    msg!("Payment received");
    msg!("Amount: {}", amount);
    msg!("Payers: {}/{}, {} slots left", pool.payer_count(), pool.capacity, pool.remaining());

    Ok(())
}

/// Validate and apply one payment to the pool at `address`.
///
/// The transfer is the only fallible effect and runs before the payer is
/// appended; the append cannot fail once `require_room` has passed.
pub fn apply_payment<L: PoolLedger>(
    ledger: &mut L,
    program_id: &Pubkey,
    address: &Pubkey,
    pool_owner: &Pubkey,
    payer: &Pubkey,
    name: &str,
    amount: u64,
) -> Result<Pool> {
    // ========== VALIDATION ==========

    guard::require_signer(ledger.is_signer(payer)?)?;
    let mut pool = ledger
        .load_pool(address)?
        .ok_or(error!(PoolError::PoolNotFound))?;
    guard::require_name_match(&pool, name)?;
    guard::require_owner(&pool, pool_owner)?;
    guard::require_derived_address(program_id, &pool, address)?;
    guard::require_room(&pool)?;
    guard::require_positive_amount(amount)?;
    guard::require_funds(ledger.lamports(payer)?, amount)?;

    // ========== TRANSFER ==========

    ledger.transfer(payer, address, amount)?;

    // ========== STATE UPDATE ==========

    pool.record_payer(*payer)?;
    ledger.store_pool(address, &pool)?;

    Ok(pool)
}
