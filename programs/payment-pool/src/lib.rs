//! Payment Pool
//!
//! Owner-created, capacity-bounded pools that anyone can pay lamports into.
//! Each pool lives at a PDA derived from its owner and name and records its
//! payers in payment order.

use anchor_lang::prelude::*;

pub mod address;
pub mod error;
pub mod events;
pub mod guard;
pub mod instructions;
pub mod ledger;
pub mod state;


use instructions::*;

declare_id!("Fg6PaFpoGXkYsidMpWTK6W2BeZ7FEfcYkg476zPFsLnS");

#[program]
pub mod payment_pool {
    use super::*;

    /// Create a pool owned by the signer at `[b"pool", owner, name]`.
    pub fn new_pool(ctx: Context<NewPool>, name: String, capacity: u16, bump: u8) -> Result<()> {
        instructions::new_pool::handler(ctx, name, capacity, bump)
    }

    /// Pay `amount` lamports into a pool and join its payer list.
    pub fn pay_pool(ctx: Context<PayPool>, name: String, amount: u64) -> Result<()> {
        instructions::pay_pool::handler(ctx, name, amount)
    }
}
