use anchor_lang::prelude::*;

#[event]
pub struct PoolCreated {
    pub pool: Pubkey,
    pub owner: Pubkey,
    pub name: String,
    pub capacity: u16,
    pub timestamp: i64,
}

#[event]
pub struct PoolPaid {
    pub pool: Pubkey,
    pub payer: Pubkey,
    pub amount: u64,
    pub payer_count: u16,
    pub timestamp: i64,
}
