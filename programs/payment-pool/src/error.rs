//! Unified error types for the Payment Pool program
//!
//! Error codes are stable across versions for client compatibility.

use anchor_lang::prelude::*;

#[error_code]
pub enum PoolError {
    // ========== Address Errors ==========

    /// Supplied bump does not re-derive the pool address
    #[msg("Invalid bump seed: does not derive the pool address")]
    InvalidBumpSeed, // 6000

    /// Every bump in 0..=255 produced an on-curve address
    #[msg("No valid bump found for pool address")]
    NoValidBump, // 6001

    /// Pool address is already in use
    #[msg("Account already exists at pool address")]
    AccountAlreadyExists, // 6002

    // ========== Creation Parameter Errors ==========

    #[msg("Pool name exceeds 32 bytes")]
    NameTooLong, // 6003

    #[msg("Pool name cannot be empty")]
    NameEmpty, // 6004

    /// Capacity outside 1..=MAX_CAPACITY
    #[msg("Invalid capacity")]
    InvalidCapacity, // 6005

    // ========== Payment Errors ==========

    /// No pool record at the given address
    #[msg("Pool not found")]
    PoolNotFound, // 6006

    #[msg("Pool name does not match stored name")]
    NameMismatch, // 6007

    #[msg("Pool owner does not match stored owner")]
    OwnerMismatch, // 6008

    /// Payer list has reached capacity
    #[msg("Payer list is full")]
    PoolFull, // 6009

    #[msg("Invalid amount: must be greater than zero")]
    InvalidAmount, // 6010

    // ========== Authorization / Funds ==========

    #[msg("Required signature missing")]
    SignerMissing, // 6011

    #[msg("Insufficient lamports")]
    InsufficientFunds, // 6012

    #[msg("Arithmetic overflow")]
    ArithmeticOverflow, // 6013

    /// Ledger adapter was asked about an account the instruction did not pass
    #[msg("Account not provided to instruction")]
    AccountNotProvided, // 6014
}
