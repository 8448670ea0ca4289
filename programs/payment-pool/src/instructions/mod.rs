//! Instruction handlers for the Payment Pool program

pub mod new_pool;
pub mod pay_pool;

pub use new_pool::*;
pub use pay_pool::*;
