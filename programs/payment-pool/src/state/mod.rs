//! State account definitions for the Payment Pool program

pub mod pool;

pub use pool::{Pool, MAX_CAPACITY, MAX_NAME_LEN};
