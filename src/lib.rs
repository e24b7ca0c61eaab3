//! Deterministic paycheck waterfall allocation.
//!
//! One paycheck is split across bills (funded greedily, in order), savings
//! goals (scaled proportionally when oversubscribed) and whatever is left as
//! guilt-free spending. Every amount is held in whole cents and the parts
//! always add back up to the paycheck exactly.

pub mod application;
pub mod domain;
pub mod error;
pub mod interfaces;

pub use application::{allocate, allocate_with_bonuses};
pub use error::{Result, WaterfallError};
