//! Application layer holding the allocation engine.
//!
//! The engine is a pair of pure functions: it reads only its arguments and
//! returns a fresh `AllocationResult`, so callers may invoke it from any
//! thread without coordination. Due-date handling lives in `schedule`.

pub mod engine;
pub mod schedule;

pub use engine::{allocate, allocate_with_bonuses};
