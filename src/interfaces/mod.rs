//! Adapters between files and the engine's value types.

pub mod csv;
pub mod json;
