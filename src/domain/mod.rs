//! Value types shared by the engine and its adapters.

pub mod allocation;
pub mod bill;
pub mod config;
pub mod goal;
pub mod income;
pub mod money;
