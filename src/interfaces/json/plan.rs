use crate::domain::bill::Bill;
use crate::domain::config::AllocationConfig;
use crate::domain::goal::Goal;
use crate::domain::income::Bonus;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::io::Read;

/// Everything needed to allocate a paycheck except the paycheck itself.
///
/// A plan file may omit any section; missing lists are empty and missing
/// configuration falls back to `AllocationConfig::default()`.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone, Default)]
#[serde(default)]
pub struct Plan {
    pub bills: Vec<Bill>,
    pub goals: Vec<Goal>,
    pub bonuses: Vec<Bonus>,
    pub config: AllocationConfig,
}

impl Plan {
    pub fn from_reader<R: Read>(source: R) -> Result<Self> {
        Ok(serde_json::from_reader(source)?)
    }
}
