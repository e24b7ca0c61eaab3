use super::money::Money;
use serde::{Deserialize, Serialize};

/// Income on top of the regular paycheck (bonus, side job, refund).
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct Bonus {
    pub name: String,
    pub amount: Money,
}

impl Bonus {
    pub fn new(name: impl Into<String>, amount: Money) -> Self {
        Self {
            name: name.into(),
            amount,
        }
    }
}

/// When supplemental income joins the distributable pool.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy, Default)]
#[serde(rename_all = "snake_case")]
pub enum BonusTiming {
    /// Treated as part of gross pay: funds bills and widens the gross percent base.
    #[default]
    PreBill,
    /// Added to whatever is left after bills.
    PostBill,
}

pub fn total(bonuses: &[Bonus]) -> Money {
    bonuses.iter().map(|b| b.amount).sum()
}
