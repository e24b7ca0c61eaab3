use super::income::BonusTiming;
use super::money::Money;
use crate::error::{Result, WaterfallError};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub const DEFAULT_UPCOMING_DAYS: u32 = 14;

/// Base that percent-type goals are computed against.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy, Default)]
#[serde(rename_all = "lowercase")]
pub enum PercentApply {
    #[default]
    Gross,
    Remainder,
}

/// The span a variable paycheck is expected to fall in.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy)]
#[serde(try_from = "RangeBounds")]
pub struct PaycheckRange {
    min: Money,
    max: Money,
}

#[derive(Deserialize)]
struct RangeBounds {
    min: Money,
    max: Money,
}

impl TryFrom<RangeBounds> for PaycheckRange {
    type Error = WaterfallError;

    fn try_from(bounds: RangeBounds) -> Result<Self> {
        Self::new(bounds.min, bounds.max)
    }
}

impl PaycheckRange {
    pub fn new(min: Money, max: Money) -> Result<Self> {
        if min.value().is_sign_negative() && !min.is_zero() {
            return Err(WaterfallError::InvalidInput(
                "paycheck range must be non-negative".to_string(),
            ));
        }
        if min > max {
            return Err(WaterfallError::InvalidInput(format!(
                "paycheck range min {min} exceeds max {max}"
            )));
        }
        Ok(Self { min, max })
    }

    pub fn min(&self) -> Money {
        self.min
    }

    pub fn max(&self) -> Money {
        self.max
    }

    pub fn contains(&self, amount: Money) -> bool {
        amount >= self.min && amount <= self.max
    }

    /// The part of `total` that can be counted on: never more than `min`.
    pub fn baseline(&self, total: Money) -> Money {
        total.min(self.min)
    }
}

/// Options recognised by the allocation engine.
///
/// Every field has a default, so a plan file may set any subset of them.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
#[serde(default)]
pub struct AllocationConfig {
    pub percent_apply: PercentApply,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paycheck_range: Option<PaycheckRange>,
    /// Look-ahead window for due-date awareness.
    pub upcoming_days: u32,
    /// Reference date. Supplying it turns on cadence and due-date awareness.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub as_of: Option<NaiveDate>,
    pub bonus_timing: BonusTiming,
}

impl Default for AllocationConfig {
    fn default() -> Self {
        Self {
            percent_apply: PercentApply::Gross,
            paycheck_range: None,
            upcoming_days: DEFAULT_UPCOMING_DAYS,
            as_of: None,
            bonus_timing: BonusTiming::PreBill,
        }
    }
}

impl AllocationConfig {
    pub fn with_percent_apply(mut self, percent_apply: PercentApply) -> Self {
        self.percent_apply = percent_apply;
        self
    }

    pub fn due_within(mut self, as_of: NaiveDate, upcoming_days: u32) -> Self {
        self.as_of = Some(as_of);
        self.upcoming_days = upcoming_days;
        self
    }

    pub fn with_range(mut self, range: PaycheckRange) -> Self {
        self.paycheck_range = Some(range);
        self
    }

    pub fn with_bonus_timing(mut self, timing: BonusTiming) -> Self {
        self.bonus_timing = timing;
        self
    }
}
