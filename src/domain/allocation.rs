use super::config::{PaycheckRange, PercentApply};
use super::goal::GoalKind;
use super::income::BonusTiming;
use super::money::Money;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

/// How much of one bill this paycheck covers.
#[derive(Debug, Serialize, PartialEq, Clone)]
pub struct BillAllocation {
    pub name: String,
    /// What the bill asks for this cycle.
    pub required: Money,
    pub allocated: Money,
    /// Shortfall left unfunded.
    pub remaining: Money,
    /// Days from the reference date to the next due date; negative when overdue.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_in_days: Option<i64>,
    /// Due dates counted inside the upcoming window.
    pub occurrences: u32,
}

impl BillAllocation {
    pub fn is_fully_funded(&self) -> bool {
        self.remaining.is_zero()
    }
}

#[derive(Debug, Serialize, PartialEq, Clone)]
pub struct GoalAllocation {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: GoalKind,
    pub value: Decimal,
    pub desired: Money,
    pub allocated: Money,
}

impl GoalAllocation {
    pub fn shortfall(&self) -> Money {
        self.desired.saturating_sub(self.allocated)
    }
}

/// Inputs and intermediate sums behind an allocation, kept for display and audit.
#[derive(Debug, Serialize, PartialEq, Clone)]
pub struct AllocationMeta {
    pub paycheck: Money,
    pub supplemental_income: Money,
    pub paycheck_total: Money,
    pub baseline: Money,
    pub extra: Money,
    pub remaining_after_bills: Money,
    pub bills_required: Money,
    pub bills_allocated: Money,
    pub goals_desired: Money,
    pub goals_allocated: Money,
    /// Fraction of desired goal funding that was allocated, `0..=1`.
    pub goal_scale: Decimal,
    pub percent_apply: PercentApply,
    pub bonus_timing: BonusTiming,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paycheck_range: Option<PaycheckRange>,
    pub upcoming_days: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub as_of: Option<NaiveDate>,
}

/// The complete breakdown of one paycheck.
#[derive(Debug, Serialize, PartialEq, Clone)]
pub struct AllocationResult {
    pub bills: Vec<BillAllocation>,
    pub goals: Vec<GoalAllocation>,
    pub guilt_free: Money,
    pub meta: AllocationMeta,
}

impl AllocationResult {
    /// Everything handed out: bills, goals and guilt-free spending.
    pub fn distributed(&self) -> Money {
        self.bills.iter().map(|b| b.allocated).sum::<Money>()
            + self.goals.iter().map(|g| g.allocated).sum::<Money>()
            + self.guilt_free
    }

    pub fn bill(&self, name: &str) -> Option<&BillAllocation> {
        self.bills.iter().find(|b| b.name == name)
    }

    pub fn goal(&self, name: &str) -> Option<&GoalAllocation> {
        self.goals.iter().find(|g| g.name == name)
    }
}
