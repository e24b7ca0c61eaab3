use super::money::Money;
use crate::error::{Result, WaterfallError};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

const ONE_HUNDRED: Decimal = Decimal::ONE_HUNDRED;

/// A percentage expressed in points, `0..=100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct Percent(Decimal);

impl Percent {
    pub fn new(points: Decimal) -> Result<Self> {
        if points < Decimal::ZERO || points > ONE_HUNDRED {
            return Err(WaterfallError::InvalidInput(format!(
                "percent must be between 0 and 100, got {points}"
            )));
        }
        Ok(Self(points))
    }

    pub fn points(&self) -> Decimal {
        self.0
    }

    /// `base * points / 100`, rounded to cents.
    pub fn of(&self, base: Money) -> Money {
        base.scale(self.0, ONE_HUNDRED)
    }
}

/// How a goal's desired amount is derived.
///
/// New rule kinds are added here; the engine matches exhaustively.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GoalRule {
    /// A share of the percent base (gross pay or post-bill remainder).
    Percent(Percent),
    /// A flat amount, independent of the percent base.
    Fixed(Money),
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum GoalKind {
    Percent,
    Fixed,
}

impl GoalRule {
    pub fn kind(&self) -> GoalKind {
        match self {
            GoalRule::Percent(_) => GoalKind::Percent,
            GoalRule::Fixed(_) => GoalKind::Fixed,
        }
    }

    /// The configured value: percentage points or a currency amount.
    pub fn value(&self) -> Decimal {
        match self {
            GoalRule::Percent(p) => p.points(),
            GoalRule::Fixed(m) => m.value(),
        }
    }
}

/// A savings goal funded from what is left after bills.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "GoalRecord", into = "GoalRecord")]
pub struct Goal {
    pub name: String,
    pub rule: GoalRule,
}

impl Goal {
    pub fn percent(name: impl Into<String>, points: Decimal) -> Result<Self> {
        Ok(Self {
            name: name.into(),
            rule: GoalRule::Percent(Percent::new(points)?),
        })
    }

    pub fn fixed(name: impl Into<String>, amount: Decimal) -> Result<Self> {
        Ok(Self {
            name: name.into(),
            rule: GoalRule::Fixed(Money::non_negative(amount)?),
        })
    }
}

/// Flat `{name, type, value}` wire shape of a goal.
#[derive(Debug, Serialize, Deserialize)]
struct GoalRecord {
    name: String,
    #[serde(rename = "type")]
    kind: GoalKind,
    value: Decimal,
}

impl TryFrom<GoalRecord> for Goal {
    type Error = WaterfallError;

    fn try_from(record: GoalRecord) -> Result<Self> {
        match record.kind {
            GoalKind::Percent => Goal::percent(record.name, record.value),
            GoalKind::Fixed => Goal::fixed(record.name, record.value),
        }
    }
}

impl From<Goal> for GoalRecord {
    fn from(goal: Goal) -> Self {
        Self {
            kind: goal.rule.kind(),
            value: goal.rule.value(),
            name: goal.name,
        }
    }
}
