use super::money::Money;
use crate::error::{Result, WaterfallError};
use chrono::{Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};

/// How often a bill comes due.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "snake_case")]
pub enum Cadence {
    Weekly,
    Biweekly,
    Monthly,
    OneTime,
}

impl Cadence {
    /// The due date following `date`, or `None` for a one-time bill.
    pub fn next_after(self, date: NaiveDate) -> Option<NaiveDate> {
        match self {
            Cadence::Weekly => date.checked_add_days(Days::new(7)),
            Cadence::Biweekly => date.checked_add_days(Days::new(14)),
            Cadence::Monthly => date.checked_add_months(Months::new(1)),
            Cadence::OneTime => None,
        }
    }
}

impl std::str::FromStr for Cadence {
    type Err = WaterfallError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "weekly" => Ok(Cadence::Weekly),
            "biweekly" => Ok(Cadence::Biweekly),
            "monthly" => Ok(Cadence::Monthly),
            "one_time" | "one-time" | "onetime" => Ok(Cadence::OneTime),
            other => Err(WaterfallError::InvalidInput(format!(
                "unknown cadence '{other}'"
            ))),
        }
    }
}

/// A recurring (or one-off) obligation funded ahead of any goal.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct Bill {
    pub name: String,
    /// Amount owed per occurrence.
    pub amount: Money,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cadence: Option<Cadence>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_due: Option<NaiveDate>,
}

impl Bill {
    pub fn new(name: impl Into<String>, amount: Money) -> Self {
        Self {
            name: name.into(),
            amount,
            cadence: None,
            next_due: None,
        }
    }

    pub fn with_cadence(mut self, cadence: Cadence) -> Self {
        self.cadence = Some(cadence);
        self
    }

    pub fn due_on(mut self, date: NaiveDate) -> Self {
        self.next_due = Some(date);
        self
    }
}
