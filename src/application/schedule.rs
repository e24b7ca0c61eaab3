use crate::domain::bill::{Bill, Cadence};
use chrono::{Days, NaiveDate};

/// Whether, and how many times, a bill falls due inside the upcoming window.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct DueWindow {
    /// Each occurrence requires the bill's full amount.
    pub occurrences: u32,
    pub due_in_days: Option<i64>,
}

impl DueWindow {
    /// A bill that counts once with no date information.
    pub const UNDATED: Self = Self {
        occurrences: 1,
        due_in_days: None,
    };
}

/// Counts the due dates of `bill` in `[as_of, as_of + upcoming_days]`.
///
/// A due date before `as_of` is an arrear and counts once; the schedule then
/// rolls forward from it along the bill's cadence. Bills without a cadence
/// are treated as one-time.
pub fn due_window(bill: &Bill, as_of: NaiveDate, upcoming_days: u32) -> DueWindow {
    let Some(next_due) = bill.next_due else {
        return DueWindow::UNDATED;
    };
    let cadence = bill.cadence.unwrap_or(Cadence::OneTime);
    let window_end = as_of
        .checked_add_days(Days::new(u64::from(upcoming_days)))
        .unwrap_or(NaiveDate::MAX);

    let mut occurrences = 0;
    let mut date = Some(next_due);

    if next_due < as_of {
        occurrences += 1;
        date = cadence.next_after(next_due);
        while let Some(d) = date
            && d < as_of
        {
            date = cadence.next_after(d);
        }
    }

    while let Some(d) = date
        && d <= window_end
    {
        occurrences += 1;
        date = cadence.next_after(d);
    }

    DueWindow {
        occurrences,
        due_in_days: Some((next_due - as_of).num_days()),
    }
}
