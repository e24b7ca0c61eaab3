use crate::domain::allocation::AllocationResult;
use crate::domain::money::Money;
use crate::error::Result;
use serde::Serialize;
use std::io::Write;

#[derive(Debug, Serialize, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "snake_case")]
enum RowKind {
    Bill,
    Goal,
    GuiltFree,
}

#[derive(Debug, Serialize)]
struct AllocationRow<'a> {
    kind: RowKind,
    name: &'a str,
    required: Option<Money>,
    desired: Option<Money>,
    allocated: Money,
    remaining: Option<Money>,
}

/// Writes an allocation as flat CSV rows: bills, then goals, then guilt-free.
pub struct AllocationWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> AllocationWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(sink),
        }
    }

    pub fn write_allocation(&mut self, result: &AllocationResult) -> Result<()> {
        for bill in &result.bills {
            self.writer.serialize(AllocationRow {
                kind: RowKind::Bill,
                name: &bill.name,
                required: Some(bill.required),
                desired: None,
                allocated: bill.allocated,
                remaining: Some(bill.remaining),
            })?;
        }
        for goal in &result.goals {
            self.writer.serialize(AllocationRow {
                kind: RowKind::Goal,
                name: &goal.name,
                required: None,
                desired: Some(goal.desired),
                allocated: goal.allocated,
                remaining: Some(goal.shortfall()),
            })?;
        }
        self.writer.serialize(AllocationRow {
            kind: RowKind::GuiltFree,
            name: "guilt_free",
            required: None,
            desired: None,
            allocated: result.guilt_free,
            remaining: None,
        })?;
        self.writer.flush()?;
        Ok(())
    }
}
