use crate::domain::bill::{Bill, Cadence};
use crate::domain::money::Money;
use crate::error::{Result, WaterfallError};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::io::Read;

/// One CSV row as written by the user, before validation.
#[derive(Debug, Deserialize)]
struct BillRow {
    name: String,
    amount: Decimal,
    #[serde(default)]
    cadence: Option<String>,
    #[serde(default)]
    next_due: Option<NaiveDate>,
}

impl TryFrom<BillRow> for Bill {
    type Error = WaterfallError;

    fn try_from(row: BillRow) -> Result<Self> {
        let cadence = row
            .cadence
            .filter(|c| !c.trim().is_empty())
            .map(|c| c.parse::<Cadence>())
            .transpose()?;
        Ok(Bill {
            amount: Money::non_negative(row.amount)
                .map_err(|e| WaterfallError::InvalidInput(format!("bill '{}': {e}", row.name)))?,
            name: row.name,
            cadence,
            next_due: row.next_due,
        })
    }
}

/// Reads bills from a CSV source with header `name,amount,cadence,next_due`.
///
/// `cadence` and `next_due` may be empty or missing entirely. Whitespace is
/// trimmed and records may have fewer columns than the header.
pub struct BillReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> BillReader<R> {
    /// Creates a new `BillReader` from any `Read` source (e.g., File, Stdin).
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    /// Lazily reads and validates bills, one `Result` per row, in file order.
    pub fn bills(self) -> impl Iterator<Item = Result<Bill>> {
        self.reader.into_deserialize::<BillRow>().map(|row| {
            let row = row.map_err(WaterfallError::from)?;
            Bill::try_from(row)
        })
    }
}
