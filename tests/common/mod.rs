#![allow(dead_code)]

use paycheck_waterfall::domain::bill::Bill;
use paycheck_waterfall::domain::config::{AllocationConfig, PercentApply};
use paycheck_waterfall::domain::goal::Goal;
use paycheck_waterfall::domain::income::{Bonus, BonusTiming};
use paycheck_waterfall::domain::money::Money;
use rand::Rng;
use rand::rngs::StdRng;
use rust_decimal::Decimal;
use std::io::Error;
use std::path::Path;

/// A random amount with up to three decimal places, so inputs exercise rounding.
pub fn amount(rng: &mut StdRng, max_cents: i64) -> Decimal {
    Decimal::new(rng.gen_range(0..=max_cents * 10), 3)
}

pub fn bills(rng: &mut StdRng, count: usize) -> Vec<Bill> {
    (0..count)
        .map(|i| Bill::new(format!("Bill{i}"), Money::new(amount(rng, 150_000))))
        .collect()
}

pub fn goals(rng: &mut StdRng, count: usize) -> Vec<Goal> {
    (0..count)
        .map(|i| {
            if rng.gen_bool(0.5) {
                Goal::percent(format!("Goal{i}"), Decimal::new(rng.gen_range(0..=5_000), 2))
                    .unwrap()
            } else {
                Goal::fixed(format!("Goal{i}"), amount(rng, 80_000)).unwrap()
            }
        })
        .collect()
}

pub fn bonuses(rng: &mut StdRng) -> Vec<Bonus> {
    (0..rng.gen_range(0..3))
        .map(|i| Bonus::new(format!("Bonus{i}"), Money::new(amount(rng, 50_000))))
        .collect()
}

pub fn config(rng: &mut StdRng) -> AllocationConfig {
    let percent_apply = if rng.gen_bool(0.5) {
        PercentApply::Gross
    } else {
        PercentApply::Remainder
    };
    let timing = if rng.gen_bool(0.5) {
        BonusTiming::PreBill
    } else {
        BonusTiming::PostBill
    };
    AllocationConfig::default()
        .with_percent_apply(percent_apply)
        .with_bonus_timing(timing)
}

/// Writes a bills CSV with `rows` generated entries.
pub fn generate_bills_csv(path: &Path, rows: usize) -> Result<(), Error> {
    let mut wtr = csv::WriterBuilder::new().from_path(path)?;
    wtr.write_record(["name", "amount", "cadence", "next_due"])?;
    for i in 1..=rows {
        wtr.write_record([format!("Bill{i}").as_str(), "10.00", "monthly", ""])?;
    }
    wtr.flush()?;
    Ok(())
}
