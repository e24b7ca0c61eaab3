use chrono::NaiveDate;
use clap::{Parser, ValueEnum};
use miette::{IntoDiagnostic, Result};
use paycheck_waterfall::allocate_with_bonuses;
use paycheck_waterfall::domain::config::{PaycheckRange, PercentApply};
use paycheck_waterfall::domain::income::{Bonus, BonusTiming};
use paycheck_waterfall::domain::money::Money;
use paycheck_waterfall::interfaces::csv::allocation_writer::AllocationWriter;
use paycheck_waterfall::interfaces::csv::bill_reader::BillReader;
use paycheck_waterfall::interfaces::json::plan::Plan;
use rust_decimal::Decimal;
use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    Json,
    Csv,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum PercentApplyArg {
    Gross,
    Remainder,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum BonusTimingArg {
    PreBill,
    PostBill,
}

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Paycheck amount to allocate
    #[arg(allow_hyphen_values = true)]
    paycheck: Decimal,

    /// JSON plan with bills, goals, bonuses and config
    #[arg(long)]
    plan: Option<PathBuf>,

    /// Bills CSV (name,amount,cadence,next_due), appended after plan bills
    #[arg(long)]
    bills: Option<PathBuf>,

    /// Supplemental income as NAME=AMOUNT (repeatable)
    #[arg(long = "bonus", value_parser = parse_bonus)]
    bonuses: Vec<Bonus>,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Json)]
    format: Format,

    /// Base for percent goals
    #[arg(long, value_enum)]
    percent_apply: Option<PercentApplyArg>,

    /// Whether bonuses fund bills or only what is left after them
    #[arg(long, value_enum)]
    bonus_timing: Option<BonusTimingArg>,

    /// Reference date (YYYY-MM-DD); enables due-date awareness
    #[arg(long)]
    as_of: Option<NaiveDate>,

    /// Days ahead a bill must fall due to count this cycle
    #[arg(long)]
    upcoming_days: Option<u32>,

    /// Lowest expected paycheck
    #[arg(long, requires = "range_max")]
    range_min: Option<Decimal>,

    /// Highest expected paycheck
    #[arg(long, requires = "range_min")]
    range_max: Option<Decimal>,

    /// Emit logs as JSON
    #[arg(long)]
    log_json: bool,
}

fn parse_bonus(raw: &str) -> std::result::Result<Bonus, String> {
    let (name, amount) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=AMOUNT, got '{raw}'"))?;
    let amount: Decimal = amount
        .trim()
        .parse()
        .map_err(|e| format!("invalid bonus amount '{amount}': {e}"))?;
    let amount = Money::non_negative(amount).map_err(|e| e.to_string())?;
    Ok(Bonus::new(name.trim(), amount))
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_json);

    let mut plan = match &cli.plan {
        Some(path) => {
            let file = File::open(path).into_diagnostic()?;
            Plan::from_reader(file).into_diagnostic()?
        }
        None => Plan::default(),
    };

    if let Some(path) = &cli.bills {
        let file = File::open(path).into_diagnostic()?;
        for bill in BillReader::new(file).bills() {
            match bill {
                Ok(bill) => plan.bills.push(bill),
                Err(e) => warn!("Error reading bill: {}", e),
            }
        }
    }
    plan.bonuses.extend(cli.bonuses);

    if let Some(percent_apply) = cli.percent_apply {
        plan.config.percent_apply = match percent_apply {
            PercentApplyArg::Gross => PercentApply::Gross,
            PercentApplyArg::Remainder => PercentApply::Remainder,
        };
    }
    if let Some(timing) = cli.bonus_timing {
        plan.config.bonus_timing = match timing {
            BonusTimingArg::PreBill => BonusTiming::PreBill,
            BonusTimingArg::PostBill => BonusTiming::PostBill,
        };
    }
    if let Some(as_of) = cli.as_of {
        plan.config.as_of = Some(as_of);
    }
    if let Some(days) = cli.upcoming_days {
        plan.config.upcoming_days = days;
    }
    if let (Some(min), Some(max)) = (cli.range_min, cli.range_max) {
        let range = PaycheckRange::new(Money::new(min), Money::new(max)).into_diagnostic()?;
        plan.config.paycheck_range = Some(range);
    }

    let result = allocate_with_bonuses(
        cli.paycheck,
        &plan.bills,
        &plan.goals,
        &plan.bonuses,
        &plan.config,
    )
    .into_diagnostic()?;

    if let Some(range) = plan.config.paycheck_range
        && !range.contains(result.meta.paycheck)
    {
        info!(
            paycheck = %result.meta.paycheck,
            min = %range.min(),
            max = %range.max(),
            "paycheck outside expected range"
        );
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match cli.format {
        Format::Json => {
            serde_json::to_writer_pretty(&mut out, &result).into_diagnostic()?;
            writeln!(out).into_diagnostic()?;
        }
        Format::Csv => {
            AllocationWriter::new(out)
                .write_allocation(&result)
                .into_diagnostic()?;
        }
    }

    Ok(())
}
