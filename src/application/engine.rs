use super::schedule::{DueWindow, due_window};
use crate::domain::allocation::{
    AllocationMeta, AllocationResult, BillAllocation, GoalAllocation,
};
use crate::domain::bill::Bill;
use crate::domain::config::{AllocationConfig, PercentApply};
use crate::domain::goal::{Goal, GoalRule};
use crate::domain::income::{self, Bonus, BonusTiming};
use crate::domain::money::Money;
use crate::error::{Result, WaterfallError};
use rust_decimal::Decimal;
use tracing::{debug, info};

const SCALE_DP: u32 = 6;

/// Splits one paycheck across bills, goals and guilt-free spending.
///
/// Fails only when `paycheck` is negative. Shortfalls are reported through
/// the result (`BillAllocation::remaining`, `GoalAllocation::shortfall`).
pub fn allocate(
    paycheck: Decimal,
    bills: &[Bill],
    goals: &[Goal],
    config: &AllocationConfig,
) -> Result<AllocationResult> {
    allocate_with_bonuses(paycheck, bills, goals, &[], config)
}

/// Same as [`allocate`], with supplemental income joining the pool according
/// to `config.bonus_timing`.
pub fn allocate_with_bonuses(
    paycheck: Decimal,
    bills: &[Bill],
    goals: &[Goal],
    bonuses: &[Bonus],
    config: &AllocationConfig,
) -> Result<AllocationResult> {
    if paycheck.is_sign_negative() && !paycheck.is_zero() {
        return Err(WaterfallError::InvalidInput(format!(
            "paycheck amount must be non-negative, got {paycheck}"
        )));
    }

    let paycheck = Money::new(paycheck);
    let supplemental = income::total(bonuses);
    let paycheck_total = paycheck + supplemental;
    let (gross_base, post_bill_income) = match config.bonus_timing {
        BonusTiming::PreBill => (paycheck_total, Money::ZERO),
        BonusTiming::PostBill => (paycheck, supplemental),
    };

    let bill_allocations = fund_bills(gross_base, bills, config);
    let bills_required: Money = bill_allocations.iter().map(|b| b.required).sum();
    let bills_allocated: Money = bill_allocations.iter().map(|b| b.allocated).sum();
    let remaining_after_bills = gross_base - bills_allocated + post_bill_income;

    let percent_base = match config.percent_apply {
        PercentApply::Gross => gross_base,
        PercentApply::Remainder => remaining_after_bills,
    };
    let (mut goal_allocations, goal_scale) =
        fund_goals(goals, percent_base, remaining_after_bills);
    let goals_desired: Money = goal_allocations.iter().map(|g| g.desired).sum();
    let goals_allocated: Money = goal_allocations.iter().map(|g| g.allocated).sum();

    // Scaled goals consume the whole remainder; rounding is settled below.
    let mut guilt_free = if goals_desired > remaining_after_bills {
        Money::ZERO
    } else {
        remaining_after_bills - goals_allocated
    };
    reconcile(
        paycheck_total - bills_allocated,
        &mut goal_allocations,
        &mut guilt_free,
    );
    let goals_allocated: Money = goal_allocations.iter().map(|g| g.allocated).sum();

    let baseline = config
        .paycheck_range
        .map_or(paycheck_total, |range| range.baseline(paycheck_total));

    debug!(
        %paycheck,
        %supplemental,
        %bills_allocated,
        %goals_allocated,
        %guilt_free,
        "paycheck allocated"
    );

    Ok(AllocationResult {
        bills: bill_allocations,
        goals: goal_allocations,
        guilt_free,
        meta: AllocationMeta {
            paycheck,
            supplemental_income: supplemental,
            paycheck_total,
            baseline,
            extra: paycheck_total - baseline,
            remaining_after_bills,
            bills_required,
            bills_allocated,
            goals_desired,
            goals_allocated,
            goal_scale,
            percent_apply: config.percent_apply,
            bonus_timing: config.bonus_timing,
            paycheck_range: config.paycheck_range,
            upcoming_days: config.upcoming_days,
            as_of: config.as_of,
        },
    })
}

/// Greedy waterfall: each bill takes what it needs until the pool runs dry.
fn fund_bills(pool: Money, bills: &[Bill], config: &AllocationConfig) -> Vec<BillAllocation> {
    let mut planned: Vec<(&Bill, DueWindow)> = bills
        .iter()
        .map(|bill| {
            let window = match config.as_of {
                Some(as_of) => due_window(bill, as_of, config.upcoming_days),
                None => DueWindow::UNDATED,
            };
            (bill, window)
        })
        .collect();

    // Soonest due first; undated bills keep their order behind dated ones.
    if config.as_of.is_some() {
        planned.sort_by_key(|(_, window)| window.due_in_days.unwrap_or(i64::MAX));
    }

    let mut remaining = pool;
    planned
        .into_iter()
        .map(|(bill, window)| {
            let required = bill.amount.times(window.occurrences);
            let allocated = required.min(remaining);
            remaining -= allocated;

            if allocated < required {
                info!(bill = %bill.name, %required, %allocated, "bill underfunded");
            } else {
                debug!(
                    bill = %bill.name,
                    %allocated,
                    occurrences = window.occurrences,
                    "bill funded"
                );
            }

            BillAllocation {
                name: bill.name.clone(),
                required,
                allocated,
                remaining: required - allocated,
                due_in_days: window.due_in_days,
                occurrences: window.occurrences,
            }
        })
        .collect()
}

/// Computes desired amounts and, when they exceed `available`, scales every
/// goal by the same ratio. Returns the allocations and that ratio.
fn fund_goals(
    goals: &[Goal],
    percent_base: Money,
    available: Money,
) -> (Vec<GoalAllocation>, Decimal) {
    let desired: Vec<Money> = goals
        .iter()
        .map(|goal| match goal.rule {
            GoalRule::Percent(percent) => percent.of(percent_base),
            GoalRule::Fixed(amount) => amount,
        })
        .collect();
    let desired_total: Money = desired.iter().sum();
    let oversubscribed = desired_total > available;

    let scale = if oversubscribed {
        let ratio = (available.value() / desired_total.value()).round_dp(SCALE_DP);
        info!(%desired_total, %available, %ratio, "goals scaled down");
        ratio
    } else {
        Decimal::ONE
    };

    let allocations = goals
        .iter()
        .zip(desired)
        .map(|(goal, desired)| {
            let allocated = if oversubscribed {
                desired.scale(available.value(), desired_total.value())
            } else {
                desired
            };
            GoalAllocation {
                name: goal.name.clone(),
                kind: goal.rule.kind(),
                value: goal.rule.value(),
                desired,
                allocated,
            }
        })
        .collect();

    (allocations, scale)
}

/// Makes goals plus guilt-free add up to exactly `available`.
///
/// Per-goal rounding can leave the sum a few cents off. A surplus goes to the
/// first goal that wants money at all, or to guilt-free when none does; a
/// deficit is taken from goals in list order without pushing any below zero.
///
/// Leading goals with nothing desired are skipped, so a goal that asked for
/// zero never receives the surplus.
///
/// Because the correction lands on one goal, that goal can lose a cent when
/// the paycheck grows by a cent (100.00 over three 50.00 goals gives it 33.34,
/// 100.01 gives 33.33). Every other goal is monotone in the paycheck.
fn reconcile(available: Money, goals: &mut [GoalAllocation], guilt_free: &mut Money) {
    let distributed: Money = goals.iter().map(|g| g.allocated).sum::<Money>() + *guilt_free;
    if distributed == available {
        return;
    }

    if distributed < available {
        let gap = available - distributed;
        debug!(%gap, "rounding surplus absorbed");
        match goals.iter_mut().find(|g| g.desired.is_positive()) {
            Some(goal) => goal.allocated += gap,
            None => *guilt_free += gap,
        }
        return;
    }

    let mut gap = distributed - available;
    debug!(%gap, "rounding deficit absorbed");
    for goal in goals.iter_mut() {
        if gap.is_zero() {
            break;
        }
        let take = gap.min(goal.allocated);
        goal.allocated -= take;
        gap -= take;
    }
    if gap.is_positive() {
        *guilt_free = guilt_free.saturating_sub(gap);
    }
}
