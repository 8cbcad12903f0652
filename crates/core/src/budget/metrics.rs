//! Budget metric formulas.
//!
//! Each metric is a pure function of the deliverables or of other metrics,
//! so it can be checked on its own. Whole-number results round half away
//! from zero. Decimal arithmetic saturates instead of panicking; validated
//! amounts stay far below the point where that matters.

use chrono::NaiveDate;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::project::Deliverable;

/// Progress reported for a project with nothing left to deliver.
pub const COMPLETE: i64 = 100;

/// Rounds to a whole number, half away from zero, saturating at the `i64` range.
#[must_use]
pub fn round_whole(value: Decimal) -> i64 {
    let rounded = value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    rounded.to_i64().unwrap_or(if rounded.is_sign_negative() {
        i64::MIN
    } else {
        i64::MAX
    })
}

/// Sum of the deliverables' budgets.
#[must_use]
pub fn total_budget(deliverables: &[Deliverable]) -> Decimal {
    saturating_sum(deliverables.iter().map(|d| d.budget))
}

/// Sum of the deliverables' spent amounts.
#[must_use]
pub fn total_spent(deliverables: &[Deliverable]) -> Decimal {
    saturating_sum(deliverables.iter().map(|d| d.spent))
}

fn saturating_sum(amounts: impl Iterator<Item = Decimal>) -> Decimal {
    amounts.fold(Decimal::ZERO, Decimal::saturating_add)
}

/// Budget-weighted average progress: `round(Σ(bᵢ·pᵢ) / Σbᵢ)`.
///
/// With no deliverables the project counts as complete (100). When every
/// budget is zero there are no weights, so the plain mean is used.
#[must_use]
pub fn weighted_progress(deliverables: &[Deliverable]) -> i64 {
    if deliverables.is_empty() {
        return COMPLETE;
    }

    let total = total_budget(deliverables);
    if total.is_zero() {
        let sum = saturating_sum(deliverables.iter().map(|d| Decimal::from(d.progress)));
        return sum
            .checked_div(Decimal::from(deliverables.len()))
            .map_or(COMPLETE, round_whole);
    }

    let exact = deliverables
        .iter()
        .try_fold(Decimal::ZERO, |acc, d| {
            d.budget
                .checked_mul(Decimal::from(d.progress))
                .and_then(|weighted| acc.checked_add(weighted))
        })
        .and_then(|weighted| weighted.checked_div(total));

    match exact {
        Some(average) => round_whole(average),
        // Σ(bᵢ·pᵢ) overflowed: weigh each progress by its share of the total instead.
        None => {
            let shared = saturating_sum(deliverables.iter().map(|d| {
                d.budget
                    .checked_div(total)
                    .map_or(Decimal::ZERO, |share| share.saturating_mul(Decimal::from(d.progress)))
            }));
            round_whole(shared).clamp(0, COMPLETE)
        }
    }
}

/// Whole-number percentage of the budget spent: `round(spent / budget * 100)`.
///
/// Zero when there is no budget to measure against.
#[must_use]
pub fn budget_ratio(budget: Decimal, spent: Decimal) -> i64 {
    if budget.is_zero() {
        return 0;
    }

    let ratio = spent
        .checked_mul(Decimal::ONE_HUNDRED)
        .and_then(|scaled| scaled.checked_div(budget))
        .or_else(|| {
            spent
                .checked_div(budget)
                .and_then(|fraction| fraction.checked_mul(Decimal::ONE_HUNDRED))
        });

    match ratio {
        Some(ratio) => round_whole(ratio),
        // The ratio itself is beyond Decimal range; the sign is still known.
        None if spent.is_sign_negative() == budget.is_sign_negative() => i64::MAX,
        None => i64::MIN,
    }
}

/// Schedule score: `progress - budget_ratio`. Positive means ahead.
#[must_use]
pub const fn score(progress: i64, budget_ratio: i64) -> i64 {
    progress.saturating_sub(budget_ratio)
}

/// Unspent budget: `budget - spent`. Negative when overspent.
#[must_use]
pub fn left(budget: Decimal, spent: Decimal) -> Decimal {
    budget.saturating_sub(spent)
}

/// Overspend: zero while money is left, otherwise the magnitude of the deficit.
#[must_use]
pub fn overruns(left: Decimal) -> Decimal {
    if left >= Decimal::ZERO {
        Decimal::ZERO
    } else {
        -left
    }
}

/// Earliest due date among the deliverables, skipping those without one.
#[must_use]
pub fn next_due_date(deliverables: &[Deliverable]) -> Option<NaiveDate> {
    deliverables.iter().filter_map(|d| d.due_date).min()
}

/// Latest due date among the deliverables, skipping those without one.
#[must_use]
pub fn final_due_date(deliverables: &[Deliverable]) -> Option<NaiveDate> {
    deliverables.iter().filter_map(|d| d.due_date).max()
}
