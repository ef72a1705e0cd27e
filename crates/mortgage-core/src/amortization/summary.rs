use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::schedule::PaymentScheduleEntry;
use crate::annuity::MONTHS_PER_YEAR;
use crate::error::MortgageError;
use crate::types::*;
use crate::MortgageResult;

/// Rollup of one loan-year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearlySummary {
    pub year: u32,
    pub total_payment: Money,
    pub total_principal: Money,
    pub total_interest: Money,
    pub ending_balance: Money,
}

/// Whole-loan totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanTotals {
    pub total_payment: Money,
    pub total_principal: Money,
    /// Overpayment: everything paid beyond the amount borrowed
    pub total_interest: Money,
}

/// Group a monthly schedule into consecutive 12-month loan-years.
pub fn summarize_by_year(
    schedule: &[PaymentScheduleEntry],
    term_years: u32,
) -> MortgageResult<Vec<YearlySummary>> {
    let expected = term_years as usize * MONTHS_PER_YEAR as usize;
    if schedule.len() != expected {
        return Err(MortgageError::invalid(
            "schedule",
            format!(
                "Expected {expected} monthly entries for a {term_years}-year term, got {}",
                schedule.len()
            ),
        ));
    }

    schedule
        .chunks(MONTHS_PER_YEAR as usize)
        .zip(1u32..)
        .map(|(months, year)| {
            Ok(YearlySummary {
                year,
                total_payment: checked_sum(months.iter().map(|e| e.monthly_payment))?,
                total_principal: checked_sum(months.iter().map(|e| e.principal_payment))?,
                total_interest: checked_sum(months.iter().map(|e| e.interest_payment))?,
                ending_balance: months
                    .last()
                    .map(|e| e.remaining_balance)
                    .unwrap_or(Decimal::ZERO),
            })
        })
        .collect()
}

/// Total paid over the life of the loan and the interest share of it.
pub fn aggregate_totals(schedule: &[PaymentScheduleEntry]) -> MortgageResult<LoanTotals> {
    let total_payment = checked_sum(schedule.iter().map(|e| e.monthly_payment))?;
    let total_principal = checked_sum(schedule.iter().map(|e| e.principal_payment))?;

    let total_interest = total_payment
        .checked_sub(total_principal)
        .ok_or_else(|| MortgageError::invalid("schedule", "Schedule amounts overflow the decimal range"))?;

    Ok(LoanTotals {
        total_payment,
        total_principal,
        total_interest,
    })
}

/// Schedules built by `compute_schedule` stay far inside the decimal range;
/// hand-assembled ones (e.g. from JSON) may not.
fn checked_sum(mut values: impl Iterator<Item = Money>) -> MortgageResult<Money> {
    values.try_fold(Decimal::ZERO, |acc, v| {
        acc.checked_add(v).ok_or_else(|| {
            MortgageError::invalid("schedule", "Schedule amounts overflow the decimal range")
        })
    })
}
