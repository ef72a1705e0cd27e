use chrono::{Months, NaiveDate};
use log::debug;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::annuity::{annuity_payment, monthly_rate, MONTHS_PER_YEAR};
use crate::error::MortgageError;
use crate::types::*;
use crate::MortgageResult;

/// Longest term accepted, in years.
pub const MAX_TERM_YEARS: u32 = 50;

/// Largest amount accepted. Keeps every sum over the schedule inside the
/// decimal range.
pub const MAX_PRINCIPAL: Money = dec!(1000000000000000);

/// Highest annual rate accepted, in percent.
pub const MAX_ANNUAL_RATE_PERCENT: Percent = dec!(10000);

/// Inputs for one fixed-rate, fully amortising loan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanParameters {
    /// Amount borrowed (price minus down payment)
    pub principal: Money,
    /// Annual interest rate as a percentage (14.0 = 14%)
    pub annual_rate_percent: Percent,
    pub term_years: u32,
    /// Date of the first instalment; entries are dated monthly from here
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_payment_date: Option<NaiveDate>,
}

impl LoanParameters {
    pub fn new(principal: Money, annual_rate_percent: Percent, term_years: u32) -> Self {
        LoanParameters {
            principal,
            annual_rate_percent,
            term_years,
            first_payment_date: None,
        }
    }

    pub fn number_of_payments(&self) -> u32 {
        self.term_years * MONTHS_PER_YEAR
    }

    pub fn monthly_rate(&self) -> Rate {
        monthly_rate(self.annual_rate_percent)
    }

    pub fn validate(&self) -> MortgageResult<()> {
        if self.principal < Decimal::ZERO {
            return Err(MortgageError::invalid(
                "principal",
                "Principal must be >= 0",
            ));
        }
        if self.principal > MAX_PRINCIPAL {
            return Err(MortgageError::invalid(
                "principal",
                format!("Principal must not exceed {MAX_PRINCIPAL}"),
            ));
        }
        if self.annual_rate_percent < Decimal::ZERO {
            return Err(MortgageError::invalid(
                "annual_rate_percent",
                "Annual interest rate must be >= 0",
            ));
        }
        if self.annual_rate_percent > MAX_ANNUAL_RATE_PERCENT {
            return Err(MortgageError::invalid(
                "annual_rate_percent",
                format!("Annual interest rate must not exceed {MAX_ANNUAL_RATE_PERCENT}%"),
            ));
        }
        if self.term_years < 1 {
            return Err(MortgageError::invalid(
                "term_years",
                "Loan term must be at least 1 year",
            ));
        }
        if self.term_years > MAX_TERM_YEARS {
            return Err(MortgageError::invalid(
                "term_years",
                format!("Loan term must not exceed {MAX_TERM_YEARS} years"),
            ));
        }
        if let Some(first) = self.first_payment_date {
            if payment_date(Some(first), self.number_of_payments()).is_none() {
                return Err(MortgageError::invalid(
                    "first_payment_date",
                    "Final instalment date is out of the supported calendar range",
                ));
            }
        }
        Ok(())
    }
}

/// One monthly instalment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentScheduleEntry {
    pub month: u32,
    pub monthly_payment: Money,
    pub principal_payment: Money,
    /// Interest on the balance before this month's payment
    pub interest_payment: Money,
    /// Balance after this month's principal is applied
    pub remaining_balance: Money,
    /// Set for every entry when the loan has a `first_payment_date`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_date: Option<NaiveDate>,
}

/// Build the month-by-month schedule for a fixed-rate loan.
///
/// The payment is level for every month; the final month pays off whatever
/// balance remains so that cumulative principal equals the amount borrowed
/// and the closing balance is exactly zero.
pub fn compute_schedule(params: &LoanParameters) -> MortgageResult<Vec<PaymentScheduleEntry>> {
    params.validate()?;

    let rate = params.monthly_rate();
    let periods = params.number_of_payments();
    let payment = annuity_payment(params.principal, rate, periods)?;

    debug!(
        "schedule: principal={} monthly_rate={} periods={} payment={}",
        params.principal, rate, periods, payment
    );

    let schedule = (1..=periods)
        .scan(params.principal, |balance, month| {
            let opening = *balance;
            let interest_payment = opening * rate;

            let scheduled = (payment - interest_payment).max(Decimal::ZERO);

            // The final month (or any month that would overshoot) retires
            // the exact outstanding balance.
            let (principal_payment, monthly_payment) = if month == periods || scheduled >= opening {
                (opening, opening + interest_payment)
            } else {
                (scheduled, payment)
            };

            *balance = (opening - principal_payment).max(Decimal::ZERO);

            Some(PaymentScheduleEntry {
                month,
                monthly_payment,
                principal_payment,
                interest_payment,
                remaining_balance: *balance,
                payment_date: payment_date(params.first_payment_date, month),
            })
        })
        .collect();

    Ok(schedule)
}

/// `first` advanced by `month - 1` months, clamped to the end of shorter
/// months. `None` without a first date or past the calendar range.
fn payment_date(first: Option<NaiveDate>, month: u32) -> Option<NaiveDate> {
    first.and_then(|d| d.checked_add_months(Months::new(month - 1)))
}
