pub mod schedule;
pub mod summary;

pub use schedule::{
    compute_schedule, LoanParameters, PaymentScheduleEntry, MAX_ANNUAL_RATE_PERCENT, MAX_PRINCIPAL,
    MAX_TERM_YEARS,
};
pub use summary::{aggregate_totals, summarize_by_year, LoanTotals, YearlySummary};

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::types::*;
use crate::MortgageResult;

/// Terms above this are unusual for a residential mortgage.
const CONVENTIONAL_TERM_YEARS: u32 = 30;

/// Full amortisation result: level payment, monthly and yearly views, totals.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AmortizationOutput {
    pub monthly_payment: Money,
    pub number_of_payments: u32,
    pub monthly_rate: Rate,
    pub totals: LoanTotals,
    pub yearly: Vec<YearlySummary>,
    pub schedule: Vec<PaymentScheduleEntry>,
}

/// Compute the schedule, yearly rollup and totals for one loan.
pub fn build_amortization(
    params: &LoanParameters,
) -> MortgageResult<ComputationOutput<AmortizationOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let schedule = compute_schedule(params)?;
    let yearly = summarize_by_year(&schedule, params.term_years)?;
    let totals = aggregate_totals(&schedule)?;

    if params.annual_rate_percent.is_zero() && params.principal > Decimal::ZERO {
        warnings.push("Zero interest rate: schedule is straight-line principal only".into());
    }
    if params.principal.is_zero() {
        warnings.push("Principal is zero: nothing to amortise".into());
    }
    if params.term_years > CONVENTIONAL_TERM_YEARS {
        warnings.push(format!(
            "Term of {} years exceeds the conventional {CONVENTIONAL_TERM_YEARS}-year maximum",
            params.term_years
        ));
    }
    if params.annual_rate_percent > dec!(50) {
        warnings.push(format!(
            "Annual rate of {}% looks unusually high; check it is a percentage, not a multiple",
            params.annual_rate_percent
        ));
    }

    let output = AmortizationOutput {
        monthly_payment: schedule
            .first()
            .map(|e| e.monthly_payment)
            .unwrap_or(Decimal::ZERO),
        number_of_payments: params.number_of_payments(),
        monthly_rate: params.monthly_rate(),
        totals,
        yearly,
        schedule,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Fixed-rate annuity amortisation",
        &serde_json::json!({
            "principal": params.principal.to_string(),
            "annual_rate_percent": params.annual_rate_percent.to_string(),
            "term_years": params.term_years,
            "first_payment_date": params.first_payment_date,
        }),
        warnings,
        elapsed,
        output,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_amortization_headline_payment() {
        let out = build_amortization(&LoanParameters::new(dec!(50000), dec!(14), 30)).unwrap();
        let r = &out.result;
        assert_eq!(r.number_of_payments, 360);
        assert!((r.monthly_payment - dec!(592.44)).abs() < dec!(0.01));
        assert_eq!(r.yearly.len(), 30);
        assert!(out.warnings.is_empty());
    }

    #[test]
    fn test_zero_rate_warns() {
        let out = build_amortization(&LoanParameters::new(dec!(1000), Decimal::ZERO, 1)).unwrap();
        assert_eq!(out.warnings.len(), 1);
    }

    #[test]
    fn test_long_term_warns() {
        let out = build_amortization(&LoanParameters::new(dec!(1000), dec!(4), 40)).unwrap();
        assert!(out.warnings.iter().any(|w| w.contains("40 years")));
    }

    #[test]
    fn test_metadata_populated() {
        let out = build_amortization(&LoanParameters::new(dec!(1000), dec!(4), 1)).unwrap();
        assert_eq!(out.metadata.precision, "rust_decimal_128bit");
        assert_eq!(out.assumptions["term_years"], 1);
    }
}
