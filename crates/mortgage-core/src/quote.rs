use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::amortization::{
    build_amortization, LoanParameters, PaymentScheduleEntry, YearlySummary, MAX_PRINCIPAL,
};
use crate::error::MortgageError;
use crate::types::*;
use crate::MortgageResult;

/// How the borrower's own contribution is expressed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DownPayment {
    /// Absolute amount
    Amount(Money),
    /// Percentage of the property price (20 = 20%)
    PercentOfPrice(Percent),
}

/// Calculator inputs as entered on a property page
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MortgageQuoteInput {
    pub price: Money,
    pub down_payment: DownPayment,
    pub loan_term_years: u32,
    /// Rate of the selected program, as a percentage
    pub annual_rate_percent: Percent,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_payment_date: Option<NaiveDate>,
    /// Attach the full monthly schedule to the output
    #[serde(default)]
    pub include_schedule: bool,
}

/// Month-1 split of the headline payment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentBreakdown {
    pub principal: Money,
    pub interest: Money,
    pub principal_share: Rate,
    pub interest_share: Rate,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MortgageQuote {
    pub price: Money,
    pub down_payment: Money,
    pub down_payment_percent: Percent,
    pub principal: Money,
    pub annual_rate_percent: Percent,
    pub loan_term_years: u32,
    pub monthly_payment: Money,
    pub first_month: PaymentBreakdown,
    pub total_payment: Money,
    /// Interest paid over the life of the loan
    pub overpayment: Money,
    /// Overpayment as a fraction of the principal; absent when nothing is borrowed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overpayment_ratio: Option<Rate>,
    pub yearly: Vec<YearlySummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schedule: Option<Vec<PaymentScheduleEntry>>,
}

/// Turn price, down payment, term and program rate into a payment quote.
pub fn calculate_quote(input: &MortgageQuoteInput) -> MortgageResult<ComputationOutput<MortgageQuote>> {
    let start = Instant::now();

    let down_payment = resolve_down_payment(input)?;
    let principal = input.price - down_payment;

    let params = LoanParameters {
        principal,
        annual_rate_percent: input.annual_rate_percent,
        term_years: input.loan_term_years,
        first_payment_date: input.first_payment_date,
    };
    let amortization = build_amortization(&params)?;
    let mut warnings = amortization.warnings;
    let amort = amortization.result;

    if down_payment.is_zero() && principal > Decimal::ZERO {
        warnings.push("No down payment: the full price is financed".into());
    }

    let down_payment_percent = if input.price.is_zero() {
        Decimal::ZERO
    } else {
        down_payment / input.price * dec!(100)
    };

    let first_month = amort
        .schedule
        .first()
        .map(breakdown)
        .unwrap_or(PaymentBreakdown {
            principal: Decimal::ZERO,
            interest: Decimal::ZERO,
            principal_share: Decimal::ZERO,
            interest_share: Decimal::ZERO,
        });

    let overpayment = amort.totals.total_interest;
    let overpayment_ratio = if principal.is_zero() {
        None
    } else {
        Some(overpayment / principal)
    };

    let quote = MortgageQuote {
        price: input.price,
        down_payment,
        down_payment_percent,
        principal,
        annual_rate_percent: input.annual_rate_percent,
        loan_term_years: input.loan_term_years,
        monthly_payment: amort.monthly_payment,
        first_month,
        total_payment: amort.totals.total_payment,
        overpayment,
        overpayment_ratio,
        yearly: amort.yearly,
        schedule: input.include_schedule.then_some(amort.schedule),
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Mortgage quote (fixed-rate annuity)",
        &serde_json::json!({
            "price": input.price.to_string(),
            "down_payment": down_payment.to_string(),
            "annual_rate_percent": input.annual_rate_percent.to_string(),
            "loan_term_years": input.loan_term_years,
        }),
        warnings,
        elapsed,
        quote,
    ))
}

fn resolve_down_payment(input: &MortgageQuoteInput) -> MortgageResult<Money> {
    if input.price < Decimal::ZERO {
        return Err(MortgageError::invalid("price", "Property price must be >= 0"));
    }
    if input.price > MAX_PRINCIPAL {
        return Err(MortgageError::invalid(
            "price",
            format!("Property price must not exceed {MAX_PRINCIPAL}"),
        ));
    }

    let amount = match &input.down_payment {
        DownPayment::Amount(a) => *a,
        DownPayment::PercentOfPrice(pct) => {
            if *pct < Decimal::ZERO || *pct > dec!(100) {
                return Err(MortgageError::invalid(
                    "down_payment",
                    "Down payment percentage must be between 0 and 100",
                ));
            }
            input.price * *pct / dec!(100)
        }
    };

    if amount < Decimal::ZERO {
        return Err(MortgageError::invalid("down_payment", "Down payment must be >= 0"));
    }
    if amount > input.price {
        return Err(MortgageError::invalid(
            "down_payment",
            "Down payment cannot exceed the property price",
        ));
    }
    Ok(amount)
}

fn breakdown(entry: &PaymentScheduleEntry) -> PaymentBreakdown {
    let (principal_share, interest_share) = if entry.monthly_payment.is_zero() {
        (Decimal::ZERO, Decimal::ZERO)
    } else {
        (
            entry.principal_payment / entry.monthly_payment,
            entry.interest_payment / entry.monthly_payment,
        )
    };
    PaymentBreakdown {
        principal: entry.principal_payment,
        interest: entry.interest_payment,
        principal_share,
        interest_share,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input() -> MortgageQuoteInput {
        MortgageQuoteInput {
            price: dec!(62500),
            down_payment: DownPayment::PercentOfPrice(dec!(20)),
            loan_term_years: 30,
            annual_rate_percent: dec!(14),
            first_payment_date: None,
            include_schedule: false,
        }
    }

    #[test]
    fn test_percent_down_payment_resolves_principal() {
        let q = calculate_quote(&input()).unwrap().result;
        assert_eq!(q.down_payment, dec!(12500));
        assert_eq!(q.principal, dec!(50000));
        assert_eq!(q.down_payment_percent, dec!(20));
        assert!((q.monthly_payment - dec!(592.44)).abs() < dec!(0.01));
        assert!(q.schedule.is_none());
    }

    #[test]
    fn test_breakdown_shares_sum_to_one() {
        let q = calculate_quote(&input()).unwrap().result;
        let b = &q.first_month;
        assert!((b.principal_share + b.interest_share - Decimal::ONE).abs() < dec!(0.0000001));
        // 14% loan: month 1 is dominated by interest
        assert!(b.interest > b.principal);
    }

    #[test]
    fn test_down_payment_above_price_rejected() {
        let mut i = input();
        i.down_payment = DownPayment::Amount(dec!(70000));
        assert!(calculate_quote(&i).is_err());
        i.down_payment = DownPayment::PercentOfPrice(dec!(101));
        assert!(calculate_quote(&i).is_err());
    }

    #[test]
    fn test_price_above_cap_rejected() {
        let mut i = input();
        i.price = Decimal::MAX / dec!(2);
        i.down_payment = DownPayment::PercentOfPrice(dec!(50));
        let err = calculate_quote(&i).unwrap_err();
        assert!(matches!(err, MortgageError::InvalidParameter { ref field, .. } if field == "price"));

        i.price = MAX_PRINCIPAL;
        assert!(calculate_quote(&i).is_ok());
    }

    #[test]
    fn test_negative_down_payment_percent_rejected() {
        let mut i = input();
        i.down_payment = DownPayment::PercentOfPrice(Decimal::MIN);
        assert!(calculate_quote(&i).is_err());
    }

    #[test]
    fn test_full_cash_purchase_has_no_ratio() {
        let mut i = input();
        i.down_payment = DownPayment::PercentOfPrice(dec!(100));
        let q = calculate_quote(&i).unwrap().result;
        assert_eq!(q.principal, Decimal::ZERO);
        assert_eq!(q.monthly_payment, Decimal::ZERO);
        assert!(q.overpayment_ratio.is_none());
    }

    #[test]
    fn test_zero_down_payment_warns() {
        let mut i = input();
        i.down_payment = DownPayment::Amount(Decimal::ZERO);
        let out = calculate_quote(&i).unwrap();
        assert!(out.warnings.iter().any(|w| w.contains("No down payment")));
    }

    #[test]
    fn test_include_schedule() {
        let mut i = input();
        i.include_schedule = true;
        let q = calculate_quote(&i).unwrap().result;
        assert_eq!(q.schedule.map(|s| s.len()), Some(360));
    }

    #[test]
    fn test_deserialize_amount_down_payment() {
        let json = r#"{
            "price": "100000",
            "down_payment": {"amount": "25000"},
            "loan_term_years": 20,
            "annual_rate_percent": "6"
        }"#;
        let i: MortgageQuoteInput = serde_json::from_str(json).unwrap();
        assert_eq!(i.down_payment, DownPayment::Amount(dec!(25000)));
        assert!(!i.include_schedule);
    }
}
