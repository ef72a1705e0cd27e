use mortgage_core::export::export_rows;
use mortgage_core::programs::RateProgramTable;
use mortgage_core::quote::{calculate_quote, DownPayment, MortgageQuoteInput};
use mortgage_core::MortgageError;
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn programs() -> RateProgramTable {
    RateProgramTable::from_yaml_str("base: \"14\"\nfamily: \"6\"\nit: \"5\"\n").unwrap()
}

fn quote_input(program: &str) -> MortgageQuoteInput {
    MortgageQuoteInput {
        price: dec!(80000),
        down_payment: DownPayment::Amount(dec!(30000)),
        loan_term_years: 30,
        annual_rate_percent: programs().rate_for(program).unwrap(),
        first_payment_date: None,
        include_schedule: true,
    }
}

#[test]
fn test_quote_headline_is_first_month_payment() {
    let out = calculate_quote(&quote_input("base")).unwrap();
    let q = &out.result;
    let schedule = q.schedule.as_ref().unwrap();
    assert_eq!(q.principal, dec!(50000));
    assert_eq!(q.monthly_payment, schedule[0].monthly_payment);
    assert_eq!(q.first_month.interest, schedule[0].interest_payment);
    assert!((q.monthly_payment - dec!(592.44)).abs() < dec!(0.01));
}

#[test]
fn test_cheaper_program_lowers_payment_and_overpayment() {
    let base = calculate_quote(&quote_input("base")).unwrap().result;
    let family = calculate_quote(&quote_input("family")).unwrap().result;
    assert!(family.monthly_payment < base.monthly_payment);
    assert!(family.overpayment < base.overpayment);
}

#[test]
fn test_overpayment_matches_schedule_interest() {
    let q = calculate_quote(&quote_input("it")).unwrap().result;
    let interest: Decimal = q
        .schedule
        .as_ref()
        .unwrap()
        .iter()
        .map(|e| e.interest_payment)
        .sum();
    assert!((q.overpayment - interest).abs() < dec!(0.000001));
    assert!((q.total_payment - q.overpayment - q.principal).abs() < dec!(0.000001));
}

#[test]
fn test_export_of_quoted_schedule() {
    let q = calculate_quote(&quote_input("base")).unwrap().result;
    let rows = export_rows(q.schedule.as_deref().unwrap());
    assert_eq!(rows.len(), 360);
    assert_eq!(rows[0].payment, dec!(592));
    assert_eq!(rows[0].interest, dec!(583));
    assert_eq!(rows[0].principal, dec!(9));
    assert_eq!(rows.last().unwrap().balance, Decimal::ZERO);
}

#[test]
fn test_quote_rejects_invalid_term() {
    let mut input = quote_input("base");
    input.loan_term_years = 0;
    let err = calculate_quote(&input).unwrap_err();
    assert!(matches!(err, MortgageError::InvalidParameter { ref field, .. } if field == "term_years"));
}

#[test]
fn test_quote_round_trips_through_json() {
    let out = calculate_quote(&quote_input("family")).unwrap();
    let json = serde_json::to_value(&out).unwrap();
    assert_eq!(json["result"]["loan_term_years"], 30);
    assert_eq!(json["result"]["yearly"].as_array().map(|a| a.len()), Some(30));
    assert_eq!(json["methodology"], "Mortgage quote (fixed-rate annuity)");
}
