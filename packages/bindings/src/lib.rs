use napi::Result as NapiResult;
use napi_derive::napi;
use serde::Deserialize;

use mortgage_core::amortization::{self, LoanParameters, PaymentScheduleEntry};

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

#[derive(Deserialize)]
struct YearlyRequest {
    schedule: Vec<PaymentScheduleEntry>,
    term_years: u32,
}

// ---------------------------------------------------------------------------
// Calculator
// ---------------------------------------------------------------------------

#[napi]
pub fn calculate_quote(input_json: String) -> NapiResult<String> {
    let input: mortgage_core::quote::MortgageQuoteInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = mortgage_core::quote::calculate_quote(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn build_amortization(input_json: String) -> NapiResult<String> {
    let input: LoanParameters = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = amortization::build_amortization(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Schedule
// ---------------------------------------------------------------------------

#[napi]
pub fn compute_schedule(input_json: String) -> NapiResult<String> {
    let input: LoanParameters = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let schedule = amortization::compute_schedule(&input).map_err(to_napi_error)?;
    serde_json::to_string(&schedule).map_err(to_napi_error)
}

#[napi]
pub fn summarize_by_year(input_json: String) -> NapiResult<String> {
    let input: YearlyRequest = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let yearly =
        amortization::summarize_by_year(&input.schedule, input.term_years).map_err(to_napi_error)?;
    serde_json::to_string(&yearly).map_err(to_napi_error)
}

#[napi]
pub fn aggregate_totals(schedule_json: String) -> NapiResult<String> {
    let schedule: Vec<PaymentScheduleEntry> =
        serde_json::from_str(&schedule_json).map_err(to_napi_error)?;
    let totals = amortization::aggregate_totals(&schedule).map_err(to_napi_error)?;
    serde_json::to_string(&totals).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Export & programs
// ---------------------------------------------------------------------------

/// Rounded `Month, Payment, Principal, Interest, Balance` rows for CSV download.
#[napi]
pub fn export_schedule_rows(schedule_json: String) -> NapiResult<String> {
    let schedule: Vec<PaymentScheduleEntry> =
        serde_json::from_str(&schedule_json).map_err(to_napi_error)?;
    serde_json::to_string(&mortgage_core::export::export_rows(&schedule)).map_err(to_napi_error)
}

/// Resolve a program name against a caller-supplied `{ name: rate }` table.
#[napi]
pub fn program_rate(table_json: String, name: String) -> NapiResult<String> {
    let table = mortgage_core::programs::RateProgramTable::from_json_str(&table_json)
        .map_err(to_napi_error)?;
    let rate = table.rate_for(&name).map_err(to_napi_error)?;
    Ok(rate.to_string())
}
