use chrono::NaiveDate;
use clap::{Args, ValueEnum};
use log::info;
use rust_decimal::Decimal;
use serde_json::Value;

use mortgage_core::export;
use mortgage_core::programs::RateProgramTable;
use mortgage_core::quote::{self, DownPayment, MortgageQuote, MortgageQuoteInput};

use crate::input;

/// Loan inputs shared by quote, schedule and export
#[derive(Args)]
pub struct LoanArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Property price
    #[arg(long)]
    pub price: Option<Decimal>,

    /// Down payment as an amount
    #[arg(long, conflicts_with = "down_payment_percent")]
    pub down_payment: Option<Decimal>,

    /// Down payment as a percentage of the price (20 = 20%)
    #[arg(long)]
    pub down_payment_percent: Option<Decimal>,

    /// Loan term in years
    #[arg(long, default_value_t = 30)]
    pub term_years: u32,

    /// Annual interest rate in percent (14 = 14%)
    #[arg(long, conflicts_with = "program")]
    pub rate: Option<Decimal>,

    /// Rate program name from the program table
    #[arg(long)]
    pub program: Option<String>,

    /// Date of the first instalment (YYYY-MM-DD)
    #[arg(long)]
    pub first_payment_date: Option<NaiveDate>,
}

/// Arguments for a payment quote
#[derive(Args)]
pub struct QuoteArgs {
    #[command(flatten)]
    pub loan: LoanArgs,

    /// Include the full monthly schedule in the output
    #[arg(long)]
    pub include_schedule: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ScheduleView {
    Monthly,
    Yearly,
}

/// Arguments for printing a schedule
#[derive(Args)]
pub struct ScheduleArgs {
    #[command(flatten)]
    pub loan: LoanArgs,

    /// Monthly rows or yearly rollups
    #[arg(long, value_enum, default_value = "monthly")]
    pub view: ScheduleView,
}

/// Arguments for CSV export
#[derive(Args)]
pub struct ExportArgs {
    #[command(flatten)]
    pub loan: LoanArgs,

    /// Destination CSV file
    #[arg(long)]
    pub out: String,
}

pub fn run_quote(args: QuoteArgs, table: &RateProgramTable) -> Result<Value, Box<dyn std::error::Error>> {
    let mut quote_input = resolve_quote_input(&args.loan, table)?;
    quote_input.include_schedule = quote_input.include_schedule || args.include_schedule;
    let result = quote::calculate_quote(&quote_input)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_schedule(args: ScheduleArgs, table: &RateProgramTable) -> Result<Value, Box<dyn std::error::Error>> {
    let q = scheduled_quote(&args.loan, table)?;
    let value = match args.view {
        ScheduleView::Monthly => serde_json::to_value(q.schedule.unwrap_or_default())?,
        ScheduleView::Yearly => serde_json::to_value(q.yearly)?,
    };
    Ok(value)
}

pub fn run_export(args: ExportArgs, table: &RateProgramTable) -> Result<Value, Box<dyn std::error::Error>> {
    let q = scheduled_quote(&args.loan, table)?;
    let rows = export::export_rows(q.schedule.as_deref().unwrap_or_default());

    let mut wtr = csv::Writer::from_path(&args.out)
        .map_err(|e| format!("Failed to create '{}': {}", args.out, e))?;
    for row in &rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    info!("exported {} schedule rows to {}", rows.len(), args.out);

    Ok(serde_json::json!({
        "path": args.out,
        "rows": rows.len(),
        "columns": export::EXPORT_HEADERS,
        "monthly_payment": q.monthly_payment.to_string(),
    }))
}

fn scheduled_quote(
    loan: &LoanArgs,
    table: &RateProgramTable,
) -> Result<MortgageQuote, Box<dyn std::error::Error>> {
    let mut quote_input = resolve_quote_input(loan, table)?;
    quote_input.include_schedule = true;
    Ok(quote::calculate_quote(&quote_input)?.result)
}

fn resolve_quote_input(
    loan: &LoanArgs,
    table: &RateProgramTable,
) -> Result<MortgageQuoteInput, Box<dyn std::error::Error>> {
    if let Some(ref path) = loan.input {
        input::file::read_json(path)
    } else if loan.price.is_none() {
        input::stdin::read_stdin()?
            .ok_or_else(|| "--price is required (or provide --input / stdin JSON)".into())
    } else {
        quote_input_from_flags(loan, table)
    }
}

fn quote_input_from_flags(
    loan: &LoanArgs,
    table: &RateProgramTable,
) -> Result<MortgageQuoteInput, Box<dyn std::error::Error>> {
    let price = loan
        .price
        .ok_or("--price is required (or provide --input)")?;

    let down_payment = match (loan.down_payment, loan.down_payment_percent) {
        (Some(amount), _) => DownPayment::Amount(amount),
        (None, Some(pct)) => DownPayment::PercentOfPrice(pct),
        (None, None) => DownPayment::Amount(Decimal::ZERO),
    };

    let annual_rate_percent = match (loan.rate, loan.program.as_deref()) {
        (Some(rate), _) => rate,
        (None, Some(name)) => table.rate_for(name)?,
        (None, None) => return Err("--rate or --program is required".into()),
    };

    Ok(MortgageQuoteInput {
        price,
        down_payment,
        loan_term_years: loan.term_years,
        annual_rate_percent,
        first_payment_date: loan.first_payment_date,
        include_schedule: false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn loan() -> LoanArgs {
        LoanArgs {
            input: None,
            price: Some(dec!(62500)),
            down_payment: None,
            down_payment_percent: Some(dec!(20)),
            term_years: 30,
            rate: None,
            program: Some("base".into()),
            first_payment_date: None,
        }
    }

    fn table() -> RateProgramTable {
        RateProgramTable::new().with_program("base", dec!(14)).unwrap()
    }

    #[test]
    fn test_program_resolves_rate() {
        let i = quote_input_from_flags(&loan(), &table()).unwrap();
        assert_eq!(i.annual_rate_percent, dec!(14));
        assert_eq!(i.down_payment, DownPayment::PercentOfPrice(dec!(20)));
    }

    #[test]
    fn test_explicit_rate_wins() {
        let mut l = loan();
        l.rate = Some(dec!(7.5));
        l.program = None;
        let i = quote_input_from_flags(&l, &table()).unwrap();
        assert_eq!(i.annual_rate_percent, dec!(7.5));
    }

    #[test]
    fn test_unknown_program_is_error() {
        let mut l = loan();
        l.program = Some("veteran".into());
        assert!(quote_input_from_flags(&l, &table()).is_err());
    }

    #[test]
    fn test_missing_rate_is_error() {
        let mut l = loan();
        l.program = None;
        assert!(quote_input_from_flags(&l, &table()).is_err());
    }

    #[test]
    fn test_export_writes_csv() {
        let dir = std::env::temp_dir().join(format!("mortgage-export-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let out = dir.join("schedule.csv");
        let mut l = loan();
        l.term_years = 1;
        let args = ExportArgs {
            loan: l,
            out: out.to_string_lossy().into_owned(),
        };
        let summary = run_export(args, &table()).unwrap();
        assert_eq!(summary["rows"], 12);

        let csv_text = std::fs::read_to_string(&out).unwrap();
        let mut lines = csv_text.lines();
        assert_eq!(lines.next(), Some("Month,Payment,Principal,Interest,Balance"));
        assert_eq!(lines.count(), 12);
        std::fs::remove_dir_all(&dir).unwrap();
    }
}
