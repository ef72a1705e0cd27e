//! Schedule export rows, rounded to whole currency units.
//!
//! Rounding happens here and nowhere else; the schedule itself keeps full
//! precision.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::amortization::PaymentScheduleEntry;
use crate::types::Money;

pub const EXPORT_HEADERS: [&str; 5] = ["Month", "Payment", "Principal", "Interest", "Balance"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleExportRow {
    #[serde(rename = "Month")]
    pub month: u32,
    #[serde(rename = "Payment")]
    pub payment: Money,
    #[serde(rename = "Principal")]
    pub principal: Money,
    #[serde(rename = "Interest")]
    pub interest: Money,
    #[serde(rename = "Balance")]
    pub balance: Money,
}

pub fn export_rows(schedule: &[PaymentScheduleEntry]) -> Vec<ScheduleExportRow> {
    schedule
        .iter()
        .map(|e| ScheduleExportRow {
            month: e.month,
            payment: round_unit(e.monthly_payment),
            principal: round_unit(e.principal_payment),
            interest: round_unit(e.interest_payment),
            balance: round_unit(e.remaining_balance),
        })
        .collect()
}

fn round_unit(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}
