use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;
use rust_decimal_macros::dec;

use crate::error::MortgageError;
use crate::types::{Money, Percent, Rate};
use crate::MortgageResult;

pub const MONTHS_PER_YEAR: u32 = 12;

/// Convert an annual percentage (14.0 = 14%) into a monthly decimal rate.
pub fn monthly_rate(annual_rate_percent: Percent) -> Rate {
    annual_rate_percent / dec!(100) / Decimal::from(MONTHS_PER_YEAR)
}

/// Level payment that fully amortises `principal` over `periods` at a
/// periodic `rate`.
///
/// `P * r * (1+r)^n / ((1+r)^n - 1)`, or `P / n` when the rate is zero.
pub fn annuity_payment(principal: Money, rate: Rate, periods: u32) -> MortgageResult<Money> {
    if periods == 0 {
        return Err(MortgageError::invalid(
            "periods",
            "Number of payment periods must be > 0",
        ));
    }
    if rate < Decimal::ZERO {
        return Err(MortgageError::invalid("rate", "Periodic rate must be >= 0"));
    }

    let n = Decimal::from(periods);
    if rate.is_zero() || principal.is_zero() {
        return Ok(principal / n);
    }

    // Past the decimal range (1+r)^n / ((1+r)^n - 1) is 1 to full precision,
    // so the payment is the interest-only amount.
    let Some(factor) = (Decimal::ONE + rate).checked_powu(u64::from(periods)) else {
        return Ok(principal * rate);
    };
    let denominator = factor - Decimal::ONE;

    // Rates below decimal resolution collapse the factor to 1.
    if denominator.is_zero() {
        return Ok(principal / n);
    }

    Ok(principal * (rate * factor / denominator))
}
