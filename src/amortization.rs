use serde::{Deserialize, Serialize};

use crate::error::LoanError;

/// One month of a fixed-rate repayment plan.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MonthSummary {
    pub current_principal: f64,
    pub principal_paid: f64,
    pub interest_paid: f64,
    pub remaining_balance: f64,
    pub monthly_payment: f64,
}

/// Longest term a loan may have: one hundred years.
pub const MAX_TERM_MONTHS: i64 = 1200;

/// Rounds to cents.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Validates the loan parameters and returns the term as a period count.
fn check_params(principal: f64, annual_rate: f64, term_months: i64) -> Result<i32, LoanError> {
    if term_months <= 0 {
        return Err(LoanError::Computation(format!(
            "loan term must be at least one month, got {}",
            term_months
        )));
    }
    let periods = i32::try_from(term_months).map_err(|_| {
        LoanError::Computation(format!("loan term of {} months is too long", term_months))
    })?;
    if !principal.is_finite() || principal <= 0.0 {
        return Err(LoanError::Computation(format!(
            "principal must be positive, got {}",
            principal
        )));
    }
    if !annual_rate.is_finite() || annual_rate < 0.0 {
        return Err(LoanError::Computation(format!(
            "annual interest rate must be non-negative, got {}",
            annual_rate
        )));
    }
    Ok(periods)
}

/// Unrounded annuity payment. `i = r / 12` over `periods` months.
fn raw_payment(principal: f64, annual_rate: f64, periods: i32) -> f64 {
    let i = annual_rate / 12.0;
    if i == 0.0 {
        return principal / f64::from(periods);
    }
    principal * i / (1.0 - (1.0 + i).powi(-periods))
}

/// Outstanding balance after `k` payments of `payment`.
fn raw_balance_after(principal: f64, annual_rate: f64, payment: f64, k: i32) -> f64 {
    let i = annual_rate / 12.0;
    if i == 0.0 {
        return principal - payment * f64::from(k);
    }
    let growth = (1.0 + i).powi(k);
    principal * growth - payment * (growth - 1.0) / i
}

/// Fixed monthly payment for a loan, rounded to cents.
pub fn monthly_payment(
    principal: f64,
    annual_rate: f64,
    term_months: i64,
) -> Result<f64, LoanError> {
    let periods = check_params(principal, annual_rate, term_months)?;
    Ok(round2(raw_payment(principal, annual_rate, periods)))
}

/// Payment breakdown for `month` (1-based).
///
/// `remaining_balance` is the original principal minus this month's
/// principal portion only. It is not the cumulative outstanding balance;
/// `current_principal` of the following month carries that figure.
pub fn month_summary(
    principal: f64,
    annual_rate: f64,
    term_months: i64,
    month: i64,
) -> Result<MonthSummary, LoanError> {
    let periods = check_params(principal, annual_rate, term_months)?;
    let month = match i32::try_from(month) {
        Ok(m) if (1..=periods).contains(&m) => m,
        _ => {
            return Err(LoanError::Computation(format!(
                "month {} is outside the loan term of {} months",
                month, term_months
            )))
        }
    };

    let payment = raw_payment(principal, annual_rate, periods);
    let opening = raw_balance_after(principal, annual_rate, payment, month - 1);
    let interest = opening * annual_rate / 12.0;
    let principal_paid = payment - interest;

    Ok(MonthSummary {
        current_principal: round2(opening),
        principal_paid: round2(principal_paid),
        interest_paid: round2(interest),
        remaining_balance: round2(principal - principal_paid),
        monthly_payment: round2(payment),
    })
}
