use serde::{Deserialize, Serialize};

use crate::amortization::MAX_TERM_MONTHS;
use crate::error::LoanError;

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Loan {
    pub id: i64,
    pub amount: f64,
    pub annual_interest_rate: f64,
    pub loan_terms_months: i64,
    pub owner_id: i64,
    #[serde(skip)]
    pub schedule: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateLoan {
    #[serde(default = "default_amount")]
    pub amount: f64,
    pub annual_interest_rate: f64,
    pub loan_terms_months: i64,
}

fn default_amount() -> f64 {
    1.0
}

/// Loan parameters that passed validation. The rate is a decimal
/// fraction per year: 0.05 means five percent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoanTerms {
    amount: f64,
    annual_interest_rate: f64,
    loan_terms_months: i64,
}

impl LoanTerms {
    pub fn new(
        amount: f64,
        annual_interest_rate: f64,
        loan_terms_months: i64,
    ) -> Result<Self, LoanError> {
        if !amount.is_finite() || amount < 1.0 {
            return Err(LoanError::Validation("amount must be at least 1".to_string()));
        }
        if !annual_interest_rate.is_finite() || !(0.0..=1.0).contains(&annual_interest_rate) {
            return Err(LoanError::Validation(
                "annual_interest_rate must be a decimal between 0 and 1, e.g. 0.05 for 5%"
                    .to_string(),
            ));
        }
        if loan_terms_months <= 1 {
            return Err(LoanError::Validation(
                "loan_terms_months must be greater than 1".to_string(),
            ));
        }
        if loan_terms_months > MAX_TERM_MONTHS {
            return Err(LoanError::Validation(format!(
                "loan_terms_months must not exceed {}",
                MAX_TERM_MONTHS
            )));
        }
        Ok(Self {
            amount,
            annual_interest_rate,
            loan_terms_months,
        })
    }

    pub fn amount(&self) -> f64 {
        self.amount
    }

    pub fn annual_interest_rate(&self) -> f64 {
        self.annual_interest_rate
    }

    pub fn loan_terms_months(&self) -> i64 {
        self.loan_terms_months
    }
}

impl TryFrom<CreateLoan> for LoanTerms {
    type Error = LoanError;

    fn try_from(payload: CreateLoan) -> Result<Self, Self::Error> {
        LoanTerms::new(
            payload.amount,
            payload.annual_interest_rate,
            payload.loan_terms_months,
        )
    }
}
