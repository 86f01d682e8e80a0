use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::ValidateEmail;

use crate::error::LoanError;
use crate::models::loan::Loan;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub creation_date: NaiveDate,
    pub birth_date: NaiveDate,
    pub hashed_password: String,
    pub is_active: bool,
}

/// Registration payload as it arrives over the wire.
#[derive(Debug, Deserialize)]
pub struct CreateUser {
    pub email: String,
    #[serde(default = "default_first_name")]
    pub first_name: String,
    #[serde(default = "default_last_name")]
    pub last_name: String,
    pub creation_date: NaiveDate,
    pub birth_date: NaiveDate,
    pub password: String,
}

fn default_first_name() -> String {
    "John".to_string()
}

fn default_last_name() -> String {
    "Smith".to_string()
}

/// User as returned by the API, with the loans it owns.
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: i64,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub creation_date: NaiveDate,
    pub birth_date: NaiveDate,
    pub is_active: bool,
    pub loans: Vec<Loan>,
}

impl UserResponse {
    pub fn new(user: User, loans: Vec<Loan>) -> Self {
        Self {
            id: user.id,
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
            creation_date: user.creation_date,
            birth_date: user.birth_date,
            is_active: user.is_active,
            loans,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Email(String);

impl Email {
    pub fn parse(raw: &str) -> Result<Self, LoanError> {
        let email = raw.trim().to_string();
        if !email.validate_email() {
            return Err(LoanError::Validation(format!(
                "'{}' is not a valid email address",
                raw
            )));
        }
        Ok(Email(email))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// First or last name: two or more ASCII letters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonName(String);

impl PersonName {
    pub fn parse(field: &str, raw: &str) -> Result<Self, LoanError> {
        if raw.len() < 2 || !raw.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(LoanError::Validation(format!(
                "{} must contain at least two letters and nothing else",
                field
            )));
        }
        Ok(PersonName(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Clone, PartialEq, Eq)]
pub struct Password(String);

impl Password {
    pub fn parse(raw: &str) -> Result<Self, LoanError> {
        let allowed = |c: char| c.is_ascii_alphanumeric() || c == '-' || c == '_';
        if raw.len() < 8 || !raw.chars().all(allowed) {
            return Err(LoanError::Validation(
                "Password must be a length of 8 characters or more, \
                 containing letters, numbers, dashes and underscores."
                    .to_string(),
            ));
        }
        Ok(Password(raw.to_string()))
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl std::fmt::Debug for Password {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Password(***)")
    }
}

/// A registration that passed validation.
#[derive(Debug)]
pub struct NewUser {
    pub email: Email,
    pub first_name: PersonName,
    pub last_name: PersonName,
    pub creation_date: NaiveDate,
    pub birth_date: NaiveDate,
    pub password: Password,
}

impl TryFrom<CreateUser> for NewUser {
    type Error = LoanError;

    fn try_from(payload: CreateUser) -> Result<Self, Self::Error> {
        Ok(NewUser {
            email: Email::parse(&payload.email)?,
            first_name: PersonName::parse("first_name", &payload.first_name)?,
            last_name: PersonName::parse("last_name", &payload.last_name)?,
            creation_date: payload.creation_date,
            birth_date: payload.birth_date,
            password: Password::parse(&payload.password)?,
        })
    }
}
