pub mod loans;
pub mod users;

use serde::Deserialize;

use crate::error::LoanError;

/// `?skip=&limit=` query accepted by the list endpoints.
#[derive(Debug, Deserialize)]
pub struct Pagination {
    #[serde(default)]
    pub skip: i64,
    #[serde(default = "default_limit")]
    pub limit: i64,
}

fn default_limit() -> i64 {
    100
}

impl Pagination {
    pub fn checked(&self) -> Result<(i64, i64), LoanError> {
        if self.skip < 0 || self.limit < 0 {
            return Err(LoanError::Validation("skip and limit must not be negative".to_string()));
        }
        Ok((self.skip, self.limit))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pagination_bounds() {
        let page = Pagination { skip: 0, limit: 100 };
        assert_eq!(page.checked().unwrap(), (0, 100));
        assert!(Pagination { skip: -1, limit: 10 }.checked().is_err());
        assert!(Pagination { skip: 0, limit: -10 }.checked().is_err());
    }
}
