use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::amortization::{self, MonthSummary, MAX_TERM_MONTHS};
use crate::error::LoanError;

/// Month-indexed repayment plan, keyed 1..=term.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Schedule(BTreeMap<i64, MonthSummary>);

impl Schedule {
    /// Computes every month of a loan's term.
    pub fn build(principal: f64, annual_rate: f64, term_months: i64) -> Result<Self, LoanError> {
        if !(1..=MAX_TERM_MONTHS).contains(&term_months) {
            return Err(LoanError::Computation(format!(
                "cannot build a schedule for a term of {} months",
                term_months
            )));
        }

        let months = (1..=term_months)
            .map(|month| {
                amortization::month_summary(principal, annual_rate, term_months, month)
                    .map(|summary| (month, summary))
            })
            .collect::<Result<BTreeMap<_, _>, _>>()?;

        Ok(Schedule(months))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Looks up a single month. Anything outside 1..=len is out of range.
    pub fn month(&self, month: i64) -> Result<&MonthSummary, LoanError> {
        self.0.get(&month).ok_or(LoanError::OutOfRange {
            month,
            term: self.0.len() as i64,
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = (&i64, &MonthSummary)> {
        self.0.iter()
    }

    /// Serialized form stored in the `loans.schedule` column.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Parses a cached column value. A cache that does not parse or whose
    /// length disagrees with the loan term is treated as stale.
    pub fn from_cache(raw: Option<&str>, term_months: i64) -> Option<Self> {
        let schedule: Schedule = match serde_json::from_str(raw?) {
            Ok(schedule) => schedule,
            Err(e) => {
                tracing::warn!(term_months, "Discarding unreadable cached schedule: {}", e);
                return None;
            }
        };
        if schedule.len() as i64 != term_months {
            tracing::warn!(
                cached = schedule.len(),
                term_months,
                "Discarding cached schedule with wrong length"
            );
            return None;
        }
        Some(schedule)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schedule_covers_every_month() {
        let schedule = Schedule::build(12000.0, 0.06, 12).unwrap();
        assert_eq!(schedule.len(), 12);
        let keys: Vec<i64> = schedule.iter().map(|(k, _)| *k).collect();
        assert_eq!(keys, (1..=12).collect::<Vec<_>>());
    }

    #[test]
    fn test_payment_is_constant_across_months() {
        let schedule = Schedule::build(250000.0, 0.045, 360).unwrap();
        let first = schedule.month(1).unwrap().monthly_payment;
        assert!(schedule.iter().all(|(_, s)| s.monthly_payment == first));
    }

    #[test]
    fn test_remaining_balance_never_increases() {
        let schedule = Schedule::build(5000.0, 0.19, 24).unwrap();
        let balances: Vec<f64> = schedule.iter().map(|(_, s)| s.remaining_balance).collect();
        assert!(balances.windows(2).all(|w| w[1] <= w[0]));
    }

    #[test]
    fn test_zero_term_fails() {
        assert!(matches!(
            Schedule::build(1000.0, 0.05, 0),
            Err(LoanError::Computation(_))
        ));
    }

    #[test]
    fn test_oversized_term_fails_without_building() {
        assert!(matches!(
            Schedule::build(1000.0, 0.05, MAX_TERM_MONTHS + 1),
            Err(LoanError::Computation(_))
        ));
        assert!(matches!(
            Schedule::build(1000.0, 0.05, 1 << 31),
            Err(LoanError::Computation(_))
        ));
        assert_eq!(
            Schedule::build(1000.0, 0.05, MAX_TERM_MONTHS).unwrap().len() as i64,
            MAX_TERM_MONTHS
        );
    }

    #[test]
    fn test_month_lookup_bounds() {
        let schedule = Schedule::build(12000.0, 0.06, 12).unwrap();
        assert!(schedule.month(1).is_ok());
        assert!(schedule.month(12).is_ok());
        assert!(matches!(
            schedule.month(0),
            Err(LoanError::OutOfRange { month: 0, term: 12 })
        ));
        assert!(matches!(
            schedule.month(13),
            Err(LoanError::OutOfRange { month: 13, term: 12 })
        ));
        assert!(matches!(
            schedule.month(-1),
            Err(LoanError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_cache_round_trip_and_staleness() {
        let schedule = Schedule::build(12000.0, 0.06, 12).unwrap();
        let raw = schedule.to_json().unwrap();
        assert!(raw.starts_with("{\"1\":"));
        assert_eq!(Schedule::from_cache(Some(&raw), 12), Some(schedule));
        assert_eq!(Schedule::from_cache(Some(&raw), 24), None);
        assert_eq!(Schedule::from_cache(Some("not json"), 12), None);
        assert_eq!(Schedule::from_cache(None, 12), None);
    }
}
