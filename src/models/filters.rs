use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::Deserialize;
use utoipa::IntoParams;

/// Raw query-string shape for optional date filtering on entry listings
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DateRangeQuery {
    /// Inclusive lower bound, `YYYY-MM-DD`
    pub start_date: Option<String>,
    /// Inclusive upper bound, `YYYY-MM-DD`
    pub end_date: Option<String>,
}

/// Date filter errors
#[derive(Debug, thiserror::Error)]
pub enum DateRangeError {
    #[error("Invalid date '{0}': expected YYYY-MM-DD")]
    InvalidDate(String),
}

/// Parsed inclusive date bounds at day granularity. A missing bound leaves
/// that side of the range open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateRange {
    /// First instant covered by the range: start of the start day, UTC
    pub fn start_bound(&self) -> Option<DateTime<Utc>> {
        self.start.map(|date| date.and_time(NaiveTime::MIN).and_utc())
    }

    /// First instant past the range: start of the day after the end day.
    /// `date < end_bound_exclusive()` selects the same set as
    /// `date <= end-of-day`, without fractional-second edge cases.
    pub fn end_bound_exclusive(&self) -> Option<DateTime<Utc>> {
        self.end
            .and_then(|date| date.succ_opt())
            .map(|date| date.and_time(NaiveTime::MIN).and_utc())
    }

    /// Whether an instant falls within the (inclusive) bounds
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start_bound().map_or(true, |start| instant >= start)
            && self
                .end_bound_exclusive()
                .map_or(true, |end| instant < end)
    }
}

impl TryFrom<&DateRangeQuery> for DateRange {
    type Error = DateRangeError;

    fn try_from(query: &DateRangeQuery) -> Result<Self, Self::Error> {
        Ok(Self {
            start: parse_bound(query.start_date.as_deref())?,
            end: parse_bound(query.end_date.as_deref())?,
        })
    }
}

fn parse_bound(value: Option<&str>) -> Result<Option<NaiveDate>, DateRangeError> {
    value
        .map(|raw| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .map_err(|_| DateRangeError::InvalidDate(raw.to_string()))
        })
        .transpose()
}
