use uuid::Uuid;

use crate::cursor::ActivitySearchCursor;
use crate::error::SearchError;
use crate::limits::SearchLimits;
use crate::window::{minute_in_day, MINUTES_PER_DAY};

/// One request's worth of search filters, validated before any SQL exists.
///
/// Every field is optional; an absent field contributes no predicate. The
/// time bounds describe the *requested* window and must not wrap; only a
/// schedule entry's own window may wrap past midnight. Constructed fresh
/// per request, never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ActivitySearchFilters {
    /// Requested UTC window, half-open `[start, end)` minutes-of-day.
    pub start_minutes_utc: Option<i16>,
    pub end_minutes_utc: Option<i16>,
    /// 0 = Sunday .. 6 = Saturday, in UTC.
    pub day_of_week_utc: Option<i16>,
    pub age_min: Option<i16>,
    pub age_max: Option<i16>,
    /// Free-text term matched against activity title and summary.
    pub search_term: Option<String>,
    pub organization_id: Option<Uuid>,
    pub city: Option<String>,
    /// Requested page size; `None` resolves to the configured default.
    pub limit: Option<u64>,
    /// Decoded resume position, if the caller supplied a cursor token.
    pub cursor: Option<ActivitySearchCursor>,
}

impl ActivitySearchFilters {
    /// Structural validation, run before query construction.
    ///
    /// Failures are explicit: an out-of-range limit is an error, never a
    /// silent clamp, so callers get feedback instead of surprising pages.
    pub fn validate(&self, limits: &SearchLimits) -> Result<(), SearchError> {
        for minute in [self.start_minutes_utc, self.end_minutes_utc]
            .into_iter()
            .flatten()
        {
            if !minute_in_day(minute) {
                return Err(SearchError::invalid_range(format!(
                    "minute-of-day {minute} is outside 0..{MINUTES_PER_DAY}"
                )));
            }
        }
        if let (Some(start), Some(end)) = (self.start_minutes_utc, self.end_minutes_utc) {
            if start >= end {
                return Err(SearchError::invalid_range(format!(
                    "requested window start {start} is not before end {end}"
                )));
            }
        }
        if let Some(day) = self.day_of_week_utc {
            if !(0..=6).contains(&day) {
                return Err(SearchError::invalid_range(format!(
                    "day-of-week {day} is outside 0..=6"
                )));
            }
        }
        for age in [self.age_min, self.age_max].into_iter().flatten() {
            if age < 0 {
                return Err(SearchError::invalid_range(format!("age {age} is negative")));
            }
        }
        if let (Some(min), Some(max)) = (self.age_min, self.age_max) {
            if min > max {
                return Err(SearchError::invalid_range(format!(
                    "age range minimum {min} exceeds maximum {max}"
                )));
            }
        }
        if let Some(limit) = self.limit {
            if limit == 0 || limit > limits.max_page_size {
                return Err(SearchError::InvalidLimit {
                    requested: limit,
                    max: limits.max_page_size,
                });
            }
        }
        Ok(())
    }

    /// The page size this request resolves to.
    pub fn effective_limit(&self, limits: &SearchLimits) -> u64 {
        self.limit.unwrap_or(limits.default_page_size)
    }
}
