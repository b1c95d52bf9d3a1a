//! Time-of-day window helpers shared by search and schedule authoring.
//!
//! All minute values are UTC minutes-of-day in `[0, 1440)`. A schedule's
//! own window is *overnight-wrapped* when its start minute is numerically
//! greater than its end minute (e.g. 22:00–02:00); a requested filter
//! window never wraps.

use crate::error::SearchError;

pub const MINUTES_PER_DAY: i16 = 1440;

/// Whether `minute` is a valid minute-of-day.
pub fn minute_in_day(minute: i16) -> bool {
    (0..MINUTES_PER_DAY).contains(&minute)
}

/// Whether a schedule window given by its two bounds crosses midnight.
pub fn is_overnight_wrap(start_minutes_utc: i16, end_minutes_utc: i16) -> bool {
    start_minutes_utc > end_minutes_utc
}

/// Validate a schedule entry's own time-of-day window (authoring side).
///
/// Either bound may be absent. When both are present they must differ:
/// equality is ambiguous (zero-length or full-day) and is rejected, while
/// `start > end` is permitted and interpreted as an overnight wrap.
pub fn validate_schedule_window(
    start_minutes_utc: Option<i16>,
    end_minutes_utc: Option<i16>,
) -> Result<(), SearchError> {
    for minute in [start_minutes_utc, end_minutes_utc].into_iter().flatten() {
        if !minute_in_day(minute) {
            return Err(SearchError::invalid_range(format!(
                "minute-of-day {minute} is outside 0..{MINUTES_PER_DAY}"
            )));
        }
    }
    if let (Some(start), Some(end)) = (start_minutes_utc, end_minutes_utc) {
        if start == end {
            return Err(SearchError::invalid_range(format!(
                "schedule window start and end are both {start}; an overnight \
                 window must use start > end"
            )));
        }
    }
    Ok(())
}

/// A concrete (both bounds present) schedule time-of-day window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    pub start_minutes_utc: i16,
    pub end_minutes_utc: i16,
}

impl TimeWindow {
    pub fn new(start_minutes_utc: i16, end_minutes_utc: i16) -> Self {
        Self {
            start_minutes_utc,
            end_minutes_utc,
        }
    }

    pub fn wraps_midnight(&self) -> bool {
        is_overnight_wrap(self.start_minutes_utc, self.end_minutes_utc)
    }

    /// Overlap with a non-wrapping half-open request window `[start, end)`.
    ///
    /// A wrapped window covers `[start, 1440) ∪ [0, end)` and overlaps the
    /// request when either sub-interval does. This is the in-memory twin of
    /// the SQL predicate the query builder emits; the two must agree.
    pub fn overlaps(&self, req_start: i16, req_end: i16) -> bool {
        if self.wraps_midnight() {
            self.start_minutes_utc < req_end || self.end_minutes_utc > req_start
        } else {
            self.start_minutes_utc < req_end && self.end_minutes_utc > req_start
        }
    }
}
