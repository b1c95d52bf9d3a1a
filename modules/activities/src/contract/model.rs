use chrono::{DateTime, Utc};
use uuid::Uuid;

use search_core::TimeWindow;

/// Raw per-request search input, as handed over by the request-parsing
/// layer after type coercion. The cursor stays an opaque token here; it is
/// only decoded inside the cursor codec.
#[derive(Debug, Clone, Default)]
pub struct SearchRequest {
    pub start_minutes_utc: Option<i16>,
    pub end_minutes_utc: Option<i16>,
    pub day_of_week_utc: Option<i16>,
    pub age_min: Option<i16>,
    pub age_max: Option<i16>,
    pub search_term: Option<String>,
    pub organization_id: Option<Uuid>,
    pub city: Option<String>,
    pub limit: Option<u64>,
    pub cursor: Option<String>,
}

/// Which slot of the calendar a schedule entry occupies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScheduleKind {
    Weekly { day_of_week_utc: i16 },
    Monthly { day_of_month: i16 },
    DateSpecific {
        start_at_utc: DateTime<Utc>,
        end_at_utc: DateTime<Utc>,
    },
}

/// How attendance is charged for an activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PricingKind {
    Free,
    PerSession,
    Subscription,
}

/// Data for creating a new schedule entry (authoring side).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewScheduleEntry {
    pub activity_id: Uuid,
    pub schedule: ScheduleKind,
    /// UTC time-of-day window; `start > end` means it wraps past midnight.
    pub start_minutes_utc: Option<i16>,
    pub end_minutes_utc: Option<i16>,
    pub languages: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityRef {
    pub id: Uuid,
    pub title: String,
    pub summary: Option<String>,
    pub age_min: Option<i16>,
    pub age_max: Option<i16>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrganizationRef {
    pub id: Uuid,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationRef {
    pub name: String,
    pub city: String,
    pub address: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PricingInfo {
    pub kind: PricingKind,
    pub amount_cents: Option<i64>,
    pub currency: Option<String>,
}

/// One search result row: a schedule entry joined with everything needed
/// to render it.
#[derive(Debug, Clone, PartialEq)]
pub struct ActivityOccurrence {
    pub schedule_id: Uuid,
    pub schedule: ScheduleKind,
    /// Present when the entry has a bounded time-of-day window.
    pub window: Option<TimeWindow>,
    pub languages: Vec<String>,
    pub activity: ActivityRef,
    pub organization: OrganizationRef,
    pub location: LocationRef,
    pub pricing: Option<PricingInfo>,
}
