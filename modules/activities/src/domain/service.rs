use std::sync::Arc;

use tracing::{debug, instrument};
use uuid::Uuid;

use search_core::window::validate_schedule_window;
use search_core::{
    ActivitySearchCursor, ActivitySearchFilters, Page, SearchError, SearchLimits,
};

use crate::config::ActivitiesConfig;
use crate::contract::error::ActivitiesError;
use crate::contract::model::{ActivityOccurrence, NewScheduleEntry, ScheduleKind, SearchRequest};
use crate::domain::repo::ActivitiesRepository;

/// Domain service for activity search and schedule authoring.
/// Depends only on the repository port, not on infra types.
#[derive(Clone)]
pub struct Service {
    repo: Arc<dyn ActivitiesRepository>,
    limits: SearchLimits,
}

impl Service {
    pub fn new(repo: Arc<dyn ActivitiesRepository>, config: &ActivitiesConfig) -> Self {
        Self {
            repo,
            limits: config.search,
        }
    }

    /// Search schedule entries with cursor-based pagination.
    ///
    /// The cursor token is decoded here and nowhere else; a malformed token
    /// is a request error, never a silent restart from the first page.
    #[instrument(name = "activities.service.search", skip(self, request))]
    pub async fn search(
        &self,
        request: SearchRequest,
    ) -> Result<Page<ActivityOccurrence>, ActivitiesError> {
        let cursor = ActivitySearchCursor::parse(request.cursor.as_deref())?;
        let filters = ActivitySearchFilters {
            start_minutes_utc: request.start_minutes_utc,
            end_minutes_utc: request.end_minutes_utc,
            day_of_week_utc: request.day_of_week_utc,
            age_min: request.age_min,
            age_max: request.age_max,
            search_term: request.search_term,
            organization_id: request.organization_id,
            city: request.city,
            limit: request.limit,
            cursor,
        };
        debug!(resuming = filters.cursor.is_some(), "searching activities");
        self.repo.search(&filters, &self.limits).await
    }

    /// Create a schedule entry after authoring-side validation.
    #[instrument(
        name = "activities.service.create_schedule_entry",
        skip(self, entry),
        fields(activity_id = %entry.activity_id)
    )]
    pub async fn create_schedule_entry(
        &self,
        entry: NewScheduleEntry,
    ) -> Result<Uuid, ActivitiesError> {
        validate_new_entry(&entry)?;
        let id = self.repo.insert_schedule_entry(entry).await?;
        debug!(schedule_id = %id, "created schedule entry");
        Ok(id)
    }
}

fn validate_new_entry(entry: &NewScheduleEntry) -> Result<(), ActivitiesError> {
    validate_schedule_window(entry.start_minutes_utc, entry.end_minutes_utc)?;
    match &entry.schedule {
        ScheduleKind::Weekly { day_of_week_utc } => {
            if !(0..=6).contains(day_of_week_utc) {
                return Err(SearchError::invalid_range(format!(
                    "day-of-week {day_of_week_utc} is outside 0..=6"
                ))
                .into());
            }
        }
        ScheduleKind::Monthly { day_of_month } => {
            if !(1..=31).contains(day_of_month) {
                return Err(SearchError::invalid_range(format!(
                    "day-of-month {day_of_month} is outside 1..=31"
                ))
                .into());
            }
        }
        ScheduleKind::DateSpecific {
            start_at_utc,
            end_at_utc,
        } => {
            if start_at_utc >= end_at_utc {
                return Err(SearchError::invalid_range(format!(
                    "entry starts at {start_at_utc} but ends at {end_at_utc}"
                ))
                .into());
            }
            if entry.start_minutes_utc.is_some() || entry.end_minutes_utc.is_some() {
                return Err(SearchError::invalid_range(
                    "date-specific entries carry absolute timestamps, not a recurring window",
                )
                .into());
            }
        }
    }
    Ok(())
}
