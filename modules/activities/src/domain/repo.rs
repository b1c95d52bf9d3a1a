use async_trait::async_trait;
use uuid::Uuid;

use search_core::{ActivitySearchFilters, Page, SearchLimits};

use crate::contract::error::ActivitiesError;
use crate::contract::model::{ActivityOccurrence, NewScheduleEntry};

/// Storage port for the activities domain.
#[async_trait]
pub trait ActivitiesRepository: Send + Sync {
    /// Run one paginated search over schedule entries.
    ///
    /// Validates the filter set, executes exactly one query and returns the
    /// page together with an encoded `next_cursor` when more rows exist.
    async fn search(
        &self,
        filters: &ActivitySearchFilters,
        limits: &SearchLimits,
    ) -> Result<Page<ActivityOccurrence>, ActivitiesError>;

    /// Persist a new schedule entry; domain checks happen in the service.
    async fn insert_schedule_entry(&self, entry: NewScheduleEntry)
        -> Result<Uuid, ActivitiesError>;
}
