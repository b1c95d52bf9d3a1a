//! SeaORM-backed repository implementation for the domain port.
//!
//! Generic over `C: ConnectionTrait`, so it can be constructed with a
//! `DatabaseConnection` or a transactional connection.

use sea_orm::{ActiveModelTrait, ConnectionTrait, Set};
use serde_json::Value;
use uuid::Uuid;

use search_core::{ActivitySearchFilters, Page, SearchLimits};

use crate::contract::error::ActivitiesError;
use crate::contract::model::{ActivityOccurrence, NewScheduleEntry, ScheduleKind};
use crate::domain::repo::ActivitiesRepository;
use crate::infra::storage::entity::schedule_entry;
use crate::infra::storage::entity::schedule_entry::ScheduleType;
use crate::infra::storage::query::search_page;

pub struct SeaOrmActivitiesRepository<C>
where
    C: ConnectionTrait + Send + Sync,
{
    conn: C,
}

impl<C> SeaOrmActivitiesRepository<C>
where
    C: ConnectionTrait + Send + Sync,
{
    pub fn new(conn: C) -> Self {
        Self { conn }
    }
}

#[async_trait::async_trait]
impl<C> ActivitiesRepository for SeaOrmActivitiesRepository<C>
where
    C: ConnectionTrait + Send + Sync + 'static,
{
    async fn search(
        &self,
        filters: &ActivitySearchFilters,
        limits: &SearchLimits,
    ) -> Result<Page<ActivityOccurrence>, ActivitiesError> {
        search_page(&self.conn, filters, limits).await
    }

    async fn insert_schedule_entry(
        &self,
        entry: NewScheduleEntry,
    ) -> Result<Uuid, ActivitiesError> {
        let id = Uuid::new_v4();
        let (schedule_type, day_of_week_utc, day_of_month, start_at_utc, end_at_utc) =
            match entry.schedule {
                ScheduleKind::Weekly { day_of_week_utc } => {
                    (ScheduleType::Weekly, Some(day_of_week_utc), None, None, None)
                }
                ScheduleKind::Monthly { day_of_month } => {
                    (ScheduleType::Monthly, None, Some(day_of_month), None, None)
                }
                ScheduleKind::DateSpecific {
                    start_at_utc,
                    end_at_utc,
                } => (
                    ScheduleType::DateSpecific,
                    None,
                    None,
                    Some(start_at_utc),
                    Some(end_at_utc),
                ),
            };

        let languages = Value::Array(entry.languages.into_iter().map(Value::String).collect());

        let model = schedule_entry::ActiveModel {
            id: Set(id),
            activity_id: Set(entry.activity_id),
            schedule_type: Set(schedule_type),
            day_of_week_utc: Set(day_of_week_utc),
            day_of_month: Set(day_of_month),
            start_at_utc: Set(start_at_utc),
            end_at_utc: Set(end_at_utc),
            start_minutes_utc: Set(entry.start_minutes_utc),
            end_minutes_utc: Set(entry.end_minutes_utc),
            languages: Set(languages),
            created_at: Set(chrono::Utc::now()),
        };
        let _ = model.insert(&self.conn).await?;
        Ok(id)
    }
}
