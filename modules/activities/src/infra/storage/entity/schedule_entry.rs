use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use uuid::Uuid;

/// Schedule recurrence discriminator, stored as its string value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum ScheduleType {
    #[sea_orm(string_value = "weekly")]
    Weekly,
    #[sea_orm(string_value = "monthly")]
    Monthly,
    #[sea_orm(string_value = "dateSpecific")]
    DateSpecific,
}

/// One concrete weekly/monthly/date-specific occurrence of an activity's
/// schedule; the unit of search enumeration and pagination.
///
/// `start_minutes_utc > end_minutes_utc` means the time-of-day window
/// wraps past midnight (e.g. 22:00–02:00 UTC).
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "schedule_entries")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub activity_id: Uuid,
    pub schedule_type: ScheduleType,
    /// 0 = Sunday .. 6 = Saturday; only for weekly entries.
    pub day_of_week_utc: Option<i16>,
    /// 1..=31; only for monthly entries.
    pub day_of_month: Option<i16>,
    pub start_at_utc: Option<DateTime<Utc>>,
    pub end_at_utc: Option<DateTime<Utc>>,
    pub start_minutes_utc: Option<i16>,
    pub end_minutes_utc: Option<i16>,
    /// Language codes the session is conducted in, as a JSON string array.
    pub languages: Json,
    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::activity::Entity",
        from = "Column::ActivityId",
        to = "super::activity::Column::Id"
    )]
    Activity,
}

impl Related<super::activity::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Activity.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
