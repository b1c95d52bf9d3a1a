//! Filters → SeaORM `Select` compiler plus the pagination executor.
//!
//! `build_search_query` is a pure function of the validated filter set:
//! identical filters always compile to the identical statement. Resumption
//! is strictly cursor-based; no OFFSET is ever emitted, so query cost does
//! not grow with page depth.

use chrono::{DateTime, Utc};
use sea_orm::sea_query::{Expr, NullOrdering};
use sea_orm::{
    ColumnTrait, Condition, ConnectionTrait, EntityTrait, FromQueryResult, JoinType, Order,
    QueryFilter, QueryOrder, QuerySelect, RelationTrait,
};
use uuid::Uuid;

use search_core::{
    ActivitySearchCursor, ActivitySearchFilters, Page, PageInfo, SearchLimits,
};

use crate::contract::error::ActivitiesError;
use crate::contract::model::ActivityOccurrence;
use crate::infra::storage::entity::pricing::PricingType;
use crate::infra::storage::entity::schedule_entry::ScheduleType;
use crate::infra::storage::entity::{activity, location, organization, pricing, schedule_entry};
use crate::infra::storage::mapper::row_to_occurrence;

/// Flat projection of one result row across the joined tables.
#[derive(Debug, Clone, FromQueryResult)]
pub struct SearchRow {
    pub id: Uuid,
    pub schedule_type: ScheduleType,
    pub day_of_week_utc: Option<i16>,
    pub day_of_month: Option<i16>,
    pub start_at_utc: Option<DateTime<Utc>>,
    pub end_at_utc: Option<DateTime<Utc>>,
    pub start_minutes_utc: Option<i16>,
    pub end_minutes_utc: Option<i16>,
    pub languages: serde_json::Value,
    pub activity_id: Uuid,
    pub activity_title: String,
    pub activity_summary: Option<String>,
    pub min_age: Option<i16>,
    pub max_age: Option<i16>,
    pub organization_id: Uuid,
    pub organization_name: String,
    pub location_name: String,
    pub location_city: String,
    pub location_address: Option<String>,
    pub pricing_type: Option<PricingType>,
    pub amount_cents: Option<i64>,
    pub currency: Option<String>,
}

/// Compile a validated filter set into one paginated query.
///
/// Callers run `filters.validate` first; in particular the requested time
/// window satisfies `start < end` here. Each absent filter contributes no
/// predicate. Results are ordered by the composite sort key
/// `(day_of_week_utc ASC NULLS LAST, start_minutes_utc ASC NULLS LAST,
/// id ASC)` and capped at the effective limit.
pub fn build_search_query(
    filters: &ActivitySearchFilters,
    limits: &SearchLimits,
) -> sea_orm::Select<schedule_entry::Entity> {
    let mut cond = Condition::all();

    if let (Some(start), Some(end)) = (filters.start_minutes_utc, filters.end_minutes_utc) {
        cond = cond.add(time_window_condition(start, end));
    }
    if let Some(day) = filters.day_of_week_utc {
        cond = cond.add(schedule_entry::Column::DayOfWeekUtc.eq(day));
    }
    if let Some(min) = filters.age_min {
        cond = cond.add(
            Condition::any()
                .add(activity::Column::MaxAge.is_null())
                .add(activity::Column::MaxAge.gte(min)),
        );
    }
    if let Some(max) = filters.age_max {
        cond = cond.add(
            Condition::any()
                .add(activity::Column::MinAge.is_null())
                .add(activity::Column::MinAge.lte(max)),
        );
    }
    if let Some(term) = &filters.search_term {
        let pattern = like_contains(term);
        cond = cond.add(
            Condition::any()
                .add(activity::Column::Title.like(pattern.clone()))
                .add(activity::Column::Summary.like(pattern)),
        );
    }
    if let Some(organization_id) = filters.organization_id {
        cond = cond.add(activity::Column::OrganizationId.eq(organization_id));
    }
    if let Some(city) = &filters.city {
        cond = cond.add(location::Column::City.eq(city.clone()));
    }
    if let Some(cursor) = &filters.cursor {
        cond = cond.add(cursor_condition(cursor));
    }

    schedule_entry::Entity::find()
        .join(JoinType::InnerJoin, schedule_entry::Relation::Activity.def())
        .join(JoinType::InnerJoin, activity::Relation::Organization.def())
        .join(JoinType::InnerJoin, activity::Relation::Location.def())
        .join(JoinType::LeftJoin, activity::Relation::Pricing.def())
        .column_as(activity::Column::Title, "activity_title")
        .column_as(activity::Column::Summary, "activity_summary")
        .column_as(activity::Column::MinAge, "min_age")
        .column_as(activity::Column::MaxAge, "max_age")
        .column_as(activity::Column::OrganizationId, "organization_id")
        .column_as(organization::Column::Name, "organization_name")
        .column_as(location::Column::Name, "location_name")
        .column_as(location::Column::City, "location_city")
        .column_as(location::Column::Address, "location_address")
        .column_as(pricing::Column::PricingType, "pricing_type")
        .column_as(pricing::Column::AmountCents, "amount_cents")
        .column_as(pricing::Column::Currency, "currency")
        .filter(cond)
        .order_by_with_nulls(
            schedule_entry::Column::DayOfWeekUtc,
            Order::Asc,
            NullOrdering::Last,
        )
        .order_by_with_nulls(
            schedule_entry::Column::StartMinutesUtc,
            Order::Asc,
            NullOrdering::Last,
        )
        .order_by(schedule_entry::Column::Id, Order::Asc)
        .limit(filters.effective_limit(limits))
}

/// Wraparound-aware overlap of an entry's own window with the requested
/// half-open window `[req_start, req_end)`.
///
/// A wrapped entry (`start > end`) covers `[start, 1440) ∪ [0, end)`; the
/// wrap branch must stay an explicit disjunction, because plain interval
/// logic silently drops wrapped entries. The comparisons of the two
/// sub-intervals against the day's 0/1440 edges are always true for a
/// non-wrapping request window and are reduced away here.
fn time_window_condition(req_start: i16, req_end: i16) -> Condition {
    let start = schedule_entry::Column::StartMinutesUtc;
    let end = schedule_entry::Column::EndMinutesUtc;
    let start_col = (schedule_entry::Entity, start);
    let end_col = (schedule_entry::Entity, end);

    let plain = Condition::all()
        .add(
            Condition::any()
                .add(start.is_null())
                .add(end.is_null())
                .add(Expr::col(start_col).lte(Expr::col(end_col))),
        )
        .add(Condition::any().add(start.is_null()).add(start.lt(req_end)))
        .add(Condition::any().add(end.is_null()).add(end.gt(req_start)));

    let wrapped = Condition::all()
        .add(Expr::col(start_col).gt(Expr::col(end_col)))
        .add(Condition::any().add(start.lt(req_end)).add(end.gt(req_start)));

    Condition::any().add(plain).add(wrapped)
}

/// "Strictly after this sort key", spelled as the tie-break OR-chain:
/// `after(day) OR (day = c.day AND after(start)) OR (day = c.day AND
/// start = c.start AND id > c.id)`.
///
/// NULL components follow the NULLS LAST total order: everything non-null
/// sorts before NULL, so "after Some(v)" admits NULL rows, while nothing
/// is "after" a NULL component. The whole chain is one composite
/// comparison; three independent comparisons would skip or repeat rows at
/// tied boundaries.
fn cursor_condition(cursor: &ActivitySearchCursor) -> Condition {
    let day = schedule_entry::Column::DayOfWeekUtc;
    let start = schedule_entry::Column::StartMinutesUtc;
    let id = schedule_entry::Column::Id;

    Condition::any()
        .add(after_nullable(day, cursor.day_of_week_utc))
        .add(
            Condition::all()
                .add(eq_nullable(day, cursor.day_of_week_utc))
                .add(after_nullable(start, cursor.start_minutes_utc)),
        )
        .add(
            Condition::all()
                .add(eq_nullable(day, cursor.day_of_week_utc))
                .add(eq_nullable(start, cursor.start_minutes_utc))
                .add(id.gt(cursor.schedule_id)),
        )
}

fn after_nullable(col: schedule_entry::Column, bound: Option<i16>) -> Condition {
    match bound {
        Some(value) => Condition::any().add(col.gt(value)).add(col.is_null()),
        // NULL sorts last; no value is strictly after it.
        None => Condition::all().add(Expr::cust("1=0")),
    }
}

fn eq_nullable(col: schedule_entry::Column, bound: Option<i16>) -> Condition {
    match bound {
        Some(value) => Condition::all().add(col.eq(value)),
        None => Condition::all().add(col.is_null()),
    }
}

fn like_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '%' | '_' | '\\' => {
                out.push('\\');
                out.push(ch);
            }
            c => out.push(c),
        }
    }
    out
}

fn like_contains(s: &str) -> String {
    format!("%{}%", like_escape(s))
}

/// Validate, compile, execute and page in one shot.
///
/// Fetches one row beyond the effective limit to detect a further page,
/// trims it, and encodes the last kept row's sort key as `next_cursor`.
/// The read is a single statement; cursors stay consistent only under
/// snapshot-isolated or monotonic reads, and writes between page fetches
/// may skip or repeat a boundary row.
pub async fn search_page<C>(
    conn: &C,
    filters: &ActivitySearchFilters,
    limits: &SearchLimits,
) -> Result<Page<ActivityOccurrence>, ActivitiesError>
where
    C: ConnectionTrait,
{
    filters.validate(limits)?;
    let limit = filters.effective_limit(limits);

    let mut rows: Vec<SearchRow> = build_search_query(filters, limits)
        .limit(limit + 1)
        .into_model::<SearchRow>()
        .all(conn)
        .await?;

    let has_more = rows.len() as u64 > limit;
    if has_more {
        rows.truncate(limit as usize);
    }

    let next_cursor = if has_more {
        rows.last().map(|row| {
            ActivitySearchCursor::from_sort_key(row.day_of_week_utc, row.start_minutes_utc, row.id)
                .encode()
        })
    } else {
        None
    };

    let items = rows
        .into_iter()
        .map(row_to_occurrence)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Page::new(items, PageInfo { next_cursor, limit }))
}
