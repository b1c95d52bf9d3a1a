//! End-to-end search over an in-memory SQLite database: seeding the fixed
//! schema, walking pages through real cursor tokens, and the overnight
//! wraparound behavior.

use std::sync::Arc;

use anyhow::Result;
use chrono::{TimeZone, Utc};
use sea_orm::{ActiveModelTrait, ConnectionTrait, Database, DatabaseConnection, Set};
use serde_json::json;
use uuid::Uuid;

use activities::infra::storage::entity::pricing::PricingType;
use activities::infra::storage::entity::schedule_entry::ScheduleType;
use activities::infra::storage::entity::{
    activity, location, organization, pricing, schedule_entry,
};
use activities::infra::storage::query::search_page;
use activities::infra::storage::sea_orm_repo::SeaOrmActivitiesRepository;
use activities::{ActivitiesConfig, ActivityOccurrence, ScheduleKind, SearchRequest, Service};
use search_core::{ActivitySearchCursor, ActivitySearchFilters, Page, SearchLimits};

const DDL: &[&str] = &[
    "CREATE TABLE organizations (
        id uuid PRIMARY KEY,
        name text NOT NULL
    )",
    "CREATE TABLE locations (
        id uuid PRIMARY KEY,
        name text NOT NULL,
        city text NOT NULL,
        address text
    )",
    "CREATE TABLE activities (
        id uuid PRIMARY KEY,
        organization_id uuid NOT NULL,
        location_id uuid NOT NULL,
        title text NOT NULL,
        summary text,
        min_age smallint,
        max_age smallint,
        created_at text NOT NULL
    )",
    "CREATE TABLE activity_pricing (
        id uuid PRIMARY KEY,
        activity_id uuid NOT NULL UNIQUE,
        pricing_type text NOT NULL,
        amount_cents bigint,
        currency text
    )",
    "CREATE TABLE schedule_entries (
        id uuid PRIMARY KEY,
        activity_id uuid NOT NULL,
        schedule_type text NOT NULL,
        day_of_week_utc smallint,
        day_of_month smallint,
        start_at_utc text,
        end_at_utc text,
        start_minutes_utc smallint,
        end_minutes_utc smallint,
        languages text NOT NULL,
        created_at text NOT NULL
    )",
];

// Fixed ids so the expected tie-break order is readable in assertions.
fn entry_id(n: u8) -> Uuid {
    Uuid::parse_str(&format!("00000000-0000-4000-8000-0000000000{n:02x}")).unwrap()
}

struct Fixture {
    db: DatabaseConnection,
    chess: Uuid,
    pottery: Uuid,
    sunrise: Uuid,
}

/// Five schedule entries across two activities:
///
/// | id | activity | type          | dow  | start | end  |
/// |----|----------|---------------|------|-------|------|
/// | 1  | chess    | weekly        | 1    | 480   | 600  |
/// | 2  | chess    | weekly        | 1    | 1320  | 120  | (wraps)
/// | 3  | pottery  | weekly        | 3    | 540   | 660  |
/// | 4  | chess    | monthly (15)  | NULL | 600   | 720  |
/// | 5  | pottery  | date-specific | NULL | NULL  | NULL |
///
/// Expected sort order: 1, 2, 3, 4, 5.
async fn fixture() -> Result<Fixture> {
    let db = Database::connect("sqlite::memory:").await?;
    for ddl in DDL {
        db.execute_unprepared(ddl).await?;
    }

    let sunrise = Uuid::new_v4();
    let harbor = Uuid::new_v4();
    organization::ActiveModel {
        id: Set(sunrise),
        name: Set("Sunrise Sports".to_string()),
    }
    .insert(&db)
    .await?;
    organization::ActiveModel {
        id: Set(harbor),
        name: Set("Harbor Arts".to_string()),
    }
    .insert(&db)
    .await?;

    let hall = Uuid::new_v4();
    let studio = Uuid::new_v4();
    location::ActiveModel {
        id: Set(hall),
        name: Set("City Hall Annex".to_string()),
        city: Set("Amsterdam".to_string()),
        address: Set(Some("Waterlooplein 1".to_string())),
    }
    .insert(&db)
    .await?;
    location::ActiveModel {
        id: Set(studio),
        name: Set("Canal Studio".to_string()),
        city: Set("Utrecht".to_string()),
        address: Set(None),
    }
    .insert(&db)
    .await?;

    let chess = Uuid::new_v4();
    let pottery = Uuid::new_v4();
    activity::ActiveModel {
        id: Set(chess),
        organization_id: Set(sunrise),
        location_id: Set(hall),
        title: Set("Junior chess club".to_string()),
        summary: Set(Some("Chess training for kids".to_string())),
        min_age: Set(Some(6)),
        max_age: Set(Some(12)),
        created_at: Set(Utc::now()),
    }
    .insert(&db)
    .await?;
    activity::ActiveModel {
        id: Set(pottery),
        organization_id: Set(harbor),
        location_id: Set(studio),
        title: Set("Evening pottery".to_string()),
        summary: Set(None),
        min_age: Set(Some(16)),
        max_age: Set(None),
        created_at: Set(Utc::now()),
    }
    .insert(&db)
    .await?;

    pricing::ActiveModel {
        id: Set(Uuid::new_v4()),
        activity_id: Set(chess),
        pricing_type: Set(PricingType::PerSession),
        amount_cents: Set(Some(1500)),
        currency: Set(Some("EUR".to_string())),
    }
    .insert(&db)
    .await?;

    let weekly = |id: Uuid, activity_id: Uuid, dow: i16, start: i16, end: i16| {
        schedule_entry::ActiveModel {
            id: Set(id),
            activity_id: Set(activity_id),
            schedule_type: Set(ScheduleType::Weekly),
            day_of_week_utc: Set(Some(dow)),
            day_of_month: Set(None),
            start_at_utc: Set(None),
            end_at_utc: Set(None),
            start_minutes_utc: Set(Some(start)),
            end_minutes_utc: Set(Some(end)),
            languages: Set(json!(["en", "nl"])),
            created_at: Set(Utc::now()),
        }
    };

    weekly(entry_id(1), chess, 1, 480, 600).insert(&db).await?;
    // 22:00-02:00 UTC, wraps past midnight.
    weekly(entry_id(2), chess, 1, 1320, 120).insert(&db).await?;
    weekly(entry_id(3), pottery, 3, 540, 660).insert(&db).await?;

    schedule_entry::ActiveModel {
        id: Set(entry_id(4)),
        activity_id: Set(chess),
        schedule_type: Set(ScheduleType::Monthly),
        day_of_week_utc: Set(None),
        day_of_month: Set(Some(15)),
        start_at_utc: Set(None),
        end_at_utc: Set(None),
        start_minutes_utc: Set(Some(600)),
        end_minutes_utc: Set(Some(720)),
        languages: Set(json!(["nl"])),
        created_at: Set(Utc::now()),
    }
    .insert(&db)
    .await?;

    schedule_entry::ActiveModel {
        id: Set(entry_id(5)),
        activity_id: Set(pottery),
        schedule_type: Set(ScheduleType::DateSpecific),
        day_of_week_utc: Set(None),
        day_of_month: Set(None),
        start_at_utc: Set(Some(Utc.with_ymd_and_hms(2025, 7, 5, 18, 0, 0).unwrap())),
        end_at_utc: Set(Some(Utc.with_ymd_and_hms(2025, 7, 5, 20, 0, 0).unwrap())),
        start_minutes_utc: Set(None),
        end_minutes_utc: Set(None),
        languages: Set(json!(["en"])),
        created_at: Set(Utc::now()),
    }
    .insert(&db)
    .await?;

    Ok(Fixture {
        db,
        chess,
        pottery,
        sunrise,
    })
}

fn ids(page: &Page<ActivityOccurrence>) -> Vec<Uuid> {
    page.items.iter().map(|o| o.schedule_id).collect()
}

async fn run(db: &DatabaseConnection, filters: ActivitySearchFilters) -> Page<ActivityOccurrence> {
    search_page(db, &filters, &SearchLimits::default())
        .await
        .expect("search should succeed")
}

#[tokio::test]
async fn results_come_back_in_the_stable_sort_order() -> Result<()> {
    let f = fixture().await?;
    let page = run(&f.db, ActivitySearchFilters::default()).await;

    assert_eq!(
        ids(&page),
        vec![entry_id(1), entry_id(2), entry_id(3), entry_id(4), entry_id(5)]
    );
    assert!(page.page_info.next_cursor.is_none());
    Ok(())
}

#[tokio::test]
async fn overnight_entries_match_the_early_morning_window() -> Result<()> {
    let f = fixture().await?;

    // 00:00-01:00 falls inside the tail of the 22:00-02:00 entry.
    let page = run(
        &f.db,
        ActivitySearchFilters {
            start_minutes_utc: Some(0),
            end_minutes_utc: Some(60),
            ..Default::default()
        },
    )
    .await;
    assert_eq!(ids(&page), vec![entry_id(2)]);

    // 10:00-11:00 touches neither side of the wrapped window.
    let page = run(
        &f.db,
        ActivitySearchFilters {
            start_minutes_utc: Some(600),
            end_minutes_utc: Some(660),
            ..Default::default()
        },
    )
    .await;
    assert_eq!(ids(&page), vec![entry_id(3), entry_id(4)]);
    Ok(())
}

#[tokio::test]
async fn cursor_walk_visits_every_row_exactly_once() -> Result<()> {
    let f = fixture().await?;
    let repo = Arc::new(SeaOrmActivitiesRepository::new(f.db.clone()));
    let service = Service::new(repo, &ActivitiesConfig::default());

    let mut seen = Vec::new();
    let mut cursor: Option<String> = None;
    let mut pages = 0;
    loop {
        let page = service
            .search(SearchRequest {
                limit: Some(2),
                cursor: cursor.clone(),
                ..Default::default()
            })
            .await?;
        pages += 1;
        seen.extend(ids(&page));
        match page.page_info.next_cursor {
            Some(next) => cursor = Some(next),
            None => break,
        }
    }

    assert_eq!(pages, 3);
    assert_eq!(
        seen,
        vec![entry_id(1), entry_id(2), entry_id(3), entry_id(4), entry_id(5)]
    );
    Ok(())
}

#[tokio::test]
async fn a_full_final_page_reports_no_next_cursor_after_one_more_fetch() -> Result<()> {
    let f = fixture().await?;

    let page = run(
        &f.db,
        ActivitySearchFilters {
            limit: Some(5),
            ..Default::default()
        },
    )
    .await;
    assert_eq!(page.items.len(), 5);
    assert!(page.page_info.next_cursor.is_none());
    Ok(())
}

#[tokio::test]
async fn a_stale_cursor_yields_an_empty_page_not_an_error() -> Result<()> {
    let f = fixture().await?;

    let page = run(
        &f.db,
        ActivitySearchFilters {
            cursor: Some(ActivitySearchCursor::from_sort_key(None, None, entry_id(5))),
            ..Default::default()
        },
    )
    .await;
    assert!(page.items.is_empty());
    assert!(page.page_info.next_cursor.is_none());
    Ok(())
}

#[tokio::test]
async fn scalar_filters_narrow_the_result_set() -> Result<()> {
    let f = fixture().await?;

    let monday = run(
        &f.db,
        ActivitySearchFilters {
            day_of_week_utc: Some(1),
            ..Default::default()
        },
    )
    .await;
    assert_eq!(ids(&monday), vec![entry_id(1), entry_id(2)]);

    let amsterdam = run(
        &f.db,
        ActivitySearchFilters {
            city: Some("Amsterdam".to_string()),
            ..Default::default()
        },
    )
    .await;
    assert_eq!(ids(&amsterdam), vec![entry_id(1), entry_id(2), entry_id(4)]);

    let sunrise_only = run(
        &f.db,
        ActivitySearchFilters {
            organization_id: Some(f.sunrise),
            ..Default::default()
        },
    )
    .await;
    assert_eq!(ids(&sunrise_only), vec![entry_id(1), entry_id(2), entry_id(4)]);

    let teens = run(
        &f.db,
        ActivitySearchFilters {
            age_min: Some(13),
            ..Default::default()
        },
    )
    .await;
    assert_eq!(ids(&teens), vec![entry_id(3), entry_id(5)]);

    let chess = run(
        &f.db,
        ActivitySearchFilters {
            search_term: Some("chess".to_string()),
            ..Default::default()
        },
    )
    .await;
    assert_eq!(ids(&chess), vec![entry_id(1), entry_id(2), entry_id(4)]);

    let none = run(
        &f.db,
        ActivitySearchFilters {
            search_term: Some("yoga".to_string()),
            ..Default::default()
        },
    )
    .await;
    assert!(none.items.is_empty());
    Ok(())
}

#[tokio::test]
async fn rows_project_the_joined_relations() -> Result<()> {
    let f = fixture().await?;
    let page = run(
        &f.db,
        ActivitySearchFilters {
            search_term: Some("chess".to_string()),
            ..Default::default()
        },
    )
    .await;

    let first = &page.items[0];
    assert_eq!(first.schedule_id, entry_id(1));
    assert_eq!(first.schedule, ScheduleKind::Weekly { day_of_week_utc: 1 });
    assert_eq!(first.activity.id, f.chess);
    assert_eq!(first.activity.title, "Junior chess club");
    assert_eq!(first.organization.name, "Sunrise Sports");
    assert_eq!(first.location.city, "Amsterdam");
    assert_eq!(first.languages, vec!["en", "nl"]);

    let pricing = first.pricing.as_ref().expect("chess has a pricing row");
    assert_eq!(pricing.amount_cents, Some(1500));
    assert_eq!(pricing.currency.as_deref(), Some("EUR"));

    let window = first.window.expect("weekly entries carry a window");
    assert!(!window.wraps_midnight());

    // The pottery activity has no pricing row; the left join keeps it.
    let pottery = run(
        &f.db,
        ActivitySearchFilters {
            organization_id: None,
            search_term: Some("pottery".to_string()),
            ..Default::default()
        },
    )
    .await;
    assert_eq!(ids(&pottery), vec![entry_id(3), entry_id(5)]);
    assert!(pottery.items[0].pricing.is_none());
    assert_eq!(pottery.items[0].activity.id, f.pottery);
    Ok(())
}

#[tokio::test]
async fn created_entries_show_up_in_search() -> Result<()> {
    let f = fixture().await?;
    let repo = Arc::new(SeaOrmActivitiesRepository::new(f.db.clone()));
    let service = Service::new(repo, &ActivitiesConfig::default());

    let id = service
        .create_schedule_entry(activities::NewScheduleEntry {
            activity_id: f.chess,
            schedule: ScheduleKind::Weekly { day_of_week_utc: 0 },
            start_minutes_utc: Some(540),
            end_minutes_utc: Some(600),
            languages: vec!["en".to_string()],
        })
        .await?;

    let sunday = service
        .search(SearchRequest {
            day_of_week_utc: Some(0),
            ..Default::default()
        })
        .await?;
    assert_eq!(ids(&sunday), vec![id]);
    Ok(())
}
