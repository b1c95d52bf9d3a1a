//! Row → contract model conversion.

use search_core::TimeWindow;

use crate::contract::error::ActivitiesError;
use crate::contract::model::{
    ActivityOccurrence, ActivityRef, LocationRef, OrganizationRef, PricingInfo, PricingKind,
    ScheduleKind,
};
use crate::infra::storage::entity::pricing::PricingType;
use crate::infra::storage::entity::schedule_entry::ScheduleType;
use crate::infra::storage::query::SearchRow;

/// Convert a joined search row to the contract model.
///
/// The per-type schedule columns are nullable in the schema but required
/// for their own discriminator; a row violating that is reported, not
/// papered over.
pub fn row_to_occurrence(row: SearchRow) -> Result<ActivityOccurrence, ActivitiesError> {
    let corrupt = |reason: &'static str| ActivitiesError::CorruptScheduleEntry {
        id: row.id,
        reason,
    };

    let schedule = match row.schedule_type {
        ScheduleType::Weekly => ScheduleKind::Weekly {
            day_of_week_utc: row
                .day_of_week_utc
                .ok_or_else(|| corrupt("weekly entry without day_of_week_utc"))?,
        },
        ScheduleType::Monthly => ScheduleKind::Monthly {
            day_of_month: row
                .day_of_month
                .ok_or_else(|| corrupt("monthly entry without day_of_month"))?,
        },
        ScheduleType::DateSpecific => ScheduleKind::DateSpecific {
            start_at_utc: row
                .start_at_utc
                .ok_or_else(|| corrupt("date-specific entry without start_at_utc"))?,
            end_at_utc: row
                .end_at_utc
                .ok_or_else(|| corrupt("date-specific entry without end_at_utc"))?,
        },
    };

    let window = match (row.start_minutes_utc, row.end_minutes_utc) {
        (Some(start), Some(end)) => Some(TimeWindow::new(start, end)),
        _ => None,
    };

    let languages: Vec<String> = serde_json::from_value(row.languages)
        .map_err(|_| corrupt("languages is not a string array"))?;

    let pricing = row.pricing_type.map(|pricing_type| PricingInfo {
        kind: pricing_kind(pricing_type),
        amount_cents: row.amount_cents,
        currency: row.currency.clone(),
    });

    Ok(ActivityOccurrence {
        schedule_id: row.id,
        schedule,
        window,
        languages,
        activity: ActivityRef {
            id: row.activity_id,
            title: row.activity_title,
            summary: row.activity_summary,
            age_min: row.min_age,
            age_max: row.max_age,
        },
        organization: OrganizationRef {
            id: row.organization_id,
            name: row.organization_name,
        },
        location: LocationRef {
            name: row.location_name,
            city: row.location_city,
            address: row.location_address,
        },
        pricing,
    })
}

fn pricing_kind(pricing_type: PricingType) -> PricingKind {
    match pricing_type {
        PricingType::Free => PricingKind::Free,
        PricingType::PerSession => PricingKind::PerSession,
        PricingType::Subscription => PricingKind::Subscription,
    }
}
