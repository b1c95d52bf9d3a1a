//! Activities module: cursor-paginated search over recurring schedules.
//!
//! Layered the usual way: `contract` holds the types other modules see,
//! `domain` the service and repository port, `infra` the SeaORM entities,
//! the deterministic query builder and the repository implementation. The
//! pure filter/cursor types live in the `search-core` crate.

pub mod config;
pub mod contract;
pub mod domain;
pub mod infra;

pub use config::ActivitiesConfig;
pub use contract::error::ActivitiesError;
pub use contract::model::{
    ActivityOccurrence, NewScheduleEntry, PricingKind, ScheduleKind, SearchRequest,
};
pub use domain::repo::ActivitiesRepository;
pub use domain::service::Service;
