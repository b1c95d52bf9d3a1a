//! SeaORM entities for the fixed relational schema this module reads.
//! Migrations are owned elsewhere; these definitions only mirror the
//! tables and columns the search query touches.

pub mod activity;
pub mod location;
pub mod organization;
pub mod pricing;
pub mod schedule_entry;
