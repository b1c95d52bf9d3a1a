use thiserror::Error;
use uuid::Uuid;

use search_core::{CursorError, SearchError};

/// Errors that are safe to expose to other modules
#[derive(Error, Debug, Clone)]
pub enum ActivitiesError {
    #[error(transparent)]
    Search(#[from] SearchError),

    #[error("schedule entry {id} is stored inconsistently: {reason}")]
    CorruptScheduleEntry { id: Uuid, reason: &'static str },

    #[error("database error: {0}")]
    Db(String),
}

impl ActivitiesError {
    pub fn db(message: impl Into<String>) -> Self {
        Self::Db(message.into())
    }
}

impl From<CursorError> for ActivitiesError {
    fn from(err: CursorError) -> Self {
        Self::Search(SearchError::Cursor(err))
    }
}

impl From<sea_orm::DbErr> for ActivitiesError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Db(err.to_string())
    }
}
