use thiserror::Error;

/// Failures while decoding or validating a pagination cursor token.
///
/// Every variant maps to a bad-request style failure at the caller; the
/// codec never falls back to "first page" on a malformed token.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CursorError {
    #[error("invalid cursor: not valid base64url")]
    InvalidBase64,

    #[error("invalid cursor: payload is not valid JSON")]
    InvalidJson,

    #[error("invalid cursor: payload is not a JSON object")]
    NotAnObject,

    #[error("invalid cursor: missing schedule_id")]
    MissingScheduleId,

    #[error("invalid cursor: '{0}' is not a valid schedule id")]
    InvalidScheduleId(String),

    #[error("invalid cursor: field '{0}' has the wrong type")]
    InvalidField(&'static str),

    #[error("invalid cursor: unexpected field '{0}'")]
    UnexpectedField(String),
}

/// Request-validation failures raised before any query is built.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SearchError {
    #[error("invalid range: {0}")]
    InvalidRange(String),

    #[error("invalid limit {requested}: must be between 1 and {max}")]
    InvalidLimit { requested: u64, max: u64 },

    #[error(transparent)]
    Cursor(#[from] CursorError),
}

impl SearchError {
    pub fn invalid_range(message: impl Into<String>) -> Self {
        Self::InvalidRange(message.into())
    }
}
