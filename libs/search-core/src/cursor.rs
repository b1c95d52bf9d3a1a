//! Opaque pagination cursor: the composite sort key of the last returned
//! row, encoded as base64url JSON. Callers treat the token as an abstract
//! resume handle; only this module looks inside it.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::error::CursorError;

/// Decoded resume position: "continue strictly after this sort key".
///
/// `day_of_week_utc` and `start_minutes_utc` are nullable because the row
/// they were taken from may carry NULL sort-key components (monthly and
/// date-specific entries); `schedule_id` is the unique tie-break and is
/// always present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivitySearchCursor {
    pub day_of_week_utc: Option<i16>,
    pub start_minutes_utc: Option<i16>,
    pub schedule_id: Uuid,
}

impl ActivitySearchCursor {
    /// Cursor positioned on a row's sort key.
    pub fn from_sort_key(
        day_of_week_utc: Option<i16>,
        start_minutes_utc: Option<i16>,
        schedule_id: Uuid,
    ) -> Self {
        Self {
            day_of_week_utc,
            start_minutes_utc,
            schedule_id,
        }
    }

    /// Serialize to the wire token.
    ///
    /// Payload is a JSON object with `schedule_id` and the optional sort-key
    /// fields (absent when `None`), base64url-encoded without padding.
    /// Deterministic: the same position always yields the same token.
    pub fn encode(&self) -> String {
        let mut payload = Map::new();
        payload.insert(
            "schedule_id".to_string(),
            Value::String(self.schedule_id.to_string()),
        );
        if let Some(day) = self.day_of_week_utc {
            payload.insert("day_of_week_utc".to_string(), Value::from(day));
        }
        if let Some(start) = self.start_minutes_utc {
            payload.insert("start_minutes_utc".to_string(), Value::from(start));
        }
        URL_SAFE_NO_PAD.encode(Value::Object(payload).to_string())
    }

    /// Decode and validate a client-supplied token.
    ///
    /// An absent or empty token means "first page" and returns `Ok(None)`.
    /// Anything else must decode to exactly the wire shape: a `schedule_id`
    /// that parses as a UUID, optionally the two integer sort-key fields,
    /// and nothing more. No database lookup happens here; a stale position
    /// simply matches zero rows downstream.
    pub fn parse(token: Option<&str>) -> Result<Option<Self>, CursorError> {
        let token = match token {
            None => return Ok(None),
            Some(t) if t.is_empty() => return Ok(None),
            Some(t) => t,
        };

        let mut payload = decode_token(token)?;

        let schedule_id = match payload.remove("schedule_id") {
            None => return Err(CursorError::MissingScheduleId),
            Some(Value::String(s)) => {
                Uuid::parse_str(&s).map_err(|_| CursorError::InvalidScheduleId(s))?
            }
            Some(_) => return Err(CursorError::InvalidField("schedule_id")),
        };
        let day_of_week_utc = take_i16(&mut payload, "day_of_week_utc")?;
        let start_minutes_utc = take_i16(&mut payload, "start_minutes_utc")?;

        if let Some(key) = payload.keys().next() {
            return Err(CursorError::UnexpectedField(key.clone()));
        }

        Ok(Some(Self {
            day_of_week_utc,
            start_minutes_utc,
            schedule_id,
        }))
    }
}

/// Base64url + JSON decode into a generic object; structural checks only.
fn decode_token(token: &str) -> Result<Map<String, Value>, CursorError> {
    let bytes = URL_SAFE_NO_PAD
        .decode(token)
        .map_err(|_| CursorError::InvalidBase64)?;
    let value: Value = serde_json::from_slice(&bytes).map_err(|_| CursorError::InvalidJson)?;
    match value {
        Value::Object(map) => Ok(map),
        _ => Err(CursorError::NotAnObject),
    }
}

fn take_i16(payload: &mut Map<String, Value>, key: &'static str) -> Result<Option<i16>, CursorError> {
    match payload.remove(key) {
        None => Ok(None),
        Some(Value::Number(n)) => n
            .as_i64()
            .and_then(|v| i16::try_from(v).ok())
            .map(Some)
            .ok_or(CursorError::InvalidField(key)),
        Some(_) => Err(CursorError::InvalidField(key)),
    }
}
