use crate::config::GhlConfig;
use crate::error::ApiError;
use crate::models::{
    appointment::{AppointmentCreate, AppointmentQuery},
    message::{EmailRequest, SmsRequest},
};
use chrono::{DateTime, Duration, SecondsFormat, Utc};
use std::borrow::Cow;
use serde::Serialize;
use serde_json::{json, Map, Value};

const LOCATION_KEY: &str = "locationId";
const LISTING_WINDOW_DAYS: i64 = 7;

fn to_object(input: &impl Serialize) -> Result<Map<String, Value>, ApiError> {
    Ok(serde_json::from_value(serde_json::to_value(input)?)?)
}

/// Encodes a caller-supplied id as exactly one upstream path segment.
/// `/`, `?` and `#` are escaped; dot segments would still be collapsed by
/// URL parsing, so they are rejected along with empty ids.
pub fn path_segment<'a>(id: &'a str, field: &'static str) -> Result<Cow<'a, str>, ApiError> {
    match id {
        "" | "." | ".." => Err(ApiError::InvalidId { field }),
        _ => Ok(urlencoding::encode(id)),
    }
}

/// Full create payload with the sub-account id attached.
pub fn build_create_payload(input: &impl Serialize, location_id: &str) -> Result<Value, ApiError> {
    let mut payload = to_object(input)?;
    payload.insert(LOCATION_KEY.to_string(), json!(location_id));
    Ok(Value::Object(payload))
}

/// Partial update payload. Unset fields are dropped, and the sub-account id
/// is attached only when something is left to update.
pub fn build_update_payload(input: &impl Serialize, location_id: &str) -> Result<Value, ApiError> {
    let mut payload = to_object(input)?;
    payload.retain(|_, value| !value.is_null());
    if !payload.is_empty() {
        payload.insert(LOCATION_KEY.to_string(), json!(location_id));
    }
    Ok(Value::Object(payload))
}

pub fn build_sms_payload(request: &SmsRequest) -> Value {
    json!({
        "contactId": request.contact_id,
        "body": request.message,
    })
}

pub fn build_email_payload(request: &EmailRequest) -> Value {
    json!({
        "contactId": request.contact_id,
        "subject": request.subject,
        "body": request.body,
    })
}

/// Picks the requested calendar, else the configured default. Empty strings
/// count as absent.
pub fn resolve_calendar<'a>(
    requested: Option<&'a str>,
    config: &'a GhlConfig,
) -> Result<&'a str, ApiError> {
    requested
        .filter(|id| !id.is_empty())
        .or_else(|| config.default_calendar())
        .ok_or(ApiError::MissingCalendar)
}

pub fn build_appointment_payload(
    appointment: &AppointmentCreate,
    config: &GhlConfig,
) -> Result<Value, ApiError> {
    let calendar_id = resolve_calendar(appointment.calendar_id.as_deref(), config)?;

    let mut payload = to_object(appointment)?;
    payload.insert("calendarId".to_string(), json!(calendar_id));
    payload.insert(LOCATION_KEY.to_string(), json!(config.location_id));
    Ok(Value::Object(payload))
}

fn format_instant(instant: DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Micros, false)
}

/// Fills a missing start with `now` and a missing end with `now + 7 days`.
/// The default end never depends on a caller-supplied start.
pub fn resolve_window(
    start: Option<&str>,
    end: Option<&str>,
    now: DateTime<Utc>,
) -> (String, String) {
    let start = match start.filter(|s| !s.is_empty()) {
        Some(s) => s.to_string(),
        None => format_instant(now),
    };
    let end = match end.filter(|s| !s.is_empty()) {
        Some(e) => e.to_string(),
        None => format_instant(now + Duration::days(LISTING_WINDOW_DAYS)),
    };
    (start, end)
}

pub fn build_appointment_query(
    query: &AppointmentQuery,
    config: &GhlConfig,
    now: DateTime<Utc>,
) -> Result<Vec<(String, String)>, ApiError> {
    let calendar_id = resolve_calendar(query.calendar_id.as_deref(), config)?;
    let (start, end) = resolve_window(query.start_time.as_deref(), query.end_time.as_deref(), now);

    Ok(vec![
        ("calendarId".to_string(), calendar_id.to_string()),
        ("startTime".to_string(), start),
        ("endTime".to_string(), end),
    ])
}
