use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentCreate {
    pub contact_id: String,
    /// ISO 8601 datetime, passed through untouched.
    pub start_time: String,
    #[serde(default)]
    pub calendar_id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentQuery {
    pub calendar_id: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
}
