use serde::Deserialize;

/// Request payload for scheduling a meeting
///
/// `date` is `YYYY-MM-DD` and `time` is `HH:MM`, matching the form the
/// scheduling UI submits.
#[derive(Debug, Deserialize)]
pub struct ScheduleMeetingRequest {
    pub advocate_id: String,
    pub client_name: String,
    pub date: String,
    pub time: String,
    #[serde(default)]
    pub purpose: String,
}
