use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Deserialize)]
pub struct ClockInRequest {
    pub task_id: Option<i64>,
    pub notes: Option<String>,
}

#[derive(Serialize)]
pub struct ClockInResponse {
    pub id: i64,
    pub start_time: DateTime<Utc>,
    pub status: String,
}

#[derive(Serialize)]
pub struct ClockOutResponse {
    pub message: String,
    pub end_time: DateTime<Utc>,
}

#[derive(Deserialize)]
pub struct HistoryQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

#[derive(Deserialize)]
pub struct ListShiftsQuery {
    pub user_id: Option<i64>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub sort_by: Option<String>,
    pub order: Option<String>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

// Required fields are checked by hand so the client sees the same message
// regardless of which one is missing.
#[derive(Deserialize)]
pub struct CreateShiftRequest {
    pub user_id: Option<i64>,
    pub task_id: Option<i64>,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub notes: Option<String>,
}

#[derive(Deserialize)]
pub struct UpdateShiftRequest {
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
    pub task_id: i64,
    pub notes: Option<String>,
    pub status: String,
}

#[derive(Deserialize)]
pub struct RequestChangeRequest {
    pub new_start_time: DateTime<Utc>,
    pub new_end_time: DateTime<Utc>,
    pub reason: Option<String>,
}

#[derive(Serialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Serialize)]
pub struct CreatedResponse {
    pub message: String,
    pub id: i64,
}
