use chrono::{DateTime, Utc};
use serde::Serialize;

// Every read of the shifts table joins at least the task name, so there is
// no bare row type. `end_time = NULL` means the shift is open, i.e. the
// user is currently clocked in; `total_hours` is derived at read time and
// undefined while the shift is open.

// The open shift returned by the status endpoint, joined with its task name.
#[derive(Debug, sqlx::FromRow, Serialize)]
pub struct ActiveShift {
    pub id: i64,
    pub user_id: i64,
    pub task_id: i64,
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
    pub notes: Option<String>,
    pub status: String,
    pub task_name: String,
}

// History row: shift plus task name, derived hours, and the status of any
// pending change request against it.
#[derive(Debug, sqlx::FromRow, Serialize)]
pub struct ShiftHistoryRow {
    pub id: i64,
    pub user_id: i64,
    pub task_id: i64,
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
    pub notes: Option<String>,
    pub status: String,
    pub task_name: String,
    pub total_hours: Option<f64>,
    pub request_status: Option<String>,
}

// Admin listing row: joined with both the user and task names.
#[derive(Debug, sqlx::FromRow, Serialize)]
pub struct AdminShiftRow {
    pub id: i64,
    pub user_id: i64,
    pub task_id: i64,
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
    pub notes: Option<String>,
    pub status: String,
    pub user_name: String,
    pub task_name: String,
    pub total_hours: Option<f64>,
}
