use chrono::{DateTime, Utc};
use serde::Serialize;

/// An employee-submitted proposal to alter a closed shift's recorded times.
/// Terminal states are reached only through admin approval or rejection;
/// approval also rewrites the referenced shift in the same transaction.
#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct ShiftChangeRequest {
    pub id: i64,
    pub shift_id: i64,
    pub user_id: i64,
    pub new_start_time: DateTime<Utc>,
    pub new_end_time: DateTime<Utc>,
    pub reason: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

// Admin review row: request joined with the requester name, task name, and
// the shift's currently recorded times.
#[derive(Debug, sqlx::FromRow, Serialize)]
pub struct PendingRequestRow {
    pub id: i64,
    pub shift_id: i64,
    pub user_id: i64,
    pub new_start_time: DateTime<Utc>,
    pub new_end_time: DateTime<Utc>,
    pub reason: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub user_name: String,
    pub task_name: String,
    pub original_start_time: DateTime<Utc>,
    pub original_end_time: Option<DateTime<Utc>>,
}
