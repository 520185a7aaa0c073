use chrono::{DateTime, Utc};
use log::info;
use sqlx::SqlitePool;

use super::{Page, PageParams};
use crate::errors::{is_foreign_key_violation, is_unique_violation, ApiError};
use crate::models::shift::{ActiveShift, ShiftHistoryRow};

/// Clock-in/out state machine for a single user. A shift is OPEN while
/// `end_time` is NULL and CLOSED once clock-out stamps it; closing is the
/// only state transition this service performs.
pub struct ShiftLifecycleService {
    pool: SqlitePool,
}

#[derive(Debug)]
pub struct ClockedIn {
    pub id: i64,
    pub start_time: DateTime<Utc>,
    pub status: String,
}

impl ShiftLifecycleService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn clock_in(
        &self,
        user_id: i64,
        task_id: i64,
        notes: Option<&str>,
    ) -> Result<ClockedIn, ApiError> {
        let open: Option<(i64,)> =
            sqlx::query_as("SELECT id FROM shifts WHERE user_id = ? AND end_time IS NULL")
                .bind(user_id)
                .fetch_optional(&self.pool)
                .await?;
        if open.is_some() {
            return Err(ApiError::Conflict("Already clocked in".into()));
        }

        let start_time = Utc::now();
        // The check above is advisory; the partial unique index on open
        // shifts is what actually closes the concurrent clock-in race.
        let result = sqlx::query(
            "INSERT INTO shifts (user_id, task_id, start_time, notes, status) \
             VALUES (?, ?, ?, ?, 'pending')",
        )
        .bind(user_id)
        .bind(task_id)
        .bind(start_time)
        .bind(notes)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                ApiError::Conflict("Already clocked in".into())
            } else if is_foreign_key_violation(&e) {
                ApiError::Validation("Unknown task".into())
            } else {
                ApiError::from(e)
            }
        })?;

        info!("User {} clocked in on task {}", user_id, task_id);
        Ok(ClockedIn {
            id: result.last_insert_rowid(),
            start_time,
            status: "pending".into(),
        })
    }

    pub async fn clock_out(&self, user_id: i64) -> Result<DateTime<Utc>, ApiError> {
        let open: Option<(i64,)> =
            sqlx::query_as("SELECT id FROM shifts WHERE user_id = ? AND end_time IS NULL")
                .bind(user_id)
                .fetch_optional(&self.pool)
                .await?;
        // Not being clocked in is a bad request, not a conflict; only
        // clock-in reports 409 (two open shifts would collide in the store).
        let shift_id = match open {
            Some((id,)) => id,
            None => return Err(ApiError::Validation("Not clocked in".into())),
        };

        let end_time = Utc::now();
        sqlx::query("UPDATE shifts SET end_time = ? WHERE id = ?")
            .bind(end_time)
            .bind(shift_id)
            .execute(&self.pool)
            .await?;

        info!("User {} clocked out of shift {}", user_id, shift_id);
        Ok(end_time)
    }

    pub async fn current_status(&self, user_id: i64) -> Result<Option<ActiveShift>, ApiError> {
        let shift = sqlx::query_as::<_, ActiveShift>(
            "SELECT s.id, s.user_id, s.task_id, s.start_time, s.end_time, s.notes, s.status, \
                    t.name AS task_name \
             FROM shifts s \
             JOIN tasks t ON s.task_id = t.id \
             WHERE s.user_id = ? AND s.end_time IS NULL",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(shift)
    }

    pub async fn history(
        &self,
        user_id: i64,
        params: PageParams,
    ) -> Result<Page<ShiftHistoryRow>, ApiError> {
        let (total,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM shifts WHERE user_id = ?")
            .bind(user_id)
            .fetch_one(&self.pool)
            .await?;

        let rows = sqlx::query_as::<_, ShiftHistoryRow>(
            "SELECT s.id, s.user_id, s.task_id, s.start_time, s.end_time, s.notes, s.status, \
                    t.name AS task_name, \
                    ROUND((JULIANDAY(s.end_time) - JULIANDAY(s.start_time)) * 24, 2) AS total_hours, \
                    r.status AS request_status \
             FROM shifts s \
             JOIN tasks t ON s.task_id = t.id \
             LEFT JOIN shift_change_requests r ON s.id = r.shift_id AND r.status = 'pending' \
             WHERE s.user_id = ? \
             ORDER BY s.start_time DESC \
             LIMIT ? OFFSET ?",
        )
        .bind(user_id)
        .bind(params.limit)
        .bind(params.offset())
        .fetch_all(&self.pool)
        .await?;

        Ok(Page::new(rows, total, params))
    }
}
