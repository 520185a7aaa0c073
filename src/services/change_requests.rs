use chrono::{DateTime, Utc};
use log::info;
use sqlx::SqlitePool;

use crate::errors::ApiError;
use crate::models::shift_change_request::{PendingRequestRow, ShiftChangeRequest};

/// Employee-submitted edit proposals for closed shifts and the admin
/// approve/reject workflow. Approval rewrites the shift and flips the
/// request in one transaction; both commit or neither does.
pub struct ChangeRequestService {
    pool: SqlitePool,
}

impl ChangeRequestService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn submit(
        &self,
        shift_id: i64,
        user_id: i64,
        new_start_time: DateTime<Utc>,
        new_end_time: DateTime<Utc>,
        reason: Option<&str>,
    ) -> Result<i64, ApiError> {
        let shift: Option<(i64,)> = sqlx::query_as("SELECT user_id FROM shifts WHERE id = ?")
            .bind(shift_id)
            .fetch_optional(&self.pool)
            .await?;
        let owner = match shift {
            Some((owner,)) => owner,
            None => return Err(ApiError::NotFound("Shift not found".into())),
        };
        if owner != user_id {
            return Err(ApiError::Forbidden(
                "You can only request changes to your own shifts".into(),
            ));
        }

        let (pending,): (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM shift_change_requests WHERE shift_id = ? AND status = 'pending'",
        )
        .bind(shift_id)
        .fetch_one(&self.pool)
        .await?;
        if pending > 0 {
            return Err(ApiError::Conflict(
                "A change request for this shift is already pending".into(),
            ));
        }

        let result = sqlx::query(
            "INSERT INTO shift_change_requests \
             (shift_id, user_id, new_start_time, new_end_time, reason, status, created_at) \
             VALUES (?, ?, ?, ?, ?, 'pending', ?)",
        )
        .bind(shift_id)
        .bind(user_id)
        .bind(new_start_time)
        .bind(new_end_time)
        .bind(reason)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        let id = result.last_insert_rowid();
        info!("User {} requested a change to shift {}", user_id, shift_id);
        Ok(id)
    }

    pub async fn list_pending(&self) -> Result<Vec<PendingRequestRow>, ApiError> {
        let rows = sqlx::query_as::<_, PendingRequestRow>(
            "SELECT r.id, r.shift_id, r.user_id, r.new_start_time, r.new_end_time, r.reason, \
                    r.status, r.created_at, u.name AS user_name, t.name AS task_name, \
                    s.start_time AS original_start_time, s.end_time AS original_end_time \
             FROM shift_change_requests r \
             JOIN users u ON r.user_id = u.id \
             JOIN shifts s ON r.shift_id = s.id \
             JOIN tasks t ON s.task_id = t.id \
             WHERE r.status = 'pending' \
             ORDER BY r.created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn approve(&self, id: i64) -> Result<(), ApiError> {
        let request = sqlx::query_as::<_, ShiftChangeRequest>(
            "SELECT * FROM shift_change_requests WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| ApiError::NotFound("Request not found".into()))?;

        let mut tx = self.pool.begin().await?;

        let shift_update =
            sqlx::query("UPDATE shifts SET start_time = ?, end_time = ?, status = 'edited' WHERE id = ?")
                .bind(request.new_start_time)
                .bind(request.new_end_time)
                .bind(request.shift_id)
                .execute(&mut *tx)
                .await
                .map_err(|e| ApiError::Transaction(format!("Failed to update shift: {}", e)))?;
        // Dropping the transaction without commit rolls everything back.
        if shift_update.rows_affected() == 0 {
            return Err(ApiError::Transaction("Failed to update shift".into()));
        }

        sqlx::query("UPDATE shift_change_requests SET status = 'approved' WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(|e| ApiError::Transaction(format!("Failed to update request status: {}", e)))?;

        tx.commit()
            .await
            .map_err(|e| ApiError::Transaction(format!("Transaction commit failed: {}", e)))?;

        info!("Approved change request {} for shift {}", id, request.shift_id);
        Ok(())
    }

    pub async fn reject(&self, id: i64) -> Result<(), ApiError> {
        let result = sqlx::query("UPDATE shift_change_requests SET status = 'rejected' WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(ApiError::NotFound("Request not found".into()));
        }
        info!("Rejected change request {}", id);
        Ok(())
    }
}
