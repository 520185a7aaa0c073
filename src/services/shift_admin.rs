use chrono::{DateTime, NaiveDate, Utc};
use log::info;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

use super::{Page, PageParams};
use crate::errors::{is_foreign_key_violation, is_unique_violation, ApiError};
use crate::models::shift::AdminShiftRow;

/// Admin-side shift management: arbitrary create/update/delete plus the
/// filtered, sorted, paginated listing backing the console.
pub struct ShiftAdminService {
    pool: SqlitePool,
}

#[derive(Debug, Default, Clone)]
pub struct ShiftFilter {
    pub user_id: Option<i64>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Default, Clone)]
pub struct SortParams {
    pub sort_by: Option<String>,
    pub order: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewShift {
    pub user_id: i64,
    pub task_id: i64,
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ShiftUpdate {
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
    pub task_id: i64,
    pub notes: Option<String>,
    pub status: String,
}

// Sort keys map to a fixed set of SQL expressions; anything outside the
// allow-list falls back to start_time. User input never reaches ORDER BY.
fn sort_column(sort_by: Option<&str>) -> &'static str {
    match sort_by {
        Some("user_name") => "u.name",
        Some("total_hours") => "(JULIANDAY(s.end_time) - JULIANDAY(s.start_time))",
        _ => "s.start_time",
    }
}

fn sort_direction(order: Option<&str>) -> &'static str {
    match order {
        Some(o) if o.eq_ignore_ascii_case("asc") => "ASC",
        _ => "DESC",
    }
}

/// Date filters arrive either as full RFC 3339 timestamps or as bare
/// `YYYY-MM-DD` dates; a bare end date means end of that day.
pub fn parse_date_filter(value: &str, end_of_day: bool) -> Result<DateTime<Utc>, ApiError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.with_timezone(&Utc));
    }
    let date = NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| ApiError::Validation(format!("Invalid date filter: {}", value)))?;
    let (h, m, s) = if end_of_day { (23, 59, 59) } else { (0, 0, 0) };
    let time = date
        .and_hms_opt(h, m, s)
        .ok_or_else(|| ApiError::Validation(format!("Invalid date filter: {}", value)))?;
    Ok(DateTime::from_naive_utc_and_offset(time, Utc))
}

fn push_filters(qb: &mut QueryBuilder<'_, Sqlite>, filter: &ShiftFilter) {
    if let Some(user_id) = filter.user_id {
        qb.push(" AND s.user_id = ").push_bind(user_id);
    }
    if let Some(start) = filter.start_date {
        qb.push(" AND s.start_time >= ").push_bind(start);
    }
    if let Some(end) = filter.end_date {
        qb.push(" AND s.start_time <= ").push_bind(end);
    }
}

impl ShiftAdminService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn list(
        &self,
        filter: &ShiftFilter,
        sort: &SortParams,
        params: PageParams,
    ) -> Result<Page<AdminShiftRow>, ApiError> {
        let mut count = QueryBuilder::<Sqlite>::new("SELECT COUNT(*) FROM shifts s WHERE 1=1");
        push_filters(&mut count, filter);
        let total: i64 = count.build_query_scalar().fetch_one(&self.pool).await?;

        let mut query = QueryBuilder::<Sqlite>::new(
            "SELECT s.id, s.user_id, s.task_id, s.start_time, s.end_time, s.notes, s.status, \
                    u.name AS user_name, t.name AS task_name, \
                    ROUND((JULIANDAY(s.end_time) - JULIANDAY(s.start_time)) * 24, 2) AS total_hours \
             FROM shifts s \
             JOIN users u ON s.user_id = u.id \
             JOIN tasks t ON s.task_id = t.id \
             WHERE 1=1",
        );
        push_filters(&mut query, filter);
        query.push(" ORDER BY ");
        query.push(sort_column(sort.sort_by.as_deref()));
        query.push(" ");
        query.push(sort_direction(sort.order.as_deref()));
        query.push(" LIMIT ");
        query.push_bind(params.limit);
        query.push(" OFFSET ");
        query.push_bind(params.offset());

        let rows = query
            .build_query_as::<AdminShiftRow>()
            .fetch_all(&self.pool)
            .await?;

        Ok(Page::new(rows, total, params))
    }

    // Admin-created shifts are pre-approved and skip the clocked-in check;
    // the open-shift index still refuses a second open shift per user.
    pub async fn create(&self, new: NewShift) -> Result<i64, ApiError> {
        let result = sqlx::query(
            "INSERT INTO shifts (user_id, task_id, start_time, end_time, notes, status) \
             VALUES (?, ?, ?, ?, ?, 'approved')",
        )
        .bind(new.user_id)
        .bind(new.task_id)
        .bind(new.start_time)
        .bind(new.end_time)
        .bind(new.notes)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                ApiError::Conflict("User already has an open shift".into())
            } else if is_foreign_key_violation(&e) {
                ApiError::Validation("Unknown user or task".into())
            } else {
                ApiError::from(e)
            }
        })?;

        let id = result.last_insert_rowid();
        info!("Created shift {} for user {}", id, new.user_id);
        Ok(id)
    }

    pub async fn update(&self, id: i64, update: ShiftUpdate) -> Result<(), ApiError> {
        let result = sqlx::query(
            "UPDATE shifts SET start_time = ?, end_time = ?, task_id = ?, notes = ?, status = ? \
             WHERE id = ?",
        )
        .bind(update.start_time)
        .bind(update.end_time)
        .bind(update.task_id)
        .bind(update.notes)
        .bind(update.status)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                ApiError::Conflict("User already has an open shift".into())
            } else if is_foreign_key_violation(&e) {
                ApiError::Validation("Unknown task".into())
            } else {
                ApiError::from(e)
            }
        })?;

        if result.rows_affected() == 0 {
            return Err(ApiError::NotFound("Shift not found".into()));
        }
        Ok(())
    }

    pub async fn delete(&self, id: i64) -> Result<(), ApiError> {
        let result = sqlx::query("DELETE FROM shifts WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(ApiError::NotFound("Shift not found".into()));
        }
        info!("Deleted shift {}", id);
        Ok(())
    }
}
