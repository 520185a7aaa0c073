use log::info;
use sqlx::SqlitePool;

use crate::errors::ApiError;
use crate::models::task::Task;

/// Task catalogue. Tasks referenced by any shift can only be deactivated,
/// never deleted.
pub struct TaskService {
    pool: SqlitePool,
}

impl TaskService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    // Admins see the full catalogue, employees only active tasks.
    pub async fn list(&self, include_inactive: bool) -> Result<Vec<Task>, ApiError> {
        let tasks = if include_inactive {
            sqlx::query_as::<_, Task>("SELECT * FROM tasks")
                .fetch_all(&self.pool)
                .await?
        } else {
            sqlx::query_as::<_, Task>("SELECT * FROM tasks WHERE status = 'active'")
                .fetch_all(&self.pool)
                .await?
        };
        Ok(tasks)
    }

    pub async fn create(
        &self,
        name: &str,
        description: Option<&str>,
        status: Option<&str>,
    ) -> Result<Task, ApiError> {
        let status = status.unwrap_or("active");
        let result =
            sqlx::query("INSERT INTO tasks (name, description, status) VALUES (?, ?, ?)")
                .bind(name)
                .bind(description)
                .bind(status)
                .execute(&self.pool)
                .await?;

        let id = result.last_insert_rowid();
        info!("Created task {} ({})", id, name);
        Ok(Task {
            id,
            name: name.to_string(),
            description: description.map(str::to_string),
            status: status.to_string(),
        })
    }

    pub async fn update(
        &self,
        id: i64,
        name: &str,
        description: Option<&str>,
        status: &str,
    ) -> Result<(), ApiError> {
        let result =
            sqlx::query("UPDATE tasks SET name = ?, description = ?, status = ? WHERE id = ?")
                .bind(name)
                .bind(description)
                .bind(status)
                .bind(id)
                .execute(&self.pool)
                .await?;
        if result.rows_affected() == 0 {
            return Err(ApiError::NotFound("Task not found".into()));
        }
        Ok(())
    }

    pub async fn delete(&self, id: i64) -> Result<(), ApiError> {
        let (referenced,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM shifts WHERE task_id = ?")
                .bind(id)
                .fetch_one(&self.pool)
                .await?;
        if referenced > 0 {
            return Err(ApiError::Validation(
                "Cannot delete task because it has associated shifts. Please deactivate it instead."
                    .into(),
            ));
        }

        let result = sqlx::query("DELETE FROM tasks WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(ApiError::NotFound("Task not found".into()));
        }
        info!("Deleted task {}", id);
        Ok(())
    }
}
