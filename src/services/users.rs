use bcrypt::{hash, DEFAULT_COST};
use log::info;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

use crate::errors::{is_foreign_key_violation, is_unique_violation, ApiError};
use crate::models::user::{User, UserSummary};

/// Employee directory. Self-service updates may not touch role or status;
/// those columns only move through admin calls.
pub struct UserService {
    pool: SqlitePool,
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: String,
    pub status: Option<String>,
    pub employee_code: Option<String>,
    pub birthdate: Option<String>,
}

#[derive(Debug, Clone)]
pub struct UserUpdate {
    pub name: String,
    pub email: String,
    pub password: Option<String>,
    pub role: Option<String>,
    pub status: Option<String>,
    pub employee_code: Option<String>,
    pub birthdate: Option<String>,
}

fn hash_password(password: &str) -> Result<String, ApiError> {
    hash(password, DEFAULT_COST)
        .map_err(|e| ApiError::Internal(format!("Failed to hash password: {}", e)))
}

impl UserService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> Result<Vec<UserSummary>, ApiError> {
        let users = sqlx::query_as::<_, UserSummary>(
            "SELECT u.id, u.name, u.email, u.role, u.status, u.employee_code, u.birthdate, \
             EXISTS (SELECT 1 FROM shifts s WHERE s.user_id = u.id AND s.end_time IS NULL) \
                 AS is_clocked_in \
             FROM users u",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(users)
    }

    pub async fn get(&self, id: i64) -> Result<User, ApiError> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| ApiError::NotFound("User not found".into()))
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, ApiError> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = ?")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    pub async fn create(&self, new: NewUser) -> Result<i64, ApiError> {
        let hashed = hash_password(&new.password)?;
        let result = sqlx::query(
            "INSERT INTO users (name, email, password, role, status, employee_code, birthdate) \
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&new.name)
        .bind(&new.email)
        .bind(hashed)
        .bind(&new.role)
        .bind(new.status.as_deref().unwrap_or("active"))
        .bind(&new.employee_code)
        .bind(&new.birthdate)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                ApiError::Validation("Email already exists".into())
            } else {
                ApiError::from(e)
            }
        })?;

        let id = result.last_insert_rowid();
        info!("Created user {} ({})", id, new.email);
        Ok(id)
    }

    pub async fn update(&self, id: i64, changes: UserUpdate, as_admin: bool) -> Result<(), ApiError> {
        let mut qb = QueryBuilder::<Sqlite>::new("UPDATE users SET name = ");
        qb.push_bind(changes.name);
        qb.push(", email = ").push_bind(changes.email);
        qb.push(", employee_code = ").push_bind(changes.employee_code);
        qb.push(", birthdate = ").push_bind(changes.birthdate);

        // Role and status are admin-only; self-updates silently keep the
        // current values.
        if as_admin {
            if let Some(role) = changes.role {
                qb.push(", role = ").push_bind(role);
            }
            if let Some(status) = changes.status {
                qb.push(", status = ").push_bind(status);
            }
        }
        if let Some(password) = changes.password {
            qb.push(", password = ").push_bind(hash_password(&password)?);
        }
        qb.push(" WHERE id = ").push_bind(id);

        let result = qb.build().execute(&self.pool).await.map_err(|e| {
            if is_unique_violation(&e) {
                ApiError::Validation("Email already exists".into())
            } else {
                ApiError::from(e)
            }
        })?;
        if result.rows_affected() == 0 {
            return Err(ApiError::NotFound("User not found".into()));
        }
        Ok(())
    }

    pub async fn delete(&self, id: i64) -> Result<(), ApiError> {
        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                if is_foreign_key_violation(&e) {
                    ApiError::Validation("Cannot delete user with recorded shifts".into())
                } else {
                    ApiError::from(e)
                }
            })?;
        if result.rows_affected() == 0 {
            return Err(ApiError::NotFound("User not found".into()));
        }
        info!("Deleted user {}", id);
        Ok(())
    }
}
