use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use crate::db;

pub async fn setup_pool() -> SqlitePool {
    let pool = db::memory_pool().await.expect("in-memory pool");
    db::init_db(&pool).await.expect("schema bootstrap");
    pool
}

pub async fn seed_user(pool: &SqlitePool, name: &str, email: &str, role: &str) -> i64 {
    sqlx::query("INSERT INTO users (name, email, password, role) VALUES (?, ?, 'not-a-real-hash', ?)")
        .bind(name)
        .bind(email)
        .bind(role)
        .execute(pool)
        .await
        .expect("seed user")
        .last_insert_rowid()
}

pub async fn seed_task(pool: &SqlitePool, name: &str) -> i64 {
    sqlx::query("INSERT INTO tasks (name, status) VALUES (?, 'active')")
        .bind(name)
        .execute(pool)
        .await
        .expect("seed task")
        .last_insert_rowid()
}

pub async fn seed_closed_shift(
    pool: &SqlitePool,
    user_id: i64,
    task_id: i64,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> i64 {
    sqlx::query(
        "INSERT INTO shifts (user_id, task_id, start_time, end_time, status) \
         VALUES (?, ?, ?, ?, 'pending')",
    )
    .bind(user_id)
    .bind(task_id)
    .bind(start)
    .bind(end)
    .execute(pool)
    .await
    .expect("seed closed shift")
    .last_insert_rowid()
}
