use actix_web::{web, HttpResponse};
use sqlx::SqlitePool;

use super::task_models::{CreateTaskRequest, UpdateTaskRequest};
use crate::auth::{AdminUser, AuthUser};
use crate::errors::ApiError;
use crate::routes::shifts::shift_models::MessageResponse;
use crate::services::tasks::TaskService;

pub async fn list_tasks(
    pool: web::Data<SqlitePool>,
    user: AuthUser,
) -> Result<HttpResponse, ApiError> {
    let tasks = TaskService::new(pool.get_ref().clone())
        .list(user.is_admin())
        .await?;
    Ok(HttpResponse::Ok().json(tasks))
}

pub async fn create_task(
    pool: web::Data<SqlitePool>,
    _admin: AdminUser,
    req: web::Json<CreateTaskRequest>,
) -> Result<HttpResponse, ApiError> {
    let name = match req.name.as_deref() {
        Some(name) if !name.is_empty() => name,
        _ => return Err(ApiError::Validation("Task name is required".into())),
    };

    let task = TaskService::new(pool.get_ref().clone())
        .create(name, req.description.as_deref(), req.status.as_deref())
        .await?;
    Ok(HttpResponse::Created().json(task))
}

pub async fn update_task(
    pool: web::Data<SqlitePool>,
    _admin: AdminUser,
    path: web::Path<i64>,
    req: web::Json<UpdateTaskRequest>,
) -> Result<HttpResponse, ApiError> {
    TaskService::new(pool.get_ref().clone())
        .update(
            path.into_inner(),
            &req.name,
            req.description.as_deref(),
            &req.status,
        )
        .await?;
    Ok(HttpResponse::Ok().json(MessageResponse {
        message: "Task updated successfully".into(),
    }))
}

pub async fn delete_task(
    pool: web::Data<SqlitePool>,
    _admin: AdminUser,
    path: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
    TaskService::new(pool.get_ref().clone())
        .delete(path.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(MessageResponse {
        message: "Task deleted successfully".into(),
    }))
}
