use actix_web::{web, HttpResponse};
use sqlx::SqlitePool;

use super::user_models::{CreateUserRequest, UpdateUserRequest};
use crate::auth::{AdminUser, AuthUser};
use crate::errors::ApiError;
use crate::routes::shifts::shift_models::MessageResponse;
use crate::services::users::{NewUser, UserService, UserUpdate};

pub async fn list_users(
    pool: web::Data<SqlitePool>,
    _admin: AdminUser,
) -> Result<HttpResponse, ApiError> {
    let users = UserService::new(pool.get_ref().clone()).list().await?;
    Ok(HttpResponse::Ok().json(users))
}

pub async fn get_user(
    pool: web::Data<SqlitePool>,
    auth: AuthUser,
    path: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    if !auth.is_admin() && auth.id != id {
        return Err(ApiError::Forbidden("Forbidden".into()));
    }
    let user = UserService::new(pool.get_ref().clone()).get(id).await?;
    Ok(HttpResponse::Ok().json(user))
}

pub async fn create_user(
    pool: web::Data<SqlitePool>,
    _admin: AdminUser,
    req: web::Json<CreateUserRequest>,
) -> Result<HttpResponse, ApiError> {
    let req = req.into_inner();
    let (name, email, password, role) = match (req.name, req.email, req.password, req.role) {
        (Some(name), Some(email), Some(password), Some(role)) => (name, email, password, role),
        _ => return Err(ApiError::Validation("All fields are required".into())),
    };

    let id = UserService::new(pool.get_ref().clone())
        .create(NewUser {
            name,
            email,
            password,
            role,
            status: req.status,
            employee_code: req.employee_code,
            birthdate: req.birthdate,
        })
        .await?;
    Ok(HttpResponse::Created().json(serde_json::json!({ "id": id })))
}

pub async fn update_user(
    pool: web::Data<SqlitePool>,
    auth: AuthUser,
    path: web::Path<i64>,
    req: web::Json<UpdateUserRequest>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    if !auth.is_admin() && auth.id != id {
        return Err(ApiError::Forbidden("Forbidden".into()));
    }

    let req = req.into_inner();
    UserService::new(pool.get_ref().clone())
        .update(
            id,
            UserUpdate {
                name: req.name,
                email: req.email,
                password: req.password,
                role: req.role,
                status: req.status,
                employee_code: req.employee_code,
                birthdate: req.birthdate,
            },
            auth.is_admin(),
        )
        .await?;
    Ok(HttpResponse::Ok().json(MessageResponse {
        message: "User updated successfully".into(),
    }))
}

pub async fn delete_user(
    pool: web::Data<SqlitePool>,
    _admin: AdminUser,
    path: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
    UserService::new(pool.get_ref().clone())
        .delete(path.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(MessageResponse {
        message: "User deleted successfully".into(),
    }))
}
