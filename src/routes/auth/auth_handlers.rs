use actix_web::{web, HttpResponse};
use bcrypt::verify;
use log::info;
use sqlx::SqlitePool;

use super::auth_models::{LoginRequest, LoginResponse};
use crate::auth::{issue_token, AuthUser};
use crate::errors::ApiError;
use crate::services::users::UserService;

pub async fn login(
    pool: web::Data<SqlitePool>,
    req: web::Json<LoginRequest>,
) -> Result<HttpResponse, ApiError> {
    if req.email.is_empty() || req.password.is_empty() {
        return Err(ApiError::Validation("Email and password are required".into()));
    }

    let service = UserService::new(pool.get_ref().clone());
    let user = service
        .find_by_email(&req.email)
        .await?
        .ok_or_else(|| ApiError::Unauthorized("Invalid credentials".into()))?;

    if user.status != "active" {
        return Err(ApiError::Forbidden("Account is inactive".into()));
    }

    let valid = verify(&req.password, &user.password)
        .map_err(|_| ApiError::Unauthorized("Invalid credentials".into()))?;
    if !valid {
        info!("Invalid password for {}", req.email);
        return Err(ApiError::Unauthorized("Invalid credentials".into()));
    }

    let token = issue_token(user.id, &user.role)?;
    info!("User {} logged in", user.id);
    Ok(HttpResponse::Ok().json(LoginResponse { token, user }))
}

pub async fn me(pool: web::Data<SqlitePool>, auth: AuthUser) -> Result<HttpResponse, ApiError> {
    let user = UserService::new(pool.get_ref().clone()).get(auth.id).await?;
    Ok(HttpResponse::Ok().json(user))
}
