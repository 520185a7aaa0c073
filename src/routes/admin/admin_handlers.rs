use actix_web::{web, HttpResponse};
use sqlx::SqlitePool;

use crate::auth::AdminUser;
use crate::errors::ApiError;
use crate::routes::shifts::shift_models::MessageResponse;
use crate::services::change_requests::ChangeRequestService;

pub async fn list_change_requests(
    pool: web::Data<SqlitePool>,
    _admin: AdminUser,
) -> Result<HttpResponse, ApiError> {
    let requests = ChangeRequestService::new(pool.get_ref().clone())
        .list_pending()
        .await?;
    Ok(HttpResponse::Ok().json(requests))
}

pub async fn approve_change_request(
    pool: web::Data<SqlitePool>,
    _admin: AdminUser,
    path: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
    ChangeRequestService::new(pool.get_ref().clone())
        .approve(path.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(MessageResponse {
        message: "Request approved and shift updated".into(),
    }))
}

pub async fn reject_change_request(
    pool: web::Data<SqlitePool>,
    _admin: AdminUser,
    path: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
    ChangeRequestService::new(pool.get_ref().clone())
        .reject(path.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(MessageResponse {
        message: "Request rejected".into(),
    }))
}
