use actix_web::{web, HttpResponse};
use sqlx::SqlitePool;

use super::shift_models::{
    ClockInRequest, ClockInResponse, ClockOutResponse, CreateShiftRequest, CreatedResponse,
    HistoryQuery, ListShiftsQuery, MessageResponse, RequestChangeRequest, UpdateShiftRequest,
};
use crate::auth::{AdminUser, AuthUser};
use crate::errors::ApiError;
use crate::services::change_requests::ChangeRequestService;
use crate::services::shift_admin::{
    parse_date_filter, NewShift, ShiftAdminService, ShiftFilter, ShiftUpdate, SortParams,
};
use crate::services::shift_lifecycle::ShiftLifecycleService;
use crate::services::PageParams;

pub async fn clock_in(
    pool: web::Data<SqlitePool>,
    user: AuthUser,
    req: web::Json<ClockInRequest>,
) -> Result<HttpResponse, ApiError> {
    let task_id = req
        .task_id
        .ok_or_else(|| ApiError::Validation("Task selection is mandatory".into()))?;

    let service = ShiftLifecycleService::new(pool.get_ref().clone());
    let clocked = service.clock_in(user.id, task_id, req.notes.as_deref()).await?;
    Ok(HttpResponse::Created().json(ClockInResponse {
        id: clocked.id,
        start_time: clocked.start_time,
        status: clocked.status,
    }))
}

pub async fn clock_out(
    pool: web::Data<SqlitePool>,
    user: AuthUser,
) -> Result<HttpResponse, ApiError> {
    let end_time = ShiftLifecycleService::new(pool.get_ref().clone())
        .clock_out(user.id)
        .await?;
    Ok(HttpResponse::Ok().json(ClockOutResponse {
        message: "Clocked out successfully".into(),
        end_time,
    }))
}

pub async fn status(
    pool: web::Data<SqlitePool>,
    user: AuthUser,
) -> Result<HttpResponse, ApiError> {
    let shift = ShiftLifecycleService::new(pool.get_ref().clone())
        .current_status(user.id)
        .await?;
    Ok(HttpResponse::Ok().json(shift))
}

pub async fn my_history(
    pool: web::Data<SqlitePool>,
    user: AuthUser,
    query: web::Query<HistoryQuery>,
) -> Result<HttpResponse, ApiError> {
    let page = ShiftLifecycleService::new(pool.get_ref().clone())
        .history(user.id, PageParams::new(query.page, query.limit))
        .await?;
    Ok(HttpResponse::Ok().json(page))
}

pub async fn list_shifts(
    pool: web::Data<SqlitePool>,
    _admin: AdminUser,
    query: web::Query<ListShiftsQuery>,
) -> Result<HttpResponse, ApiError> {
    let filter = ShiftFilter {
        user_id: query.user_id,
        start_date: query
            .start_date
            .as_deref()
            .map(|v| parse_date_filter(v, false))
            .transpose()?,
        end_date: query
            .end_date
            .as_deref()
            .map(|v| parse_date_filter(v, true))
            .transpose()?,
    };
    let sort = SortParams {
        sort_by: query.sort_by.clone(),
        order: query.order.clone(),
    };

    let page = ShiftAdminService::new(pool.get_ref().clone())
        .list(&filter, &sort, PageParams::new(query.page, query.limit))
        .await?;
    Ok(HttpResponse::Ok().json(page))
}

pub async fn create_shift(
    pool: web::Data<SqlitePool>,
    _admin: AdminUser,
    req: web::Json<CreateShiftRequest>,
) -> Result<HttpResponse, ApiError> {
    let (user_id, task_id, start_time) = match (req.user_id, req.task_id, req.start_time) {
        (Some(u), Some(t), Some(s)) => (u, t, s),
        _ => {
            return Err(ApiError::Validation(
                "User, Task, and Start Time are required".into(),
            ))
        }
    };

    let id = ShiftAdminService::new(pool.get_ref().clone())
        .create(NewShift {
            user_id,
            task_id,
            start_time,
            end_time: req.end_time,
            notes: req.notes.clone(),
        })
        .await?;
    Ok(HttpResponse::Created().json(CreatedResponse {
        message: "Shift created successfully".into(),
        id,
    }))
}

pub async fn update_shift(
    pool: web::Data<SqlitePool>,
    _admin: AdminUser,
    path: web::Path<i64>,
    req: web::Json<UpdateShiftRequest>,
) -> Result<HttpResponse, ApiError> {
    let req = req.into_inner();
    ShiftAdminService::new(pool.get_ref().clone())
        .update(
            path.into_inner(),
            ShiftUpdate {
                start_time: req.start_time,
                end_time: req.end_time,
                task_id: req.task_id,
                notes: req.notes,
                status: req.status,
            },
        )
        .await?;
    Ok(HttpResponse::Ok().json(MessageResponse {
        message: "Shift updated successfully".into(),
    }))
}

pub async fn delete_shift(
    pool: web::Data<SqlitePool>,
    _admin: AdminUser,
    path: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
    ShiftAdminService::new(pool.get_ref().clone())
        .delete(path.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(MessageResponse {
        message: "Shift deleted successfully".into(),
    }))
}

pub async fn request_change(
    pool: web::Data<SqlitePool>,
    user: AuthUser,
    path: web::Path<i64>,
    req: web::Json<RequestChangeRequest>,
) -> Result<HttpResponse, ApiError> {
    let id = ChangeRequestService::new(pool.get_ref().clone())
        .submit(
            path.into_inner(),
            user.id,
            req.new_start_time,
            req.new_end_time,
            req.reason.as_deref(),
        )
        .await?;
    Ok(HttpResponse::Created().json(CreatedResponse {
        message: "Request submitted successfully".into(),
        id,
    }))
}
