use actix_web::web;

use super::admin::admin_handlers;
use super::auth::auth_handlers;
use super::shifts::shift_handlers;
use super::tasks::task_handlers;
use super::users::user_handlers;

pub fn auth_configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/auth")
            .route("/login", web::post().to(auth_handlers::login))
            .route("/me", web::get().to(auth_handlers::me)),
    );
}

pub fn users_configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/users")
            .route("", web::get().to(user_handlers::list_users))
            .route("", web::post().to(user_handlers::create_user))
            .route("/{id}", web::get().to(user_handlers::get_user))
            .route("/{id}", web::put().to(user_handlers::update_user))
            .route("/{id}", web::delete().to(user_handlers::delete_user)),
    );
}

pub fn tasks_configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/tasks")
            .route("", web::get().to(task_handlers::list_tasks))
            .route("", web::post().to(task_handlers::create_task))
            .route("/{id}", web::put().to(task_handlers::update_task))
            .route("/{id}", web::delete().to(task_handlers::delete_task)),
    );
}

pub fn shifts_configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/shifts")
            .route("/clock-in", web::post().to(shift_handlers::clock_in))
            .route("/clock-out", web::post().to(shift_handlers::clock_out))
            .route("/status", web::get().to(shift_handlers::status))
            .route("/my-history", web::get().to(shift_handlers::my_history))
            .route("", web::get().to(shift_handlers::list_shifts))
            .route("", web::post().to(shift_handlers::create_shift))
            .route("/{id}", web::put().to(shift_handlers::update_shift))
            .route("/{id}", web::delete().to(shift_handlers::delete_shift))
            .route(
                "/{id}/request-change",
                web::post().to(shift_handlers::request_change),
            ),
    );
}

pub fn admin_configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/admin")
            .route(
                "/change-requests",
                web::get().to(admin_handlers::list_change_requests),
            )
            .route(
                "/change-requests/{id}/approve",
                web::post().to(admin_handlers::approve_change_request),
            )
            .route(
                "/change-requests/{id}/reject",
                web::post().to(admin_handlers::reject_change_request),
            ),
    );
}
