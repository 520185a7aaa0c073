use actix_web::{test, web, App};
use chrono::{Duration, Utc};
use sqlx::SqlitePool;

use timeclock_backend::routes;
use timeclock_backend::services::users::{NewUser, UserService};
use timeclock_backend::db;

async fn seed_pool() -> SqlitePool {
    let pool = db::memory_pool().await.expect("in-memory pool");
    db::init_db(&pool).await.expect("schema bootstrap");
    pool
}

async fn seed_user(pool: &SqlitePool, email: &str, role: &str) -> i64 {
    UserService::new(pool.clone())
        .create(NewUser {
            name: email.split('@').next().unwrap_or("user").to_string(),
            email: email.to_string(),
            password: "secret".to_string(),
            role: role.to_string(),
            status: None,
            employee_code: None,
            birthdate: None,
        })
        .await
        .expect("seed user")
}

async fn seed_task(pool: &SqlitePool, name: &str) -> i64 {
    sqlx::query("INSERT INTO tasks (name, status) VALUES (?, 'active')")
        .bind(name)
        .execute(pool)
        .await
        .expect("seed task")
        .last_insert_rowid()
}

macro_rules! app {
    ($pool:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($pool.clone()))
                .configure(routes::routes::auth_configure)
                .configure(routes::routes::users_configure)
                .configure(routes::routes::tasks_configure)
                .configure(routes::routes::shifts_configure)
                .configure(routes::routes::admin_configure),
        )
        .await
    };
}

macro_rules! login {
    ($app:expr, $email:expr) => {{
        let req = test::TestRequest::post()
            .uri("/api/auth/login")
            .set_json(serde_json::json!({ "email": $email, "password": "secret" }))
            .to_request();
        let resp = test::call_service(&$app, req).await;
        assert_eq!(resp.status().as_u16(), 200, "login should succeed");
        let body: serde_json::Value = test::read_body_json(resp).await;
        body["token"].as_str().expect("token in response").to_string()
    }};
}

macro_rules! bearer {
    ($token:expr) => {
        ("Authorization", format!("Bearer {}", $token))
    };
}

#[actix_web::test]
async fn clock_cycle_over_http() {
    let pool = seed_pool().await;
    seed_user(&pool, "ada@example.com", "employee").await;
    let task = seed_task(&pool, "Support").await;
    let app = app!(pool);
    let token = login!(app, "ada@example.com");

    // No token, no service.
    let resp = test::call_service(
        &app,
        test::TestRequest::get().uri("/api/shifts/status").to_request(),
    )
    .await;
    assert_eq!(resp.status().as_u16(), 401);

    // Clock-in without a task is a validation error.
    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/shifts/clock-in")
            .insert_header(bearer!(token))
            .set_json(serde_json::json!({}))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status().as_u16(), 400);

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/shifts/clock-in")
            .insert_header(bearer!(token))
            .set_json(serde_json::json!({ "task_id": task, "notes": "morning" }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status().as_u16(), 201);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "pending");

    // Clocking in again conflicts.
    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/shifts/clock-in")
            .insert_header(bearer!(token))
            .set_json(serde_json::json!({ "task_id": task }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status().as_u16(), 409);

    // Status reflects the open shift.
    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/shifts/status")
            .insert_header(bearer!(token))
            .to_request(),
    )
    .await;
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["task_name"], "Support");
    assert!(body["end_time"].is_null());

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/shifts/clock-out")
            .insert_header(bearer!(token))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status().as_u16(), 200);

    // Closed again: status is null, clocking out again is a bad request.
    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/shifts/status")
            .insert_header(bearer!(token))
            .to_request(),
    )
    .await;
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert!(body.is_null());

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/shifts/clock-out")
            .insert_header(bearer!(token))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status().as_u16(), 400);

    // The cycle landed in history with the pagination envelope.
    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/shifts/my-history")
            .insert_header(bearer!(token))
            .to_request(),
    )
    .await;
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["pagination"]["total"], 1);
    assert_eq!(body["pagination"]["totalPages"], 1);
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
}

#[actix_web::test]
async fn admin_routes_reject_employees() {
    let pool = seed_pool().await;
    seed_user(&pool, "ada@example.com", "employee").await;
    seed_user(&pool, "boss@example.com", "admin").await;
    let app = app!(pool);

    let employee = login!(app, "ada@example.com");
    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/shifts")
            .insert_header(bearer!(employee))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status().as_u16(), 403);

    let admin = login!(app, "boss@example.com");
    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/shifts?sort_by=user_name&order=asc")
            .insert_header(bearer!(admin))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status().as_u16(), 200);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert!(body["data"].is_array());
    assert_eq!(body["pagination"]["page"], 1);
}

#[actix_web::test]
async fn change_request_flow_over_http() {
    let pool = seed_pool().await;
    let employee_id = seed_user(&pool, "ada@example.com", "employee").await;
    seed_user(&pool, "boss@example.com", "admin").await;
    let task = seed_task(&pool, "Support").await;
    let app = app!(pool);

    let admin = login!(app, "boss@example.com");
    let employee = login!(app, "ada@example.com");

    // Admin backfills a closed shift for the employee.
    let start = Utc::now() - Duration::days(1);
    let end = start + Duration::hours(8);
    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/shifts")
            .insert_header(bearer!(admin))
            .set_json(serde_json::json!({
                "user_id": employee_id,
                "task_id": task,
                "start_time": start.to_rfc3339(),
                "end_time": end.to_rfc3339(),
            }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status().as_u16(), 201);
    let body: serde_json::Value = test::read_body_json(resp).await;
    let shift_id = body["id"].as_i64().unwrap();

    // Employee proposes corrected times.
    let new_start = start + Duration::minutes(30);
    let new_end = end + Duration::minutes(30);
    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri(&format!("/api/shifts/{}/request-change", shift_id))
            .insert_header(bearer!(employee))
            .set_json(serde_json::json!({
                "new_start_time": new_start.to_rfc3339(),
                "new_end_time": new_end.to_rfc3339(),
                "reason": "forgot to clock in",
            }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status().as_u16(), 201);
    let body: serde_json::Value = test::read_body_json(resp).await;
    let request_id = body["id"].as_i64().unwrap();

    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/admin/change-requests")
            .insert_header(bearer!(admin))
            .to_request(),
    )
    .await;
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["reason"], "forgot to clock in");

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri(&format!("/api/admin/change-requests/{}/approve", request_id))
            .insert_header(bearer!(admin))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status().as_u16(), 200);

    let (status,): (String,) = sqlx::query_as("SELECT status FROM shifts WHERE id = ?")
        .bind(shift_id)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(status, "edited");

    // Approving twice finds no pending request left in the admin view.
    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/admin/change-requests")
            .insert_header(bearer!(admin))
            .to_request(),
    )
    .await;
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body.as_array().unwrap().len(), 0);
}

#[actix_web::test]
async fn referenced_task_cannot_be_deleted_over_http() {
    let pool = seed_pool().await;
    let employee_id = seed_user(&pool, "ada@example.com", "employee").await;
    seed_user(&pool, "boss@example.com", "admin").await;
    let task = seed_task(&pool, "Support").await;

    let start = Utc::now() - Duration::hours(2);
    sqlx::query(
        "INSERT INTO shifts (user_id, task_id, start_time, end_time, status) \
         VALUES (?, ?, ?, ?, 'approved')",
    )
    .bind(employee_id)
    .bind(task)
    .bind(start)
    .bind(start + Duration::hours(1))
    .execute(&pool)
    .await
    .unwrap();

    let app = app!(pool);
    let admin = login!(app, "boss@example.com");
    let resp = test::call_service(
        &app,
        test::TestRequest::delete()
            .uri(&format!("/api/tasks/{}", task))
            .insert_header(bearer!(admin))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status().as_u16(), 400);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert!(body["message"]
        .as_str()
        .unwrap()
        .contains("deactivate it instead"));

    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/tasks")
            .insert_header(bearer!(admin))
            .to_request(),
    )
    .await;
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body.as_array().unwrap().len(), 1);
}
