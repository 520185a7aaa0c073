use actix_web::{web, App, HttpResponse, HttpServer};
use dotenv::dotenv;
use log::info;
use std::env;

use timeclock_backend::{db, routes};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::init();

    let database_url =
        env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://timeclock.sqlite".to_string());
    let pool = db::connect(&database_url)
        .await
        .expect("Failed to create pool");
    db::init_db(&pool)
        .await
        .expect("Failed to initialize database schema");

    let server_address = env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());
    info!("Server running at http://{}", server_address);

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(pool.clone()))
            .route(
                "/",
                web::get().to(|| async { HttpResponse::Ok().body("Time Tracking API is running") }),
            )
            .configure(routes::routes::auth_configure)
            .configure(routes::routes::users_configure)
            .configure(routes::routes::tasks_configure)
            .configure(routes::routes::shifts_configure)
            .configure(routes::routes::admin_configure)
    })
    .bind(server_address)?
    .run()
    .await
}
