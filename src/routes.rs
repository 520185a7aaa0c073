pub mod admin;
pub mod auth;
pub mod routes;
pub mod shifts;
pub mod tasks;
pub mod users;
