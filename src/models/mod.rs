// src/models/mod.rs

pub mod shift;
pub mod shift_change_request;
pub mod task;
pub mod user;
