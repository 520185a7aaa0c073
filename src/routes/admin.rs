pub mod admin_handlers;
