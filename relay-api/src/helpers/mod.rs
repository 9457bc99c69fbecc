pub mod database;
pub mod webhooks;
