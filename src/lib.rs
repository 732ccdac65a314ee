#![doc = "The `todo_manager` library crate."]
#![doc = ""]
#![doc = "Domain models, JWT authentication, per-user task services, the storage layer"]
#![doc = "(PostgreSQL or in-memory) and the HTTP route table of the todo manager backend."]
#![doc = "The binary (`main.rs`) only reads configuration and starts the server."]

pub mod app;
pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;
pub mod store;

pub use app::AppServices;
pub use config::Config;
pub use error::AppError;
