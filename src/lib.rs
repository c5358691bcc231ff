#![doc = "The `taskvault` library crate."]
#![doc = ""]
#![doc = "Bearer-token authentication, owner-scoped task storage, routing and error"]
#![doc = "handling for the TaskVault service. The binary (`main.rs`) only loads configuration,"]
#![doc = "picks a repository and runs the HTTP server."]

pub mod auth;
pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod repository;
pub mod routes;
pub mod state;
pub mod tasks;

pub use crate::error::AppError;
pub use crate::state::AppState;
