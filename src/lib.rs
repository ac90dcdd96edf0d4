// Library Crate Root
// lib.rs

// The server binary and the tools under src/bin import through here
pub mod api;
pub mod client;
pub mod config;
pub mod database;
pub mod telemetry;
pub mod utils;

// pub use = re-export at crate root
pub use api::{create_router, ApiError, AppState};
pub use config::{load_dotenv, AppConfig, ConfigError};
pub use database::{establish_connection_pool, DatabaseError, DatabasePool};
