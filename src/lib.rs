pub mod bootstrap;
pub mod config;
pub mod database;
pub mod error;
pub mod handlers;
pub mod mapping;
pub mod models;
pub mod queries;
pub mod routes;
pub mod services;
pub mod state;
pub mod telemetry;
pub mod validation;

pub use config::Config;
pub use database::{DbConn, DbPool};
pub use error::{Error, Result};
pub use state::AppState;

/// Load configuration from environment variables
pub fn load_config() -> Result<Config> {
    Ok(Config::load()?)
}
