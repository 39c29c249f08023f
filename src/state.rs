use crate::{
    database::DbPool,
    error::{Error, Result},
};
use sqlx::{pool::PoolConnection, Postgres};

/// Application state shared across all HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool for accessing the database
    pub pool: DbPool,
}

impl AppState {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Acquires a pooled connection for one request.
    pub async fn connection(&self) -> Result<PoolConnection<Postgres>> {
        self.pool
            .acquire()
            .await
            .map_err(|e| Error::Internal(format!("Failed to acquire database connection: {}", e)))
    }
}
