use secrecy::ExposeSecret;
use sqlx::postgres::PgPoolOptions;

use crate::{config::DatabaseConfig, error::Result};

/// Database connection pool type
pub type DbPool = sqlx::PgPool;

/// Connection type taken by every query. Pool connections and open
/// transactions both deref to it.
pub type DbConn = sqlx::PgConnection;

/// Opens a connection pool against the configured database.
pub async fn connect(config: &DatabaseConfig) -> Result<DbPool> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(config.connection_string().expose_secret())
        .await?;

    tracing::info!(
        host = %config.host,
        port = config.port,
        database = %config.database,
        "Connected to database"
    );

    Ok(pool)
}

/// Applies pending schema migrations from `./migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<()> {
    sqlx::migrate!("./migrations").run(pool).await?;
    tracing::info!("Database migrations applied");
    Ok(())
}

/// Round-trips a trivial query to confirm the store is reachable.
pub async fn ping(conn: &mut DbConn) -> Result<()> {
    sqlx::query("SELECT 1").execute(conn).await?;
    Ok(())
}
