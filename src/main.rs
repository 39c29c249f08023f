use citas::{AppState, bootstrap, database, load_config, routes, telemetry};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    telemetry::init_tracing();

    let config = load_config()?;
    tracing::info!("Loaded configuration:\n{}", config);

    let pool = database::connect(&config.database).await?;
    database::run_migrations(&pool).await?;

    {
        let mut conn = pool.acquire().await?;
        bootstrap::seed_admin(&mut conn, &config.bootstrap).await?;
    }

    let app = routes::router(AppState::new(pool));
    let listener = TcpListener::bind(config.server.bind_address()).await?;
    tracing::info!(address = %config.server.bind_address(), "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
