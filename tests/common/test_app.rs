#![allow(dead_code)]

use citas::{AppState, routes};
use reqwest::Client;
use tokio::net::TcpListener;

use crate::common::TestDb;

/// HTTP test application wrapper
///
/// Serves the full router on a random port against the test database.
/// Each test gets its own server instance to allow parallel test execution.
pub struct TestApp {
    /// Server base URL (e.g., "http://127.0.0.1:54321")
    pub address: String,
    pub client: Client,
    pub db: TestDb,
}

impl TestApp {
    pub async fn new(test_name: &str) -> Self {
        let db = TestDb::new(test_name).await;
        let app = routes::router(AppState::new(db.pool.clone()));

        // Bind to random port (port 0 tells OS to assign available port)
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{port}");

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self { address, client, db }
    }

    /// Get the full URL for an API endpoint
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }
}
