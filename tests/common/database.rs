#![allow(dead_code)]

use citas::{DbPool, database, load_config};
use std::sync::Once;

static INIT: Once = Once::new();

/// Connects with the regular configuration and applies migrations.
pub async fn init_test_db() -> DbPool {
    INIT.call_once(|| {
        dotenvy::dotenv().ok();
    });

    let config = load_config().expect("Failed to load config");
    let pool = database::connect(&config.database)
        .await
        .expect("Failed to connect to database");

    database::run_migrations(&pool)
        .await
        .expect("Failed to run migrations");

    pool
}

/// LIKE patterns matching exactly this prefix's emails and names. `_` is
/// escaped so `test_a` never matches rows of `test_ab`.
fn cleanup_patterns(prefix: &str) -> (String, String) {
    let escaped = prefix.replace('_', "\\_");
    (format!("{}\\_%", escaped), format!("{} %", escaped))
}

/// Test database wrapper for test isolation
///
/// Every test owns a prefix `test_{test_name}`. Users it creates carry the
/// prefix in their email and services carry it in their name, so cleanup
/// (which cascades to professionals and appointments) never touches rows
/// of another test running in parallel.
///
/// # Example Usage:
/// ```rust
/// #[tokio::test]
/// async fn test_register_user_success() {
///     let test_db = TestDb::new("test_register_user_success").await;
///     let mut conn = test_db.get_connection().await;
/// }
/// ```
pub struct TestDb {
    pub pool: DbPool,
    test_prefix: String,
}

impl TestDb {
    pub async fn new(test_name: &str) -> Self {
        let pool = init_test_db().await;
        let test_prefix = format!("test_{}", test_name);

        // Handles leftovers from an earlier interrupted run
        Self::cleanup_prefix(&pool, &test_prefix).await;

        Self { pool, test_prefix }
    }

    pub async fn get_connection(&self) -> sqlx::pool::PoolConnection<sqlx::Postgres> {
        self.pool
            .acquire()
            .await
            .expect("Failed to get database connection")
    }

    pub fn test_prefix(&self) -> &str {
        &self.test_prefix
    }

    /// A unique display name under this test's prefix.
    pub fn name(&self, tag: &str) -> String {
        format!("{} {} {}", self.test_prefix, tag, nanoid::nanoid!(6))
    }

    /// A unique email under this test's prefix.
    pub fn email(&self, tag: &str) -> String {
        format!("{}_{}_{}@example.com", self.test_prefix, tag, nanoid::nanoid!(8))
            .to_lowercase()
    }

    async fn cleanup_prefix(pool: &DbPool, prefix: &str) {
        let (emails, names) = cleanup_patterns(prefix);
        sqlx::query("DELETE FROM usuario WHERE email LIKE $1")
            .bind(&emails)
            .execute(pool)
            .await
            .expect("Failed to cleanup test users");
        sqlx::query("DELETE FROM servicio WHERE nombre LIKE $1")
            .bind(&names)
            .execute(pool)
            .await
            .expect("Failed to cleanup test services");
    }

    pub async fn count_appointments_for_user(&self, user_id: i32) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM cita WHERE usuario_id = $1")
            .bind(user_id)
            .fetch_one(&self.pool)
            .await
    }

    pub async fn user_password_hash(&self, email: &str) -> Result<Option<String>, sqlx::Error> {
        sqlx::query_scalar("SELECT password FROM usuario WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await
    }
}

impl Drop for TestDb {
    fn drop(&mut self) {
        let pool = self.pool.clone();
        let (emails, names) = cleanup_patterns(&self.test_prefix);
        tokio::spawn(async move {
            let _ = sqlx::query("DELETE FROM usuario WHERE email LIKE $1")
                .bind(&emails)
                .execute(&pool)
                .await;
            let _ = sqlx::query("DELETE FROM servicio WHERE nombre LIKE $1")
                .bind(&names)
                .execute(&pool)
                .await;
        });
    }
}
