//! Database connection management

use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::{PgPool, SqlitePool};

use crate::config::DatabaseConfig;
use crate::database::repositories::{PostgresMeetingStore, SqliteMeetingStore};
use crate::database::store::MeetingStore;
use crate::utils::errors::MeetPollError;

/// Storage backend selected from the database URL scheme
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatabaseBackend {
    Postgres,
    Sqlite,
}

impl DatabaseBackend {
    pub fn from_url(url: &str) -> Self {
        if url.starts_with("postgres://") || url.starts_with("postgresql://") {
            DatabaseBackend::Postgres
        } else {
            DatabaseBackend::Sqlite
        }
    }
}

fn is_in_memory(url: &str) -> bool {
    url.contains(":memory:") || url.contains("mode=memory")
}

/// Connect to the configured database, run migrations and return the store
pub async fn connect_store(config: &DatabaseConfig) -> Result<Arc<dyn MeetingStore>, MeetPollError> {
    match DatabaseBackend::from_url(&config.url) {
        DatabaseBackend::Postgres => {
            let pool = create_postgres_pool(config).await?;
            run_postgres_migrations(&pool).await?;
            Ok(Arc::new(PostgresMeetingStore::new(pool)))
        }
        DatabaseBackend::Sqlite => {
            let pool = create_sqlite_pool(config).await?;
            run_sqlite_migrations(&pool).await?;
            Ok(Arc::new(SqliteMeetingStore::new(pool)))
        }
    }
}

/// Create a new PostgreSQL connection pool
pub async fn create_postgres_pool(config: &DatabaseConfig) -> Result<PgPool, MeetPollError> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(Duration::from_secs(config.acquire_timeout_seconds))
        .idle_timeout(Some(Duration::from_secs(600)))
        .max_lifetime(Some(Duration::from_secs(1800)))
        .connect(&config.url)
        .await?;

    // Test the connection
    sqlx::query("SELECT 1")
        .execute(&pool)
        .await?;

    tracing::info!("PostgreSQL connection pool created successfully");
    Ok(pool)
}

/// Create a new SQLite connection pool.
///
/// In-memory databases live only as long as their connection, so they get
/// exactly one connection that is never recycled.
pub async fn create_sqlite_pool(config: &DatabaseConfig) -> Result<SqlitePool, MeetPollError> {
    let in_memory = is_in_memory(&config.url);

    let mut options = SqliteConnectOptions::from_str(&config.url)?
        .create_if_missing(true)
        .foreign_keys(true)
        .busy_timeout(Duration::from_secs(5));
    if !in_memory {
        options = options.journal_mode(SqliteJournalMode::Wal);
    }

    let pool_options = if in_memory {
        SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
    };

    let pool = pool_options
        .acquire_timeout(Duration::from_secs(config.acquire_timeout_seconds))
        .connect_with(options)
        .await?;

    tracing::info!(in_memory = in_memory, "SQLite connection pool created successfully");
    Ok(pool)
}

/// Run PostgreSQL migrations
pub async fn run_postgres_migrations(pool: &PgPool) -> Result<(), MeetPollError> {
    tracing::info!("Running PostgreSQL migrations...");

    sqlx::migrate!("./migrations/postgres")
        .run(pool)
        .await?;

    tracing::info!("Database migrations completed successfully");
    Ok(())
}

/// Run SQLite migrations
pub async fn run_sqlite_migrations(pool: &SqlitePool) -> Result<(), MeetPollError> {
    tracing::info!("Running SQLite migrations...");

    sqlx::migrate!("./migrations/sqlite")
        .run(pool)
        .await?;

    tracing::info!("Database migrations completed successfully");
    Ok(())
}
