//! Database connection and schema setup

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::time::Duration;
use tracing::info;

use crate::config::DatabaseConfig;
use crate::domain::DomainError;

/// Connect to PostgreSQL using the configured URL and pool limits
pub async fn connect(config: &DatabaseConfig) -> Result<PgPool, DomainError> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(config.connect_timeout_secs))
        .connect(&config.url)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to connect to PostgreSQL: {}", e)))?;

    info!("PostgreSQL connection established");

    Ok(pool)
}

/// Create the users table and its indexes if they do not exist yet.
///
/// The email uniqueness constraint is a partial index over non-deleted rows:
/// it is the authoritative duplicate check under concurrent creates, and it
/// frees the address once a user is soft-deleted.
pub async fn run_migrations(pool: &PgPool) -> Result<(), DomainError> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id BIGSERIAL PRIMARY KEY,
            name TEXT NOT NULL,
            email TEXT NOT NULL,
            phone TEXT,
            active BOOLEAN NOT NULL DEFAULT TRUE,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            deleted_at TIMESTAMPTZ
        )
        "#,
    )
    .execute(pool)
    .await
    .map_err(|e| DomainError::storage(format!("Failed to create users table: {}", e)))?;

    sqlx::query(
        r#"
        CREATE UNIQUE INDEX IF NOT EXISTS users_email_unique
        ON users (email)
        WHERE deleted_at IS NULL
        "#,
    )
    .execute(pool)
    .await
    .map_err(|e| DomainError::storage(format!("Failed to create email index: {}", e)))?;

    sqlx::query(
        r#"
        CREATE INDEX IF NOT EXISTS users_created_at_idx
        ON users (created_at DESC)
        "#,
    )
    .execute(pool)
    .await
    .map_err(|e| DomainError::storage(format!("Failed to create listing index: {}", e)))?;

    info!("Database migrations completed");

    Ok(())
}
