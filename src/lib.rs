//! User Service API
//!
//! A single-resource CRUD service demonstrating dependency-inverted layering:
//! - Domain: the user entity, its validation, and the repository contract
//! - Infrastructure: the user service plus in-memory and PostgreSQL repositories
//! - API: axum handlers translating HTTP to service calls and back

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use tracing::info;

use api::state::{AppState, UserServiceTrait};
use config::StorageBackend;
use infrastructure::database;
use infrastructure::user::{InMemoryUserRepository, PostgresUserRepository, UserService};

/// Create the application state with the configured storage backend
pub async fn create_app_state(config: &AppConfig) -> anyhow::Result<AppState> {
    info!("Storage backend: {:?}", config.storage.backend);

    let user_service: Arc<dyn UserServiceTrait> = match config.storage.backend {
        StorageBackend::Postgres => {
            // DATABASE_URL wins over the configured URL when present
            let mut database_config = config.database.clone();
            if let Ok(url) = std::env::var("DATABASE_URL") {
                database_config.url = url;
            }

            info!("Connecting to PostgreSQL...");
            let pool = database::connect(&database_config).await?;
            database::run_migrations(&pool).await?;

            let repository = Arc::new(PostgresUserRepository::new(pool));
            Arc::new(UserService::new(repository))
        }
        StorageBackend::Memory => {
            let repository = Arc::new(InMemoryUserRepository::new());
            Arc::new(UserService::new(repository))
        }
    };

    Ok(AppState::new(user_service))
}
