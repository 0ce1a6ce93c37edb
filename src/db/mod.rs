pub mod memory;
pub mod repository;

use std::str::FromStr;

use sqlx::SqlitePool;
use sqlx::migrate::Migrator;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tracing::info;

use crate::config::AppConfig;
use crate::error::StartupError;

pub use memory::InMemoryTaskRepository;
pub use repository::{SqliteTaskRepository, TaskRepository};

pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Opens the pool described by `config`; SQLite files are created on first use.
pub async fn connect(config: &AppConfig) -> Result<SqlitePool, StartupError> {
    let options = SqliteConnectOptions::from_str(&config.database_url)
        .map_err(StartupError::Connect)?
        .create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .connect_with(options)
        .await
        .map_err(StartupError::Connect)?;

    info!("database connection established");
    Ok(pool)
}

pub async fn run_migrations(pool: &SqlitePool) -> Result<(), StartupError> {
    MIGRATOR.run(pool).await?;
    info!("database migration completed");
    Ok(())
}
