use std::str::FromStr;

use derivative::Derivative;
use serde::Deserialize;
use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    SqlitePool,
};

pub mod books;

fn default_max_connections() -> u32 {
    5
}

#[derive(Derivative, Clone, Deserialize)]
#[derivative(Debug)]
pub struct DatabaseConfig {
    /// Connection url, e.g. `sqlite://books.db?mode=rwc`.
    #[derivative(Debug(format_with = "crate::utils::mask_fmt"))]
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

impl DatabaseConfig {
    pub fn new(url: String, max_connections: u32) -> Self {
        Self {
            url,
            max_connections,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DatabaseError {
    #[error("Invalid database url: {0}")]
    Url(#[source] sqlx::Error),
    #[error("Failed to connect to database: {0}")]
    Connect(#[source] sqlx::Error),
    #[error("Failed to run migrations: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),
}

pub struct Database;

impl Database {
    /// Opens a connection pool and brings the schema up to date.
    #[tracing::instrument(name = "database_connect", skip_all, fields(max_connections = config.max_connections))]
    pub async fn connect(config: &DatabaseConfig) -> Result<SqlitePool, DatabaseError> {
        let options = SqliteConnectOptions::from_str(&config.url).map_err(DatabaseError::Url)?;

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .connect_with(options)
            .await
            .map_err(DatabaseError::Connect)?;

        tracing::debug!("Connected");

        sqlx::migrate!("./migrations").run(&pool).await?;

        tracing::debug!("Migrations applied");

        Ok(pool)
    }
}
