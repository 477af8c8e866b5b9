//! Opens the `SQLite` database and brings its schema up to date.

use std::str::FromStr;

use sqlx::SqlitePool;
use sqlx::sqlite::SqliteConnectOptions;

use crate::error::StorageError;

/// Settings needed to open the `SQLite` database.
pub struct Config {
    /// `SQLite` connection URL (e.g. `sqlite:dealflow.db` or `sqlite::memory:`).
    pub database_url: String,
}

impl Config {
    /// Pick the connection URL up from the environment.
    ///
    /// # Errors
    ///
    /// Returns an error if `DEALFLOW_DATABASE_URL` is not set.
    pub fn from_env() -> Result<Self, std::env::VarError> {
        Ok(Self {
            database_url: std::env::var("DEALFLOW_DATABASE_URL")?,
        })
    }

    /// Open the database described by this configuration.
    ///
    /// The file is created on first use, and any migrations not yet
    /// applied are run before the [`Database`] is handed back.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the connection or migrations fail.
    pub async fn build(self) -> Result<Database, StorageError> {
        Database::initialize(&self.database_url).await
    }
}

/// An open, fully migrated `SQLite` database.
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    async fn initialize(database_url: &str) -> Result<Self, StorageError> {
        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

        let pool = SqlitePool::connect_with(options).await?;

        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(Self { pool })
    }

    /// The connection pool the repositories run their queries through.
    #[must_use]
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}
