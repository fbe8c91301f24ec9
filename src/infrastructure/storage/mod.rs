//! SQLite-backed persistence: a session factory built once at startup and
//! scoped per-request sessions handed out from it.

pub mod schema;
pub mod users;

use crate::core::errors::AppError;
use sqlx::pool::PoolConnection;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::{Sqlite, SqliteConnection};
use std::str::FromStr;
use tracing::info;

static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");

/// Session factory over a connection pool. Cloning shares the pool.
#[derive(Clone, Debug)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Opens (creating if missing) the database at `database_url` and applies
    /// pending migrations.
    ///
    /// # Errors
    /// Returns an error if the URL is malformed, the database cannot be opened,
    /// or a migration fails.
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, AppError> {
        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await?;
        Self::from_pool(pool).await
    }

    /// Private in-memory database. Held on a single connection that never
    /// expires, since the data lives only as long as that connection.
    pub async fn in_memory() -> Result<Self, AppError> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?;
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;
        Self::from_pool(pool).await
    }

    async fn from_pool(pool: SqlitePool) -> Result<Self, AppError> {
        MIGRATOR.run(&pool).await?;
        info!("database migrations applied");
        Ok(Self { pool })
    }

    /// Acquires a session bound to one pooled connection. The connection goes
    /// back to the pool when the session is dropped.
    pub async fn session(&self) -> Result<Session, AppError> {
        let conn = self.pool.acquire().await?;
        Ok(Session { conn })
    }

    /// Waits for checked-out sessions to be returned, then closes the pool.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

/// Exclusive, request-scoped handle to the store.
pub struct Session {
    conn: PoolConnection<Sqlite>,
}

impl Session {
    pub(crate) fn conn(&mut self) -> &mut SqliteConnection {
        &mut self.conn
    }
}
