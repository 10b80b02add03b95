use anyhow::Result;
use parking_lot::RwLock;
use sea_orm::{ConnectionTrait, DatabaseConnection, SqlxPostgresConnector, Statement};
use sqlx::postgres::{PgPool, PgPoolOptions};
use std::{path::PathBuf, sync::Arc, time::Duration};
use tokio::{fs, task::JoinHandle};

use crate::{
    config::PoolSettings,
    error::{AppError, AppResult},
};

pub type DbPool = PgPool;
pub type OrmConn = DatabaseConnection;

/// Build a bounded Postgres pool and make sure it can reach the server.
pub async fn create_pool(database_url: &str, settings: &PoolSettings) -> Result<DbPool, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(settings.max_connections)
        .min_connections(settings.min_connections)
        .idle_timeout(Some(settings.idle_timeout))
        .max_lifetime(Some(settings.max_lifetime))
        .acquire_timeout(settings.acquire_timeout)
        .connect(database_url)
        .await?;

    sqlx::query("SELECT 1").execute(&pool).await?;
    Ok(pool)
}

/// Handle to the current connection pool.
///
/// Cloning is cheap. The pool behind it can be replaced wholesale by
/// [`Database::reconnect`]; requests that already cloned the old pool keep
/// using it until they finish.
#[derive(Clone)]
pub struct Database {
    pool: Arc<RwLock<DbPool>>,
    database_url: Arc<str>,
    settings: PoolSettings,
}

impl Database {
    pub async fn connect(database_url: &str, settings: PoolSettings) -> Result<Self, sqlx::Error> {
        let pool = create_pool(database_url, &settings).await?;
        Ok(Self::from_pool(pool, database_url, settings))
    }

    pub fn from_pool(pool: DbPool, database_url: &str, settings: PoolSettings) -> Self {
        Self {
            pool: Arc::new(RwLock::new(pool)),
            database_url: Arc::from(database_url),
            settings,
        }
    }

    pub fn pool(&self) -> DbPool {
        self.pool.read().clone()
    }

    /// SeaORM view over the current pool.
    pub fn orm(&self) -> OrmConn {
        SqlxPostgresConnector::from_sqlx_postgres_pool(self.pool())
    }

    pub async fn ping(&self) -> Result<(), sqlx::Error> {
        let pool = self.pool();
        match tokio::time::timeout(
            self.settings.acquire_timeout,
            sqlx::query("SELECT 1").execute(&pool),
        )
        .await
        {
            Ok(result) => result.map(|_| ()),
            Err(_) => Err(sqlx::Error::PoolTimedOut),
        }
    }

    /// Replace the whole pool with a freshly connected one.
    pub async fn reconnect(&self) -> AppResult<()> {
        let fresh = create_pool(&self.database_url, &self.settings)
            .await
            .map_err(AppError::ReconnectFailed)?;

        let old = std::mem::replace(&mut *self.pool.write(), fresh);
        tokio::spawn(async move { old.close().await });
        Ok(())
    }

    /// Periodically probe the database and rebuild the pool when the probe fails.
    pub fn spawn_liveness_probe(&self, every: Duration) -> JoinHandle<()> {
        let db = self.clone();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(every);
            ticker.tick().await;
            loop {
                ticker.tick().await;
                let Err(err) = db.ping().await else {
                    continue;
                };
                tracing::warn!(error = %err, "database connection lost");
                match db.reconnect().await {
                    Ok(()) => tracing::info!("reconnected to the database"),
                    Err(err) => tracing::error!(error = %err, "database reconnect failed"),
                }
            }
        })
    }
}

/// Minimal migration runner that executes SQL files in `migrations/` in filename order.
pub async fn run_migrations(conn: &OrmConn) -> Result<()> {
    let mut entries = fs::read_dir("migrations").await?;
    let mut files: Vec<PathBuf> = Vec::new();
    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "sql") {
            files.push(path);
        }
    }
    files.sort();

    let backend = conn.get_database_backend();
    for file in files {
        tracing::debug!(file = %file.display(), "applying migration");
        let sql = fs::read_to_string(&file).await?;
        // Postgres prepared statements cannot contain multiple commands,
        // so split the migration file and run each statement individually.
        for stmt in sql.split(';') {
            let stmt = stmt.trim();
            if stmt.is_empty() {
                continue;
            }
            let statement = format!("{stmt};");
            conn.execute(Statement::from_string(backend, statement))
                .await?;
        }
    }

    Ok(())
}
