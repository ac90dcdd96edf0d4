use diesel::connection::SimpleConnection;
use diesel::r2d2::{self, ConnectionManager, CustomizeConnection, Pool, PooledConnection};
use diesel::sqlite::SqliteConnection;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use std::sync::Arc;
use thiserror::Error;

/// Type alias for SQLite connection pool
pub type SqlitePool = Pool<ConnectionManager<SqliteConnection>>;

/// Type alias for pooled connection
pub type SqlitePooledConnection = PooledConnection<ConnectionManager<SqliteConnection>>;

/// Schema migrations compiled into the binary
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Shared handle to the station database pool
///
/// Built once at process start and handed to every repository.
#[derive(Clone)]
pub struct DatabasePool {
    pool: Arc<SqlitePool>,
}

impl DatabasePool {
    /// Wrap an existing pool
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            pool: Arc::new(pool),
        }
    }

    /// Get a connection from the pool
    pub fn get_conn(&self) -> Result<SqlitePooledConnection, DatabaseError> {
        self.pool
            .get()
            .map_err(|e| DatabaseError::ConnectionPoolError(e.to_string()))
    }

    /// Apply any pending embedded migrations
    pub fn run_migrations(&self) -> Result<usize, DatabaseError> {
        let mut conn = self.get_conn()?;
        let applied = conn
            .run_pending_migrations(MIGRATIONS)
            .map_err(|e| DatabaseError::MigrationError(e.to_string()))?;

        for version in &applied {
            tracing::info!("Applied migration {}", version);
        }

        Ok(applied.len())
    }
}

/// Database-related errors
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Connection pool error: {0}")]
    ConnectionPoolError(String),

    #[error("Database query error: {0}")]
    QueryError(String),

    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Migration error: {0}")]
    MigrationError(String),

    #[error("Diesel error: {0}")]
    DieselError(#[from] diesel::result::Error),
}

/// Per-connection SQLite settings
///
/// SQLite leaves foreign key enforcement off unless every connection asks for it.
#[derive(Debug, Clone, Copy)]
struct SqliteConnectionOptions {
    busy_timeout_ms: u32,
}

impl CustomizeConnection<SqliteConnection, r2d2::Error> for SqliteConnectionOptions {
    fn on_acquire(&self, conn: &mut SqliteConnection) -> Result<(), r2d2::Error> {
        conn.batch_execute(&format!(
            "PRAGMA foreign_keys = ON; PRAGMA busy_timeout = {};",
            self.busy_timeout_ms
        ))
        .map_err(r2d2::Error::QueryError)
    }
}

/// Establish the connection pool for the station database
///
/// # Arguments
/// * `database_url` - SQLite file path (a leading `file:` is accepted)
/// * `pool_size` - Maximum number of pooled connections
///
/// # Returns
/// * `Result<DatabasePool, DatabaseError>` - Database pool or error
pub fn establish_connection_pool(
    database_url: &str,
    pool_size: u32,
) -> Result<DatabasePool, DatabaseError> {
    let database_url = database_url.strip_prefix("file:").unwrap_or(database_url);
    tracing::info!("Establishing database connection pool for {}", database_url);

    let manager = ConnectionManager::<SqliteConnection>::new(database_url);
    let pool = r2d2::Pool::builder()
        .max_size(pool_size)
        .connection_customizer(Box::new(SqliteConnectionOptions {
            busy_timeout_ms: 5_000,
        }))
        .build(manager)
        .map_err(|e| DatabaseError::ConnectionPoolError(e.to_string()))?;

    tracing::info!("Database pool created with max size: {}", pool_size);

    // Test connection
    let _ = pool
        .get()
        .map_err(|e| DatabaseError::ConnectionFailed(e.to_string()))?;

    tracing::info!("Database connection successful");

    Ok(DatabasePool::new(pool))
}
