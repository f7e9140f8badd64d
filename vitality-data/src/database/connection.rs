//! Database connection module for the Vitality application
//!
//! Provides a pooled SQLite database with an in-memory fallback when no
//! file path is configured or the file cannot be opened.

use std::env;
use std::sync::Arc;

use once_cell::sync::OnceCell;
use r2d2_sqlite::SqliteConnectionManager;
use thiserror::Error;
use tracing::{error, info, warn};

/// Global database pool used throughout the application
static DB_POOL: OnceCell<DatabasePool> = OnceCell::new();

/// Database error
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// SQLite error
    #[error("SQLite error: {0}")]
    SqliteError(#[from] rusqlite::Error),

    /// SQLite connection pool error
    #[error("SQLite connection pool error: {0}")]
    SqlitePoolError(#[from] r2d2::Error),

    /// Database pool already initialized
    #[error("Database pool is already initialized")]
    PoolAlreadyInitialized,

    /// Database pool not initialized
    #[error("Database pool is not initialized")]
    PoolNotInitialized,

    /// Migration error
    #[error("Database migration error: {0}")]
    MigrationError(String),
}

/// Database configuration
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Path to the SQLite database file; `None` selects an in-memory database
    pub sqlite_path: Option<String>,
    /// Maximum number of pooled connections
    pub max_connections: u32,
    /// Connection timeout in seconds
    pub timeout_seconds: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            sqlite_path: Some("./data/vitality.db".to_string()),
            max_connections: 10,
            timeout_seconds: 30,
        }
    }
}

impl DatabaseConfig {
    /// Create a new database configuration from environment variables
    pub fn from_env() -> Self {
        let sqlite_path = env::var("DB_SQLITE_PATH").ok();

        match sqlite_path {
            Some(ref path) => info!("Using SQLite database at: {}", path),
            None => info!("No DB_SQLITE_PATH provided, using an in-memory database"),
        }

        let max_connections = env::var("DB_MAX_CONNECTIONS")
            .ok()
            .and_then(|s| s.parse::<u32>().ok())
            .unwrap_or(10);

        let timeout_seconds = env::var("DB_TIMEOUT_SECONDS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(30);

        info!(
            "Database configuration: max_connections={}, timeout={}s",
            max_connections, timeout_seconds
        );

        DatabaseConfig {
            sqlite_path,
            max_connections,
            timeout_seconds,
        }
    }
}

/// SQLite connection pool
#[derive(Debug, Clone)]
pub struct DatabasePool {
    pool: Arc<r2d2::Pool<SqliteConnectionManager>>,
}

impl DatabasePool {
    /// Open a pool for the configured database and apply migrations
    pub fn open(config: &DatabaseConfig) -> Result<Self, DatabaseError> {
        let pool = match config.sqlite_path {
            Some(ref path) => Self::open_file(config, path)?,
            None => Self::open_in_memory(config)?,
        };

        let conn = pool.connection()?;
        crate::database::migrations::run_migrations(&conn)
            .map_err(DatabaseError::MigrationError)?;

        Ok(pool)
    }

    /// Check out a connection from the pool
    pub fn connection(
        &self,
    ) -> Result<r2d2::PooledConnection<SqliteConnectionManager>, DatabaseError> {
        self.pool.get().map_err(DatabaseError::SqlitePoolError)
    }

    /// Current pool state (connection counts)
    pub fn state(&self) -> r2d2::State {
        self.pool.state()
    }

    fn open_file(config: &DatabaseConfig, sqlite_path: &str) -> Result<Self, DatabaseError> {
        use rusqlite::OpenFlags;
        use std::fs;
        use std::path::Path;

        info!("Initializing SQLite database at: {}", sqlite_path);

        // Create parent directory if it doesn't exist
        if let Some(parent) = Path::new(sqlite_path).parent() {
            if !parent.exists() {
                info!("Creating parent directory: {:?}", parent);
                if let Err(e) = fs::create_dir_all(parent) {
                    warn!(
                        "Failed to create directory: {}, falling back to in-memory database",
                        e
                    );
                    return Self::open_in_memory(config);
                }
            }
        }

        let manager = SqliteConnectionManager::file(sqlite_path)
            .with_flags(OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_CREATE);

        match r2d2::Pool::builder()
            .max_size(config.max_connections)
            .connection_timeout(std::time::Duration::from_secs(config.timeout_seconds))
            .build(manager)
        {
            Ok(pool) => {
                // Test connection to make sure it works
                match pool.get() {
                    Ok(_) => {
                        info!("SQLite connection pool created successfully");
                        Ok(DatabasePool {
                            pool: Arc::new(pool),
                        })
                    }
                    Err(e) => {
                        error!("Failed to connect to SQLite database: {}", e);
                        warn!("Falling back to in-memory SQLite database");
                        Self::open_in_memory(config)
                    }
                }
            }
            Err(e) => {
                error!("Failed to create SQLite connection pool: {}", e);
                warn!("Falling back to in-memory SQLite database");
                Self::open_in_memory(config)
            }
        }
    }

    fn open_in_memory(config: &DatabaseConfig) -> Result<Self, DatabaseError> {
        info!("Initializing in-memory SQLite database");

        let manager = SqliteConnectionManager::memory();

        // A single shared connection: every :memory: connection is its own
        // database, so a wider pool would hand out schemaless databases.
        let pool = r2d2::Pool::builder()
            .max_size(1)
            .connection_timeout(std::time::Duration::from_secs(config.timeout_seconds))
            .build(manager)?;

        info!("In-memory SQLite database initialized successfully");
        Ok(DatabasePool {
            pool: Arc::new(pool),
        })
    }
}

/// Initialize the global database connection pool
pub fn initialize_database_pool() -> Result<(), DatabaseError> {
    if DB_POOL.get().is_some() {
        return Err(DatabaseError::PoolAlreadyInitialized);
    }

    let config = DatabaseConfig::from_env();

    info!("Initializing database pool");

    let pool = DatabasePool::open(&config)?;

    DB_POOL
        .set(pool)
        .map_err(|_| DatabaseError::PoolAlreadyInitialized)
}

/// Get the database connection pool
pub fn get_db_pool() -> Result<DatabasePool, DatabaseError> {
    DB_POOL
        .get()
        .cloned()
        .ok_or(DatabaseError::PoolNotInitialized)
}

/// Get information about the current database connection
pub fn get_connection_info() -> Option<String> {
    let pool = DB_POOL.get()?;

    match pool.connection() {
        Ok(conn) => {
            // PRAGMA database_list reports an empty file path for :memory:
            let connection_info = match conn.query_row("PRAGMA database_list", [], |row| {
                row.get::<_, String>(2)
            }) {
                Ok(path) if path.is_empty() => "SQLite in-memory database".to_string(),
                Ok(path) => format!("SQLite database at {}", path),
                Err(_) => "SQLite database (path unknown)".to_string(),
            };

            let state = pool.state();
            Some(format!(
                "{} (connections: active={}, idle={})",
                connection_info, state.connections, state.idle_connections
            ))
        }
        Err(e) => {
            error!("Failed to get SQLite connection: {}", e);
            Some(format!("SQLite connection error: {}", e))
        }
    }
}
