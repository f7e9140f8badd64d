use rusqlite::Connection;
use tracing::info;

/// Run SQLite migrations
pub fn run_migrations(conn: &Connection) -> Result<(), String> {
    info!("Running SQLite migrations");

    create_users_table(conn)?;
    create_measurements_table(conn)?;
    create_measurements_index(conn)?;

    info!("SQLite migrations completed successfully");
    Ok(())
}

/// Create the user profiles table
fn create_users_table(conn: &Connection) -> Result<(), String> {
    info!("Creating users table if not exists");

    conn.execute(
        "CREATE TABLE IF NOT EXISTS users (
            id TEXT PRIMARY KEY,
            name TEXT UNIQUE NOT NULL,
            age INTEGER,
            gender TEXT,
            target_weight_kg REAL,
            created_at TEXT NOT NULL
        )",
        [],
    ).map_err(|e| e.to_string())?;

    Ok(())
}

/// Create the measurements table
fn create_measurements_table(conn: &Connection) -> Result<(), String> {
    info!("Creating measurements table if not exists");

    conn.execute(
        "CREATE TABLE IF NOT EXISTS measurements (
            id TEXT PRIMARY KEY,
            user_id TEXT NOT NULL,
            timestamp TEXT NOT NULL,
            weight_kg REAL NOT NULL,
            height_m REAL NOT NULL,
            bmi REAL NOT NULL,
            category TEXT NOT NULL,
            FOREIGN KEY (user_id) REFERENCES users (id)
        )",
        [],
    ).map_err(|e| e.to_string())?;

    Ok(())
}

/// Create index on (user_id, timestamp) for per-user history scans
fn create_measurements_index(conn: &Connection) -> Result<(), String> {
    info!("Creating index on user_id and timestamp");

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_measurements_user_timestamp
        ON measurements (user_id, timestamp)",
        [],
    ).map_err(|e| format!("Failed to create index: {}", e))?;

    Ok(())
}
