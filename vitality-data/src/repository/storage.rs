use tracing::debug;
use uuid::Uuid;

use super::errors::RepositoryError;
use crate::database::DatabasePool;
use crate::models::{MeasurementRecord, UserProfile};

/// Database storage operations for profiles and measurements
pub struct DatabaseStorage;

impl DatabaseStorage {
    /// Insert a profile row
    pub async fn insert_profile(
        pool: &DatabasePool,
        profile: &UserProfile,
    ) -> Result<(), RepositoryError> {
        debug!("Storing profile in database: id={}", profile.id);

        let conn = pool.connection()?;

        conn.execute(
            "INSERT INTO users (id, name, age, gender, target_weight_kg, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            (
                &profile.id,
                &profile.name,
                profile.age,
                &profile.gender,
                profile.target_weight_kg,
                &profile.created_at,
            ),
        )
        .map_err(|e| match e {
            rusqlite::Error::SqliteFailure(err, _)
                if err.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                RepositoryError::Conflict(format!("profile name already exists: {}", profile.name))
            }
            other => RepositoryError::Sqlite(other),
        })?;

        Ok(())
    }

    /// Get all profiles, oldest first
    pub async fn get_all_profiles(pool: &DatabasePool) -> Result<Vec<UserProfile>, RepositoryError> {
        debug!("Getting all profiles from database");

        let conn = pool.connection()?;

        let mut stmt = conn.prepare(
            "SELECT id, name, age, gender, target_weight_kg, created_at
             FROM users ORDER BY created_at ASC",
        )?;

        let profiles = stmt.query_map([], |row| {
            Ok(UserProfile {
                id: row.get(0)?,
                name: row.get(1)?,
                age: row.get(2)?,
                gender: row.get(3)?,
                target_weight_kg: row.get(4)?,
                created_at: row.get(5)?,
            })
        })?;

        let mut result = Vec::new();
        for profile in profiles {
            result.push(profile?);
        }

        Ok(result)
    }

    /// Get a profile by ID
    pub async fn get_profile_by_id(
        pool: &DatabasePool,
        id: &Uuid,
    ) -> Result<Option<UserProfile>, RepositoryError> {
        debug!("Getting profile by ID from database: id={}", id);

        let conn = pool.connection()?;

        let mut stmt = conn.prepare(
            "SELECT id, name, age, gender, target_weight_kg, created_at
             FROM users WHERE id = ?",
        )?;

        let profile = stmt.query_row([&id.to_string()], |row| {
            Ok(UserProfile {
                id: row.get(0)?,
                name: row.get(1)?,
                age: row.get(2)?,
                gender: row.get(3)?,
                target_weight_kg: row.get(4)?,
                created_at: row.get(5)?,
            })
        });

        match profile {
            Ok(profile) => Ok(Some(profile)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(RepositoryError::Sqlite(e)),
        }
    }

    /// Get a profile by its unique name
    pub async fn get_profile_by_name(
        pool: &DatabasePool,
        name: &str,
    ) -> Result<Option<UserProfile>, RepositoryError> {
        debug!("Getting profile by name from database: name={}", name);

        let conn = pool.connection()?;

        let mut stmt = conn.prepare(
            "SELECT id, name, age, gender, target_weight_kg, created_at
             FROM users WHERE name = ?",
        )?;

        let profile = stmt.query_row([name], |row| {
            Ok(UserProfile {
                id: row.get(0)?,
                name: row.get(1)?,
                age: row.get(2)?,
                gender: row.get(3)?,
                target_weight_kg: row.get(4)?,
                created_at: row.get(5)?,
            })
        });

        match profile {
            Ok(profile) => Ok(Some(profile)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(RepositoryError::Sqlite(e)),
        }
    }

    /// Insert a measurement row
    pub async fn insert_measurement(
        pool: &DatabasePool,
        record: &MeasurementRecord,
    ) -> Result<(), RepositoryError> {
        debug!("Storing measurement in database: id={}", record.id);

        let conn = pool.connection()?;

        conn.execute(
            "INSERT INTO measurements (id, user_id, timestamp, weight_kg, height_m, bmi, category)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            (
                &record.id,
                &record.user_id,
                &record.timestamp,
                record.weight_kg,
                record.height_m,
                record.bmi,
                &record.category,
            ),
        )
        .map_err(RepositoryError::Sqlite)?;

        Ok(())
    }

    /// Get a profile's measurement history, ascending by timestamp
    pub async fn get_history_for_user(
        pool: &DatabasePool,
        user_id: &Uuid,
    ) -> Result<Vec<MeasurementRecord>, RepositoryError> {
        debug!("Getting measurement history from database: user_id={}", user_id);

        let conn = pool.connection()?;

        let mut stmt = conn.prepare(
            "SELECT id, user_id, timestamp, weight_kg, height_m, bmi, category
             FROM measurements WHERE user_id = ? ORDER BY timestamp ASC",
        )?;

        let records = stmt.query_map([&user_id.to_string()], |row| {
            Ok(MeasurementRecord {
                id: row.get(0)?,
                user_id: row.get(1)?,
                timestamp: row.get(2)?,
                weight_kg: row.get(3)?,
                height_m: row.get(4)?,
                bmi: row.get(5)?,
                category: row.get(6)?,
            })
        })?;

        let mut result = Vec::new();
        for record in records {
            result.push(record?);
        }

        Ok(result)
    }

    /// Delete a measurement by ID
    pub async fn delete_measurement(
        pool: &DatabasePool,
        id: &Uuid,
    ) -> Result<(), RepositoryError> {
        debug!("Deleting measurement from database: id={}", id);

        let conn = pool.connection()?;

        let deleted = conn.execute(
            "DELETE FROM measurements WHERE id = ?",
            [&id.to_string()],
        )?;

        if deleted == 0 {
            return Err(RepositoryError::NotFound(format!("measurement {}", id)));
        }

        Ok(())
    }
}
