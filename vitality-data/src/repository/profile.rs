use async_trait::async_trait;
use chrono::Utc;
use tracing::{debug, info};
use uuid::Uuid;

use super::errors::RepositoryError;
use super::in_memory::InMemoryStorage;
use super::storage::DatabaseStorage;
use crate::database::get_db_pool;
use crate::models::{CreateMeasurementRecord, CreateProfileRequest, MeasurementRecord, UserProfile};

/// Name of the profile created when the store is empty
pub const DEFAULT_PROFILE_NAME: &str = "Guest";

/// Repository trait for user profiles and their measurement histories
#[async_trait]
pub trait ProfileRepositoryTrait {
    /// Create a new profile from a request; fails with `Conflict` if the name is taken
    async fn create_profile(
        &self,
        request: CreateProfileRequest,
    ) -> Result<UserProfile, RepositoryError>;

    /// Get all profiles, oldest first
    async fn list_profiles(&self) -> Result<Vec<UserProfile>, RepositoryError>;

    /// Get a profile by ID
    async fn find_profile(&self, id: &Uuid) -> Result<Option<UserProfile>, RepositoryError>;

    /// Create the default profile when the store is empty; returns the profile
    /// that should be preselected (the oldest one otherwise)
    async fn ensure_default_profile(&self) -> Result<UserProfile, RepositoryError>;

    /// Append a measurement to a profile's history; the store assigns id and timestamp
    async fn append_measurement(
        &self,
        request: CreateMeasurementRecord,
    ) -> Result<MeasurementRecord, RepositoryError>;

    /// Get a profile's full measurement history, ascending by timestamp
    async fn history(&self, user_id: &Uuid) -> Result<Vec<MeasurementRecord>, RepositoryError>;

    /// Delete a measurement by ID; fails with `NotFound` if absent
    async fn delete_measurement(&self, id: &Uuid) -> Result<(), RepositoryError>;
}

/// Repository for user profiles and measurements.
/// Uses the pooled SQLite database when initialized and falls back to
/// process-local in-memory storage otherwise.
#[derive(Debug, Clone, Default)]
pub struct ProfileRepository {
    /// In-memory storage for when the database is not available
    storage: InMemoryStorage,
}

impl ProfileRepository {
    /// Create a new repository
    pub fn new() -> Self {
        Self {
            storage: InMemoryStorage::new(),
        }
    }

    async fn find_profile_by_name(
        &self,
        name: &str,
    ) -> Result<Option<UserProfile>, RepositoryError> {
        match get_db_pool() {
            Ok(pool) => DatabaseStorage::get_profile_by_name(&pool, name).await,
            Err(e) => {
                debug!(
                    "Database not available ({}), using in-memory storage for find_profile_by_name",
                    e
                );
                self.storage.get_profile_by_name(name).await
            }
        }
    }
}

#[async_trait]
impl ProfileRepositoryTrait for ProfileRepository {
    /// Create a new profile from a request
    async fn create_profile(
        &self,
        request: CreateProfileRequest,
    ) -> Result<UserProfile, RepositoryError> {
        let profile = UserProfile {
            id: Uuid::new_v4().to_string(),
            name: request.name,
            age: request.age,
            gender: request.gender,
            target_weight_kg: request.target_weight_kg,
            created_at: Utc::now().to_rfc3339(),
        };

        match get_db_pool() {
            Ok(pool) => {
                debug!("Storing profile in database: {}", profile.id);
                DatabaseStorage::insert_profile(&pool, &profile).await?;
                Ok(profile)
            }
            Err(e) => {
                debug!("Database not available ({}), using in-memory storage", e);
                self.storage.store_profile(&profile).await
            }
        }
    }

    /// Get all profiles, oldest first
    async fn list_profiles(&self) -> Result<Vec<UserProfile>, RepositoryError> {
        match get_db_pool() {
            Ok(pool) => {
                debug!("Getting all profiles from database");
                DatabaseStorage::get_all_profiles(&pool).await
            }
            Err(e) => {
                debug!(
                    "Database not available ({}), using in-memory storage for list_profiles",
                    e
                );
                self.storage.get_all_profiles().await
            }
        }
    }

    /// Get a profile by ID
    async fn find_profile(&self, id: &Uuid) -> Result<Option<UserProfile>, RepositoryError> {
        match get_db_pool() {
            Ok(pool) => {
                debug!("Getting profile by ID from database: {}", id);
                DatabaseStorage::get_profile_by_id(&pool, id).await
            }
            Err(e) => {
                debug!(
                    "Database not available ({}), using in-memory storage for find_profile",
                    e
                );
                self.storage.get_profile_by_id(id).await
            }
        }
    }

    /// Create the default profile when the store is empty
    async fn ensure_default_profile(&self) -> Result<UserProfile, RepositoryError> {
        let existing = self.list_profiles().await?;
        if let Some(profile) = existing.into_iter().next() {
            debug!("Profiles already present, skipping default profile bootstrap");
            return Ok(profile);
        }

        let request = CreateProfileRequest {
            name: DEFAULT_PROFILE_NAME.to_string(),
            age: None,
            gender: None,
            target_weight_kg: None,
        };

        match self.create_profile(request).await {
            Ok(profile) => {
                info!("Created default profile: {}", DEFAULT_PROFILE_NAME);
                Ok(profile)
            }
            // Lost a startup race; the default profile is already there
            Err(RepositoryError::Conflict(_)) => self
                .find_profile_by_name(DEFAULT_PROFILE_NAME)
                .await?
                .ok_or_else(|| {
                    RepositoryError::NotFound(format!("profile {}", DEFAULT_PROFILE_NAME))
                }),
            Err(e) => Err(e),
        }
    }

    /// Append a measurement to a profile's history
    async fn append_measurement(
        &self,
        request: CreateMeasurementRecord,
    ) -> Result<MeasurementRecord, RepositoryError> {
        let record = MeasurementRecord {
            id: Uuid::new_v4().to_string(),
            user_id: request.user_id,
            timestamp: Utc::now().to_rfc3339(),
            weight_kg: request.weight_kg,
            height_m: request.height_m,
            bmi: request.bmi,
            category: request.category,
        };

        match get_db_pool() {
            Ok(pool) => {
                debug!("Storing measurement in database: {}", record.id);
                DatabaseStorage::insert_measurement(&pool, &record).await?;
                Ok(record)
            }
            Err(e) => {
                debug!("Database not available ({}), using in-memory storage", e);
                self.storage.store_measurement(&record).await
            }
        }
    }

    /// Get a profile's full measurement history, ascending by timestamp
    async fn history(&self, user_id: &Uuid) -> Result<Vec<MeasurementRecord>, RepositoryError> {
        match get_db_pool() {
            Ok(pool) => {
                debug!("Getting measurement history from database: {}", user_id);
                DatabaseStorage::get_history_for_user(&pool, user_id).await
            }
            Err(e) => {
                debug!(
                    "Database not available ({}), using in-memory storage for history",
                    e
                );
                self.storage.get_history_for_user(user_id).await
            }
        }
    }

    /// Delete a measurement by ID
    async fn delete_measurement(&self, id: &Uuid) -> Result<(), RepositoryError> {
        match get_db_pool() {
            Ok(pool) => {
                debug!("Deleting measurement from database: {}", id);
                DatabaseStorage::delete_measurement(&pool, id).await
            }
            Err(e) => {
                debug!(
                    "Database not available ({}), using in-memory storage for delete_measurement",
                    e
                );
                self.storage.delete_measurement(id).await
            }
        }
    }
}

/// Mock profile repository for testing
#[cfg(any(test, feature = "mock"))]
pub mod tests {
    use std::sync::Mutex;

    use super::*;

    /// Mock implementation of ProfileRepository for testing
    pub struct MockProfileRepository {
        profiles: Mutex<Vec<UserProfile>>,
        measurements: Mutex<Vec<MeasurementRecord>>,
    }

    impl Default for MockProfileRepository {
        fn default() -> Self {
            Self::new()
        }
    }

    impl MockProfileRepository {
        /// Create a new empty mock repository
        pub fn new() -> Self {
            Self {
                profiles: Mutex::new(Vec::new()),
                measurements: Mutex::new(Vec::new()),
            }
        }

        /// Create a mock repository with predefined profiles
        pub fn with_profiles(profiles: Vec<UserProfile>) -> Self {
            Self {
                profiles: Mutex::new(profiles),
                measurements: Mutex::new(Vec::new()),
            }
        }

        /// Create a mock repository with predefined profiles and history
        pub fn with_history(
            profiles: Vec<UserProfile>,
            measurements: Vec<MeasurementRecord>,
        ) -> Self {
            Self {
                profiles: Mutex::new(profiles),
                measurements: Mutex::new(measurements),
            }
        }

        /// Build a profile fixture with the given name
        pub fn profile_fixture(name: &str) -> UserProfile {
            UserProfile {
                id: Uuid::new_v4().to_string(),
                name: name.to_string(),
                age: None,
                gender: None,
                target_weight_kg: None,
                created_at: Utc::now().to_rfc3339(),
            }
        }
    }

    #[async_trait]
    impl ProfileRepositoryTrait for MockProfileRepository {
        async fn create_profile(
            &self,
            request: CreateProfileRequest,
        ) -> Result<UserProfile, RepositoryError> {
            let mut profiles = self.profiles.lock().unwrap();

            if profiles.iter().any(|p| p.name == request.name) {
                return Err(RepositoryError::Conflict(format!(
                    "profile name already exists: {}",
                    request.name
                )));
            }

            let profile = UserProfile {
                id: Uuid::new_v4().to_string(),
                name: request.name,
                age: request.age,
                gender: request.gender,
                target_weight_kg: request.target_weight_kg,
                created_at: Utc::now().to_rfc3339(),
            };

            profiles.push(profile.clone());
            Ok(profile)
        }

        async fn list_profiles(&self) -> Result<Vec<UserProfile>, RepositoryError> {
            let mut profiles = self.profiles.lock().unwrap().clone();
            profiles.sort_by(|a, b| a.created_at.cmp(&b.created_at));
            Ok(profiles)
        }

        async fn find_profile(&self, id: &Uuid) -> Result<Option<UserProfile>, RepositoryError> {
            let profiles = self.profiles.lock().unwrap();
            Ok(profiles.iter().find(|p| p.id == id.to_string()).cloned())
        }

        async fn ensure_default_profile(&self) -> Result<UserProfile, RepositoryError> {
            if let Some(profile) = self.list_profiles().await?.into_iter().next() {
                return Ok(profile);
            }

            self.create_profile(CreateProfileRequest {
                name: DEFAULT_PROFILE_NAME.to_string(),
                age: None,
                gender: None,
                target_weight_kg: None,
            })
            .await
        }

        async fn append_measurement(
            &self,
            request: CreateMeasurementRecord,
        ) -> Result<MeasurementRecord, RepositoryError> {
            let record = MeasurementRecord {
                id: Uuid::new_v4().to_string(),
                user_id: request.user_id,
                timestamp: Utc::now().to_rfc3339(),
                weight_kg: request.weight_kg,
                height_m: request.height_m,
                bmi: request.bmi,
                category: request.category,
            };

            self.measurements.lock().unwrap().push(record.clone());
            Ok(record)
        }

        async fn history(
            &self,
            user_id: &Uuid,
        ) -> Result<Vec<MeasurementRecord>, RepositoryError> {
            let user_id = user_id.to_string();
            let mut records: Vec<MeasurementRecord> = self
                .measurements
                .lock()
                .unwrap()
                .iter()
                .filter(|r| r.user_id == user_id)
                .cloned()
                .collect();

            records.sort_by(|a, b| a.timestamp.cmp(&b.timestamp));
            Ok(records)
        }

        async fn delete_measurement(&self, id: &Uuid) -> Result<(), RepositoryError> {
            let mut measurements = self.measurements.lock().unwrap();
            let before = measurements.len();
            measurements.retain(|r| r.id != id.to_string());

            if measurements.len() == before {
                return Err(RepositoryError::NotFound(format!("measurement {}", id)));
            }

            Ok(())
        }
    }
}
