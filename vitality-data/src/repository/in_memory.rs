use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use uuid::Uuid;

use super::errors::RepositoryError;
use crate::models::{MeasurementRecord, UserProfile};

/// In-memory storage implementation for profiles and measurements
#[derive(Debug, Clone)]
pub struct InMemoryStorage {
    /// Storage for user profiles
    profiles: Arc<Mutex<HashMap<String, UserProfile>>>,

    /// Storage for measurement records
    measurements: Arc<Mutex<HashMap<String, MeasurementRecord>>>,
}

impl Default for InMemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryStorage {
    /// Create a new in-memory storage
    pub fn new() -> Self {
        Self {
            profiles: Arc::new(Mutex::new(HashMap::new())),
            measurements: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Store a profile in memory, enforcing name uniqueness
    pub async fn store_profile(&self, profile: &UserProfile) -> Result<UserProfile, RepositoryError> {
        let mut store = self
            .profiles
            .lock()
            .map_err(|e| RepositoryError::Lock(e.to_string()))?;

        if store.values().any(|p| p.name == profile.name) {
            return Err(RepositoryError::Conflict(format!(
                "profile name already exists: {}",
                profile.name
            )));
        }

        store.insert(profile.id.clone(), profile.clone());
        Ok(profile.clone())
    }

    /// Get all profiles from memory, oldest first
    pub async fn get_all_profiles(&self) -> Result<Vec<UserProfile>, RepositoryError> {
        let store = self
            .profiles
            .lock()
            .map_err(|e| RepositoryError::Lock(e.to_string()))?;

        let mut profiles: Vec<UserProfile> = store.values().cloned().collect();
        profiles.sort_by(|a, b| a.created_at.cmp(&b.created_at));

        Ok(profiles)
    }

    /// Get a profile by ID from memory
    pub async fn get_profile_by_id(&self, id: &Uuid) -> Result<Option<UserProfile>, RepositoryError> {
        let store = self
            .profiles
            .lock()
            .map_err(|e| RepositoryError::Lock(e.to_string()))?;

        Ok(store.get(&id.to_string()).cloned())
    }

    /// Get a profile by name from memory
    pub async fn get_profile_by_name(
        &self,
        name: &str,
    ) -> Result<Option<UserProfile>, RepositoryError> {
        let store = self
            .profiles
            .lock()
            .map_err(|e| RepositoryError::Lock(e.to_string()))?;

        Ok(store.values().find(|p| p.name == name).cloned())
    }

    /// Store a measurement in memory
    pub async fn store_measurement(
        &self,
        record: &MeasurementRecord,
    ) -> Result<MeasurementRecord, RepositoryError> {
        let mut store = self
            .measurements
            .lock()
            .map_err(|e| RepositoryError::Lock(e.to_string()))?;

        store.insert(record.id.clone(), record.clone());
        Ok(record.clone())
    }

    /// Get a profile's measurement history from memory, ascending by timestamp
    pub async fn get_history_for_user(
        &self,
        user_id: &Uuid,
    ) -> Result<Vec<MeasurementRecord>, RepositoryError> {
        let store = self
            .measurements
            .lock()
            .map_err(|e| RepositoryError::Lock(e.to_string()))?;

        let user_id = user_id.to_string();
        let mut records: Vec<MeasurementRecord> = store
            .values()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect();

        records.sort_by(|a, b| a.timestamp.cmp(&b.timestamp));

        Ok(records)
    }

    /// Delete a measurement by ID from memory
    pub async fn delete_measurement(&self, id: &Uuid) -> Result<(), RepositoryError> {
        let mut store = self
            .measurements
            .lock()
            .map_err(|e| RepositoryError::Lock(e.to_string()))?;

        match store.remove(&id.to_string()) {
            Some(_) => Ok(()),
            None => Err(RepositoryError::NotFound(format!("measurement {}", id))),
        }
    }
}
