use async_trait::async_trait;
use thiserror::Error;
use tracing::error;
use validator::Validate;

use crate::entities::conversions;
use crate::entities::measurement::{
    BmiResult, CanonicalMeasurement, MeasurementError, MeasurementInput, MeasurementRecord,
    StatsSummary, TrendPoint,
};
use crate::entities::profile::{CreateProfileRequest, UserProfile};
use crate::services::{analysis, units};
use vitality_data::models::CreateMeasurementRecord;
use vitality_data::repository::{ProfileRepository, ProfileRepositoryTrait, RepositoryError};

/// Measurement service errors
#[derive(Debug, Error)]
pub enum MeasurementServiceError {
    /// Measurement input could not be converted or fell outside the
    /// plausible range
    #[error("{0}")]
    Measurement(#[from] MeasurementError),

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Not found error
    #[error("Not found: {0}")]
    NotFound(String),

    /// Conflict with existing data
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Repository error
    #[error("Repository error: {0}")]
    Repository(String),

    /// Stored data could not be converted back to a domain entity
    #[error("Data error: {0}")]
    Data(String),
}

/// Trait for measurement service operations
#[async_trait]
pub trait MeasurementServiceTrait {
    /// Convert and range-check raw input, producing a canonical measurement.
    ///
    /// Weight is converted first, then height, then the ranges are checked
    /// in the same order; the first failure wins.
    fn validate_measurement(
        &self,
        input: &MeasurementInput,
    ) -> Result<CanonicalMeasurement, MeasurementError>;

    /// Validate input, compute the BMI and append the measurement to the
    /// profile's history.
    async fn log_measurement(
        &self,
        profile_id: &str,
        input: MeasurementInput,
    ) -> Result<(MeasurementRecord, BmiResult), MeasurementServiceError>;

    /// Get a profile's measurement history in ascending timestamp order
    async fn history(
        &self,
        profile_id: &str,
    ) -> Result<Vec<MeasurementRecord>, MeasurementServiceError>;

    /// Summary statistics over a profile's history
    async fn stats(&self, profile_id: &str) -> Result<StatsSummary, MeasurementServiceError>;

    /// Trend points for a profile, smoothed with a trailing moving average
    async fn trend(
        &self,
        profile_id: &str,
        window: usize,
    ) -> Result<Vec<TrendPoint>, MeasurementServiceError>;

    /// Delete a measurement by ID
    async fn delete_measurement(
        &self,
        measurement_id: &str,
    ) -> Result<(), MeasurementServiceError>;

    /// Create a new user profile
    async fn create_profile(
        &self,
        request: CreateProfileRequest,
    ) -> Result<UserProfile, MeasurementServiceError>;

    /// Get a single profile by ID
    async fn get_profile(&self, profile_id: &str) -> Result<UserProfile, MeasurementServiceError>;

    /// List all user profiles, oldest first
    async fn list_profiles(&self) -> Result<Vec<UserProfile>, MeasurementServiceError>;

    /// Make sure at least one profile exists and return the one that should
    /// be preselected.
    async fn ensure_default_profile(&self) -> Result<UserProfile, MeasurementServiceError>;

    /// Render a profile's measurement history as CSV
    async fn export_csv(&self, profile_id: &str) -> Result<String, MeasurementServiceError>;
}

/// Measurement service for domain logic
pub struct MeasurementService<R: ProfileRepositoryTrait> {
    repository: R,
}

impl<R: ProfileRepositoryTrait> MeasurementService<R> {
    /// Create a new measurement service
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    /// Map repository errors to service errors
    fn map_repo_error(&self, err: RepositoryError) -> MeasurementServiceError {
        match err {
            RepositoryError::NotFound(msg) => MeasurementServiceError::NotFound(msg),
            RepositoryError::Conflict(msg) => MeasurementServiceError::Conflict(msg),
            _ => MeasurementServiceError::Repository(err.to_string()),
        }
    }

    /// Validate a profile create request
    fn validate_profile_request(
        &self,
        request: &CreateProfileRequest,
    ) -> Result<(), MeasurementServiceError> {
        if let Err(validation_errors) = request.validate() {
            let error_message = validation_errors
                .field_errors()
                .iter()
                .map(|(field, errors)| {
                    let error_msgs: Vec<String> = errors
                        .iter()
                        .map(|err| match &err.message {
                            Some(msg) => msg.to_string(),
                            None => format!("Invalid {}", field),
                        })
                        .collect();
                    format!("{}: {}", field, error_msgs.join(", "))
                })
                .collect::<Vec<String>>()
                .join("; ");

            return Err(MeasurementServiceError::Validation(error_message));
        }

        if request.name.trim().is_empty() {
            return Err(MeasurementServiceError::Validation(
                "Name cannot be empty".to_string(),
            ));
        }

        Ok(())
    }

    /// Look up a profile, failing with `NotFound` when it does not exist
    async fn require_profile(
        &self,
        profile_id: &str,
    ) -> Result<uuid::Uuid, MeasurementServiceError> {
        let profile_uuid = conversions::parse_string_to_uuid(profile_id)
            .map_err(MeasurementServiceError::Validation)?;

        self.repository
            .find_profile(&profile_uuid)
            .await
            .map_err(|e| self.map_repo_error(e))?
            .ok_or_else(|| {
                MeasurementServiceError::NotFound(format!("profile with ID {}", profile_id))
            })?;

        Ok(profile_uuid)
    }
}

#[async_trait]
impl<R: ProfileRepositoryTrait + Send + Sync> MeasurementServiceTrait for MeasurementService<R> {
    fn validate_measurement(
        &self,
        input: &MeasurementInput,
    ) -> Result<CanonicalMeasurement, MeasurementError> {
        let weight_kg = units::convert_weight(&input.weight_text, input.weight_unit)?;
        let height_m = units::convert_height(&input.height_text, input.height_unit)?;
        CanonicalMeasurement::new(weight_kg, height_m)
    }

    async fn log_measurement(
        &self,
        profile_id: &str,
        input: MeasurementInput,
    ) -> Result<(MeasurementRecord, BmiResult), MeasurementServiceError> {
        let profile_uuid = self.require_profile(profile_id).await?;

        // Validation happens before anything is persisted
        let canonical = self.validate_measurement(&input)?;
        let bmi = analysis::compute_bmi(canonical.weight_kg(), canonical.height_m());
        let category = analysis::classify_bmi(bmi);

        let data_record = self
            .repository
            .append_measurement(CreateMeasurementRecord {
                user_id: profile_uuid.to_string(),
                weight_kg: canonical.weight_kg(),
                height_m: canonical.height_m(),
                bmi,
                category: category.to_string(),
            })
            .await
            .map_err(|e| self.map_repo_error(e))?;

        let record = conversions::convert_to_domain_record(data_record).map_err(|e| {
            error!("Stored measurement could not be converted: {}", e);
            MeasurementServiceError::Data(e)
        })?;

        Ok((record, BmiResult { bmi, category }))
    }

    async fn history(
        &self,
        profile_id: &str,
    ) -> Result<Vec<MeasurementRecord>, MeasurementServiceError> {
        let profile_uuid = self.require_profile(profile_id).await?;

        let data_records = self
            .repository
            .history(&profile_uuid)
            .await
            .map_err(|e| self.map_repo_error(e))?;

        data_records
            .into_iter()
            .map(conversions::convert_to_domain_record)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| {
                error!("Stored measurement could not be converted: {}", e);
                MeasurementServiceError::Data(e)
            })
    }

    async fn stats(&self, profile_id: &str) -> Result<StatsSummary, MeasurementServiceError> {
        let records = self.history(profile_id).await?;
        Ok(analysis::summarize(&records))
    }

    async fn trend(
        &self,
        profile_id: &str,
        window: usize,
    ) -> Result<Vec<TrendPoint>, MeasurementServiceError> {
        let records = self.history(profile_id).await?;
        let bmis: Vec<f64> = records.iter().map(|record| record.bmi).collect();
        let smoothed = analysis::moving_average(&bmis, window);

        Ok(records
            .into_iter()
            .zip(smoothed)
            .map(|(record, smoothed)| TrendPoint {
                timestamp: record.timestamp,
                bmi: record.bmi,
                smoothed,
            })
            .collect())
    }

    async fn delete_measurement(
        &self,
        measurement_id: &str,
    ) -> Result<(), MeasurementServiceError> {
        let measurement_uuid = conversions::parse_string_to_uuid(measurement_id)
            .map_err(MeasurementServiceError::Validation)?;

        self.repository
            .delete_measurement(&measurement_uuid)
            .await
            .map_err(|e| self.map_repo_error(e))
    }

    async fn create_profile(
        &self,
        request: CreateProfileRequest,
    ) -> Result<UserProfile, MeasurementServiceError> {
        self.validate_profile_request(&request)?;

        let request = CreateProfileRequest {
            name: request.name.trim().to_string(),
            ..request
        };

        let data_profile = self
            .repository
            .create_profile(conversions::convert_to_data_create_profile(&request))
            .await
            .map_err(|e| self.map_repo_error(e))?;

        Ok(conversions::convert_to_domain_profile(data_profile))
    }

    async fn get_profile(&self, profile_id: &str) -> Result<UserProfile, MeasurementServiceError> {
        let profile_uuid = conversions::parse_string_to_uuid(profile_id)
            .map_err(MeasurementServiceError::Validation)?;

        let data_profile = self
            .repository
            .find_profile(&profile_uuid)
            .await
            .map_err(|e| self.map_repo_error(e))?
            .ok_or_else(|| {
                MeasurementServiceError::NotFound(format!("profile with ID {}", profile_id))
            })?;

        Ok(conversions::convert_to_domain_profile(data_profile))
    }

    async fn list_profiles(&self) -> Result<Vec<UserProfile>, MeasurementServiceError> {
        let data_profiles = self
            .repository
            .list_profiles()
            .await
            .map_err(|e| self.map_repo_error(e))?;

        Ok(data_profiles
            .into_iter()
            .map(conversions::convert_to_domain_profile)
            .collect())
    }

    async fn ensure_default_profile(&self) -> Result<UserProfile, MeasurementServiceError> {
        let data_profile = self
            .repository
            .ensure_default_profile()
            .await
            .map_err(|e| self.map_repo_error(e))?;

        Ok(conversions::convert_to_domain_profile(data_profile))
    }

    async fn export_csv(&self, profile_id: &str) -> Result<String, MeasurementServiceError> {
        let records = self.history(profile_id).await?;

        let mut csv = String::from("ID,Date,Weight(kg),Height(m),BMI,Category\n");
        for record in &records {
            csv.push_str(&format!(
                "{},{},{},{},{},{}\n",
                record.id,
                record.timestamp,
                record.weight_kg,
                record.height_m,
                record.bmi,
                record.category
            ));
        }

        Ok(csv)
    }
}

/// Create a default measurement service backed by the data layer repository
pub fn create_default_measurement_service() -> impl MeasurementServiceTrait + Send + Sync {
    let repository = ProfileRepository::new();
    MeasurementService::new(repository)
}
