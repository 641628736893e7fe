//! Agency service.
//!
//! Also home of [`decode_string_array`], the one canonical decoder for
//! JSON-encoded string-array columns. A column that fails to decode is a
//! data-integrity fault and surfaces as such; it is never silently
//! replaced with a default.

use sea_orm::Set;
use serde::{Deserialize, Serialize};
use serde_json::json;
use validator::Validate;
use wayfare_common::{AppError, AppResult, IdGenerator};
use wayfare_db::entities::agency;
use wayfare_db::repositories::AgencyRepository;

/// Decode a JSON-encoded string-array column.
///
/// `column` names the offending column in the error message.
pub fn decode_string_array(value: &serde_json::Value, column: &str) -> AppResult<Vec<String>> {
    serde_json::from_value(value.clone())
        .map_err(|e| AppError::DataIntegrity(format!("{column}: {e}")))
}

/// Input for registering an agency profile.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateAgencyInput {
    #[validate(length(min = 1, max = 256))]
    pub company_name: String,

    #[validate(length(min = 1, max = 64))]
    pub license_number: String,

    #[validate(length(max = 8192))]
    pub description: String,

    #[validate(length(min = 1, max = 512))]
    pub address: String,

    #[validate(url)]
    pub website: Option<String>,

    #[validate(range(min = 1))]
    pub employee_count: i32,

    #[validate(range(min = 1800, max = 2100))]
    pub established_year: i32,

    pub specialties: Vec<String>,
    pub service_areas: Vec<String>,
}

/// Input for updating an agency profile.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateAgencyInput {
    #[validate(length(min = 1, max = 256))]
    pub company_name: Option<String>,

    #[validate(length(min = 1, max = 64))]
    pub license_number: Option<String>,

    #[validate(length(max = 8192))]
    pub description: Option<String>,

    #[validate(length(min = 1, max = 512))]
    pub address: Option<String>,

    #[validate(url)]
    pub website: Option<String>,

    #[validate(range(min = 1))]
    pub employee_count: Option<i32>,

    #[validate(range(min = 1800, max = 2100))]
    pub established_year: Option<i32>,

    pub specialties: Option<Vec<String>>,
    pub service_areas: Option<Vec<String>>,
}

/// Response for an agency profile.
#[derive(Debug, Clone, Serialize)]
pub struct AgencyResponse {
    pub id: String,
    pub user_id: String,
    pub company_name: String,
    pub license_number: String,
    pub description: String,
    pub address: String,
    pub website: Option<String>,
    pub employee_count: i32,
    pub established_year: i32,
    pub specialties: Vec<String>,
    pub service_areas: Vec<String>,
    pub created_at: String,
    pub updated_at: Option<String>,
}

impl AgencyResponse {
    /// Shape a model into a response, decoding the JSON array columns.
    fn from_model(a: agency::Model) -> AppResult<Self> {
        Ok(Self {
            specialties: decode_string_array(&a.specialties, "agency.specialties")?,
            service_areas: decode_string_array(&a.service_areas, "agency.service_areas")?,
            id: a.id,
            user_id: a.user_id,
            company_name: a.company_name,
            license_number: a.license_number,
            description: a.description,
            address: a.address,
            website: a.website,
            employee_count: a.employee_count,
            established_year: a.established_year,
            created_at: a.created_at.to_rfc3339(),
            updated_at: a.updated_at.map(|t| t.to_rfc3339()),
        })
    }
}

/// Agency service.
#[derive(Clone)]
pub struct AgencyService {
    agency_repo: AgencyRepository,
    id_gen: IdGenerator,
}

impl AgencyService {
    /// Create a new agency service.
    #[must_use]
    pub const fn new(agency_repo: AgencyRepository) -> Self {
        Self {
            agency_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// Register an agency profile for a user. One per account.
    pub async fn create(&self, user_id: &str, input: CreateAgencyInput) -> AppResult<AgencyResponse> {
        input.validate()?;

        if self.agency_repo.find_by_user_id(user_id).await?.is_some() {
            return Err(AppError::Conflict(
                "An agency profile already exists for this user".to_string(),
            ));
        }

        let now = chrono::Utc::now();
        let model = agency::ActiveModel {
            id: Set(self.id_gen.generate()),
            user_id: Set(user_id.to_string()),
            company_name: Set(input.company_name),
            license_number: Set(input.license_number),
            description: Set(input.description),
            address: Set(input.address),
            website: Set(input.website),
            employee_count: Set(input.employee_count),
            established_year: Set(input.established_year),
            specialties: Set(json!(input.specialties)),
            service_areas: Set(json!(input.service_areas)),
            created_at: Set(now.into()),
            updated_at: Set(None),
        };

        let created = self.agency_repo.create(model).await?;
        AgencyResponse::from_model(created)
    }

    /// Get an agency by ID.
    pub async fn get(&self, id: &str) -> AppResult<AgencyResponse> {
        let agency = self.agency_repo.get_by_id(id).await?;
        AgencyResponse::from_model(agency)
    }

    /// Get the agency owned by a user.
    pub async fn get_by_user(&self, user_id: &str) -> AppResult<AgencyResponse> {
        let agency = self
            .agency_repo
            .find_by_user_id(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Agency for user: {user_id}")))?;
        AgencyResponse::from_model(agency)
    }

    /// The raw agency model owned by a user, for ownership checks.
    pub async fn find_model_by_user(&self, user_id: &str) -> AppResult<Option<agency::Model>> {
        self.agency_repo.find_by_user_id(user_id).await
    }

    /// List agencies.
    pub async fn list(&self, limit: u64, offset: u64) -> AppResult<Vec<AgencyResponse>> {
        let agencies = self.agency_repo.find_with_pagination(limit, offset).await?;
        agencies.into_iter().map(AgencyResponse::from_model).collect()
    }

    /// Update an agency. Caller must own it (or be an admin).
    pub async fn update(
        &self,
        user_id: &str,
        is_admin: bool,
        agency_id: &str,
        input: UpdateAgencyInput,
    ) -> AppResult<AgencyResponse> {
        input.validate()?;

        let agency = self.agency_repo.get_by_id(agency_id).await?;
        if agency.user_id != user_id && !is_admin {
            return Err(AppError::Forbidden(
                "You can only update your own agency".to_string(),
            ));
        }

        let mut active: agency::ActiveModel = agency.into();

        if let Some(company_name) = input.company_name {
            active.company_name = Set(company_name);
        }
        if let Some(license_number) = input.license_number {
            active.license_number = Set(license_number);
        }
        if let Some(description) = input.description {
            active.description = Set(description);
        }
        if let Some(address) = input.address {
            active.address = Set(address);
        }
        if let Some(website) = input.website {
            active.website = Set(Some(website));
        }
        if let Some(employee_count) = input.employee_count {
            active.employee_count = Set(employee_count);
        }
        if let Some(established_year) = input.established_year {
            active.established_year = Set(established_year);
        }
        if let Some(specialties) = input.specialties {
            active.specialties = Set(json!(specialties));
        }
        if let Some(service_areas) = input.service_areas {
            active.service_areas = Set(json!(service_areas));
        }

        active.updated_at = Set(Some(chrono::Utc::now().into()));

        let updated = self.agency_repo.update(active).await?;
        AgencyResponse::from_model(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_string_array_ok() {
        let value = json!(["hiking", "food"]);
        let decoded = decode_string_array(&value, "agency.specialties").unwrap();
        assert_eq!(decoded, vec!["hiking", "food"]);
    }

    #[test]
    fn test_decode_string_array_empty() {
        let decoded = decode_string_array(&json!([]), "agency.specialties").unwrap();
        assert!(decoded.is_empty());
    }

    #[test]
    fn test_decode_string_array_failure_is_data_integrity() {
        // A scalar where an array is expected is corrupt data, not a
        // missing value.
        let result = decode_string_array(&json!("not-an-array"), "agency.specialties");
        match result {
            Err(AppError::DataIntegrity(msg)) => {
                assert!(msg.contains("agency.specialties"));
            }
            _ => panic!("Expected DataIntegrity error"),
        }
    }

    #[test]
    fn test_decode_string_array_mixed_types_fail() {
        let result = decode_string_array(&json!(["ok", 42]), "guide.languages");
        assert!(matches!(result, Err(AppError::DataIntegrity(_))));
    }
}
