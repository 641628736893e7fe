//! Guide service.

use sea_orm::Set;
use serde::{Deserialize, Serialize};
use serde_json::json;
use validator::Validate;
use wayfare_common::{AppError, AppResult, IdGenerator};
use wayfare_db::entities::guide;
use wayfare_db::repositories::{GuideFilters, GuideRepository};

use super::agency::decode_string_array;

/// Input for registering a guide profile.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateGuideInput {
    #[validate(length(max = 8192))]
    pub description: Option<String>,

    #[validate(range(min = 0, max = 80))]
    pub experience_years: i32,

    pub languages: Vec<String>,
    pub specialties: Vec<String>,

    pub price_per_day: f64,
}

/// Filters accepted by the guide search endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct SearchGuidesInput {
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub min_experience: Option<i32>,
}

/// Response for a guide profile.
#[derive(Debug, Clone, Serialize)]
pub struct GuideResponse {
    pub id: String,
    pub user_id: String,
    pub description: Option<String>,
    pub experience_years: i32,
    pub languages: Vec<String>,
    pub specialties: Vec<String>,
    pub price_per_day: f64,
    pub availability: String,
    pub created_at: String,
    pub updated_at: Option<String>,
}

impl GuideResponse {
    /// Shape a model into a response, decoding the JSON array columns.
    fn from_model(g: guide::Model) -> AppResult<Self> {
        Ok(Self {
            languages: decode_string_array(&g.languages, "guide.languages")?,
            specialties: decode_string_array(&g.specialties, "guide.specialties")?,
            id: g.id,
            user_id: g.user_id,
            description: g.description,
            experience_years: g.experience_years,
            price_per_day: g.price_per_day,
            availability: g.availability,
            created_at: g.created_at.to_rfc3339(),
            updated_at: g.updated_at.map(|t| t.to_rfc3339()),
        })
    }
}

/// Guide service.
#[derive(Clone)]
pub struct GuideService {
    guide_repo: GuideRepository,
    id_gen: IdGenerator,
}

impl GuideService {
    /// Create a new guide service.
    #[must_use]
    pub const fn new(guide_repo: GuideRepository) -> Self {
        Self {
            guide_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// Register a guide profile for a user. One per account.
    pub async fn create(&self, user_id: &str, input: CreateGuideInput) -> AppResult<GuideResponse> {
        input.validate()?;

        if input.languages.is_empty() {
            return Err(AppError::Validation(
                "At least one language is required".to_string(),
            ));
        }
        if input.specialties.is_empty() {
            return Err(AppError::Validation(
                "At least one specialty is required".to_string(),
            ));
        }
        if input.price_per_day <= 0.0 {
            return Err(AppError::Validation("Invalid price per day".to_string()));
        }

        if self.guide_repo.find_by_user_id(user_id).await?.is_some() {
            return Err(AppError::Conflict(
                "A guide profile already exists for this user".to_string(),
            ));
        }

        let now = chrono::Utc::now();
        let model = guide::ActiveModel {
            id: Set(self.id_gen.generate()),
            user_id: Set(user_id.to_string()),
            description: Set(input.description.map(|d| d.trim().to_string())),
            experience_years: Set(input.experience_years),
            languages: Set(json!(input.languages)),
            specialties: Set(json!(input.specialties)),
            price_per_day: Set(input.price_per_day),
            availability: Set("available".to_string()),
            created_at: Set(now.into()),
            updated_at: Set(None),
        };

        let created = self.guide_repo.create(model).await?;
        GuideResponse::from_model(created)
    }

    /// Get a guide by ID.
    pub async fn get(&self, id: &str) -> AppResult<GuideResponse> {
        let guide = self.guide_repo.get_by_id(id).await?;
        GuideResponse::from_model(guide)
    }

    /// Get the guide profile owned by a user.
    pub async fn get_by_user(&self, user_id: &str) -> AppResult<GuideResponse> {
        let guide = self
            .guide_repo
            .find_by_user_id(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Guide for user: {user_id}")))?;
        GuideResponse::from_model(guide)
    }

    /// Search available guides.
    pub async fn search(
        &self,
        input: SearchGuidesInput,
        limit: u64,
        offset: u64,
    ) -> AppResult<Vec<GuideResponse>> {
        let filters = GuideFilters {
            min_price: input.min_price,
            max_price: input.max_price,
            min_experience: input.min_experience,
        };

        let guides = self.guide_repo.search(&filters, limit, offset).await?;
        guides.into_iter().map(GuideResponse::from_model).collect()
    }

    /// Update the caller's availability.
    pub async fn update_availability(
        &self,
        user_id: &str,
        availability: &str,
    ) -> AppResult<GuideResponse> {
        let availability = availability.to_lowercase();
        if !matches!(availability.as_str(), "available" | "unavailable") {
            return Err(AppError::Validation(format!(
                "Unknown availability: {availability}"
            )));
        }

        let guide = self
            .guide_repo
            .find_by_user_id(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Guide for user: {user_id}")))?;

        let mut active: guide::ActiveModel = guide.into();
        active.availability = Set(availability);
        active.updated_at = Set(Some(chrono::Utc::now().into()));

        let updated = self.guide_repo.update(active).await?;
        GuideResponse::from_model(updated)
    }

    /// Update the caller's daily price.
    pub async fn update_pricing(&self, user_id: &str, price_per_day: f64) -> AppResult<GuideResponse> {
        if price_per_day <= 0.0 {
            return Err(AppError::Validation("Invalid price per day".to_string()));
        }

        let guide = self
            .guide_repo
            .find_by_user_id(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Guide for user: {user_id}")))?;

        let mut active: guide::ActiveModel = guide.into();
        active.price_per_day = Set(price_per_day);
        active.updated_at = Set(Some(chrono::Utc::now().into()));

        let updated = self.guide_repo.update(active).await?;
        GuideResponse::from_model(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase};
    use std::sync::Arc;

    fn service_with(db: Arc<sea_orm::DatabaseConnection>) -> GuideService {
        GuideService::new(GuideRepository::new(db))
    }

    #[tokio::test]
    async fn test_create_requires_language() {
        let db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());
        let service = service_with(db);

        let result = service
            .create(
                "u1",
                CreateGuideInput {
                    description: None,
                    experience_years: 3,
                    languages: vec![],
                    specialties: vec!["hiking".to_string()],
                    price_per_day: 100.0,
                },
            )
            .await;

        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_create_rejects_non_positive_price() {
        let db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());
        let service = service_with(db);

        let result = service
            .create(
                "u1",
                CreateGuideInput {
                    description: None,
                    experience_years: 3,
                    languages: vec!["en".to_string()],
                    specialties: vec!["hiking".to_string()],
                    price_per_day: 0.0,
                },
            )
            .await;

        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_update_availability_rejects_unknown_value() {
        let db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());
        let service = service_with(db);

        let result = service.update_availability("u1", "sometimes").await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[test]
    fn test_guide_response_decodes_corrupt_languages_as_error() {
        let model = guide::Model {
            id: "g1".to_string(),
            user_id: "u1".to_string(),
            description: None,
            experience_years: 2,
            languages: json!("en,fr"),
            specialties: json!(["hiking"]),
            price_per_day: 80.0,
            availability: "available".to_string(),
            created_at: chrono::Utc::now().into(),
            updated_at: None,
        };

        assert!(matches!(
            GuideResponse::from_model(model),
            Err(AppError::DataIntegrity(_))
        ));
    }
}
