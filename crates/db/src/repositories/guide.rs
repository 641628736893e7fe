//! Guide repository.

use std::sync::Arc;

use crate::entities::{Guide, guide};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect,
};
use wayfare_common::{AppError, AppResult};

/// Filters for guide search.
#[derive(Debug, Clone, Default)]
pub struct GuideFilters {
    /// Minimum daily price.
    pub min_price: Option<f64>,
    /// Maximum daily price.
    pub max_price: Option<f64>,
    /// Minimum years of experience.
    pub min_experience: Option<i32>,
}

/// Guide repository for database operations.
#[derive(Clone)]
pub struct GuideRepository {
    db: Arc<DatabaseConnection>,
}

impl GuideRepository {
    /// Create a new guide repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a guide by ID.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<guide::Model>> {
        Guide::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get a guide by ID, returning an error if not found.
    pub async fn get_by_id(&self, id: &str) -> AppResult<guide::Model> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Guide: {id}")))
    }

    /// Find a guide by its owning user.
    pub async fn find_by_user_id(&self, user_id: &str) -> AppResult<Option<guide::Model>> {
        Guide::find()
            .filter(guide::Column::UserId.eq(user_id))
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Search available guides with optional price/experience filters.
    pub async fn search(
        &self,
        filters: &GuideFilters,
        limit: u64,
        offset: u64,
    ) -> AppResult<Vec<guide::Model>> {
        let mut query = Guide::find().filter(guide::Column::Availability.eq("available"));

        if let Some(min_price) = filters.min_price {
            query = query.filter(guide::Column::PricePerDay.gte(min_price));
        }
        if let Some(max_price) = filters.max_price {
            query = query.filter(guide::Column::PricePerDay.lte(max_price));
        }
        if let Some(min_experience) = filters.min_experience {
            query = query.filter(guide::Column::ExperienceYears.gte(min_experience));
        }

        query
            .order_by_desc(guide::Column::ExperienceYears)
            .order_by_desc(guide::Column::CreatedAt)
            .offset(offset)
            .limit(limit)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create a new guide.
    pub async fn create(&self, model: guide::ActiveModel) -> AppResult<guide::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Update a guide.
    pub async fn update(&self, model: guide::ActiveModel) -> AppResult<guide::Model> {
        model
            .update(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Delete a guide.
    pub async fn delete(&self, id: &str) -> AppResult<()> {
        Guide::delete_by_id(id)
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }
}
