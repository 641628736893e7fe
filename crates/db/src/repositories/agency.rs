//! Agency repository.

use std::sync::Arc;

use crate::entities::{Agency, agency};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect,
};
use wayfare_common::{AppError, AppResult};

/// Agency repository for database operations.
#[derive(Clone)]
pub struct AgencyRepository {
    db: Arc<DatabaseConnection>,
}

impl AgencyRepository {
    /// Create a new agency repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find an agency by ID.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<agency::Model>> {
        Agency::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get an agency by ID, returning an error if not found.
    pub async fn get_by_id(&self, id: &str) -> AppResult<agency::Model> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Agency: {id}")))
    }

    /// Find an agency by its owning user.
    pub async fn find_by_user_id(&self, user_id: &str) -> AppResult<Option<agency::Model>> {
        Agency::find()
            .filter(agency::Column::UserId.eq(user_id))
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// List agencies with pagination.
    pub async fn find_with_pagination(
        &self,
        limit: u64,
        offset: u64,
    ) -> AppResult<Vec<agency::Model>> {
        Agency::find()
            .order_by_desc(agency::Column::CreatedAt)
            .offset(offset)
            .limit(limit)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create a new agency.
    pub async fn create(&self, model: agency::ActiveModel) -> AppResult<agency::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Update an agency.
    pub async fn update(&self, model: agency::ActiveModel) -> AppResult<agency::Model> {
        model
            .update(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Delete an agency.
    pub async fn delete(&self, id: &str) -> AppResult<()> {
        Agency::delete_by_id(id)
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }
}
