//! Catalog repository for the country/city/service lookup tables.

use std::sync::Arc;

use crate::entities::{City, Country, Service, city, country, service};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};
use wayfare_common::{AppError, AppResult};

/// Lookup-table repository.
#[derive(Clone)]
pub struct CatalogRepository {
    db: Arc<DatabaseConnection>,
}

impl CatalogRepository {
    /// Create a new catalog repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a country by ID.
    pub async fn find_country(&self, id: &str) -> AppResult<Option<country::Model>> {
        Country::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find a city by ID.
    pub async fn find_city(&self, id: &str) -> AppResult<Option<city::Model>> {
        City::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find a service type by ID.
    pub async fn find_service(&self, id: &str) -> AppResult<Option<service::Model>> {
        Service::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// List all countries.
    pub async fn list_countries(&self) -> AppResult<Vec<country::Model>> {
        Country::find()
            .order_by_asc(country::Column::Name)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// List cities of a country.
    pub async fn list_cities(&self, country_id: &str) -> AppResult<Vec<city::Model>> {
        City::find()
            .filter(city::Column::CountryId.eq(country_id))
            .order_by_asc(city::Column::Name)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// List all service types.
    pub async fn list_services(&self) -> AppResult<Vec<service::Model>> {
        Service::find()
            .order_by_asc(service::Column::Name)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Check that the referenced country, city and service all exist.
    pub async fn references_exist(
        &self,
        country_id: &str,
        city_id: &str,
        service_id: &str,
    ) -> AppResult<bool> {
        Ok(self.find_country(country_id).await?.is_some()
            && self.find_city(city_id).await?.is_some()
            && self.find_service(service_id).await?.is_some())
    }
}
