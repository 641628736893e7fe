//! Tour repository.
//!
//! Besides the usual CRUD, this repository is the row source for the
//! itinerary fold: [`TourRepository::itinerary_rows`] issues a single
//! left-outer-joined query whose result set carries one row per
//! (tour x schedule-day x activity) combination, with the gallery URLs
//! pre-aggregated into a comma-joined string per tour.

use std::sync::Arc;

use crate::entities::{
    ScheduleActivity, Tour, TourGallery, TourSchedule, schedule_activity, tour, tour_gallery,
    tour_schedule,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseBackend, DatabaseConnection, EntityTrait,
    FromQueryResult, QueryFilter, QueryOrder, QuerySelect, Statement, TransactionTrait,
    prelude::Date,
};
use wayfare_common::{AppError, AppResult};

/// One row of the denormalized itinerary result set.
///
/// Scalar tour fields are nullable here because the fold substitutes
/// documented defaults; the last five fields are nullable because the
/// joins are outer joins, so a tour with no images, schedules or
/// activities still produces exactly one row.
#[derive(Debug, Clone, FromQueryResult)]
pub struct ItineraryRow {
    pub id: String,
    pub agency_id: String,
    pub agency_name: Option<String>,
    pub tour_name: String,
    pub country: Option<String>,
    pub city: Option<String>,
    pub service: Option<String>,
    pub itinerary: Option<String>,
    pub duration: Option<String>,
    pub departure_date: Option<Date>,
    pub departure_place: Option<String>,
    pub public_id: Option<String>,
    pub cover_photo: Option<String>,
    pub description: Option<String>,
    pub price_adult: Option<f64>,
    pub price_child: Option<f64>,
    pub price_baby: Option<f64>,
    pub status: Option<String>,
    pub created_at: Option<chrono::DateTime<chrono::FixedOffset>>,
    pub updated_at: Option<chrono::DateTime<chrono::FixedOffset>>,
    pub gallery_urls: Option<String>,
    pub day_number: Option<i32>,
    pub schedule_summary: Option<String>,
    pub activity_time: Option<String>,
    pub activity_description: Option<String>,
}

/// Filters for tour search.
#[derive(Debug, Clone, Default)]
pub struct TourFilters {
    /// Destination country.
    pub country_id: Option<String>,
    /// Destination city.
    pub city_id: Option<String>,
    /// Minimum adult price.
    pub min_price: Option<f64>,
    /// Maximum adult price.
    pub max_price: Option<f64>,
    /// Exact duration label (e.g. "3 days 2 nights").
    pub duration: Option<String>,
    /// Earliest departure date.
    pub departs_after: Option<Date>,
}

const ITINERARY_SELECT: &str = r"
SELECT t.id, t.agency_id, a.company_name AS agency_name, t.tour_name,
       co.name AS country, ci.name AS city, sv.name AS service,
       t.itinerary, t.duration, t.departure_date, t.departure_place,
       t.public_id, t.cover_photo, t.description,
       t.price_adult, t.price_child, t.price_baby,
       t.status, t.created_at, t.updated_at,
       g.gallery_urls,
       ts.day_number, ts.summary AS schedule_summary,
       sa.start_time AS activity_time, sa.activity AS activity_description
FROM tour t
LEFT JOIN agency a ON a.id = t.agency_id
LEFT JOIN country co ON co.id = t.country_id
LEFT JOIN city ci ON ci.id = t.city_id
LEFT JOIN service sv ON sv.id = t.service_id
LEFT JOIN (
    SELECT tour_id, string_agg(image_url, ',') AS gallery_urls
    FROM tour_gallery
    GROUP BY tour_id
) g ON g.tour_id = t.id
LEFT JOIN tour_schedule ts ON ts.tour_id = t.id
LEFT JOIN schedule_activity sa ON sa.schedule_id = ts.id
";

/// Tour repository for database operations.
#[derive(Clone)]
pub struct TourRepository {
    db: Arc<DatabaseConnection>,
}

impl TourRepository {
    /// Create a new tour repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Fetch the denormalized itinerary rows, either for every tour
    /// (`tour_id: None`) or for a single one.
    ///
    /// Ordering contract consumed by the fold: tours ordered newest
    /// first (id as tiebreak), then schedule days ascending, then
    /// activity times ascending ("HH:MM" strings compare correctly).
    pub async fn itinerary_rows(&self, tour_id: Option<&str>) -> AppResult<Vec<ItineraryRow>> {
        let stmt = match tour_id {
            Some(id) => Statement::from_sql_and_values(
                DatabaseBackend::Postgres,
                format!(
                    "{ITINERARY_SELECT} WHERE t.id = $1 \
                     ORDER BY ts.day_number ASC, sa.start_time ASC, sa.id ASC"
                ),
                [id.into()],
            ),
            None => Statement::from_string(
                DatabaseBackend::Postgres,
                format!(
                    "{ITINERARY_SELECT} \
                     ORDER BY t.created_at DESC, t.id ASC, \
                     ts.day_number ASC, sa.start_time ASC, sa.id ASC"
                ),
            ),
        };

        ItineraryRow::find_by_statement(stmt)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find a tour by ID.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<tour::Model>> {
        Tour::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get a tour by ID, returning an error if not found.
    pub async fn get_by_id(&self, id: &str) -> AppResult<tour::Model> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::TourNotFound(id.to_string()))
    }

    /// List tours of an agency.
    pub async fn find_by_agency_id(&self, agency_id: &str) -> AppResult<Vec<tour::Model>> {
        Tour::find()
            .filter(tour::Column::AgencyId.eq(agency_id))
            .order_by_desc(tour::Column::CreatedAt)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create a tour together with its gallery images and day schedules
    /// in one transaction.
    pub async fn create_with_details(
        &self,
        tour_model: tour::ActiveModel,
        galleries: Vec<tour_gallery::ActiveModel>,
        schedules: Vec<(tour_schedule::ActiveModel, Vec<schedule_activity::ActiveModel>)>,
    ) -> AppResult<tour::Model> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        let created = tour_model
            .insert(&txn)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        if !galleries.is_empty() {
            TourGallery::insert_many(galleries)
                .exec(&txn)
                .await
                .map_err(|e| AppError::Database(e.to_string()))?;
        }

        for (schedule_model, activities) in schedules {
            schedule_model
                .insert(&txn)
                .await
                .map_err(|e| AppError::Database(e.to_string()))?;

            if !activities.is_empty() {
                ScheduleActivity::insert_many(activities)
                    .exec(&txn)
                    .await
                    .map_err(|e| AppError::Database(e.to_string()))?;
            }
        }

        txn.commit()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(created)
    }

    /// Search active tours with optional filters.
    pub async fn search(&self, filters: &TourFilters) -> AppResult<Vec<tour::Model>> {
        let mut query = Tour::find().filter(tour::Column::Status.eq("active"));

        if let Some(country_id) = &filters.country_id {
            query = query.filter(tour::Column::CountryId.eq(country_id));
        }
        if let Some(city_id) = &filters.city_id {
            query = query.filter(tour::Column::CityId.eq(city_id));
        }
        if let Some(min_price) = filters.min_price {
            query = query.filter(tour::Column::PriceAdult.gte(min_price));
        }
        if let Some(max_price) = filters.max_price {
            query = query.filter(tour::Column::PriceAdult.lte(max_price));
        }
        if let Some(duration) = &filters.duration {
            query = query.filter(tour::Column::Duration.eq(duration));
        }
        if let Some(departs_after) = filters.departs_after {
            query = query.filter(tour::Column::DepartureDate.gte(departs_after));
        }

        query
            .order_by_desc(tour::Column::CreatedAt)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Active tours departing soonest.
    pub async fn find_featured(&self, limit: u64) -> AppResult<Vec<tour::Model>> {
        Tour::find()
            .filter(tour::Column::Status.eq("active"))
            .filter(tour::Column::DepartureDate.is_not_null())
            .order_by_asc(tour::Column::DepartureDate)
            .limit(limit)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Update a tour.
    pub async fn update(&self, model: tour::ActiveModel) -> AppResult<tour::Model> {
        model
            .update(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Delete a tour. Galleries, schedules and activities cascade.
    pub async fn delete(&self, id: &str) -> AppResult<()> {
        Tour::delete_by_id(id)
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// Gallery images of a tour, in stable return order.
    pub async fn find_galleries(&self, tour_id: &str) -> AppResult<Vec<tour_gallery::Model>> {
        TourGallery::find()
            .filter(tour_gallery::Column::TourId.eq(tour_id))
            .order_by_asc(tour_gallery::Column::Id)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use maplit::btreemap;
    use sea_orm::{MockDatabase, Value};

    #[tokio::test]
    async fn test_itinerary_rows_maps_columns() {
        let row = btreemap! {
            "id" => Value::from("t1"),
            "agency_id" => Value::from("ag1"),
            "agency_name" => Value::from(Some("Sunrise Travel".to_string())),
            "tour_name" => Value::from("Hanoi Trip"),
            "country" => Value::from(Some("Vietnam".to_string())),
            "city" => Value::from(Some("Hanoi".to_string())),
            "service" => Value::from(Some("Package".to_string())),
            "itinerary" => Value::from(None::<String>),
            "duration" => Value::from(Some("3 days".to_string())),
            "departure_date" => Value::from(None::<Date>),
            "departure_place" => Value::from(None::<String>),
            "public_id" => Value::from(None::<String>),
            "cover_photo" => Value::from(None::<String>),
            "description" => Value::from(None::<String>),
            "price_adult" => Value::from(Some(120.0_f64)),
            "price_child" => Value::from(None::<f64>),
            "price_baby" => Value::from(None::<f64>),
            "status" => Value::from(Some("active".to_string())),
            "created_at" => Value::from(None::<chrono::DateTime<chrono::FixedOffset>>),
            "updated_at" => Value::from(None::<chrono::DateTime<chrono::FixedOffset>>),
            "gallery_urls" => Value::from(Some("a.jpg,b.jpg".to_string())),
            "day_number" => Value::from(Some(1)),
            "schedule_summary" => Value::from(Some("City tour".to_string())),
            "activity_time" => Value::from(Some("09:00".to_string())),
            "activity_description" => Value::from(Some("Old Quarter walk".to_string())),
        };

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[row]])
                .into_connection(),
        );

        let repo = TourRepository::new(db);
        let rows = repo.itinerary_rows(Some("t1")).await.unwrap();

        assert_eq!(rows.len(), 1);
        let row = &rows[0];
        assert_eq!(row.id, "t1");
        assert_eq!(row.agency_name.as_deref(), Some("Sunrise Travel"));
        assert_eq!(row.gallery_urls.as_deref(), Some("a.jpg,b.jpg"));
        assert_eq!(row.day_number, Some(1));
        assert_eq!(row.activity_time.as_deref(), Some("09:00"));
    }

    #[tokio::test]
    async fn test_itinerary_rows_empty_result() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<std::collections::BTreeMap<&str, Value>>::new()])
                .into_connection(),
        );

        let repo = TourRepository::new(db);
        let rows = repo.itinerary_rows(Some("missing")).await.unwrap();
        assert!(rows.is_empty());
    }
}
