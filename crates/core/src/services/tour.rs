//! Tour service.
//!
//! The read side runs the itinerary row source and folds it with
//! [`build_tour_views`]; the write side persists a tour together with its
//! gallery images and day schedules.

use chrono::NaiveDate;
use sea_orm::Set;
use serde::{Deserialize, Serialize};
use validator::Validate;
use wayfare_common::{AppError, AppResult, IdGenerator};
use wayfare_db::entities::{schedule_activity, tour, tour_gallery, tour_schedule};
use wayfare_db::repositories::{CatalogRepository, TourFilters, TourRepository};

use super::itinerary::{TourView, build_tour_views, defaults};

/// A `{public_id, url}` pair for media already pushed to the media host.
#[derive(Debug, Clone, Deserialize)]
pub struct MediaRef {
    pub public_id: String,
    pub url: String,
}

/// An activity supplied with a schedule day on create.
#[derive(Debug, Deserialize)]
pub struct ActivityInput {
    pub time: String,
    pub activity: String,
}

/// A day schedule supplied on create.
#[derive(Debug, Deserialize)]
pub struct ScheduleInput {
    pub day: i32,
    pub summary: String,
    pub activities: Vec<ActivityInput>,
}

/// Input for creating a tour.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateTourInput {
    #[validate(length(min = 1, max = 256))]
    pub tour_name: String,
    pub country_id: String,
    pub city_id: String,
    pub service_id: String,
    #[validate(length(max = 8192))]
    pub itinerary: Option<String>,
    #[validate(length(max = 64))]
    pub duration: Option<String>,
    pub departure_date: Option<NaiveDate>,
    pub departure_place: Option<String>,
    pub cover_photo: MediaRef,
    #[validate(length(max = 8192))]
    pub description: Option<String>,
    pub price_adult: f64,
    pub price_child: f64,
    pub price_baby: f64,
    #[serde(default)]
    pub galleries: Vec<MediaRef>,
    #[serde(default)]
    pub schedules: Vec<ScheduleInput>,
}

/// Input for updating a tour.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateTourInput {
    #[validate(length(min = 1, max = 256))]
    pub tour_name: Option<String>,
    #[validate(length(max = 8192))]
    pub itinerary: Option<String>,
    #[validate(length(max = 64))]
    pub duration: Option<String>,
    pub departure_date: Option<NaiveDate>,
    pub departure_place: Option<String>,
    #[validate(length(max = 8192))]
    pub description: Option<String>,
    pub price_adult: Option<f64>,
    pub price_child: Option<f64>,
    pub price_baby: Option<f64>,
    pub status: Option<String>,
}

/// Search filters accepted by the tour search endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct SearchToursInput {
    pub country_id: Option<String>,
    pub city_id: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub duration: Option<String>,
    pub departs_after: Option<NaiveDate>,
}

/// Flat tour listing entry used by search/featured, where the nested
/// itinerary is not fetched.
#[derive(Debug, Clone, Serialize)]
pub struct TourSummary {
    pub id: String,
    pub agency_id: String,
    pub tour_name: String,
    pub duration: String,
    pub departure_date: String,
    pub departure_place: String,
    pub cover_photo: String,
    pub price_adult: String,
    pub price_child: String,
    pub price_baby: String,
    pub status: String,
}

impl From<tour::Model> for TourSummary {
    fn from(t: tour::Model) -> Self {
        Self {
            id: t.id,
            agency_id: t.agency_id,
            tour_name: t.tour_name,
            duration: t.duration.unwrap_or_default(),
            departure_date: t
                .departure_date
                .map_or_else(String::new, |d| d.to_string()),
            departure_place: t.departure_place.unwrap_or_default(),
            cover_photo: t.cover_photo.unwrap_or_default(),
            price_adult: format_price(t.price_adult),
            price_child: format_price(t.price_child),
            price_baby: format_price(t.price_baby),
            status: t.status,
        }
    }
}

fn format_price(value: Option<f64>) -> String {
    value.map_or_else(|| defaults::PRICE.to_string(), |p| format!("{p:.2}"))
}

/// Service for tour listings.
#[derive(Clone)]
pub struct TourService {
    tour_repo: TourRepository,
    catalog_repo: CatalogRepository,
    id_gen: IdGenerator,
}

impl TourService {
    /// Create a new tour service.
    #[must_use]
    pub const fn new(tour_repo: TourRepository, catalog_repo: CatalogRepository) -> Self {
        Self {
            tour_repo,
            catalog_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// List all tours with their full nested itineraries.
    pub async fn list(&self) -> AppResult<Vec<TourView>> {
        let rows = self.tour_repo.itinerary_rows(None).await?;
        Ok(build_tour_views(&rows))
    }

    /// Get one tour with its full nested itinerary.
    pub async fn get(&self, id: &str) -> AppResult<TourView> {
        let rows = self.tour_repo.itinerary_rows(Some(id)).await?;
        build_tour_views(&rows)
            .into_iter()
            .next()
            .ok_or_else(|| AppError::TourNotFound(id.to_string()))
    }

    /// Create a tour with galleries and day schedules.
    pub async fn create(&self, agency_id: &str, input: CreateTourInput) -> AppResult<TourView> {
        input.validate()?;

        if input.price_adult <= 0.0 || input.price_child < 0.0 || input.price_baby < 0.0 {
            return Err(AppError::Validation(
                "Prices must be positive".to_string(),
            ));
        }

        for schedule in &input.schedules {
            if schedule.day < 1 {
                return Err(AppError::Validation(
                    "Schedule day numbers are 1-based".to_string(),
                ));
            }
            if schedule.activities.is_empty() {
                return Err(AppError::Validation(
                    "Each schedule must have activities".to_string(),
                ));
            }
        }

        let mut days_seen = Vec::new();
        for schedule in &input.schedules {
            if days_seen.contains(&schedule.day) {
                return Err(AppError::Validation(format!(
                    "Duplicate schedule day {}",
                    schedule.day
                )));
            }
            days_seen.push(schedule.day);
        }

        if !self
            .catalog_repo
            .references_exist(&input.country_id, &input.city_id, &input.service_id)
            .await?
        {
            return Err(AppError::NotFound(
                "Country, city or service not found".to_string(),
            ));
        }

        let now = chrono::Utc::now();
        let tour_id = self.id_gen.generate();

        let tour_model = tour::ActiveModel {
            id: Set(tour_id.clone()),
            agency_id: Set(agency_id.to_string()),
            tour_name: Set(input.tour_name),
            country_id: Set(input.country_id),
            city_id: Set(input.city_id),
            service_id: Set(input.service_id),
            itinerary: Set(input.itinerary),
            duration: Set(input.duration),
            departure_date: Set(input.departure_date),
            departure_place: Set(input.departure_place),
            public_id: Set(Some(input.cover_photo.public_id)),
            cover_photo: Set(Some(input.cover_photo.url)),
            description: Set(input.description),
            price_adult: Set(Some(input.price_adult)),
            price_child: Set(Some(input.price_child)),
            price_baby: Set(Some(input.price_baby)),
            status: Set("active".to_string()),
            created_at: Set(now.into()),
            updated_at: Set(None),
        };

        let galleries = input
            .galleries
            .into_iter()
            .map(|media| tour_gallery::ActiveModel {
                id: Set(self.id_gen.generate()),
                tour_id: Set(tour_id.clone()),
                public_id: Set(media.public_id),
                image_url: Set(media.url),
            })
            .collect();

        let schedules = input
            .schedules
            .into_iter()
            .map(|schedule| {
                let schedule_id = self.id_gen.generate();
                let activities = schedule
                    .activities
                    .into_iter()
                    .map(|activity| schedule_activity::ActiveModel {
                        id: Set(self.id_gen.generate()),
                        schedule_id: Set(schedule_id.clone()),
                        start_time: Set(activity.time),
                        activity: Set(activity.activity),
                    })
                    .collect();

                (
                    tour_schedule::ActiveModel {
                        id: Set(schedule_id),
                        tour_id: Set(tour_id.clone()),
                        day_number: Set(schedule.day),
                        summary: Set(schedule.summary),
                    },
                    activities,
                )
            })
            .collect();

        self.tour_repo
            .create_with_details(tour_model, galleries, schedules)
            .await?;

        self.get(&tour_id).await
    }

    /// Update a tour. Caller must own it (or be an admin).
    pub async fn update(
        &self,
        agency_id: &str,
        is_admin: bool,
        tour_id: &str,
        input: UpdateTourInput,
    ) -> AppResult<TourView> {
        input.validate()?;

        let existing = self.tour_repo.get_by_id(tour_id).await?;
        if existing.agency_id != agency_id && !is_admin {
            return Err(AppError::Forbidden(
                "You can only update your own tours".to_string(),
            ));
        }

        if let Some(status) = &input.status
            && !matches!(status.as_str(), "active" | "inactive" | "draft")
        {
            return Err(AppError::Validation(format!("Unknown status: {status}")));
        }

        let mut active: tour::ActiveModel = existing.into();

        if let Some(tour_name) = input.tour_name {
            active.tour_name = Set(tour_name);
        }
        if let Some(itinerary) = input.itinerary {
            active.itinerary = Set(Some(itinerary));
        }
        if let Some(duration) = input.duration {
            active.duration = Set(Some(duration));
        }
        if let Some(departure_date) = input.departure_date {
            active.departure_date = Set(Some(departure_date));
        }
        if let Some(departure_place) = input.departure_place {
            active.departure_place = Set(Some(departure_place));
        }
        if let Some(description) = input.description {
            active.description = Set(Some(description));
        }
        if let Some(price_adult) = input.price_adult {
            active.price_adult = Set(Some(price_adult));
        }
        if let Some(price_child) = input.price_child {
            active.price_child = Set(Some(price_child));
        }
        if let Some(price_baby) = input.price_baby {
            active.price_baby = Set(Some(price_baby));
        }
        if let Some(status) = input.status {
            active.status = Set(status);
        }

        active.updated_at = Set(Some(chrono::Utc::now().into()));

        self.tour_repo.update(active).await?;
        self.get(tour_id).await
    }

    /// Delete a tour. Caller must own it (or be an admin). Galleries,
    /// schedules and activities cascade.
    pub async fn delete(&self, agency_id: &str, is_admin: bool, tour_id: &str) -> AppResult<()> {
        let existing = self.tour_repo.get_by_id(tour_id).await?;
        if existing.agency_id != agency_id && !is_admin {
            return Err(AppError::Forbidden(
                "You can only delete your own tours".to_string(),
            ));
        }

        self.tour_repo.delete(tour_id).await
    }

    /// Search active tours.
    pub async fn search(&self, input: SearchToursInput) -> AppResult<Vec<TourSummary>> {
        let filters = TourFilters {
            country_id: input.country_id,
            city_id: input.city_id,
            min_price: input.min_price,
            max_price: input.max_price,
            duration: input.duration,
            departs_after: input.departs_after,
        };

        let tours = self.tour_repo.search(&filters).await?;
        Ok(tours.into_iter().map(Into::into).collect())
    }

    /// Featured tours: active, departing soonest.
    pub async fn featured(&self, limit: Option<u64>) -> AppResult<Vec<TourSummary>> {
        let tours = self.tour_repo.find_featured(limit.unwrap_or(10)).await?;
        Ok(tours.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use maplit::btreemap;
    use sea_orm::{DatabaseBackend, MockDatabase, Value};
    use std::collections::BTreeMap;
    use std::sync::Arc;

    fn service_with(db: Arc<sea_orm::DatabaseConnection>) -> TourService {
        let catalog_db =
            Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());
        TourService::new(
            TourRepository::new(db),
            CatalogRepository::new(catalog_db),
        )
    }

    fn itinerary_row(id: &str, day: Option<i32>) -> BTreeMap<&'static str, Value> {
        btreemap! {
            "id" => Value::from(id.to_string()),
            "agency_id" => Value::from("ag1"),
            "agency_name" => Value::from(Some("Sunrise Travel".to_string())),
            "tour_name" => Value::from("Hanoi Trip"),
            "country" => Value::from(Some("Vietnam".to_string())),
            "city" => Value::from(Some("Hanoi".to_string())),
            "service" => Value::from(Some("Package".to_string())),
            "itinerary" => Value::from(None::<String>),
            "duration" => Value::from(None::<String>),
            "departure_date" => Value::from(None::<NaiveDate>),
            "departure_place" => Value::from(None::<String>),
            "public_id" => Value::from(None::<String>),
            "cover_photo" => Value::from(None::<String>),
            "description" => Value::from(None::<String>),
            "price_adult" => Value::from(None::<f64>),
            "price_child" => Value::from(None::<f64>),
            "price_baby" => Value::from(None::<f64>),
            "status" => Value::from(Some("active".to_string())),
            "created_at" => Value::from(None::<chrono::DateTime<chrono::FixedOffset>>),
            "updated_at" => Value::from(None::<chrono::DateTime<chrono::FixedOffset>>),
            "gallery_urls" => Value::from(None::<String>),
            "day_number" => Value::from(day),
            "schedule_summary" => Value::from(day.map(|d| format!("Day {d}"))),
            "activity_time" => Value::from(day.map(|_| "09:00".to_string())),
            "activity_description" => Value::from(day.map(|_| "Walk".to_string())),
        }
    }

    #[tokio::test]
    async fn test_get_not_found_on_zero_rows() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<BTreeMap<&str, Value>>::new()])
                .into_connection(),
        );

        let service = service_with(db);
        let result = service.get("missing").await;

        match result {
            Err(AppError::TourNotFound(id)) => assert_eq!(id, "missing"),
            _ => panic!("Expected TourNotFound error"),
        }
    }

    #[tokio::test]
    async fn test_get_folds_rows_into_one_view() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([vec![
                    itinerary_row("t1", Some(1)),
                    itinerary_row("t1", Some(2)),
                ]])
                .into_connection(),
        );

        let service = service_with(db);
        let view = service.get("t1").await.unwrap();

        assert_eq!(view.id, "t1");
        assert_eq!(view.schedules.len(), 2);
    }

    #[tokio::test]
    async fn test_list_one_view_per_tour() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([vec![
                    itinerary_row("t1", Some(1)),
                    itinerary_row("t1", Some(1)),
                    itinerary_row("t2", None),
                ]])
                .into_connection(),
        );

        let service = service_with(db);
        let views = service.list().await.unwrap();

        assert_eq!(views.len(), 2);
        assert_eq!(views[0].id, "t1");
        assert_eq!(views[1].id, "t2");
    }

    #[test]
    fn test_tour_summary_defaults() {
        let model = tour::Model {
            id: "t1".to_string(),
            agency_id: "ag1".to_string(),
            tour_name: "Bare".to_string(),
            country_id: "c1".to_string(),
            city_id: "ci1".to_string(),
            service_id: "s1".to_string(),
            itinerary: None,
            duration: None,
            departure_date: None,
            departure_place: None,
            public_id: None,
            cover_photo: None,
            description: None,
            price_adult: None,
            price_child: None,
            price_baby: None,
            status: "draft".to_string(),
            created_at: chrono::Utc::now().into(),
            updated_at: None,
        };

        let summary: TourSummary = model.into();
        assert_eq!(summary.price_adult, "0.00");
        assert_eq!(summary.departure_date, "");
        assert_eq!(summary.status, "draft");
    }

    #[tokio::test]
    async fn test_create_input_rejects_empty_activities() {
        let input = CreateTourInput {
            tour_name: "T".to_string(),
            country_id: "c".to_string(),
            city_id: "ci".to_string(),
            service_id: "s".to_string(),
            itinerary: None,
            duration: None,
            departure_date: None,
            departure_place: None,
            cover_photo: MediaRef {
                public_id: "p".to_string(),
                url: "u".to_string(),
            },
            description: None,
            price_adult: 10.0,
            price_child: 5.0,
            price_baby: 0.0,
            galleries: vec![],
            schedules: vec![ScheduleInput {
                day: 1,
                summary: "Day 1".to_string(),
                activities: vec![],
            }],
        };

        // Validation is synchronous before any query is issued, so an
        // empty mock connection is enough.
        let db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());
        let service = service_with(db);

        let result = service.create("ag1", input).await;
        match result {
            Err(AppError::Validation(msg)) => {
                assert!(msg.contains("activities"));
            }
            _ => panic!("Expected Validation error"),
        }
    }
}
