//! Booking service.

use chrono::NaiveDate;
use sea_orm::Set;
use serde::{Deserialize, Serialize};
use validator::Validate;
use wayfare_common::{AppError, AppResult, IdGenerator};
use wayfare_db::entities::{booking, tour};
use wayfare_db::repositories::{BookingRepository, TourRepository};

/// Input for creating a booking.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateBookingInput {
    pub tour_id: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[validate(range(min = 1, max = 100))]
    pub adults: i32,
    #[validate(range(min = 0, max = 100))]
    #[serde(default)]
    pub children: i32,
    #[validate(range(min = 0, max = 100))]
    #[serde(default)]
    pub babies: i32,
}

/// Response for a booking.
#[derive(Debug, Clone, Serialize)]
pub struct BookingResponse {
    pub id: String,
    pub user_id: String,
    pub tour_id: String,
    pub tour_name: Option<String>,
    pub start_date: String,
    pub end_date: String,
    pub adults: i32,
    pub children: i32,
    pub babies: i32,
    pub total_price: String,
    pub status: String,
    pub payment_status: String,
    pub created_at: String,
}

impl BookingResponse {
    fn from_model(b: booking::Model, tour: Option<&tour::Model>) -> Self {
        Self {
            id: b.id,
            user_id: b.user_id,
            tour_id: b.tour_id,
            tour_name: tour.map(|t| t.tour_name.clone()),
            start_date: b.start_date.to_string(),
            end_date: b.end_date.to_string(),
            adults: b.adults,
            children: b.children,
            babies: b.babies,
            total_price: format!("{:.2}", b.total_price),
            status: b.status,
            payment_status: b.payment_status,
            created_at: b.created_at.to_rfc3339(),
        }
    }
}

/// Compute the total price from the tour's price tiers and head counts.
/// Missing tiers count as zero.
fn compute_total(tour: &tour::Model, adults: i32, children: i32, babies: i32) -> f64 {
    let adult = tour.price_adult.unwrap_or(0.0);
    let child = tour.price_child.unwrap_or(0.0);
    let baby = tour.price_baby.unwrap_or(0.0);

    adult * f64::from(adults) + child * f64::from(children) + baby * f64::from(babies)
}

/// Booking service.
#[derive(Clone)]
pub struct BookingService {
    booking_repo: BookingRepository,
    tour_repo: TourRepository,
    id_gen: IdGenerator,
}

impl BookingService {
    /// Create a new booking service.
    #[must_use]
    pub const fn new(booking_repo: BookingRepository, tour_repo: TourRepository) -> Self {
        Self {
            booking_repo,
            tour_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// Book a tour.
    pub async fn create(&self, user_id: &str, input: CreateBookingInput) -> AppResult<BookingResponse> {
        input.validate()?;

        if input.end_date < input.start_date {
            return Err(AppError::Validation(
                "End date must not precede start date".to_string(),
            ));
        }

        let tour = self.tour_repo.get_by_id(&input.tour_id).await?;
        if tour.status != "active" {
            return Err(AppError::BadRequest(
                "Tour is not open for booking".to_string(),
            ));
        }

        let total = compute_total(&tour, input.adults, input.children, input.babies);
        let now = chrono::Utc::now();

        let model = booking::ActiveModel {
            id: Set(self.id_gen.generate()),
            user_id: Set(user_id.to_string()),
            tour_id: Set(input.tour_id),
            start_date: Set(input.start_date),
            end_date: Set(input.end_date),
            adults: Set(input.adults),
            children: Set(input.children),
            babies: Set(input.babies),
            total_price: Set(total),
            status: Set("pending".to_string()),
            payment_status: Set("pending".to_string()),
            created_at: Set(now.into()),
            updated_at: Set(None),
        };

        let created = self.booking_repo.create(model).await?;
        Ok(BookingResponse::from_model(created, Some(&tour)))
    }

    /// Get a booking. Only its owner or an admin may read it.
    pub async fn get(&self, user_id: &str, is_admin: bool, id: &str) -> AppResult<BookingResponse> {
        let (booking, tour) = self.booking_repo.get_with_tour(id).await?;

        if booking.user_id != user_id && !is_admin {
            return Err(AppError::Forbidden(
                "You can only view your own bookings".to_string(),
            ));
        }

        Ok(BookingResponse::from_model(booking, tour.as_ref()))
    }

    /// List the caller's bookings.
    pub async fn list_mine(
        &self,
        user_id: &str,
        limit: u64,
        offset: u64,
    ) -> AppResult<Vec<BookingResponse>> {
        let bookings = self
            .booking_repo
            .find_by_user_id(user_id, limit, offset)
            .await?;
        Ok(bookings
            .into_iter()
            .map(|(b, t)| BookingResponse::from_model(b, t.as_ref()))
            .collect())
    }

    /// List all bookings (admin only at the API layer).
    pub async fn list_all(&self, limit: u64, offset: u64) -> AppResult<Vec<BookingResponse>> {
        let bookings = self.booking_repo.find_with_pagination(limit, offset).await?;
        Ok(bookings
            .into_iter()
            .map(|(b, t)| BookingResponse::from_model(b, t.as_ref()))
            .collect())
    }

    /// Update booking status (admin only at the API layer).
    pub async fn update_status(&self, id: &str, status: &str) -> AppResult<BookingResponse> {
        if !matches!(status, "pending" | "confirmed" | "cancelled" | "completed") {
            return Err(AppError::Validation(format!("Unknown status: {status}")));
        }

        let booking = self.booking_repo.get_by_id(id).await?;
        let mut active: booking::ActiveModel = booking.into();
        active.status = Set(status.to_string());
        active.updated_at = Set(Some(chrono::Utc::now().into()));

        let updated = self.booking_repo.update(active).await?;
        Ok(BookingResponse::from_model(updated, None))
    }

    /// Cancel a booking. Only its owner may cancel, and only while it is
    /// still pending or confirmed.
    pub async fn cancel(&self, user_id: &str, id: &str) -> AppResult<BookingResponse> {
        let booking = self.booking_repo.get_by_id(id).await?;

        if booking.user_id != user_id {
            return Err(AppError::Forbidden(
                "You can only cancel your own bookings".to_string(),
            ));
        }
        if !matches!(booking.status.as_str(), "pending" | "confirmed") {
            return Err(AppError::BadRequest(format!(
                "Booking cannot be cancelled while {}",
                booking.status
            )));
        }

        let mut active: booking::ActiveModel = booking.into();
        active.status = Set("cancelled".to_string());
        active.updated_at = Set(Some(chrono::Utc::now().into()));

        let updated = self.booking_repo.update(active).await?;
        Ok(BookingResponse::from_model(updated, None))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_tour(adult: Option<f64>, child: Option<f64>, baby: Option<f64>) -> tour::Model {
        tour::Model {
            id: "t1".to_string(),
            agency_id: "ag1".to_string(),
            tour_name: "Trip".to_string(),
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
            price_adult: adult,
            price_child: child,
            price_baby: baby,
            status: "active".to_string(),
            created_at: chrono::Utc::now().into(),
            updated_at: None,
        }
    }

    #[test]
    fn test_compute_total_uses_all_tiers() {
        let tour = test_tour(Some(100.0), Some(50.0), Some(10.0));
        let total = compute_total(&tour, 2, 1, 1);
        assert_eq!(total, 260.0);
    }

    #[test]
    fn test_compute_total_missing_tiers_count_as_zero() {
        let tour = test_tour(Some(100.0), None, None);
        let total = compute_total(&tour, 2, 3, 1);
        assert_eq!(total, 200.0);
    }

    #[tokio::test]
    async fn test_create_rejects_inverted_dates() {
        use sea_orm::{DatabaseBackend, MockDatabase};
        use std::sync::Arc;

        let db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());
        let service = BookingService::new(
            BookingRepository::new(db.clone()),
            TourRepository::new(db),
        );

        let result = service
            .create(
                "u1",
                CreateBookingInput {
                    tour_id: "t1".to_string(),
                    start_date: NaiveDate::from_ymd_opt(2026, 9, 10).unwrap(),
                    end_date: NaiveDate::from_ymd_opt(2026, 9, 1).unwrap(),
                    adults: 2,
                    children: 0,
                    babies: 0,
                },
            )
            .await;

        assert!(matches!(result, Err(AppError::Validation(_))));
    }
}
