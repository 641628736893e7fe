//! Review service.

use sea_orm::Set;
use serde::{Deserialize, Serialize};
use validator::Validate;
use wayfare_common::{AppError, AppResult, IdGenerator};
use wayfare_db::entities::review;
use wayfare_db::repositories::{BookingRepository, ReviewRepository};

/// Input for creating a review.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateReviewInput {
    pub booking_id: String,

    #[validate(range(min = 1, max = 5))]
    pub rating: i32,

    #[validate(length(max = 4096))]
    pub comment: Option<String>,

    #[validate(range(min = 1, max = 5))]
    pub service_rating: i32,

    #[validate(range(min = 1, max = 5))]
    pub guide_rating: i32,

    #[validate(range(min = 1, max = 5))]
    pub value_rating: i32,
}

/// Response for a review.
#[derive(Debug, Clone, Serialize)]
pub struct ReviewResponse {
    pub id: String,
    pub booking_id: String,
    pub rating: i32,
    pub comment: Option<String>,
    pub service_rating: i32,
    pub guide_rating: i32,
    pub value_rating: i32,
    pub created_at: String,
}

impl From<review::Model> for ReviewResponse {
    fn from(r: review::Model) -> Self {
        Self {
            id: r.id,
            booking_id: r.booking_id,
            rating: r.rating,
            comment: r.comment,
            service_rating: r.service_rating,
            guide_rating: r.guide_rating,
            value_rating: r.value_rating,
            created_at: r.created_at.to_rfc3339(),
        }
    }
}

/// Review service.
#[derive(Clone)]
pub struct ReviewService {
    review_repo: ReviewRepository,
    booking_repo: BookingRepository,
    id_gen: IdGenerator,
}

impl ReviewService {
    /// Create a new review service.
    #[must_use]
    pub const fn new(review_repo: ReviewRepository, booking_repo: BookingRepository) -> Self {
        Self {
            review_repo,
            booking_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// Review a completed booking. Only the booking's owner may review,
    /// and each booking can be reviewed once.
    pub async fn create(&self, user_id: &str, input: CreateReviewInput) -> AppResult<ReviewResponse> {
        input.validate()?;

        let booking = self.booking_repo.get_by_id(&input.booking_id).await?;

        if booking.user_id != user_id {
            return Err(AppError::Forbidden(
                "You can only review your own bookings".to_string(),
            ));
        }
        if booking.status != "completed" {
            return Err(AppError::BadRequest(
                "Only completed bookings can be reviewed".to_string(),
            ));
        }
        if self.review_repo.booking_reviewed(&input.booking_id).await? {
            return Err(AppError::Conflict(
                "This booking has already been reviewed".to_string(),
            ));
        }

        let now = chrono::Utc::now();
        let model = review::ActiveModel {
            id: Set(self.id_gen.generate()),
            booking_id: Set(input.booking_id),
            rating: Set(input.rating),
            comment: Set(input.comment),
            service_rating: Set(input.service_rating),
            guide_rating: Set(input.guide_rating),
            value_rating: Set(input.value_rating),
            created_at: Set(now.into()),
        };

        let created = self.review_repo.create(model).await?;
        Ok(created.into())
    }

    /// List reviews of a tour, newest first.
    pub async fn list_by_tour(
        &self,
        tour_id: &str,
        limit: u64,
        offset: u64,
    ) -> AppResult<Vec<ReviewResponse>> {
        let reviews = self
            .review_repo
            .find_by_tour_id(tour_id, limit, offset)
            .await?;
        Ok(reviews.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};
    use sea_orm::{DatabaseBackend, MockDatabase};
    use std::sync::Arc;
    use wayfare_db::entities::booking;

    fn test_booking(id: &str, user_id: &str, status: &str) -> booking::Model {
        booking::Model {
            id: id.to_string(),
            user_id: user_id.to_string(),
            tour_id: "t1".to_string(),
            start_date: NaiveDate::from_ymd_opt(2026, 9, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2026, 9, 3).unwrap(),
            adults: 2,
            children: 0,
            babies: 0,
            total_price: 240.0,
            status: status.to_string(),
            payment_status: "paid".to_string(),
            created_at: Utc::now().into(),
            updated_at: None,
        }
    }

    fn input(booking_id: &str) -> CreateReviewInput {
        CreateReviewInput {
            booking_id: booking_id.to_string(),
            rating: 5,
            comment: Some("Great trip".to_string()),
            service_rating: 5,
            guide_rating: 4,
            value_rating: 5,
        }
    }

    fn service_with(db: Arc<sea_orm::DatabaseConnection>) -> ReviewService {
        ReviewService::new(
            ReviewRepository::new(db.clone()),
            BookingRepository::new(db),
        )
    }

    #[tokio::test]
    async fn test_create_rejects_foreign_booking() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[test_booking("b1", "someone-else", "completed")]])
                .into_connection(),
        );
        let service = service_with(db);

        let result = service.create("u1", input("b1")).await;
        assert!(matches!(result, Err(AppError::Forbidden(_))));
    }

    #[tokio::test]
    async fn test_create_rejects_pending_booking() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[test_booking("b1", "u1", "pending")]])
                .into_connection(),
        );
        let service = service_with(db);

        let result = service.create("u1", input("b1")).await;
        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[test]
    fn test_rating_bounds_validated() {
        let mut bad = input("b1");
        bad.rating = 6;
        assert!(bad.validate().is_err());

        let mut bad = input("b1");
        bad.guide_rating = 0;
        assert!(bad.validate().is_err());

        assert!(input("b1").validate().is_ok());
    }
}
