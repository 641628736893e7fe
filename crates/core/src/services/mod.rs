//! Business logic services.

#![allow(missing_docs)]

pub mod agency;
pub mod auth;
pub mod booking;
pub mod guide;
pub mod itinerary;
pub mod mailer;
pub mod media;
pub mod review;
pub mod tour;
pub mod user;

pub use agency::{
    AgencyResponse, AgencyService, CreateAgencyInput, UpdateAgencyInput, decode_string_array,
};
pub use auth::{
    AuthResponse, AuthService, Claims, ForgotPasswordInput, LoginInput, RegisterInput,
    ResetPasswordInput, UserResponse,
};
pub use booking::{BookingResponse, BookingService, CreateBookingInput};
pub use guide::{CreateGuideInput, GuideResponse, GuideService, SearchGuidesInput};
pub use itinerary::{ActivityView, ScheduleView, TourView, build_tour_views};
pub use mailer::Mailer;
pub use media::{MediaFolder, MediaResponse, MediaService};
pub use review::{CreateReviewInput, ReviewResponse, ReviewService};
pub use tour::{
    CreateTourInput, MediaRef, SearchToursInput, TourService, TourSummary, UpdateTourInput,
};
pub use user::{UpdateProfileInput, UserService};
