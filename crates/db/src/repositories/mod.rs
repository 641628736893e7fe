//! Database repositories.

mod agency;
mod booking;
mod catalog;
mod guide;
mod review;
mod tour;
mod user;

pub use agency::AgencyRepository;
pub use booking::BookingRepository;
pub use catalog::CatalogRepository;
pub use guide::{GuideFilters, GuideRepository};
pub use review::ReviewRepository;
pub use tour::{ItineraryRow, TourFilters, TourRepository};
pub use user::UserRepository;
