//! Database entities.

pub mod agency;
pub mod booking;
pub mod city;
pub mod country;
pub mod guide;
pub mod review;
pub mod schedule_activity;
pub mod service;
pub mod tour;
pub mod tour_gallery;
pub mod tour_schedule;
pub mod user;

pub use agency::Entity as Agency;
pub use booking::Entity as Booking;
pub use city::Entity as City;
pub use country::Entity as Country;
pub use guide::Entity as Guide;
pub use review::Entity as Review;
pub use schedule_activity::Entity as ScheduleActivity;
pub use service::Entity as Service;
pub use tour::Entity as Tour;
pub use tour_gallery::Entity as TourGallery;
pub use tour_schedule::Entity as TourSchedule;
pub use user::Entity as User;
