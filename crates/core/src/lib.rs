//! Core business logic for wayfare.

pub mod services;

pub use services::*;
