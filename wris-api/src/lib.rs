//! Low-level async binding for the India-WRIS dataset API.
//!
//! WRIS publishes hydrological and meteorological observations under two
//! addressing schemes: administrative (state/district) and basin
//! (basin/tributary). This crate maps a data-type onto the right endpoint,
//! issues the request, and folds the service's differing success
//! conventions into one [`models::ResultEnvelope`].

pub mod client;
pub mod endpoints;
pub mod models;

pub use client::{Configuration, WRIS_BASE_URL, WrisClient, WrisError};
