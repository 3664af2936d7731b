//! Query India-WRIS water and weather observations by state/district or by
//! river basin/tributary, and get back a uniform envelope with a summary,
//! descriptive statistics and (for rainfall) an intensity category.

pub mod catalog;
pub mod category;
pub mod client;
pub mod config;
pub mod error;
pub mod stats;
pub mod tools;

pub use wris_api as wris;
pub use wris_api::models;

pub use category::RainfallCategory;
pub use client::IngresClient;
pub use config::{DEFAULT_AGENCY, IngresConfig};
pub use error::{IngresError, Result};
pub use tools::{Tool, ToolArguments, find_tool, tools};
