//! Domain-specific labels derived from summary statistics.

use serde::Serialize;
use wris_api::models::Statistics;

/// Rainfall intensity over the query window, in millimetres.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum RainfallCategory {
    VeryLow,
    Low,
    Moderate,
    Heavy,
    VeryHeavy,
}

impl RainfallCategory {
    /// Bucket a mean rainfall value. Lower bounds are inclusive.
    pub fn from_mean(mean_mm: f64) -> Self {
        if mean_mm < 10.0 {
            RainfallCategory::VeryLow
        } else if mean_mm < 25.0 {
            RainfallCategory::Low
        } else if mean_mm < 65.0 {
            RainfallCategory::Moderate
        } else if mean_mm < 115.0 {
            RainfallCategory::Heavy
        } else {
            RainfallCategory::VeryHeavy
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RainfallCategory::VeryLow => "Very Low",
            RainfallCategory::Low => "Low",
            RainfallCategory::Moderate => "Moderate",
            RainfallCategory::Heavy => "Heavy",
            RainfallCategory::VeryHeavy => "Very Heavy",
        }
    }
}

impl std::fmt::Display for RainfallCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Categorizer hook for the rainfall dataset.
pub fn rainfall_category(statistics: &Statistics) -> String {
    RainfallCategory::from_mean(statistics.mean).to_string()
}
