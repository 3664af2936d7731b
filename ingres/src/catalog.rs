//! Per-datatype configuration: one entry per observed variable.
//!
//! Which hierarchies offer an entry is decided by the endpoint registry,
//! not repeated here.

use wris_api::endpoints;
use wris_api::models::{Scheme, Statistics};

use crate::category;

/// Post-processing hook producing a domain label from statistics.
pub type Categorizer = fn(&Statistics) -> String;

#[derive(Debug, Clone, Copy)]
pub struct Dataset {
    /// Registry key, e.g. `river_water_level`
    pub key: &'static str,
    /// Words used in summaries
    pub display_name: &'static str,
    pub categorize: Option<Categorizer>,
}

impl Dataset {
    const fn plain(key: &'static str, display_name: &'static str) -> Self {
        Self {
            key,
            display_name,
            categorize: None,
        }
    }

    /// Hierarchies this dataset can be queried through.
    pub fn schemes(&self) -> impl Iterator<Item = Scheme> + '_ {
        [Scheme::Administrative, Scheme::Basin]
            .into_iter()
            .filter(|scheme| endpoints::supports(*scheme, self.key))
    }
}

pub const DATASETS: &[Dataset] = &[
    Dataset::plain("wind_direction", "wind direction"),
    Dataset::plain("temperature", "temperature"),
    Dataset::plain("suspended_sediment", "suspended sediment"),
    Dataset::plain("solar_radiation", "solar radiation"),
    Dataset::plain("soil_moisture", "soil moisture"),
    Dataset::plain("snowfall", "snowfall"),
    Dataset::plain("river_water_level", "river water level"),
    Dataset::plain("river_water_discharge", "river water discharge"),
    Dataset::plain("reservoir", "reservoir"),
    Dataset::plain("relative_humidity", "relative humidity"),
    Dataset {
        key: "rainfall",
        display_name: "rainfall",
        categorize: Some(category::rainfall_category),
    },
    Dataset::plain("ground_water_level", "ground water level"),
    Dataset::plain("evapo_transpiration", "evapotranspiration"),
    Dataset::plain("atmospheric_pressure", "atmospheric pressure"),
];

pub fn find(key: &str) -> Option<&'static Dataset> {
    DATASETS.iter().find(|dataset| dataset.key == key)
}

/// Summary wording for a data-type, falling back to the key itself.
pub fn display_name(key: &str) -> String {
    match find(key) {
        Some(dataset) => dataset.display_name.to_string(),
        None => key.replace('_', " "),
    }
}
