//! Static mapping from (hierarchy scheme, data-type) to a WRIS resource path.
//!
//! The two hierarchies are enumerated independently. The basin hierarchy
//! does not publish groundwater levels, so `ground_water_level` is only
//! resolvable for [`Scheme::Administrative`].

use crate::client::WrisError;
use crate::models::Scheme;

/// Resource paths for state/district queries. Spaces are pre-encoded.
pub const ADMIN_ENDPOINTS: &[(&str, &str)] = &[
    ("wind_direction", "Dataset/Wind%20Direction"),
    ("temperature", "Dataset/Temperature"),
    ("suspended_sediment", "Dataset/Suspended%20Sediment"),
    ("solar_radiation", "Dataset/Solar%20Radiation"),
    ("soil_moisture", "Dataset/Soil%20Moisture"),
    ("snowfall", "Dataset/SnowFall"),
    ("river_water_level", "Dataset/River%20Water%20Level"),
    ("river_water_discharge", "Dataset/River%20Water%20Discharge"),
    ("reservoir", "Dataset/Reservoir"),
    ("relative_humidity", "Dataset/Relative%20Humidity"),
    ("rainfall", "Dataset/RainFall"),
    ("ground_water_level", "Dataset/Ground%20Water%20Level"),
    ("evapo_transpiration", "Dataset/Evapo%20Transpiration"),
    ("atmospheric_pressure", "Dataset/Atmospheric%20Pressure"),
];

/// Resource paths for basin/tributary queries.
pub const BASIN_ENDPOINTS: &[(&str, &str)] = &[
    ("wind_direction", "Dataset/Basin/Wind%20Direction"),
    ("temperature", "Dataset/Basin/Temperature"),
    ("suspended_sediment", "Dataset/Basin/Suspended%20Sediment"),
    ("solar_radiation", "Dataset/Basin/Solar%20Radiation"),
    ("soil_moisture", "Dataset/Basin/Soil%20Moisture"),
    ("snowfall", "Dataset/Basin/SnowFall"),
    // the service spells this one without a space
    ("river_water_level", "Dataset/Basin/River%20WaterLevel"),
    ("river_water_discharge", "Dataset/Basin/River%20Water%20Discharge"),
    ("reservoir", "Dataset/Basin/Reservoir"),
    ("relative_humidity", "Dataset/Basin/Relative%20Humidity"),
    ("rainfall", "Dataset/Basin/RainFall"),
    ("evapo_transpiration", "Dataset/Basin/Evapo%20Transpiration"),
    ("atmospheric_pressure", "Dataset/Basin/Atmospheric%20Pressure"),
];

fn table(scheme: Scheme) -> &'static [(&'static str, &'static str)] {
    match scheme {
        Scheme::Administrative => ADMIN_ENDPOINTS,
        Scheme::Basin => BASIN_ENDPOINTS,
    }
}

/// Look up the resource path for a data-type within a scheme.
///
/// # Examples
///
/// ```rust
/// use wris_api::endpoints::resolve;
/// use wris_api::models::Scheme;
///
/// assert_eq!(resolve(Scheme::Administrative, "rainfall").unwrap(), "Dataset/RainFall");
/// assert!(resolve(Scheme::Basin, "ground_water_level").is_err());
/// ```
pub fn resolve(scheme: Scheme, data_type: &str) -> Result<&'static str, WrisError> {
    table(scheme)
        .iter()
        .find(|(key, _)| *key == data_type)
        .map(|(_, path)| *path)
        .ok_or_else(|| WrisError::UnknownDataType {
            scheme,
            data_type: data_type.to_string(),
        })
}

/// Whether `data_type` is registered for `scheme`.
pub fn supports(scheme: Scheme, data_type: &str) -> bool {
    table(scheme).iter().any(|(key, _)| *key == data_type)
}

/// Data-type keys registered for `scheme`, in registry order.
pub fn data_types(scheme: Scheme) -> impl Iterator<Item = &'static str> {
    table(scheme).iter().map(|(key, _)| *key)
}
