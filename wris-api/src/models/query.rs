use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Date format used by every WRIS query parameter.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Addressing scheme for a query.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scheme {
    /// State and district
    Administrative,
    /// River basin and tributary
    Basin,
}

impl std::fmt::Display for Scheme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Scheme::Administrative => write!(f, "administrative"),
            Scheme::Basin => write!(f, "basin"),
        }
    }
}

/// Where a query is addressed. The variant decides the [`Scheme`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "scheme", rename_all = "snake_case")]
pub enum Location {
    Administrative { state: String, district: String },
    Basin { basin: String, tributary: String },
}

impl Location {
    pub fn administrative<S: Into<String>, D: Into<String>>(state: S, district: D) -> Self {
        Location::Administrative {
            state: state.into(),
            district: district.into(),
        }
    }

    pub fn basin<B: Into<String>, T: Into<String>>(basin: B, tributary: T) -> Self {
        Location::Basin {
            basin: basin.into(),
            tributary: tributary.into(),
        }
    }

    pub fn scheme(&self) -> Scheme {
        match self {
            Location::Administrative { .. } => Scheme::Administrative,
            Location::Basin { .. } => Scheme::Basin,
        }
    }

    /// Scheme-specific query parameters, in the order the service documents them.
    pub fn query_params(&self) -> [(&'static str, &str); 2] {
        match self {
            Location::Administrative { state, district } => {
                [("stateName", state.as_str()), ("districtName", district.as_str())]
            }
            Location::Basin { basin, tributary } => {
                [("basinName", basin.as_str()), ("tributaryName", tributary.as_str())]
            }
        }
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Location::Administrative { state, district } => write!(f, "{district}, {state}"),
            Location::Basin { basin, tributary } => {
                write!(f, "{basin} basin, tributary {tributary}")
            }
        }
    }
}

/// Inclusive observation window.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    pub fn start_param(&self) -> String {
        self.start.format(DATE_FORMAT).to_string()
    }

    pub fn end_param(&self) -> String {
        self.end.format(DATE_FORMAT).to_string()
    }
}

impl Default for DateRange {
    /// 2024-01-01 through 2024-01-05.
    fn default() -> Self {
        Self {
            start: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap_or_default(),
            end: NaiveDate::from_ymd_opt(2024, 1, 5).unwrap_or_default(),
        }
    }
}

/// One fully-specified request against the service.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Query {
    pub data_type: String,
    pub location: Location,
    pub agency: String,
    pub date_range: DateRange,
}
