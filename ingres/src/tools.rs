//! Named tool functions exposed to a conversational agent.
//!
//! Every (dataset, scheme) pair in the catalog becomes one tool taking
//! string keyword arguments. Administrative tools are named
//! `get_<key>_data`, basin tools `get_basin_<key>_data`.

use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::{Value, json};
use wris_api::WrisError;
use wris_api::models::{DATE_FORMAT, DateRange, Location, ResultEnvelope, Scheme};

use crate::catalog::{self, Dataset};
use crate::client::IngresClient;
use crate::error::{IngresError, Result};

/// One callable tool.
#[derive(Debug, Clone)]
pub struct Tool {
    pub name: String,
    pub dataset: &'static Dataset,
    pub scheme: Scheme,
}

impl Tool {
    fn new(dataset: &'static Dataset, scheme: Scheme) -> Self {
        let name = match scheme {
            Scheme::Administrative => format!("get_{}_data", dataset.key),
            Scheme::Basin => format!("get_basin_{}_data", dataset.key),
        };
        Self {
            name,
            dataset,
            scheme,
        }
    }

    pub fn description(&self) -> String {
        match self.scheme {
            Scheme::Administrative => format!(
                "Retrieve {} observations from India-WRIS for a state and district over a date range",
                self.dataset.display_name
            ),
            Scheme::Basin => format!(
                "Retrieve {} observations from India-WRIS for a river basin and tributary over a date range",
                self.dataset.display_name
            ),
        }
    }

    /// JSON schema describing the tool's keyword arguments.
    pub fn input_schema(&self) -> Value {
        let ((first_key, first_help), (second_key, second_help), required) = match self.scheme {
            Scheme::Administrative => (
                ("state_name", "Name of the state, e.g. Maharashtra"),
                ("district_name", "Name of the district, e.g. Pune"),
                ["state_name", "district_name"],
            ),
            Scheme::Basin => (
                ("basin_name", "Name of the river basin, e.g. Krishna"),
                ("tributary_name", "Name of the tributary, e.g. Bhima"),
                ["basin_name", "tributary_name"],
            ),
        };

        json!({
            "type": "object",
            "properties": {
                first_key: {"type": "string", "description": first_help},
                second_key: {"type": "string", "description": second_help},
                "agency_name": {"type": "string", "description": "Collecting agency (default CWC)"},
                "start_date": {"type": "string", "format": "date", "description": "Start date, YYYY-MM-DD (default 2024-01-01)"},
                "end_date": {"type": "string", "format": "date", "description": "End date, YYYY-MM-DD (default 2024-01-05)"}
            },
            "required": required,
            "additionalProperties": false
        })
    }
}

/// All tools, administrative first, in catalog order.
pub fn tools() -> Vec<Tool> {
    [Scheme::Administrative, Scheme::Basin]
        .into_iter()
        .flat_map(|scheme| {
            catalog::DATASETS
                .iter()
                .filter(move |dataset| dataset.schemes().any(|s| s == scheme))
                .map(move |dataset| Tool::new(dataset, scheme))
        })
        .collect()
}

pub fn find_tool(name: &str) -> Option<Tool> {
    tools().into_iter().find(|tool| tool.name == name)
}

/// Keyword arguments accepted by every tool. Location fields are checked
/// against the tool's scheme.
#[derive(Debug, Default, Deserialize)]
pub struct ToolArguments {
    #[serde(default)]
    pub state_name: Option<String>,
    #[serde(default)]
    pub district_name: Option<String>,
    #[serde(default)]
    pub basin_name: Option<String>,
    #[serde(default)]
    pub tributary_name: Option<String>,
    #[serde(default)]
    pub agency_name: Option<String>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
}

impl ToolArguments {
    fn location(&self, scheme: Scheme) -> Result<Location> {
        match scheme {
            Scheme::Administrative => Ok(Location::administrative(
                required(&self.state_name, "state_name")?,
                required(&self.district_name, "district_name")?,
            )),
            Scheme::Basin => Ok(Location::basin(
                required(&self.basin_name, "basin_name")?,
                required(&self.tributary_name, "tributary_name")?,
            )),
        }
    }

    /// Each bound falls back to the default window independently.
    fn date_range(&self) -> std::result::Result<DateRange, WrisError> {
        let default = DateRange::default();
        Ok(DateRange::new(
            parse_date(self.start_date.as_deref(), "start_date")?.unwrap_or(default.start),
            parse_date(self.end_date.as_deref(), "end_date")?.unwrap_or(default.end),
        ))
    }
}

fn required<'a>(value: &'a Option<String>, name: &str) -> Result<&'a str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .ok_or_else(|| IngresError::validation_error(format!("missing required argument `{name}`")))
}

fn parse_date(value: Option<&str>, name: &str) -> std::result::Result<Option<NaiveDate>, WrisError> {
    match value.map(str::trim).filter(|value| !value.is_empty()) {
        None => Ok(None),
        Some(text) => NaiveDate::parse_from_str(text, DATE_FORMAT)
            .map(Some)
            .map_err(|_| WrisError::InvalidQuery(format!("{name} `{text}` is not a YYYY-MM-DD date"))),
    }
}

impl IngresClient {
    /// Invoke a tool by name with keyword arguments.
    ///
    /// Unknown tools and missing location arguments are errors. Everything
    /// that happens once a query is formed, including unparseable dates,
    /// comes back as an envelope.
    pub async fn call_tool(&self, name: &str, arguments: Value) -> Result<ResultEnvelope> {
        let tool = find_tool(name).ok_or_else(|| IngresError::unknown_tool(name))?;
        let arguments: ToolArguments = match arguments {
            Value::Null => ToolArguments::default(),
            value => serde_json::from_value(value)
                .map_err(|err| IngresError::validation_error(format!("{name}: {err}")))?,
        };

        let location = arguments.location(tool.scheme)?;
        let date_range = match arguments.date_range() {
            Ok(range) => range,
            Err(err) => return Ok(ResultEnvelope::error(err.to_string())),
        };

        Ok(self
            .dispatch(
                tool.dataset.key,
                location,
                arguments.agency_name.as_deref(),
                Some(date_range),
            )
            .await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_tool_per_registered_pair() {
        let tools = tools();
        assert_eq!(tools.len(), 27);
        assert_eq!(
            tools.iter().filter(|t| t.scheme == Scheme::Administrative).count(),
            14
        );
        assert!(find_tool("get_rainfall_data").is_some());
        assert!(find_tool("get_basin_rainfall_data").is_some());
        assert!(find_tool("get_ground_water_level_data").is_some());
        assert!(find_tool("get_basin_ground_water_level_data").is_none());
    }

    #[test]
    fn tool_names_are_unique() {
        let mut names: Vec<_> = tools().into_iter().map(|t| t.name).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), 27);
    }

    #[test]
    fn schema_requires_scheme_location_fields() {
        let schema = find_tool("get_basin_temperature_data").unwrap().input_schema();
        assert_eq!(schema["required"], json!(["basin_name", "tributary_name"]));
        assert!(schema["properties"]["agency_name"].is_object());
        assert!(schema["properties"]["state_name"].is_null());
    }

    #[test]
    fn missing_location_argument_is_a_validation_error() {
        let args = ToolArguments {
            state_name: Some("Bihar".to_string()),
            district_name: Some("  ".to_string()),
            ..ToolArguments::default()
        };
        let err = args.location(Scheme::Administrative).unwrap_err();
        assert!(err.to_string().contains("district_name"));
    }

    #[test]
    fn dates_default_independently() {
        let args = ToolArguments {
            start_date: Some("2023-12-30".to_string()),
            end_date: Some(String::new()),
            ..ToolArguments::default()
        };
        let range = args.date_range().unwrap();
        assert_eq!(range.start_param(), "2023-12-30");
        assert_eq!(range.end_param(), "2024-01-05");
    }

    #[test]
    fn bad_dates_are_invalid_queries() {
        let args = ToolArguments {
            end_date: Some("05/01/2024".to_string()),
            ..ToolArguments::default()
        };
        let err = args.date_range().unwrap_err();
        assert!(matches!(err, WrisError::InvalidQuery(_)));
        assert!(err.to_string().contains("end_date"));
    }
}
