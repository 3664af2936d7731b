use crate::endpoints;
use crate::models::{Page, Query, ResultEnvelope, Scheme};
use reqwest::StatusCode;
use reqwest::header::{ACCEPT, CONTENT_TYPE, USER_AGENT};
use std::sync::Arc;
use std::time::Duration;

/// Public WRIS host. Resource paths are appended after a `/`.
pub const WRIS_BASE_URL: &str = "https://indiawris.gov.in";

/// Bounds for the page size sent with every query.
pub const MIN_PAGE_SIZE: u32 = 10;
pub const MAX_PAGE_SIZE: u32 = 50;

/// Request timeout applied when no client is supplied.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration for the WRIS client
#[derive(Debug, Clone)]
pub struct Configuration {
    /// Base URL of the service (e.g., "https://indiawris.gov.in")
    pub base_path: String,
    /// User agent string for HTTP requests
    pub user_agent: Option<String>,
    /// HTTP client instance. Timeouts are configured on the client itself.
    pub client: reqwest::Client,
    /// Page index sent with every query
    pub page: u32,
    /// Page size sent with every query, clamped to `MIN_PAGE_SIZE..=MAX_PAGE_SIZE`
    pub page_size: u32,
}

impl Configuration {
    /// Create a new configuration with default values
    pub fn new() -> Configuration {
        Configuration::default()
    }
}

impl Default for Configuration {
    fn default() -> Self {
        let client = reqwest::Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());
        Configuration {
            base_path: WRIS_BASE_URL.to_owned(),
            user_agent: Some("ingres-wris/0.1".to_owned()),
            client,
            page: 0,
            page_size: MAX_PAGE_SIZE,
        }
    }
}

/// Errors that can occur while querying WRIS.
///
/// Every variant is an ordinary outcome: [`WrisClient::fetch`] folds them
/// into an error [`ResultEnvelope`] instead of returning them.
#[derive(Debug)]
pub enum WrisError {
    /// The data-type has no endpoint in the requested hierarchy.
    /// Raised before any network traffic.
    UnknownDataType { scheme: Scheme, data_type: String },

    /// The query itself is unusable (e.g. start date after end date).
    InvalidQuery(String),

    /// Connection, timeout, DNS or other transport-level failure
    TransportFailure(Box<dyn std::error::Error + Send + Sync>),

    /// HTTP status other than 200, or an application `statusCode` signalling failure
    RemoteRejected {
        /// HTTP status or application-level `statusCode`
        status: i64,
        /// Response body or the service's `message` field
        message: String,
    },

    /// A 200 response whose body is not JSON or has no recognizable payload
    MalformedResponse(String),
}

impl std::fmt::Display for WrisError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WrisError::UnknownDataType { scheme, data_type } => write!(
                f,
                "Unknown data type: {} (not available in the {} hierarchy)",
                data_type, scheme
            ),
            WrisError::InvalidQuery(message) => write!(f, "Invalid query: {}", message),
            WrisError::TransportFailure(e) => write!(f, "API request failed: {}", e),
            WrisError::RemoteRejected { status, message } => {
                write!(f, "API request failed with status {}: {}", status, message)
            }
            WrisError::MalformedResponse(message) => {
                write!(f, "Malformed API response: {}", message)
            }
        }
    }
}

impl std::error::Error for WrisError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            WrisError::TransportFailure(e) => Some(e.as_ref()),
            _ => None,
        }
    }
}

/// # WRIS Client
///
/// Issues one POST per query against the WRIS dataset endpoints and
/// normalizes whatever comes back into a [`Page`] or a [`WrisError`].
///
/// ## Usage
///
/// ```rust,no_run
/// use std::sync::Arc;
/// use wris_api::{Configuration, WrisClient};
/// use wris_api::models::{DateRange, Location, Query};
///
/// #[tokio::main]
/// async fn main() {
///     let client = WrisClient::new(Arc::new(Configuration::default()));
///
///     let query = Query {
///         data_type: "rainfall".to_string(),
///         location: Location::administrative("Maharashtra", "Pune"),
///         agency: "CWC".to_string(),
///         date_range: DateRange::default(),
///     };
///
///     let envelope = client.fetch(&query).await;
///     println!("{} records", envelope.record_count());
/// }
/// ```
pub struct WrisClient {
    configuration: Arc<Configuration>,
}

impl std::fmt::Debug for WrisClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WrisClient")
            .field("base_path", &self.configuration.base_path)
            .finish()
    }
}

impl WrisClient {
    pub fn new(configuration: Arc<Configuration>) -> Self {
        Self { configuration }
    }

    pub fn configuration(&self) -> &Configuration {
        &self.configuration
    }

    /// Build the full request URL for a query.
    ///
    /// Fails with [`WrisError::UnknownDataType`] when the data-type is not
    /// registered for the location's scheme, and with
    /// [`WrisError::InvalidQuery`] when the date range is inverted.
    pub fn request_url(&self, query: &Query) -> Result<String, WrisError> {
        let resource_path = endpoints::resolve(query.location.scheme(), &query.data_type)?;

        if query.date_range.start > query.date_range.end {
            return Err(WrisError::InvalidQuery(format!(
                "start date {} is after end date {}",
                query.date_range.start_param(),
                query.date_range.end_param()
            )));
        }

        let start = query.date_range.start_param();
        let end = query.date_range.end_param();
        let page = self.configuration.page.to_string();
        let size = self
            .configuration
            .page_size
            .clamp(MIN_PAGE_SIZE, MAX_PAGE_SIZE)
            .to_string();

        let mut query_params: Vec<(&str, &str)> = query.location.query_params().to_vec();
        query_params.push(("agencyName", query.agency.as_str()));
        query_params.push(("startdate", start.as_str()));
        query_params.push(("enddate", end.as_str()));
        query_params.push(("download", "false"));
        query_params.push(("page", page.as_str()));
        query_params.push(("size", size.as_str()));

        let query_string = query_params
            .iter()
            .map(|(k, v)| format!("{}={}", k, urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&");

        Ok(format!(
            "{}/{}?{}",
            self.configuration.base_path.trim_end_matches('/'),
            resource_path,
            query_string
        ))
    }

    /// Run a query and return the normalized page, or the reason it failed.
    pub async fn try_fetch(&self, query: &Query) -> Result<Page, WrisError> {
        let url = self.request_url(query)?;
        tracing::debug!(%url, data_type = %query.data_type, "requesting WRIS data");

        let mut request = self
            .configuration
            .client
            .post(&url)
            .header(ACCEPT, "application/json");
        if query.location.scheme() == Scheme::Administrative {
            request = request.header(CONTENT_TYPE, "application/json");
        }
        if let Some(ref user_agent) = self.configuration.user_agent {
            request = request.header(USER_AGENT, user_agent.as_str());
        }

        let response = request
            .body("")
            .send()
            .await
            .map_err(|e| WrisError::TransportFailure(Box::new(e)))?;

        let status = response.status();
        tracing::debug!(status = status.as_u16(), "WRIS response received");

        if status != StatusCode::OK {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(WrisError::RemoteRejected {
                status: i64::from(status.as_u16()),
                message: error_text,
            });
        }

        let text = response
            .text()
            .await
            .map_err(|e| WrisError::TransportFailure(Box::new(e)))?;
        let body: serde_json::Value = serde_json::from_str(&text)
            .map_err(|e| WrisError::MalformedResponse(format!("body is not valid JSON: {}", e)))?;

        Page::from_body(body)
    }

    /// Run a query; never fails. Errors become an error envelope.
    pub async fn fetch(&self, query: &Query) -> ResultEnvelope {
        match self.try_fetch(query).await {
            Ok(page) => ResultEnvelope::success(page),
            Err(err) => {
                tracing::warn!(data_type = %query.data_type, error = %err, "WRIS query failed");
                ResultEnvelope::error(err.to_string())
            }
        }
    }
}
