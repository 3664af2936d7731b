use wris_api::WRIS_BASE_URL;
use wris_api::client::{DEFAULT_TIMEOUT, MAX_PAGE_SIZE, MIN_PAGE_SIZE};

/// Agency queried when the caller does not name one (Central Water Commission).
pub const DEFAULT_AGENCY: &str = "CWC";

/// Configuration for the INGRES client
#[derive(Debug, Clone)]
pub struct IngresConfig {
    /// Base URL of the WRIS service
    pub base_url: String,
    /// User agent for HTTP requests
    pub user_agent: String,
    /// Timeout for each request in seconds
    pub timeout_secs: u64,
    /// Page size sent with every query
    pub page_size: u32,
    /// Agency used when a query leaves it unset
    pub default_agency: String,
}

impl Default for IngresConfig {
    fn default() -> Self {
        Self {
            base_url: WRIS_BASE_URL.to_string(),
            user_agent: format!("ingres/{}", env!("CARGO_PKG_VERSION")),
            timeout_secs: DEFAULT_TIMEOUT.as_secs(),
            page_size: MAX_PAGE_SIZE,
            default_agency: DEFAULT_AGENCY.to_string(),
        }
    }
}

impl IngresConfig {
    /// Create a new configuration for the public WRIS service
    pub fn new() -> Self {
        Self::default()
    }

    /// Point the client at a different WRIS deployment
    pub fn with_base_url<S: Into<String>>(mut self, base_url: S) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set custom user agent
    pub fn with_user_agent<S: Into<String>>(mut self, user_agent: S) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set request timeout. Zero is raised to one second.
    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs.max(1);
        self
    }

    /// Set page size, kept within what the service accepts
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size.clamp(MIN_PAGE_SIZE, MAX_PAGE_SIZE);
        self
    }

    /// Set the agency used when a query leaves it unset
    pub fn with_default_agency<S: Into<String>>(mut self, agency: S) -> Self {
        self.default_agency = agency.into();
        self
    }
}
