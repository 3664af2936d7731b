use std::sync::Arc;
use std::time::Duration;

use url::Url;
use wris_api::models::{DateRange, Location, Query, ResultEnvelope};
use wris_api::{Configuration as WrisConfiguration, WrisClient};

use crate::catalog;
use crate::config::IngresConfig;
use crate::error::{IngresError, Result};
use crate::stats::{self, PRIMARY_VALUE_FIELD};

/// High-level client for WRIS observations.
///
/// Wraps the low-level [`WrisClient`] and turns every successful query into
/// an enriched envelope: a readable summary, statistics over the primary
/// numeric field and, for rainfall, an intensity category. The client keeps
/// no state between calls.
#[derive(Debug)]
pub struct IngresClient {
    wris: WrisClient,
    config: IngresConfig,
}

impl IngresClient {
    /// Create a new client against the public WRIS service
    pub fn new() -> Result<Self> {
        Self::with_config(IngresConfig::new())
    }

    /// Create a new client with custom configuration
    pub fn with_config(config: IngresConfig) -> Result<Self> {
        let base_url = Url::parse(&config.base_url)?;
        if base_url.cannot_be_a_base() {
            return Err(IngresError::config_error(format!(
                "base URL cannot carry resource paths: {}",
                config.base_url
            )));
        }

        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(&config.user_agent)
            .build()?;

        let wris_config = WrisConfiguration {
            base_path: config.base_url.trim_end_matches('/').to_string(),
            user_agent: Some(config.user_agent.clone()),
            client: http_client,
            page: 0,
            page_size: config.page_size,
        };

        Ok(Self {
            wris: WrisClient::new(Arc::new(wris_config)),
            config,
        })
    }

    /// Query one data-type for one location.
    ///
    /// `agency` and `date_range` fall back to the configured agency and the
    /// 2024-01-01..2024-01-05 window. Blank agency strings count as unset.
    /// Error envelopes are returned exactly as the WRIS client produced them.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// # use ingres::IngresClient;
    /// # use ingres::models::Location;
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let client = IngresClient::new()?;
    /// let envelope = client
    ///     .dispatch("rainfall", Location::administrative("Maharashtra", "Pune"), None, None)
    ///     .await;
    ///
    /// if let Some(summary) = envelope.summary() {
    ///     println!("{summary}");
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn dispatch(
        &self,
        data_type: &str,
        location: Location,
        agency: Option<&str>,
        date_range: Option<DateRange>,
    ) -> ResultEnvelope {
        let agency = agency
            .map(str::trim)
            .filter(|agency| !agency.is_empty())
            .unwrap_or(&self.config.default_agency)
            .to_string();

        let query = Query {
            data_type: data_type.to_string(),
            location,
            agency,
            date_range: date_range.unwrap_or_default(),
        };

        let mut envelope = self.wris.fetch(&query).await;
        if !envelope.is_success() {
            return envelope;
        }

        envelope.set_summary(format!(
            "Retrieved {} data for {}. Total records: {}.",
            catalog::display_name(data_type),
            query.location,
            envelope.record_count()
        ));

        if let Some(statistics) = stats::summarize(envelope.records(), PRIMARY_VALUE_FIELD) {
            if let Some(categorize) = catalog::find(data_type).and_then(|d| d.categorize) {
                envelope.set_category(categorize(&statistics));
            }
            envelope.set_statistics(statistics);
        }

        tracing::debug!(
            data_type,
            records = envelope.record_count(),
            "dispatch complete"
        );
        envelope
    }

    pub fn config(&self) -> &IngresConfig {
        &self.config
    }

    /// Get the underlying WRIS client for raw queries
    pub fn wris_client(&self) -> &WrisClient {
        &self.wris
    }
}
