use serde::{Deserialize, Serialize};

use super::Page;

/// A single observation row, exactly as the service returned it.
pub type Record = serde_json::Map<String, serde_json::Value>;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Success,
    Error,
}

/// Descriptive statistics over one numeric field of a record set.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Statistics {
    /// Name of the summarized field
    pub field: String,
    pub mean: f64,
    pub min: f64,
    pub max: f64,
    /// Sample standard deviation; `None` when only one value was available.
    pub std_dev: Option<f64>,
    pub count: usize,
}

/// Uniform success/error structure returned by every query.
///
/// Either `records` and `summary` are populated (success) or `error_detail`
/// is (error), never both. The mutators below only touch successful
/// envelopes, so an error passes through enrichment untouched.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ResultEnvelope {
    status: Status,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    records: Option<Vec<Record>>,
    #[serde(default)]
    record_count: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    statistics: Option<Statistics>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    error_detail: Option<String>,
}

impl ResultEnvelope {
    /// Successful envelope with a placeholder summary.
    pub fn success(page: Page) -> Self {
        let summary = format!("Total records: {}.", page.record_count);
        Self {
            status: Status::Success,
            records: Some(page.records),
            record_count: page.record_count,
            summary: Some(summary),
            statistics: None,
            category: None,
            error_detail: None,
        }
    }

    pub fn error<S: Into<String>>(detail: S) -> Self {
        Self {
            status: Status::Error,
            records: None,
            record_count: 0,
            summary: None,
            statistics: None,
            category: None,
            error_detail: Some(detail.into()),
        }
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn is_success(&self) -> bool {
        self.status == Status::Success
    }

    pub fn records(&self) -> &[Record] {
        self.records.as_deref().unwrap_or(&[])
    }

    pub fn record_count(&self) -> u64 {
        self.record_count
    }

    pub fn summary(&self) -> Option<&str> {
        self.summary.as_deref()
    }

    pub fn statistics(&self) -> Option<&Statistics> {
        self.statistics.as_ref()
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    pub fn error_detail(&self) -> Option<&str> {
        self.error_detail.as_deref()
    }

    pub fn set_summary<S: Into<String>>(&mut self, summary: S) {
        if self.is_success() {
            self.summary = Some(summary.into());
        }
    }

    pub fn set_statistics(&mut self, statistics: Statistics) {
        if self.is_success() {
            self.statistics = Some(statistics);
        }
    }

    pub fn set_category<S: Into<String>>(&mut self, category: S) {
        if self.is_success() {
            self.category = Some(category.into());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn error_envelope_ignores_enrichment() {
        let mut envelope = ResultEnvelope::error("boom");
        envelope.set_summary("should not appear");
        envelope.set_category("Heavy");

        assert_eq!(envelope.status(), Status::Error);
        assert!(envelope.summary().is_none());
        assert!(envelope.category().is_none());
        assert_eq!(envelope.error_detail(), Some("boom"));
    }

    #[test]
    fn serializes_without_absent_keys() {
        let page = Page {
            records: vec![json!({"x": 1}).as_object().cloned().unwrap()],
            record_count: 1,
        };
        let value = serde_json::to_value(ResultEnvelope::success(page)).unwrap();

        assert_eq!(value["status"], "success");
        assert_eq!(value["record_count"], 1);
        assert!(value.get("error_detail").is_none());
        assert!(value.get("statistics").is_none());

        let value = serde_json::to_value(ResultEnvelope::error("nope")).unwrap();
        assert_eq!(value["status"], "error");
        assert_eq!(value["error_detail"], "nope");
        assert!(value.get("records").is_none());
        assert!(value.get("summary").is_none());
    }
}
