use serde_json::{Map, Value};

use super::Record;
use crate::client::WrisError;

/// Application-level `statusCode` values the service uses for success.
const SUCCESS_STATUS_CODES: [i64; 2] = [200, 0];

/// Records extracted from one successful response.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Page {
    pub records: Vec<Record>,
    /// Total reported by the service; may exceed `records.len()` when paginated.
    pub record_count: u64,
}

impl Page {
    /// Normalize a parsed 200 response body.
    ///
    /// The convention is chosen by looking at which fields are present, never
    /// by which endpoint produced the body.
    pub fn from_body(body: Value) -> Result<Page, WrisError> {
        ResponseShape::detect(body)?.into_page()
    }

    fn from_items(items: Vec<Value>) -> Page {
        let records = into_records(items);
        let record_count = records.len() as u64;
        Page {
            records,
            record_count,
        }
    }

    fn from_paginated(mut payload: Map<String, Value>) -> Page {
        let records = match payload.remove("content") {
            Some(Value::Array(items)) => into_records(items),
            _ => Vec::new(),
        };
        let record_count = payload
            .get("totalElements")
            .and_then(Value::as_u64)
            .unwrap_or(records.len() as u64);
        Page {
            records,
            record_count,
        }
    }
}

/// The success conventions observed across WRIS endpoints.
#[derive(Debug, PartialEq)]
enum ResponseShape {
    /// `{"statusCode": .., "message": .., "data": [..]}`
    StatusWrapped {
        status_code: Option<i64>,
        message: Option<String>,
        data: Option<Value>,
    },
    /// `{"data": [..]}` without a status field
    Listed(Vec<Value>),
    /// `{"data": {"content": [..], "totalElements": n}}`, or the same object at the root
    Paginated(Map<String, Value>),
}

impl ResponseShape {
    fn detect(body: Value) -> Result<Self, WrisError> {
        let Value::Object(mut root) = body else {
            return Err(WrisError::MalformedResponse(format!(
                "expected a JSON object, got {}",
                kind(&body)
            )));
        };

        if let Some(status) = root.get("statusCode") {
            let status_code = status_code_of(status);
            let message = root
                .get("message")
                .and_then(Value::as_str)
                .map(str::to_owned);
            return Ok(ResponseShape::StatusWrapped {
                status_code,
                message,
                data: root.remove("data"),
            });
        }

        match root.remove("data") {
            Some(Value::Array(items)) => Ok(ResponseShape::Listed(items)),
            Some(Value::Object(payload)) => Ok(ResponseShape::Paginated(payload)),
            Some(other) => Err(WrisError::MalformedResponse(format!(
                "`data` field is {}",
                kind(&other)
            ))),
            None if root.contains_key("content") => Ok(ResponseShape::Paginated(root)),
            None => Err(WrisError::MalformedResponse(
                "response has no `statusCode`, `data` or `content` field".to_string(),
            )),
        }
    }

    fn into_page(self) -> Result<Page, WrisError> {
        match self {
            ResponseShape::StatusWrapped {
                status_code: Some(code),
                data,
                ..
            } if SUCCESS_STATUS_CODES.contains(&code) => Ok(match data {
                Some(Value::Array(items)) => Page::from_items(items),
                Some(Value::Object(payload)) => Page::from_paginated(payload),
                _ => Page::default(),
            }),
            ResponseShape::StatusWrapped {
                status_code: Some(code),
                message,
                ..
            } => Err(WrisError::RemoteRejected {
                status: code,
                message: message.unwrap_or_else(|| format!("API returned error status: {code}")),
            }),
            ResponseShape::StatusWrapped {
                status_code: None, ..
            } => Err(WrisError::MalformedResponse(
                "`statusCode` is not an integer".to_string(),
            )),
            ResponseShape::Listed(items) => Ok(Page::from_items(items)),
            ResponseShape::Paginated(payload) => Ok(Page::from_paginated(payload)),
        }
    }
}

fn status_code_of(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn into_records(items: Vec<Value>) -> Vec<Record> {
    let total = items.len();
    let records: Vec<Record> = items
        .into_iter()
        .filter_map(|item| match item {
            Value::Object(record) => Some(record),
            _ => None,
        })
        .collect();
    if records.len() < total {
        tracing::warn!(
            dropped = total - records.len(),
            "ignoring non-object entries in record list"
        );
    }
    records
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
