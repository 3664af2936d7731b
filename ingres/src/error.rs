use thiserror::Error;
use wris_api::WrisError;

/// Errors that can occur when setting up or calling the INGRES client.
///
/// Query failures are not reported here: they come back as error
/// envelopes. These cover construction and malformed tool invocations.
#[derive(Error, Debug)]
pub enum IngresError {
    /// Error from the underlying WRIS binding
    #[error("WRIS API error: {0}")]
    WrisError(#[from] WrisError),

    /// HTTP client construction error
    #[error("HTTP client error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Invalid URL error
    #[error("Invalid URL: {0}")]
    UrlError(#[from] url::ParseError),

    /// No tool is registered under this name
    #[error("Unknown tool: {name}")]
    UnknownTool { name: String },

    /// Configuration error
    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    /// Validation error
    #[error("Validation error: {message}")]
    ValidationError { message: String },
}

impl IngresError {
    /// Create a new unknown tool error
    pub fn unknown_tool<S: Into<String>>(name: S) -> Self {
        Self::UnknownTool { name: name.into() }
    }

    /// Create a new configuration error
    pub fn config_error<S: Into<String>>(message: S) -> Self {
        Self::ConfigError {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation_error<S: Into<String>>(message: S) -> Self {
        Self::ValidationError {
            message: message.into(),
        }
    }
}

/// Type alias for Results using IngresError
pub type Result<T> = std::result::Result<T, IngresError>;
