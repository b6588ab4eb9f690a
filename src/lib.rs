//! Soko Tracker Library
//!
//! A Rust library for polling Nairobi Securities Exchange share prices from
//! a server-rendered exchange listings page into styled Excel workbooks.
//!
//! This library provides tools for:
//! - Fetching the live listings page with a fixed-timeout HTTP client
//! - Extracting the flat reference-array payload embedded in the page markup
//! - Decoding the reference array into typed, validated share quotes while
//!   skipping malformed entries without aborting the batch
//! - Writing a styled market/portfolio workbook
//! - Rendering and emailing a scheduled portfolio summary

pub mod config;
pub mod constants;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod mailer;
        pub mod market_hours;
        pub mod page_fetcher;
        pub mod payload_decoder;
        pub mod payload_extractor;
        pub mod report;
        pub mod workbook_writer;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use app::models::Quote;
pub use config::Config;

/// Result type alias for the soko tracker
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for tracker operations
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Page fetch failed
    #[error("HTTP error fetching '{url}': {message}")]
    Http {
        url: String,
        message: String,
        #[source]
        source: Option<reqwest::Error>,
    },

    /// The payload script tag was not present in the page markup
    #[error("payload not found: {message}")]
    PayloadMissing { message: String },

    /// The payload text was not valid JSON
    #[error("payload parse error: {message}")]
    PayloadParse {
        message: String,
        #[source]
        source: serde_json::Error,
    },

    /// The payload parsed but did not have the expected top-level shape
    #[error("payload shape error: {message}")]
    PayloadShape { message: String },

    /// Neither the well-known position nor the fallback scan produced a
    /// listing index array; the whole batch is unusable
    #[error("listing index array not found in payload of {store_len} nodes")]
    RootNotFound { store_len: usize },

    /// Workbook writing error
    #[error("workbook error: {message}")]
    Workbook {
        message: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Email rendering or delivery error
    #[error("email error: {message}")]
    Email {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Configuration error
    #[error("configuration error: {message}")]
    Configuration { message: String },

    /// Data validation error
    #[error("data validation error: {message}")]
    DataValidation { message: String },

    /// Processing interrupted
    #[error("interrupted: {reason}")]
    Interrupted { reason: String },
}

impl Error {
    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create an HTTP error with context
    pub fn http(
        url: impl Into<String>,
        message: impl Into<String>,
        source: Option<reqwest::Error>,
    ) -> Self {
        Self::Http {
            url: url.into(),
            message: message.into(),
            source,
        }
    }

    /// Create a missing-payload error
    pub fn payload_missing(message: impl Into<String>) -> Self {
        Self::PayloadMissing {
            message: message.into(),
        }
    }

    /// Create a payload parse error
    pub fn payload_parse(message: impl Into<String>, source: serde_json::Error) -> Self {
        Self::PayloadParse {
            message: message.into(),
            source,
        }
    }

    /// Create a payload shape error
    pub fn payload_shape(message: impl Into<String>) -> Self {
        Self::PayloadShape {
            message: message.into(),
        }
    }

    /// Create a root-not-found error
    pub fn root_not_found(store_len: usize) -> Self {
        Self::RootNotFound { store_len }
    }

    /// Create a workbook error with context
    pub fn workbook(
        message: impl Into<String>,
        source: Box<dyn std::error::Error + Send + Sync>,
    ) -> Self {
        Self::Workbook {
            message: message.into(),
            source,
        }
    }

    /// Create an email error with context
    pub fn email(
        message: impl Into<String>,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self::Email {
            message: message.into(),
            source,
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a data validation error
    pub fn data_validation(message: impl Into<String>) -> Self {
        Self::DataValidation {
            message: message.into(),
        }
    }

    /// Create an interrupted error
    pub fn interrupted(reason: impl Into<String>) -> Self {
        Self::Interrupted {
            reason: reason.into(),
        }
    }
}

// Automatic conversions from common error types
impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: "I/O operation failed".to_string(),
            source: error,
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(error: reqwest::Error) -> Self {
        let url = error
            .url()
            .map(|u| u.to_string())
            .unwrap_or_else(|| "unknown".to_string());
        Self::Http {
            url,
            message: "request failed".to_string(),
            source: Some(error),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Self::PayloadParse {
            message: "JSON parsing failed".to_string(),
            source: error,
        }
    }
}

impl From<rust_xlsxwriter::XlsxError> for Error {
    fn from(error: rust_xlsxwriter::XlsxError) -> Self {
        Self::Workbook {
            message: "workbook write failed".to_string(),
            source: Box::new(error),
        }
    }
}
