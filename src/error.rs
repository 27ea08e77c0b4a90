//! Error types for the lift tracker client.

use reqwest::StatusCode;
use thiserror::Error;

/// Failures of a single API call.
///
/// `Connection` means the request never reached the server. `Status` means it
/// did and the server answered with a non-2xx code; callers branch on that.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("connection error: {0}")]
    Connection(String),

    #[error("server returned {status}: {message}")]
    Status { status: StatusCode, message: String },

    #[error("failed to decode response: {0}")]
    Decode(String),

    #[error("invalid response: {0}")]
    Invalid(String),

    #[error("invalid request URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("request cancelled")]
    Cancelled,
}

impl ApiError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// True when the server answered, as opposed to transport or decode trouble.
    pub fn is_status(&self) -> bool {
        self.status().is_some()
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::Connection(err.to_string())
    }
}

/// Rejected training-max input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WeightError {
    #[error("weight is empty")]
    Empty,

    #[error("failed to parse whole portion {0:?}")]
    Whole(String),

    #[error("failed to parse fractional portion {0:?}")]
    Fraction(String),

    #[error("fractional part can only contain one digit, was {0:?}")]
    FractionTooLong(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid URL for {field}: {value:?}")]
    Url { field: &'static str, value: String },

    #[error("unknown environment {0:?}, expected \"production\" or \"development\"")]
    Environment(String),
}
