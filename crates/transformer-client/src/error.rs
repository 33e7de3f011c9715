//! Client error types

use std::error::Error as StdError;
use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, ClientError>;

/// Hard failures that are returned to the caller as errors
#[derive(Error, Debug)]
pub enum ClientError {
    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// A file passed for upload could not be opened
    #[error("Cannot read file {}: {source}", .path.display())]
    FileAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The underlying HTTP client could not be built
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

impl ClientError {
    /// Check if this is a configuration error
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }

    /// Check if this is a file access error
    pub fn is_file_access(&self) -> bool {
        matches!(self, Self::FileAccess { .. })
    }
}

/// Soft failure of a single request: transport, timeout or body decoding.
///
/// Never raised as an error by the request paths; it is returned as the
/// `Err` side of [`ApiResult`](crate::ApiResult) and
/// [`DeliveryResult`](crate::DeliveryResult).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorDescriptor {
    /// Short machine readable failure class
    pub code: String,
    /// Human readable description, including the underlying causes
    pub message: String,
}

impl ErrorDescriptor {
    pub const TIMEOUT: &'static str = "timeout";
    pub const CONNECT: &'static str = "connect";
    pub const DECODE: &'static str = "decode";
    pub const BODY: &'static str = "body";
    pub const REQUEST: &'static str = "request";

    /// Create a descriptor from a code and message
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }

    /// Classify a transport level failure
    pub fn from_transport(err: &reqwest::Error) -> Self {
        let code = if err.is_timeout() {
            Self::TIMEOUT.to_string()
        } else if err.is_connect() {
            Self::CONNECT.to_string()
        } else if let Some(status) = err.status() {
            format!("http-{}", status.as_u16())
        } else if err.is_decode() {
            Self::DECODE.to_string()
        } else if err.is_body() {
            Self::BODY.to_string()
        } else {
            Self::REQUEST.to_string()
        };

        Self::new(code, error_chain(err))
    }

    /// Describe a response body that is not valid JSON
    pub fn from_decode(err: &serde_json::Error) -> Self {
        Self::new(Self::DECODE, format!("Invalid JSON response: {}", err))
    }

    /// Check if the request timed out
    pub fn is_timeout(&self) -> bool {
        self.code == Self::TIMEOUT
    }
}

impl fmt::Display for ErrorDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl StdError for ErrorDescriptor {}

// reqwest hides the interesting part (refused, dns, ...) in the source chain
fn error_chain(err: &dyn StdError) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
