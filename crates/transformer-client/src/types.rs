//! Common types for the client SDK

use std::fmt;
use std::path::PathBuf;

use bytes::Bytes;
use reqwest::header::{HeaderMap, CONTENT_LENGTH, CONTENT_TYPE};
use reqwest::StatusCode;

use crate::error::ErrorDescriptor;

/// Outcome of an API call: the decoded JSON body, whatever the HTTP status,
/// or a descriptor of the transport/decoding failure.
pub type ApiResult = std::result::Result<serde_json::Value, ErrorDescriptor>;

/// Outcome of a delivery call: the raw response, or a descriptor of the
/// transport failure.
pub type DeliveryResult = std::result::Result<DeliveryResponse, ErrorDescriptor>;

/// Asset lifecycle endpoints of the API
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ApiAction {
    /// Upload a new asset: `filename`, `identifier`, `folder`
    Add,
    /// Replace an asset: `filename`, `old_identifier`, `new_identifier`
    Update,
    /// Block a media: `mediaid`
    Block,
    /// Delete a media: `mediaid`
    Delete,
    /// List versions of an identifier: `identifier`
    Versions,
    /// Activate a media: `mediaid`
    Activate,
}

impl ApiAction {
    /// Endpoint name, relative to the API base URL
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Update => "update",
            Self::Block => "block",
            Self::Delete => "delete",
            Self::Versions => "versions",
            Self::Activate => "activate",
        }
    }
}

impl fmt::Display for ApiAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Content of one multipart field
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParamValue {
    /// Plain text field
    Text(String),
    /// Contents of a local file, read when the request is built
    File(PathBuf),
}

impl From<&str> for ParamValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<i64> for ParamValue {
    fn from(n: i64) -> Self {
        Self::Text(n.to_string())
    }
}

impl From<PathBuf> for ParamValue {
    fn from(path: PathBuf) -> Self {
        Self::File(path)
    }
}

/// Ordered multipart fields sent after the `key` field
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ApiParams {
    fields: Vec<(String, ParamValue)>,
}

impl ApiParams {
    /// Create an empty parameter list
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a field
    pub fn with(mut self, name: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.fields.push((name.into(), value.into()));
        self
    }

    /// Append a file field
    pub fn with_file(self, name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        self.with(name, ParamValue::File(path.into()))
    }

    /// Iterate the fields in order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Raw response of the delivery service
#[derive(Clone, Debug)]
pub struct DeliveryResponse {
    /// HTTP status
    pub status: StatusCode,
    /// Response headers
    pub headers: HeaderMap,
    /// Response body, usually image data
    pub body: Bytes,
}

impl DeliveryResponse {
    /// Whether the status is 2xx
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Content type reported by the server
    pub fn content_type(&self) -> Option<&str> {
        self.headers.get(CONTENT_TYPE).and_then(|v| v.to_str().ok())
    }

    /// Content length reported by the server, falling back to the body size
    pub fn content_length(&self) -> u64 {
        self.headers
            .get(CONTENT_LENGTH)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.parse().ok())
            .unwrap_or(self.body.len() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_params_keep_order() {
        let params = ApiParams::new()
            .with_file("filename", "/tmp/a.png")
            .with("identifier", "image01")
            .with("mediaid", 42i64);

        let names: Vec<_> = params.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["filename", "identifier", "mediaid"]);
        assert_eq!(
            params.iter().last().map(|(_, v)| v.clone()),
            Some(ParamValue::Text("42".to_string()))
        );
    }

    #[test]
    fn test_action_names() {
        assert_eq!(ApiAction::Add.as_str(), "add");
        assert_eq!(ApiAction::Versions.to_string(), "versions");
    }

    #[test]
    fn test_content_length_fallback() {
        let response = DeliveryResponse {
            status: StatusCode::OK,
            headers: HeaderMap::new(),
            body: Bytes::from_static(b"abc"),
        };
        assert!(response.is_success());
        assert_eq!(response.content_length(), 3);
        assert_eq!(response.content_type(), None);
    }
}
