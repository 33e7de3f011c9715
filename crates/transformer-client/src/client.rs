//! Main client implementation

use std::path::Path;

use reqwest::{
    header::{self, HeaderMap, HeaderValue},
    multipart::{Form, Part},
    Body, Client,
};
use tracing::{debug, instrument, warn};
use url::Url;

use crate::{
    paths,
    transform::Transformations,
    types::*,
    ClientError, Config, ErrorDescriptor, Result,
};

/// Transformer service client.
///
/// Holds one HTTP client per upstream so each path keeps its own timeout.
/// Every call issues exactly one request; nothing is retried or cached.
#[derive(Clone, Debug)]
pub struct TransformerClient {
    config: Config,
    api_base: Url,
    delivery_base: Url,
    api_http: Client,
    delivery_http: Client,
}

impl TransformerClient {
    /// Create a new client with the given configuration.
    ///
    /// Fails with [`ClientError::Config`] when the secret is empty or a base
    /// URL does not parse.
    pub fn new(config: Config) -> Result<Self> {
        if config.secret.is_empty() {
            return Err(ClientError::Config("No secret key provided".to_string()));
        }

        let api_base = parse_base("api_url", &config.api_url)?;
        let delivery_base = parse_base("delivery_url", &config.delivery_url)?;

        let mut headers = HeaderMap::new();
        headers.insert(
            header::USER_AGENT,
            HeaderValue::from_str(&config.user_agent)
                .map_err(|e| ClientError::Config(format!("Invalid user agent: {}", e)))?,
        );

        let api_http = Client::builder()
            .timeout(config.api_timeout)
            .default_headers(headers.clone())
            .build()
            .map_err(ClientError::Http)?;

        let delivery_http = Client::builder()
            .timeout(config.delivery_timeout)
            .default_headers(headers)
            .build()
            .map_err(ClientError::Http)?;

        Ok(Self {
            config,
            api_base,
            delivery_base,
            api_http,
            delivery_http,
        })
    }

    /// Create with a secret and the default endpoints
    pub fn with_secret(secret: &str) -> Result<Self> {
        Self::new(Config::new(secret))
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    // ==================== Asset Lifecycle ====================

    /// Upload a new asset under `identifier` in `folder`
    #[instrument(skip(self, filename), fields(filename = %filename.as_ref().display()))]
    pub async fn add(
        &self,
        filename: impl AsRef<Path>,
        identifier: &str,
        folder: &str,
    ) -> Result<ApiResult> {
        let params = ApiParams::new()
            .with_file("filename", filename.as_ref())
            .with("identifier", identifier)
            .with("folder", folder);
        self.call_api(ApiAction::Add.as_str(), params).await
    }

    /// Upload a new version of an asset, renaming it from `old_identifier`
    /// to `new_identifier`
    #[instrument(skip(self, filename), fields(filename = %filename.as_ref().display()))]
    pub async fn update(
        &self,
        filename: impl AsRef<Path>,
        old_identifier: &str,
        new_identifier: &str,
    ) -> Result<ApiResult> {
        let params = ApiParams::new()
            .with_file("filename", filename.as_ref())
            .with("old_identifier", old_identifier)
            .with("new_identifier", new_identifier);
        self.call_api(ApiAction::Update.as_str(), params).await
    }

    /// Block a media
    #[instrument(skip(self))]
    pub async fn block(&self, mediaid: i64) -> Result<ApiResult> {
        self.media_action(ApiAction::Block, mediaid).await
    }

    /// Delete a media
    #[instrument(skip(self))]
    pub async fn delete(&self, mediaid: i64) -> Result<ApiResult> {
        self.media_action(ApiAction::Delete, mediaid).await
    }

    /// Activate a media
    #[instrument(skip(self))]
    pub async fn activate(&self, mediaid: i64) -> Result<ApiResult> {
        self.media_action(ApiAction::Activate, mediaid).await
    }

    /// List the stored versions of an identifier
    #[instrument(skip(self))]
    pub async fn versions(&self, identifier: &str) -> Result<ApiResult> {
        let params = ApiParams::new().with("identifier", identifier);
        self.call_api(ApiAction::Versions.as_str(), params).await
    }

    /// Send a multipart POST to `<api_url>/<action>`.
    ///
    /// The `key` field always comes first, followed by `params` in order.
    /// Only unreadable upload files fail the call; transport and decoding
    /// problems are reported inside the returned [`ApiResult`]. Any HTTP
    /// status with a JSON body yields the decoded body.
    #[instrument(skip(self, params), fields(fields = params.len()))]
    pub async fn call_api(&self, action: &str, params: ApiParams) -> Result<ApiResult> {
        let form = self.build_form(&params).await?;

        let url = match self.api_base.join(action) {
            Ok(url) => url,
            Err(e) => {
                return Ok(Err(ErrorDescriptor::new(
                    ErrorDescriptor::REQUEST,
                    format!("Invalid action {}: {}", action, e),
                )))
            }
        };

        Ok(self.send_api(url, form).await)
    }

    // ==================== Delivery ====================

    /// Delivery URL for an asset and its transformations. `stash` is
    /// accepted but not part of the URL.
    pub fn get_url(
        &self,
        stash: &str,
        folder: &str,
        identifier: &str,
        transformations: &Transformations,
    ) -> String {
        paths::delivery_url(
            &self.config.delivery_url,
            stash,
            folder,
            identifier,
            transformations,
        )
    }

    /// Fetch an asset by folder and identifier
    #[instrument(skip(self))]
    pub async fn get(
        &self,
        stash: &str,
        folder: &str,
        identifier: &str,
        transformations: &Transformations,
    ) -> DeliveryResult {
        let url = self.get_url(stash, folder, identifier, transformations);
        self.call_delivery(&url).await
    }

    /// Fetch an asset by its media id
    #[instrument(skip(self))]
    pub async fn get_by_id(&self, media_id: i64) -> DeliveryResult {
        self.call_delivery(&format!("getid/{}", media_id)).await
    }

    /// Send a GET to `path`, resolved against the delivery base URL.
    ///
    /// An absolute URL replaces the base. No credential is attached. The
    /// response is returned as is, whatever its status.
    #[instrument(skip(self))]
    pub async fn call_delivery(&self, path: &str) -> DeliveryResult {
        let url = self.delivery_base.join(path).map_err(|e| {
            ErrorDescriptor::new(
                ErrorDescriptor::REQUEST,
                format!("Invalid delivery path {}: {}", path, e),
            )
        })?;

        debug!("Sending GET request to {}", url);
        let response = self
            .delivery_http
            .get(url)
            .send()
            .await
            .map_err(|e| transport_failure(&e))?;

        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await.map_err(|e| transport_failure(&e))?;
        debug!(status = status.as_u16(), bytes = body.len(), "Delivery response");

        Ok(DeliveryResponse {
            status,
            headers,
            body,
        })
    }

    // ==================== Helper Methods ====================

    async fn media_action(&self, action: ApiAction, mediaid: i64) -> Result<ApiResult> {
        let params = ApiParams::new().with("mediaid", mediaid);
        self.call_api(action.as_str(), params).await
    }

    async fn build_form(&self, params: &ApiParams) -> Result<Form> {
        let mut form = Form::new().text("key", self.config.secret.clone());

        for (name, value) in params.iter() {
            form = match value {
                ParamValue::Text(text) => form.text(name.to_string(), text.clone()),
                ParamValue::File(path) => form.part(name.to_string(), file_part(path).await?),
            };
        }

        Ok(form)
    }

    async fn send_api(&self, url: Url, form: Form) -> ApiResult {
        debug!("Sending POST request to {}", url);
        let response = self
            .api_http
            .post(url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| transport_failure(&e))?;

        // 400 and 404 carry business errors as JSON, so the status is not checked.
        let status = response.status();
        let body = response.bytes().await.map_err(|e| transport_failure(&e))?;
        debug!(status = status.as_u16(), bytes = body.len(), "API response");

        serde_json::from_slice(&body).map_err(|e| {
            warn!(status = status.as_u16(), "API returned a non-JSON body: {}", e);
            ErrorDescriptor::from_decode(&e)
        })
    }
}

// Streams the file from disk; only opening it happens before the request.
async fn file_part(path: &Path) -> Result<Part> {
    let file_access = |source: std::io::Error| ClientError::FileAccess {
        path: path.to_path_buf(),
        source,
    };
    let file = tokio::fs::File::open(path).await.map_err(file_access)?;
    let length = file.metadata().await.map_err(file_access)?.len();

    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "upload".to_string());
    let mime = mime_guess::from_path(path).first_or_octet_stream();

    Ok(Part::stream_with_length(Body::from(file), length)
        .file_name(file_name)
        .mime_str(mime.as_ref())?)
}

fn transport_failure(err: &reqwest::Error) -> ErrorDescriptor {
    let descriptor = ErrorDescriptor::from_transport(err);
    warn!("Request failed: {}", descriptor);
    descriptor
}

// Relative references resolve against the last `/` of the base path, so a
// base without a trailing slash would drop its last segment.
fn parse_base(name: &str, raw: &str) -> Result<Url> {
    let mut url = Url::parse(raw)
        .map_err(|e| ClientError::Config(format!("Invalid {} {:?}: {}", name, raw, e)))?;

    if url.cannot_be_a_base() {
        return Err(ClientError::Config(format!(
            "Invalid {} {:?}: not a base URL",
            name, raw
        )));
    }

    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }

    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_secret_rejected() {
        let err = TransformerClient::new(Config::new("")).unwrap_err();
        assert!(err.is_config());

        let err = TransformerClient::new(
            Config::new("")
                .with_api_url("not a url")
                .with_delivery_url("http://localhost/"),
        )
        .unwrap_err();
        assert!(matches!(err, ClientError::Config(msg) if msg.contains("secret")));
    }

    #[test]
    fn test_invalid_base_url_rejected() {
        let err = TransformerClient::new(Config::new("k").with_api_url("not a url")).unwrap_err();
        assert!(err.is_config());

        let err = TransformerClient::new(Config::new("k").with_delivery_url("mailto:someone"))
            .unwrap_err();
        assert!(err.is_config());
    }

    #[test]
    fn test_parse_base_adds_trailing_slash() {
        let url = parse_base("api_url", "http://localhost:9000/api/v1").unwrap();
        assert_eq!(url.join("add").unwrap().as_str(), "http://localhost:9000/api/v1/add");

        let url = parse_base("api_url", "https://transformer.goodbaby.eu/api/v1/").unwrap();
        assert_eq!(
            url.join("versions").unwrap().as_str(),
            "https://transformer.goodbaby.eu/api/v1/versions"
        );
    }

    #[test]
    fn test_get_url_uses_delivery_base() {
        let client = TransformerClient::new(
            Config::new("k").with_delivery_url("https://images.goodbaby.eu/"),
        )
        .unwrap();

        let set = Transformations::new().width(150).height(100);
        assert_eq!(
            client.get_url("cybex", "360images", "image01", &set),
            "https://images.goodbaby.eu/360images/image01/w-150+h-100"
        );
        assert_eq!(
            client.get_url("cybex", "360images", "image01", &Transformations::new()),
            "https://images.goodbaby.eu/360images/image01"
        );
    }

    #[test]
    fn test_debug_does_not_leak_secret() {
        let client = TransformerClient::with_secret("do-not-print-me").unwrap();
        assert!(!format!("{:?}", client).contains("do-not-print-me"));
    }
}
