//! `reqwest`-backed transport
//!
//! Sends already-intercepted options as-is, logs the exchange, and reports any
//! received response (whatever its status) as a [`RawResponse`]. Status
//! classification is left to the client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder};
use serde_json::Value;

use crate::request::{Method, RequestOptions, UploadOptions};
use crate::transport::{Headers, RawResponse, Transport, TransportError, TransportErrorKind};
use crate::utils::log_sanitizer::{mask_header_value, truncate_for_log};

/// 默认连接超时（秒）
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
/// 默认请求超时（秒），请求自身未设置 timeout 时生效
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Connection settings of [`ReqwestTransport`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransportConfig {
    pub connect_timeout: Duration,
    /// Fallback when a request carries no timeout of its own.
    pub request_timeout: Duration,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }
}

/// Production transport.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new(config: TransportConfig) -> Result<Self, TransportError> {
        let client = Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| TransportError::network(format!("Failed to create HTTP client: {e}")))?;
        Ok(Self { client })
    }

    /// Wrap an existing client (shared connection pool, custom TLS, …).
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    fn builder(&self, method: Method, url: &str) -> RequestBuilder {
        let method = match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
            Method::Patch => reqwest::Method::PATCH,
            Method::Head => reqwest::Method::HEAD,
            Method::Options => reqwest::Method::OPTIONS,
            Method::Trace => reqwest::Method::TRACE,
            Method::Connect => reqwest::Method::CONNECT,
        };
        self.client.request(method, url)
    }

    /// Send a request and read the body, whatever the status.
    async fn execute(
        request_builder: RequestBuilder,
        method_name: &str,
        url: &str,
    ) -> Result<RawResponse, TransportError> {
        log::debug!("{method_name} {url}");

        let response = request_builder.send().await.map_err(|e| {
            if e.is_timeout() {
                TransportError::timeout(e.to_string())
            } else {
                TransportError::network(e.to_string())
            }
        })?;

        let status_code = response.status().as_u16();
        log::debug!("Response Status: {status_code}");

        let body = response.text().await.map_err(|e| {
            if e.is_timeout() {
                TransportError::timeout(format!("Failed to read response body: {e}"))
            } else {
                TransportError::network(format!("Failed to read response body: {e}"))
            }
        })?;

        log::debug!("Response Body: {}", truncate_for_log(&body));

        Ok(RawResponse { status_code, body })
    }
}

fn apply_headers(mut builder: RequestBuilder, header: Option<&Headers>) -> RequestBuilder {
    for (name, value) in header.into_iter().flatten() {
        log::trace!("Header {name}: {}", mask_header_value(name, value));
        builder = builder.header(name.as_str(), value.as_str());
    }
    builder
}

/// Flatten `data` into query pairs the way the host runtime does for `GET`:
/// scalars are stringified, `null` is dropped, nested values are sent as JSON.
pub(crate) fn query_pairs(data: &Value) -> Vec<(String, String)> {
    let Value::Object(map) = data else {
        return Vec::new();
    };
    map.iter()
        .filter_map(|(key, value)| {
            let text = match value {
                Value::Null => return None,
                Value::String(s) => s.clone(),
                Value::Bool(_) | Value::Number(_) | Value::Array(_) | Value::Object(_) => {
                    value.to_string()
                }
            };
            Some((key.clone(), text))
        })
        .collect()
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn request(&self, options: &RequestOptions) -> Result<RawResponse, TransportError> {
        let mut builder = self.builder(options.method, &options.url);
        builder = apply_headers(builder, options.header.as_ref());
        if let Some(timeout) = options.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(data) = &options.data {
            if options.method.sends_query() {
                builder = builder.query(&query_pairs(data));
            } else {
                log::debug!("Request Body: {}", truncate_for_log(&data.to_string()));
                builder = builder.body(data.to_string());
            }
        }
        Self::execute(builder, options.method.as_str(), &options.url).await
    }

    async fn upload(&self, options: &UploadOptions) -> Result<RawResponse, TransportError> {
        let bytes = tokio::fs::read(&options.file_path).await.map_err(|e| {
            TransportError::new(
                TransportErrorKind::File,
                format!("{}: {e}", options.file_path.display()),
            )
        })?;
        let file_name = options
            .file_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| options.name.clone());

        let mut form = Form::new().part(options.name.clone(), Part::bytes(bytes).file_name(file_name));
        for (key, value) in &options.form_data {
            form = form.text(key.clone(), value.clone());
        }

        let mut builder = self.builder(Method::Post, &options.url);
        builder = apply_headers(builder, options.header.as_ref());
        if let Some(timeout) = options.timeout {
            builder = builder.timeout(timeout);
        }
        Self::execute(builder.multipart(form), "UPLOAD", &options.url).await
    }
}
