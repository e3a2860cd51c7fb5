//! The shared HTTP client
//!
//! Every service call goes through [`HttpClient::request`] (or
//! [`HttpClient::upload`]):
//! 1. the interceptor rewrites URL, timeout and headers
//! 2. the transport sends the request
//! 3. the response is classified into exactly one `Ok` or `Err`
//!
//! Failures are surfaced to the user once (toast) and, for 401, invalidate the
//! session and open the login page. Nothing is retried.

use std::sync::Arc;

use miniapp_store::TokenSource;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::config::{BusinessCheck, ClientConfig, StatusSource};
use crate::envelope::{BusinessCode, Envelope};
use crate::error::{ApiError, Result};
use crate::host::{LogNavigator, LogNotifier, Navigator, Notifier, Toast};
use crate::interceptor::{HttpInterceptor, Interceptor};
use crate::request::{RequestOptions, UploadOptions};
use crate::transport::{RawResponse, Transport, TransportError};
use crate::utils::log_sanitizer::truncate_for_log;

/// Shared HTTP client. Cheap to share behind an `Arc`; holds no per-call state.
pub struct HttpClient {
    config: ClientConfig,
    transport: Arc<dyn Transport>,
    interceptor: Arc<dyn Interceptor>,
    tokens: Arc<dyn TokenSource>,
    notifier: Arc<dyn Notifier>,
    navigator: Arc<dyn Navigator>,
}

/// Builder for [`HttpClient`].
pub struct HttpClientBuilder {
    config: ClientConfig,
    transport: Arc<dyn Transport>,
    tokens: Arc<dyn TokenSource>,
    interceptor: Option<Arc<dyn Interceptor>>,
    notifier: Arc<dyn Notifier>,
    navigator: Arc<dyn Navigator>,
}

impl HttpClientBuilder {
    /// Host toast implementation (default: [`LogNotifier`]).
    #[must_use]
    pub fn notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = notifier;
        self
    }

    /// Host navigation implementation (default: [`LogNavigator`]).
    #[must_use]
    pub fn navigator(mut self, navigator: Arc<dyn Navigator>) -> Self {
        self.navigator = navigator;
        self
    }

    /// Replace the default [`HttpInterceptor`].
    #[must_use]
    pub fn interceptor(mut self, interceptor: Arc<dyn Interceptor>) -> Self {
        self.interceptor = Some(interceptor);
        self
    }

    pub fn build(self) -> HttpClient {
        let interceptor = self.interceptor.unwrap_or_else(|| {
            Arc::new(HttpInterceptor::new(&self.config, self.tokens.clone()))
        });
        HttpClient {
            config: self.config,
            transport: self.transport,
            interceptor,
            tokens: self.tokens,
            notifier: self.notifier,
            navigator: self.navigator,
        }
    }
}

impl HttpClient {
    pub fn builder(
        config: ClientConfig,
        transport: Arc<dyn Transport>,
        tokens: Arc<dyn TokenSource>,
    ) -> HttpClientBuilder {
        HttpClientBuilder {
            config,
            transport,
            tokens,
            interceptor: None,
            notifier: Arc::new(LogNotifier),
            navigator: Arc::new(LogNavigator),
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Send one request and classify its response.
    pub async fn request<T: DeserializeOwned>(
        &self,
        mut options: RequestOptions,
    ) -> Result<Envelope<T>> {
        self.interceptor.invoke(&mut options);
        match self.transport.request(&options).await {
            Ok(response) => self.classify(response),
            Err(error) => Err(self.transport_failed(error)),
        }
    }

    /// Upload one file and classify the response like [`request`](Self::request).
    pub async fn upload<T: DeserializeOwned>(
        &self,
        mut options: UploadOptions,
    ) -> Result<Envelope<T>> {
        self.interceptor
            .invoke_upload(&mut options, self.transport.upload_accepts_timeout());
        match self.transport.upload(&options).await {
            Ok(response) => self.classify(response),
            Err(error) => Err(self.transport_failed(error)),
        }
    }

    fn classify<T: DeserializeOwned>(&self, response: RawResponse) -> Result<Envelope<T>> {
        let result = match self.config.status_source {
            StatusSource::Transport => self.classify_by_transport(response),
            StatusSource::BusinessCode => self.classify_by_code(response),
        };
        if let Err(e) = &result {
            if e.is_expected() {
                log::warn!("Request failed: {e}");
            } else {
                log::error!("Request failed: {e}");
            }
        }
        result
    }

    fn classify_by_transport<T: DeserializeOwned>(
        &self,
        response: RawResponse,
    ) -> Result<Envelope<T>> {
        if response.is_success() {
            let envelope = match self.config.envelope.decode::<Value>(&response.body) {
                Ok(envelope) => envelope,
                Err(e) => {
                    // 缺少 code 的 2xx 响应仍可能带有后端提示
                    let message = self.config.envelope.message_of(&response.body);
                    return Err(self.parse_failed(&e, message.as_deref(), response));
                }
            };
            if self.business_succeeded(&envelope.code) {
                return self.finish(envelope, response);
            }
            return Err(self.business_failed(envelope, response));
        }

        if response.status_code == 401 {
            return Err(self.unauthorized(response));
        }

        let message = self.config.envelope.message_of(&response.body);
        self.toast(message.as_deref());
        Err(ApiError::Http {
            status_code: response.status_code,
            message,
            response,
        })
    }

    /// `code` read as an HTTP status; bodies without an envelope fall back to
    /// the transport status.
    fn classify_by_code<T: DeserializeOwned>(&self, response: RawResponse) -> Result<Envelope<T>> {
        let Ok(envelope) = self.config.envelope.decode::<Value>(&response.body) else {
            return self.classify_by_transport(response);
        };
        if envelope.code.is_http_success() {
            self.finish(envelope, response)
        } else if envelope.code.as_i64() == Some(401) {
            Err(self.unauthorized(response))
        } else {
            Err(self.business_failed(envelope, response))
        }
    }

    fn business_succeeded(&self, code: &BusinessCode) -> bool {
        match &self.config.business_check {
            BusinessCheck::None => true,
            BusinessCheck::CodeEquals(expected) => {
                matches!(code, BusinessCode::Number(n) if n == expected)
            }
            BusinessCheck::CodeText(expected) => {
                matches!(code, BusinessCode::Text(s) if s == expected)
            }
        }
    }

    /// Decode the payload into the caller's type.
    fn finish<T: DeserializeOwned>(
        &self,
        envelope: Envelope<Value>,
        response: RawResponse,
    ) -> Result<Envelope<T>> {
        let data = match envelope.data {
            None | Some(Value::Null) => None,
            Some(value) => match serde_json::from_value(value) {
                Ok(data) => Some(data),
                Err(e) => return Err(self.parse_failed(&e, None, response)),
            },
        };
        Ok(Envelope {
            code: envelope.code,
            message: envelope.message,
            data,
        })
    }

    fn transport_failed(&self, error: TransportError) -> ApiError {
        log::error!("Transport failure: {error}");
        self.notifier
            .show_toast(Toast::text(self.config.network_error_text.clone()));
        ApiError::Transport { error }
    }

    fn business_failed(&self, envelope: Envelope<Value>, response: RawResponse) -> ApiError {
        let message = envelope.message.filter(|m| !m.is_empty());
        self.toast(message.as_deref());
        ApiError::Business {
            code: envelope.code,
            message,
            response,
        }
    }

    fn parse_failed(
        &self,
        error: &serde_json::Error,
        message: Option<&str>,
        response: RawResponse,
    ) -> ApiError {
        log::error!("JSON parse failed: {error}");
        log::error!("Raw response: {}", truncate_for_log(&response.body));
        self.toast(message);
        ApiError::Parse {
            detail: error.to_string(),
            response,
        }
    }

    fn unauthorized(&self, response: RawResponse) -> ApiError {
        log::warn!(
            "Session rejected (HTTP {}), redirecting to {}",
            response.status_code,
            self.config.login_page
        );
        self.tokens.invalidate();
        self.navigator.navigate_to(&self.config.login_page);
        ApiError::Unauthorized { response }
    }

    fn toast(&self, message: Option<&str>) {
        let title = message.unwrap_or(&self.config.fallback_error_text);
        self.notifier.show_toast(Toast::text(title));
    }
}
