//! Client configuration
//!
//! Everything that differs between deployments of the mini-program lives
//! here and is fixed when the [`HttpClient`](crate::HttpClient) is built.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::envelope::EnvelopeKind;

/// 默认后端地址（开发与生产环境相同）
pub const DEFAULT_BASE_URL: &str = "https://xklandlxy.art";
/// 默认 API 路径前缀
pub const DEFAULT_API_PREFIX: &str = "/api";
/// 默认请求超时（毫秒）
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;
/// 小程序端请求头标识
pub const DEFAULT_CLIENT_SOURCE: &str = "miniapp";
/// 登录页路由
pub const DEFAULT_LOGIN_PAGE: &str = "/pages/login/login";
pub const DEFAULT_NETWORK_ERROR_TEXT: &str = "网络错误";
pub const DEFAULT_FALLBACK_ERROR_TEXT: &str = "请求失败";

/// How the token is attached to outgoing requests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AuthScheme {
    /// `Authorization: Bearer <token>`
    #[default]
    Bearer,
    /// `TOKEN: <token>`
    RawToken,
}

impl AuthScheme {
    pub fn header_name(self) -> &'static str {
        match self {
            Self::Bearer => "Authorization",
            Self::RawToken => "TOKEN",
        }
    }

    pub fn header_value(self, token: &str) -> String {
        match self {
            Self::Bearer => format!("Bearer {token}"),
            Self::RawToken => token.to_string(),
        }
    }
}

/// Where the success / 401 decision is read from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StatusSource {
    /// The transport status line; the envelope code is then checked with
    /// [`BusinessCheck`].
    #[default]
    Transport,
    /// The envelope `code`, read as if it were an HTTP status:
    /// `[200, 300)` succeeds, `401` invalidates the session.
    BusinessCode,
}

/// Success rule for the envelope code on a 2xx transport response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "camelCase")]
pub enum BusinessCheck {
    /// Any decodable envelope succeeds.
    None,
    /// Succeeds iff the code is the JSON number given.
    CodeEquals(i64),
    /// Succeeds iff the code is the JSON string given.
    CodeText(String),
}

impl Default for BusinessCheck {
    fn default() -> Self {
        Self::CodeEquals(200)
    }
}

/// Client configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ClientConfig {
    /// Scheme and host prepended to relative URLs, without trailing slash.
    pub base_url: String,
    /// Path prefix inserted before relative URLs that lack it; `None` disables
    /// insertion.
    pub api_prefix: Option<String>,
    /// Request timeout in milliseconds.
    pub timeout_ms: u64,
    /// Value of the `source-client` header.
    pub client_source: String,
    pub auth_scheme: AuthScheme,
    pub envelope: EnvelopeKind,
    pub status_source: StatusSource,
    pub business_check: BusinessCheck,
    /// Route opened after a 401.
    pub login_page: String,
    /// Toast shown on transport failure.
    pub network_error_text: String,
    /// Toast shown when the server gives no message.
    pub fallback_error_text: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_prefix: Some(DEFAULT_API_PREFIX.to_string()),
            timeout_ms: DEFAULT_TIMEOUT_MS,
            client_source: DEFAULT_CLIENT_SOURCE.to_string(),
            auth_scheme: AuthScheme::default(),
            envelope: EnvelopeKind::default(),
            status_source: StatusSource::default(),
            business_check: BusinessCheck::default(),
            login_page: DEFAULT_LOGIN_PAGE.to_string(),
            network_error_text: DEFAULT_NETWORK_ERROR_TEXT.to_string(),
            fallback_error_text: DEFAULT_FALLBACK_ERROR_TEXT.to_string(),
        }
    }
}

impl ClientConfig {
    /// Default configuration pointed at another backend.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::default().with_base_url(base_url)
    }

    /// Load from a JSON document; absent fields keep their defaults.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        let mut config: Self = serde_json::from_str(json)?;
        config.base_url = trim_base_url(&config.base_url);
        Ok(config)
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = trim_base_url(&base_url.into());
        self
    }

    #[must_use]
    pub fn with_api_prefix(mut self, prefix: Option<&str>) -> Self {
        self.api_prefix = prefix.map(str::to_string);
        self
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX);
        self
    }

    #[must_use]
    pub fn with_auth_scheme(mut self, scheme: AuthScheme) -> Self {
        self.auth_scheme = scheme;
        self
    }

    #[must_use]
    pub fn with_envelope(mut self, kind: EnvelopeKind) -> Self {
        self.envelope = kind;
        self
    }

    #[must_use]
    pub fn with_status_source(mut self, source: StatusSource) -> Self {
        self.status_source = source;
        self
    }

    #[must_use]
    pub fn with_business_check(mut self, check: BusinessCheck) -> Self {
        self.business_check = check;
        self
    }

    #[must_use]
    pub fn with_login_page(mut self, page: impl Into<String>) -> Self {
        self.login_page = page.into();
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

fn trim_base_url(url: &str) -> String {
    url.trim_end_matches('/').to_string()
}
