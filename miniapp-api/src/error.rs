use serde::{Deserialize, Serialize};

use crate::envelope::BusinessCode;
use crate::transport::{RawResponse, TransportError};

/// Unified error type for every call made through [`HttpClient`](crate::HttpClient).
///
/// Every variant is terminal for the originating call: nothing in this crate
/// retries. Variants that come from a received response keep the raw response
/// so callers can inspect the original status and body.
///
/// | Variant | Source | Side effects already performed |
/// |---------|--------|--------------------------------|
/// | [`Transport`](Self::Transport) | network / DNS / timeout | "network error" toast |
/// | [`Unauthorized`](Self::Unauthorized) | HTTP 401 or business code 401 | session cleared, login page opened |
/// | [`Http`](Self::Http) | non-2xx status | toast with server message |
/// | [`Business`](Self::Business) | 2xx with failing business code | toast with envelope message |
/// | [`Parse`](Self::Parse) | 2xx with a body that is not an envelope | toast with fallback text |
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum ApiError {
    /// The request never produced a response.
    Transport {
        /// Original transport error.
        error: TransportError,
    },

    /// The backend rejected the session.
    Unauthorized {
        /// Original response.
        response: RawResponse,
    },

    /// The response status was outside 2xx (and not 401).
    Http {
        /// HTTP status code.
        status_code: u16,
        /// `message`/`msg` field of the body, if the body carried one.
        message: Option<String>,
        /// Original response.
        response: RawResponse,
    },

    /// The envelope's business code signalled failure.
    Business {
        /// Business code found in the envelope.
        code: BusinessCode,
        /// Envelope message, if any.
        message: Option<String>,
        /// Original response.
        response: RawResponse,
    },

    /// A successful response body could not be decoded.
    Parse {
        /// Details about the decode failure.
        detail: String,
        /// Original response.
        response: RawResponse,
    },

    /// A request payload could not be serialized.
    Serialization {
        /// Details about the serialization failure.
        detail: String,
    },
}

impl ApiError {
    /// 是否为预期行为（登录失效、业务拒绝等），用于日志分级。
    ///
    /// 返回 `true` 时应使用 `warn` 级别，`false` 时使用 `error` 级别。
    #[must_use]
    pub fn is_expected(&self) -> bool {
        match self {
            Self::Unauthorized { .. } | Self::Business { .. } => true,
            Self::Http { status_code, .. } => (400..500).contains(status_code),
            Self::Transport { .. } | Self::Parse { .. } | Self::Serialization { .. } => false,
        }
    }

    /// The raw response behind this error, when one was received.
    pub fn response(&self) -> Option<&RawResponse> {
        match self {
            Self::Unauthorized { response }
            | Self::Http { response, .. }
            | Self::Business { response, .. }
            | Self::Parse { response, .. } => Some(response),
            Self::Transport { .. } | Self::Serialization { .. } => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized { .. })
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Transport { error } => write!(f, "{error}"),
            Self::Unauthorized { response } => {
                write!(f, "Unauthorized (HTTP {})", response.status_code)
            }
            Self::Http {
                status_code,
                message,
                ..
            } => {
                if let Some(msg) = message {
                    write!(f, "HTTP {status_code}: {msg}")
                } else {
                    write!(f, "HTTP {status_code}")
                }
            }
            Self::Business { code, message, .. } => {
                if let Some(msg) = message {
                    write!(f, "Business error {code}: {msg}")
                } else {
                    write!(f, "Business error {code}")
                }
            }
            Self::Parse { detail, .. } => write!(f, "Parse error: {detail}"),
            Self::Serialization { detail } => write!(f, "Serialization error: {detail}"),
        }
    }
}

impl std::error::Error for ApiError {}

/// Convenience type alias for `Result<T, ApiError>`.
pub type Result<T> = std::result::Result<T, ApiError>;
