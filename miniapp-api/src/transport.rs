//! Transport boundary
//!
//! The host network layer is an external collaborator: it takes fully
//! prepared options and reports either a response (any status) or a failure
//! that produced no response at all. Classification happens in
//! [`HttpClient`](crate::HttpClient), never here.

use std::collections::BTreeMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::request::{RequestOptions, UploadOptions};

/// Response as delivered by the transport, before any classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawResponse {
    pub status_code: u16,
    /// Response body text.
    pub body: String,
}

impl RawResponse {
    pub fn new(status_code: u16, body: impl Into<String>) -> Self {
        Self {
            status_code,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }

    /// Body as JSON, `None` when it is not valid JSON.
    pub fn json(&self) -> Option<serde_json::Value> {
        serde_json::from_str(&self.body).ok()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransportErrorKind {
    /// Connection refused, DNS failure, TLS failure, body read failure.
    Network,
    /// The request timeout elapsed.
    Timeout,
    /// The upload source file could not be read.
    File,
}

/// Failure that produced no response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransportError {
    pub kind: TransportErrorKind,
    pub detail: String,
}

impl TransportError {
    pub fn new(kind: TransportErrorKind, detail: impl Into<String>) -> Self {
        Self {
            kind,
            detail: detail.into(),
        }
    }

    pub fn network(detail: impl Into<String>) -> Self {
        Self::new(TransportErrorKind::Network, detail)
    }

    pub fn timeout(detail: impl Into<String>) -> Self {
        Self::new(TransportErrorKind::Timeout, detail)
    }
}

impl std::fmt::Display for TransportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            TransportErrorKind::Network => write!(f, "Network error: {}", self.detail),
            TransportErrorKind::Timeout => write!(f, "Request timeout: {}", self.detail),
            TransportErrorKind::File => write!(f, "Upload file error: {}", self.detail),
        }
    }
}

impl std::error::Error for TransportError {}

/// Header map as sent on the wire. Ordered for stable logs and assertions.
pub type Headers = BTreeMap<String, String>;

/// Host network layer
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send an ordinary request.
    async fn request(&self, options: &RequestOptions) -> Result<RawResponse, TransportError>;

    /// Upload one local file as multipart form data.
    async fn upload(&self, options: &UploadOptions) -> Result<RawResponse, TransportError>;

    /// Whether [`upload`](Self::upload) honours [`UploadOptions::timeout`].
    ///
    /// When `false` the interceptor leaves the upload timeout untouched.
    fn upload_accepts_timeout(&self) -> bool {
        true
    }
}
