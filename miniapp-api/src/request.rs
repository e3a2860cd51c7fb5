//! Outgoing request options

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::transport::Headers;

/// HTTP verbs accepted by the host request primitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
    Patch,
    Head,
    Options,
    Trace,
    Connect,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
            Self::Patch => "PATCH",
            Self::Head => "HEAD",
            Self::Options => "OPTIONS",
            Self::Trace => "TRACE",
            Self::Connect => "CONNECT",
        }
    }

    /// `GET`-like verbs send `data` as a query string instead of a body.
    pub fn sends_query(self) -> bool {
        matches!(self, Self::Get | Self::Head)
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Options of one ordinary request.
///
/// Built by the service modules with a relative `url`; the interceptor turns
/// it into a dispatchable request.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestOptions {
    pub url: String,
    pub method: Method,
    pub data: Option<Value>,
    pub header: Option<Headers>,
    pub timeout: Option<Duration>,
}

impl RequestOptions {
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            method,
            data: None,
            header: None,
            timeout: None,
        }
    }

    pub fn get(url: impl Into<String>) -> Self {
        Self::new(Method::Get, url)
    }

    pub fn post(url: impl Into<String>) -> Self {
        Self::new(Method::Post, url)
    }

    pub fn delete(url: impl Into<String>) -> Self {
        Self::new(Method::Delete, url)
    }

    #[must_use]
    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }

    /// Header value, if set.
    pub fn header_value(&self, name: &str) -> Option<&str> {
        self.header.as_ref()?.get(name).map(String::as_str)
    }
}

/// Options of one file upload (the host `uploadFile` capability).
#[derive(Debug, Clone, PartialEq)]
pub struct UploadOptions {
    pub url: String,
    /// Local path of the file to send.
    pub file_path: PathBuf,
    /// Multipart field name of the file.
    pub name: String,
    /// Extra text fields sent alongside the file.
    pub form_data: Vec<(String, String)>,
    pub header: Option<Headers>,
    pub timeout: Option<Duration>,
}

impl UploadOptions {
    pub fn new(url: impl Into<String>, file_path: impl Into<PathBuf>, name: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            file_path: file_path.into(),
            name: name.into(),
            form_data: Vec::new(),
            header: None,
            timeout: None,
        }
    }

    #[must_use]
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.form_data.push((key.into(), value.into()));
        self
    }

    pub fn header_value(&self, name: &str) -> Option<&str> {
        self.header.as_ref()?.get(name).map(String::as_str)
    }
}
