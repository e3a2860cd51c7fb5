//! Request interceptor
//!
//! Runs on every outgoing request and upload before dispatch:
//! 1. relative URL → `base_url` + API prefix + path
//! 2. timeout
//! 3. header map initialization
//! 4. `source-client` identification header
//! 5. `Content-Type: application/json` (requests only)
//! 6. auth token header, when a token is held

use std::sync::Arc;
use std::time::Duration;

use miniapp_store::TokenSource;

use crate::config::{AuthScheme, ClientConfig};
use crate::request::{RequestOptions, UploadOptions};
use crate::transport::Headers;

pub const SOURCE_CLIENT_HEADER: &str = "source-client";
pub const CONTENT_TYPE_HEADER: &str = "Content-Type";
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Pre-dispatch mutation of request options.
///
/// Implementations must not fail: any problem here is a configuration bug.
pub trait Interceptor: Send + Sync {
    fn invoke(&self, options: &mut RequestOptions);

    /// `accepts_timeout` reports whether the transport honours an upload timeout.
    fn invoke_upload(&self, options: &mut UploadOptions, accepts_timeout: bool);
}

/// The mini-program interceptor.
pub struct HttpInterceptor {
    base_url: String,
    api_prefix: Option<String>,
    timeout: Duration,
    client_source: String,
    auth_scheme: AuthScheme,
    tokens: Arc<dyn TokenSource>,
}

impl HttpInterceptor {
    pub fn new(config: &ClientConfig, tokens: Arc<dyn TokenSource>) -> Self {
        Self {
            base_url: config.base_url.clone(),
            api_prefix: config.api_prefix.clone().filter(|p| !p.is_empty()),
            timeout: config.timeout(),
            client_source: config.client_source.clone(),
            auth_scheme: config.auth_scheme,
            tokens,
        }
    }

    /// Absolute form of `url`; absolute URLs are returned unchanged.
    pub fn resolve_url(&self, url: &str) -> String {
        if url.starts_with("http") {
            return url.to_string();
        }
        let mut resolved = String::with_capacity(self.base_url.len() + url.len() + 4);
        resolved.push_str(&self.base_url);
        if let Some(prefix) = &self.api_prefix
            && !url.starts_with(prefix.as_str())
        {
            resolved.push_str(prefix);
        }
        resolved.push_str(url);
        resolved
    }

    fn apply_headers(&self, header: &mut Option<Headers>, json_body: bool) {
        let header = header.get_or_insert_with(Headers::new);
        if json_body {
            set_header(header, CONTENT_TYPE_HEADER, JSON_CONTENT_TYPE.to_string());
        }
        set_header(header, SOURCE_CLIENT_HEADER, self.client_source.clone());
        if let Some(token) = self.tokens.token().filter(|t| !t.is_empty()) {
            set_header(
                header,
                self.auth_scheme.header_name(),
                self.auth_scheme.header_value(&token),
            );
        }
    }
}

/// header 名大小写不敏感：先移除同名（任意大小写）的旧值再写入
fn set_header(header: &mut Headers, name: &str, value: String) {
    header.retain(|k, _| !k.eq_ignore_ascii_case(name));
    header.insert(name.to_string(), value);
}

impl Interceptor for HttpInterceptor {
    fn invoke(&self, options: &mut RequestOptions) {
        options.url = self.resolve_url(&options.url);
        log::debug!("请求地址: {} {}", options.method, options.url);
        options.timeout = Some(self.timeout);
        self.apply_headers(&mut options.header, true);
    }

    fn invoke_upload(&self, options: &mut UploadOptions, accepts_timeout: bool) {
        options.url = self.resolve_url(&options.url);
        log::debug!("上传地址: {}", options.url);
        if accepts_timeout {
            options.timeout = Some(self.timeout);
        }
        // multipart 的 Content-Type 由传输层协商
        self.apply_headers(&mut options.header, false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::Method;
    use miniapp_store::{MemberProfile, MemoryStorage, SessionStore};

    struct FixedToken(Option<&'static str>);

    impl TokenSource for FixedToken {
        fn token(&self) -> Option<String> {
            self.0.map(str::to_string)
        }

        fn invalidate(&self) {}
    }

    fn interceptor(config: &ClientConfig, token: Option<&'static str>) -> HttpInterceptor {
        HttpInterceptor::new(config, Arc::new(FixedToken(token)))
    }

    #[test]
    fn relative_url_gets_prefix_and_base() {
        let i = interceptor(&ClientConfig::default(), None);
        assert_eq!(i.resolve_url("/rooms"), "https://xklandlxy.art/api/rooms");
    }

    #[test]
    fn existing_prefix_is_not_doubled() {
        let i = interceptor(&ClientConfig::default(), None);
        assert_eq!(
            i.resolve_url("/api/rooms/qr"),
            "https://xklandlxy.art/api/rooms/qr"
        );
    }

    #[test]
    fn absolute_url_untouched() {
        let i = interceptor(&ClientConfig::default(), None);
        assert_eq!(i.resolve_url("https://cdn.test/a"), "https://cdn.test/a");
        assert_eq!(i.resolve_url("http://cdn.test/a"), "http://cdn.test/a");
    }

    #[test]
    fn prefix_disabled() {
        let config = ClientConfig::new("http://localhost:10000").with_api_prefix(None);
        let i = interceptor(&config, None);
        assert_eq!(i.resolve_url("/rooms"), "http://localhost:10000/rooms");
    }

    #[test]
    fn invoke_is_idempotent() {
        let i = interceptor(&ClientConfig::default(), Some("abc"));
        let mut options = RequestOptions::get("/home/banner");
        i.invoke(&mut options);
        let once = options.clone();
        i.invoke(&mut options);
        assert_eq!(options, once);
        assert_eq!(options.url, "https://xklandlxy.art/api/home/banner");
    }

    #[test]
    fn request_headers_and_timeout() {
        let i = interceptor(&ClientConfig::default(), Some("abc"));
        let mut options = RequestOptions::new(Method::Post, "/rooms");
        i.invoke(&mut options);

        assert_eq!(options.timeout, Some(Duration::from_secs(10)));
        assert_eq!(options.header_value("Content-Type"), Some("application/json"));
        assert_eq!(options.header_value("source-client"), Some("miniapp"));
        assert_eq!(options.header_value("Authorization"), Some("Bearer abc"));
    }

    #[test]
    fn caller_headers_are_replaced_case_insensitively() {
        let i = interceptor(&ClientConfig::default(), Some("abc"));
        let mut options = RequestOptions::post("/rooms");
        options.header = Some(Headers::from([
            ("authorization".to_string(), "Bearer old".to_string()),
            ("content-type".to_string(), "text/plain".to_string()),
            ("X-Trace".to_string(), "t1".to_string()),
        ]));
        i.invoke(&mut options);

        let header = options.header.unwrap_or_default();
        let auth: Vec<_> = header
            .iter()
            .filter(|(k, _)| k.eq_ignore_ascii_case("authorization"))
            .collect();
        assert_eq!(auth.len(), 1);
        assert_eq!(auth[0].1, "Bearer abc");
        let content_types = header
            .keys()
            .filter(|k| k.eq_ignore_ascii_case("content-type"))
            .count();
        assert_eq!(content_types, 1);
        assert_eq!(header.get("Content-Type").map(String::as_str), Some("application/json"));
        assert_eq!(header.get("X-Trace").map(String::as_str), Some("t1"));
    }

    #[test]
    fn no_token_means_no_auth_header() {
        let i = interceptor(&ClientConfig::default(), None);
        let mut options = RequestOptions::get("/rooms");
        i.invoke(&mut options);
        assert!(options.header_value("Authorization").is_none());
        assert!(options.header_value("TOKEN").is_none());
    }

    #[test]
    fn empty_token_means_no_auth_header() {
        let i = interceptor(&ClientConfig::default(), Some(""));
        let mut options = RequestOptions::get("/rooms");
        i.invoke(&mut options);
        assert!(options.header_value("Authorization").is_none());
    }

    #[test]
    fn raw_token_scheme() {
        let config = ClientConfig::default().with_auth_scheme(AuthScheme::RawToken);
        let i = interceptor(&config, Some("abc"));
        let mut options = RequestOptions::get("/rooms");
        i.invoke(&mut options);
        assert_eq!(options.header_value("TOKEN"), Some("abc"));
        assert!(options.header_value("Authorization").is_none());
    }

    #[test]
    fn caller_headers_are_kept() {
        let i = interceptor(&ClientConfig::default(), None);
        let mut options = RequestOptions::get("/rooms");
        options.header = Some(Headers::from([("X-Trace".to_string(), "1".to_string())]));
        i.invoke(&mut options);
        assert_eq!(options.header_value("X-Trace"), Some("1"));
        assert_eq!(options.header_value("source-client"), Some("miniapp"));
    }

    #[test]
    fn upload_skips_content_type() {
        let i = interceptor(&ClientConfig::default(), Some("abc"));
        let mut options = UploadOptions::new("/user/avatar", "/tmp/a.png", "file");
        i.invoke_upload(&mut options, true);

        assert_eq!(options.url, "https://xklandlxy.art/api/user/avatar");
        assert_eq!(options.timeout, Some(Duration::from_secs(10)));
        assert!(options.header_value("Content-Type").is_none());
        assert_eq!(options.header_value("source-client"), Some("miniapp"));
        assert_eq!(options.header_value("Authorization"), Some("Bearer abc"));
    }

    #[test]
    fn upload_timeout_skipped_when_unsupported() {
        let i = interceptor(&ClientConfig::default(), None);
        let mut options = UploadOptions::new("/user/avatar", "/tmp/a.png", "file");
        i.invoke_upload(&mut options, false);
        assert!(options.timeout.is_none());
    }

    #[test]
    fn reads_token_from_session_store() {
        let store = Arc::new(SessionStore::new(Arc::new(MemoryStorage::new())));
        let i = HttpInterceptor::new(&ClientConfig::default(), store.clone());

        let mut options = RequestOptions::get("/rooms");
        i.invoke(&mut options);
        assert!(options.header_value("Authorization").is_none());

        store.set_profile(MemberProfile::with_token("abc"));
        let mut options = RequestOptions::get("/rooms");
        i.invoke(&mut options);
        assert_eq!(options.header_value("Authorization"), Some("Bearer abc"));
    }
}
