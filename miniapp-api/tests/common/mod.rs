//! 共享测试工具：可编程的传输层、记录型 toast / 导航

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use miniapp_api::{
    ClientConfig, HttpClient, Navigator, Notifier, RawResponse, RequestOptions, Toast, Transport,
    TransportError, UploadOptions,
};
use miniapp_store::{MemberProfile, MemoryStorage, SessionStore, TokenSource};
use parking_lot::Mutex;

/// 断言 `Option` 为 `Some`，并解包返回内部值（失败则直接让测试失败）。
#[macro_export]
macro_rules! require_some {
    ($expr:expr $(,)?) => {{
        let opt = $expr;
        assert!(opt.is_some(), "expected Some(..), got None");
        let Some(val) = opt else {
            return;
        };
        val
    }};
}

/// 断言 `Result` 为 `Ok`，并解包返回内部值（失败则直接让测试失败）。
#[macro_export]
macro_rules! require_ok {
    ($expr:expr $(,)?) => {{
        let res = $expr;
        assert!(res.is_ok(), "expected Ok(..), got {res:?}");
        let Ok(val) = res else {
            return;
        };
        val
    }};
}

/// 断言 `Result` 为 `Err`，并返回错误值。
#[macro_export]
macro_rules! require_err {
    ($expr:expr $(,)?) => {{
        let res = $expr;
        assert!(res.is_err(), "expected Err(..), got {res:?}");
        let Err(err) = res else {
            return;
        };
        err
    }};
}

/// Transport that replays queued outcomes and records what it was asked to send.
#[derive(Default)]
pub struct RecordingTransport {
    outcomes: Mutex<VecDeque<Result<RawResponse, TransportError>>>,
    requests: Mutex<Vec<RequestOptions>>,
    uploads: Mutex<Vec<UploadOptions>>,
    rejects_upload_timeout: bool,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Transport whose uploads cannot carry a timeout.
    pub fn without_upload_timeout() -> Self {
        Self {
            rejects_upload_timeout: true,
            ..Self::default()
        }
    }

    pub fn respond(&self, status_code: u16, body: &str) {
        self.outcomes
            .lock()
            .push_back(Ok(RawResponse::new(status_code, body)));
    }

    pub fn fail(&self, error: TransportError) {
        self.outcomes.lock().push_back(Err(error));
    }

    pub fn requests(&self) -> Vec<RequestOptions> {
        self.requests.lock().clone()
    }

    pub fn last_request(&self) -> Option<RequestOptions> {
        self.requests.lock().last().cloned()
    }

    pub fn uploads(&self) -> Vec<UploadOptions> {
        self.uploads.lock().clone()
    }

    fn next_outcome(&self) -> Result<RawResponse, TransportError> {
        self.outcomes
            .lock()
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::network("no response queued")))
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn request(&self, options: &RequestOptions) -> Result<RawResponse, TransportError> {
        self.requests.lock().push(options.clone());
        self.next_outcome()
    }

    async fn upload(&self, options: &UploadOptions) -> Result<RawResponse, TransportError> {
        self.uploads.lock().push(options.clone());
        self.next_outcome()
    }

    fn upload_accepts_timeout(&self) -> bool {
        !self.rejects_upload_timeout
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    toasts: Mutex<Vec<Toast>>,
}

impl RecordingNotifier {
    pub fn toasts(&self) -> Vec<Toast> {
        self.toasts.lock().clone()
    }

    pub fn titles(&self) -> Vec<String> {
        self.toasts.lock().iter().map(|t| t.title.clone()).collect()
    }
}

impl Notifier for RecordingNotifier {
    fn show_toast(&self, toast: Toast) {
        self.toasts.lock().push(toast);
    }
}

#[derive(Default)]
pub struct RecordingNavigator {
    routes: Mutex<Vec<String>>,
}

impl RecordingNavigator {
    pub fn routes(&self) -> Vec<String> {
        self.routes.lock().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate_to(&self, url: &str) {
        self.routes.lock().push(url.to_string());
    }
}

/// 测试上下文：客户端 + 所有协作者的句柄
pub struct TestContext {
    pub client: HttpClient,
    pub transport: Arc<RecordingTransport>,
    pub notifier: Arc<RecordingNotifier>,
    pub navigator: Arc<RecordingNavigator>,
    pub storage: Arc<MemoryStorage>,
    pub session: Arc<SessionStore>,
}

impl TestContext {
    /// Default configuration, logged out.
    pub fn new() -> Self {
        Self::with(ClientConfig::default(), RecordingTransport::new(), None)
    }

    /// Default configuration, logged in with `token`.
    pub fn logged_in(token: &str) -> Self {
        Self::with(ClientConfig::default(), RecordingTransport::new(), Some(token))
    }

    pub fn with(config: ClientConfig, transport: RecordingTransport, token: Option<&str>) -> Self {
        let storage = Arc::new(MemoryStorage::new());
        let session = Arc::new(SessionStore::new(storage.clone()));
        if let Some(token) = token {
            session.set_profile(MemberProfile::with_token(token));
        }
        Self::with_tokens(config, transport, storage, session.clone(), session)
    }

    pub fn with_tokens(
        config: ClientConfig,
        transport: RecordingTransport,
        storage: Arc<MemoryStorage>,
        session: Arc<SessionStore>,
        tokens: Arc<dyn TokenSource>,
    ) -> Self {
        let transport = Arc::new(transport);
        let notifier = Arc::new(RecordingNotifier::default());
        let navigator = Arc::new(RecordingNavigator::default());
        let client = HttpClient::builder(config, transport.clone(), tokens)
            .notifier(notifier.clone())
            .navigator(navigator.clone())
            .build();
        Self {
            client,
            transport,
            notifier,
            navigator,
            storage,
            session,
        }
    }
}
