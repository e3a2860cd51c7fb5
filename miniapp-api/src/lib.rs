//! # miniapp-api
//!
//! Typed HTTP client for the mini-program backend: one shared client with a
//! request interceptor and unified response handling, plus thin service
//! wrappers per resource area.
//!
//! ## Services
//!
//! | Handle | Area | Endpoints |
//! |--------|------|-----------|
//! | [`HttpClient::home`] | Home feed | `/home/banner`, `/home/category/mutli`, `/home/hot/mutli`, `/home/goods/guessLike` |
//! | [`HttpClient::ka`] | KA / sales listings | `/project/selectKAProject`, `/project/selectSaleProject`, `/project/selectKANumber` |
//! | [`HttpClient::auth`] | Login | `/project/login`, `/login/wechat` |
//! | [`HttpClient::rooms`] | Room ledger | `/rooms`, `/rooms/{id}`, `/rooms/{id}/leave`, `/rooms/join`, `/rooms/{id}/transfer`, `/rooms/qr` |
//! | [`HttpClient::user`] | Profile | `/user/profile` |
//!
//! ## Feature Flags
//!
//! - **`native-tls`** *(default)*: Use the platform's native TLS implementation.
//! - **`rustls`**: Use rustls. Recommended for cross-compilation and Android targets.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use miniapp_api::{ClientConfig, HttpClient, ReqwestTransport, TransportConfig};
//! use miniapp_store::{FileStorage, SessionStore};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // 1. Session store persisted next to the app
//!     let storage = Arc::new(FileStorage::open("./storage")?);
//!     let session = Arc::new(SessionStore::new(storage));
//!
//!     // 2. Client wired to the session's token
//!     let transport = Arc::new(ReqwestTransport::new(TransportConfig::default())?);
//!     let client = HttpClient::builder(ClientConfig::default(), transport, session.clone()).build();
//!
//!     // 3. Call a service
//!     let rooms = client.rooms().fetch_rooms().await?;
//!     for room in rooms.into_data().unwrap_or_default() {
//!         println!("{} ({})", room.name, room.invite_code);
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Every call returns [`Result<Envelope<T>, ApiError>`](ApiError). Before an
//! error is returned the user has already been told about it once:
//!
//! - [`ApiError::Transport`]: no response; the network-error toast is shown
//! - [`ApiError::Unauthorized`]: session cleared, login page opened, no toast
//! - [`ApiError::Http`] / [`ApiError::Business`]: backend message (or the fallback) toasted
//! - [`ApiError::Parse`]: body was not the expected envelope
//!
//! Nothing is retried.

mod client;
mod config;
mod envelope;
mod error;
mod host;
mod interceptor;
mod request;
mod reqwest_transport;
pub mod services;
mod transport;
mod utils;

pub use client::{HttpClient, HttpClientBuilder};

pub use config::{
    AuthScheme, BusinessCheck, ClientConfig, DEFAULT_API_PREFIX, DEFAULT_BASE_URL,
    DEFAULT_CLIENT_SOURCE, DEFAULT_FALLBACK_ERROR_TEXT, DEFAULT_LOGIN_PAGE,
    DEFAULT_NETWORK_ERROR_TEXT, DEFAULT_TIMEOUT_MS, StatusSource,
};

pub use envelope::{BusinessCode, Envelope, EnvelopeKind};

pub use error::{ApiError, Result};

pub use host::{LogNavigator, LogNotifier, Navigator, Notifier, Toast, ToastIcon};

pub use interceptor::{
    CONTENT_TYPE_HEADER, HttpInterceptor, Interceptor, JSON_CONTENT_TYPE, SOURCE_CLIENT_HEADER,
};

pub use request::{Method, RequestOptions, UploadOptions};

pub use reqwest_transport::{ReqwestTransport, TransportConfig};

pub use transport::{Headers, RawResponse, Transport, TransportError, TransportErrorKind};

pub use services::{HomeService, KaService, LoginService, RoomService, UserService};

pub use utils::log_sanitizer;
