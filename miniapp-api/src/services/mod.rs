//! Backend service wrappers
//!
//! One module per resource area. Each operation has a pure request builder
//! (`*_request`, payload → method + URL + body) and an async method on a
//! service handle borrowed from the client:
//!
//! ```rust,no_run
//! # use miniapp_api::HttpClient;
//! # async fn example(client: &HttpClient) -> miniapp_api::Result<()> {
//! let rooms = client.rooms().fetch_rooms().await?;
//! # Ok(())
//! # }
//! ```

pub mod home;
pub mod ka;
pub mod login;
pub mod room;
pub mod user;

use std::borrow::Cow;

use serde::Serialize;
use serde_json::Value;

use crate::client::HttpClient;
use crate::error::{ApiError, Result};

pub use home::HomeService;
pub use ka::KaService;
pub use login::LoginService;
pub use room::RoomService;
pub use user::UserService;

impl HttpClient {
    pub fn home(&self) -> HomeService<'_> {
        HomeService::new(self)
    }

    pub fn ka(&self) -> KaService<'_> {
        KaService::new(self)
    }

    pub fn auth(&self) -> LoginService<'_> {
        LoginService::new(self)
    }

    pub fn rooms(&self) -> RoomService<'_> {
        RoomService::new(self)
    }

    pub fn user(&self) -> UserService<'_> {
        UserService::new(self)
    }
}

/// Serialize a request payload into the options' `data`.
pub(crate) fn payload<B: Serialize + ?Sized>(body: &B) -> Result<Value> {
    serde_json::to_value(body).map_err(|e| ApiError::Serialization {
        detail: e.to_string(),
    })
}

/// Percent-encode one path segment (room ids come from QR codes and deep links).
pub(crate) fn segment(raw: &str) -> Cow<'_, str> {
    urlencoding::encode(raw)
}
