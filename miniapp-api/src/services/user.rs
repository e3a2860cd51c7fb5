use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::client::HttpClient;
use crate::envelope::Envelope;
use crate::error::Result;
use crate::request::RequestOptions;

use super::payload;

/// Partial profile update; only the fields that are set are sent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateProfilePayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nickname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

pub fn update_profile_request(body: &UpdateProfilePayload) -> Result<RequestOptions> {
    Ok(RequestOptions::post("/user/profile").with_data(payload(body)?))
}

pub struct UserService<'a> {
    client: &'a HttpClient,
}

impl<'a> UserService<'a> {
    pub(crate) fn new(client: &'a HttpClient) -> Self {
        Self { client }
    }

    pub async fn update_profile(&self, body: &UpdateProfilePayload) -> Result<Envelope<Value>> {
        self.client.request(update_profile_request(body)?).await
    }
}
