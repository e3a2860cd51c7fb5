//! 登录：账号密码登录 / 微信登录
//!
//! Both endpoints answer with the member profile (token included). Storing it
//! is left to the caller, typically `SessionStore::set_profile`.

use serde::{Deserialize, Serialize};

use crate::client::HttpClient;
use crate::envelope::Envelope;
use crate::error::Result;
use crate::request::RequestOptions;

use super::payload;

/// Profile returned by a successful login
pub type LoginResult = miniapp_store::MemberProfile;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginParams {
    pub username: String,
    pub password: String,
}

impl LoginParams {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

/// `wx.login` code plus the optional encrypted user info from `getUserProfile`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WechatLoginParams {
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encrypted_data: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iv: Option<String>,
}

impl WechatLoginParams {
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            encrypted_data: None,
            iv: None,
        }
    }
}

pub fn login_request(params: &LoginParams) -> Result<RequestOptions> {
    Ok(RequestOptions::post("/project/login").with_data(payload(params)?))
}

pub fn wechat_login_request(params: &WechatLoginParams) -> Result<RequestOptions> {
    Ok(RequestOptions::post("/login/wechat").with_data(payload(params)?))
}

pub struct LoginService<'a> {
    client: &'a HttpClient,
}

impl<'a> LoginService<'a> {
    pub(crate) fn new(client: &'a HttpClient) -> Self {
        Self { client }
    }

    pub async fn login(&self, params: &LoginParams) -> Result<Envelope<LoginResult>> {
        self.client.request(login_request(params)?).await
    }

    pub async fn wechat_login(&self, params: &WechatLoginParams) -> Result<Envelope<LoginResult>> {
        self.client.request(wechat_login_request(params)?).await
    }
}
