//! 房间记账：房间列表、成员、转账、邀请二维码
//!
//! Room payloads use the backend's snake_case field names; request bodies for
//! join / transfer / QR use camelCase. Amounts and balances come back as
//! decimal strings and are kept that way.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::client::HttpClient;
use crate::envelope::Envelope;
use crate::error::Result;
use crate::request::RequestOptions;

use super::{payload, segment};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoomSummary {
    pub id: String,
    pub name: String,
    pub invite_code: String,
    pub creator_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub member_id: Option<String>,
    pub status: i64,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoomMember {
    pub id: String,
    pub room_id: String,
    pub user_id: i64,
    pub balance: String,
    pub joined_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nickname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoomTransaction {
    pub id: String,
    pub room_id: String,
    pub from_member_id: String,
    pub to_member_id: String,
    pub amount: String,
    pub remark: String,
    pub created_at: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoomDetail {
    pub room: RoomSummary,
    pub members: Vec<RoomMember>,
    pub transactions: Vec<RoomTransaction>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateRoomPayload {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinRoomPayload {
    pub invite_code: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferPayload {
    pub from_member_id: String,
    pub to_member_id: String,
    pub amount: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remark: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QrCodeRequest {
    pub invite_code: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct QrCodeResponse {
    /// base64 编码的图片
    pub qr_code: String,
    pub invite_code: String,
}

pub fn fetch_rooms_request() -> RequestOptions {
    RequestOptions::get("/rooms")
}

pub fn delete_room_request(room_id: &str) -> RequestOptions {
    RequestOptions::delete(format!("/rooms/{}", segment(room_id)))
}

pub fn leave_room_request(room_id: &str) -> RequestOptions {
    RequestOptions::delete(format!("/rooms/{}/leave", segment(room_id)))
}

pub fn create_room_request(body: &CreateRoomPayload) -> Result<RequestOptions> {
    Ok(RequestOptions::post("/rooms").with_data(payload(body)?))
}

pub fn join_room_request(body: &JoinRoomPayload) -> Result<RequestOptions> {
    Ok(RequestOptions::post("/rooms/join").with_data(payload(body)?))
}

pub fn fetch_room_detail_request(room_id: &str) -> RequestOptions {
    RequestOptions::get(format!("/rooms/{}", segment(room_id)))
}

pub fn create_transfer_request(room_id: &str, body: &TransferPayload) -> Result<RequestOptions> {
    Ok(
        RequestOptions::post(format!("/rooms/{}/transfer", segment(room_id)))
            .with_data(payload(body)?),
    )
}

pub fn generate_room_qr_code_request(body: &QrCodeRequest) -> Result<RequestOptions> {
    Ok(RequestOptions::post("/rooms/qr").with_data(payload(body)?))
}

/// Room ledger endpoints.
pub struct RoomService<'a> {
    client: &'a HttpClient,
}

impl<'a> RoomService<'a> {
    pub(crate) fn new(client: &'a HttpClient) -> Self {
        Self { client }
    }

    /// Rooms the current member belongs to.
    pub async fn fetch_rooms(&self) -> Result<Envelope<Vec<RoomSummary>>> {
        self.client.request(fetch_rooms_request()).await
    }

    pub async fn delete_room(&self, room_id: &str) -> Result<Envelope<Value>> {
        self.client.request(delete_room_request(room_id)).await
    }

    pub async fn leave_room(&self, room_id: &str) -> Result<Envelope<Value>> {
        self.client.request(leave_room_request(room_id)).await
    }

    pub async fn create_room(&self, body: &CreateRoomPayload) -> Result<Envelope<RoomDetail>> {
        self.client.request(create_room_request(body)?).await
    }

    /// Redeem an invite code; answers with the caller's new membership.
    pub async fn join_room(&self, body: &JoinRoomPayload) -> Result<Envelope<RoomMember>> {
        self.client.request(join_room_request(body)?).await
    }

    pub async fn fetch_room_detail(&self, room_id: &str) -> Result<Envelope<RoomDetail>> {
        self.client.request(fetch_room_detail_request(room_id)).await
    }

    pub async fn create_transfer(
        &self,
        room_id: &str,
        body: &TransferPayload,
    ) -> Result<Envelope<RoomTransaction>> {
        self.client
            .request(create_transfer_request(room_id, body)?)
            .await
    }

    pub async fn generate_room_qr_code(
        &self,
        body: &QrCodeRequest,
    ) -> Result<Envelope<QrCodeResponse>> {
        self.client
            .request(generate_room_qr_code_request(body)?)
            .await
    }
}
