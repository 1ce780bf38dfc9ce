use async_trait::async_trait;
use reqwest::StatusCode;
use zeroize::Zeroize;

use crate::error::{ApiError, ApiResult};
use crate::models::*;

/// Operations of the study service used by the client.
#[async_trait]
pub trait StudyApi: Send + Sync {
    async fn current_user(&self) -> ApiResult<CurrentUser>;

    async fn list_groups(&self) -> ApiResult<Vec<Group>>;
    async fn create_group(&self, group_name: &str) -> ApiResult<Group>;
    async fn delete_group(&self, group_id: i64) -> ApiResult<()>;
    async fn get_group(&self, group_id: i64) -> ApiResult<Group>;

    async fn get_members(&self, group_id: i64) -> ApiResult<Vec<GroupMember>>;
    /// Adding someone who is already in the group yields `ApiError::AlreadyMember`.
    async fn add_member(&self, group_id: i64, user_id: i64) -> ApiResult<()>;
    async fn remove_member(&self, group_id: i64, member_id: i64, requester_id: i64)
        -> ApiResult<()>;

    async fn list_group_rooms(&self, group_id: i64) -> ApiResult<Vec<StudyRoom>>;
    async fn create_room(&self, room: &NewRoom) -> ApiResult<StudyRoom>;
    /// Joining a room the user is already in yields `ApiError::AlreadyMember`.
    async fn join_room(&self, room_id: i64, user_id: i64) -> ApiResult<()>;
}

pub struct StudyClient {
    client: reqwest::Client,
    base_url: String,
    access_token: String,
}

impl StudyClient {
    pub fn with_client(client: reqwest::Client, base_url: &str, access_token: String) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            access_token,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn check(resp: reqwest::Response) -> ApiResult<reqwest::Response> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        let body = resp.text().await.unwrap_or_default();
        tracing::debug!(%status, body = %body, "study api call rejected");
        Err(ApiError::from_status(status, &body))
    }

    async fn decode<T: serde::de::DeserializeOwned>(resp: reqwest::Response) -> ApiResult<T> {
        resp.json::<T>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    async fn get<T: serde::de::DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let resp = self
            .client
            .get(self.url(path))
            .bearer_auth(&self.access_token)
            .send()
            .await?;
        Self::decode(Self::check(resp).await?).await
    }

    async fn post_json<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        body: &serde_json::Value,
    ) -> ApiResult<T> {
        let resp = self
            .client
            .post(self.url(path))
            .bearer_auth(&self.access_token)
            .json(body)
            .send()
            .await?;
        Self::decode(Self::check(resp).await?).await
    }

    /// Posts and returns the raw status and body so callers can apply
    /// endpoint-specific classification.
    async fn post_raw(
        &self,
        path: &str,
        body: &serde_json::Value,
    ) -> ApiResult<(StatusCode, String)> {
        let resp = self
            .client
            .post(self.url(path))
            .bearer_auth(&self.access_token)
            .json(body)
            .send()
            .await?;
        let status = resp.status();
        let text = resp.text().await.unwrap_or_default();
        Ok((status, text))
    }

    async fn delete(&self, path: &str) -> ApiResult<()> {
        let resp = self
            .client
            .delete(self.url(path))
            .bearer_auth(&self.access_token)
            .send()
            .await?;
        Self::check(resp).await?;
        Ok(())
    }
}

/// The service reports a duplicate membership on `add_member` as a plain 400.
fn classify_add_member(status: StatusCode, body: &str) -> ApiResult<()> {
    if status.is_success() {
        return Ok(());
    }
    if status == StatusCode::BAD_REQUEST {
        return Err(ApiError::AlreadyMember);
    }
    Err(ApiError::from_status(status, body))
}

/// The service reports a duplicate join either as a 500 or with a message
/// containing "이미" ("already").
fn classify_join_room(status: StatusCode, body: &str) -> ApiResult<()> {
    if status.is_success() {
        return Ok(());
    }
    if status == StatusCode::INTERNAL_SERVER_ERROR || body.contains("이미") {
        return Err(ApiError::AlreadyMember);
    }
    Err(ApiError::from_status(status, body))
}

pub fn classify_response(endpoint: Endpoint, status: StatusCode, body: &str) -> ApiResult<()> {
    match endpoint {
        Endpoint::AddMember => classify_add_member(status, body),
        Endpoint::JoinRoom => classify_join_room(status, body),
    }
}

/// Endpoints whose failures need service-specific classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    AddMember,
    JoinRoom,
}

#[async_trait]
impl StudyApi for StudyClient {
    // ---- User ----

    async fn current_user(&self) -> ApiResult<CurrentUser> {
        self.get("/api/users/me").await
    }

    // ---- Groups ----

    async fn list_groups(&self) -> ApiResult<Vec<Group>> {
        self.get("/api/groups").await
    }

    async fn create_group(&self, group_name: &str) -> ApiResult<Group> {
        let body = serde_json::json!({ "groupName": group_name });
        self.post_json("/api/groups", &body).await
    }

    async fn delete_group(&self, group_id: i64) -> ApiResult<()> {
        self.delete(&format!("/api/groups/{}", group_id)).await
    }

    async fn get_group(&self, group_id: i64) -> ApiResult<Group> {
        self.get(&format!("/api/groups/{}", group_id)).await
    }

    // ---- Members ----

    async fn get_members(&self, group_id: i64) -> ApiResult<Vec<GroupMember>> {
        self.get(&format!("/api/groups/{}/members", group_id)).await
    }

    async fn add_member(&self, group_id: i64, user_id: i64) -> ApiResult<()> {
        let body = serde_json::json!({ "memberId": user_id });
        let (status, text) = self
            .post_raw(&format!("/api/groups/{}/members", group_id), &body)
            .await?;
        classify_response(Endpoint::AddMember, status, &text)
    }

    async fn remove_member(
        &self,
        group_id: i64,
        member_id: i64,
        requester_id: i64,
    ) -> ApiResult<()> {
        self.delete(&format!(
            "/api/groups/{}/members/{}?requesterId={}",
            group_id, member_id, requester_id
        ))
        .await
    }

    // ---- Study rooms ----

    async fn list_group_rooms(&self, group_id: i64) -> ApiResult<Vec<StudyRoom>> {
        self.get(&format!("/api/study-rooms/group/{}", group_id))
            .await
    }

    async fn create_room(&self, room: &NewRoom) -> ApiResult<StudyRoom> {
        let body = serde_json::to_value(room).map_err(|e| ApiError::Decode(e.to_string()))?;
        self.post_json("/api/study-rooms", &body).await
    }

    async fn join_room(&self, room_id: i64, user_id: i64) -> ApiResult<()> {
        let body = serde_json::json!({ "userId": user_id });
        let (status, text) = self
            .post_raw(&format!("/api/study-rooms/{}/join", room_id), &body)
            .await?;
        classify_response(Endpoint::JoinRoom, status, &text)
    }
}

impl Drop for StudyClient {
    fn drop(&mut self) {
        self.access_token.zeroize();
    }
}
