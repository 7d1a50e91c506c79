//! HTTP client for the hosted auth service.

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use uuid::Uuid;

use fiesta_core::{AppError, AppResult, UserId, Username};

use crate::provider::SessionProvider;
use crate::user::User;

/// Client for the hosted auth endpoints (`/auth/v1/user`, `/auth/v1/logout`).
///
/// The access token identifies the session; the api key identifies the
/// application.
#[derive(Debug, Clone)]
pub struct RemoteSessionProvider {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    access_token: String,
}

/// Payload shape the auth service returns for the current user.
#[derive(Debug, Deserialize)]
struct UserPayload {
    id: Uuid,
    #[serde(default)]
    email: String,
    #[serde(default)]
    user_metadata: UserMetadata,
}

#[derive(Debug, Default, Deserialize)]
struct UserMetadata {
    #[serde(default)]
    username: String,
}

impl RemoteSessionProvider {
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        access_token: impl Into<String>,
    ) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            api_key: api_key.into(),
            access_token: access_token.into(),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/auth/v1/{path}", self.base_url.trim_end_matches('/'))
    }

    fn authed(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        request
            .header("apikey", &self.api_key)
            .bearer_auth(&self.access_token)
    }
}

#[async_trait]
impl SessionProvider for RemoteSessionProvider {
    async fn current_user(&self) -> AppResult<Option<User>> {
        let response = self
            .authed(self.http.get(self.endpoint("user")))
            .send()
            .await
            .map_err(|e| AppError::remote(format!("auth request failed: {e}")))?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            // No active session; not an error.
            return Ok(None);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::remote(format!("auth returned {status}: {body}")));
        }

        let payload = response
            .json::<UserPayload>()
            .await
            .map_err(|e| AppError::decode(format!("auth response: {e}")))?;

        // A session without a username cannot own rows; fail closed rather
        // than scoping queries by an empty key.
        let username = Username::new(payload.user_metadata.username)
            .map_err(|_| AppError::decode("session user has no username"))?;

        Ok(Some(User::new(
            UserId::from_uuid(payload.id),
            payload.email,
            username,
        )))
    }

    async fn sign_out(&self) -> AppResult<()> {
        let response = self
            .authed(self.http.post(self.endpoint("logout")))
            .send()
            .await
            .map_err(|e| AppError::remote(format!("auth request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::remote(format!("sign-out failed ({status}): {body}")));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_are_rooted_under_auth_v1() {
        let provider = RemoteSessionProvider::new("https://store.example/", "key", "token");
        assert_eq!(provider.endpoint("user"), "https://store.example/auth/v1/user");
        assert_eq!(provider.endpoint("logout"), "https://store.example/auth/v1/logout");
    }
}
