//! HTTP client for communicating with the account API
//!
//! Every endpoint answers with the `{status, message, data?}` envelope. A call
//! succeeds only when the HTTP status is 2xx *and* the envelope carries the
//! success marker; anything else is a rejection with the server's message.

use super::traits::AccountApi;
use super::types::{
    ApiError, Envelope, LoginData, LoginRequest, ProfileData, ProfileUpdate, SignupRequest,
    UserProfile,
};
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Client for the account API
pub struct ApiClient {
    /// The HTTP client
    http: reqwest::Client,
    /// Base URL without trailing slash, e.g. `http://localhost:8000/api`
    base_url: String,
}

impl ApiClient {
    /// Create a new API client
    pub fn new(base_url: &str, connect_timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .connect_timeout(connect_timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Base URL requests are sent to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Send a request and classify its response
    async fn send<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<Envelope<T>, ApiError> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;
        interpret(status, &body)
    }
}

/// Classify a response by transport status and application marker
///
/// `data` is decoded into `T` only after both checks pass.
pub(crate) fn interpret<T: DeserializeOwned>(
    status: StatusCode,
    body: &str,
) -> Result<Envelope<T>, ApiError> {
    let envelope: Envelope<serde_json::Value> = serde_json::from_str(body)
        .map_err(|e| ApiError::Decode(format!("HTTP {}: {e}", status.as_u16())))?;

    if !(status.is_success() && envelope.is_success()) {
        return Err(if envelope.message.is_empty() {
            ApiError::Rejected(format!("Request failed with status {}", status.as_u16()))
        } else {
            ApiError::Rejected(envelope.message)
        });
    }

    let data = envelope
        .data
        .map(serde_json::from_value)
        .transpose()
        .map_err(|e| ApiError::Decode(format!("HTTP {}: {e}", status.as_u16())))?;
    Ok(Envelope {
        status: envelope.status,
        message: envelope.message,
        data,
    })
}

#[async_trait]
impl AccountApi for ApiClient {
    async fn signup(&self, request: SignupRequest) -> Result<(), ApiError> {
        tracing::info!("POST /user/signup");
        let request = self.http.post(self.url("/user/signup")).json(&request);
        self.send::<serde_json::Value>(request).await?;
        Ok(())
    }

    async fn login(&self, request: LoginRequest) -> Result<String, ApiError> {
        tracing::info!("POST /user/login");
        let request = self.http.post(self.url("/user/login")).json(&request);
        let envelope = self.send::<LoginData>(request).await?;
        envelope
            .data
            .map(|data| data.token)
            .ok_or_else(|| ApiError::Decode("login response carried no token".to_string()))
    }

    async fn fetch_profile(&self, token: &str) -> Result<UserProfile, ApiError> {
        tracing::info!("GET /user/");
        let request = self.http.get(self.url("/user/")).bearer_auth(token);
        let envelope = self.send::<ProfileData>(request).await?;
        envelope
            .data
            .map(UserProfile::from)
            .ok_or_else(|| ApiError::Decode("profile response carried no user".to_string()))
    }

    async fn update_profile(&self, token: &str, update: ProfileUpdate) -> Result<(), ApiError> {
        tracing::info!("PUT /user/");
        let request = self
            .http
            .put(self.url("/user/"))
            .bearer_auth(token)
            .json(&update);
        self.send::<serde_json::Value>(request).await?;
        Ok(())
    }

    async fn delete_account(&self, token: &str) -> Result<String, ApiError> {
        tracing::info!("DELETE /user/");
        let request = self.http.delete(self.url("/user/")).bearer_auth(token);
        let envelope = self.send::<serde_json::Value>(request).await?;
        Ok(envelope.message)
    }

    async fn delete_todos(&self, token: &str) -> Result<(), ApiError> {
        tracing::info!("DELETE /todo/");
        let request = self.http.delete(self.url("/todo/")).bearer_auth(token);
        self.send::<serde_json::Value>(request).await?;
        Ok(())
    }
}
