//! Wire types shared by the account API client and its callers

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Application-level success marker carried in every response body
pub const SUCCESS_MARKER: &str = "SUCCESS";

/// Common response body: `{status, message, data?}`
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope<T> {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub message: String,
    pub data: Option<T>,
}

impl<T> Envelope<T> {
    /// Whether the body carries the success marker
    pub fn is_success(&self) -> bool {
        self.status == SUCCESS_MARKER
    }
}

/// Body of `POST /user/signup`
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Body of `POST /user/login`
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Body of `PUT /user/`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProfileUpdate {
    pub name: String,
    pub email: String,
}

/// `data` of a successful login
#[derive(Debug, Clone, Deserialize)]
pub struct LoginData {
    pub token: String,
}

/// The signed-in user as returned by the API
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserProfile {
    #[serde(default, alias = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub email: String,
}

impl UserProfile {
    /// Merge an accepted update into the profile, keeping the id
    pub fn merged(&self, update: &ProfileUpdate) -> Self {
        Self {
            id: self.id.clone(),
            name: update.name.clone(),
            email: update.email.clone(),
        }
    }
}

/// `data` of `GET /user/`, either `{user: {...}}` or the user itself
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ProfileData {
    Wrapped { user: UserProfile },
    Bare(UserProfile),
}

impl From<ProfileData> for UserProfile {
    fn from(data: ProfileData) -> Self {
        match data {
            ProfileData::Wrapped { user } => user,
            ProfileData::Bare(user) => user,
        }
    }
}

/// Failure of a single API call
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    /// The server answered but refused the operation; the message is shown verbatim
    #[error("{0}")]
    Rejected(String),
    /// The request never produced a response
    #[error("request failed: {0}")]
    Transport(String),
    /// The response could not be understood
    #[error("unexpected response: {0}")]
    Decode(String),
}

impl ApiError {
    /// Rejections carry a message for the user; everything else gets a generic one
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Rejected(message) => Some(message),
            ApiError::Transport(_) | ApiError::Decode(_) => None,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else {
            ApiError::Transport(err.to_string())
        }
    }
}
