//! Trait abstraction for the account API to enable mocking in tests

use super::types::{ApiError, LoginRequest, ProfileUpdate, SignupRequest, UserProfile};
use async_trait::async_trait;

/// Account operations exposed by the remote API
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountApi: Send + Sync {
    /// Create an account
    async fn signup(&self, request: SignupRequest) -> Result<(), ApiError>;

    /// Exchange credentials for a session token
    async fn login(&self, request: LoginRequest) -> Result<String, ApiError>;

    /// Load the user the token belongs to
    async fn fetch_profile(&self, token: &str) -> Result<UserProfile, ApiError>;

    /// Update name and email of the signed-in user
    async fn update_profile(&self, token: &str, update: ProfileUpdate) -> Result<(), ApiError>;

    /// Delete the signed-in user
    /// Returns the server's confirmation message
    async fn delete_account(&self, token: &str) -> Result<String, ApiError>;

    /// Delete every todo of the signed-in user
    async fn delete_todos(&self, token: &str) -> Result<(), ApiError>;
}
