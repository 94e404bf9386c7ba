//! Account API module for HTTP communication

mod client;
mod traits;
mod types;

pub use client::ApiClient;
pub use traits::AccountApi;
pub use types::{ApiError, LoginRequest, ProfileUpdate, SignupRequest, UserProfile};

#[cfg(test)]
pub use traits::MockAccountApi;
