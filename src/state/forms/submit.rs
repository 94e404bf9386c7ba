//! Submission guard shared by every form
//!
//! A form may have at most one request outstanding. `try_begin` moves the
//! guard to `InFlight` synchronously, before the request exists, so a second
//! attempt is refused even if the first has not been polled yet. `settle`
//! records the completion and always leaves the guard `Idle` again.

use crate::api::ApiError;
use thiserror::Error;

/// Message shown when a submit is attempted with invalid fields
pub const FILL_ALL_FIELDS: &str = "Please fill all fields correctly.";

/// Lifecycle of a form's network request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmissionState {
    #[default]
    Idle,
    InFlight,
    Settled,
}

/// Why a submit attempt did not reach the network
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Refusal {
    #[error("{}", FILL_ALL_FIELDS)]
    Invalid,
    #[error("a request is already in flight")]
    InFlight,
}

impl Refusal {
    /// Text to surface to the user; a refused double submit is silent
    pub fn user_message(&self) -> Option<&'static str> {
        match self {
            Refusal::Invalid => Some(FILL_ALL_FIELDS),
            Refusal::InFlight => None,
        }
    }
}

/// Result of a request that was allowed through the guard
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<T> {
    /// Transport and application both succeeded
    Success(T),
    /// The server refused; its message is shown verbatim
    Rejected(String),
    /// No usable response; the form shows its generic retry message
    TransportFailed,
}

impl<T> Outcome<T> {
    pub fn from_result(result: Result<T, ApiError>) -> Self {
        match result {
            Ok(value) => Outcome::Success(value),
            Err(err) => match err.server_message() {
                Some(message) => Outcome::Rejected(message.to_string()),
                None => {
                    tracing::warn!("Request failed: {err}");
                    Outcome::TransportFailed
                }
            },
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }
}

/// Gate allowing one outstanding request per form instance
#[derive(Debug, Clone, Default)]
pub struct SubmitGuard {
    state: SubmissionState,
    attempts: u32,
}

impl SubmitGuard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> SubmissionState {
        self.state
    }

    pub fn is_in_flight(&self) -> bool {
        self.state == SubmissionState::InFlight
    }

    /// Number of requests let through so far
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    /// Accept a submission if the fields are valid and nothing is outstanding
    pub fn try_begin(&mut self, is_valid: bool) -> Result<(), Refusal> {
        if self.is_in_flight() {
            tracing::debug!("Submit ignored, request already in flight");
            return Err(Refusal::InFlight);
        }
        if !is_valid {
            return Err(Refusal::Invalid);
        }
        self.state = SubmissionState::InFlight;
        self.attempts = self.attempts.saturating_add(1);
        Ok(())
    }

    /// Record a completed request and return to `Idle`
    pub fn settle<T>(&mut self, result: Result<T, ApiError>) -> Outcome<T> {
        if !self.is_in_flight() {
            tracing::warn!("Settling a guard that was not in flight: {:?}", self.state);
        }
        self.state = SubmissionState::Settled;
        let outcome = Outcome::from_result(result);
        self.state = SubmissionState::Idle;
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_new_guard_is_idle() {
        let guard = SubmitGuard::new();
        assert_eq!(guard.state(), SubmissionState::Idle);
        assert_eq!(guard.attempts(), 0);
    }

    #[test]
    fn test_try_begin_moves_to_in_flight() {
        let mut guard = SubmitGuard::new();
        assert_eq!(guard.try_begin(true), Ok(()));
        assert!(guard.is_in_flight());
        assert_eq!(guard.attempts(), 1);
    }

    #[test]
    fn test_invalid_fields_are_refused() {
        let mut guard = SubmitGuard::new();
        assert_eq!(guard.try_begin(false), Err(Refusal::Invalid));
        assert_eq!(guard.state(), SubmissionState::Idle);
        assert_eq!(guard.attempts(), 0);
    }

    #[test]
    fn test_second_begin_while_in_flight_is_refused() {
        let mut guard = SubmitGuard::new();
        guard.try_begin(true).unwrap();
        assert_eq!(guard.try_begin(true), Err(Refusal::InFlight));
        assert_eq!(guard.attempts(), 1);
    }

    #[test]
    fn test_in_flight_refusal_wins_over_invalid() {
        let mut guard = SubmitGuard::new();
        guard.try_begin(true).unwrap();
        assert_eq!(guard.try_begin(false), Err(Refusal::InFlight));
    }

    #[test]
    fn test_refusal_messages() {
        assert_eq!(Refusal::Invalid.user_message(), Some(FILL_ALL_FIELDS));
        assert_eq!(Refusal::InFlight.user_message(), None);
    }

    mod settle {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_success_returns_to_idle() {
            let mut guard = SubmitGuard::new();
            guard.try_begin(true).unwrap();
            let outcome = guard.settle(Ok("T1"));
            assert_eq!(outcome, Outcome::Success("T1"));
            assert_eq!(guard.state(), SubmissionState::Idle);
        }

        #[test]
        fn test_rejection_keeps_server_message() {
            let mut guard = SubmitGuard::new();
            guard.try_begin(true).unwrap();
            let outcome: Outcome<()> =
                guard.settle(Err(ApiError::Rejected("Invalid credentials".to_string())));
            assert_eq!(outcome, Outcome::Rejected("Invalid credentials".to_string()));
            assert_eq!(guard.state(), SubmissionState::Idle);
        }

        #[test]
        fn test_transport_and_decode_failures_collapse() {
            let mut guard = SubmitGuard::new();
            guard.try_begin(true).unwrap();
            let outcome: Outcome<()> =
                guard.settle(Err(ApiError::Transport("connection refused".to_string())));
            assert_eq!(outcome, Outcome::TransportFailed);
            assert_eq!(guard.state(), SubmissionState::Idle);

            guard.try_begin(true).unwrap();
            let outcome: Outcome<()> = guard.settle(Err(ApiError::Decode("eof".to_string())));
            assert_eq!(outcome, Outcome::TransportFailed);
            assert_eq!(guard.state(), SubmissionState::Idle);
        }

        #[test]
        fn test_resubmittable_after_settle() {
            let mut guard = SubmitGuard::new();
            guard.try_begin(true).unwrap();
            let _: Outcome<()> = guard.settle(Err(ApiError::Transport("down".to_string())));
            assert_eq!(guard.try_begin(true), Ok(()));
            assert_eq!(guard.attempts(), 2);
        }
    }
}
