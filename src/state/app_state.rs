//! Application state definitions

use super::forms::{FormState, MessageKind};
use std::time::{Duration, Instant};

/// How long a toast stays in the status bar
pub const TOAST_DURATION: Duration = Duration::from_secs(3);

/// Current view in the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Login,
    Signup,
    /// Authenticated landing screen
    Home,
    Profile,
}

impl View {
    /// Views only reachable with a session token
    pub fn requires_session(&self) -> bool {
        matches!(self, View::Home | View::Profile)
    }

    pub fn title(&self) -> &'static str {
        match self {
            View::Login => "Login",
            View::Signup => "Create an Account",
            View::Home => "Todos",
            View::Profile => "User Info",
        }
    }
}

/// Transient notification shown in the status bar
#[derive(Debug, Clone)]
pub struct Toast {
    pub text: String,
    pub kind: MessageKind,
    pub created_at: Instant,
}

impl Toast {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: MessageKind::Success,
            created_at: Instant::now(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: MessageKind::Error,
            created_at: Instant::now(),
        }
    }

    pub fn is_expired(&self) -> bool {
        self.created_at.elapsed() >= TOAST_DURATION
    }
}

/// Main application state
#[derive(Debug, Default)]
pub struct AppState {
    // Navigation
    pub current_view: View,

    // The form mounted for the current view
    pub form: FormState,

    // UI state
    pub toast: Option<Toast>,
}

impl AppState {
    /// Show a toast, replacing any current one
    pub fn show_toast(&mut self, toast: Toast) {
        tracing::debug!("Toast: {}", toast.text);
        self.toast = Some(toast);
    }

    /// Drop the toast once its display time is over
    pub fn expire_toast(&mut self) {
        if self.toast.as_ref().is_some_and(Toast::is_expired) {
            self.toast = None;
        }
    }
}
