//! Application state and core logic

use crate::api::{AccountApi, ApiClient, ApiError, ProfileUpdate, UserProfile};
use crate::config::TuiConfig;
use crate::session::{Session, SessionStore};
use crate::state::{
    AppState, Form, FormMessage, FormState, LoginForm, Outcome, ProfileButton, ProfileForm,
    SignupForm, SubmitForm, Toast, View,
};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::future::Future;
use std::sync::Arc;
use tokio::sync::mpsc;

const LOGIN_SUCCESS: &str = "Logged In successfully !";
const LOGIN_FAILED: &str = "Something went wrong, unable to login. try again after sometime.";
const SIGNUP_SUCCESS: &str = "Your account created successfully !";
const SIGNUP_FAILED: &str =
    "Something went wrong, unable to create your account. try again after sometime.";
const PROFILE_UPDATED: &str = "Your account updated successfully!";
const PROFILE_UPDATE_FAILED: &str = "Unable to update your info. try again after sometime.";
const LOGGED_OUT: &str = "Logout successfully.";
const ACCOUNT_DELETED: &str = "Your account deleted successfully.";
const DELETE_FAILED: &str = "Unable to delete your account";

/// Completion of a request dispatched from the main loop
#[derive(Debug)]
pub enum ApiEvent {
    LoginFinished(Result<String, ApiError>),
    SignupFinished {
        email: String,
        result: Result<(), ApiError>,
    },
    ProfileUpdated {
        update: ProfileUpdate,
        result: Result<(), ApiError>,
    },
    AccountDeleted(Result<String, ApiError>),
    ProfileLoaded(Result<UserProfile, ApiError>),
}

/// Main application struct
pub struct App {
    /// Current application state
    pub state: AppState,
    /// Token and signed-in user
    session: Session,
    /// Account API used by every form
    api: Arc<dyn AccountApi>,
    events_tx: mpsc::UnboundedSender<ApiEvent>,
    events_rx: mpsc::UnboundedReceiver<ApiEvent>,
    /// Whether the app should quit
    quit: bool,
}

impl App {
    /// Create a new App instance from the user's configuration
    pub fn new(config: &TuiConfig) -> Result<Self> {
        let client = ApiClient::new(&config.api_base_url(), config.connect_timeout())?;
        tracing::info!("Using account API at {}", client.base_url());

        let session = match SessionStore::default_location() {
            Some(store) if config.remember_session() => Session::persistent(store),
            _ => Session::in_memory(),
        };

        let mut app = Self::with_api(Arc::new(client), session);
        app.start();
        Ok(app)
    }

    /// Create an App around an API implementation and an existing session
    pub fn with_api(api: Arc<dyn AccountApi>, session: Session) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        Self {
            state: AppState::default(),
            session,
            api,
            events_tx,
            events_rx,
            quit: false,
        }
    }

    /// Mount the first screen; a restored session lands on Home
    pub fn start(&mut self) {
        if self.session.is_authenticated() {
            self.navigate(View::Home);
            self.load_profile();
        } else {
            self.navigate(View::Login);
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Drop the toast once it has been shown long enough
    pub fn update_toast(&mut self) {
        self.state.expire_toast();
    }

    /// Apply every completion that arrived since the last tick
    pub fn drain_events(&mut self) {
        while let Ok(event) = self.events_rx.try_recv() {
            self.handle_api_event(event);
        }
    }

    /// Switch views, mounting a fresh form for the target
    ///
    /// Refused while the mounted form has a request in flight. Views that
    /// need a session fall back to Login without one.
    pub fn navigate(&mut self, view: View) -> bool {
        if self.state.form.is_in_flight() {
            tracing::debug!("Navigation to {view:?} refused, request in flight");
            return false;
        }

        let view = if view.requires_session() && !self.session.is_authenticated() {
            View::Login
        } else {
            view
        };

        self.state.form = match view {
            View::Login => FormState::Login(LoginForm::new()),
            View::Signup => FormState::Signup(SignupForm::new()),
            View::Profile => FormState::Profile(ProfileForm::from_user(self.session.user())),
            View::Home => FormState::None,
        };
        self.state.current_view = view;
        true
    }

    /// Handle key events
    pub fn handle_key(&mut self, key: KeyEvent) {
        match self.state.current_view {
            View::Login => self.handle_login_key(key),
            View::Signup => self.handle_signup_key(key),
            View::Home => self.handle_home_key(key),
            View::Profile => self.handle_profile_key(key),
        }
    }

    /// Type into the focused field; false when no field takes the key
    fn handle_text_input(&mut self, key: KeyEvent) -> bool {
        let Some(field) = self.state.form.get_active_field_mut() else {
            return false;
        };
        match key.code {
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                field.push_char(c)
            }
            KeyCode::Backspace => field.pop_char(),
            _ => return false,
        }
        true
    }

    fn handle_login_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Tab | KeyCode::Down => self.state.form.next_field(),
            KeyCode::BackTab | KeyCode::Up => self.state.form.prev_field(),
            KeyCode::Enter => self.submit_login(),
            KeyCode::Char('n') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.navigate(View::Signup);
            }
            _ => {
                self.handle_text_input(key);
            }
        }
    }

    fn handle_signup_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Tab | KeyCode::Down => self.state.form.next_field(),
            KeyCode::BackTab | KeyCode::Up => self.state.form.prev_field(),
            KeyCode::Enter => self.submit_signup(),
            KeyCode::Esc => {
                self.navigate(View::Login);
            }
            _ => {
                self.handle_text_input(key);
            }
        }
    }

    fn handle_home_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('p') | KeyCode::Enter => {
                self.navigate(View::Profile);
            }
            KeyCode::Char('l') => self.logout(),
            KeyCode::Char('q') | KeyCode::Esc => self.quit = true,
            _ => {}
        }
    }

    fn handle_profile_key(&mut self, key: KeyEvent) {
        let FormState::Profile(form) = &mut self.state.form else {
            return;
        };

        // Confirm dialog is modal
        if form.confirm_delete {
            match key.code {
                KeyCode::Char('y') | KeyCode::Enter => {
                    form.confirm_delete = false;
                    self.delete_account();
                }
                KeyCode::Char('n') | KeyCode::Esc => form.confirm_delete = false,
                _ => {}
            }
            return;
        }

        let editing = form.is_editing;
        let on_buttons = form.is_buttons_row_active();
        match key.code {
            KeyCode::Tab => form.next_field(),
            KeyCode::BackTab => form.prev_field(),
            KeyCode::Left | KeyCode::Up if on_buttons => {
                form.selected_button = form.selected_button.prev();
            }
            KeyCode::Right | KeyCode::Down if on_buttons => {
                form.selected_button = form.selected_button.next();
            }
            KeyCode::Enter if on_buttons => {
                let button = form.selected_button;
                self.activate_profile_button(button);
            }
            KeyCode::Enter => self.submit_profile(),
            KeyCode::Char('s') if editing && key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.submit_profile();
            }
            KeyCode::Char('e') if !editing => form.start_editing(),
            KeyCode::Esc if editing => form.cancel_editing(self.session.user()),
            KeyCode::Esc => {
                self.navigate(View::Home);
            }
            _ => {
                self.handle_text_input(key);
            }
        }
    }

    fn activate_profile_button(&mut self, button: ProfileButton) {
        let FormState::Profile(form) = &mut self.state.form else {
            return;
        };
        match button {
            ProfileButton::Primary if form.is_editing => self.submit_profile(),
            ProfileButton::Primary => form.start_editing(),
            ProfileButton::Logout => self.logout(),
            ProfileButton::DeleteAccount if form.is_busy() => {
                tracing::debug!("Delete refused, request in flight");
            }
            ProfileButton::DeleteAccount => form.confirm_delete = true,
        }
    }

    /// Run a request on the runtime and report its result as an event
    fn dispatch<T, Fut, E>(&self, request: Fut, into_event: E)
    where
        T: Send + 'static,
        Fut: Future<Output = Result<T, ApiError>> + Send + 'static,
        E: FnOnce(Result<T, ApiError>) -> ApiEvent + Send + 'static,
    {
        let events = self.events_tx.clone();
        tokio::spawn(async move {
            let result = request.await;
            if events.send(into_event(result)).is_err() {
                tracing::debug!("App closed before request completed");
            }
        });
    }

    fn submit_login(&mut self) {
        let FormState::Login(form) = &mut self.state.form else {
            return;
        };
        let Some(request) = form.begin_submit() else {
            return;
        };
        tracing::debug!("Login attempt {}", form.guard.attempts());
        let api = Arc::clone(&self.api);
        self.dispatch(
            async move { api.login(request).await },
            ApiEvent::LoginFinished,
        );
    }

    fn submit_signup(&mut self) {
        let FormState::Signup(form) = &mut self.state.form else {
            return;
        };
        let Some(request) = form.begin_submit() else {
            return;
        };
        tracing::debug!("Signup attempt {}", form.guard.attempts());
        let email = request.email.clone();
        let api = Arc::clone(&self.api);
        self.dispatch(async move { api.signup(request).await }, move |result| {
            ApiEvent::SignupFinished { email, result }
        });
    }

    fn submit_profile(&mut self) {
        let Some(token) = self.session.token().map(str::to_string) else {
            tracing::warn!("Profile update without a session");
            return;
        };
        let FormState::Profile(form) = &mut self.state.form else {
            return;
        };
        if form.delete_guard.is_in_flight() {
            tracing::debug!("Profile update refused, deletion in flight");
            return;
        }
        let Some(update) = form.begin_submit() else {
            return;
        };
        let payload = update.clone();
        let api = Arc::clone(&self.api);
        self.dispatch(
            async move { api.update_profile(&token, payload).await },
            move |result| ApiEvent::ProfileUpdated { update, result },
        );
    }

    /// Purge the user's todos, then the user
    fn delete_account(&mut self) {
        let Some(token) = self.session.token().map(str::to_string) else {
            tracing::warn!("Account deletion without a session");
            return;
        };
        let FormState::Profile(form) = &mut self.state.form else {
            return;
        };
        if form.guard.is_in_flight() || form.delete_guard.try_begin(true).is_err() {
            tracing::debug!("Delete refused, request in flight");
            return;
        }
        let api = Arc::clone(&self.api);
        self.dispatch(
            async move {
                if let Err(err) = api.delete_todos(&token).await {
                    tracing::warn!("Failed to delete todos: {err}");
                }
                api.delete_account(&token).await
            },
            ApiEvent::AccountDeleted,
        );
    }

    fn logout(&mut self) {
        if self.state.form.is_in_flight() {
            tracing::debug!("Logout refused, request in flight");
            return;
        }
        self.session.clear();
        self.state.show_toast(Toast::success(LOGGED_OUT));
        self.navigate(View::Login);
    }

    /// Fetch the signed-in user in the background
    fn load_profile(&mut self) {
        let Some(token) = self.session.token().map(str::to_string) else {
            return;
        };
        let api = Arc::clone(&self.api);
        self.dispatch(
            async move { api.fetch_profile(&token).await },
            ApiEvent::ProfileLoaded,
        );
    }

    /// Apply a request completion to the state
    pub fn handle_api_event(&mut self, event: ApiEvent) {
        match event {
            ApiEvent::LoginFinished(result) => self.finish_login(result),
            ApiEvent::SignupFinished { email, result } => self.finish_signup(email, result),
            ApiEvent::ProfileUpdated { update, result } => {
                self.finish_profile_update(update, result)
            }
            ApiEvent::AccountDeleted(result) => self.finish_delete(result),
            ApiEvent::ProfileLoaded(result) => self.finish_profile_load(result),
        }
    }

    fn finish_login(&mut self, result: Result<String, ApiError>) {
        let FormState::Login(form) = &mut self.state.form else {
            tracing::warn!("Login completed without a mounted login form");
            return;
        };
        let outcome = form.guard.settle(result);
        tracing::debug!("Login settled, success: {}", outcome.is_success());
        match outcome {
            Outcome::Success(token) => {
                self.session.set_token(token);
                self.state.show_toast(Toast::success(LOGIN_SUCCESS));
                self.navigate(View::Home);
                self.load_profile();
            }
            Outcome::Rejected(message) => form.message = Some(FormMessage::error(message)),
            Outcome::TransportFailed => form.message = Some(FormMessage::error(LOGIN_FAILED)),
        }
    }

    fn finish_signup(&mut self, email: String, result: Result<(), ApiError>) {
        let FormState::Signup(form) = &mut self.state.form else {
            tracing::warn!("Signup completed without a mounted signup form");
            return;
        };
        match form.guard.settle(result) {
            Outcome::Success(()) => {
                self.state.show_toast(Toast::success(SIGNUP_SUCCESS));
                self.navigate(View::Login);
                if let FormState::Login(login) = &mut self.state.form {
                    login.email.reset(email);
                    login.set_active_field(1);
                }
            }
            Outcome::Rejected(message) => form.message = Some(FormMessage::error(message)),
            Outcome::TransportFailed => form.message = Some(FormMessage::error(SIGNUP_FAILED)),
        }
    }

    fn finish_profile_update(&mut self, update: ProfileUpdate, result: Result<(), ApiError>) {
        let FormState::Profile(form) = &mut self.state.form else {
            tracing::warn!("Profile update completed without a mounted profile form");
            return;
        };
        match form.guard.settle(result) {
            Outcome::Success(()) if !self.session.is_authenticated() => {
                tracing::debug!("Dropping profile update accepted after the session ended");
            }
            Outcome::Success(()) => {
                let user = self
                    .session
                    .user()
                    .cloned()
                    .unwrap_or_default()
                    .merged(&update);
                form.load_user(Some(&user));
                form.message = None;
                self.session.set_user(user);
                self.state.show_toast(Toast::success(PROFILE_UPDATED));
            }
            Outcome::Rejected(message) => form.message = Some(FormMessage::error(message)),
            Outcome::TransportFailed => {
                form.message = Some(FormMessage::error(PROFILE_UPDATE_FAILED))
            }
        }
    }

    fn finish_delete(&mut self, result: Result<String, ApiError>) {
        let FormState::Profile(form) = &mut self.state.form else {
            tracing::warn!("Account deletion completed without a mounted profile form");
            return;
        };
        match form.delete_guard.settle(result) {
            Outcome::Success(message) => {
                let text = if message.is_empty() {
                    ACCOUNT_DELETED.to_string()
                } else {
                    message
                };
                self.session.clear();
                self.state.show_toast(Toast::success(text));
                self.navigate(View::Login);
            }
            Outcome::Rejected(message) => self.state.show_toast(Toast::error(message)),
            Outcome::TransportFailed => self.state.show_toast(Toast::error(DELETE_FAILED)),
        }
    }

    fn finish_profile_load(&mut self, result: Result<UserProfile, ApiError>) {
        if !self.session.is_authenticated() {
            tracing::debug!("Dropping profile loaded after the session ended");
            return;
        }
        match result {
            Ok(user) => {
                if let FormState::Profile(form) = &mut self.state.form {
                    if !form.is_editing {
                        form.load_user(Some(&user));
                    }
                }
                self.session.set_user(user);
            }
            Err(err) => tracing::warn!("Failed to load profile: {err}"),
        }
    }

    /// Wait for the next completion and apply it
    #[cfg(test)]
    async fn next_event(&mut self) {
        if let Some(event) = self.events_rx.recv().await {
            self.handle_api_event(event);
        }
    }
}
