//! Form state management and form structs

use super::field::FormField;
use super::submit::{Refusal, SubmitGuard};
use super::validation::{validate_email, validate_name, validate_password};
use crate::api::{LoginRequest, ProfileUpdate, SignupRequest, UserProfile};

/// Trait for common form navigation
pub trait Form {
    fn field_count(&self) -> usize;
    fn active_field(&self) -> usize;
    fn set_active_field(&mut self, index: usize);
    fn next_field(&mut self) {
        let count = self.field_count();
        let current = self.active_field();
        self.set_active_field((current + 1) % count);
    }
    fn prev_field(&mut self) {
        let count = self.field_count();
        let current = self.active_field();
        if current == 0 {
            self.set_active_field(count - 1);
        } else {
            self.set_active_field(current - 1);
        }
    }
    /// The field receiving typed input, `None` on a buttons row or a locked form
    fn get_active_field_mut(&mut self) -> Option<&mut FormField>;
    fn get_field(&self, index: usize) -> Option<&FormField>;
}

/// Kind of inline message shown above a form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Success,
    Error,
}

/// Inline message shown above a form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormMessage {
    pub text: String,
    pub kind: MessageKind,
}

impl FormMessage {
    pub fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: MessageKind::Error,
        }
    }
}

/// A form that submits one payload through a `SubmitGuard`
pub trait SubmitForm {
    type Payload;

    fn guard_mut(&mut self) -> &mut SubmitGuard;
    fn is_submittable(&self) -> bool;
    fn payload(&self) -> Self::Payload;
    fn set_message(&mut self, message: Option<FormMessage>);

    /// Run the guard's precondition and, when accepted, hand out the payload
    ///
    /// Invalid fields surface the local message; a double submit is silent.
    fn begin_submit(&mut self) -> Option<Self::Payload> {
        let is_valid = self.is_submittable();
        match self.guard_mut().try_begin(is_valid) {
            Ok(()) => {
                self.set_message(None);
                Some(self.payload())
            }
            Err(refusal @ Refusal::Invalid) => {
                self.set_message(refusal.user_message().map(FormMessage::error));
                None
            }
            Err(Refusal::InFlight) => None,
        }
    }
}

/// Enum representing the mounted form, if any
#[derive(Debug, Clone, Default)]
pub enum FormState {
    #[default]
    None,
    Login(LoginForm),
    Signup(SignupForm),
    Profile(ProfileForm),
}

impl FormState {
    pub fn next_field(&mut self) {
        match self {
            FormState::None => {}
            FormState::Login(f) => f.next_field(),
            FormState::Signup(f) => f.next_field(),
            FormState::Profile(f) => f.next_field(),
        }
    }

    pub fn prev_field(&mut self) {
        match self {
            FormState::None => {}
            FormState::Login(f) => f.prev_field(),
            FormState::Signup(f) => f.prev_field(),
            FormState::Profile(f) => f.prev_field(),
        }
    }

    pub fn get_active_field_mut(&mut self) -> Option<&mut FormField> {
        match self {
            FormState::None => None,
            FormState::Login(f) => f.get_active_field_mut(),
            FormState::Signup(f) => f.get_active_field_mut(),
            FormState::Profile(f) => f.get_active_field_mut(),
        }
    }

    /// Whether the mounted form has a request outstanding
    pub fn is_in_flight(&self) -> bool {
        match self {
            FormState::None => false,
            FormState::Login(f) => f.guard.is_in_flight(),
            FormState::Signup(f) => f.guard.is_in_flight(),
            FormState::Profile(f) => f.is_busy(),
        }
    }

    pub fn set_message(&mut self, message: Option<FormMessage>) {
        match self {
            FormState::None => {}
            FormState::Login(f) => f.message = message,
            FormState::Signup(f) => f.message = message,
            FormState::Profile(f) => f.message = message,
        }
    }

    pub fn message(&self) -> Option<&FormMessage> {
        match self {
            FormState::None => None,
            FormState::Login(f) => f.message.as_ref(),
            FormState::Signup(f) => f.message.as_ref(),
            FormState::Profile(f) => f.message.as_ref(),
        }
    }
}

// Login Form
#[derive(Debug, Clone)]
pub struct LoginForm {
    pub email: FormField,
    pub password: FormField,
    pub active_field_index: usize,
    pub guard: SubmitGuard,
    pub message: Option<FormMessage>,
}

impl LoginForm {
    pub fn new() -> Self {
        Self {
            email: FormField::text("email", "Email address"),
            password: FormField::secret("password", "Password"),
            active_field_index: 0,
            guard: SubmitGuard::new(),
            message: None,
        }
    }
}

impl Default for LoginForm {
    fn default() -> Self {
        Self::new()
    }
}

impl SubmitForm for LoginForm {
    type Payload = LoginRequest;

    fn guard_mut(&mut self) -> &mut SubmitGuard {
        &mut self.guard
    }

    // The server checks the credentials; locally both just need a value
    fn is_submittable(&self) -> bool {
        !self.email.is_empty() && !self.password.is_empty()
    }

    fn payload(&self) -> LoginRequest {
        LoginRequest {
            email: self.email.trimmed(),
            password: self.password.as_text().to_string(),
        }
    }

    fn set_message(&mut self, message: Option<FormMessage>) {
        self.message = message;
    }
}

impl Form for LoginForm {
    fn field_count(&self) -> usize {
        2
    }
    fn active_field(&self) -> usize {
        self.active_field_index
    }
    fn set_active_field(&mut self, index: usize) {
        self.active_field_index = index.min(1);
    }
    fn get_active_field_mut(&mut self) -> Option<&mut FormField> {
        match self.active_field_index {
            0 => Some(&mut self.email),
            _ => Some(&mut self.password),
        }
    }
    fn get_field(&self, index: usize) -> Option<&FormField> {
        match index {
            0 => Some(&self.email),
            1 => Some(&self.password),
            _ => None,
        }
    }
}

// Signup Form
#[derive(Debug, Clone)]
pub struct SignupForm {
    pub name: FormField,
    pub email: FormField,
    pub password: FormField,
    pub active_field_index: usize,
    pub guard: SubmitGuard,
    pub message: Option<FormMessage>,
}

impl SignupForm {
    pub fn new() -> Self {
        Self {
            name: FormField::text("name", "Name").validated_by(validate_name),
            email: FormField::text("email", "Email address").validated_by(validate_email),
            password: FormField::secret("password", "Password").validated_by(validate_password),
            active_field_index: 0,
            guard: SubmitGuard::new(),
            message: None,
        }
    }
}

impl Default for SignupForm {
    fn default() -> Self {
        Self::new()
    }
}

impl SubmitForm for SignupForm {
    type Payload = SignupRequest;

    fn guard_mut(&mut self) -> &mut SubmitGuard {
        &mut self.guard
    }

    fn is_submittable(&self) -> bool {
        self.name.is_valid() && self.email.is_valid() && self.password.is_valid()
    }

    fn payload(&self) -> SignupRequest {
        SignupRequest {
            name: self.name.trimmed(),
            email: self.email.trimmed(),
            password: self.password.as_text().to_string(),
        }
    }

    fn set_message(&mut self, message: Option<FormMessage>) {
        self.message = message;
    }
}

impl Form for SignupForm {
    fn field_count(&self) -> usize {
        3
    }
    fn active_field(&self) -> usize {
        self.active_field_index
    }
    fn set_active_field(&mut self, index: usize) {
        self.active_field_index = index.min(2);
    }
    fn get_active_field_mut(&mut self) -> Option<&mut FormField> {
        match self.active_field_index {
            0 => Some(&mut self.name),
            1 => Some(&mut self.email),
            _ => Some(&mut self.password),
        }
    }
    fn get_field(&self, index: usize) -> Option<&FormField> {
        match index {
            0 => Some(&self.name),
            1 => Some(&self.email),
            2 => Some(&self.password),
            _ => None,
        }
    }
}

/// Buttons on the profile screen, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProfileButton {
    /// "Edit" while read-only, "Update" while editing
    #[default]
    Primary,
    Logout,
    DeleteAccount,
}

impl ProfileButton {
    pub const ALL: [ProfileButton; 3] = [
        ProfileButton::Primary,
        ProfileButton::Logout,
        ProfileButton::DeleteAccount,
    ];

    pub fn next(self) -> Self {
        match self {
            Self::Primary => Self::Logout,
            Self::Logout => Self::DeleteAccount,
            Self::DeleteAccount => Self::Primary,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Self::Primary => Self::DeleteAccount,
            Self::Logout => Self::Primary,
            Self::DeleteAccount => Self::Logout,
        }
    }
}

// Profile Form
#[derive(Debug, Clone)]
pub struct ProfileForm {
    pub name: FormField,
    pub email: FormField,
    /// Index 2 is the buttons row
    pub active_field_index: usize,
    pub selected_button: ProfileButton,
    pub is_editing: bool,
    /// The delete confirmation dialog is open
    pub confirm_delete: bool,
    pub guard: SubmitGuard,
    pub delete_guard: SubmitGuard,
    pub message: Option<FormMessage>,
}

impl ProfileForm {
    const BUTTONS_ROW: usize = 2;

    /// Mount the form with the session's current user
    pub fn from_user(user: Option<&UserProfile>) -> Self {
        let mut form = Self {
            name: FormField::text("name", "Name").validated_by(validate_name),
            email: FormField::text("email", "Email address").validated_by(validate_email),
            active_field_index: Self::BUTTONS_ROW,
            selected_button: ProfileButton::Primary,
            is_editing: false,
            confirm_delete: false,
            guard: SubmitGuard::new(),
            delete_guard: SubmitGuard::new(),
            message: None,
        };
        form.load_user(user);
        form
    }

    /// Replace field values with the user's, leaving edit mode
    pub fn load_user(&mut self, user: Option<&UserProfile>) {
        let (name, email) = user
            .map(|u| (u.name.clone(), u.email.clone()))
            .unwrap_or_default();
        self.name.reset(name);
        self.email.reset(email);
        self.is_editing = false;
        self.active_field_index = Self::BUTTONS_ROW;
    }

    /// An update or a deletion is outstanding
    pub fn is_busy(&self) -> bool {
        self.guard.is_in_flight() || self.delete_guard.is_in_flight()
    }

    pub fn is_buttons_row_active(&self) -> bool {
        self.active_field_index == Self::BUTTONS_ROW
    }

    /// Enter edit mode and focus the first field
    pub fn start_editing(&mut self) {
        self.is_editing = true;
        self.active_field_index = 0;
    }

    /// Leave edit mode, discarding changes
    pub fn cancel_editing(&mut self, user: Option<&UserProfile>) {
        self.load_user(user);
        self.message = None;
    }
}

impl SubmitForm for ProfileForm {
    type Payload = ProfileUpdate;

    fn guard_mut(&mut self) -> &mut SubmitGuard {
        &mut self.guard
    }

    fn is_submittable(&self) -> bool {
        self.is_editing && self.name.is_valid() && self.email.is_valid()
    }

    fn payload(&self) -> ProfileUpdate {
        ProfileUpdate {
            name: self.name.trimmed(),
            email: self.email.trimmed(),
        }
    }

    fn set_message(&mut self, message: Option<FormMessage>) {
        self.message = message;
    }
}

impl Form for ProfileForm {
    fn field_count(&self) -> usize {
        3 // name, email, buttons
    }
    fn active_field(&self) -> usize {
        self.active_field_index
    }
    fn set_active_field(&mut self, index: usize) {
        // Fields are locked until editing starts
        self.active_field_index = if self.is_editing {
            index.min(Self::BUTTONS_ROW)
        } else {
            Self::BUTTONS_ROW
        };
    }
    fn get_active_field_mut(&mut self) -> Option<&mut FormField> {
        if !self.is_editing {
            return None;
        }
        match self.active_field_index {
            0 => Some(&mut self.name),
            1 => Some(&mut self.email),
            _ => None,
        }
    }
    fn get_field(&self, index: usize) -> Option<&FormField> {
        match index {
            0 => Some(&self.name),
            1 => Some(&self.email),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::forms::submit::{SubmissionState, FILL_ALL_FIELDS};
    use crate::state::forms::validation::NAME_TOO_SHORT;

    fn type_into(field: &mut FormField, text: &str) {
        for c in text.chars() {
            field.push_char(c);
        }
    }

    fn test_user() -> UserProfile {
        UserProfile {
            id: Some("u1".to_string()),
            name: "Alice".to_string(),
            email: "alice@example.com".to_string(),
        }
    }

    mod form_state_enum {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_default_is_none() {
            let state = FormState::default();
            assert!(matches!(state, FormState::None));
            assert!(!state.is_in_flight());
            assert!(state.message().is_none());
        }

        #[test]
        fn test_get_active_field_mut_none_returns_none() {
            let mut state = FormState::None;
            state.next_field();
            state.prev_field();
            assert!(state.get_active_field_mut().is_none());
        }

        #[test]
        fn test_next_field_cycles_through_form() {
            let mut state = FormState::Login(LoginForm::new());
            assert_eq!(state.get_active_field_mut().unwrap().name, "email");
            state.next_field();
            assert_eq!(state.get_active_field_mut().unwrap().name, "password");
            state.next_field();
            assert_eq!(state.get_active_field_mut().unwrap().name, "email");
        }

        #[test]
        fn test_set_message_reaches_mounted_form() {
            let mut state = FormState::Signup(SignupForm::new());
            state.set_message(Some(FormMessage::error("Email already registered")));
            assert_eq!(
                state.message().map(|m| m.text.as_str()),
                Some("Email already registered")
            );

            let mut none = FormState::None;
            none.set_message(Some(FormMessage::error("dropped")));
            assert!(none.message().is_none());
        }

        #[test]
        fn test_profile_delete_counts_as_in_flight() {
            let mut form = ProfileForm::from_user(Some(&test_user()));
            form.delete_guard.try_begin(true).unwrap();
            assert!(FormState::Profile(form).is_in_flight());
        }
    }

    mod login_form {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_new_has_correct_defaults() {
            let form = LoginForm::new();
            assert_eq!(form.active_field_index, 0);
            assert_eq!(form.email.name, "email");
            assert!(form.password.is_secret);
            assert_eq!(form.guard.state(), SubmissionState::Idle);
        }

        #[test]
        fn test_requires_both_fields() {
            let mut form = LoginForm::new();
            assert!(!form.is_submittable());
            type_into(&mut form.email, "a@b.com");
            assert!(!form.is_submittable());
            type_into(&mut form.password, "secret");
            assert!(form.is_submittable());
        }

        #[test]
        fn test_payload_trims_email() {
            let mut form = LoginForm::new();
            type_into(&mut form.email, "  a@b.com ");
            type_into(&mut form.password, "secret");
            assert_eq!(
                form.payload(),
                LoginRequest {
                    email: "a@b.com".to_string(),
                    password: "secret".to_string(),
                }
            );
        }

        #[test]
        fn test_begin_submit_refuses_empty_form_with_message() {
            let mut form = LoginForm::new();
            assert!(form.begin_submit().is_none());
            assert_eq!(form.message, Some(FormMessage::error(FILL_ALL_FIELDS)));
            assert_eq!(form.guard.state(), SubmissionState::Idle);
        }

        #[test]
        fn test_second_begin_submit_is_silent_no_op() {
            let mut form = LoginForm::new();
            type_into(&mut form.email, "a@b.com");
            type_into(&mut form.password, "secret");
            assert!(form.begin_submit().is_some());
            assert!(form.begin_submit().is_none());
            assert!(form.message.is_none());
            assert_eq!(form.guard.attempts(), 1);
        }

        #[test]
        fn test_accepted_submit_clears_previous_message() {
            let mut form = LoginForm::new();
            form.begin_submit();
            assert!(form.message.is_some());
            type_into(&mut form.email, "a@b.com");
            type_into(&mut form.password, "secret");
            assert!(form.begin_submit().is_some());
            assert!(form.message.is_none());
        }

        #[test]
        fn test_set_active_field_clamps() {
            let mut form = LoginForm::new();
            form.set_active_field(100);
            assert_eq!(form.active_field_index, 1);
        }
    }

    mod signup_form {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_short_name_blocks_submit() {
            let mut form = SignupForm::new();
            type_into(&mut form.name, "Al");
            type_into(&mut form.email, "al@example.com");
            type_into(&mut form.password, "secret");
            assert_eq!(form.name.message(), Some(NAME_TOO_SHORT));
            assert!(!form.is_submittable());
        }

        #[test]
        fn test_valid_fields_produce_trimmed_payload() {
            let mut form = SignupForm::new();
            type_into(&mut form.name, " Alice ");
            type_into(&mut form.email, "alice@example.com ");
            type_into(&mut form.password, "secret1");
            assert!(form.is_submittable());
            assert_eq!(
                form.payload(),
                SignupRequest {
                    name: "Alice".to_string(),
                    email: "alice@example.com".to_string(),
                    password: "secret1".to_string(),
                }
            );
        }

        #[test]
        fn test_get_field_returns_correct_fields() {
            let form = SignupForm::new();
            assert_eq!(form.get_field(0).unwrap().name, "name");
            assert_eq!(form.get_field(1).unwrap().name, "email");
            assert_eq!(form.get_field(2).unwrap().name, "password");
            assert!(form.get_field(3).is_none());
        }

        #[test]
        fn test_prev_field_cycles() {
            let mut form = SignupForm::new();
            form.prev_field();
            assert_eq!(form.active_field_index, 2);
        }
    }

    mod profile_form {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_from_user_loads_values_read_only() {
            let form = ProfileForm::from_user(Some(&test_user()));
            assert_eq!(form.name.as_text(), "Alice");
            assert_eq!(form.email.as_text(), "alice@example.com");
            assert!(!form.is_editing);
            assert!(form.is_buttons_row_active());
            assert!(!form.is_submittable());
        }

        #[test]
        fn test_from_missing_user_is_empty() {
            let form = ProfileForm::from_user(None);
            assert_eq!(form.name.as_text(), "");
            assert_eq!(form.email.as_text(), "");
        }

        #[test]
        fn test_fields_locked_until_editing() {
            let mut form = ProfileForm::from_user(Some(&test_user()));
            form.set_active_field(0);
            assert!(form.is_buttons_row_active());
            assert!(form.get_active_field_mut().is_none());

            form.start_editing();
            assert_eq!(form.active_field_index, 0);
            assert_eq!(form.get_active_field_mut().unwrap().name, "name");
            assert!(form.is_submittable());
        }

        #[test]
        fn test_invalid_edit_blocks_submit() {
            let mut form = ProfileForm::from_user(Some(&test_user()));
            form.start_editing();
            form.email.set_text("not-an-email".to_string());
            assert!(form.email.message().is_some());
            assert!(form.begin_submit().is_none());
            assert_eq!(form.message, Some(FormMessage::error(FILL_ALL_FIELDS)));
        }

        #[test]
        fn test_cancel_editing_restores_user() {
            let user = test_user();
            let mut form = ProfileForm::from_user(Some(&user));
            form.start_editing();
            form.name.set_text("Al".to_string());
            form.message = Some(FormMessage::error("boom"));
            form.cancel_editing(Some(&user));
            assert_eq!(form.name.as_text(), "Alice");
            assert!(form.name.message().is_none());
            assert!(form.message.is_none());
            assert!(!form.is_editing);
        }

        #[test]
        fn test_payload_trims_both_fields() {
            let mut form = ProfileForm::from_user(Some(&test_user()));
            form.start_editing();
            form.name.set_text("  Alicia ".to_string());
            assert_eq!(
                form.payload(),
                ProfileUpdate {
                    name: "Alicia".to_string(),
                    email: "alice@example.com".to_string(),
                }
            );
        }

        #[test]
        fn test_button_cycle_wraps() {
            assert_eq!(ProfileButton::DeleteAccount.next(), ProfileButton::Primary);
            assert_eq!(ProfileButton::Primary.prev(), ProfileButton::DeleteAccount);
            assert_eq!(ProfileButton::ALL.len(), 3);
        }
    }
}
