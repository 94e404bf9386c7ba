//! Form domain layer
//!
//! Controlled inputs, their validation rules, and the submission guard the
//! login, signup and profile forms share.

mod field;
mod form_state;
mod submit;
mod validation;

pub use field::FormField;
pub use form_state::{
    Form, FormMessage, FormState, LoginForm, MessageKind, ProfileButton, ProfileForm, SignupForm,
    SubmitForm,
};
pub use submit::{Outcome, SubmissionState};
