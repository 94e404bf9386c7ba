//! Form rendering module
//!
//! - `field_renderer`: fields, inline messages and submit labels
//! - `login_form` / `signup_form`: the signed-out screens
//! - `profile_form`: the "User Info" screen with its buttons row

mod field_renderer;
mod login_form;
mod profile_form;
mod signup_form;

pub use login_form::draw_login;
pub use profile_form::draw_profile;
pub use signup_form::draw_signup;
