//! Form field value objects

/// Validation rule run against a field's value on every change
pub type Validator = fn(&str) -> Option<&'static str>;

/// How typed input is stored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    /// Keep the value as typed
    #[default]
    Raw,
    /// Drop surrounding whitespace on every change (passwords)
    Trimmed,
}

/// Represents a single controlled input with its validation message
#[derive(Debug, Clone)]
pub struct FormField {
    pub name: String,
    pub label: String,
    pub value: String,
    /// Render the value masked
    pub is_secret: bool,
    pub input_mode: InputMode,
    validator: Option<Validator>,
    message: Option<&'static str>,
}

impl FormField {
    /// Create a new text field
    pub fn text(name: &str, label: &str) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            value: String::new(),
            is_secret: false,
            input_mode: InputMode::Raw,
            validator: None,
            message: None,
        }
    }

    /// Create a new password field; input is trimmed as it is typed
    pub fn secret(name: &str, label: &str) -> Self {
        Self {
            is_secret: true,
            input_mode: InputMode::Trimmed,
            ..Self::text(name, label)
        }
    }

    /// Attach a validation rule
    pub fn validated_by(mut self, validator: Validator) -> Self {
        self.validator = Some(validator);
        self
    }

    /// Load a value without producing a validation message
    pub fn reset(&mut self, value: impl Into<String>) {
        self.value = value.into();
        self.message = None;
    }

    pub fn as_text(&self) -> &str {
        &self.value
    }

    /// Value with surrounding whitespace removed, as sent to the API
    pub fn trimmed(&self) -> String {
        self.value.trim().to_string()
    }

    /// Current validation message, `None` when the value is acceptable
    pub fn message(&self) -> Option<&'static str> {
        self.message
    }

    pub fn is_empty(&self) -> bool {
        self.value.trim().is_empty()
    }

    /// Valid means non-empty and without a message from the rule
    pub fn is_valid(&self) -> bool {
        !self.is_empty()
            && self
                .validator
                .and_then(|validate| validate(&self.value))
                .is_none()
    }

    /// Replace the value and re-run validation on the value just entered
    pub fn set_text(&mut self, value: String) {
        self.value = match self.input_mode {
            InputMode::Raw => value,
            InputMode::Trimmed => value.trim().to_string(),
        };
        self.message = self.validator.and_then(|validate| validate(&self.value));
        if let Some(message) = self.message {
            tracing::trace!("{}: {message}", self.name);
        }
    }

    /// Push a character to the field value
    pub fn push_char(&mut self, c: char) {
        let mut value = self.value.clone();
        value.push(c);
        self.set_text(value);
    }

    /// Remove the last character from the field value
    pub fn pop_char(&mut self) {
        let mut value = self.value.clone();
        value.pop();
        self.set_text(value);
    }

    /// Get the display value for rendering
    pub fn display_value(&self) -> String {
        if self.is_secret {
            "•".repeat(self.value.chars().count())
        } else {
            self.value.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::forms::validation::{validate_name, NAME_TOO_SHORT};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_text_field_defaults() {
        let field = FormField::text("name", "Name");
        assert_eq!(field.name, "name");
        assert_eq!(field.label, "Name");
        assert_eq!(field.as_text(), "");
        assert!(field.message().is_none());
        assert!(!field.is_secret);
    }

    #[test]
    fn test_message_follows_value_just_entered() {
        let mut field = FormField::text("name", "Name").validated_by(validate_name);
        field.push_char('A');
        field.push_char('l');
        assert_eq!(field.message(), Some(NAME_TOO_SHORT));
        field.push_char('i');
        assert_eq!(field.message(), None);
        field.pop_char();
        assert_eq!(field.message(), Some(NAME_TOO_SHORT));
    }

    #[test]
    fn test_reset_does_not_flag_prefilled_field() {
        let mut field = FormField::text("name", "Name").validated_by(validate_name);
        field.push_char('A');
        field.reset("Al");
        assert!(field.message().is_none());
        assert!(!field.is_valid());
    }

    #[test]
    fn test_secret_field_trims_input_and_masks() {
        let mut field = FormField::secret("password", "Password");
        for c in "ab c ".chars() {
            field.push_char(c);
        }
        // A space is dropped before the next character can follow it
        assert_eq!(field.as_text(), "abc");
        assert_eq!(field.display_value(), "•••");
    }

    #[test]
    fn test_raw_field_keeps_whitespace_but_trims_payload() {
        let mut field = FormField::text("email", "Email");
        field.set_text("  a@b.com ".to_string());
        assert_eq!(field.as_text(), "  a@b.com ");
        assert_eq!(field.trimmed(), "a@b.com");
    }

    #[test]
    fn test_whitespace_only_is_empty_and_invalid() {
        let mut field = FormField::text("email", "Email");
        field.set_text("   ".to_string());
        assert!(field.is_empty());
        assert!(!field.is_valid());
    }
}
