//! Form field validation.
//!
//! Each validator returns `Some(message)` when the value is rejected. Handlers
//! feed the results into a [`Form`] which echoes the submitted values back
//! alongside the per-field errors.

use std::collections::BTreeMap;

use crate::error::ApiError;

pub const MIN_PASSWORD_LENGTH: usize = 6;
pub const MIN_TITLE_LENGTH: usize = 3;
pub const MIN_DESCRIPTION_LENGTH: usize = 5;
pub const MIN_LABEL_LENGTH: usize = 3;
pub const MIN_NOTE_LENGTH: usize = 2;

fn only_numbers(value: &str) -> bool {
    !value.is_empty() && value.chars().all(|c| c.is_ascii_digit())
}

fn char_len(value: &str) -> usize {
    value.trim().chars().count()
}

pub fn validate_email(email: &str) -> Option<String> {
    let email = email.trim();
    let mut parts = email.split('@');
    let valid = match (parts.next(), parts.next(), parts.next()) {
        (Some(local), Some(domain), None) => {
            !local.is_empty()
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && !email.chars().any(char::is_whitespace)
        }
        _ => false,
    };

    if valid {
        None
    } else {
        Some("Email is invalid".to_string())
    }
}

pub fn validate_password(password: &str) -> Option<String> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Some(format!(
            "Password must be at least {} characters long",
            MIN_PASSWORD_LENGTH
        ));
    }
    None
}

pub fn validate_username(username: &str) -> Option<String> {
    let len = username.chars().count();
    if len < 3 {
        return Some("Username must be at least 3 characters".to_string());
    }
    if len > 50 {
        return Some("Username must be less than 50 characters".to_string());
    }
    if !username.chars().all(|c| c.is_alphanumeric() || c == '_' || c == '-') {
        return Some("Username can only contain letters, numbers, underscore, and hyphen".to_string());
    }
    if !username.chars().next().is_some_and(char::is_alphanumeric) {
        return Some("Username must start with a letter or number".to_string());
    }
    None
}

pub fn validate_title(title: &str) -> Option<String> {
    if char_len(title) < MIN_TITLE_LENGTH || only_numbers(title.trim()) {
        return Some("The title must be at least 3 characters long.".to_string());
    }
    None
}

pub fn validate_description(description: &str) -> Option<String> {
    if char_len(description) < MIN_DESCRIPTION_LENGTH || only_numbers(description.trim()) {
        return Some("Issue description must be at least 5 characters long.".to_string());
    }
    None
}

/// A `<select>` choice such as the ticket status or product
pub fn validate_selected(kind: &str, value: &str) -> Option<String> {
    if value.trim().is_empty() {
        return Some(format!("A {} must be selected.", kind));
    }
    None
}

/// Labels of reference records: product device, service name, role type, status type
pub fn validate_label(title: &str, label: &str) -> Option<String> {
    if char_len(label) < MIN_LABEL_LENGTH || only_numbers(label.trim()) {
        return Some(format!(
            "{} must be an at least {} characters long string",
            title, MIN_LABEL_LENGTH
        ));
    }
    None
}

pub fn validate_note_text(text: &str) -> Option<String> {
    if char_len(text) < MIN_NOTE_LENGTH {
        return Some(format!("Note must be at least {} characters long.", MIN_NOTE_LENGTH));
    }
    None
}

/// Collects field errors and echoes submitted values for the client to redisplay
#[derive(Debug, Default)]
pub struct Form {
    field_errors: BTreeMap<String, String>,
    fields: BTreeMap<String, String>,
}

impl Form {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(mut self, name: &str, value: &str, error: Option<String>) -> Self {
        self.fields.insert(name.to_string(), value.to_string());
        if let Some(message) = error {
            self.field_errors.insert(name.to_string(), message);
        }
        self
    }

    /// Like `field`, but the value is never echoed back
    pub fn secret(mut self, name: &str, error: Option<String>) -> Self {
        if let Some(message) = error {
            self.field_errors.insert(name.to_string(), message);
        }
        self
    }

    pub fn has_errors(&self) -> bool {
        !self.field_errors.is_empty()
    }

    /// Fail with the collected field errors, or hand the form back for later rejections
    pub fn check(self) -> Result<Self, ApiError> {
        if self.field_errors.is_empty() {
            return Ok(self);
        }
        Err(self.reject("Form not submitted correctly."))
    }

    /// Form-level error that still echoes the submitted fields
    pub fn reject(self, message: impl Into<String>) -> ApiError {
        let field_errors = if self.field_errors.is_empty() {
            None
        } else {
            Some(self.field_errors)
        };
        ApiError::validation_error(message, field_errors, Some(self.fields))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_rules() {
        assert!(validate_email("jane@example.com").is_none());
        assert!(validate_email("  jane@example.com ").is_none());
        assert!(validate_email("").is_some());
        assert!(validate_email("jane").is_some());
        assert!(validate_email("@example.com").is_some());
        assert!(validate_email("jane@localhost").is_some());
        assert!(validate_email("jane@@example.com").is_some());
        assert!(validate_email("ja ne@example.com").is_some());
    }

    #[test]
    fn password_length() {
        assert!(validate_password("secret").is_none());
        assert!(validate_password("12345").is_some());
    }

    #[test]
    fn username_rules() {
        assert!(validate_username("jane_doe").is_none());
        assert!(validate_username("jd").is_some());
        assert!(validate_username("_jane").is_some());
        assert!(validate_username("jane doe").is_some());
        assert!(validate_username(&"a".repeat(51)).is_some());
    }

    #[test]
    fn title_rejects_short_and_numeric() {
        assert!(validate_title("VPN down").is_none());
        assert!(validate_title("ab").is_some());
        assert!(validate_title("  ab  ").is_some());
        assert!(validate_title("12345").is_some());
    }

    #[test]
    fn description_rejects_short_and_numeric() {
        assert!(validate_description("Screen flickers").is_none());
        assert!(validate_description("help").is_some());
        assert!(validate_description("1234567").is_some());
    }

    #[test]
    fn selection_required() {
        assert_eq!(
            validate_selected("status", " ").as_deref(),
            Some("A status must be selected.")
        );
        assert!(validate_selected("product", "Laptop").is_none());
    }

    #[test]
    fn label_rules_use_title() {
        assert_eq!(
            validate_label("Product", "TV").as_deref(),
            Some("Product must be an at least 3 characters long string")
        );
        assert!(validate_label("Status", "123").is_some());
        assert!(validate_label("Role", "Technician").is_none());
    }

    #[test]
    fn form_collects_errors_and_hides_secrets() {
        let form = Form::new()
            .field("email", "nope", validate_email("nope"))
            .secret("password", validate_password("123"));
        assert!(form.has_errors());

        let err = form.check().unwrap_err();
        let body = err.to_json();
        assert_eq!(body["field_errors"]["email"], "Email is invalid");
        assert!(body["field_errors"]["password"].is_string());
        assert_eq!(body["fields"]["email"], "nope");
        assert!(body["fields"].get("password").is_none());
    }

    #[test]
    fn clean_form_passes() {
        let form = Form::new().field("title", "Printer jam", validate_title("Printer jam"));
        let form = form.check().unwrap();

        let body = form.reject("Product 'Printer jam' already exists").to_json();
        assert_eq!(body["error"], "Product 'Printer jam' already exists");
        assert!(body.get("field_errors").is_none());
        assert_eq!(body["fields"]["title"], "Printer jam");
    }
}
