//! Client-side form checks. A form that fails validation is never sent to
//! the server; the returned [`ValidationError`] carries one message per
//! offending field.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::constants::MIN_PASSWORD_LEN;
use crate::error::{ValidationError, FORM_FIELD};

// Hardcoded pattern, compiled once.
static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[\w.-]+@([\w-]+\.)+[\w-]{2,4}$").expect("hardcoded email regex is invalid")
});

/// Whether `email` has the shape the register form accepts.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email)
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut errors = ValidationError::new();
        if self.email.trim().is_empty() {
            errors.add("email", "Email is required.");
        } else if !is_valid_email(&self.email) {
            errors.add("email", "Invalid email address.");
        }
        if self.password.is_empty() {
            errors.add("password", "Password is required.");
        }
        errors.into_result()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RegisterForm {
    pub full_name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl RegisterForm {
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut errors = ValidationError::new();

        if self.full_name.trim().is_empty() {
            errors.add("fullName", "Name is required.");
        }

        if self.email.trim().is_empty() {
            errors.add("email", "Email is required.");
        } else if !is_valid_email(&self.email) {
            errors.add("email", "Invalid email address.");
        }

        if self.password.is_empty() {
            errors.add("password", "Password is required.");
        } else if self.password.chars().count() < MIN_PASSWORD_LEN {
            errors.add(
                "password",
                format!("Password must be at least {MIN_PASSWORD_LEN} characters."),
            );
        }

        if self.confirm_password.is_empty() {
            errors.add("confirmPassword", "Confirm Password is required.");
        } else if self.password != self.confirm_password {
            errors.add("confirmPassword", "Passwords do not match.");
        }

        errors.into_result()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordForm {
    pub current_password: String,
    pub new_password: String,
    pub confirm_password: String,
}

impl ChangePasswordForm {
    /// Form-level checks only: the API decides whether the current password
    /// is right.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut errors = ValidationError::new();
        if self.current_password.is_empty()
            || self.new_password.is_empty()
            || self.confirm_password.is_empty()
        {
            errors.add(FORM_FIELD, "All fields are required.");
        } else if self.new_password != self.confirm_password {
            errors.add(FORM_FIELD, "New password and confirmation do not match.");
        }
        errors.into_result()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ProfileForm {
    pub name: String,
    pub headline: String,
}

impl ProfileForm {
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut errors = ValidationError::new();
        if self.name.trim().is_empty() {
            errors.add("name", "Name is required.");
        }
        errors.into_result()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PostForm {
    pub title: String,
    /// Editor HTML.
    pub content: String,
    /// Comma-separated, as typed.
    pub tags: String,
}

impl PostForm {
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut errors = ValidationError::new();
        if self.title.trim().is_empty() {
            errors.add("title", "Title is required.");
        }
        // An editor left empty still emits `<p></p>`.
        if crate::text::strip_markup(&self.content).is_empty() {
            errors.add("content", "Content is required.");
        }
        errors.into_result()
    }
}

/// Trim a comment and reject it if nothing is left.
pub fn validate_comment(content: &str) -> Result<String, ValidationError> {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        let mut errors = ValidationError::new();
        errors.add("content", "Comment cannot be empty.");
        return Err(errors);
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn register(name: &str, email: &str, pw: &str, confirm: &str) -> RegisterForm {
        RegisterForm {
            full_name: name.into(),
            email: email.into(),
            password: pw.into(),
            confirm_password: confirm.into(),
        }
    }

    #[test]
    fn email_shapes() {
        assert!(is_valid_email("jane.doe@example.com"));
        assert!(is_valid_email("a-b@mail.example.io"));
        assert!(!is_valid_email("no-at-sign.com"));
        assert!(!is_valid_email("user@host"));
        assert!(!is_valid_email("user@example.technology"));
    }

    #[test]
    fn register_accepts_valid_form() {
        assert!(register("Jane", "jane@example.com", "secret1", "secret1")
            .validate()
            .is_ok());
    }

    #[test]
    fn register_reports_every_field() {
        let err = register("  ", "", "", "").validate().unwrap_err();
        assert_eq!(err.field("fullName"), Some("Name is required."));
        assert_eq!(err.field("email"), Some("Email is required."));
        assert_eq!(err.field("password"), Some("Password is required."));
        assert_eq!(err.field("confirmPassword"), Some("Confirm Password is required."));
    }

    #[test]
    fn register_short_password_and_mismatch() {
        let err = register("Jane", "bad", "abc", "abd").validate().unwrap_err();
        assert_eq!(err.field("email"), Some("Invalid email address."));
        assert_eq!(
            err.field("password"),
            Some("Password must be at least 6 characters.")
        );
        assert_eq!(err.field("confirmPassword"), Some("Passwords do not match."));
        assert_eq!(err.field("fullName"), None);
    }

    #[test]
    fn login_requires_both_fields() {
        let err = LoginForm::default().validate().unwrap_err();
        assert!(err.field("email").is_some());
        assert!(err.field("password").is_some());
    }

    #[test]
    fn change_password_form_messages() {
        let mut form = ChangePasswordForm {
            current_password: "old".into(),
            new_password: "".into(),
            confirm_password: "x".into(),
        };
        assert_eq!(
            form.validate().unwrap_err().field(FORM_FIELD),
            Some("All fields are required.")
        );

        form.new_password = "y".into();
        assert_eq!(
            form.validate().unwrap_err().field(FORM_FIELD),
            Some("New password and confirmation do not match.")
        );

        form.confirm_password = "y".into();
        assert!(form.validate().is_ok());
    }

    #[test]
    fn empty_editor_content_is_rejected() {
        let form = PostForm {
            title: "Title".into(),
            content: "<p></p>".into(),
            tags: String::new(),
        };
        assert!(form.validate().unwrap_err().field("content").is_some());
    }

    #[test]
    fn comment_is_trimmed() {
        assert_eq!(validate_comment("  nice post \n").unwrap(), "nice post");
        assert!(validate_comment("   ").is_err());
    }
}
